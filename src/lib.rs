// Library exports for the campus events server.
// Integration tests build the router through these modules.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;
pub mod store;
