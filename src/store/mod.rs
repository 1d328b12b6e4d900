pub mod models;
pub mod seed;

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use thiserror::Error;

pub use models::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),
}

/// In-memory collections for users, events and favorites.
///
/// Ids are sequential decimal strings. Maps are keyed by the numeric id so
/// listings come out in creation order.
#[derive(Debug)]
pub struct Store {
    users: BTreeMap<u64, User>,
    events: BTreeMap<u64, Event>,
    favorites: HashMap<String, Vec<String>>,
    next_user_id: u64,
    next_event_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids round-trip exactly, so "01" does not resolve to "1".
fn parse_id(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|key| key.to_string() == id)
}

impl Store {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            events: BTreeMap::new(),
            favorites: HashMap::new(),
            next_user_id: 1,
            next_event_id: 1,
        }
    }

    // -- Users --

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(&parse_id(id)?)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Insert a new user. Fails with `Conflict` when the email is taken.
    pub fn create_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.user_by_email(&new.email).is_some() {
            return Err(StoreError::Conflict("Email already registered".into()));
        }
        Ok(self.insert_user(new))
    }

    /// Look up a user by email, creating a verified password-less account
    /// if none exists. Returns the user and whether it was created.
    pub fn find_or_create_social_user(&mut self, email: &str, name: &str) -> (User, bool) {
        if let Some(user) = self.user_by_email(email) {
            return (user.clone(), false);
        }

        let user = self.insert_user(NewUser {
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Student,
            password_hash: String::new(),
            verified: true,
        });
        (user, true)
    }

    fn insert_user(&mut self, new: NewUser) -> User {
        let key = self.next_user_id;
        self.next_user_id += 1;

        let user = User {
            id: key.to_string(),
            email: new.email,
            name: new.name,
            role: new.role,
            password_hash: new.password_hash,
            joined_date: Utc::now(),
            points: 100,
            verified: new.verified,
            updated_at: None,
        };
        self.users.insert(key, user.clone());

        user
    }

    pub fn update_profile(
        &mut self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, StoreError> {
        let key = parse_id(id).ok_or(StoreError::NotFound("User"))?;

        if let Some(email) = &email {
            let taken = self
                .users
                .iter()
                .any(|(k, u)| *k != key && u.email.eq_ignore_ascii_case(email));
            if taken {
                return Err(StoreError::Conflict("Email already registered".into()));
            }
        }

        let user = self.users.get_mut(&key).ok_or(StoreError::NotFound("User"))?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        user.updated_at = Some(Utc::now());

        Ok(user.clone())
    }

    pub fn set_password_hash(&mut self, id: &str, hash: String) -> Result<(), StoreError> {
        let user = parse_id(id)
            .and_then(|key| self.users.get_mut(&key))
            .ok_or(StoreError::NotFound("User"))?;
        user.password_hash = hash;
        user.updated_at = Some(Utc::now());
        Ok(())
    }

    // -- Events --

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn list_events(&self, filter: &EventFilter) -> Vec<Event> {
        self.events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    pub fn event(&self, id: &str) -> Result<&Event, StoreError> {
        parse_id(id)
            .and_then(|key| self.events.get(&key))
            .ok_or(StoreError::NotFound("Event"))
    }

    fn event_mut(&mut self, id: &str) -> Result<&mut Event, StoreError> {
        parse_id(id)
            .and_then(|key| self.events.get_mut(&key))
            .ok_or(StoreError::NotFound("Event"))
    }

    pub fn create_event(&mut self, new: NewEvent, created_by: &str) -> Event {
        let key = self.next_event_id;
        self.next_event_id += 1;

        let event = Event {
            id: key.to_string(),
            title: new.title,
            date: new.date,
            time: new.time,
            location: new.location,
            category: new.category,
            description: new.description,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
            attendees: Vec::new(),
            comments: Vec::new(),
            updated_at: None,
        };
        self.events.insert(key, event.clone());

        event
    }

    pub fn update_event(&mut self, id: &str, changes: EventChanges) -> Result<Event, StoreError> {
        let event = self.event_mut(id)?;

        if let Some(title) = changes.title {
            event.title = title;
        }
        if let Some(date) = changes.date {
            event.date = date;
        }
        if let Some(time) = changes.time {
            event.time = time;
        }
        if let Some(location) = changes.location {
            event.location = location;
        }
        if let Some(category) = changes.category {
            event.category = category;
        }
        if let Some(description) = changes.description {
            event.description = description;
        }
        event.updated_at = Some(Utc::now());

        Ok(event.clone())
    }

    pub fn delete_event(&mut self, id: &str) -> Result<Event, StoreError> {
        parse_id(id)
            .and_then(|key| self.events.remove(&key))
            .ok_or(StoreError::NotFound("Event"))
    }

    pub fn add_comment(&mut self, id: &str, author: &str, text: &str) -> Result<Comment, StoreError> {
        let event = self.event_mut(id)?;
        let comment = Comment {
            author: author.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        event.comments.push(comment.clone());
        Ok(comment)
    }

    /// Flip `user_id`'s membership in the event's attendee list.
    pub fn toggle_attendance(&mut self, id: &str, user_id: &str) -> Result<Attendance, StoreError> {
        let event = self.event_mut(id)?;

        let attended = match event.attendees.iter().position(|a| a == user_id) {
            Some(pos) => {
                event.attendees.remove(pos);
                false
            }
            None => {
                event.attendees.push(user_id.to_string());
                true
            }
        };

        Ok(Attendance {
            attended,
            attendees_count: event.attendees.len(),
        })
    }

    // -- Favorites --

    pub fn favorite_ids(&self, user_id: &str) -> Vec<String> {
        self.favorites.get(user_id).cloned().unwrap_or_default()
    }

    /// Bookmark an event. Adding one that is already present is a no-op.
    pub fn add_favorite(&mut self, user_id: &str, event_id: &str) -> Result<Vec<String>, StoreError> {
        self.event(event_id)?;

        let list = self.favorites.entry(user_id.to_string()).or_default();
        if !list.iter().any(|e| e == event_id) {
            list.push(event_id.to_string());
        }
        Ok(list.clone())
    }

    pub fn remove_favorite(&mut self, user_id: &str, event_id: &str) -> Vec<String> {
        match self.favorites.get_mut(user_id) {
            Some(list) => {
                list.retain(|e| e != event_id);
                list.clone()
            }
            None => Vec::new(),
        }
    }

    /// Resolve a user's favorites to events, skipping deleted ones.
    pub fn favorite_events(&self, user_id: &str) -> Vec<Event> {
        self.favorites
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.event(id).ok())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
