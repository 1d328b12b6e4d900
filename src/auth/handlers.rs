use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extractors::{ApiJson, CurrentUser};
use crate::state::AppState;
use crate::store::{NewUser, PublicUser, Role, User};

// -- Request/Response types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl RegisterRequest {
    /// Prefer `name`; fall back to "first last".
    fn display_name(&self) -> Option<String> {
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let first = self.first_name.as_deref().unwrap_or("").trim();
                let last = self.last_name.as_deref().unwrap_or("").trim();
                format!("{} {}", first, last).trim().to_string()
            }
        };
        (!name.is_empty()).then_some(name)
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize, Default)]
pub struct SocialCredentials {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: PublicUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn auth_response(state: &AppState, user: &User, message: Option<String>) -> AppResult<AuthResponse> {
    Ok(AuthResponse {
        access_token: state.tokens.issue(user)?,
        token_type: "bearer",
        user: PublicUser::from(user),
        message,
    })
}

fn validate_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".into()));
    }
    Ok(email.to_string())
}

// -- Handlers --

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = validate_email(&req.email)?;
    let name = req
        .display_name()
        .ok_or_else(|| AppError::BadRequest("Name is required".into()))?;
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".into()));
    }

    let password_hash = hash_password(&req.password, state.config.auth.bcrypt_cost)?;

    let user = {
        let mut store = state.store.lock().await;
        store.create_user(NewUser {
            email,
            name,
            role: req.role,
            password_hash,
            verified: false,
        })?
    };

    tracing::info!("Registered user {} ({})", user.id, user.role);

    let response = auth_response(
        &state,
        &user,
        Some("Account created successfully! Please verify your email.".into()),
    )?;
    Ok(Json(response))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = {
        let store = state.store.lock().await;
        store.user_by_email(req.email.trim()).cloned()
    };

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => {
            tracing::warn!("Failed login attempt");
            return Err(AppError::Unauthorized("Invalid email or password".into()));
        }
    };

    tracing::info!("User {} logged in", user.id);
    Ok(Json(auth_response(&state, &user, None)?))
}

/// POST /auth/forgot-password. Same answer whether or not the email exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> AppResult<Json<Value>> {
    let found = {
        let store = state.store.lock().await;
        store.user_by_email(req.email.trim()).is_some()
    };
    tracing::debug!("Password reset requested (account exists: {})", found);

    Ok(Json(json!({
        "message": "If an account with that email exists, we've sent a password reset link.",
        "success": true,
    })))
}

/// POST /auth/social/{provider}. Mock OAuth: find or create a verified account.
pub async fn social_login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    ApiJson(credentials): ApiJson<SocialCredentials>,
) -> AppResult<Json<AuthResponse>> {
    let label = match provider.as_str() {
        "google" => "Google",
        "facebook" => "Facebook",
        _ => return Err(AppError::NotFound("Provider")),
    };

    let email = match credentials.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => format!("{}_user@example.com", provider),
    };
    let name = match credentials.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{} User", label),
    };

    let (user, created) = {
        let mut store = state.store.lock().await;
        store.find_or_create_social_user(&email, &name)
    };

    if created {
        tracing::info!("Created {} account for user {}", label, user.id);
    }

    let response = auth_response(
        &state,
        &user,
        Some(format!("Logged in with {} successfully!", label)),
    )?;
    Ok(Json(response))
}

/// PUT /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> AppResult<Json<Value>> {
    if req.new_password.is_empty() {
        return Err(AppError::BadRequest("New password is required".into()));
    }

    let current_hash = {
        let store = state.store.lock().await;
        store
            .user(&user.id)
            .map(|u| u.password_hash.clone())
            .ok_or(AppError::NotFound("User"))?
    };

    if !verify_password(&req.current_password, &current_hash) {
        return Err(AppError::BadRequest("Current password is incorrect".into()));
    }

    let new_hash = hash_password(&req.new_password, state.config.auth.bcrypt_cost)?;
    {
        let mut store = state.store.lock().await;
        store.set_password_hash(&user.id, new_hash)?;
    }

    tracing::info!("User {} changed password", user.id);
    Ok(Json(json!({ "message": "Password changed successfully" })))
}
