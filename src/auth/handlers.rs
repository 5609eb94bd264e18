use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest},
    error::AuthError,
    extractors::AuthUser,
    jwt::JwtKeys,
    password,
    repo::User,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    if payload.pin.is_empty() {
        return Err(AuthError::Validation("pin must not be empty".into()));
    }
    if payload.mobile_number.is_empty() && payload.email.is_empty() {
        return Err(AuthError::Validation(
            "mobileNumber or email is required".into(),
        ));
    }

    if state.config.enforce_unique_identifiers
        && User::identifier_taken(&state.db, &payload.mobile_number, &payload.email).await?
    {
        warn!("registration with taken identifier");
        return Err(AuthError::DuplicateIdentifier);
    }

    let hash = password::hash_pin(&payload.pin)?;
    let user = User::create(
        &state.db,
        &payload.name,
        &hash,
        &payload.mobile_number,
        &payload.email,
    )
    .await?;

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully, awaiting admin approval".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    if payload.identifier.is_empty() || payload.pin.is_empty() {
        return Err(AuthError::Validation(
            "identifier and pin are required".into(),
        ));
    }

    // Unknown identifier and wrong pin produce the same failure so the
    // endpoint cannot be used to enumerate registered identifiers.
    let user = match User::find_by_identifier(&state.db, &payload.identifier).await? {
        Some(u) => u,
        None => {
            warn!("login for unknown identifier");
            return Err(AuthError::InvalidCredentials);
        }
    };

    if !password::verify_pin(&payload.pin, &user.pin_hash)? {
        warn!(user_id = %user.id, "login with wrong pin");
        return Err(AuthError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    // A valid token whose subject no longer resolves is treated the same as
    // an invalid token.
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AuthError::InvalidToken)?;
    Ok(Json(PublicUser::from(&user)))
}
