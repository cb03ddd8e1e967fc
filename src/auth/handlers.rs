use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, SignupRequest, UpdateProfileRequest, UserView},
        jwt::AuthUser,
        password::{hash_password, verify_password},
        repo::{ProfileUpdate, User},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
        .route("/auth/profile", put(update_profile))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

// Unreserved characters pass through; everything else is percent-encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Default avatar generated from the display name.
fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        utf8_percent_encode(name, QUERY_VALUE)
    )
}

/// A lost check-then-create race surfaces as a unique violation on
/// `users.email`; everything else stays an internal failure.
fn map_signup_error(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::DuplicateEmail,
        _ => ApiError::Internal(e.into()),
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Check-then-create; the UNIQUE constraint below closes the race.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;
    let avatar = avatar_url(&payload.name);

    let user = User::create(&state.db, &payload.name, &payload.email, &hash, &avatar)
        .await
        .map_err(map_signup_error)?;

    let token = state.jwt.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password fail identically.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserView>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserView>, ApiError> {
    let update = ProfileUpdate {
        phone: payload.phone,
        address: payload.address,
        city: payload.city,
        pincode: payload.pincode,
        preferences: payload.preferences,
    };

    let user = User::update_profile(&state.db, user_id, update)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::DatabaseError;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@x"));
    }

    #[test]
    fn avatar_url_percent_encodes_the_name() {
        assert_eq!(
            avatar_url("Ana"),
            "https://ui-avatars.com/api/?name=Ana&background=random"
        );
        assert_eq!(
            avatar_url("Ana Lee"),
            "https://ui-avatars.com/api/?name=Ana%20Lee&background=random"
        );
        assert!(avatar_url("José").contains("Jos%C3%A9"));
    }

    #[derive(Debug)]
    struct StubDbError {
        unique: bool,
    }

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            if self.unique {
                "duplicate key value violates unique constraint \"users_email_key\""
            } else {
                "connection closed"
            }
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.unique {
                sqlx::error::ErrorKind::UniqueViolation
            } else {
                sqlx::error::ErrorKind::Other
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn lost_signup_race_maps_to_duplicate_email() {
        let err = sqlx::Error::Database(Box::new(StubDbError { unique: true }));
        assert!(matches!(map_signup_error(err), ApiError::DuplicateEmail));
    }

    #[test]
    fn other_create_failures_stay_internal() {
        let err = sqlx::Error::Database(Box::new(StubDbError { unique: false }));
        assert!(matches!(map_signup_error(err), ApiError::Internal(_)));
        assert!(matches!(
            map_signup_error(sqlx::Error::RowNotFound),
            ApiError::Internal(_)
        ));
    }
}
