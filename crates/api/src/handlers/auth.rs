//! Handlers for the `/auth` resource: registration, login, sessions, and
//! email verification.

use axum::extract::State;
use axum::http::header::{SET_COOKIE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use box_core::box_code::{generate_box_code, MAX_GENERATION_ATTEMPTS};
use box_core::error::CoreError;
use box_core::roles::{validate_role, ROLE_ARTIST};
use box_core::tokens::{generate_verification_token, hash_token};
use box_core::types::DbId;
use box_db::models::email_verification::CreateEmailVerification;
use box_db::models::session::CreateSession;
use box_db::models::user::{CreateUser, User, UserResponse};
use box_db::repositories::{EmailVerificationRepo, SessionRepo, UserRepo};
use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::session::{clear_session_cookie, issue_token, session_cookie};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

/// Response carrying a fresh session cookie.
type WithSession<T> = (StatusCode, [(axum::http::HeaderName, String); 1], Json<T>);

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,
    /// `artist` (default) or `studio`.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account, issue an email verification token, and sign in.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RegisterRequest>,
) -> AppResult<WithSession<UserResponse>> {
    input.validate()?;
    validate_password_strength(&input.password).map_err(CoreError::validation)?;

    let role = input.role.as_deref().unwrap_or(ROLE_ARTIST).to_string();
    validate_role(&role).map_err(CoreError::validation)?;

    let email = input.email.trim().to_lowercase();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = create_with_unique_code(
        &state,
        CreateUser {
            email,
            display_name: input.display_name.trim().to_string(),
            password_hash: Some(password_hash),
            oauth_provider: None,
            role,
            box_code: String::new(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, box_code = %user.box_code, "User registered");

    send_verification(&state, user.id).await?;
    let cookie = start_session(&state, &user, &headers).await?;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(UserResponse::from(&user)),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<WithSession<UserResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let Some(stored_hash) = user.password_hash.as_deref() else {
        return Err(AppError::Core(CoreError::Forbidden(
            "This account signs in through an external provider".into(),
        )));
    };

    let password_valid = verify_password(&input.password, stored_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        UserRepo::increment_failed_login(&state.pool, user.id).await?;

        let new_count = user.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, "Account locked after repeated failed logins");
        }

        return Err(invalid());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let user = load_user(&state, user.id).await?;

    let cookie = start_session(&state, &user, &headers).await?;
    Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(UserResponse::from(&user))))
}

/// POST /api/v1/auth/logout
///
/// Revoke the current session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<(StatusCode, [(axum::http::HeaderName, String); 1])> {
    SessionRepo::revoke_by_token_hash(&state.pool, &auth_user.session_hash).await?;
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(&state.config.session))],
    ))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = load_user(&state, auth_user.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let user =
        UserRepo::update_display_name(&state.pool, auth_user.user_id, input.display_name.trim())
            .await?
            .ok_or(AppError::not_found("User", auth_user.user_id))?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/v1/auth/verify-email
///
/// Consume a verification token. Unknown, expired, and already-used tokens
/// all produce the same 400.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<Json<UserResponse>> {
    let consumed = EmailVerificationRepo::consume(&state.pool, &hash_token(&input.token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Verification link is invalid or has expired".into(),
            ))
        })?;

    let user = UserRepo::mark_email_verified(&state.pool, consumed.user_id)
        .await?
        .ok_or(AppError::not_found("User", consumed.user_id))?;

    tracing::info!(user_id = user.id, "Email address verified");
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/v1/auth/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<StatusCode> {
    let user = load_user(&state, auth_user.user_id).await?;
    if user.email_verified {
        return Err(AppError::Core(CoreError::Conflict(
            "Email address is already verified".into(),
        )));
    }

    EmailVerificationRepo::invalidate_for_user(&state.pool, user.id).await?;
    send_verification(&state, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/change-password
///
/// Replace the password and sign out every other session.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = load_user(&state, auth_user.user_id).await?;
    let Some(stored_hash) = user.password_hash.as_deref() else {
        return Err(AppError::Core(CoreError::Forbidden(
            "This account signs in through an external provider".into(),
        )));
    };

    let current_ok = verify_password(&input.current_password, stored_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password).map_err(CoreError::validation)?;
    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;
    let revoked =
        SessionRepo::revoke_others_for_user(&state.pool, user.id, &auth_user.session_hash).await?;

    tracing::info!(user_id = user.id, revoked, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}

/// Insert the user, drawing a fresh BOX code whenever the previous one
/// collides with an existing account.
async fn create_with_unique_code(state: &AppState, mut input: CreateUser) -> AppResult<User> {
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        input.box_code = generate_box_code();
        match UserRepo::create(&state.pool, &input).await {
            Ok(user) => return Ok(user),
            Err(e) if is_unique_violation(&e, "uq_users_box_code") => {
                tracing::debug!(attempt, "BOX code collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(AppError::InternalError(
        "Could not allocate a unique BOX code".into(),
    ))
}

/// Issue a verification token. Email delivery is out of scope, so the
/// link is written to the log.
async fn send_verification(state: &AppState, user_id: DbId) -> AppResult<()> {
    let token = generate_verification_token();
    EmailVerificationRepo::create(
        &state.pool,
        &CreateEmailVerification {
            user_id,
            token_hash: token.hash,
            expires_at: Utc::now() + Duration::hours(state.config.verification_ttl_hours),
        },
    )
    .await?;

    let verify_url = format!(
        "{}/verify-email?token={}",
        state.config.public_base_url, token.plaintext
    );
    tracing::info!(user_id, %verify_url, "Email verification issued");
    Ok(())
}

/// Sign a session token, persist its row, and build the `Set-Cookie` value.
async fn start_session(state: &AppState, user: &User, headers: &HeaderMap) -> AppResult<String> {
    let issued = issue_token(user.id, &user.role, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash: issued.token_hash,
            expires_at: issued.expires_at,
            user_agent,
            ip_address,
        },
    )
    .await?;

    Ok(session_cookie(&issued.token, &state.config.session))
}
