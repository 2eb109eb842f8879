//! Handlers for the press kit (EPK) resource.
//!
//! Each user owns at most one kit. The public slug is derived from the
//! artist name on first save and never changes afterwards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use box_core::error::CoreError;
use box_core::press_kit::{
    slug_candidate, slugify, validate_artist_name, validate_bios, validate_link_url,
    validate_media_links, validate_social_links, MAX_SLUG_ATTEMPTS,
};
use box_db::models::press_kit::{PressKit, UpsertPressKit};
use box_db::repositories::PressKitRepo;
use validator::ValidateEmail;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/press-kit
pub async fn get_mine(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<PressKit>> {
    let kit = PressKitRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("You have not created a press kit yet".into()))?;
    Ok(Json(kit))
}

/// PUT /api/v1/press-kit
///
/// Creates the kit on first save (201), replaces it afterwards (200).
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpsertPressKit>,
) -> AppResult<(StatusCode, Json<PressKit>)> {
    let input = normalize(input);
    validate(&input)?;

    if let Some(kit) = PressKitRepo::update(&state.pool, user.user_id, &input).await? {
        return Ok((StatusCode::OK, Json(kit)));
    }

    let base = slugify(&input.artist_name);
    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let slug = slug_candidate(&base, attempt);
        if PressKitRepo::slug_exists(&state.pool, &slug).await? {
            continue;
        }
        match PressKitRepo::create(&state.pool, user.user_id, &slug, &input).await {
            Ok(kit) => {
                tracing::info!(user_id = user.user_id, slug = %kit.slug, "Press kit created");
                return Ok((StatusCode::CREATED, Json(kit)));
            }
            // Lost a race for the slug; try the next candidate.
            Err(e) if is_unique_violation(&e, "uq_press_kits_slug") => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not find a free slug for '{base}'"
    ))))
}

/// POST /api/v1/press-kit/publish
pub async fn publish(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<PressKit>> {
    set_published(&state, &user, true).await
}

/// POST /api/v1/press-kit/unpublish
pub async fn unpublish(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<PressKit>> {
    set_published(&state, &user, false).await
}

/// GET /api/v1/public/epk/{slug}
///
/// No session required. Unpublished kits are indistinguishable from
/// missing ones.
pub async fn public_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PressKit>> {
    let kit = PressKitRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No press kit at '{slug}'")))?;
    Ok(Json(kit))
}

async fn set_published(state: &AppState, user: &AuthUser, published: bool) -> AppResult<Json<PressKit>> {
    let kit = PressKitRepo::set_published(&state.pool, user.user_id, published)
        .await?
        .ok_or_else(|| AppError::NotFound("You have not created a press kit yet".into()))?;
    tracing::info!(user_id = user.user_id, published, "Press kit visibility changed");
    Ok(Json(kit))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize(input: UpsertPressKit) -> UpsertPressKit {
    UpsertPressKit {
        artist_name: input.artist_name.trim().to_string(),
        tagline: non_empty(input.tagline),
        short_bio: non_empty(input.short_bio),
        long_bio: non_empty(input.long_bio),
        genres: input
            .genres
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect(),
        media_links: input.media_links,
        contact_email: non_empty(input.contact_email),
        booking_email: non_empty(input.booking_email),
        website: non_empty(input.website),
        social_links: input.social_links,
    }
}

fn validate(input: &UpsertPressKit) -> AppResult<()> {
    validate_artist_name(&input.artist_name).map_err(CoreError::validation)?;
    validate_bios(input.short_bio.as_deref(), input.long_bio.as_deref())
        .map_err(CoreError::validation)?;
    validate_media_links(&input.media_links).map_err(CoreError::validation)?;
    validate_social_links(&input.social_links).map_err(CoreError::validation)?;
    if let Some(website) = input.website.as_deref() {
        validate_link_url(website).map_err(CoreError::validation)?;
    }
    for email in [&input.contact_email, &input.booking_email].into_iter().flatten() {
        if !email.validate_email() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "'{email}' is not a valid email address"
            ))));
        }
    }
    Ok(())
}
