//! Handlers for the `/studio` resource: studio rosters and the artist side
//! of roster invitations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use box_core::box_code::normalize_box_code;
use box_core::error::CoreError;
use box_core::roles::ROLE_STUDIO;
use box_core::types::DbId;
use box_db::models::project::Project;
use box_db::models::studio::{RosterEntry, StudioArtist, StudioLink, LINK_ACCEPTED, LINK_PENDING};
use box_db::repositories::{ProjectRepo, StudioArtistRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireArtist, RequireStudio};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct InviteArtistRequest {
    #[validate(length(min = 1, message = "box_code is required"))]
    pub box_code: String,
}

// ---------------------------------------------------------------------------
// Studio side
// ---------------------------------------------------------------------------

/// GET /api/v1/studio/roster
pub async fn roster(
    State(state): State<AppState>,
    RequireStudio(studio): RequireStudio,
) -> AppResult<Json<DataResponse<Vec<RosterEntry>>>> {
    let entries = StudioArtistRepo::roster_for_studio(&state.pool, studio.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/studio/roster
///
/// Invite an artist by BOX code. The link stays `pending` until the artist
/// accepts it.
pub async fn invite(
    State(state): State<AppState>,
    RequireStudio(studio): RequireStudio,
    Json(input): Json<InviteArtistRequest>,
) -> AppResult<(StatusCode, Json<StudioArtist>)> {
    input.validate()?;
    let code = normalize_box_code(&input.box_code).map_err(CoreError::validation)?;

    let artist = UserRepo::find_by_box_code(&state.pool, &code)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::NotFound(format!("No artist found with code {code}")))?;

    if artist.id == studio.user_id {
        return Err(AppError::BadRequest("You cannot add yourself to your roster".into()));
    }
    if artist.role == ROLE_STUDIO {
        return Err(AppError::BadRequest("Only artists can join a roster".into()));
    }

    if let Some(existing) =
        StudioArtistRepo::find_link(&state.pool, studio.user_id, artist.id).await?
    {
        let msg = if existing.status == LINK_ACCEPTED {
            "Artist is already on your roster"
        } else {
            "Artist already has a pending invitation"
        };
        return Err(AppError::Core(CoreError::Conflict(msg.into())));
    }

    // A concurrent invite still trips `uq_studio_artists_pair` (409).
    let link = StudioArtistRepo::invite(&state.pool, studio.user_id, artist.id).await?;
    tracing::info!(
        studio_id = studio.user_id,
        artist_id = artist.id,
        "Artist invited to roster"
    );
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/v1/studio/roster/{artist_id}
pub async fn remove(
    State(state): State<AppState>,
    RequireStudio(studio): RequireStudio,
    Path(artist_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StudioArtistRepo::remove(&state.pool, studio.user_id, artist_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Roster artist", artist_id))
    }
}

/// GET /api/v1/studio/roster/{artist_id}/projects
///
/// Read-only view of an artist's projects. Requires an accepted link.
pub async fn artist_projects(
    State(state): State<AppState>,
    RequireStudio(studio): RequireStudio,
    Path(artist_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    if !StudioArtistRepo::is_accepted(&state.pool, studio.user_id, artist_id).await? {
        return Err(AppError::not_found("Roster artist", artist_id));
    }
    let projects = ProjectRepo::list_for_artist(&state.pool, artist_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

// ---------------------------------------------------------------------------
// Artist side
// ---------------------------------------------------------------------------

/// GET /api/v1/studio/invitations
pub async fn invitations(
    State(state): State<AppState>,
    RequireArtist(artist): RequireArtist,
) -> AppResult<Json<DataResponse<Vec<StudioLink>>>> {
    let links =
        StudioArtistRepo::links_for_artist(&state.pool, artist.user_id, LINK_PENDING).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/studio/invitations/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    RequireArtist(artist): RequireArtist,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudioArtist>> {
    let link = StudioArtistRepo::accept(&state.pool, id, artist.user_id)
        .await?
        .ok_or(AppError::not_found("Invitation", id))?;
    tracing::info!(link_id = id, artist_id = artist.user_id, "Roster invitation accepted");
    Ok(Json(link))
}

/// POST /api/v1/studio/invitations/{id}/decline
pub async fn decline(
    State(state): State<AppState>,
    RequireArtist(artist): RequireArtist,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StudioArtistRepo::decline(&state.pool, id, artist.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Invitation", id))
    }
}

/// GET /api/v1/studio/studios
pub async fn my_studios(
    State(state): State<AppState>,
    RequireArtist(artist): RequireArtist,
) -> AppResult<Json<DataResponse<Vec<StudioLink>>>> {
    let links =
        StudioArtistRepo::links_for_artist(&state.pool, artist.user_id, LINK_ACCEPTED).await?;
    Ok(Json(DataResponse { data: links }))
}
