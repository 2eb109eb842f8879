//! Royalty-registration CSV exports.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderName;
use box_core::error::CoreError;
use box_core::metadata::ProjectMetadata;
use box_core::royalty_export::{build_export, ExportFormat, ExportRecord, ALL_FORMATS};
use box_core::types::DbId;
use box_core::upload::sanitize_filename;
use box_db::models::project::Project;
use box_db::repositories::{ProjectRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::handlers::project::find_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

type CsvResponse = ([(HeaderName, String); 2], String);

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: &'static [&'static str],
}

/// GET /api/v1/projects/export/formats
pub async fn list_formats(_user: AuthUser) -> Json<DataResponse<Vec<FormatInfo>>> {
    let data = ALL_FORMATS
        .iter()
        .map(|f| FormatInfo {
            name: f.name(),
            description: f.description(),
            columns: f.headers(),
        })
        .collect();
    Json(DataResponse { data })
}

/// GET /api/v1/projects/{id}/export/{format}
pub async fn export_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, format)): Path<(DbId, String)>,
) -> AppResult<CsvResponse> {
    let format: ExportFormat = format.parse().map_err(CoreError::validation)?;
    let project = find_owned(&state, id, user.user_id).await?;
    let performer = performer_name(&state, user.user_id).await?;

    let records = vec![to_record(&project, &performer)?];
    let filename = format!("{}-{}.csv", sanitize_filename(&project.title), format.name());
    render_csv(format, &records, &filename)
}

/// GET /api/v1/projects/export/{format}
///
/// Every project the caller owns, oldest first.
pub async fn export_all(
    State(state): State<AppState>,
    user: AuthUser,
    Path(format): Path<String>,
) -> AppResult<CsvResponse> {
    let format: ExportFormat = format.parse().map_err(CoreError::validation)?;
    let projects = ProjectRepo::list_for_export(&state.pool, user.user_id).await?;
    let performer = performer_name(&state, user.user_id).await?;

    let records = projects
        .iter()
        .map(|p| to_record(p, &performer))
        .collect::<AppResult<Vec<_>>>()?;

    tracing::info!(user_id = user.user_id, format = %format, count = records.len(), "Catalog exported");
    render_csv(format, &records, &format!("box-{}-export.csv", format.name()))
}

fn to_record(project: &Project, performer: &str) -> AppResult<ExportRecord> {
    let metadata = ProjectMetadata::from_value(&project.metadata)
        .map_err(|e| CoreError::Validation(format!("{}: {e}", project.title)))?;
    Ok(ExportRecord {
        title: project.title.clone(),
        performer: performer.to_string(),
        metadata,
    })
}

pub(crate) async fn performer_name(state: &AppState, user_id: DbId) -> AppResult<String> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;
    Ok(user.display_name)
}

fn render_csv(format: ExportFormat, records: &[ExportRecord], filename: &str) -> AppResult<CsvResponse> {
    let sheet = build_export(format, records).map_err(CoreError::validation)?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        sheet.to_csv(),
    ))
}
