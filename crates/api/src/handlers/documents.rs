//! Legal document templates rendered from project data.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderName;
use box_core::error::CoreError;
use box_core::legal_templates::{render_document, DocumentInput, TemplateKind, ALL_TEMPLATES};
use box_core::metadata::ProjectMetadata;
use box_core::types::DbId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::Json;
use crate::handlers::export::performer_name;
use crate::handlers::project::find_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub title: &'static str,
    /// Placeholders the client should ask the user to fill in.
    pub fields: Vec<String>,
}

/// Request body for rendering a document.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentRequest {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Printed date; defaults to today.
    pub effective_date: Option<String>,
}

/// GET /api/v1/projects/documents/templates
pub async fn list_templates(_user: AuthUser) -> Json<DataResponse<Vec<TemplateInfo>>> {
    let data = ALL_TEMPLATES
        .iter()
        .map(|t| TemplateInfo {
            name: t.name(),
            title: t.title(),
            fields: t.input_fields(),
        })
        .collect();
    Json(DataResponse { data })
}

/// POST /api/v1/projects/{id}/documents/{template}
///
/// Returns the rendered document as `text/plain`.
pub async fn render(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, template)): Path<(DbId, String)>,
    Json(input): Json<DocumentRequest>,
) -> AppResult<([(HeaderName, &'static str); 1], String)> {
    let kind: TemplateKind = template.parse().map_err(CoreError::validation)?;
    let project = find_owned(&state, id, user.user_id).await?;
    let metadata = ProjectMetadata::from_value(&project.metadata).map_err(CoreError::validation)?;

    let artist_name = match metadata.artist.clone() {
        Some(artist) => artist,
        None => performer_name(&state, user.user_id).await?,
    };
    let effective_date = input
        .effective_date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| Utc::now().format("%B %-d, %Y").to_string());

    let text = render_document(
        kind,
        &DocumentInput {
            work_title: &project.title,
            artist_name: &artist_name,
            effective_date: &effective_date,
            metadata: &metadata,
            fields: &input.fields,
        },
    );

    tracing::debug!(project_id = id, template = %kind, "Document rendered");
    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
