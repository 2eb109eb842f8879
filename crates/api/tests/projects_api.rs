//! HTTP-level integration tests for projects, royalty CSV exports, and
//! legal document rendering.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_json, body_text, delete, get, post_json, put_json, register_artist, TestUser};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_project(app: axum::Router, user: &TestUser, body: Value) -> Value {
    let response = post_json(app, "/api/v1/projects", user.cookie(), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn single_metadata() -> Value {
    json!({
        "isrc": "USRC17607839",
        "iswc": "T-034.524.680-1",
        "album": "Night Drive",
        "writers": [
            { "name": "Ada Lovelace", "ipi": "00123456789", "pro": "BMI", "share": 60.0 },
            { "name": "Alan Turing", "pro": "ASCAP", "share": 40.0 }
        ],
        "publishers": []
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "p1@example.com").await;

    let json = create_project(app.app(), &user, json!({ "title": "  First Song  " })).await;
    assert_eq!(json["title"], "First Song");
    assert_eq!(json["status"], "concept");
    assert_eq!(json["metadata"], json!({}));
    assert_eq!(json["user_id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_bad_input(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "p2@example.com").await;

    for body in [
        json!({ "title": "   " }),
        json!({ "title": "Song", "status": "shipped" }),
        json!({ "title": "Song", "metadata": [1, 2, 3] }),
    ] {
        let response = post_json(app.app(), "/api/v1/projects", user.cookie(), body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn projects_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_artist(app.app(), "owner@example.com").await;
    let other = register_artist(app.app(), "other@example.com").await;

    let project = create_project(app.app(), &owner, json!({ "title": "Private" })).await;
    let uri = format!("/api/v1/projects/{}", project["id"]);

    assert_eq!(get(app.app(), &uri, other.cookie()).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        put_json(app.app(), &uri, other.cookie(), json!({ "title": "Mine now" }))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(delete(app.app(), &uri, other.cookie()).await.status(), StatusCode::NOT_FOUND);

    let response = get(app.app(), "/api/v1/projects", other.cookie()).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_is_partial(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "p3@example.com").await;
    let project = create_project(
        app.app(),
        &user,
        json!({ "title": "Draft", "description": "keep me" }),
    )
    .await;
    let uri = format!("/api/v1/projects/{}", project["id"]);

    let response = put_json(app.app(), &uri, user.cookie(), json!({ "title": "Final" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Final");
    assert_eq!(json["description"], "keep me");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_status_and_filter(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "p4@example.com").await;
    let a = create_project(app.app(), &user, json!({ "title": "Alpha Song" })).await;
    create_project(app.app(), &user, json!({ "title": "Beta Song" })).await;

    let response = put_json(
        app.app(),
        &format!("/api/v1/projects/{}/status", a["id"]),
        user.cookie(),
        json!({ "status": "published" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "published");

    let response = get(app.app(), "/api/v1/projects?status=published", user.cookie()).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["title"], "Alpha Song");

    let response = get(app.app(), "/api/v1/projects?q=beta", user.cookie()).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["title"], "Beta Song");

    let response = get(app.app(), "/api/v1/projects?status=bogus", user.cookie()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "p5@example.com").await;
    let project = create_project(app.app(), &user, json!({ "title": "Temp" })).await;
    let uri = format!("/api/v1/projects/{}", project["id"]);

    assert_eq!(delete(app.app(), &uri, user.cookie()).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app.app(), &uri, user.cookie()).await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_formats_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "fmt@example.com").await;

    let response = get(app.app(), "/api/v1/projects/export/formats", user.cookie()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["bmi", "ascap", "mlc", "soundexchange"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_single_project_as_bmi_csv(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "bmi@example.com").await;
    let project = create_project(
        app.app(),
        &user,
        json!({ "title": "Night Drive", "metadata": single_metadata() }),
    )
    .await;

    let response = get(
        app.app(),
        &format!("/api/v1/projects/{}/export/bmi", project["id"]),
        user.cookie(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("bmi.csv"));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("Work Title,ISWC,Writer Name"));
    // One row per writer.
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Ada Lovelace"));
    assert!(lines[2].contains("Alan Turing"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_all_covers_every_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "all@example.com").await;
    create_project(app.app(), &user, json!({ "title": "One", "metadata": { "isrc": "USAAA0000001" } })).await;
    create_project(app.app(), &user, json!({ "title": "Two", "metadata": { "isrc": "USAAA0000002" } })).await;

    let response = get(app.app(), "/api/v1/projects/export/soundexchange", user.cookie()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let csv = body_text(response).await;
    assert!(csv.starts_with("ISRC,Track Title"));
    assert!(csv.contains("USAAA0000001"));
    assert!(csv.contains("USAAA0000002"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_rejects_unknown_format_and_bad_shares(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "bad@example.com").await;
    let project = create_project(
        app.app(),
        &user,
        json!({
            "title": "Overbooked",
            "metadata": { "writers": [{ "name": "A", "share": 80.0 }, { "name": "B", "share": 80.0 }] }
        }),
    )
    .await;

    let response = get(
        app.app(),
        &format!("/api/v1/projects/{}/export/prs", project["id"]),
        user.cookie(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        app.app(),
        &format!("/api/v1/projects/{}/export/bmi", project["id"]),
        user.cookie(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn document_templates_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "tpl@example.com").await;

    let response = get(app.app(), "/api/v1/projects/documents/templates", user.cookie()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    let names: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"split_sheet"));
    assert!(names.contains(&"work_for_hire"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn render_split_sheet(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "doc@example.com").await;
    let project = create_project(
        app.app(),
        &user,
        json!({ "title": "Night Drive", "metadata": single_metadata() }),
    )
    .await;

    let response = post_json(
        app.app(),
        &format!("/api/v1/projects/{}/documents/split_sheet", project["id"]),
        user.cookie(),
        json!({ "fields": {}, "effective_date": "March 1, 2026" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));

    let text = body_text(response).await;
    assert!(text.contains("Song title: Night Drive"));
    assert!(text.contains("Date: March 1, 2026"));
    assert!(text.contains("Ada Lovelace"));
    assert!(!text.contains("{{"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn render_unknown_template_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "doc2@example.com").await;
    let project = create_project(app.app(), &user, json!({ "title": "X" })).await;

    let response = post_json(
        app.app(),
        &format!("/api/v1/projects/{}/documents/napkin", project["id"]),
        user.cookie(),
        json!({ "fields": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
