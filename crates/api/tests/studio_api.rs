//! HTTP-level integration tests for studio rosters and artist invitations.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, post_json, register_artist, register_studio, TestApp, TestUser,
};
use serde_json::json;
use sqlx::PgPool;

async fn invite(app: &TestApp, studio: &TestUser, code: &str) -> axum::response::Response {
    post_json(
        app.app(),
        "/api/v1/studio/roster",
        studio.cookie(),
        json!({ "box_code": code }),
    )
    .await
}

async fn first_invitation_id(app: &TestApp, artist: &TestUser) -> i64 {
    let response = get(app.app(), "/api/v1/studio/invitations", artist.cookie()).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"][0]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invite_accept_and_view_projects(pool: PgPool) {
    let app = common::build_test_app(pool);
    let studio = register_studio(app.app(), "studio@example.com").await;
    let artist = register_artist(app.app(), "artist@example.com").await;

    post_json(app.app(), "/api/v1/projects", artist.cookie(), json!({ "title": "Demo" })).await;

    // Codes are normalized before lookup.
    let code = artist.box_code.trim_start_matches("BOX-").to_lowercase();
    let response = invite(&app, &studio, &format!("  box-{code} ")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["status"], "pending");

    // Pending links do not grant access to projects.
    let projects_uri = format!("/api/v1/studio/roster/{}/projects", artist.id);
    let response = get(app.app(), &projects_uri, studio.cookie()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let link_id = first_invitation_id(&app, &artist).await;
    let response = post_json(
        app.app(),
        &format!("/api/v1/studio/invitations/{link_id}/accept"),
        artist.cookie(),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "accepted");

    let response = get(app.app(), &projects_uri, studio.cookie()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let projects = body_json(response).await["data"].clone();
    assert_eq!(projects[0]["title"], "Demo");

    let response = get(app.app(), "/api/v1/studio/roster", studio.cookie()).await;
    let roster = body_json(response).await["data"].clone();
    assert_eq!(roster[0]["artist_id"], artist.id);
    assert_eq!(roster[0]["status"], "accepted");
    assert_eq!(roster[0]["project_count"], 1);

    let response = get(app.app(), "/api/v1/studio/studios", artist.cookie()).await;
    let studios = body_json(response).await["data"].clone();
    assert_eq!(studios[0]["studio_id"], studio.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invite_error_cases(pool: PgPool) {
    let app = common::build_test_app(pool);
    let studio = register_studio(app.app(), "s1@example.com").await;
    let other_studio = register_studio(app.app(), "s2@example.com").await;
    let artist = register_artist(app.app(), "a1@example.com").await;

    assert_eq!(invite(&app, &studio, "not a code").await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(invite(&app, &studio, "BOX-ZZZZZZ").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        invite(&app, &studio, &studio.box_code).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        invite(&app, &studio, &other_studio.box_code).await.status(),
        StatusCode::BAD_REQUEST
    );

    assert_eq!(invite(&app, &studio, &artist.box_code).await.status(), StatusCode::CREATED);
    let response = invite(&app, &studio, &artist.box_code).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(body["error"], "Artist already has a pending invitation");

    let link_id = first_invitation_id(&app, &artist).await;
    post_json(
        app.app(),
        &format!("/api/v1/studio/invitations/{link_id}/accept"),
        artist.cookie(),
        json!({}),
    )
    .await;
    let response = invite(&app, &studio, &artist.box_code).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Artist is already on your roster");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decline_deletes_the_invitation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let studio = register_studio(app.app(), "s3@example.com").await;
    let artist = register_artist(app.app(), "a2@example.com").await;
    invite(&app, &studio, &artist.box_code).await;

    let link_id = first_invitation_id(&app, &artist).await;
    let uri = format!("/api/v1/studio/invitations/{link_id}/decline");
    assert_eq!(
        post_json(app.app(), &uri, artist.cookie(), json!({})).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        post_json(app.app(), &uri, artist.cookie(), json!({})).await.status(),
        StatusCode::NOT_FOUND
    );

    let response = get(app.app(), "/api/v1/studio/roster", studio.cookie()).await;
    assert_eq!(body_json(response).await["data"], json!([]));

    // The studio can invite again after a decline.
    assert_eq!(invite(&app, &studio, &artist.box_code).await.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_from_roster(pool: PgPool) {
    let app = common::build_test_app(pool);
    let studio = register_studio(app.app(), "s4@example.com").await;
    let artist = register_artist(app.app(), "a3@example.com").await;
    invite(&app, &studio, &artist.box_code).await;

    let uri = format!("/api/v1/studio/roster/{}", artist.id);
    assert_eq!(delete(app.app(), &uri, studio.cookie()).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(app.app(), &uri, studio.cookie()).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn roles_are_enforced(pool: PgPool) {
    let app = common::build_test_app(pool);
    let studio = register_studio(app.app(), "s5@example.com").await;
    let artist = register_artist(app.app(), "a4@example.com").await;

    let response = get(app.app(), "/api/v1/studio/roster", artist.cookie()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app.app(), "/api/v1/studio/invitations", studio.cookie()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app.app(), "/api/v1/studio/roster", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn artists_cannot_accept_someone_elses_invitation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let studio = register_studio(app.app(), "s6@example.com").await;
    let invited = register_artist(app.app(), "a5@example.com").await;
    let intruder = register_artist(app.app(), "a6@example.com").await;
    invite(&app, &studio, &invited.box_code).await;

    let link_id = first_invitation_id(&app, &invited).await;
    let response = post_json(
        app.app(),
        &format!("/api/v1/studio/invitations/{link_id}/accept"),
        intruder.cookie(),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
