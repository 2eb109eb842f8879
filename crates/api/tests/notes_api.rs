//! HTTP-level integration tests for creative notes: CRUD, ordering,
//! pinning, reordering, and sharing to the community.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin, body_json, create_note, delete, get, post_json, put_json, register_artist,
    ADMIN_SECRET,
};
use serde_json::json;
use sqlx::PgPool;

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_and_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "n1@example.com").await;

    let response = post_json(
        app.app(),
        "/api/v1/notes",
        user.cookie(),
        json!({ "content": "hook idea: call and response" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["category"], "idea");
    assert_eq!(json["is_pinned"], false);
    assert_eq!(json["media_urls"], json!([]));

    for body in [
        json!({ "content": "" }),
        json!({ "content": "x", "category": "grocery" }),
        json!({ "content": "x", "media_urls": ["ftp://nope"] }),
    ] {
        let response = post_json(app.app(), "/api/v1/notes", user.cookie(), body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_orders_pinned_first_then_sort_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "n2@example.com").await;

    let first = create_note(app.app(), &user, "first").await;
    let second = create_note(app.app(), &user, "second").await;
    let third = create_note(app.app(), &user, "third").await;

    let response = post_json(
        app.app(),
        &format!("/api/v1/notes/{third}/toggle-pin"),
        user.cookie(),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_pinned"], true);

    let response = get(app.app(), "/api/v1/notes", user.cookie()).await;
    assert_eq!(ids(&body_json(response).await), vec![third, first, second]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_filter(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "n3@example.com").await;

    create_note(app.app(), &user, "idea note").await;
    let response = post_json(
        app.app(),
        "/api/v1/notes",
        user.cookie(),
        json!({ "content": "verse two", "category": "lyric" }),
    )
    .await;
    let lyric = body_json(response).await["id"].as_i64().unwrap();

    let response = get(app.app(), "/api/v1/notes?category=lyric", user.cookie()).await;
    assert_eq!(ids(&body_json(response).await), vec![lyric]);

    let response = get(app.app(), "/api/v1/notes?category=nope", user.cookie()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_assigns_positions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "n4@example.com").await;

    let a = create_note(app.app(), &user, "a").await;
    let b = create_note(app.app(), &user, "b").await;
    let c = create_note(app.app(), &user, "c").await;

    let response = put_json(
        app.app(),
        "/api/v1/notes/reorder",
        user.cookie(),
        json!({ "note_ids": [c, a, b] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.app(), "/api/v1/notes", user.cookie()).await;
    assert_eq!(ids(&body_json(response).await), vec![c, a, b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_rejects_foreign_and_duplicate_ids(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_artist(app.app(), "n5@example.com").await;
    let other = register_artist(app.app(), "n6@example.com").await;

    let mine = create_note(app.app(), &owner, "mine").await;
    let theirs = create_note(app.app(), &other, "theirs").await;

    let response = put_json(
        app.app(),
        "/api/v1/notes/reorder",
        owner.cookie(),
        json!({ "note_ids": [mine, theirs] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        app.app(),
        "/api/v1/notes/reorder",
        owner.cookie(),
        json!({ "note_ids": [mine, mine] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_artist(app.app(), "n7@example.com").await;
    let other = register_artist(app.app(), "n8@example.com").await;
    let note = create_note(app.app(), &owner, "draft").await;
    let uri = format!("/api/v1/notes/{note}");

    let response = put_json(app.app(), &uri, other.cookie(), json!({ "content": "hijack" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(app.app(), &uri, other.cookie()).await.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        app.app(),
        &uri,
        owner.cookie(),
        json!({ "title": "Bridge", "media_urls": ["/files/1/abc-demo.wav"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Bridge");
    assert_eq!(json["content"], "draft");
    assert_eq!(json["media_urls"], json!(["/files/1/abc-demo.wav"]));

    assert_eq!(delete(app.app(), &uri, owner.cookie()).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app.app(), &uri, owner.cookie()).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn share_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_artist(app.app(), "n9@example.com").await;
    let note = create_note(app.app(), &user, "share me").await;
    let share_uri = format!("/api/v1/notes/{note}/share");

    let response = post_json(
        app.app(),
        &share_uri,
        user.cookie(),
        json!({ "caption": "rough idea" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let shared = body_json(response).await;
    assert_eq!(shared["status"], "pending");
    assert_eq!(shared["caption"], "rough idea");
    let shared_id = shared["id"].as_i64().unwrap();

    // Already pending.
    let response = post_json(app.app(), &share_uri, user.cookie(), json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = admin(
        app.app(),
        Method::POST,
        &format!("/api/v1/admin/submissions/{shared_id}/reject"),
        Some(ADMIN_SECRET),
        Some(json!({ "reason": "needs more detail" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Rejected submissions can be resubmitted.
    let response = post_json(
        app.app(),
        &share_uri,
        user.cookie(),
        json!({ "caption": "more detail now" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], shared_id);
    assert_eq!(json["status"], "pending");
    assert_eq!(json["caption"], "more detail now");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cannot_share_someone_elses_note(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_artist(app.app(), "n10@example.com").await;
    let other = register_artist(app.app(), "n11@example.com").await;
    let note = create_note(app.app(), &owner, "private").await;

    let response = post_json(
        app.app(),
        &format!("/api/v1/notes/{note}/share"),
        other.cookie(),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
