//! Integration tests for projects and creative notes.
//!
//! - Owner scoping (another user's rows look missing)
//! - Partial updates and filtering
//! - Note ordering, pinning, and transactional reorder

use box_db::models::creative_note::{CreateCreativeNote, UpdateCreativeNote};
use box_db::models::project::{CreateProject, ProjectFilter, UpdateProject};
use box_db::models::user::CreateUser;
use box_db::repositories::{CreativeNoteRepo, ProjectRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, n: u32) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: format!("user{n}@example.com"),
            display_name: format!("User {n}"),
            password_hash: Some("hash".to_string()),
            oauth_provider: None,
            role: "artist".to_string(),
            box_code: format!("BOX-TEST{n:02}"),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_project(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: None,
        status: None,
        metadata: None,
    }
}

fn new_note(content: &str) -> CreateCreativeNote {
    CreateCreativeNote {
        category: None,
        title: None,
        content: content.to_string(),
        media_urls: Vec::new(),
        is_pinned: false,
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_defaults(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let project = ProjectRepo::create(&pool, user_id, &new_project("Debut EP"))
        .await
        .unwrap();

    assert_eq!(project.status, "concept");
    assert_eq!(project.metadata, json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_scoped_to_owner(pool: PgPool) {
    let owner = seed_user(&pool, 1).await;
    let other = seed_user(&pool, 2).await;
    let project = ProjectRepo::create(&pool, owner, &new_project("Mine"))
        .await
        .unwrap();

    assert!(ProjectRepo::find_for_user(&pool, project.id, other)
        .await
        .unwrap()
        .is_none());
    let update = UpdateProject {
        title: Some("Stolen".to_string()),
        ..Default::default()
    };
    assert!(ProjectRepo::update(&pool, project.id, other, &update)
        .await
        .unwrap()
        .is_none());
    assert!(!ProjectRepo::delete(&pool, project.id, other).await.unwrap());
    assert!(ProjectRepo::delete(&pool, project.id, owner).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_partial_update_keeps_fields(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let mut input = new_project("Single");
    input.description = Some("Summer single".to_string());
    input.metadata = Some(json!({"isrc": "USRC17607839"}));
    let project = ProjectRepo::create(&pool, user_id, &input).await.unwrap();

    let update = UpdateProject {
        status: Some("review".to_string()),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, project.id, user_id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, "review");
    assert_eq!(updated.title, "Single");
    assert_eq!(updated.description.as_deref(), Some("Summer single"));
    assert_eq!(updated.metadata["isrc"], "USRC17607839");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_invalid_status_rejected_by_schema(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let project = ProjectRepo::create(&pool, user_id, &new_project("P"))
        .await
        .unwrap();
    assert!(ProjectRepo::set_status(&pool, project.id, user_id, "archived")
        .await
        .is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_filters(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    ProjectRepo::create(&pool, user_id, &new_project("Night Drive"))
        .await
        .unwrap();
    let second = ProjectRepo::create(&pool, user_id, &new_project("Morning 100%"))
        .await
        .unwrap();
    ProjectRepo::set_status(&pool, second.id, user_id, "published")
        .await
        .unwrap();

    let by_status = ProjectRepo::list_for_user(
        &pool,
        user_id,
        &ProjectFilter {
            status: Some("published".to_string()),
            q: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].id, second.id);

    let by_title = ProjectRepo::list_for_user(
        &pool,
        user_id,
        &ProjectFilter {
            status: None,
            q: Some("drive".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Night Drive");

    let literal_percent = ProjectRepo::list_for_user(
        &pool,
        user_id,
        &ProjectFilter {
            status: None,
            q: Some("100%".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(literal_percent.len(), 1);

    // Most recently updated first.
    let all = ProjectRepo::list_for_user(&pool, user_id, &ProjectFilter::default())
        .await
        .unwrap();
    assert_eq!(all[0].id, second.id);
}

// ---------------------------------------------------------------------------
// Creative notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_defaults_and_append_order(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let first = CreativeNoteRepo::create(&pool, user_id, &new_note("hook idea"))
        .await
        .unwrap();
    let second = CreativeNoteRepo::create(&pool, user_id, &new_note("verse two"))
        .await
        .unwrap();

    assert_eq!(first.category, "idea");
    assert_eq!(first.sort_order, 0);
    assert_eq!(second.sort_order, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_list_pinned_first_and_category_filter(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let a = CreativeNoteRepo::create(&pool, user_id, &new_note("a"))
        .await
        .unwrap();
    let mut lyric = new_note("b");
    lyric.category = Some("lyric".to_string());
    let b = CreativeNoteRepo::create(&pool, user_id, &lyric).await.unwrap();

    CreativeNoteRepo::toggle_pin(&pool, b.id, user_id)
        .await
        .unwrap()
        .unwrap();

    let all = CreativeNoteRepo::list_for_user(&pool, user_id, None)
        .await
        .unwrap();
    let ids: Vec<i64> = all.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);

    let lyrics = CreativeNoteRepo::list_for_user(&pool, user_id, Some("lyric"))
        .await
        .unwrap();
    assert_eq!(lyrics.len(), 1);
    assert_eq!(lyrics[0].id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_update_replaces_media_urls(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let mut input = new_note("demo");
    input.media_urls = vec!["https://example.com/a.mp3".to_string()];
    let note = CreativeNoteRepo::create(&pool, user_id, &input).await.unwrap();

    let update = UpdateCreativeNote {
        media_urls: Some(vec![
            "/files/1/abc-b.wav".to_string(),
            "https://example.com/c.mp3".to_string(),
        ]),
        ..Default::default()
    };
    let updated = CreativeNoteRepo::update(&pool, note.id, user_id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.media_urls.len(), 2);
    assert_eq!(updated.media_urls[0], "/files/1/abc-b.wav");
    assert_eq!(updated.content, "demo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_reorder(pool: PgPool) {
    let user_id = seed_user(&pool, 1).await;
    let mut ids = Vec::new();
    for content in ["one", "two", "three"] {
        ids.push(
            CreativeNoteRepo::create(&pool, user_id, &new_note(content))
                .await
                .unwrap()
                .id,
        );
    }
    ids.reverse();

    assert!(CreativeNoteRepo::reorder(&pool, user_id, &ids).await.unwrap());
    let listed: Vec<i64> = CreativeNoteRepo::list_for_user(&pool, user_id, None)
        .await
        .unwrap()
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(listed, ids);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_reorder_rejects_foreign_ids(pool: PgPool) {
    let owner = seed_user(&pool, 1).await;
    let other = seed_user(&pool, 2).await;
    let mine = CreativeNoteRepo::create(&pool, owner, &new_note("mine"))
        .await
        .unwrap();
    let theirs = CreativeNoteRepo::create(&pool, other, &new_note("theirs"))
        .await
        .unwrap();

    assert!(!CreativeNoteRepo::reorder(&pool, owner, &[theirs.id, mine.id])
        .await
        .unwrap());

    // Rolled back: the owner's note keeps its original position.
    let unchanged = CreativeNoteRepo::find_for_user(&pool, mine.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.sort_order, 0);
}
