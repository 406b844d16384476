//! Integration tests for global styles documents and their revisions.
//!
//! Exercises `GlobalStylesRepo` and `GlobalStylesRevisionRepo` against a
//! real database:
//! - Updating a document records a revision with the split sections
//! - Revisions list newest first, windowed by LIMIT/OFFSET
//! - Lookups are scoped to the parent document
//! - Deleting the parent cascades to its revisions

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;
use trellis_db::models::global_styles::{
    CreateGlobalStyles, CreateGlobalStylesRevision, UpdateGlobalStyles,
};
use trellis_db::repositories::{GlobalStylesRepo, GlobalStylesRevisionRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_document(pool: &PgPool, theme: &str) -> i64 {
    GlobalStylesRepo::create(
        pool,
        &CreateGlobalStyles {
            theme: theme.to_string(),
            content: json!({"version": 2, "isGlobalStylesUserThemeJSON": true}),
            author_id: 1,
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_revision_at(pool: &PgPool, parent: i64, minutes: i64) -> i64 {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
    GlobalStylesRevisionRepo::create(
        pool,
        &CreateGlobalStylesRevision {
            global_styles_id: parent,
            author_id: 1,
            styles: json!({"color": {"background": format!("#{minutes:06}")}}),
            settings: json!({}),
            created_at: Some(created),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_records_revision(pool: PgPool) {
    let parent = new_document(&pool, "tt1-blocks").await;

    let updated = GlobalStylesRepo::update(
        &pool,
        parent,
        &UpdateGlobalStyles {
            content: json!({
                "version": 2,
                "styles": {"color": {"background": "hotpink"}},
                "settings": {"color": {"custom": false}},
            }),
            author_id: 7,
        },
    )
    .await
    .unwrap()
    .expect("document exists");
    assert_eq!(updated.content["styles"]["color"]["background"], "hotpink");

    assert_eq!(GlobalStylesRevisionRepo::count_for_parent(&pool, parent).await.unwrap(), 1);
    let revisions = GlobalStylesRevisionRepo::list_for_parent(&pool, parent, None, 0)
        .await
        .unwrap();
    assert_eq!(revisions[0].author_id, 7);
    assert_eq!(revisions[0].styles, json!({"color": {"background": "hotpink"}}));
    assert_eq!(revisions[0].settings, json!({"color": {"custom": false}}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_document_returns_none(pool: PgPool) {
    let result = GlobalStylesRepo::update(
        &pool,
        999_999,
        &UpdateGlobalStyles {
            content: json!({}),
            author_id: 1,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revisions_list_newest_first(pool: PgPool) {
    let parent = new_document(&pool, "tt1-blocks").await;
    let oldest = new_revision_at(&pool, parent, 0).await;
    let newest = new_revision_at(&pool, parent, 20).await;
    let middle = new_revision_at(&pool, parent, 10).await;

    let ids: Vec<i64> = GlobalStylesRevisionRepo::list_for_parent(&pool, parent, None, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![newest, middle, oldest]);

    let window: Vec<i64> = GlobalStylesRevisionRepo::list_for_parent(&pool, parent, Some(1), 1)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(window, vec![middle]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_instant_orders_by_id_desc(pool: PgPool) {
    let parent = new_document(&pool, "tt1-blocks").await;
    let first = new_revision_at(&pool, parent, 5).await;
    let second = new_revision_at(&pool, parent, 5).await;

    let ids: Vec<i64> = GlobalStylesRevisionRepo::list_for_parent(&pool, parent, None, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_is_scoped_to_parent(pool: PgPool) {
    let parent = new_document(&pool, "tt1-blocks").await;
    let other = new_document(&pool, "twentytwentytwo").await;
    let revision = new_revision_at(&pool, parent, 0).await;

    assert!(GlobalStylesRevisionRepo::find_for_parent(&pool, parent, revision)
        .await
        .unwrap()
        .is_some());
    assert!(GlobalStylesRevisionRepo::find_for_parent(&pool, other, revision)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_document_per_theme(pool: PgPool) {
    new_document(&pool, "tt1-blocks").await;
    let duplicate = GlobalStylesRepo::create(
        &pool,
        &CreateGlobalStyles {
            theme: "tt1-blocks".to_string(),
            content: json!({}),
            author_id: 1,
        },
    )
    .await;
    assert!(duplicate.is_err(), "uq_global_styles_theme should reject a second document");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_revisions(pool: PgPool) {
    let parent = new_document(&pool, "tt1-blocks").await;
    new_revision_at(&pool, parent, 0).await;

    assert!(GlobalStylesRepo::delete(&pool, parent).await.unwrap());
    assert_eq!(GlobalStylesRevisionRepo::count_for_parent(&pool, parent).await.unwrap(), 0);
}
