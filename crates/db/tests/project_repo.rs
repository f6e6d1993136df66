//! Integration tests for `ProjectRepo` against a real database.

use chrono::{TimeZone, Utc};
use devboard_core::project::ProjectStatus;
use devboard_db::models::project::ProjectInput;
use devboard_db::repositories::ProjectRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str, client: &str) -> ProjectInput {
    ProjectInput {
        name: name.to_string(),
        client: client.to_string(),
        status: ProjectStatus::Draft,
        description: String::new(),
        delivery_at: None,
    }
}

async fn setup(pool: &PgPool) {
    devboard_db::ensure_schema(pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_then_find_round_trip(pool: PgPool) {
    setup(&pool).await;

    let delivery = Utc.with_ymd_and_hms(2026, 11, 30, 17, 0, 0).unwrap();
    let input = ProjectInput {
        description: "Full rebuild of the marketing site".to_string(),
        delivery_at: Some(delivery),
        ..new_project("Site Redesign", "Acme Co")
    };

    let created = ProjectRepo::create(&pool, &input).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let found = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("created project should be found");

    assert_eq!(found, created);
    assert_eq!(found.name, "Site Redesign");
    assert_eq!(found.client, "Acme Co");
    assert_eq!(found.status, ProjectStatus::Draft);
    assert_eq!(found.description, "Full rebuild of the marketing site");
    assert_eq!(found.delivery_at, Some(delivery));
}

#[sqlx::test]
async fn test_find_missing_returns_none(pool: PgPool) {
    setup(&pool).await;
    let found = ProjectRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test]
async fn test_list_empty_table(pool: PgPool) {
    setup(&pool).await;
    let projects = ProjectRepo::list(&pool).await.unwrap();
    assert!(projects.is_empty());
}

#[sqlx::test]
async fn test_list_newest_first_and_stable(pool: PgPool) {
    setup(&pool).await;

    let first = ProjectRepo::create(&pool, &new_project("P1", "C"))
        .await
        .unwrap();
    let second = ProjectRepo::create(&pool, &new_project("P2", "C"))
        .await
        .unwrap();
    let third = ProjectRepo::create(&pool, &new_project("P3", "C"))
        .await
        .unwrap();

    let listed = ProjectRepo::list(&pool).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, [third.id, second.id, first.id]);

    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let again = ProjectRepo::list(&pool).await.unwrap();
    assert_eq!(listed, again);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_update_overwrites_all_fields(pool: PgPool) {
    setup(&pool).await;

    let created = ProjectRepo::create(
        &pool,
        &ProjectInput {
            description: "old".to_string(),
            delivery_at: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            ..new_project("Original", "Old Client")
        },
    )
    .await
    .unwrap();

    let replacement = ProjectInput {
        status: ProjectStatus::InProgress,
        ..new_project("Renamed", "New Client")
    };
    let updated = ProjectRepo::update(&pool, created.id, &replacement)
        .await
        .unwrap()
        .expect("row should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.client, "New Client");
    assert_eq!(updated.status, ProjectStatus::InProgress);
    assert_eq!(updated.description, "");
    assert_eq!(updated.delivery_at, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test]
async fn test_update_timestamp_strictly_increases(pool: PgPool) {
    setup(&pool).await;

    let created = ProjectRepo::create(&pool, &new_project("P", "C"))
        .await
        .unwrap();

    let mut previous = created.updated_at;
    for _ in 0..5 {
        let updated = ProjectRepo::update(&pool, created.id, &new_project("P", "C"))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.updated_at > previous);
        assert_eq!(updated.created_at, created.created_at);
        previous = updated.updated_at;
    }
}

#[sqlx::test]
async fn test_update_missing_returns_none(pool: PgPool) {
    setup(&pool).await;
    let result = ProjectRepo::update(&pool, 999_999, &new_project("P", "C"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn test_concurrent_updates_last_write_wins(pool: PgPool) {
    setup(&pool).await;

    let created = ProjectRepo::create(&pool, &new_project("P", "C"))
        .await
        .unwrap();

    let a = ProjectInput {
        status: ProjectStatus::Delivered,
        ..new_project("Writer A", "Client A")
    };
    let b = ProjectInput {
        status: ProjectStatus::Archived,
        ..new_project("Writer B", "Client B")
    };

    let (ra, rb) = tokio::join!(
        ProjectRepo::update(&pool, created.id, &a),
        ProjectRepo::update(&pool, created.id, &b),
    );
    let ra = ra.unwrap().unwrap();
    let rb = rb.unwrap().unwrap();

    // Whichever statement committed last owns the whole row; fields never mix.
    let winner = if ra.updated_at > rb.updated_at { &a } else { &b };
    let stored = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, winner.name);
    assert_eq!(stored.client, winner.client);
    assert_eq!(stored.status, winner.status);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_delete_is_final(pool: PgPool) {
    setup(&pool).await;

    let created = ProjectRepo::create(&pool, &new_project("Delete Me", "C"))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());

    // Second delete of the same id matches zero rows.
    assert!(!ProjectRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test]
async fn test_delete_missing_returns_false(pool: PgPool) {
    setup(&pool).await;
    assert!(!ProjectRepo::delete(&pool, 999_999).await.unwrap());
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_unknown_stored_status_fails_to_decode(pool: PgPool) {
    setup(&pool).await;

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO projects (name, client, status) VALUES ('a', 'b', 'bogus') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(ProjectRepo::find_by_id(&pool, id).await.is_err());
}
