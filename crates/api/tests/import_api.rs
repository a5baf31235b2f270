//! HTTP-level integration tests for the harvest CSV import endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.
//! Each test gets a fresh migrated database from `#[sqlx::test]`.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use common::{
    auth_token, body_json, body_text, build_test_app, get, post_csv, post_json, seed_plant,
    seed_user,
};
use serde_json::json;
use sqlx::PgPool;

const PREVIEW_URI: &str = "/api/v1/harvests/import/preview";
const COMMIT_URI: &str = "/api/v1/harvests/import/commit";
const TEMPLATE_URI: &str = "/api/v1/harvests/import/template";

/// Count the harvest rows currently stored for any owner.
async fn harvest_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM harvests")
        .fetch_one(pool)
        .await
        .expect("count harvests")
}

// ---------------------------------------------------------------------------
// Preview: end-to-end classification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_classifies_exact_match_end_to_end(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    seed_plant(&pool, user_id, "Tomato", "🍅").await;
    let token = auth_token(user_id);

    let csv = "Plant Name,Date,Quantity (oz)\ntomato,06/15/2025,8\n";
    let response = post_csv(
        build_test_app(pool),
        PREVIEW_URI,
        Some(&token),
        "harvests.csv",
        "text/csv",
        csv,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_rows"], 1);
    assert!(data["unmatched"].as_array().unwrap().is_empty());
    assert!(data["errors"].as_array().unwrap().is_empty());

    let matched = data["matched"].as_array().unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0]["row_number"], 1);
    assert_eq!(matched[0]["plant_name"], "Tomato");
    assert_eq!(matched[0]["quantity"], 8.0);

    let harvested_at =
        DateTime::parse_from_rfc3339(matched[0]["harvested_at"].as_str().unwrap())
            .expect("harvested_at should be RFC-3339");
    assert_eq!(
        harvested_at,
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_offers_fuzzy_suggestion_for_typo(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    seed_plant(&pool, user_id, "Tomato", "🍅").await;
    let token = auth_token(user_id);

    let csv = "Plant Name,Date,Quantity (oz)\nTomatoe,6/15/2025,8\n";
    let response = post_csv(
        build_test_app(pool),
        PREVIEW_URI,
        Some(&token),
        "harvests.csv",
        "text/csv",
        csv,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let unmatched = json["data"]["unmatched"].as_array().unwrap();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0]["raw_name"], "Tomatoe");
    assert_eq!(unmatched[0]["suggestion"]["plant_name"], "Tomato");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_partitions_rows_across_buckets(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    seed_plant(&pool, user_id, "Tomato", "🍅").await;
    seed_plant(&pool, user_id, "Basil", "🌿").await;
    let token = auth_token(user_id);

    // One exact match, one typo, one unknown name, one bad date, one bad
    // quantity. Every row must land in exactly one bucket.
    let csv = "Plant Name,Date,Quantity (oz)\n\
               tomato,6/15/2025,8\n\
               Tomatoe,6/16/2025,2\n\
               Dragonfruit,6/17/2025,3\n\
               basil,2025-06-18,1\n\
               basil,6/19/2025,abc\n";
    let response = post_csv(
        build_test_app(pool),
        PREVIEW_URI,
        Some(&token),
        "harvests.csv",
        "text/csv",
        csv,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_rows"], 5);
    assert_eq!(data["matched"].as_array().unwrap().len(), 1);
    assert_eq!(data["unmatched"].as_array().unwrap().len(), 2);
    assert_eq!(data["errors"].as_array().unwrap().len(), 2);

    let errors = data["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "date");
    assert_eq!(errors[0]["row_number"], 4);
    assert_eq!(errors[1]["field"], "quantity");
    assert_eq!(errors[1]["row_number"], 5);
}

// ---------------------------------------------------------------------------
// Preview: request-fatal rejections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_rejects_non_csv_file(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    let token = auth_token(user_id);

    let response = post_csv(
        build_test_app(pool),
        PREVIEW_URI,
        Some(&token),
        "harvests.xlsx",
        "application/octet-stream",
        "not a csv",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "File must be a CSV");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_rejects_missing_column_naming_it(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    let token = auth_token(user_id);

    let csv = "Plant Name,Date\ntomato,6/15/2025\n";
    let response = post_csv(
        build_test_app(pool),
        PREVIEW_URI,
        Some(&token),
        "harvests.csv",
        "text/csv",
        csv,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(
        message.contains("Quantity (oz)"),
        "error should name the missing column, got: {message}"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_requires_authentication(pool: PgPool) {
    let response = post_csv(
        build_test_app(pool),
        PREVIEW_URI,
        None,
        "harvests.csv",
        "text/csv",
        "Plant Name,Date,Quantity (oz)\n",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_persists_resolved_rows_with_fixed_unit(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    let plant_id = seed_plant(&pool, user_id, "Tomato", "🍅").await;
    let token = auth_token(user_id);

    let response = post_json(
        build_test_app(pool.clone()),
        COMMIT_URI,
        Some(&token),
        json!({
            "rows": [
                { "plant_id": plant_id, "harvested_at": "2025-06-15T00:00:00Z", "quantity": 8 }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["imported"], 1);

    let harvests = data["harvests"].as_array().unwrap();
    assert_eq!(harvests.len(), 1);
    assert_eq!(harvests[0]["unit"], "oz");
    assert_eq!(harvests[0]["quantity"], 8.0);
    assert_eq!(harvests[0]["owner_id"], user_id);
    assert_eq!(harvests[0]["plant_id"], plant_id);

    assert_eq!(harvest_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_rejects_empty_rows_before_touching_the_store(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    let token = auth_token(user_id);

    let response = post_json(
        build_test_app(pool.clone()),
        COMMIT_URI,
        Some(&token),
        json!({ "rows": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(
        message.contains("must not be empty"),
        "error should say rows must be non-empty, got: {message}"
    );

    assert_eq!(harvest_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_is_not_idempotent_by_design(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    let plant_id = seed_plant(&pool, user_id, "Tomato", "🍅").await;
    let token = auth_token(user_id);

    let body = json!({
        "rows": [
            { "plant_id": plant_id, "harvested_at": "2025-06-15T00:00:00Z", "quantity": 8 }
        ]
    });

    for _ in 0..2 {
        let response = post_json(
            build_test_app(pool.clone()),
            COMMIT_URI,
            Some(&token),
            body.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // No dedup key: the second commit of the same resolved set creates a
    // second, distinct record.
    assert_eq!(harvest_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_requires_authentication(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        COMMIT_URI,
        None,
        json!({ "rows": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn template_downloads_the_expected_header(pool: PgPool) {
    let user_id = seed_user(&pool, "gardener@example.com").await;
    let token = auth_token(user_id);

    let response = get(build_test_app(pool), TEMPLATE_URI, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/csv"
    );
    assert!(response.headers().contains_key("content-disposition"));

    let body = body_text(response).await;
    assert_eq!(
        body.lines().next().unwrap(),
        "Plant Name,Date,Quantity (oz)"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn template_requires_authentication(pool: PgPool) {
    let response = get(build_test_app(pool), TEMPLATE_URI, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
