//! End-to-end tests for the page routes.
//!
//! Each test builds the router over its own seeded in-memory store and drives
//! it with `oneshot`, so no socket is bound.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use configuration::{Config, DatabaseSettings};
use database::{DbError, DbRepository, SqlitePool, seed_data};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt; // for oneshot
use web_server::{AppState, create_router, run_server};

async fn seeded_pool() -> SqlitePool {
    let pool = database::connect(&DatabaseSettings::in_memory())
        .await
        .expect("in-memory store");
    database::initialize(&pool).await.expect("seed");
    pool
}

fn app(pool: &SqlitePool) -> Router {
    create_router(AppState::new(DbRepository::new(pool.clone())))
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: Router, uri: &str, body: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

#[tokio::test]
async fn health_check() {
    let pool = seeded_pool().await;
    let response = get(app(&pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn home_is_static() {
    let pool = seeded_pool().await;
    let response = get(app(&pool), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert!(body["title"].is_string());
    assert_eq!(body["links"][0]["href"], "/treatments");
}

#[tokio::test]
async fn lists_all_treatments() {
    let pool = seeded_pool().await;
    let body = json_response(get(app(&pool), "/treatments").await).await;

    let treatments = body["treatments"].as_array().unwrap();
    assert_eq!(treatments.len(), 3);
    for (treatment, (name, brief)) in treatments.iter().zip(seed_data::TREATMENTS) {
        assert_eq!(treatment["name"], name);
        assert_eq!(treatment["brief_description"], brief);
    }
}

#[tokio::test]
async fn detail_includes_brief_description_verbatim() {
    let pool = seeded_pool().await;
    let response = get(app(&pool), "/treatments/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(seed_data::TREATMENTS[0].1));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["attributes"].as_array().unwrap().len(), 5);
    assert_eq!(body["details_by_attr"].as_object().unwrap().len(), 5);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["choices"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn unknown_treatment_is_not_found() {
    let pool = seeded_pool().await;
    for uri in ["/treatments/0", "/treatments/4", "/treatments/999"] {
        let response = get(app(&pool), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let response = post_form(app(&pool), uri, "question_1=5").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn malformed_treatment_id_is_not_found() {
    let pool = seeded_pool().await;
    for uri in ["/treatments/abc", "/treatments/99999999999999999999", "/treatments/1.5"] {
        let response = get(app(&pool), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = json_response(response).await;
        assert!(body["error"].is_string(), "{uri}");

        let response = post_form(app(&pool), uri, "question_1=5").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = json_response(response).await;
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn detail_tolerates_a_missing_attribute_row() {
    let pool = seeded_pool().await;
    sqlx::query("DELETE FROM treatment_details WHERE treatment_id = 1 AND attribute_id = 3")
        .execute(&pool)
        .await
        .unwrap();

    let response = get(app(&pool), "/treatments/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert!(body["details_by_attr"]["3"].is_null());
    assert!(body["details_by_attr"]["2"].is_object());
}

#[tokio::test]
async fn all_fives_average_to_five() {
    let pool = seeded_pool().await;
    let response = post_form(
        app(&pool),
        "/treatments/1",
        "question_1=5&question_2=5&question_3=5&ask_list=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert_eq!(body["avg_score"].as_f64(), Some(5.0));
    assert_eq!(body["answered"], 3);
    assert_eq!(body["ask_list"], "");
    assert_eq!(body["treatment"]["id"], 1);
}

#[tokio::test]
async fn mixed_scores_average_and_ask_list_passes_through() {
    let pool = seeded_pool().await;
    // Treatment 2 owns questions 4..=6.
    let response = post_form(
        app(&pool),
        "/treatments/2",
        "question_4=5&question_5=4&question_6=3&ask_list=%E8%B2%BB%E7%94%A8%E3%81%AF%EF%BC%9F",
    )
    .await;
    let body = json_response(response).await;
    assert_eq!(body["avg_score"].as_f64(), Some(4.0));
    assert_eq!(body["ask_list"], "費用は？");
}

#[tokio::test]
async fn empty_submission_has_no_average() {
    let pool = seeded_pool().await;
    let response = post_form(app(&pool), "/treatments/3", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert!(body["avg_score"].is_null());
    assert_eq!(body["answered"], 0);
    assert!(body["ask_list"].is_null());
}

#[tokio::test]
async fn malformed_answers_are_skipped() {
    let pool = seeded_pool().await;
    let response = post_form(
        app(&pool),
        "/treatments/1",
        "question_1=abc&question_2=7&question_3=2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert_eq!(body["avg_score"].as_f64(), Some(2.0));
    assert_eq!(body["answered"], 1);
}

#[tokio::test]
async fn answers_to_another_treatments_questions_are_ignored() {
    let pool = seeded_pool().await;
    let response = post_form(app(&pool), "/treatments/1", "question_4=5&question_7=5").await;
    let body = json_response(response).await;
    assert!(body["avg_score"].is_null());
}

#[tokio::test]
async fn compare_covers_every_stored_pair() {
    let pool = seeded_pool().await;
    sqlx::query("DELETE FROM treatment_details WHERE treatment_id = 3 AND attribute_id = 5")
        .execute(&pool)
        .await
        .unwrap();

    let response = get(app(&pool), "/compare").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;

    assert_eq!(body["treatments"].as_array().unwrap().len(), 3);
    assert_eq!(body["attributes"].as_array().unwrap().len(), 5);

    let map = &body["detail_map"];
    for treatment_id in 1..=3 {
        for attribute_id in 1..=5 {
            let cell = &map[treatment_id.to_string()][attribute_id.to_string()];
            if (treatment_id, attribute_id) == (3, 5) {
                assert!(cell.is_null());
            } else {
                assert_eq!(cell["treatment_id"], treatment_id);
                assert_eq!(cell["attribute_id"], attribute_id);
            }
        }
    }
    assert_eq!(map["3"].as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn failed_seed_stops_the_server_before_it_listens() {
    let dir = tempfile::tempdir().unwrap();
    let settings = DatabaseSettings {
        url: format!("sqlite://{}", dir.path().join("sdm.db").display()),
        max_connections: 2,
    };

    // Leave the store empty but make the last seeding step fail.
    let pool = database::connect(&settings).await.unwrap();
    database::initialize(&pool).await.unwrap();
    for table in [
        "understanding_choices",
        "understanding_questions",
        "treatment_details",
        "attributes",
        "treatment_options",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query(
        r#"
        CREATE TRIGGER reject_choices BEFORE INSERT ON understanding_choices
        BEGIN
            SELECT RAISE(ABORT, 'choices are read-only');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let mut config = Config::default();
    config.server.port = 0;
    config.database = settings;

    // A server that started listening would never return on its own.
    let result = tokio::time::timeout(Duration::from_secs(10), run_server(&config))
        .await
        .expect("run_server kept running after a failed seed");
    let error = result.expect_err("run_server must fail when seeding fails");
    assert!(matches!(
        error.downcast_ref::<DbError>(),
        Some(DbError::SeedFailed { .. })
    ));
}
