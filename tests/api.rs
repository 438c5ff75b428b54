use axum::http::StatusCode;
use serde_json::json;
use smartmeal_llm::FakeProvider;

mod common;
use common::{
    EXPLAIN, EXTRACT, create_app_without_dataset, create_default_app, create_test_app, get_json,
    post_json, post_raw,
};

#[tokio::test]
async fn test_health_is_always_ok() {
    let app = create_app_without_dataset(FakeProvider::default());

    let (status, body) = get_json(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_ready_flips_after_first_request() {
    let app = create_test_app(FakeProvider::default());

    let (status, body) = get_json(&app.router, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");

    let (status, _) = post_json(
        &app.router,
        "/recipe_details",
        json!({"recipe_query": "salad"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app.router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert!(app.recommender.is_ready());
}

#[tokio::test]
async fn test_submit_returns_anchor_similar_and_explanation() {
    let provider = FakeProvider::new()
        .with_response(EXTRACT, r#"{"max_total_minutes": 30}"#)
        .with_response(EXPLAIN, "All three are quick.");
    let app = create_test_app(provider);

    let (status, body) = post_json(
        &app.router,
        "/submit",
        json!({"user_message": "something quick", "top_n": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate_count"], 3);
    assert_eq!(body["used_relaxation"], false);
    assert_eq!(body["constraints"]["max_total_minutes"], 30.0);
    assert_eq!(body["anchor_recipe"]["title"], "Green Salad");
    assert_eq!(body["anchor_recipe"]["similarity_score"], 1.0);

    let similar = body["similar_recipes"].as_array().unwrap();
    assert_eq!(similar.len(), 2);
    for card in similar {
        assert!(card["total_time_min"].as_f64().unwrap() <= 30.0);
        assert_ne!(card["title"], "Green Salad");
    }
    assert_eq!(body["explanation"], "All three are quick.");
}

#[tokio::test]
async fn test_default_config_explains_with_template() {
    let app = create_default_app();

    let (status, body) = post_json(
        &app.router,
        "/submit",
        json!({"user_message": "healthy tomato", "top_n": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["similar_recipes"].as_array().unwrap().len(), 2);
    let explanation = body["explanation"].as_str().unwrap();
    assert_ne!(explanation, "{}");
    assert!(explanation.starts_with("Sorry"));
    assert!(explanation.contains("Green Salad"));
}

#[tokio::test]
async fn test_submit_uses_baseline_constraints() {
    let provider = FakeProvider::default().with_response(EXTRACT, "{}");
    let app = create_test_app(provider);

    let (status, body) = post_json(
        &app.router,
        "/submit",
        json!({
            "user_message": "dinner",
            "baseline_constraints": {"is_vegan": true}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["constraints"]["is_vegan"], true);
    assert_eq!(body["candidate_count"], 2);
    assert_eq!(body["anchor_recipe"]["title"], "Green Salad");
    assert_eq!(body["similar_recipes"][0]["title"], "Miso Ramen");
}

#[tokio::test]
async fn test_submit_without_matches() {
    let provider =
        FakeProvider::default().with_response(EXTRACT, r#"{"is_halal": true, "is_kosher": true}"#);
    let app = create_test_app(provider);

    let (status, body) = post_json(&app.router, "/submit", json!({"user_message": "halal"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate_count"], 0);
    assert!(body["anchor_recipe"].is_null());
    assert_eq!(body["similar_recipes"], json!([]));
    assert!(
        body["explanation"]
            .as_str()
            .unwrap()
            .starts_with("No recipes matched")
    );
}

#[tokio::test]
async fn test_submit_validation() {
    let app = create_test_app(FakeProvider::default());

    let (status, body) = post_json(&app.router, "/submit", json!({"user_message": ""})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Invalid request.");
    assert!(body["errors"]["user_message"].is_string());

    let (status, body) = post_json(
        &app.router,
        "/submit",
        json!({"user_message": "pasta", "top_n": 50}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["top_n"].is_string());

    // validation runs before the dataset is touched
    assert!(!app.recommender.is_ready());
}

#[tokio::test]
async fn test_submit_reports_missing_dataset() {
    let app = create_app_without_dataset(FakeProvider::default());

    let (status, body) = post_json(&app.router, "/submit", json!({"user_message": "pasta"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to generate recommendation"));
    assert!(detail.contains("missing.csv"));
}

#[tokio::test]
async fn test_recipe_details() {
    let app = create_test_app(FakeProvider::default());

    let (status, body) = post_json(
        &app.router,
        "/recipe_details",
        json!({"recipe_query": "lemon"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Lemon Tart");
    assert_eq!(body["id"], 4);
    assert!(body["ingredients_list"].is_array());
    assert!(body["directions_list"].is_array());

    let (status, body) = post_json(
        &app.router,
        "/recipe_details",
        json!({"recipe_query": "sushi"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Recipe not found.");

    let (status, _) = post_json(&app.router, "/recipe_details", json!({"recipe_query": ""})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bad_json_bodies_share_the_error_shape() {
    let app = create_test_app(FakeProvider::default());

    let (status, body) = post_raw(&app.router, "/submit", "{\"user_message\": ").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Invalid request.");
    assert!(body["errors"]["body"].is_string());

    let (status, body) = post_json(
        &app.router,
        "/submit",
        json!({"user_message": "pasta", "top_n": "five"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["body"].is_string());

    let (status, body) = post_json(&app.router, "/recipe_details", json!({"query": "salad"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Invalid request.");
    assert!(body["errors"]["body"].is_string());
}
