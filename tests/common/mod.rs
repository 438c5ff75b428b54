#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use smartmeal::{AppState, config::Config, router};
use smartmeal_llm::{FakeProvider, TextGenerator};
use smartmeal_recommend::Recommender;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const EXTRACT: &str = "constraints extractor";
pub const EXPLAIN: &str = "explaining recipe recommendations";

pub const DATASET: &str = "\
recipe_title,description,ingredients,directions,category,tastes,cuisine_list,cook_speed,difficulty,num_ingredients,est_prep_time_min,est_cook_time_min,healthiness_score,is_vegan
Spicy Ramen,Hot noodle soup,\"['noodles','chili','egg']\",\"['Boil noodles','Add chili']\",Soup,\"['spicy','umami']\",\"['japanese']\",fast,easy,3,5,10,55,0
Miso Ramen,Comforting noodle soup,\"['noodles','miso','tofu']\",\"['Boil noodles','Stir in miso']\",Soup,\"['umami']\",\"['japanese']\",fast,easy,3,5,12,60,1
Green Salad,Crisp leaves,\"['lettuce','cucumber','lemon']\",\"['Chop','Toss']\",Salad,\"['sour']\",\"['mediterranean']\",fast,easy,3,10,0,95,1
Chocolate Cake,Rich dessert,\"['flour','cocoa','sugar','butter','eggs']\",\"['Mix','Bake']\",Dessert,\"['sweet']\",\"['french']\",slow,hard,5,30,45,15,0
Lemon Tart,Bright dessert,\"['flour','lemon','sugar','butter']\",\"['Blind bake','Fill']\",Dessert,\"['sweet','sour']\",\"['french']\",slow,medium,4,25,35,25,0
";

pub struct TestApp {
    pub router: Router,
    pub recommender: Arc<Recommender>,
    // keeps the dataset on disk for the lifetime of the app
    _dir: TempDir,
}

/// Config pointing at a temporary copy of [`DATASET`].
fn dataset_config() -> (Config, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.child("recipes_extended.csv");
    std::fs::write(&path, DATASET).unwrap();

    let mut config = Config::default();
    config.catalog.path = Some(path);
    config.catalog.search_paths = Vec::new();

    (config, dir)
}

/// App over a temporary copy of [`DATASET`] answering with `provider`.
pub fn create_test_app(provider: FakeProvider) -> TestApp {
    let (config, dir) = dataset_config();
    app_with_config(config, provider, dir)
}

/// App wired from the default config, provider included.
pub fn create_default_app() -> TestApp {
    let (config, dir) = dataset_config();
    let recommender = smartmeal::build_recommender(&config).unwrap();
    app_with_recommender(config, recommender, dir)
}

/// App whose dataset path points at nothing.
pub fn create_app_without_dataset(provider: FakeProvider) -> TestApp {
    let dir = TempDir::new().unwrap();

    let mut config = Config::default();
    config.catalog.path = Some(dir.child("missing.csv"));
    config.catalog.search_paths = Vec::new();

    app_with_config(config, provider, dir)
}

fn app_with_config(config: Config, provider: FakeProvider, dir: TempDir) -> TestApp {
    let generator: Arc<dyn TextGenerator> = Arc::new(provider);
    let recommender = Arc::new(Recommender::new(
        config.catalog.loader(),
        generator,
        config.recommender_options(),
    ));

    app_with_recommender(config, recommender, dir)
}

fn app_with_recommender(config: Config, recommender: Arc<Recommender>, dir: TempDir) -> TestApp {
    let router = router(AppState {
        config,
        recommender: recommender.clone(),
    });

    TestApp {
        router,
        recommender,
        _dir: dir,
    }
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

pub async fn post_raw(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
