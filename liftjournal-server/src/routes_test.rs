//! Integration tests for the HTTP routes.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use liftjournal::{Journal, Store};

use crate::{AppState, create_router};

/// Create a test app with an in-memory database
fn test_app() -> Router {
    let journal = Journal::new(Store::in_memory().unwrap());
    create_router(AppState::new(journal))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn start_workout(app: &Router) -> i64 {
    let response = app.clone().oneshot(post_form("/new_workout", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["workout"]["id"].as_i64().unwrap()
}

async fn add_exercise(app: &Router, workout_id: i64, name: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/new_exercise?workout_id={}", workout_id),
            &format!("exercise_name={}", name),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["exercise"]["id"].as_i64().unwrap()
}

async fn add_set(app: &Router, workout_id: i64, exercise_id: i64, weight: i32, reps: i32) -> Value {
    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/new_set?workout_id={}&exercise_id={}", workout_id, exercise_id),
            &format!("reps={}&weight={}", reps, weight),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_initially_empty() {
    let app = test_app();

    for uri in ["/home", "/myworkouts"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["workouts"].as_array().unwrap().len(), 0);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn new_workout_offers_the_catalog() {
    let app = test_app();

    let response = app.clone().oneshot(post_form("/new_workout", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["workout"]["exercises"].as_array().unwrap().len(), 0);
    assert_eq!(
        body["exercise_names"],
        serde_json::json!(["Squat", "Deadlift", "Bench"])
    );

    let response = app.oneshot(get("/myworkouts")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["workouts"][0]["id"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn full_session_renders_the_graph() {
    let app = test_app();
    let workout_id = start_workout(&app).await;

    let squat = add_exercise(&app, workout_id, "Squat").await;
    for weight in [135, 185, 225] {
        add_set(&app, workout_id, squat, weight, 5).await;
    }
    let bench = add_exercise(&app, workout_id, "Bench").await;
    add_set(&app, workout_id, bench, 135, 5).await;
    let body = add_set(&app, workout_id, bench, 185, 5).await;
    assert_eq!(body["exercise"]["name"], "Bench");
    assert_eq!(body["exercise"]["sets"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(get(&format!("/workout/{}", workout_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let workout = json_body(response).await;
    let counts: Vec<usize> = workout["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["sets"].as_array().unwrap().len())
        .collect();
    assert_eq!(counts, vec![3, 2]);

    let response = app
        .clone()
        .oneshot(post_form(&format!("/workout?workout_id={}", workout_id), ""))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, workout);

    let response = app.oneshot(get("/exercises/Squat/sets")).await.unwrap();
    let body = json_body(response).await;
    let weights: Vec<i64> = body["sets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["weight"].as_i64().unwrap())
        .collect();
    assert_eq!(weights, vec![135, 185, 225]);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_exercise_name_reprompts() {
    let app = test_app();
    let workout_id = start_workout(&app).await;

    let response = app
        .oneshot(post_form(
            &format!("/new_exercise?workout_id={}", workout_id),
            "exercise_name=",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["workout_id"], workout_id);
    assert_eq!(body["exercise_names"].as_array().unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_exercise_name_is_unprocessable() {
    let app = test_app();
    let workout_id = start_workout(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/new_exercise?workout_id={}", workout_id),
            "exercise_name=Curl",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Curl"));
    assert_eq!(body["exercise_names"][0], "Squat");

    let response = app
        .oneshot(get(&format!("/workout/{}", workout_id)))
        .await
        .unwrap();
    let workout = json_body(response).await;
    assert!(workout["exercises"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn negative_set_values_are_unprocessable() {
    let app = test_app();
    let workout_id = start_workout(&app).await;
    let squat = add_exercise(&app, workout_id, "Squat").await;

    let response = app
        .oneshot(post_form(
            &format!("/new_set?workout_id={}&exercise_id={}", workout_id, squat),
            "reps=-1&weight=135",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("reps"));
    assert!(body.get("exercise_names").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn set_through_the_wrong_workout_is_not_found() {
    let app = test_app();
    let first = start_workout(&app).await;
    let second = start_workout(&app).await;
    let squat = add_exercise(&app, first, "Squat").await;

    let response = app
        .oneshot(post_form(
            &format!("/new_set?workout_id={}&exercise_id={}", second, squat),
            "reps=5&weight=135",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_workout_is_not_found() {
    let app = test_app();

    let response = app.clone().oneshot(get("/workout/7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "workout 7 not found");

    let response = app
        .oneshot(post_form("/new_exercise?workout_id=7", "exercise_name=Squat"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_confirms_then_cascades() {
    let app = test_app();
    let workout_id = start_workout(&app).await;
    let squat = add_exercise(&app, workout_id, "Squat").await;
    add_set(&app, workout_id, squat, 135, 5).await;
    add_set(&app, workout_id, squat, 185, 5).await;

    let uri = format!("/workout/{}/delete", workout_id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["exercises"], 1);
    assert_eq!(body["sets"], 2);

    let response = app.clone().oneshot(post_form(&uri, "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["workouts"], 1);
    assert_eq!(body["exercises"], 1);
    assert_eq!(body["sets"], 2);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.oneshot(get("/exercises/Squat/sets")).await.unwrap();
    assert!(json_body(response).await["sets"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_redirects_to_the_new_workout() {
    let app = test_app();

    let response = app.oneshot(post_form("/workouts/create", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/workout/1");
}

#[tokio::test(flavor = "multi_thread")]
async fn load_workout_returns_list_and_selection() {
    let app = test_app();
    start_workout(&app).await;
    let second = start_workout(&app).await;

    let response = app
        .oneshot(post_form("/load_workout", &format!("workout_id={}", second)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["workouts"].as_array().unwrap().len(), 2);
    assert_eq!(body["workout"]["id"], second);
}

#[tokio::test(flavor = "multi_thread")]
async fn exercise_queries_validate_names() {
    let app = test_app();

    let response = app.clone().oneshot(get("/exercises")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["exercise_names"].as_array().unwrap().len(), 3);

    let response = app.oneshot(get("/exercises/Curl/sets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

async fn assert_json_error(response: axum::response::Response, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    json_body(response).await["error"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_set_values_get_json_errors() {
    let app = test_app();
    let workout_id = start_workout(&app).await;
    let squat = add_exercise(&app, workout_id, "Squat").await;
    let uri = format!("/new_set?workout_id={}&exercise_id={}", workout_id, squat);

    let response = app
        .clone()
        .oneshot(post_form(&uri, "reps=abc&weight=135"))
        .await
        .unwrap();
    let error = assert_json_error(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(error.contains("reps"));

    let response = app
        .clone()
        .oneshot(post_form(&uri, "reps=5&weight=99999999999"))
        .await
        .unwrap();
    let error = assert_json_error(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(error.contains("weight"));

    let response = app
        .oneshot(get(&format!("/workout/{}", workout_id)))
        .await
        .unwrap();
    let workout = json_body(response).await;
    assert!(workout["exercises"][0]["sets"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_query_gets_json_error() {
    let app = test_app();

    let response = app
        .oneshot(post_form("/new_exercise?workout_id=abc", "exercise_name=Squat"))
        .await
        .unwrap();
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_path_gets_json_error() {
    let app = test_app();

    let response = app.clone().oneshot(get("/workout/abc")).await.unwrap();
    let error = assert_json_error(response, StatusCode::BAD_REQUEST).await;
    assert!(error.contains("abc"));

    let response = app
        .oneshot(post_form("/workout/abc/delete", ""))
        .await
        .unwrap();
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}
