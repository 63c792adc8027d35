use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use adboard_server::config::RateLimitConfig;
use adboard_server::rest::{router, AppState};
use adboard_server::store::InMemoryAdvertisementStore;

fn app_state() -> AppState {
    app_state_with_limit(1_000, 1_000.0)
}

fn app_state_with_limit(capacity: u64, refill_per_second: f64) -> AppState {
    AppState::new(
        Arc::new(InMemoryAdvertisementStore::new()),
        &RateLimitConfig {
            capacity,
            refill_per_second,
        },
    )
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
    let resp = router(state.clone()).oneshot(request).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn create(state: &AppState, content: &str) -> serde_json::Value {
    let (status, body) = send(
        state,
        json("POST", "/ads", serde_json::json!({ "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn crud_round_trip() {
    let state = app_state();

    let created = create(&state, "1234567890").await;
    assert_eq!(created["viewCount"], 0);
    assert_eq!(created["content"], "1234567890");
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_u64().unwrap();

    let (status, body) = send(&state, get(&format!("/ads/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let ad: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ad["viewCount"], 1);
    assert_eq!(ad["createdAt"], created["createdAt"]);

    let (_, body) = send(&state, get(&format!("/ads/{id}"))).await;
    let ad: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ad["viewCount"], 2);

    let (status, body) = send(&state, delete(&format!("/ads/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&state, get(&format!("/ads/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_overwrites_content_and_views() {
    let state = app_state();
    let id = create(&state, "Original advertisement").await["id"]
        .as_u64()
        .unwrap();
    send(&state, get(&format!("/ads/{id}"))).await;

    let (status, body) = send(
        &state,
        json(
            "PUT",
            &format!("/ads/{id}"),
            serde_json::json!({ "content": "Updated advertisement", "viewCount": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["content"], "Updated advertisement");
    assert_eq!(updated["viewCount"], 5);

    let (_, body) = send(&state, get(&format!("/ads/{id}"))).await;
    let ad: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ad["viewCount"], 6);
}

#[tokio::test]
async fn validation_boundaries() {
    let state = app_state();
    for (len, expected) in [
        (9, StatusCode::BAD_REQUEST),
        (10, StatusCode::CREATED),
        (1000, StatusCode::CREATED),
        (1001, StatusCode::BAD_REQUEST),
    ] {
        let (status, body) = send(
            &state,
            json("POST", "/ads", serde_json::json!({ "content": "x".repeat(len) })),
        )
        .await;
        assert_eq!(status, expected, "length {len}: {body}");
    }
}

#[tokio::test]
async fn validation_error_body_names_field() {
    let state = app_state();
    let (status, body) = send(
        &state,
        json("POST", "/ads", serde_json::json!({ "content": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(err["status"], 400);
    assert!(err["timestamp"].is_string());
    assert!(err["message"].as_str().unwrap().contains("content"));
}

#[tokio::test]
async fn missing_content_is_bad_request() {
    let state = app_state();
    let (status, _) = send(&state, json("POST", "/ads", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let state = app_state();
    let request = Request::builder()
        .method("POST")
        .uri("/ads")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&state, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(err["status"], 400);
}

#[tokio::test]
async fn negative_view_count_rejected() {
    let state = app_state();
    let id = create(&state, "1234567890").await["id"].as_u64().unwrap();
    let (status, body) = send(
        &state,
        json(
            "PUT",
            &format!("/ads/{id}"),
            serde_json::json!({ "content": "1234567890", "viewCount": -1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("viewCount"));
}

#[tokio::test]
async fn not_found_names_the_id() {
    let state = app_state();

    let (status, body) = send(&state, get("/ads/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(err["status"], 404);
    assert!(err["message"].as_str().unwrap().contains("999"));

    let (status, _) = send(
        &state,
        json(
            "PUT",
            "/ads/999",
            serde_json::json!({ "content": "Nonexistent advertisement", "viewCount": 0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, delete("/ads/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let state = app_state();
    let (status, body) = send(&state, get("/ads/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("id"));
}

#[tokio::test]
async fn rate_limited_requests_get_429() {
    let state = app_state_with_limit(2, 0.001);
    create(&state, "1234567890").await;
    let (status, _) = send(&state, get("/ads/1")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, get("/ads/1")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body.starts_with("Rate limit exceeded"));
    assert_eq!(state.metrics.rate_limited_total(), 1);
}

#[tokio::test]
async fn rejected_request_does_not_reach_gateway() {
    let state = app_state_with_limit(2, 0.001);
    let id = create(&state, "1234567890").await["id"].as_u64().unwrap();
    send(&state, get(&format!("/ads/{id}"))).await;

    let (status, _) = send(&state, delete(&format!("/ads/{id}"))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(state.gateway.exists(id).await.unwrap());
    assert_eq!(state.metrics.views_total(), 1);
}

#[tokio::test]
async fn unmatched_paths_outside_ads_spend_no_tokens() {
    let state = app_state_with_limit(1, 0.001);

    let (status, _) = send(&state, get("/favicon.ico")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&state, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.metrics.ad_requests_total(), 0);

    let (status, _) = send(&state, get("/ads/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.metrics.ad_requests_total(), 1);
}

#[tokio::test]
async fn unmatched_paths_inside_ads_are_limited() {
    let state = app_state_with_limit(1, 0.001);

    let (status, _) = send(&state, get("/ads/5/extra")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, get("/ads/5/extra")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(state.metrics.rate_limited_total(), 1);
}

#[tokio::test]
async fn health_and_metrics_are_not_rate_limited() {
    let state = app_state_with_limit(1, 0.001);
    create(&state, "1234567890").await;
    let (status, _) = send(&state, get("/ads/1")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, body) = send(&state, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));

    let (status, body) = send(&state, get("/actuator/health")).await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "UP");

    let (status, body) = send(&state, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("adboard_rate_limited_total 1"));
    assert!(body.contains("adboard_ads_created_total 1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_gets_count_every_view() {
    let state = app_state();
    let id = create(&state, "Concurrent advertisement").await["id"]
        .as_u64()
        .unwrap();

    let requests: Vec<_> = (0..100)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move { send(&state, get(&format!("/ads/{id}"))).await })
        })
        .collect();
    for request in requests {
        let (status, _) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&state, get(&format!("/ads/{id}"))).await;
    let ad: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ad["viewCount"], 101);
}
