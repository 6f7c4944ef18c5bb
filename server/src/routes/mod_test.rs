use axum::body::Body;
use axum::http::{Request, header};
use frontdesk::BackendConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::*;

fn test_state() -> AppState {
    AppState::new(BackendConfig::new("https://abcd1234.supabase.co", "anon-key"))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = api_routes(test_state()).oneshot(get_request("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn config_returns_backend_url_and_anon_key() {
    let response = api_routes(test_state()).oneshot(get_request("/api/config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "url": "https://abcd1234.supabase.co", "anon_key": "anon-key" }));
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let response = api_routes(test_state()).oneshot(get_request("/api/patients")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
