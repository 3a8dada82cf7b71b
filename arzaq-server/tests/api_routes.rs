//! Router tests that never reach the database
//!
//! Authentication, role checks and request validation all run before any
//! query, so these drive the full router against a lazily-connected pool.

mod common;

use arzaq_server::api;
use common::*;
use http::StatusCode;
use serde_json::json;
use shared::models::Role;
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_environment() {
    let app = api::router(lazy_state());
    let resp = app.oneshot(empty_request("GET", "/health", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn root_welcome() {
    let app = api::router(lazy_state());
    let resp = app.oneshot(empty_request("GET", "/", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("Arzaq"));
}

#[tokio::test]
async fn orders_require_token() {
    let app = api::router(lazy_state());
    let resp = app.oneshot(empty_request("GET", "/api/orders", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], 1001);
}

#[tokio::test]
async fn garbage_token_rejected() {
    let app = api::router(lazy_state());
    let resp = app
        .oneshot(empty_request("GET", "/api/orders", Some("Bearer not.a.jwt")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], 1004);
}

#[tokio::test]
async fn restaurant_cannot_place_order() {
    let state = lazy_state();
    let auth = bearer(&state, 7, Role::Restaurant);
    let app = api::router(state);

    let body = json!({
        "restaurant_id": 1,
        "pickup_time": "2030-01-01T12:00:00Z",
        "items": [{"food_id": 1, "quantity": 1}]
    });
    let resp = app
        .oneshot(json_request("POST", "/api/orders", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body = body_json(resp).await;
    assert_eq!(body["code"], 2002);
    assert_eq!(body["message"], "Not enough permissions");
}

#[tokio::test]
async fn empty_order_rejected() {
    let state = lazy_state();
    let auth = bearer(&state, 3, Role::Client);
    let app = api::router(state);

    let body = json!({
        "restaurant_id": 1,
        "pickup_time": "2030-01-01T12:00:00Z",
        "items": []
    });
    let resp = app
        .oneshot(json_request("POST", "/api/orders", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], 4002);
}

#[tokio::test]
async fn non_positive_quantity_rejected() {
    let state = lazy_state();
    let auth = bearer(&state, 3, Role::Client);
    let app = api::router(state);

    let body = json!({
        "restaurant_id": 1,
        "pickup_time": "2030-01-01T12:00:00Z",
        "items": [{"food_id": 1, "quantity": 2}, {"food_id": 2, "quantity": 0}]
    });
    let resp = app
        .oneshot(json_request("POST", "/api/orders", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["code"], 4003);
    assert_eq!(body["details"]["food_id"], 2);
}

#[tokio::test]
async fn client_cannot_change_order_status() {
    let state = lazy_state();
    let auth = bearer(&state, 3, Role::Client);
    let app = api::router(state);

    let resp = app
        .oneshot(json_request(
            "PATCH",
            "/api/orders/1/status",
            Some(&auth),
            json!({"status": "ready"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn impact_stats_client_only() {
    let state = lazy_state();
    let auth = bearer(&state, 9, Role::Restaurant);
    let app = api::router(state);

    let resp = app
        .oneshot(empty_request("GET", "/api/orders/impact/stats", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn pending_restaurants_admin_only() {
    let state = lazy_state();
    let auth = bearer(&state, 3, Role::Client);
    let app = api::router(state);

    let resp = app
        .oneshot(empty_request("GET", "/api/restaurants/pending", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["code"], 2003);
}

#[tokio::test]
async fn restaurant_list_validates_coordinates() {
    let app = api::router(lazy_state());
    let resp = app
        .oneshot(empty_request("GET", "/api/restaurants?latitude=95&longitude=10", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"],
        "Latitude must be between -90 and 90"
    );
}

#[tokio::test]
async fn admin_self_registration_rejected() {
    let app = api::router(lazy_state());
    let body = json!({
        "email": "boss@arzaq.test",
        "full_name": "Boss",
        "password": "long-enough-password",
        "role": "admin"
    });
    let resp = app
        .oneshot(json_request("POST", "/api/auth/register", None, body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn short_password_rejected() {
    let app = api::router(lazy_state());
    let body = json!({
        "email": "new@arzaq.test",
        "full_name": "Newcomer",
        "password": "short"
    });
    let resp = app
        .oneshot(json_request("POST", "/api/auth/register", None, body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], 1011);
}

#[tokio::test]
async fn blank_post_rejected() {
    let state = lazy_state();
    let auth = bearer(&state, 3, Role::Client);
    let app = api::router(state);

    let resp = app
        .oneshot(json_request("POST", "/api/posts", Some(&auth), json!({"text": "  "})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = api::router(lazy_state());
    let resp = app.oneshot(empty_request("GET", "/api/nope", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
