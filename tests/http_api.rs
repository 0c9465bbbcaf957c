mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use inventory_api::{config::parse_origins, routes::create_app};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{insert_product, setup_state, stock_of};

async fn test_app() -> anyhow::Result<(Router, inventory_api::state::AppState)> {
    let state = setup_state().await?;
    let origins = parse_origins("http://localhost:5173")?;
    Ok((create_app(state.clone(), origins), state))
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, body))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_and_fallback() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let (status, body) = send(&app, get("/health")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = send(&app, get("/nope")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/nope");
    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let response = app.clone().oneshot(get("/health")).await?;
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn missing_product_is_404_envelope() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let (status, body) = send(&app, get("/products/999")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    assert_eq!(body["data"]["error"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_400() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, body) = send(&app, request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].is_string());

    let (status, _) = send(
        &app,
        post_json("/users", json!({ "name": "no email" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn duplicate_user_is_409() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let payload = json!({ "name": "alice", "email": "alice@example.com" });

    let (status, body) = send(&app, post_json("/users", payload.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "alice@example.com");

    let (status, body) = send(&app, post_json("/users", payload)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
    Ok(())
}

// Integration flow over HTTP: demo login -> browse -> cart -> checkout -> history.
#[tokio::test]
async fn shopping_flow_over_http() -> anyhow::Result<()> {
    let (app, state) = test_app().await?;
    let mouse = insert_product(&state, "Mouse", 1999, 3).await?;
    let keyboard = insert_product(&state, "Keyboard", 5999, 2).await?;

    let (status, body) = send(&app, post_json("/demo/login", json!({}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "New demo user created");
    assert_eq!(body["created"], true);
    assert_eq!(body["user"]["email"], "demo@example.com");
    let user_id = body["user"]["id"].as_i64().expect("user id");

    let (status, body) = send(&app, get("/products")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"][0]["price"], 19.99);
    assert_eq!(body["data"][0]["price_cents"], 1999);

    let cart_uri = format!("/users/{user_id}/cart");
    let (status, _) = send(
        &app,
        post_json(&cart_uri, json!({ "product_id": mouse.id, "quantity": 0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for (product_id, quantity) in [(mouse.id, 2), (keyboard.id, 1)] {
        let (status, _) = send(
            &app,
            post_json(
                &cart_uri,
                json!({ "product_id": product_id, "quantity": quantity }),
            ),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, get(&cart_uri)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);

    let (status, body) = send(
        &app,
        post_json(&format!("/users/{user_id}/checkout"), json!({})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Checkout successful");
    assert_eq!(body["total_cents"], 9997);
    assert_eq!(body["total"], 99.97);
    assert_eq!(body["order"]["items"][0]["product"]["stock"], 1);
    let order_id = body["order_id"].as_i64().expect("order id");

    assert_eq!(stock_of(&state, mouse.id).await?, 1);
    assert_eq!(stock_of(&state, keyboard.id).await?, 1);

    let (status, body) = send(&app, get(&format!("/users/{user_id}/orders"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["status"], "completed");

    let (status, body) = send(
        &app,
        get(&format!("/users/{user_id}/orders/{order_id}")),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn checkout_with_too_little_stock_is_400() -> anyhow::Result<()> {
    let (app, state) = test_app().await?;
    let monitor = insert_product(&state, "Monitor", 18999, 1).await?;

    let (_, body) = send(&app, post_json("/demo/login", json!({}))).await?;
    let user_id = body["user"]["id"].as_i64().expect("user id");

    let (status, body) = send(
        &app,
        post_json(
            &format!("/users/{user_id}/cart"),
            json!({ "product_id": monitor.id, "quantity": 2 }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Insufficient stock"))
    );
    Ok(())
}

#[tokio::test]
async fn trailing_slash_collection_paths_are_served() -> anyhow::Result<()> {
    let (app, state) = test_app().await?;
    insert_product(&state, "Mouse", 1999, 3).await?;

    let (status, body) = send(&app, get("/products/")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = send(
        &app,
        post_json(
            "/users/",
            json!({ "name": "slash", "email": "slash@example.com" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "slash@example.com");
    Ok(())
}
