use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutReceipt, OrderList},
    error::AppResult,
    models::Order,
    response::ApiResponse,
    services::{checkout_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/checkout", post(checkout))
        .route("/users/{id}/orders", get(list_orders))
        .route("/users/{id}/orders/{order_id}", get(get_order))
}

#[utoipa::path(
    post,
    path = "/users/{id}/checkout",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Cart converted into a completed order", body = CheckoutReceipt),
        (status = 400, description = "Insufficient stock"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<CheckoutReceipt>> {
    let resp = checkout_service::checkout(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/{id}/orders",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Orders by creation time", body = ApiResponse<OrderList>),
        (status = 404, description = "User not found"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/{id}/orders/{order_id}",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<Order>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path((user_id, order_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::get_order(&state, user_id, order_id).await?;
    Ok(Json(resp))
}
