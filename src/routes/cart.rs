use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};

use crate::{
    dto::cart::{AddToCartRequest, CartList, RemovedCartItem},
    error::AppResult,
    extract::AppJson,
    models::CartItem,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/cart", get(cart_list).post(add_to_cart))
        .route("/users/{id}/cart/{item_id}", delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/users/{id}/cart",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Cart lines with their products", body = ApiResponse<CartList>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_cart(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/users/{id}/cart",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add or accumulate a cart line", body = ApiResponse<CartItem>),
        (status = 400, description = "Invalid quantity or insufficient stock"),
        (status = 404, description = "Cart or product not found"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    AppJson(payload): AppJson<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::add_to_cart(&state, user_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users/{id}/cart/{item_id}",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("item_id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<RemovedCartItem>),
        (status = 404, description = "Cart or cart item not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<RemovedCartItem>>> {
    let resp = cart_service::remove_from_cart(&state, user_id, item_id).await?;
    Ok(Json(resp))
}
