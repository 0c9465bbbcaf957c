use crate::{
    dto::orders::OrderList,
    error::{AppError, AppResult},
    models::Order,
    response::{ApiResponse, Meta},
    state::AppState,
    store::{OrderStore, OrmStore, UserStore},
};

pub async fn order_history<S>(store: &S, user_id: i32) -> AppResult<Vec<Order>>
where
    S: UserStore + OrderStore,
{
    if store.user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User"));
    }
    store.orders_for_user(user_id).await
}

/// An order owned by someone else is reported exactly like a missing one.
pub async fn find_order<S: OrderStore>(store: &S, user_id: i32, order_id: i32) -> AppResult<Order> {
    store
        .order_for_user(user_id, order_id)
        .await?
        .ok_or(AppError::NotFound("Order"))
}

pub async fn list_orders(state: &AppState, user_id: i32) -> AppResult<ApiResponse<OrderList>> {
    let items = order_history(&OrmStore::new(&state.orm), user_id).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user_id: i32,
    order_id: i32,
) -> AppResult<ApiResponse<Order>> {
    let order = find_order(&OrmStore::new(&state.orm), user_id, order_id).await?;
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}
