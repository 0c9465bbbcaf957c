use sea_orm::TransactionTrait;

use crate::{
    dto::cart::{AddToCartRequest, CartList, RemovedCartItem},
    error::{AppError, AppResult},
    models::{Cart, CartItem},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{CartStore, CatalogStore, OrmStore},
};

pub async fn find_cart<S: CartStore>(store: &S, user_id: i32) -> AppResult<Cart> {
    store
        .cart_for_user(user_id)
        .await?
        .ok_or(AppError::NotFound("Cart"))
}

/// Adds `quantity` units of a product to the user's cart. A line that already
/// holds the product accumulates the quantity.
pub async fn add_item<S>(
    store: &S,
    user_id: i32,
    product_id: i32,
    quantity: i32,
) -> AppResult<CartItem>
where
    S: CartStore + CatalogStore,
{
    if quantity <= 0 {
        return Err(AppError::InvalidRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let cart = find_cart(store, user_id).await?;
    let product = store
        .product(product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    // Advisory only; checkout re-validates under lock.
    if product.stock < quantity {
        return Err(AppError::InsufficientStock {
            product_id,
            requested: i64::from(quantity),
            available: product.stock,
        });
    }

    let item_id = match store.cart_item_for_product(cart.id, product_id).await? {
        Some(existing) => {
            existing.quantity.checked_add(quantity).ok_or_else(|| {
                AppError::InvalidRequest("cart quantity is too large".to_string())
            })?;
            store.increase_cart_item(existing.id, quantity).await?;
            existing.id
        }
        None => {
            store
                .insert_cart_item(cart.id, product_id, quantity)
                .await?
                .id
        }
    };
    store.touch_cart(cart.id).await?;

    store
        .cart_line(cart.id, item_id)
        .await?
        .ok_or(AppError::NotFound("Cart item"))
}

/// Removes one line from the user's cart. Lines of other carts are invisible.
pub async fn remove_item<S: CartStore>(store: &S, user_id: i32, item_id: i32) -> AppResult<()> {
    let cart = find_cart(store, user_id).await?;
    if !store.delete_cart_item(cart.id, item_id).await? {
        return Err(AppError::NotFound("Cart item"));
    }
    store.touch_cart(cart.id).await
}

pub async fn view_cart<S: CartStore>(store: &S, user_id: i32) -> AppResult<Vec<CartItem>> {
    let cart = find_cart(store, user_id).await?;
    store.cart_lines(cart.id).await
}

pub async fn list_cart(state: &AppState, user_id: i32) -> AppResult<ApiResponse<CartList>> {
    let items = view_cart(&OrmStore::new(&state.orm), user_id).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

pub async fn add_to_cart(
    state: &AppState,
    user_id: i32,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let txn = state.orm.begin().await?;
    let item = add_item(
        &OrmStore::new(&txn),
        user_id,
        payload.product_id,
        payload.quantity,
    )
    .await?;
    txn.commit().await?;

    tracing::debug!(
        user_id,
        product_id = payload.product_id,
        quantity = item.quantity,
        "cart updated"
    );
    Ok(ApiResponse::success("OK", item, Some(Meta::empty())))
}

pub async fn remove_from_cart(
    state: &AppState,
    user_id: i32,
    item_id: i32,
) -> AppResult<ApiResponse<RemovedCartItem>> {
    let txn = state.orm.begin().await?;
    remove_item(&OrmStore::new(&txn), user_id, item_id).await?;
    txn.commit().await?;

    tracing::debug!(user_id, item_id, "cart item removed");
    Ok(ApiResponse::success(
        "Item removed",
        RemovedCartItem { item_id },
        Some(Meta::empty()),
    ))
}
