mod common;

use inventory_api::{
    dto::cart::AddToCartRequest,
    error::AppError,
    services::{cart_service, checkout_service, order_service},
};

use common::{create_user, insert_product, setup_state};

#[tokio::test]
async fn unknown_user_has_no_history() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let err = order_service::list_orders(&state, 777)
        .await
        .expect_err("no such user");
    assert!(matches!(err, AppError::NotFound("User")));
    Ok(())
}

#[tokio::test]
async fn orders_are_listed_oldest_first_with_items() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "buyer", "buyer@example.com").await?;
    let mouse = insert_product(&state, "Mouse", 1999, 10).await?;
    let hub = insert_product(&state, "Hub", 3999, 10).await?;

    let mut placed = Vec::new();
    for (product_id, quantity) in [(mouse.id, 1), (hub.id, 2)] {
        cart_service::add_to_cart(
            &state,
            user.id,
            AddToCartRequest {
                product_id,
                quantity,
            },
        )
        .await?;
        let receipt = checkout_service::checkout(&state, user.id).await?;
        placed.push(receipt.order_id);
    }

    let orders = order_service::list_orders(&state, user.id)
        .await?
        .data
        .expect("orders")
        .items;
    let ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
    assert_eq!(ids, placed);
    assert_eq!(orders[1].total_cents, 7998);
    assert_eq!(orders[1].items[0].product_id, hub.id);
    assert_eq!(
        orders[1].items[0].product.as_ref().map(|p| p.name.as_str()),
        Some("Hub")
    );
    Ok(())
}

#[tokio::test]
async fn another_users_order_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_user(&state, "owner", "owner@example.com").await?;
    let other = create_user(&state, "other", "other@example.com").await?;

    let receipt = checkout_service::checkout(&state, owner.id).await?;

    let err = order_service::get_order(&state, other.id, receipt.order_id)
        .await
        .expect_err("order belongs to owner");
    assert!(matches!(err, AppError::NotFound("Order")));

    let own = order_service::get_order(&state, owner.id, receipt.order_id)
        .await?
        .data
        .expect("order");
    assert_eq!(own.user_id, owner.id);
    Ok(())
}
