mod common;

use inventory_api::{dto::cart::AddToCartRequest, error::AppError, services::cart_service};

use common::{create_user, insert_product, setup_state};

fn request(product_id: i32, quantity: i32) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "buyer", "buyer@example.com").await?;
    let product = insert_product(&state, "Mouse", 1999, 5).await?;

    for quantity in [0, -1] {
        let err = cart_service::add_to_cart(&state, user.id, request(product.id, quantity))
            .await
            .expect_err("quantity must be positive");
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    let cart = cart_service::list_cart(&state, user.id).await?;
    assert!(cart.data.expect("cart").items.is_empty());
    Ok(())
}

#[tokio::test]
async fn adding_same_product_accumulates_one_line() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "buyer", "buyer@example.com").await?;
    let product = insert_product(&state, "Mouse", 1999, 5).await?;

    let first = cart_service::add_to_cart(&state, user.id, request(product.id, 2))
        .await?
        .data
        .expect("line");
    let second = cart_service::add_to_cart(&state, user.id, request(product.id, 3))
        .await?
        .data
        .expect("line");

    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 5);
    assert_eq!(second.product.id, product.id);

    let cart = cart_service::list_cart(&state, user.id).await?;
    assert_eq!(cart.meta.and_then(|m| m.total), Some(1));
    Ok(())
}

#[tokio::test]
async fn request_above_stock_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "buyer", "buyer@example.com").await?;
    let product = insert_product(&state, "Monitor", 18999, 2).await?;

    let err = cart_service::add_to_cart(&state, user.id, request(product.id, 3))
        .await
        .expect_err("not enough stock");
    assert!(matches!(
        err,
        AppError::InsufficientStock {
            requested: 3,
            available: 2,
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn unknown_product_or_cart_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "buyer", "buyer@example.com").await?;
    let product = insert_product(&state, "Mouse", 1999, 5).await?;

    let err = cart_service::add_to_cart(&state, user.id, request(9999, 1))
        .await
        .expect_err("no such product");
    assert!(matches!(err, AppError::NotFound("Product")));

    let err = cart_service::add_to_cart(&state, 9999, request(product.id, 1))
        .await
        .expect_err("no such cart");
    assert!(matches!(err, AppError::NotFound("Cart")));

    let err = cart_service::list_cart(&state, 9999)
        .await
        .expect_err("no such cart");
    assert!(matches!(err, AppError::NotFound("Cart")));
    Ok(())
}

#[tokio::test]
async fn remove_only_touches_own_cart() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_user(&state, "owner", "owner@example.com").await?;
    let other = create_user(&state, "other", "other@example.com").await?;
    let product = insert_product(&state, "Mouse", 1999, 5).await?;

    let line = cart_service::add_to_cart(&state, owner.id, request(product.id, 1))
        .await?
        .data
        .expect("line");

    let err = cart_service::remove_from_cart(&state, other.id, line.id)
        .await
        .expect_err("line belongs to another cart");
    assert!(matches!(err, AppError::NotFound("Cart item")));
    let cart = cart_service::list_cart(&state, owner.id).await?;
    assert_eq!(cart.data.expect("cart").items.len(), 1);

    let removed = cart_service::remove_from_cart(&state, owner.id, line.id).await?;
    assert_eq!(removed.message, "Item removed");
    assert_eq!(removed.data.expect("removed").item_id, line.id);
    let cart = cart_service::list_cart(&state, owner.id).await?;
    assert!(cart.data.expect("cart").items.is_empty());

    let err = cart_service::remove_from_cart(&state, owner.id, line.id)
        .await
        .expect_err("already removed");
    assert!(matches!(err, AppError::NotFound("Cart item")));
    Ok(())
}
