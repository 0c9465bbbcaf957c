//! Checkout: turns a user's cart into a completed order.
//!
//! [`checkout_cart`] runs against any store and assumes the caller scopes it
//! to a single transaction; [`checkout`] is that caller. Stock is validated
//! for every line before anything is written, and each decrement is a
//! conditional update, so a failure at any step rolls the whole unit back.

use std::collections::{BTreeMap, HashMap};

use sea_orm::TransactionTrait;

use crate::{
    dto::orders::CheckoutReceipt,
    error::{AppError, AppResult},
    models::{CartItemRecord, Order, OrderStatus, Product},
    price::{cents_to_amount, line_total},
    services::cart_service::find_cart,
    state::AppState,
    store::{CartStore, CatalogStore, NewOrder, NewOrderLine, OrderStore, OrmStore},
};

/// Priced lines and total for a cart, computed before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub lines: Vec<NewOrderLine>,
    pub total_cents: i64,
}

/// Validates stock for every cart line, then snapshots unit prices.
///
/// Demand is summed per product first, so two lines for the same product
/// cannot each pass on their own and oversell together.
pub fn plan_checkout(
    items: &[CartItemRecord],
    products: &HashMap<i32, Product>,
) -> AppResult<CheckoutPlan> {
    let mut demand: BTreeMap<i32, i64> = BTreeMap::new();
    for item in items {
        if item.quantity <= 0 {
            return Err(AppError::InvalidRequest(format!(
                "cart item {} has invalid quantity {}",
                item.id, item.quantity
            )));
        }
        *demand.entry(item.product_id).or_default() += i64::from(item.quantity);
    }

    for (&product_id, &requested) in &demand {
        let product = products
            .get(&product_id)
            .ok_or(AppError::NotFound("Product"))?;
        if i64::from(product.stock) < requested {
            return Err(AppError::InsufficientStock {
                product_id,
                requested,
                available: product.stock,
            });
        }
    }

    let mut lines = Vec::with_capacity(items.len());
    let mut total_cents: i64 = 0;
    for item in items {
        let product = products
            .get(&item.product_id)
            .ok_or(AppError::NotFound("Product"))?;
        let unit_price_cents = product.price_cents;
        total_cents = line_total(item.quantity, unit_price_cents)
            .and_then(|line| total_cents.checked_add(line))
            .ok_or_else(|| AppError::InvalidRequest("order total is too large".to_string()))?;
        lines.push(NewOrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents,
        });
    }

    Ok(CheckoutPlan { lines, total_cents })
}

/// Converts the user's cart into a completed order.
///
/// Must run inside one transaction: on `Err` the caller rolls back, which
/// discards the order rows and any stock already taken.
pub async fn checkout_cart<S>(store: &S, user_id: i32) -> AppResult<Order>
where
    S: CartStore + CatalogStore + OrderStore,
{
    let cart = find_cart(store, user_id).await?;
    let items = store.cart_items(cart.id).await?;

    let mut product_ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    let products: HashMap<i32, Product> = store
        .lock_products(&product_ids)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let plan = plan_checkout(&items, &products)?;

    for line in &plan.lines {
        if !store.take_stock(line.product_id, line.quantity).await? {
            let available = store
                .product(line.product_id)
                .await?
                .map_or(0, |product| product.stock);
            return Err(AppError::InsufficientStock {
                product_id: line.product_id,
                requested: i64::from(line.quantity),
                available,
            });
        }
    }

    // Inserted after the decrements so the returned products show the new stock.
    let order = store
        .insert_order(NewOrder {
            user_id,
            status: OrderStatus::Completed,
            total_cents: plan.total_cents,
            lines: plan.lines,
        })
        .await?;

    store.clear_cart(cart.id).await?;
    store.touch_cart(cart.id).await?;

    Ok(order)
}

pub async fn checkout(state: &AppState, user_id: i32) -> AppResult<CheckoutReceipt> {
    let txn = state.orm.begin().await?;

    let result = checkout_cart(&OrmStore::new(&txn), user_id).await;
    let order = match result {
        Ok(order) => order,
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "checkout rollback failed");
            }
            tracing::info!(user_id, error = %err, "checkout aborted");
            return Err(err);
        }
    };
    txn.commit().await?;

    tracing::info!(
        user_id,
        order_id = order.id,
        total_cents = order.total_cents,
        items = order.items.len(),
        "checkout completed"
    );

    Ok(CheckoutReceipt {
        message: "Checkout successful".to_string(),
        order_id: order.id,
        total: cents_to_amount(order.total_cents),
        total_cents: order.total_cents,
        order,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(id: i32, price_cents: i64, stock: i32) -> Product {
        Product {
            id,
            name: format!("product-{id}"),
            sku: None,
            description: None,
            price: cents_to_amount(price_cents),
            price_cents,
            stock,
            category: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn item(id: i32, product_id: i32, quantity: i32) -> CartItemRecord {
        CartItemRecord {
            id,
            cart_id: 1,
            product_id,
            quantity,
        }
    }

    fn catalog(products: Vec<Product>) -> HashMap<i32, Product> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn prices_and_totals_the_cart() {
        let products = catalog(vec![product(1, 1999, 5), product(2, 5999, 3)]);
        let plan = plan_checkout(&[item(10, 1, 2), item(11, 2, 1)], &products).unwrap();

        assert_eq!(plan.total_cents, 9997);
        assert_eq!(
            plan.lines,
            vec![
                NewOrderLine {
                    product_id: 1,
                    quantity: 2,
                    unit_price_cents: 1999
                },
                NewOrderLine {
                    product_id: 2,
                    quantity: 1,
                    unit_price_cents: 5999
                },
            ]
        );
    }

    #[test]
    fn empty_cart_plans_a_zero_total() {
        let plan = plan_checkout(&[], &HashMap::new()).unwrap();
        assert!(plan.lines.is_empty());
        assert_eq!(plan.total_cents, 0);
    }

    #[test]
    fn insufficient_stock_names_the_product() {
        let products = catalog(vec![product(1, 1999, 5)]);
        let err = plan_checkout(&[item(10, 1, 10)], &products).unwrap_err();

        match err {
            AppError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                assert_eq!(product_id, 1);
                assert_eq!(requested, 10);
                assert_eq!(available, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stock_is_checked_against_summed_demand() {
        let products = catalog(vec![product(1, 100, 3)]);
        let err = plan_checkout(&[item(10, 1, 2), item(11, 1, 2)], &products).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientStock { requested: 4, .. }
        ));
    }

    #[test]
    fn a_later_failing_line_rejects_the_whole_cart() {
        let products = catalog(vec![product(1, 100, 10), product(2, 100, 0)]);
        let err = plan_checkout(&[item(10, 1, 1), item(11, 2, 1)], &products).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientStock { product_id: 2, .. }
        ));
    }

    #[test]
    fn missing_product_is_not_found() {
        let err = plan_checkout(&[item(10, 7, 1)], &HashMap::new()).unwrap_err();
        assert!(matches!(err, AppError::NotFound("Product")));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let products = catalog(vec![product(1, i64::MAX / 2, i32::MAX)]);
        let err = plan_checkout(&[item(10, 1, 3)], &products).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
