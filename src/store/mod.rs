//! Repository interfaces the services are written against.
//!
//! Each trait returns plain value records from [`crate::models`]. The only
//! implementation, [`OrmStore`], wraps any SeaORM connection, so the same
//! service code runs against a pooled connection or inside a transaction.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Cart, CartItem, CartItemRecord, Order, OrderStatus, Product, User},
};

mod orm;

pub use orm::OrmStore;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub lines: Vec<NewOrderLine>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user(&self, id: i32) -> AppResult<Option<User>>;

    async fn user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn insert_user(&self, new_user: NewUser) -> AppResult<User>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn product(&self, id: i32) -> AppResult<Option<Product>>;

    /// All products in insertion order.
    async fn products(&self) -> AppResult<Vec<Product>>;

    /// Loads the given products, row-locked for the rest of the transaction
    /// where the backend supports it. Locks are taken in id order.
    async fn lock_products(&self, ids: &[i32]) -> AppResult<Vec<Product>>;

    /// Removes `quantity` units from stock unless fewer remain.
    /// Returns `false` when the decrement was refused.
    async fn take_stock(&self, product_id: i32, quantity: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn cart_for_user(&self, user_id: i32) -> AppResult<Option<Cart>>;

    async fn insert_cart(&self, user_id: i32) -> AppResult<Cart>;

    /// Stored lines of a cart in insertion order.
    async fn cart_items(&self, cart_id: i32) -> AppResult<Vec<CartItemRecord>>;

    /// Lines of a cart with their products resolved, in insertion order.
    async fn cart_lines(&self, cart_id: i32) -> AppResult<Vec<CartItem>>;

    async fn cart_line(&self, cart_id: i32, item_id: i32) -> AppResult<Option<CartItem>>;

    async fn cart_item_for_product(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> AppResult<Option<CartItemRecord>>;

    async fn insert_cart_item(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> AppResult<CartItemRecord>;

    async fn increase_cart_item(&self, item_id: i32, by: i32) -> AppResult<()>;

    /// Deletes one line scoped to `cart_id`; `false` when no such line exists.
    async fn delete_cart_item(&self, cart_id: i32, item_id: i32) -> AppResult<bool>;

    /// Deletes every line of the cart, returning how many were removed.
    async fn clear_cart(&self, cart_id: i32) -> AppResult<u64>;

    async fn touch_cart(&self, cart_id: i32) -> AppResult<()>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, new_order: NewOrder) -> AppResult<Order>;

    /// Orders of a user by creation time, items and products resolved.
    async fn orders_for_user(&self, user_id: i32) -> AppResult<Vec<Order>>;

    async fn order_for_user(&self, user_id: i32, order_id: i32) -> AppResult<Option<Order>>;
}
