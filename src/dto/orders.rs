use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

/// Checkout body. Unlike the other endpoints the receipt fields sit at the
/// top level, next to `message`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub message: String,
    pub order_id: i32,
    /// Order total in major units, derived from `total_cents`.
    pub total: f64,
    pub total_cents: i64,
    pub order: Order,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
