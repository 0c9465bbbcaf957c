use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    entity::{
        cart_items::{
            ActiveModel as CartItemActive, Column as CartItemCol, Entity as CartItems,
            Model as CartItemModel,
        },
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
        shopping_carts::{
            ActiveModel as CartActive, Column as CartCol, Entity as ShoppingCarts,
            Model as CartModel,
        },
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    models::{Cart, CartItem, CartItemRecord, Order, OrderItem, OrderStatus, Product, User},
    price::cents_to_amount,
    store::{CartStore, CatalogStore, NewOrder, NewUser, OrderStore, UserStore},
};

/// Store backed by a SeaORM connection or transaction.
pub struct OrmStore<'a, C> {
    conn: &'a C,
}

impl<'a, C> OrmStore<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    async fn with_items(&self, orders: Vec<OrderModel>) -> AppResult<Vec<Order>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        let rows = OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(order_ids))
            .order_by_asc(OrderItemCol::Id)
            .find_also_related(Products)
            .all(self.conn)
            .await?;
        for (item, product) in rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(order_item_from_entity(item, product));
        }

        orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                order_from_entity(order, items)
            })
            .collect()
    }
}

#[async_trait]
impl<'a, C> UserStore for OrmStore<'a, C>
where
    C: ConnectionTrait + Sync,
{
    async fn user(&self, id: i32) -> AppResult<Option<User>> {
        let user = Users::find_by_id(id).one(self.conn).await?;
        Ok(user.map(user_from_entity))
    }

    async fn user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = Users::find()
            .filter(UserCol::Email.eq(email))
            .one(self.conn)
            .await?;
        Ok(user.map(user_from_entity))
    }

    async fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = UserActive {
            id: NotSet,
            name: Set(new_user.name),
            email: Set(new_user.email),
            full_name: Set(new_user.full_name),
            password_hash: Set(new_user.password_hash),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.conn)
        .await?;
        Ok(user_from_entity(user))
    }
}

#[async_trait]
impl<'a, C> CatalogStore for OrmStore<'a, C>
where
    C: ConnectionTrait + Sync,
{
    async fn product(&self, id: i32) -> AppResult<Option<Product>> {
        let product = Products::find_by_id(id).one(self.conn).await?;
        Ok(product.map(product_from_entity))
    }

    async fn products(&self) -> AppResult<Vec<Product>> {
        let products = Products::find()
            .order_by_asc(ProdCol::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn lock_products(&self, ids: &[i32]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let products = Products::find()
            .filter(ProdCol::Id.is_in(ids.iter().copied()))
            .order_by_asc(ProdCol::Id)
            .lock(LockType::Update)
            .all(self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn take_stock(&self, product_id: i32, quantity: i32) -> AppResult<bool> {
        let result = Products::update_many()
            .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).sub(quantity))
            .filter(ProdCol::Id.eq(product_id))
            .filter(ProdCol::Stock.gte(quantity))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl<'a, C> CartStore for OrmStore<'a, C>
where
    C: ConnectionTrait + Sync,
{
    async fn cart_for_user(&self, user_id: i32) -> AppResult<Option<Cart>> {
        let cart = ShoppingCarts::find()
            .filter(CartCol::UserId.eq(user_id))
            .one(self.conn)
            .await?;
        Ok(cart.map(cart_from_entity))
    }

    async fn insert_cart(&self, user_id: i32) -> AppResult<Cart> {
        let now = Utc::now();
        let cart = CartActive {
            id: NotSet,
            user_id: Set(user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.conn)
        .await?;
        Ok(cart_from_entity(cart))
    }

    async fn cart_items(&self, cart_id: i32) -> AppResult<Vec<CartItemRecord>> {
        let items = CartItems::find()
            .filter(CartItemCol::CartId.eq(cart_id))
            .order_by_asc(CartItemCol::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(cart_item_record_from_entity)
            .collect();
        Ok(items)
    }

    async fn cart_lines(&self, cart_id: i32) -> AppResult<Vec<CartItem>> {
        CartItems::find()
            .filter(CartItemCol::CartId.eq(cart_id))
            .order_by_asc(CartItemCol::Id)
            .find_also_related(Products)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|(item, product)| cart_item_from_entity(item, product))
            .collect()
    }

    async fn cart_line(&self, cart_id: i32, item_id: i32) -> AppResult<Option<CartItem>> {
        let row = CartItems::find()
            .filter(CartItemCol::CartId.eq(cart_id))
            .filter(CartItemCol::Id.eq(item_id))
            .find_also_related(Products)
            .one(self.conn)
            .await?;
        row.map(|(item, product)| cart_item_from_entity(item, product))
            .transpose()
    }

    async fn cart_item_for_product(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> AppResult<Option<CartItemRecord>> {
        let item = CartItems::find()
            .filter(CartItemCol::CartId.eq(cart_id))
            .filter(CartItemCol::ProductId.eq(product_id))
            .order_by_asc(CartItemCol::Id)
            .one(self.conn)
            .await?;
        Ok(item.map(cart_item_record_from_entity))
    }

    async fn insert_cart_item(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> AppResult<CartItemRecord> {
        let item = CartItemActive {
            id: NotSet,
            cart_id: Set(cart_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
        }
        .insert(self.conn)
        .await?;
        Ok(cart_item_record_from_entity(item))
    }

    async fn increase_cart_item(&self, item_id: i32, by: i32) -> AppResult<()> {
        CartItems::update_many()
            .col_expr(CartItemCol::Quantity, Expr::col(CartItemCol::Quantity).add(by))
            .filter(CartItemCol::Id.eq(item_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    async fn delete_cart_item(&self, cart_id: i32, item_id: i32) -> AppResult<bool> {
        let result = CartItems::delete_many()
            .filter(CartItemCol::Id.eq(item_id))
            .filter(CartItemCol::CartId.eq(cart_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn clear_cart(&self, cart_id: i32) -> AppResult<u64> {
        let result = CartItems::delete_many()
            .filter(CartItemCol::CartId.eq(cart_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn touch_cart(&self, cart_id: i32) -> AppResult<()> {
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        ShoppingCarts::update_many()
            .col_expr(CartCol::UpdatedAt, Expr::value(now))
            .filter(CartCol::Id.eq(cart_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<'a, C> OrderStore for OrmStore<'a, C>
where
    C: ConnectionTrait + Sync,
{
    async fn insert_order(&self, new_order: NewOrder) -> AppResult<Order> {
        let order = OrderActive {
            id: NotSet,
            user_id: Set(new_order.user_id),
            total_cents: Set(new_order.total_cents),
            status: Set(new_order.status.as_str().to_owned()),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.conn)
        .await?;

        for line in &new_order.lines {
            OrderItemActive {
                id: NotSet,
                order_id: Set(order.id),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                unit_price_cents: Set(line.unit_price_cents),
            }
            .insert(self.conn)
            .await?;
        }

        let mut orders = self.with_items(vec![order]).await?;
        orders
            .pop()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("inserted order vanished")))
    }

    async fn orders_for_user(&self, user_id: i32) -> AppResult<Vec<Order>> {
        let orders = Orders::find()
            .filter(OrderCol::UserId.eq(user_id))
            .order_by_asc(OrderCol::CreatedAt)
            .order_by_asc(OrderCol::Id)
            .all(self.conn)
            .await?;
        self.with_items(orders).await
    }

    async fn order_for_user(&self, user_id: i32, order_id: i32) -> AppResult<Option<Order>> {
        let order = Orders::find()
            .filter(OrderCol::Id.eq(order_id))
            .filter(OrderCol::UserId.eq(user_id))
            .one(self.conn)
            .await?;
        let Some(order) = order else {
            return Ok(None);
        };
        Ok(self.with_items(vec![order]).await?.pop())
    }
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        full_name: model.full_name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        sku: model.sku,
        description: model.description,
        price: cents_to_amount(model.price_cents),
        price_cents: model.price_cents,
        stock: model.stock,
        category: model.category,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn cart_from_entity(model: CartModel) -> Cart {
    Cart {
        id: model.id,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn cart_item_record_from_entity(model: CartItemModel) -> CartItemRecord {
    CartItemRecord {
        id: model.id,
        cart_id: model.cart_id,
        product_id: model.product_id,
        quantity: model.quantity,
    }
}

fn cart_item_from_entity(
    model: CartItemModel,
    product: Option<ProductModel>,
) -> AppResult<CartItem> {
    let product = product.ok_or(AppError::NotFound("Product"))?;
    Ok(CartItem {
        id: model.id,
        cart_id: model.cart_id,
        quantity: model.quantity,
        product: product_from_entity(product),
    })
}

fn order_item_from_entity(model: OrderItemModel, product: Option<ProductModel>) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price_cents: model.unit_price_cents,
        product: product.map(product_from_entity),
    }
}

fn order_from_entity(model: OrderModel, items: Vec<OrderItem>) -> AppResult<Order> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(Order {
        id: model.id,
        user_id: model.user_id,
        total_cents: model.total_cents,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        items,
    })
}
