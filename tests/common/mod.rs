#![allow(dead_code)]

use anyhow::Context;
use chrono::Utc;
use inventory_api::{
    db::run_migrations,
    dto::users::CreateUserRequest,
    entity::{Products, products::ActiveModel as ProductActive},
    models::{Product, User},
    services::{catalog_service, user_service},
    state::AppState,
    store::OrmStore,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, EntityTrait, Set};

/// Fresh in-memory SQLite database with the schema applied.
///
/// The pool holds exactly one connection: every connection to `sqlite::memory:`
/// opens its own empty database.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

pub async fn insert_product(
    state: &AppState,
    name: &str,
    price_cents: i64,
    stock: i32,
) -> anyhow::Result<Product> {
    let model = ProductActive {
        id: NotSet,
        name: Set(name.to_string()),
        sku: Set(None),
        description: Set(Some(format!("{name} for testing"))),
        price_cents: Set(price_cents),
        stock: Set(stock),
        category: Set(Some("Testing".to_string())),
        image_url: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    let product = catalog_service::find_product(&OrmStore::new(&state.orm), model.id).await?;
    Ok(product)
}

pub async fn create_user(state: &AppState, name: &str, email: &str) -> anyhow::Result<User> {
    let resp = user_service::create_user(
        state,
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
        },
    )
    .await?;
    resp.data.context("created user missing from response")
}

pub async fn stock_of(state: &AppState, product_id: i32) -> anyhow::Result<i32> {
    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .context("product missing")?;
    Ok(product.stock)
}

pub async fn set_stock(state: &AppState, product_id: i32, stock: i32) -> anyhow::Result<()> {
    let mut product: ProductActive = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .context("product missing")?
        .into();
    product.stock = Set(stock);
    product.update(&state.orm).await?;
    Ok(())
}

pub async fn set_price(state: &AppState, product_id: i32, price_cents: i64) -> anyhow::Result<()> {
    let mut product: ProductActive = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .context("product missing")?
        .into();
    product.price_cents = Set(price_cents);
    product.update(&state.orm).await?;
    Ok(())
}
