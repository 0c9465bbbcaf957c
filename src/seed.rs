//! Catalog and demo data loaders used at startup and by the `seed` binary.

use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use crate::{
    db::OrmConn,
    entity::{
        CartItems, OrderItems, Orders, Products, ShoppingCarts, Users,
        products::{ActiveModel as ProductActive, Model as ProductModel},
    },
    models::OrderStatus,
    price::amount_to_cents,
    services::user_service::register,
    store::{CartStore, NewOrder, NewOrderLine, NewUser, OrderStore, OrmStore},
};

pub struct SeedProduct {
    pub name: &'static str,
    pub sku: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub stock: i32,
    pub category: &'static str,
    pub image_url: Option<&'static str>,
}

/// Products inserted on startup when the catalog is empty.
pub const DEFAULT_CATALOG: &[SeedProduct] = &[
    SeedProduct {
        name: "Laptop",
        sku: "LAP-001",
        description: "Everyday laptop",
        price: 999.99,
        stock: 10,
        category: "Electronics",
        image_url: None,
    },
    SeedProduct {
        name: "Mouse",
        sku: "MOUSE-001",
        description: "Wired optical mouse",
        price: 25.99,
        stock: 50,
        category: "Accessories",
        image_url: None,
    },
    SeedProduct {
        name: "Keyboard",
        sku: "KEY-001",
        description: "Full-size keyboard",
        price: 75.99,
        stock: 30,
        category: "Accessories",
        image_url: None,
    },
];

/// Products loaded by the `seed` binary.
pub const DEMO_CATALOG: &[SeedProduct] = &[
    SeedProduct {
        name: "Wireless Mouse",
        sku: "MOUSE-001",
        description: "Compact wireless mouse with USB receiver. Perfect for work and gaming.",
        price: 19.99,
        stock: 50,
        category: "Accessories",
        image_url: Some("/images/mouse.jpg"),
    },
    SeedProduct {
        name: "Mechanical Keyboard",
        sku: "KEYBOARD-001",
        description: "Mechanical keyboard with blue switches. Tactile and clicky.",
        price: 59.99,
        stock: 30,
        category: "Accessories",
        image_url: Some("/images/keyboard.jpg"),
    },
    SeedProduct {
        name: "27\" Monitor",
        sku: "MONITOR-027",
        description: "1080p IPS monitor suitable for office work and gaming.",
        price: 189.99,
        stock: 15,
        category: "Displays",
        image_url: Some("/images/monitor.jpg"),
    },
    SeedProduct {
        name: "USB-C Hub",
        sku: "HUB-001",
        description: "7-in-1 USB-C hub with HDMI, USB 3.0, and card readers.",
        price: 39.99,
        stock: 75,
        category: "Accessories",
        image_url: Some("/images/usb-hub.jpg"),
    },
    SeedProduct {
        name: "Laptop Stand",
        sku: "STAND-001",
        description: "Adjustable aluminum laptop stand for better ergonomics.",
        price: 29.99,
        stock: 40,
        category: "Accessories",
        image_url: Some("/images/laptop-stand.jpg"),
    },
    SeedProduct {
        name: "Webcam HD",
        sku: "WEBCAM-001",
        description: "1080p HD webcam with built-in microphone.",
        price: 79.99,
        stock: 25,
        category: "Electronics",
        image_url: Some("/images/webcam.jpg"),
    },
    SeedProduct {
        name: "Headphones",
        sku: "HEADPHONE-001",
        description: "Noise-cancelling over-ear headphones with 30-hour battery.",
        price: 149.99,
        stock: 20,
        category: "Audio",
        image_url: Some("/images/headphones.jpg"),
    },
    SeedProduct {
        name: "External SSD 1TB",
        sku: "SSD-1TB-001",
        description: "Portable 1TB SSD with USB-C connection. Up to 1000MB/s.",
        price: 119.99,
        stock: 35,
        category: "Storage",
        image_url: Some("/images/ssd.jpg"),
    },
    SeedProduct {
        name: "Desk Lamp LED",
        sku: "LAMP-001",
        description: "Adjustable LED desk lamp with touch controls and USB charging.",
        price: 34.99,
        stock: 60,
        category: "Office",
        image_url: Some("/images/lamp.jpg"),
    },
    SeedProduct {
        name: "Cable Management Kit",
        sku: "CABLE-001",
        description: "Complete cable management solution with clips and sleeves.",
        price: 15.99,
        stock: 100,
        category: "Accessories",
        image_url: Some("/images/cables.jpg"),
    },
    SeedProduct {
        name: "Laptop Backpack",
        sku: "BACKPACK-001",
        description: "Water-resistant laptop backpack with USB charging port.",
        price: 49.99,
        stock: 45,
        category: "Bags",
        image_url: Some("/images/backpack.jpg"),
    },
    SeedProduct {
        name: "Wireless Charger",
        sku: "CHARGER-001",
        description: "Fast wireless charging pad compatible with Qi devices.",
        price: 24.99,
        stock: 80,
        category: "Accessories",
        image_url: Some("/images/charger.jpg"),
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub products: usize,
    pub cart_items: usize,
    pub orders: usize,
}

async fn insert_products<C: ConnectionTrait>(
    conn: &C,
    catalog: &[SeedProduct],
) -> Result<Vec<ProductModel>> {
    let mut inserted = Vec::with_capacity(catalog.len());
    for product in catalog {
        let price_cents = amount_to_cents(product.price)
            .with_context(|| format!("invalid price for {}", product.name))?;
        let model = ProductActive {
            id: NotSet,
            name: Set(product.name.to_string()),
            sku: Set(Some(product.sku.to_string())),
            description: Set(Some(product.description.to_string())),
            price_cents: Set(price_cents),
            stock: Set(product.stock),
            category: Set(Some(product.category.to_string())),
            image_url: Set(product.image_url.map(str::to_string)),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await?;
        inserted.push(model);
    }
    Ok(inserted)
}

/// Inserts [`DEFAULT_CATALOG`] when the product table is empty.
/// Returns how many products were inserted.
pub async fn seed_catalog_if_empty(conn: &OrmConn) -> Result<usize> {
    if Products::find().count(conn).await? > 0 {
        return Ok(0);
    }
    let txn = conn.begin().await?;
    let inserted = insert_products(&txn, DEFAULT_CATALOG).await?;
    txn.commit().await?;
    tracing::info!(count = inserted.len(), "seeded default catalog");
    Ok(inserted.len())
}

/// Wipes every table and loads the demo dataset: two users with carts, the
/// demo catalog, two lines in the demo cart and one completed order each.
pub async fn seed_demo_data(conn: &OrmConn) -> Result<SeedSummary> {
    let txn = conn.begin().await?;

    OrderItems::delete_many().exec(&txn).await?;
    Orders::delete_many().exec(&txn).await?;
    CartItems::delete_many().exec(&txn).await?;
    ShoppingCarts::delete_many().exec(&txn).await?;
    Products::delete_many().exec(&txn).await?;
    Users::delete_many().exec(&txn).await?;

    let store = OrmStore::new(&txn);
    let demo = register(
        &store,
        NewUser {
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            full_name: Some("Demo User".to_string()),
            password_hash: "demo_hash_12345".to_string(),
        },
    )
    .await?;
    let student = register(
        &store,
        NewUser {
            name: "Student User".to_string(),
            email: "student@example.com".to_string(),
            full_name: Some("Student Test User".to_string()),
            password_hash: "student_hash_12345".to_string(),
        },
    )
    .await?;

    let products = insert_products(&txn, DEMO_CATALOG).await?;
    let [mouse, keyboard, monitor, ..] = products.as_slice() else {
        anyhow::bail!("demo catalog needs at least three products");
    };

    let demo_cart = store
        .cart_for_user(demo.id)
        .await?
        .context("demo cart missing")?;
    store.insert_cart_item(demo_cart.id, mouse.id, 2).await?;
    store.insert_cart_item(demo_cart.id, keyboard.id, 1).await?;

    let demo_lines = vec![
        NewOrderLine {
            product_id: mouse.id,
            quantity: 2,
            unit_price_cents: mouse.price_cents,
        },
        NewOrderLine {
            product_id: keyboard.id,
            quantity: 1,
            unit_price_cents: keyboard.price_cents,
        },
    ];
    store
        .insert_order(NewOrder {
            user_id: demo.id,
            status: OrderStatus::Completed,
            total_cents: 2 * mouse.price_cents + keyboard.price_cents,
            lines: demo_lines,
        })
        .await?;
    store
        .insert_order(NewOrder {
            user_id: student.id,
            status: OrderStatus::Completed,
            total_cents: monitor.price_cents,
            lines: vec![NewOrderLine {
                product_id: monitor.id,
                quantity: 1,
                unit_price_cents: monitor.price_cents,
            }],
        })
        .await?;

    txn.commit().await?;

    let summary = SeedSummary {
        users: 2,
        products: products.len(),
        cart_items: 2,
        orders: 2,
    };
    tracing::info!(?summary, "seeded demo data");
    Ok(summary)
}
