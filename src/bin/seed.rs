use inventory_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::seed_demo_data,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let summary = seed_demo_data(&orm).await?;

    println!("Seed completed.");
    println!("   - Created {} users", summary.users);
    println!("   - Created {} products", summary.products);
    println!("   - Created {} cart items", summary.cart_items);
    println!("   - Created {} completed orders", summary.orders);
    Ok(())
}
