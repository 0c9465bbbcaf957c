use inventory_api::{
    config::AppConfig,
    db::{create_orm_conn, reset_schema, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url, 1).await?;

    match std::env::args().nth(1).as_deref() {
        None | Some("up") => {
            run_migrations(&orm).await?;
            println!("Migrations applied");
        }
        Some("refresh") => {
            reset_schema(&orm).await?;
            println!("Schema rebuilt");
        }
        Some(other) => anyhow::bail!("unknown command {other:?}; expected `up` or `refresh`"),
    }
    Ok(())
}
