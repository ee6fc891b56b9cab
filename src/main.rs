use color_eyre::eyre::Result;
use dotenv::dotenv;
use fieldsched_api::config::ApiConfig;
use fieldsched_db::{create_pool, pg_repositories, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.pool_settings()).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    fieldsched_api::start_server(config, pg_repositories(db_pool)).await?;

    Ok(())
}
