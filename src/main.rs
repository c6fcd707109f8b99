use fleet_travels::config::AppConfig;
use fleet_travels::{api, db, kafka};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Fleet Travels Service...");

    // Init DB
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    info!("Connected to database");

    db::run_migrations(&pool).await?;
    info!("Migrations applied");

    let http = api::serve(config.http_bind_addr, pool.clone());

    if config.kafka_enabled {
        let consumer = kafka::start_kafka_consumer(config.clone(), pool);
        tokio::try_join!(http, consumer)?;
    } else {
        info!("Kafka ingestion disabled, serving HTTP only");
        http.await?;
    }

    Ok(())
}
