use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub kafka_enabled: bool,
    pub kafka_bootstrap_servers: String,
    pub kafka_topic: String,
    pub kafka_group_id: String,
    pub kafka_auto_offset_reset: String,
    pub kafka_sasl_mechanism: String,
    pub kafka_username: String,
    pub kafka_password: String,
    pub kafka_security_protocol: String,
    pub kafka_max_retries: u32,
    pub kafka_circuit_breaker_cooldown: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    pub http_bind_addr: SocketAddr,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let kafka_enabled = parse_bool(&var("KAFKA_ENABLED", "true"));
        let kafka_bootstrap_servers = var("KAFKA_BOOTSTRAP_SERVERS", "localhost:9092");
        let kafka_topic = var("KAFKA_TOPIC", "fleet-gps-pings");
        let kafka_group_id = var("KAFKA_GROUP_ID", "fleet-travels-consumer");
        let kafka_auto_offset_reset = var("KAFKA_AUTO_OFFSET_RESET", "latest");
        let kafka_sasl_mechanism = var("KAFKA_SASL_MECHANISM", "SCRAM-SHA-256");
        let kafka_username = var("KAFKA_USERNAME", "");
        let kafka_password = var("KAFKA_PASSWORD", "");
        let kafka_security_protocol = var("KAFKA_SECURITY_PROTOCOL", "SASL_PLAINTEXT");
        let kafka_max_retries = var("KAFKA_MAX_RETRIES", "5").parse().unwrap_or(5);
        let kafka_circuit_breaker_cooldown = var("KAFKA_CIRCUIT_BREAKER_COOLDOWN", "300")
            .parse()
            .unwrap_or(300);

        let db_host = var("DB_HOST", "localhost");
        let db_port = var("DB_PORT", "5432");
        let db_name = var("DB_DATABASE", "fleet");
        let db_user = var("DB_USER", "fleet");
        let db_pwd = var("DB_PWD", "fleet");

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );
        let db_max_connections = var("DB_MAX_CONNECTIONS", "50").parse().unwrap_or(50);

        let http_bind_addr = var("HTTP_BIND_ADDR", "0.0.0.0:8080");
        let http_bind_addr = http_bind_addr.parse().with_context(|| {
            format!("HTTP_BIND_ADDR '{}' is not a socket address", http_bind_addr)
        })?;

        let log_level = var("LOG_LEVEL", "info");

        Ok(Self {
            kafka_enabled,
            kafka_bootstrap_servers,
            kafka_topic,
            kafka_group_id,
            kafka_auto_offset_reset,
            kafka_sasl_mechanism,
            kafka_username,
            kafka_password,
            kafka_security_protocol,
            kafka_max_retries,
            kafka_circuit_breaker_cooldown,
            database_url,
            db_max_connections,
            http_bind_addr,
            log_level,
        })
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
