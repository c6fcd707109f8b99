use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::processor::message_processor;

/// Counts consecutive receive failures and tells the loop when to back off.
#[derive(Debug)]
pub struct CircuitBreaker {
    failures: u32,
    max_failures: u32,
}

impl CircuitBreaker {
    pub fn new(max_failures: u32) -> Self {
        Self {
            failures: 0,
            max_failures: max_failures.max(1),
        }
    }

    pub fn record_success(&mut self) {
        self.failures = 0;
    }

    /// Returns the failure count after recording this one.
    pub fn record_failure(&mut self) -> u32 {
        self.failures += 1;
        self.failures
    }

    pub fn is_open(&self) -> bool {
        self.failures >= self.max_failures
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }
}

fn build_consumer(config: &AppConfig) -> anyhow::Result<StreamConsumer> {
    let mut client_config = ClientConfig::new();
    client_config
        .set("bootstrap.servers", &config.kafka_bootstrap_servers)
        .set("group.id", &config.kafka_group_id)
        .set("auto.offset.reset", &config.kafka_auto_offset_reset)
        .set("security.protocol", &config.kafka_security_protocol);

    // Plaintext brokers reject SASL settings.
    if config.kafka_security_protocol.starts_with("SASL") {
        client_config
            .set("sasl.mechanism", &config.kafka_sasl_mechanism)
            .set("sasl.username", &config.kafka_username)
            .set("sasl.password", &config.kafka_password);
    }

    Ok(client_config.create()?)
}

/// Consumes GPS pings and records them, backing off when the broker keeps failing.
pub async fn start_kafka_consumer(config: AppConfig, pool: DbPool) -> anyhow::Result<()> {
    info!("Initializing Kafka consumer for topic: {}", config.kafka_topic);

    let consumer = build_consumer(&config)?;
    consumer.subscribe(&[&config.kafka_topic])?;
    info!("Subscribed to topic: {}", config.kafka_topic);

    let mut breaker = CircuitBreaker::new(config.kafka_max_retries);
    let cooldown = Duration::from_secs(config.kafka_circuit_breaker_cooldown);

    loop {
        if breaker.is_open() {
            warn!(
                "Circuit breaker open after {} consecutive failures, pausing for {}s",
                config.kafka_max_retries, config.kafka_circuit_breaker_cooldown
            );
            tokio::time::sleep(cooldown).await;
            breaker.reset();
            info!("Circuit breaker closed, resuming consumption");
        }

        match consumer.recv().await {
            Ok(m) => {
                breaker.record_success();

                let Some(payload) = m.payload() else {
                    warn!("Received empty payload from Kafka");
                    continue;
                };

                let pool = pool.clone();
                let payload = payload.to_vec();
                tokio::spawn(async move {
                    if let Err(e) = message_processor::process_message(&pool, &payload).await {
                        error!("Error processing ping: {}", e);
                    }
                });
            }
            Err(e) => {
                let failures = breaker.record_failure();
                error!(
                    "Kafka error: {} ({} / {})",
                    e, failures, config.kafka_max_retries
                );
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaker_opens_after_consecutive_failures() {
        let mut breaker = CircuitBreaker::new(3);
        assert_eq!(breaker.record_failure(), 1);
        assert_eq!(breaker.record_failure(), 2);
        assert!(!breaker.is_open());
        assert_eq!(breaker.record_failure(), 3);
        assert!(breaker.is_open());

        breaker.reset();
        assert!(!breaker.is_open());
    }

    #[test]
    fn test_success_clears_failures() {
        let mut breaker = CircuitBreaker::new(2);
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        assert!(!breaker.is_open());
    }

    #[test]
    fn test_zero_retries_still_needs_one_failure() {
        let breaker = CircuitBreaker::new(0);
        assert!(!breaker.is_open());
    }
}
