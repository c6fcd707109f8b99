use tracing::{debug, info, warn};

use crate::db::DbPool;
use crate::models::message::GpsPingMessage;
use crate::processor::ingest::{self, LocationError, PingInput};

impl From<GpsPingMessage> for PingInput {
    fn from(message: GpsPingMessage) -> Self {
        PingInput {
            correlation_id: message.correlation_id(),
            timestamp: message.timestamp_str().map(str::to_string),
            vehicle_id: message.vehicle_id,
            latitude: message.latitude,
            longitude: message.longitude,
        }
    }
}

/// Handles one tracker ping from the bus.
///
/// Bad payloads are logged and dropped so a single malformed message never
/// stalls the consumer; only store failures are returned.
pub async fn process_message(pool: &DbPool, payload: &[u8]) -> anyhow::Result<()> {
    let message: GpsPingMessage = match serde_json::from_slice(payload) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to parse ping: {}", e);
            return Ok(());
        }
    };

    debug!("Processing ping {:?}", message);

    let input = PingInput::from(message);

    match ingest::record_location(pool, None, &input).await {
        Ok(_) => Ok(()),
        Err(LocationError::Duplicate(id)) => {
            info!("Skipping redelivered ping {}", id);
            Ok(())
        }
        Err(LocationError::Store(e)) => Err(e.into()),
        Err(e) => {
            warn!("Dropping ping for vehicle {:?}: {}", input.vehicle_id, e);
            Ok(())
        }
    }
}
