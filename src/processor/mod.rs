pub mod ingest;
pub mod message_processor;
