//! Command implementations.

pub mod entities;
pub mod ingest_all;
pub mod monsters;

pub use self::entities::{execute_entities, run_entity_pipeline, EntityJob};
pub use self::ingest_all::execute_ingest_all;
pub use self::monsters::execute_monsters;
