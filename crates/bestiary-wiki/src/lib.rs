//! Bestiary Wiki Layer
//!
//! Network collaborators that feed the normalizer and the entity pipeline.
//!
//! # Architecture
//!
//! - `BucketClient`: paginated fetch of raw monster records from the wiki's
//!   bucket API, with retry and backoff
//! - `EntityFetcher`: per-ID JSON fetch from an item or monster mirror
//! - `load_whitelist`: the ID lists that drive `EntityFetcher`
//!
//! Raw records are returned untouched; every interpretation of their fields
//! happens in `bestiary-normalizer`.

#![warn(missing_docs)]

pub mod bucket;
pub mod entities;
pub mod whitelist;

mod error;

pub use bucket::{BucketClient, WikiConfig};
pub use entities::{EntityBatch, EntityFetcher, EntityKind};
pub use error::{Result, WikiError};
pub use whitelist::load_whitelist;
