//! Bestiary Domain Layer
//!
//! This crate contains the data model shared by every other Bestiary crate.
//! It defines the untrusted input shape, the strict canonical output shape,
//! and the trait boundary to record sources.
//!
//! ## Key Concepts
//!
//! - **RawRecord**: one untyped payload from the wiki bucket API
//! - **RawValue**: the shape of a raw field (absent, scalar, list)
//! - **CanonicalMonster**: the strict, fully typed normalized entity
//! - **EntityMapping**: ID → monster, the terminal artifact of a run
//! - **Base form / versioned form**: entities sharing an ID, with and
//!   without a variant suffix
//!
//! ## Architecture
//!
//! - Pure data types only; no I/O
//! - Normalization logic lives in `bestiary-normalizer`
//! - Fetching lives in `bestiary-wiki`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod mapping;
pub mod monster;
pub mod raw;
pub mod traits;

// Re-exports for convenience
pub use filter::FilterMode;
pub use mapping::{EntityMapping, IndexSummary};
pub use monster::{CanonicalMonster, MonsterId};
pub use raw::{fields, RawRecord, RawValue};
pub use traits::{RecordSource, StaticSource};
