//! Value types for the rolling record store.
//!
//! Producers hand the store a name and an opaque payload; the store stamps
//! them into a [`Record`]. Records are immutable values: a slot is only ever
//! replaced wholesale, never edited.
//!
//! # Key Types
//!
//! - [`Record`] -- a `(name, timestamp, payload)` triple
//! - [`RecordTime`] -- wall-clock instant at which a record was stored

pub mod record;
pub mod time;

pub use record::Record;
pub use time::RecordTime;
