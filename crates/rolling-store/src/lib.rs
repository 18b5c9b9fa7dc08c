//! Bounded, in-memory, rolling storage of named binary records.
//!
//! Producers [`add`](RollingStore::add) records under a name. Once the store
//! holds `capacity` records, each new record overwrites the oldest one.
//! Consumers read either every live record or every live record with a
//! given name.
//!
//! # Structure
//!
//! - [`SlotRing`] -- fixed-capacity slot array with a cyclic write cursor
//! - [`NameIndex`] -- name to slot-position index kept in step with the ring
//! - [`RollingStore`] -- both of the above behind one mutex
//! - [`RecordStore`] -- trait for callers that hold a store as a trait object
//! - [`StoreConfig`] -- construction parameters, loadable from TOML
//!
//! # Design Rules
//!
//! 1. Capacity is fixed at construction and must be non-zero.
//! 2. Overwrites go oldest-first, which is also slot order.
//! 3. A name is indexed only while it has at least one live record.
//! 4. Reads return owned snapshots; payload bytes are shared, not copied.
//! 5. Every operation holds the store lock for its whole duration.

pub mod config;
pub mod error;
pub mod index;
pub mod ring;
pub mod rolling;
pub mod traits;

pub use config::{StoreConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use error::{StoreError, StoreResult};
pub use index::NameIndex;
pub use ring::{Phase, Placement, SlotRing};
pub use rolling::{RollingStore, StoreStats};
pub use traits::RecordStore;

pub use rolling_types::{Record, RecordTime};
