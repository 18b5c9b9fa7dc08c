use std::fmt;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use rolling_types::{Record, RecordTime};
use tracing::{debug, info, trace};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::index::NameIndex;
use crate::ring::{Phase, SlotRing};
use crate::traits::RecordStore;

/// Slot ring and name index, mutated together under one lock.
struct Slots {
    ring: SlotRing,
    index: NameIndex,
}

impl Slots {
    fn insert(&mut self, record: Record) {
        let placement = self.ring.place(record);
        let position = placement.position;

        if let Some(old) = placement.evicted {
            let removed = self.index.remove(old.name(), position);
            debug_assert!(removed, "evicted slot {position} missing from index");
            trace!(position, name = old.name(), "evicted record");
        }

        let placed = self.ring.get(position).expect("placed slot occupied");
        let inserted = self.index.insert(placed.name(), position);
        debug_assert!(inserted, "slot {position} indexed twice");

        #[cfg(debug_assertions)]
        if let Err(e) = self.verify() {
            panic!("{e}");
        }
    }

    fn by_name(&self, name: &str) -> Option<Vec<Record>> {
        let positions = self.index.positions(name)?;
        Some(
            positions
                .iter()
                .map(|&p| self.ring.get(p).cloned().expect("indexed slot occupied"))
                .collect(),
        )
    }

    fn verify(&self) -> StoreResult<()> {
        let len = self.ring.len();
        let capacity = self.ring.capacity();

        if len > capacity {
            return Err(StoreError::Inconsistent(format!(
                "{len} records exceed capacity {capacity}"
            )));
        }
        if self.ring.phase() == Phase::Rolling && self.ring.cursor() >= capacity {
            return Err(StoreError::Inconsistent(format!(
                "cursor {} outside capacity {capacity}",
                self.ring.cursor()
            )));
        }

        for (name, positions) in self.index.iter() {
            if positions.is_empty() {
                return Err(StoreError::Inconsistent(format!(
                    "name {name:?} indexed with no positions"
                )));
            }
            for &p in positions {
                match self.ring.get(p) {
                    Some(record) if record.name() == name => {}
                    Some(record) => {
                        return Err(StoreError::Inconsistent(format!(
                            "slot {p} indexed under {name:?} but holds {:?}",
                            record.name()
                        )));
                    }
                    None => {
                        return Err(StoreError::Inconsistent(format!(
                            "slot {p} indexed under {name:?} is past len {len}"
                        )));
                    }
                }
            }
        }

        // Every indexed position matches its slot's name, so positions are
        // distinct across names. Equal counts then means full coverage.
        let indexed = self.index.position_count();
        if indexed != len {
            return Err(StoreError::Inconsistent(format!(
                "index covers {indexed} positions, ring holds {len}"
            )));
        }
        Ok(())
    }
}

/// Point-in-time summary of a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreStats {
    /// Records currently held.
    pub len: usize,
    /// Maximum records held at once.
    pub capacity: usize,
    /// Distinct live names.
    pub names: usize,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Sum of payload lengths.
    pub total_bytes: u64,
}

/// Bounded in-memory store of named records.
///
/// Records are appended until `capacity` is reached, after which each add
/// overwrites the oldest record. A name index allows fetching every live
/// record with a given name without scanning.
///
/// Every operation holds a single mutex for its whole body, so adds and
/// reads are linearizable and a reader never sees the slots and the index
/// disagree. Reads return owned snapshots; later adds do not affect them.
pub struct RollingStore {
    capacity: usize,
    inner: Mutex<Slots>,
}

impl RollingStore {
    /// Create an empty store holding at most `capacity` records.
    ///
    /// Returns [`StoreError::ZeroCapacity`] if `capacity` is zero and
    /// [`StoreError::InvalidConfig`] if it exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn new(capacity: usize) -> StoreResult<Self> {
        Self::with_config(&StoreConfig::with_capacity(capacity))
    }

    /// Create an empty store from a validated config.
    pub fn with_config(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let capacity = config.capacity;
        info!(capacity, "rolling store created");
        Ok(Self {
            capacity,
            inner: Mutex::new(Slots {
                ring: SlotRing::with_capacity(capacity),
                index: NameIndex::new(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.inner.lock().expect("store lock poisoned")
    }

    /// Add a record, overwriting the oldest one if the store is full.
    ///
    /// The timestamp is read after the lock is acquired.
    pub fn add(&self, name: impl Into<String>, payload: impl Into<Bytes>) {
        let name = name.into();
        let payload = payload.into();

        let mut slots = self.lock();
        let record = Record::new(name, RecordTime::now(), payload);
        let was_growing = slots.ring.phase() == Phase::Growing;
        slots.insert(record);
        if was_growing && slots.ring.phase() == Phase::Rolling {
            debug!(
                capacity = self.capacity,
                "store full, now overwriting oldest records"
            );
        }
    }

    /// Snapshot of every live record in slot order.
    ///
    /// Before the store first fills, slot order is insertion order.
    pub fn all(&self) -> Vec<Record> {
        self.lock().ring.to_vec()
    }

    /// Every live record named `name`, or `None` if there is none.
    ///
    /// The order of the returned records is unspecified.
    pub fn by_name(&self, name: &str) -> Option<Vec<Record>> {
        self.lock().by_name(name)
    }

    /// Every name with at least one live record, sorted.
    pub fn names(&self) -> Vec<String> {
        let slots = self.lock();
        let mut names: Vec<String> = slots.index.names().map(str::to_owned).collect();
        names.sort();
        names
    }

    /// Returns `true` if at least one live record is named `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.lock().index.contains(name)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.lock().ring.len()
    }

    /// Returns `true` if nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.lock().ring.is_empty()
    }

    /// Maximum number of live records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.lock().ring.phase()
    }

    /// Counters describing the current contents.
    pub fn stats(&self) -> StoreStats {
        let slots = self.lock();
        StoreStats {
            len: slots.ring.len(),
            capacity: self.capacity,
            names: slots.index.len(),
            phase: slots.ring.phase(),
            total_bytes: slots.ring.iter().map(|r| r.size() as u64).sum(),
        }
    }

    /// Check that the slots and the name index agree.
    ///
    /// An error here means a bug in the store, not a caller mistake.
    pub fn verify(&self) -> StoreResult<()> {
        self.lock().verify()
    }
}

impl RecordStore for RollingStore {
    fn add(&self, name: &str, payload: Bytes) {
        RollingStore::add(self, name, payload)
    }

    fn all(&self) -> Vec<Record> {
        RollingStore::all(self)
    }

    fn by_name(&self, name: &str) -> Option<Vec<Record>> {
        RollingStore::by_name(self, name)
    }

    fn len(&self) -> usize {
        RollingStore::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains_name(&self, name: &str) -> bool {
        RollingStore::contains_name(self, name)
    }
}

impl fmt::Debug for RollingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("RollingStore")
            .field("capacity", &stats.capacity)
            .field("len", &stats.len)
            .field("names", &stats.names)
            .field("phase", &stats.phase)
            .finish()
    }
}
