//! Fixed-capacity slot array with a cyclic write cursor.
//!
//! The ring fills positions `0, 1, …, capacity - 1` in order (the growing
//! phase) and then overwrites them in the same order (the rolling phase).
//! Because slots were filled in insertion order, overwriting by position is
//! also overwriting oldest-first.

use std::fmt;

use rolling_types::Record;

/// Lifecycle state of a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fewer records than capacity; writes append.
    Growing,
    /// Every slot is occupied; writes overwrite the slot under the cursor.
    Rolling,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Growing => f.write_str("growing"),
            Phase::Rolling => f.write_str("rolling"),
        }
    }
}

/// Where a record landed and what it displaced.
#[derive(Debug)]
pub struct Placement {
    /// Slot position now holding the new record.
    pub position: usize,
    /// The record previously in that slot, if the ring was full.
    pub evicted: Option<Record>,
}

/// Fixed-capacity slot array.
///
/// `cursor` is only meaningful in the rolling phase. It is advanced modulo
/// capacity on every overwrite, so it always lies in `[0, capacity)`.
pub struct SlotRing {
    slots: Vec<Record>,
    cursor: usize,
    capacity: usize,
}

impl SlotRing {
    /// Create an empty ring. `capacity` must be non-zero.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            slots: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Store a record, appending while growing and overwriting once full.
    pub fn place(&mut self, record: Record) -> Placement {
        if self.slots.len() < self.capacity {
            let position = self.slots.len();
            self.slots.push(record);
            return Placement {
                position,
                evicted: None,
            };
        }

        let position = self.cursor;
        let evicted = std::mem::replace(&mut self.slots[position], record);
        self.cursor = (self.cursor + 1) % self.capacity;
        Placement {
            position,
            evicted: Some(evicted),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.slots.len() < self.capacity {
            Phase::Growing
        } else {
            Phase::Rolling
        }
    }

    /// Next slot to be overwritten. Meaningful only in [`Phase::Rolling`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of occupied slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record at `position`, if occupied.
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.slots.get(position)
    }

    /// Occupied slots in positional order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.slots.iter()
    }

    /// Owned copy of every occupied slot in positional order.
    pub fn to_vec(&self) -> Vec<Record> {
        self.slots.clone()
    }
}

impl fmt::Debug for SlotRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotRing")
            .field("len", &self.slots.len())
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .finish()
    }
}
