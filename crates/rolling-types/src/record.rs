use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::time::RecordTime;

/// A named binary record held by the store.
///
/// The payload is never interpreted. Cloning a record is cheap: the
/// payload is a reference-counted [`Bytes`] buffer, so snapshots handed to
/// readers share bytes with the store instead of copying them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    name: String,
    timestamp: RecordTime,
    payload: Bytes,
}

impl Record {
    /// Create a record from its parts.
    pub fn new(
        name: impl Into<String>,
        timestamp: RecordTime,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            timestamp,
            payload: payload.into(),
        }
    }

    /// The name the record was added under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the record entered the store.
    pub fn timestamp(&self) -> RecordTime {
        self.timestamp
    }

    /// The opaque payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Payload length in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Split the record into its parts.
    pub fn into_parts(self) -> (String, RecordTime, Bytes) {
        (self.name, self.timestamp, self.payload)
    }
}
