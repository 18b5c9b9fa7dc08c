use bytes::Bytes;
use rolling_types::Record;

/// A bounded store of named records.
///
/// All implementations must satisfy these invariants:
/// - At most `capacity()` records are live at once.
/// - `by_name(n)` returns exactly the live records named `n`, and `None`
///   when there are none.
/// - The records from `all()` are the disjoint union of `by_name` over every
///   live name.
/// - Snapshots returned by reads are owned; later adds do not change them.
pub trait RecordStore: Send + Sync {
    /// Add a record, evicting the oldest one if the store is full.
    fn add(&self, name: &str, payload: Bytes);

    /// Snapshot of every live record in slot order.
    fn all(&self) -> Vec<Record>;

    /// Every live record named `name`, in unspecified order.
    ///
    /// Returns `None` if no live record has that name.
    fn by_name(&self, name: &str) -> Option<Vec<Record>>;

    /// Number of live records.
    fn len(&self) -> usize;

    /// Maximum number of live records.
    fn capacity(&self) -> usize;

    /// Returns `true` if the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if at least one live record is named `name`.
    ///
    /// Default implementation performs a full lookup. Backends with an index
    /// should override it.
    fn contains_name(&self, name: &str) -> bool {
        self.by_name(name).is_some()
    }

    /// Number of live records named `name`.
    fn count_by_name(&self, name: &str) -> usize {
        self.by_name(name).map_or(0, |records| records.len())
    }
}
