use rolling_types::Record;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Default number of slots when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Largest capacity whose slot array can be allocated up front.
pub const MAX_CAPACITY: usize = isize::MAX as usize / std::mem::size_of::<Record>();

/// Construction parameters for a [`RollingStore`](crate::RollingStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of records held at once. Fixed for the store's life.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// A config with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parse a config from a TOML document.
    ///
    /// Missing keys take their default values. The result is validated.
    pub fn from_toml_str(input: &str) -> StoreResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> StoreResult<()> {
        if self.capacity == 0 {
            return Err(StoreError::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(StoreError::InvalidConfig(format!(
                "capacity {} exceeds maximum {MAX_CAPACITY}",
                self.capacity
            )));
        }
        Ok(())
    }
}
