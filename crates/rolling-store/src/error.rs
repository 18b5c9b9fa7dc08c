/// Errors from store construction, configuration, and self-checks.
///
/// `add`, `all` and `by_name` never fail; an unknown name is an empty
/// lookup, not an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A store must hold at least one record.
    #[error("store capacity must be at least 1")]
    ZeroCapacity,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The slot ring and name index disagree.
    #[error("store inconsistent: {0}")]
    Inconsistent(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
