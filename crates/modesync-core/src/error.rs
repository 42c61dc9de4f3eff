//! Error types for modesync-core

/// Result type for modesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, reconciling or persisting displays
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source display of a sync request could not be resolved
    #[error("Source display {id} failed to load")]
    SourceNotFound { id: String },

    /// A target display of a sync request could not be resolved
    #[error("Target display {id} failed to load")]
    TargetNotFound { id: String },

    /// A field group listed on a display could not be loaded
    #[error("Field group {group} not found on {display}")]
    GroupNotFound { group: String, display: String },

    /// The store rejected a write
    #[error("Failed to save {what}: {reason}")]
    Persistence { what: String, reason: String },

    /// A field group record failed validation
    #[error("Invalid field group {group}: {reason}")]
    InvalidGroup { group: String, reason: String },

    /// A display selector was not `form.<mode>` or `view.<mode>`
    #[error("Invalid display mode '{value}': expected form.<mode> or view.<mode>")]
    InvalidDisplayMode { value: String },

    /// A named sync job is not configured
    #[error("No sync job named '{name}' is configured")]
    JobNotFound { name: String },

    /// Configuration is incomplete or inconsistent
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Filesystem error from modesync-fs
    #[error(transparent)]
    Fs(#[from] modesync_fs::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Wrap any failure from a store write as a persistence error.
    pub fn persistence(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Persistence {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}
