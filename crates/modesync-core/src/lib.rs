//! Display synchronization engine for modesync
//!
//! Copies the form or view display of one bundle (its field groups and field
//! components) onto other bundles of the same entity type:
//!
//! - **Model**: displays, components, field groups and field definitions
//! - **Stores**: the [`DisplayStore`], [`FieldSchemaStore`] and
//!   [`FieldGroupStore`] seams, with in-memory and config-directory backends
//! - **Sync**: group and field reconcilers driven by [`SyncEngine`]
//! - **Configuration**: layered `modesync.toml` files naming reusable jobs
//!
//! # Architecture
//!
//! ```text
//!              modesync-cli
//!                   |
//!             modesync-core
//!        +----------+----------+
//!        |          |          |
//!      sync  ->   store   <- config
//!                   |
//!              modesync-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use modesync_core::{ConfigDirStore, DisplayMode, SyncEngine, SyncRequest};
//!
//! let mut store = ConfigDirStore::open("config/sync")?;
//! let request = SyncRequest::new("node", "article", DisplayMode::form("default"))
//!     .with_targets(["page"]);
//! let report = SyncEngine::new(&mut store).sync(&request)?;
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod notify;
pub mod store;
pub mod sync;

pub use config::{ConfigResolver, JobConfig, Manifest, ResolvedConfig};
pub use error::{Error, Result};
pub use loader::DisplayLoader;
pub use model::{
    Component, Display, DisplayContext, DisplayId, DisplayMode, FieldDefinition, FieldGroup,
    FormatType, GroupSettings, Region,
};
pub use notify::{MessageLog, NotificationSink, TracingSink};
pub use store::{
    ConfigDirStore, ConfigStorage, DisplayStore, FieldGroupStore, FieldSchemaStore, MemoryStore,
};
pub use sync::{
    CheckReport, CheckStatus, DriftItem, SyncEngine, SyncEvent, SyncOptions, SyncReport,
    SyncRequest, TargetReport, TargetStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_not_found_displays_the_display_key() {
        let error = Error::SourceNotFound {
            id: "node.article.default".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Source display node.article.default failed to load"
        );
    }

    #[test]
    fn fs_errors_convert_into_core_errors() {
        let fs_error = modesync_fs::Error::UnsupportedFormat {
            extension: "ini".to_string(),
        };
        let error: Error = fs_error.into();
        assert!(matches!(error, Error::Fs(_)));
    }
}
