//! Filesystem helpers for modesync
//!
//! Provides slash-normalized paths, locked atomic writes and
//! format-agnostic loading of exported configuration files.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::compute_content_checksum;
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use io::WriteOutcome;
pub use path::NormalizedPath;
