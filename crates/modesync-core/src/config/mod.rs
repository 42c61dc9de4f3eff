//! Project configuration
//!
//! Sync jobs and the location of the exported configuration are read from
//! layered TOML files (later layers override earlier ones):
//!
//! 1. **Global defaults** - `<config_dir>/modesync/config.toml`
//! 2. **Project config** - `modesync.toml`
//! 3. **Local overrides** - `modesync.local.toml`
//!
//! ```ignore
//! use modesync_core::config::ConfigResolver;
//! use modesync_fs::NormalizedPath;
//!
//! let config = ConfigResolver::new(NormalizedPath::new(".")).resolve()?;
//! let request = config.job("article-forms")?;
//! ```

mod manifest;
mod resolver;

pub use manifest::{CoreSection, JobConfig, Manifest};
pub use resolver::{
    ConfigResolver, DEFAULT_CONFIG_DIR, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, ResolvedConfig,
};
