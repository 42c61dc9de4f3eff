//! Command implementations for modesync-cli
//!
//! Each command returns whether it succeeded; the binary turns `false` into a
//! non-zero exit status.

pub mod check;
pub mod list;
pub mod sync;

pub use check::run_check;
pub use list::run_list;
pub use sync::run_sync;
