//! Shared test fixtures for the modesync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: exported display and field documents
//! - [`project`]: [`TestProject`] builder for a temporary project with a
//!   configuration export directory

pub mod fixtures;
pub mod project;

pub use fixtures::{DisplayFixture, field_yaml};
pub use project::TestProject;
