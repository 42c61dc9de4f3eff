//! Manifest parsing for modesync.toml files
//!
//! A manifest is one configuration file. Layers are merged into a
//! [`ResolvedConfig`](super::ResolvedConfig) by the resolver.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::model::DisplayMode;

/// `[core]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSection {
    /// Directory holding the exported configuration, relative to the project root
    #[serde(default)]
    pub config_dir: Option<String>,

    /// Entity type used by jobs that do not name one
    #[serde(default)]
    pub entity_type: Option<String>,
}

/// A named, reusable sync request (`[[jobs]]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,

    #[serde(default)]
    pub entity_type: Option<String>,

    /// Source bundle
    pub source: String,

    /// Display selector such as `form.default` or `view.teaser`
    pub display: DisplayMode,

    #[serde(default)]
    pub targets: Vec<String>,
}

/// Configuration parsed from a single modesync.toml
///
/// ```
/// use modesync_core::config::Manifest;
///
/// let manifest = Manifest::parse(r#"
/// [core]
/// entity_type = "node"
///
/// [[jobs]]
/// name = "article-forms"
/// source = "article"
/// display = "form.default"
/// targets = ["page", "blog"]
/// "#).unwrap();
///
/// assert_eq!(manifest.jobs[0].targets, vec!["page", "blog"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub core: CoreSection,

    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Merge `other` on top of this manifest.
    ///
    /// Set core values in `other` win. Jobs are matched by name: a job in
    /// `other` replaces the one with the same name, new jobs are appended.
    pub fn merge(&mut self, other: &Manifest) {
        if other.core.config_dir.is_some() {
            self.core.config_dir = other.core.config_dir.clone();
        }
        if other.core.entity_type.is_some() {
            self.core.entity_type = other.core.entity_type.clone();
        }

        for job in &other.jobs {
            match self.jobs.iter_mut().find(|existing| existing.name == job.name) {
                Some(existing) => *existing = job.clone(),
                None => self.jobs.push(job.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_content_is_default() {
        assert_eq!(Manifest::parse("").unwrap(), Manifest::default());
    }

    #[test]
    fn bad_display_selector_is_rejected() {
        let result = Manifest::parse(
            r#"
[[jobs]]
name = "broken"
source = "article"
display = "teaser"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn merge_replaces_jobs_by_name() {
        let mut base = Manifest::parse(
            r#"
[core]
config_dir = "config/sync"
entity_type = "node"

[[jobs]]
name = "forms"
source = "article"
display = "form.default"
targets = ["page"]

[[jobs]]
name = "teasers"
source = "article"
display = "view.teaser"
targets = ["page"]
"#,
        )
        .unwrap();
        let local = Manifest::parse(
            r#"
[core]
config_dir = "../export"

[[jobs]]
name = "forms"
source = "article"
display = "form.default"
targets = ["page", "blog"]
"#,
        )
        .unwrap();

        base.merge(&local);

        assert_eq!(base.core.config_dir.as_deref(), Some("../export"));
        assert_eq!(base.core.entity_type.as_deref(), Some("node"));
        assert_eq!(base.jobs.len(), 2);
        assert_eq!(base.jobs[0].targets, vec!["page", "blog"]);
        assert_eq!(base.jobs[1].name, "teasers");
    }
}
