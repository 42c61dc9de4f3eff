//! Slash-normalized paths for configuration directories

use std::path::{Path, PathBuf};

/// A path stored with forward slashes.
///
/// Configuration file names are compared and joined in this form and only
/// converted to a platform path when touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a path, converting backslashes to forward slashes.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self {
            inner: raw.replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform-native form for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let inner = if self.inner.is_empty() {
            segment
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner }
    }

    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Last path component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Extension of the last component, without the dot.
    ///
    /// Dotfiles such as `.hidden` have no extension.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new(r"config\sync\core.entity_form_display.node.page.default.yml");
        assert_eq!(
            path.as_str(),
            "config/sync/core.entity_form_display.node.page.default.yml"
        );
    }

    #[test]
    fn join_inserts_single_separator() {
        let base = NormalizedPath::new("config/sync/");
        assert_eq!(base.join("a.yml").as_str(), "config/sync/a.yml");

        let base = NormalizedPath::new("config/sync");
        assert_eq!(base.join("a.yml").as_str(), "config/sync/a.yml");
    }

    #[test]
    fn parent_of_root_child_is_root() {
        assert_eq!(NormalizedPath::new("/sync").parent().unwrap().as_str(), "/");
        assert!(NormalizedPath::new("sync").parent().is_none());
    }

    #[rstest]
    #[case("config/field.field.node.page.body.yml", Some("yml"))]
    #[case("config/modesync.toml", Some("toml"))]
    #[case("config/.hidden", None)]
    #[case("config/README", None)]
    fn extension_cases(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(NormalizedPath::new(input).extension(), expected);
    }
}
