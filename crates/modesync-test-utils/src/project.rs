//! [`TestProject`] builder for modesync test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{DisplayFixture, display_file_name, field_yaml};

/// Export directory used by projects without a `[core] config_dir`.
pub const CONFIG_DIR: &str = "config/sync";

/// A temporary project root holding a `config/sync` export directory.
///
/// # Example
///
/// ```rust,no_run
/// use modesync_test_utils::{DisplayFixture, TestProject};
///
/// let project = TestProject::new();
/// project.add_fields("node", &["article", "page"], "field_tags");
/// project.add_display(&DisplayFixture::form("node", "article", "default"));
/// project.assert_file_exists("config/sync/field.field.node.page.field_tags.yml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(CONFIG_DIR)).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join(CONFIG_DIR)
    }

    /// Write `fixture` into the export directory and return its path.
    pub fn add_display(&self, fixture: &DisplayFixture) -> PathBuf {
        let path = self.config_dir().join(fixture.file_name());
        fs::write(&path, fixture.to_yaml()).unwrap();
        path
    }

    pub fn add_field(&self, entity_type: &str, bundle: &str, field_name: &str) {
        let name = format!("field.field.{}.{}.{}.yml", entity_type, bundle, field_name);
        fs::write(
            self.config_dir().join(name),
            field_yaml(entity_type, bundle, field_name),
        )
        .unwrap();
    }

    /// Define `field_name` on each of `bundles`.
    pub fn add_fields(&self, entity_type: &str, bundles: &[&str], field_name: &str) {
        for bundle in bundles {
            self.add_field(entity_type, bundle, field_name);
        }
    }

    /// Write `modesync.toml` at the project root.
    pub fn write_manifest(&self, content: &str) {
        self.write_file("modesync.toml", content);
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Parse a stored display; `context` is `form` or `view`.
    pub fn read_display(&self, context: &str, entity_type: &str, bundle: &str, mode: &str) -> serde_yaml::Value {
        let name = display_file_name(context, entity_type, bundle, mode);
        let content = self.read_file(&format!("{}/{}", CONFIG_DIR, name));
        serde_yaml::from_str(&content).unwrap()
    }

    /// File name to contents for everything in the export directory.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        fs::read_dir(self.config_dir())
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                let name = entry.file_name().to_string_lossy().into_owned();
                (name, fs::read_to_string(entry.path()).unwrap())
            })
            .collect()
    }

    /// # Panics
    /// Panics with a descriptive message if `path` (relative to the root) does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
