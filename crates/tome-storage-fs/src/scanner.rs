//! Language discovery by filesystem walking.
//!
//! A language is a direct child directory of the content root that contains
//! the manifest file. Part files are never discovered here: their set and
//! order come from the manifest.

use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a discovered language directory.
#[derive(Debug, Clone)]
pub(crate) struct LanguageRef {
    /// Language id (directory name).
    pub id: String,
    /// Path to the manifest file.
    pub manifest_path: PathBuf,
}

/// Discovers languages under a content root.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    manifest_name: String,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Content root directory
    /// * `manifest_name` - Name of language manifest files (e.g., "language.yaml")
    pub fn new(source_dir: &Path, manifest_name: &str) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            manifest_name: manifest_name.to_owned(),
        }
    }

    /// Scan the content root and return language references sorted by id.
    ///
    /// Returns an empty Vec if the content root doesn't exist.
    pub fn scan(&self) -> std::io::Result<Vec<LanguageRef>> {
        if !self.source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut refs = Vec::new();
        for entry in fs::read_dir(&self.source_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            // Skip hidden directories
            if name.starts_with('.') || !entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }

            let manifest_path = entry.path().join(&self.manifest_name);
            if manifest_path.is_file() {
                refs.push(LanguageRef {
                    id: name,
                    manifest_path,
                });
            } else {
                tracing::debug!(dir = %entry.path().display(), "Skipping directory without manifest");
            }
        }

        refs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(refs)
    }
}
