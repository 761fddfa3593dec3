//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::storage::{SourceFile, Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Mock";

/// In-memory language and its files.
#[derive(Debug, Default)]
struct MockLanguage {
    manifest: Option<SourceFile>,
    parts: BTreeMap<String, SourceFile>,
}

/// Mock storage for testing.
///
/// Stores manifests and parts in memory. Use the builder methods to configure
/// the mock with test data.
///
/// # Example
///
/// ```ignore
/// use tome_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_manifest("javascript", "language.yaml", "id: javascript\nparts: [part1.yaml]")
///     .with_part("javascript", "part1.yaml", "categories: []");
///
/// let manifest = storage.read_manifest("javascript").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    languages: RwLock<BTreeMap<String, MockLanguage>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a language manifest.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_manifest(
        self,
        language: impl Into<String>,
        file_name: &str,
        content: impl Into<String>,
    ) -> Self {
        let language = language.into();
        let path = format!("{language}/{file_name}");
        self.languages
            .write()
            .unwrap()
            .entry(language)
            .or_default()
            .manifest = Some(SourceFile::new(path, content));
        self
    }

    /// Add a part file to a language.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_part(
        self,
        language: impl Into<String>,
        part: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let language = language.into();
        let part = part.into();
        let path = format!("{language}/{part}");
        self.languages
            .write()
            .unwrap()
            .entry(language)
            .or_default()
            .parts
            .insert(part, SourceFile::new(path, content));
        self
    }
}

impl Storage for MockStorage {
    fn languages(&self) -> Result<Vec<String>, StorageError> {
        let languages = self.languages.read().unwrap();
        Ok(languages
            .iter()
            .filter(|(_, lang)| lang.manifest.is_some())
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn read_manifest(&self, language: &str) -> Result<SourceFile, StorageError> {
        let languages = self.languages.read().unwrap();
        languages
            .get(language)
            .and_then(|lang| lang.manifest.clone())
            .ok_or_else(|| StorageError::not_found(language).with_backend(BACKEND))
    }

    fn read_part(&self, language: &str, part: &str) -> Result<SourceFile, StorageError> {
        if part.contains("..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(part)
                .with_backend(BACKEND));
        }
        let languages = self.languages.read().unwrap();
        languages
            .get(language)
            .and_then(|lang| lang.parts.get(part).cloned())
            .ok_or_else(|| StorageError::not_found(format!("{language}/{part}")).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_languages_lists_only_languages_with_manifest() {
        let storage = MockStorage::new()
            .with_manifest("rust", "language.yaml", "id: rust")
            .with_part("orphan", "part1.yaml", "categories: []")
            .with_manifest("javascript", "language.yaml", "id: javascript");

        assert_eq!(storage.languages().unwrap(), vec!["javascript", "rust"]);
    }

    #[test]
    fn test_read_manifest_returns_path_and_content() {
        let storage = MockStorage::new().with_manifest("javascript", "language.yaml", "id: js");

        let file = storage.read_manifest("javascript").unwrap();

        assert_eq!(file.path, "javascript/language.yaml");
        assert_eq!(file.content, "id: js");
    }

    #[test]
    fn test_read_missing_part_is_not_found() {
        let storage = MockStorage::new().with_manifest("javascript", "language.yaml", "");

        let err = storage.read_part("javascript", "part9.yaml").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_read_part_rejects_traversal() {
        let storage = MockStorage::new();

        let err = storage.read_part("javascript", "../secrets.yaml").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }
}
