//! Filesystem storage implementation for Tome content corpora.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](tome_storage::Storage) trait.
//!
//! # Layout
//!
//! ```text
//! content/
//!   javascript/
//!     language.yaml        # manifest: metadata + ordered part list
//!     parts/
//!       part1.yaml
//!       part2.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tome_storage::Storage;
//! use tome_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("content"));
//! for language in storage.languages()? {
//!     println!("{language}");
//! }
//! ```

mod scanner;

use std::fs;
use std::path::{Component, Path, PathBuf};

use scanner::Scanner;
use tome_storage::{SourceFile, Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default manifest filename.
pub const DEFAULT_MANIFEST_NAME: &str = "language.yaml";

/// Filesystem storage backend.
pub struct FsStorage {
    source_dir: PathBuf,
    manifest_name: String,
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage with the default manifest filename.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Content root containing one directory per language
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_manifest_name(source_dir, DEFAULT_MANIFEST_NAME)
    }

    /// Create a new filesystem storage with a custom manifest filename.
    #[must_use]
    pub fn with_manifest_name(source_dir: PathBuf, manifest_name: &str) -> Self {
        let scanner = Scanner::new(&source_dir, manifest_name);
        Self {
            source_dir,
            manifest_name: manifest_name.to_owned(),
            scanner,
        }
    }

    /// Validate that a relative path stays inside its root.
    ///
    /// Rejects empty paths, absolute paths and any `..` component.
    fn validate_relative(path: &str) -> Result<(), StorageError> {
        let candidate = Path::new(path);
        let escapes = path.is_empty()
            || candidate.components().any(|c| {
                matches!(
                    c,
                    Component::ParentDir | Component::RootDir | Component::Prefix(_)
                )
            });
        if escapes {
            return Err(StorageError::invalid_path(path).with_backend(BACKEND));
        }
        Ok(())
    }

    /// Validate a language id used as a directory name.
    fn validate_language(language: &str) -> Result<(), StorageError> {
        if language.is_empty() || language.starts_with('.') || language.contains(['/', '\\']) {
            return Err(StorageError::invalid_path(language).with_backend(BACKEND));
        }
        Ok(())
    }

    fn read_file(&self, full_path: &Path) -> Result<SourceFile, StorageError> {
        let content = fs::read_to_string(full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.to_path_buf())).with_backend(BACKEND))?;
        let display = full_path
            .strip_prefix(&self.source_dir)
            .unwrap_or(full_path)
            .to_string_lossy()
            .replace('\\', "/");
        Ok(SourceFile::new(display, content))
    }
}

impl Storage for FsStorage {
    fn languages(&self) -> Result<Vec<String>, StorageError> {
        let refs = self.scanner.scan().map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;
        tracing::debug!(count = refs.len(), dir = %self.source_dir.display(), "Discovered languages");
        Ok(refs
            .into_iter()
            .map(|r| {
                tracing::trace!(language = %r.id, manifest = %r.manifest_path.display(), "Found language");
                r.id
            })
            .collect())
    }

    fn read_manifest(&self, language: &str) -> Result<SourceFile, StorageError> {
        Self::validate_language(language)?;
        let path = self.source_dir.join(language).join(&self.manifest_name);
        self.read_file(&path)
    }

    fn read_part(&self, language: &str, part: &str) -> Result<SourceFile, StorageError> {
        Self::validate_language(language)?;
        Self::validate_relative(part)?;
        let path = self.source_dir.join(language).join(part);
        self.read_file(&path)
    }
}
