//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for retrieving the raw text of language
//! manifests and part files, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! Languages are addressed by id (e.g. `"javascript"`). Parts are addressed by
//! the path written in the manifest, relative to the language root
//! (e.g. `"parts/part1.yaml"`). Backends map these to their own layout.

use std::path::PathBuf;

/// Raw file returned by a storage backend.
///
/// `path` is a display path used in error messages; its extension selects
/// the parser (`.yaml`, `.yml` or `.json`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Display path (e.g., "javascript/language.yaml").
    pub path: String,
    /// File content.
    pub content: String,
}

impl SourceFile {
    /// Create a source file from a path and its content.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Lowercased file extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create an invalid path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidPath).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for corpus content retrieval.
///
/// Implementations only hand back raw text; parsing, assembly and
/// validation happen in the corpus loader.
pub trait Storage: Send + Sync {
    /// List the ids of every language available in this storage.
    ///
    /// Order is unspecified; the loader sorts ids before use.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be listed.
    fn languages(&self) -> Result<Vec<String>, StorageError>;

    /// Read the manifest of a language.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the language or its manifest doesn't exist.
    fn read_manifest(&self, language: &str) -> Result<SourceFile, StorageError>;

    /// Read a part file of a language.
    ///
    /// # Arguments
    ///
    /// * `language` - Language id
    /// * `part` - Part path as written in the manifest, relative to the language root
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the part doesn't exist, can't be read, or
    /// its path escapes the language root.
    fn read_part(&self, language: &str, part: &str) -> Result<SourceFile, StorageError>;
}
