//! Storage abstraction for Tome content corpora.
//!
//! This crate provides a [`Storage`] trait for abstracting where language
//! manifests and part files come from. This enables:
//!
//! - **Unit testing** of corpus loading without touching the real filesystem
//! - **Backend flexibility** (filesystem today, object stores later)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `languages()`, `read_manifest()` and `read_part()`
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `tome-storage-fs` crate.

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{SourceFile, Storage, StorageError, StorageErrorKind};
