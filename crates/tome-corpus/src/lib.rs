//! Content corpus for Tome: schema, assembly, addressing and validation.
//!
//! This crate provides:
//! - The content schema ([`Entry`], [`Category`], [`PartModule`], [`Language`])
//! - [`assemble`]: order-preserving concatenation of part modules
//! - Scoped identifiers ([`EntryAddress`], [`CategoryAddress`]) and lookups
//! - [`validate`]: a load-time pass reporting every violation at once
//! - [`Loader`]: reading languages from a [`tome_storage::Storage`] backend
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use tome_corpus::{EntryAddress, Loader};
//! use tome_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
//! let corpus = Loader::new(storage).load_corpus(None)?;
//!
//! // Abort on any error-severity violation
//! corpus.validate().into_result(false)?;
//!
//! let address: EntryAddress = "javascript/control-flow/if-else".parse()?;
//! if let Some(found) = corpus.entry(&address) {
//!     println!("{}", found.entry.title);
//! }
//! # Ok(())
//! # }
//! ```

mod assembly;
mod corpus;
mod id;
mod index;
mod loader;
mod model;
mod validate;

pub use assembly::{Assembly, EntryRef, assemble};
pub use corpus::Corpus;
pub use id::{
    AddressError, CategoryAddress, CategoryId, EntryAddress, EntryId, LanguageId, PartId, is_slug,
};
pub use loader::{LoadError, Loader};
pub use model::{
    Category, Challenge, Diagram, DiagramKind, Difficulty, Entry, Language, LanguageManifest,
    LanguageMeta, PartModule, QuizQuestion, Section, UnknownDifficulty,
};
pub use validate::{
    IdKind, Location, Positioned, Severity, ValidationError, ValidationReport, Violation, validate,
};
