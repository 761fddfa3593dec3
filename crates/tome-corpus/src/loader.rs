//! Loading languages from a [`Storage`] backend.
//!
//! A language is described by a manifest (metadata plus the ordered list of
//! part files). Part files are read and parsed in parallel on the global rayon
//! thread pool; results are collected back in manifest order before assembly,
//! so the assembled category sequence never depends on scheduling.
//!
//! # Formats
//!
//! The format is chosen by file extension: `.yaml`/`.yml` or `.json`.
//! A part file is either a mapping with a `categories` key or a bare list of
//! categories.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tome_storage::{SourceFile, Storage, StorageError, StorageErrorKind};

use crate::assembly::{Assembly, assemble};
use crate::corpus::Corpus;
use crate::id::PartId;
use crate::model::{Category, LanguageManifest, PartModule};

/// Error loading content from storage.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Storage backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// File content does not match the schema.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// File extension is not a supported format.
    #[error("Unsupported content format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    /// No manifest exists for the requested language.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Manifest id does not match the language it was stored under.
    #[error("{path}: manifest declares language '{declared}' but is stored as '{stored}'")]
    IdMismatch {
        path: String,
        declared: String,
        stored: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PartFile {
    Module { categories: Vec<Category> },
    Bare(Vec<Category>),
}

impl PartFile {
    fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Module { categories } | Self::Bare(categories) => categories,
        }
    }
}

/// Parse a file according to its extension.
fn parse<T: DeserializeOwned>(file: &SourceFile) -> Result<T, LoadError> {
    let parse_error = |message: String| LoadError::Parse {
        path: file.path.clone(),
        message,
    };

    match file.extension().as_deref() {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&file.content).map_err(|e| parse_error(e.to_string()))
        }
        Some("json") => serde_json::from_str(&file.content).map_err(|e| parse_error(e.to_string())),
        _ => Err(LoadError::UnsupportedFormat {
            path: file.path.clone(),
        }),
    }
}

/// Loads languages and corpora from a storage backend.
pub struct Loader {
    storage: Arc<dyn Storage>,
}

impl Loader {
    /// Create a loader over a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Ids of every language the backend knows, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Storage`] if discovery fails.
    pub fn languages(&self) -> Result<Vec<String>, LoadError> {
        let mut languages = self.storage.languages()?;
        languages.sort();
        Ok(languages)
    }

    /// Read and parse a language manifest.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownLanguage`] if no manifest exists,
    /// [`LoadError::IdMismatch`] if the manifest names another language, and
    /// parse or storage errors otherwise.
    pub fn load_manifest(&self, language: &str) -> Result<LanguageManifest, LoadError> {
        let file = self.storage.read_manifest(language).map_err(|e| {
            if e.kind == StorageErrorKind::NotFound {
                LoadError::UnknownLanguage(language.to_owned())
            } else {
                LoadError::Storage(e)
            }
        })?;

        let manifest: LanguageManifest = parse(&file)?;
        if manifest.meta.id != language {
            return Err(LoadError::IdMismatch {
                path: file.path,
                declared: manifest.meta.id.to_string(),
                stored: language.to_owned(),
            });
        }
        Ok(manifest)
    }

    /// Read and parse one part file of a language.
    ///
    /// # Errors
    ///
    /// Returns storage, format or parse errors for the file.
    pub fn load_part(&self, language: &str, part: &str) -> Result<PartModule, LoadError> {
        let file = self.storage.read_part(language, part)?;
        let categories = parse::<PartFile>(&file)?.into_categories();

        tracing::debug!(
            language,
            path = %file.path,
            categories = categories.len(),
            "Loaded part"
        );
        Ok(PartModule::new(PartId::new(part), categories))
    }

    /// Load and assemble one language.
    ///
    /// # Errors
    ///
    /// Returns the first error in manifest order if the manifest or any part
    /// fails to load.
    pub fn load_language(&self, language: &str) -> Result<Assembly, LoadError> {
        let manifest = self.load_manifest(language)?;

        let parts = manifest
            .parts
            .par_iter()
            .map(|part| self.load_part(language, part))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(language, parts = parts.len(), "Loaded language");
        Ok(assemble(manifest.meta, parts))
    }

    /// Load several languages into a corpus.
    ///
    /// With a filter, exactly those languages are loaded in the given order;
    /// otherwise every discovered language is loaded in id order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownLanguage`] for a filtered id that storage
    /// does not know, or the first error from [`Self::load_language`].
    pub fn load_corpus(&self, filter: Option<&[String]>) -> Result<Corpus, LoadError> {
        let available = self.languages()?;

        let selected = match filter {
            Some(ids) => {
                if let Some(unknown) = ids.iter().find(|id| !available.contains(id)) {
                    return Err(LoadError::UnknownLanguage(unknown.clone()));
                }
                ids.to_vec()
            }
            None => available,
        };

        let languages = selected
            .iter()
            .map(|id| self.load_language(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Corpus::new(languages))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tome_storage::MockStorage;

    use super::*;

    const MANIFEST: &str = r"
id: javascript
label: JavaScript
color: '#f7df1e'
parts:
  - parts/part1.yaml
  - parts/part2.json
";

    const PART1: &str = r"
categories:
  - id: a
    label: A
    entries:
      - id: e1
        title: First
        difficulty: beginner
        cheatSheetSummary: One.
";

    const PART2: &str = r#"[
  {
    "id": "b",
    "label": "B",
    "entries": [
      {"id": "e2", "title": "Second", "difficulty": "advanced", "cheatSheetSummary": "Two."}
    ]
  }
]"#;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_manifest("javascript", "language.yaml", MANIFEST)
            .with_part("javascript", "parts/part1.yaml", PART1)
            .with_part("javascript", "parts/part2.json", PART2)
    }

    fn loader(storage: MockStorage) -> Loader {
        Loader::new(Arc::new(storage))
    }

    #[test]
    fn test_load_language_assembles_in_manifest_order() {
        let assembly = loader(storage()).load_language("javascript").unwrap();

        assert_eq!(assembly.language().meta.label, "JavaScript");
        assert_eq!(assembly.language().meta.color, "#f7df1e");
        assert_eq!(assembly.flattened_entry_ids(), vec!["e1", "e2"]);
        assert_eq!(
            assembly.origin(0).map(PartId::as_str),
            Some("parts/part1.yaml")
        );
        assert_eq!(
            assembly.origin(1).map(PartId::as_str),
            Some("parts/part2.json")
        );
    }

    #[test]
    fn test_load_language_respects_reversed_manifest_order() {
        let manifest = "id: javascript\nlabel: JavaScript\nparts: [parts/part2.json, parts/part1.yaml]\n";
        let storage = storage().with_manifest("javascript", "language.yaml", manifest);

        let assembly = loader(storage).load_language("javascript").unwrap();

        assert_eq!(assembly.flattened_entry_ids(), vec!["e2", "e1"]);
    }

    #[test]
    fn test_same_file_name_in_different_folders_names_both_parts() {
        let manifest = "id: javascript\nlabel: JavaScript\nparts: [basics/part1.yaml, advanced/part1.yaml]\n";
        let part = |category: &str| {
            format!(
                "- id: {category}\n  label: X\n  entries:\n    - id: duplicate\n      title: D\n      difficulty: beginner\n      cheatSheetSummary: D.\n"
            )
        };
        let storage = MockStorage::new()
            .with_manifest("javascript", "language.yaml", manifest)
            .with_part("javascript", "basics/part1.yaml", &part("a"))
            .with_part("javascript", "advanced/part1.yaml", &part("b"));

        let assembly = loader(storage).load_language("javascript").unwrap();
        let report = crate::validate::validate(&assembly);

        assert_eq!(report.violations().len(), 1);
        let message = report.violations()[0].to_string();
        assert!(message.contains("part 'basics/part1.yaml'"), "{message}");
        assert!(message.contains("part 'advanced/part1.yaml'"), "{message}");
    }

    #[test]
    fn test_load_language_unknown() {
        let err = loader(storage()).load_language("python").unwrap_err();

        assert!(matches!(err, LoadError::UnknownLanguage(id) if id == "python"));
    }

    #[test]
    fn test_load_language_missing_part_is_storage_error() {
        let manifest = "id: javascript\nlabel: JavaScript\nparts: [parts/part1.yaml, parts/part9.yaml]\n";
        let storage = storage().with_manifest("javascript", "language.yaml", manifest);

        let err = loader(storage).load_language("javascript").unwrap_err();

        match err {
            LoadError::Storage(err) => assert_eq!(err.kind, StorageErrorKind::NotFound),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_part_parse_error_names_file() {
        let storage = storage().with_part(
            "javascript",
            "parts/broken.yaml",
            "- id: a\n  label: A\n  entries:\n    - id: e1\n      difficulty: expert\n",
        );

        let err = loader(storage)
            .load_part("javascript", "parts/broken.yaml")
            .unwrap_err();

        assert!(
            matches!(&err, LoadError::Parse { path, .. } if path == "javascript/parts/broken.yaml"),
            "{err:?}"
        );
    }

    #[test]
    fn test_load_part_unsupported_format() {
        let storage = storage().with_part("javascript", "parts/part3.toml", "");

        let err = loader(storage)
            .load_part("javascript", "parts/part3.toml")
            .unwrap_err();

        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_manifest_id_mismatch() {
        let storage = MockStorage::new().with_manifest(
            "javascript",
            "language.yaml",
            "id: typescript\nlabel: TypeScript\n",
        );

        let err = loader(storage).load_manifest("javascript").unwrap_err();

        assert!(matches!(
            err,
            LoadError::IdMismatch { declared, stored, .. } if declared == "typescript" && stored == "javascript"
        ));
    }

    #[test]
    fn test_load_manifest_without_parts_is_empty_language() {
        let storage = MockStorage::new().with_manifest(
            "go",
            "language.json",
            r#"{"id": "go", "label": "Go", "officialUrl": "https://go.dev"}"#,
        );

        let assembly = loader(storage).load_language("go").unwrap();

        assert_eq!(assembly.language().meta.official_url, "https://go.dev");
        assert!(assembly.language().categories.is_empty());
    }

    #[test]
    fn test_load_corpus_all_languages_sorted() {
        let storage = storage().with_manifest("go", "language.yaml", "id: go\nlabel: Go\n");

        let corpus = loader(storage).load_corpus(None).unwrap();

        let ids: Vec<_> = corpus.languages().iter().map(|a| a.id().as_str()).collect();
        assert_eq!(ids, vec!["go", "javascript"]);
    }

    #[test]
    fn test_load_corpus_filter_keeps_order() {
        let storage = storage().with_manifest("go", "language.yaml", "id: go\nlabel: Go\n");
        let filter = vec!["javascript".to_owned(), "go".to_owned()];

        let corpus = loader(storage).load_corpus(Some(&filter)).unwrap();

        let ids: Vec<_> = corpus.languages().iter().map(|a| a.id().as_str()).collect();
        assert_eq!(ids, vec!["javascript", "go"]);
    }

    #[test]
    fn test_load_corpus_filter_unknown_language() {
        let filter = vec!["rust".to_owned()];

        let err = loader(storage()).load_corpus(Some(&filter)).unwrap_err();

        assert!(matches!(err, LoadError::UnknownLanguage(id) if id == "rust"));
    }

    #[test]
    fn test_load_sample_content_directory() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content");
        let loader = Loader::new(Arc::new(tome_storage_fs::FsStorage::new(root)));

        let corpus = loader.load_corpus(None).unwrap();

        let javascript = corpus.language("javascript").unwrap();
        assert_eq!(
            javascript.flattened_entry_ids(),
            vec!["if-else", "for-loops", "closures"]
        );
        assert_eq!(javascript.next("for-loops").unwrap().entry.id, "closures");
        assert!(corpus.validate().is_clean());
    }
}
