//! Several assembled languages addressed together.

use crate::assembly::{Assembly, EntryRef};
use crate::id::{CategoryAddress, EntryAddress};
use crate::model::Category;
use crate::validate::{ValidationReport, validate};

/// Assembled languages in configured order.
#[derive(Debug, Default)]
pub struct Corpus {
    languages: Vec<Assembly>,
}

impl Corpus {
    /// Create a corpus from assembled languages.
    #[must_use]
    pub fn new(languages: Vec<Assembly>) -> Self {
        Self { languages }
    }

    /// All languages in configured order.
    #[must_use]
    pub fn languages(&self) -> &[Assembly] {
        &self.languages
    }

    /// Look up a language by id.
    #[must_use]
    pub fn language(&self, id: &str) -> Option<&Assembly> {
        self.languages.iter().find(|a| *a.id() == id)
    }

    /// Resolve a category address.
    #[must_use]
    pub fn category(&self, address: &CategoryAddress) -> Option<&Category> {
        self.language(address.language.as_str())?
            .resolve_category(address)
    }

    /// Resolve an entry address.
    #[must_use]
    pub fn entry(&self, address: &EntryAddress) -> Option<EntryRef<'_>> {
        self.language(address.language.as_str())?.resolve(address)
    }

    /// Total number of entries across languages.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.languages
            .iter()
            .map(|a| a.language().entry_count())
            .sum()
    }

    /// Validate every language, merging the reports in language order.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        for assembly in &self.languages {
            report.merge(validate(assembly));
        }
        report
    }
}
