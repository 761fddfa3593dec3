//! Language assembly from part modules, and lookups over the result.
//!
//! [`assemble`] is a pure, order-preserving concatenation: parts in the
//! given order, categories in part order, entries in category order. It never
//! deduplicates or reorders; repeated ids survive assembly and are reported
//! by [`validate`](crate::validate).

use crate::id::{CategoryAddress, EntryAddress, LanguageId, PartId};
use crate::index::LanguageIndex;
use crate::model::{Category, Difficulty, Entry, Language, LanguageMeta, PartModule};

/// Concatenate part modules into a language.
///
/// The flattened entry sequence of the result equals the concatenation of
/// each part's flattened entry sequence, in the order the parts are given.
pub fn assemble(meta: LanguageMeta, parts: impl IntoIterator<Item = PartModule>) -> Assembly {
    let mut categories = Vec::new();
    let mut origins = Vec::new();

    for part in parts {
        tracing::debug!(
            language = %meta.id,
            part = %part.id,
            categories = part.categories.len(),
            "Assembling part"
        );
        origins.extend(std::iter::repeat_n(part.id, part.categories.len()));
        categories.extend(part.categories);
    }

    Assembly::with_origins(Language { meta, categories }, origins)
}

/// An assembled language plus the part each category came from.
///
/// Lookup tables are built once on construction; the language is immutable
/// afterwards.
#[derive(Debug)]
pub struct Assembly {
    language: Language,
    origins: Vec<PartId>,
    index: LanguageIndex,
}

/// Resolved entry with its surrounding context.
#[derive(Clone, Copy, Debug)]
pub struct EntryRef<'a> {
    /// Owning language id.
    pub language: &'a LanguageId,
    /// Category the entry is listed under.
    pub category: &'a Category,
    /// The entry itself.
    pub entry: &'a Entry,
    /// Position in the flattened, assembled entry sequence.
    pub position: usize,
}

impl EntryRef<'_> {
    /// Scoped address of the entry.
    #[must_use]
    pub fn address(&self) -> EntryAddress {
        EntryAddress {
            language: self.language.clone(),
            category: self.category.id.clone(),
            entry: self.entry.id.clone(),
        }
    }
}

impl Assembly {
    fn with_origins(language: Language, origins: Vec<PartId>) -> Self {
        let index = LanguageIndex::build(&language);
        Self {
            language,
            origins,
            index,
        }
    }

    /// The assembled language.
    #[must_use]
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Language id.
    #[must_use]
    pub fn id(&self) -> &LanguageId {
        self.language.id()
    }

    /// Part that contributed the category at `category_index`.
    #[must_use]
    pub fn origin(&self, category_index: usize) -> Option<&PartId> {
        self.origins.get(category_index)
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.index
            .category(id)
            .map(|i| &self.language.categories[i])
    }

    /// Look up an entry by id, anywhere in the language.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<EntryRef<'_>> {
        self.index
            .entry_position(id)
            .and_then(|position| self.entry_at(position))
    }

    /// Entry at a position of the flattened sequence.
    #[must_use]
    pub fn entry_at(&self, position: usize) -> Option<EntryRef<'_>> {
        let slot = self.index.slot(position)?;
        let category = &self.language.categories[slot.category];
        Some(EntryRef {
            language: self.language.id(),
            category,
            entry: &category.entries[slot.entry],
            position,
        })
    }

    /// Resolve a category address.
    ///
    /// Returns `None` if the address belongs to another language.
    #[must_use]
    pub fn resolve_category(&self, address: &CategoryAddress) -> Option<&Category> {
        if address.language != *self.id() {
            return None;
        }
        self.category(address.category.as_str())
    }

    /// Resolve an entry address.
    ///
    /// The language and category of the address must match where the entry
    /// actually lives. A repeated entry id resolves under each category that
    /// holds it.
    #[must_use]
    pub fn resolve(&self, address: &EntryAddress) -> Option<EntryRef<'_>> {
        if address.language != *self.id() {
            return None;
        }
        let first = self.entry(address.entry.as_str())?;
        if first.category.id == address.category {
            return Some(first);
        }

        let collision = self
            .index
            .entry_collisions()
            .iter()
            .find(|c| c.id == address.entry.as_str())?;
        collision
            .positions
            .iter()
            .filter_map(|slot| self.index.slots().iter().position(|s| s == slot))
            .filter_map(|position| self.entry_at(position))
            .find(|found| found.category.id == address.category)
    }

    /// Entry ids in assembled order.
    #[must_use]
    pub fn flattened_entry_ids(&self) -> Vec<&str> {
        self.language.entries().map(|e| e.id.as_str()).collect()
    }

    /// Iterate every entry with its context, in assembled order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRef<'_>> {
        (0..self.index.slots().len()).filter_map(|position| self.entry_at(position))
    }

    /// Entry following `id` in the flattened sequence, crossing categories.
    #[must_use]
    pub fn next(&self, id: &str) -> Option<EntryRef<'_>> {
        let position = self.index.entry_position(id)?;
        self.entry_at(position + 1)
    }

    /// Entry preceding `id` in the flattened sequence, crossing categories.
    #[must_use]
    pub fn previous(&self, id: &str) -> Option<EntryRef<'_>> {
        let position = self.index.entry_position(id)?;
        position.checked_sub(1).and_then(|p| self.entry_at(p))
    }

    /// Entries carrying a tag (ASCII case-insensitive), in assembled order.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = EntryRef<'a>> + 'a {
        self.entries().filter(move |r| r.entry.has_tag(tag))
    }

    /// Entries of a difficulty, in assembled order.
    pub fn with_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = EntryRef<'_>> {
        self.entries()
            .filter(move |r| r.entry.difficulty == difficulty)
    }

    pub(crate) fn index(&self) -> &LanguageIndex {
        &self.index
    }
}
