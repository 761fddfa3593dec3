//! Uniqueness-checked lookup tables over an assembled language.
//!
//! Categories and entries are stored once in [`Language`]; the index keeps
//! only positions. Every id is inserted into a map keyed by the id string:
//! the first registration wins lookups and every later registration is
//! recorded as a collision so validation can report all of them.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use crate::model::Language;

/// Position of an entry in the assembled language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EntrySlot {
    /// Index into `Language::categories`.
    pub category: usize,
    /// Index into `Category::entries`.
    pub entry: usize,
}

/// An id registered more than once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Collision<T> {
    pub id: String,
    /// Every position holding the id, in assembled order.
    pub positions: Vec<T>,
}

/// Lookup tables built once per assembly.
#[derive(Debug, Default)]
pub(crate) struct LanguageIndex {
    categories: HashMap<String, usize>,
    entries: HashMap<String, usize>,
    flat: Vec<EntrySlot>,
    category_collisions: Vec<Collision<usize>>,
    entry_collisions: Vec<Collision<EntrySlot>>,
}

/// Insert every `(id, position)` pair, grouping repeated ids.
///
/// Returns the first-registration map and the collisions in order of the
/// first duplicate's first occurrence.
fn register<T: Copy>(
    items: impl Iterator<Item = (String, T)>,
    slot_of: impl Fn(&T) -> usize,
) -> (HashMap<String, usize>, Vec<Collision<T>>) {
    let mut first: HashMap<String, usize> = HashMap::new();
    let mut repeated: HashMap<String, usize> = HashMap::new();
    let mut collisions: Vec<Collision<T>> = Vec::new();
    let mut seen: Vec<T> = Vec::new();

    for (id, position) in items {
        seen.push(position);
        match first.entry(id) {
            MapEntry::Vacant(vacant) => {
                vacant.insert(seen.len() - 1);
            }
            MapEntry::Occupied(occupied) => {
                let id = occupied.key().clone();
                let original = seen[*occupied.get()];
                match repeated.entry(id.clone()) {
                    MapEntry::Occupied(existing) => {
                        collisions[*existing.get()].positions.push(position);
                    }
                    MapEntry::Vacant(vacant) => {
                        vacant.insert(collisions.len());
                        collisions.push(Collision {
                            id,
                            positions: vec![original, position],
                        });
                    }
                }
            }
        }
    }

    let lookup = first
        .into_iter()
        .map(|(id, i)| (id, slot_of(&seen[i])))
        .collect();
    (lookup, collisions)
}

impl LanguageIndex {
    /// Build the index for a language.
    pub(crate) fn build(language: &Language) -> Self {
        let flat: Vec<EntrySlot> = language
            .categories
            .iter()
            .enumerate()
            .flat_map(|(c, category)| {
                (0..category.entries.len()).map(move |e| EntrySlot {
                    category: c,
                    entry: e,
                })
            })
            .collect();

        let (categories, category_collisions) = register(
            language
                .categories
                .iter()
                .enumerate()
                .map(|(i, category)| (category.id.as_str().to_owned(), i)),
            |&i| i,
        );

        let (entries, entry_collisions) = register(
            flat.iter().enumerate().map(|(position, slot)| {
                let entry = &language.categories[slot.category].entries[slot.entry];
                (entry.id.as_str().to_owned(), (position, *slot))
            }),
            |&(position, _)| position,
        );
        let entry_collisions = entry_collisions
            .into_iter()
            .map(|c| Collision {
                id: c.id,
                positions: c.positions.into_iter().map(|(_, slot)| slot).collect(),
            })
            .collect::<Vec<_>>();

        for collision in &category_collisions {
            tracing::warn!(
                language = %language.id(),
                category = %collision.id,
                count = collision.positions.len(),
                "Category id registered more than once"
            );
        }
        for collision in &entry_collisions {
            tracing::warn!(
                language = %language.id(),
                entry = %collision.id,
                count = collision.positions.len(),
                "Entry id registered more than once"
            );
        }

        Self {
            categories,
            entries,
            flat,
            category_collisions,
            entry_collisions,
        }
    }

    /// Category index by id (first registration).
    pub(crate) fn category(&self, id: &str) -> Option<usize> {
        self.categories.get(id).copied()
    }

    /// Flat position by entry id (first registration).
    pub(crate) fn entry_position(&self, id: &str) -> Option<usize> {
        self.entries.get(id).copied()
    }

    /// Slot at a flat position.
    pub(crate) fn slot(&self, position: usize) -> Option<EntrySlot> {
        self.flat.get(position).copied()
    }

    /// All slots in assembled order.
    pub(crate) fn slots(&self) -> &[EntrySlot] {
        &self.flat
    }

    pub(crate) fn category_collisions(&self) -> &[Collision<usize>] {
        &self.category_collisions
    }

    pub(crate) fn entry_collisions(&self) -> &[Collision<EntrySlot>] {
        &self.entry_collisions
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::fixtures::{category, meta};

    fn language(categories: Vec<crate::model::Category>) -> Language {
        Language {
            meta: meta("javascript"),
            categories,
        }
    }

    #[test]
    fn test_build_empty_language() {
        let index = LanguageIndex::build(&language(Vec::new()));

        assert!(index.slots().is_empty());
        assert!(index.category("anything").is_none());
        assert!(index.entry_collisions().is_empty());
    }

    #[test]
    fn test_flat_slots_follow_assembled_order() {
        let index = LanguageIndex::build(&language(vec![
            category("a", &["e1", "e2"]),
            category("b", &[]),
            category("c", &["e3"]),
        ]));

        assert_eq!(
            index.slots(),
            &[
                EntrySlot { category: 0, entry: 0 },
                EntrySlot { category: 0, entry: 1 },
                EntrySlot { category: 2, entry: 0 },
            ]
        );
        assert_eq!(index.entry_position("e3"), Some(2));
        assert_eq!(index.category("c"), Some(2));
    }

    #[test]
    fn test_first_registration_wins() {
        let index = LanguageIndex::build(&language(vec![
            category("a", &["dup"]),
            category("b", &["dup"]),
        ]));

        assert_eq!(index.entry_position("dup"), Some(0));
    }

    #[test]
    fn test_entry_collision_groups_all_positions() {
        let index = LanguageIndex::build(&language(vec![
            category("a", &["dup", "x"]),
            category("b", &["dup"]),
            category("c", &["dup", "x"]),
        ]));

        let collisions = index.entry_collisions();
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[0].id, "dup");
        assert_eq!(
            collisions[0].positions,
            vec![
                EntrySlot { category: 0, entry: 0 },
                EntrySlot { category: 1, entry: 0 },
                EntrySlot { category: 2, entry: 0 },
            ]
        );
        assert_eq!(collisions[1].id, "x");
        assert_eq!(collisions[1].positions.len(), 2);
    }

    #[test]
    fn test_category_collision() {
        let index = LanguageIndex::build(&language(vec![
            category("basics", &["a"]),
            category("basics", &["b"]),
        ]));

        assert_eq!(index.category("basics"), Some(0));
        assert_eq!(index.category_collisions().len(), 1);
        assert_eq!(index.category_collisions()[0].positions, vec![0, 1]);
    }
}
