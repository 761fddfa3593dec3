//! Identifier value types and scoped addresses.
//!
//! Every category and entry is addressable by a composite key scoped to its
//! language: `language/category` for categories and
//! `language/category/entry` for entries. Ids are newtypes rather than bare
//! strings so the scope of each one is visible in signatures.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Check whether a string is a URL-safe slug.
///
/// Slugs are lowercase ASCII alphanumerics separated by single hyphens
/// (`if-else`, `es2015-modules`).
#[must_use]
pub fn is_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier. No slug check is performed here.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is a URL-safe slug.
            #[must_use]
            pub fn is_slug(&self) -> bool {
                is_slug(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Language identifier (e.g. `javascript`).
    LanguageId
);
string_id!(
    /// Category identifier, unique within a language.
    CategoryId
);
string_id!(
    /// Entry identifier, unique within a language across all parts.
    EntryId
);
string_id!(
    /// Part module identifier (the manifest part path when loaded from storage).
    PartId
);

/// Error parsing an address from its `a/b[/c]` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Wrong number of `/`-separated segments.
    #[error("expected {expected} segments in '{input}', found {found}")]
    SegmentCount {
        /// Raw input.
        input: String,
        /// Required segment count.
        expected: usize,
        /// Actual segment count.
        found: usize,
    },
    /// A segment was empty.
    #[error("empty segment in '{0}'")]
    EmptySegment(String),
}

fn split_segments<const N: usize>(input: &str) -> Result<[&str; N], AddressError> {
    let segments: Vec<&str> = input.trim_matches('/').split('/').collect();
    if segments.len() != N {
        return Err(AddressError::SegmentCount {
            input: input.to_owned(),
            expected: N,
            found: segments.len(),
        });
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(AddressError::EmptySegment(input.to_owned()));
    }
    segments
        .try_into()
        .map_err(|_| AddressError::EmptySegment(input.to_owned()))
}

/// Scoped address of a category: `(language, category)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryAddress {
    /// Owning language.
    pub language: LanguageId,
    /// Category within the language.
    pub category: CategoryId,
}

impl CategoryAddress {
    /// Create a category address.
    #[must_use]
    pub fn new(language: impl Into<LanguageId>, category: impl Into<CategoryId>) -> Self {
        Self {
            language: language.into(),
            category: category.into(),
        }
    }

    /// Address of an entry inside this category.
    #[must_use]
    pub fn entry(&self, entry: impl Into<EntryId>) -> EntryAddress {
        EntryAddress {
            language: self.language.clone(),
            category: self.category.clone(),
            entry: entry.into(),
        }
    }
}

impl fmt::Display for CategoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.category)
    }
}

impl FromStr for CategoryAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [language, category] = split_segments::<2>(s)?;
        Ok(Self::new(language, category))
    }
}

/// Scoped address of an entry: `(language, category, entry)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryAddress {
    /// Owning language.
    pub language: LanguageId,
    /// Category the entry is listed under.
    pub category: CategoryId,
    /// Entry id, unique within the language.
    pub entry: EntryId,
}

impl EntryAddress {
    /// Create an entry address.
    #[must_use]
    pub fn new(
        language: impl Into<LanguageId>,
        category: impl Into<CategoryId>,
        entry: impl Into<EntryId>,
    ) -> Self {
        Self {
            language: language.into(),
            category: category.into(),
            entry: entry.into(),
        }
    }

    /// Address of the owning category.
    #[must_use]
    pub fn category_address(&self) -> CategoryAddress {
        CategoryAddress {
            language: self.language.clone(),
            category: self.category.clone(),
        }
    }
}

impl fmt::Display for EntryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.language, self.category, self.entry)
    }
}

impl FromStr for EntryAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [language, category, entry] = split_segments::<3>(s)?;
        Ok(Self::new(language, category, entry))
    }
}
