//! Load-time validation of assembled languages.
//!
//! [`validate`] walks a whole [`Assembly`] and collects every violation
//! instead of stopping at the first one, so a single run lists everything an
//! author has to fix. Callers decide whether to abort through
//! [`ValidationReport::into_result`].

use std::collections::HashSet;
use std::fmt;

use crate::assembly::Assembly;
use crate::id::{CategoryId, EntryId, LanguageId, PartId};
use crate::index::EntrySlot;
use crate::model::DiagramKind;

/// How serious a violation is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Reported, but only fails a check that denies warnings.
    Warning,
    /// Always fails a check.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Which kind of identifier a slug violation concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    /// A language id.
    Language,
    /// A category id.
    Category,
    /// An entry id.
    Entry,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Language => "language",
            Self::Category => "category",
            Self::Entry => "entry",
        })
    }
}

/// An item and its position among its siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Positioned<T> {
    /// Zero-based position among siblings.
    pub index: usize,
    /// Declared id.
    pub id: T,
}

/// Where in the corpus a violation was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Owning language.
    pub language: LanguageId,
    /// Part module that contributed the category, when known.
    pub part: Option<PartId>,
    /// Category position within the assembled language.
    pub category: Option<Positioned<CategoryId>>,
    /// Entry position within its category.
    pub entry: Option<Positioned<EntryId>>,
}

impl Location {
    fn language(language: &LanguageId) -> Self {
        Self {
            language: language.clone(),
            part: None,
            category: None,
            entry: None,
        }
    }

    fn category(assembly: &Assembly, category_index: usize) -> Self {
        let category = &assembly.language().categories[category_index];
        Self {
            language: assembly.id().clone(),
            part: assembly.origin(category_index).cloned(),
            category: Some(Positioned {
                index: category_index,
                id: category.id.clone(),
            }),
            entry: None,
        }
    }

    fn entry(assembly: &Assembly, slot: EntrySlot) -> Self {
        let entry = &assembly.language().categories[slot.category].entries[slot.entry];
        Self {
            entry: Some(Positioned {
                index: slot.entry,
                id: entry.id.clone(),
            }),
            ..Self::category(assembly, slot.category)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(part) = &self.part {
            write!(f, " > part '{part}'")?;
        }
        if let Some(category) = &self.category {
            write!(f, " > category #{} '{}'", category.index, category.id)?;
        }
        if let Some(entry) = &self.entry {
            write!(f, " > entry #{} '{}'", entry.index, entry.id)?;
        }
        Ok(())
    }
}

fn join_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single authoring problem.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Violation {
    /// An id is not a URL-safe slug.
    #[error("{location}: {kind} id '{id}' is not a URL-safe slug")]
    InvalidSlug {
        location: Location,
        kind: IdKind,
        id: String,
    },

    /// A category id appears more than once in a language.
    #[error("category id '{id}' is declared {} times: {}", .locations.len(), join_locations(.locations))]
    DuplicateCategoryId { id: String, locations: Vec<Location> },

    /// An entry id appears more than once in a language.
    #[error("entry id '{id}' is declared {} times: {}", .locations.len(), join_locations(.locations))]
    DuplicateEntryId { id: String, locations: Vec<Location> },

    /// A quiz answer index does not point into its options.
    #[error(
        "{location}: quiz question #{question} has correctIndex {correct_index} but {options} option(s)"
    )]
    QuizIndexOutOfRange {
        location: Location,
        question: usize,
        correct_index: usize,
        options: usize,
    },

    /// A highlighted line is outside the section's code sample.
    #[error(
        "{location}: section #{section} highlights line {line} but its code has {line_count} line(s)"
    )]
    HighlightLineOutOfRange {
        location: Location,
        section: usize,
        line: usize,
        line_count: usize,
    },

    /// A diagram lacks the payload its kind needs.
    #[error("{location}: section #{section} has a {kind} diagram without `{missing}`")]
    MissingDiagramPayload {
        location: Location,
        section: usize,
        kind: DiagramKind,
        missing: &'static str,
    },

    /// A tag is repeated within one entry.
    #[error("{location}: tag '{tag}' is listed more than once")]
    DuplicateTag { location: Location, tag: String },
}

impl Violation {
    /// Severity of this violation.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::DuplicateTag { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Every violation found in one or more languages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// All violations in discovery order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Error-severity violations.
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Error)
    }

    /// Warning-severity violations.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Warning)
    }

    /// True when there are no errors (warnings allowed).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// True when there are no violations at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Append another report.
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// Fail if there are errors, or any violation when `deny_warnings` is set.
    ///
    /// On success the report is handed back so warnings can still be shown.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violation.
    pub fn into_result(self, deny_warnings: bool) -> Result<Self, ValidationError> {
        let failed = if deny_warnings {
            !self.is_clean()
        } else {
            !self.is_ok()
        };
        if failed {
            Err(ValidationError {
                violations: self.violations,
            })
        } else {
            Ok(self)
        }
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Validation failure listing every violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content validation failed with {} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {}: {violation}", violation.severity())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validate an assembled language.
#[must_use]
pub fn validate(assembly: &Assembly) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_slugs(assembly, &mut report);
    check_collisions(assembly, &mut report);
    check_entries(assembly, &mut report);

    tracing::debug!(
        language = %assembly.id(),
        violations = report.violations.len(),
        "Validated language"
    );
    report
}

fn check_slugs(assembly: &Assembly, report: &mut ValidationReport) {
    let language = assembly.language();
    if !language.id().is_slug() {
        report.push(Violation::InvalidSlug {
            location: Location::language(language.id()),
            kind: IdKind::Language,
            id: language.id().to_string(),
        });
    }

    for (c, category) in language.categories.iter().enumerate() {
        if !category.id.is_slug() {
            report.push(Violation::InvalidSlug {
                location: Location::category(assembly, c),
                kind: IdKind::Category,
                id: category.id.to_string(),
            });
        }
        for (e, entry) in category.entries.iter().enumerate() {
            if !entry.id.is_slug() {
                report.push(Violation::InvalidSlug {
                    location: Location::entry(assembly, EntrySlot { category: c, entry: e }),
                    kind: IdKind::Entry,
                    id: entry.id.to_string(),
                });
            }
        }
    }
}

fn check_collisions(assembly: &Assembly, report: &mut ValidationReport) {
    let index = assembly.index();

    for collision in index.category_collisions() {
        report.push(Violation::DuplicateCategoryId {
            id: collision.id.clone(),
            locations: collision
                .positions
                .iter()
                .map(|&c| Location::category(assembly, c))
                .collect(),
        });
    }

    for collision in index.entry_collisions() {
        report.push(Violation::DuplicateEntryId {
            id: collision.id.clone(),
            locations: collision
                .positions
                .iter()
                .map(|&slot| Location::entry(assembly, slot))
                .collect(),
        });
    }
}

fn check_entries(assembly: &Assembly, report: &mut ValidationReport) {
    for &slot in assembly.index().slots() {
        let entry = &assembly.language().categories[slot.category].entries[slot.entry];
        let location = || Location::entry(assembly, slot);

        for (q, question) in entry.quiz.iter().flatten().enumerate() {
            if question.correct_index >= question.options.len() {
                report.push(Violation::QuizIndexOutOfRange {
                    location: location(),
                    question: q,
                    correct_index: question.correct_index,
                    options: question.options.len(),
                });
            }
        }

        for (s, section) in entry.sections.iter().enumerate() {
            let line_count = section.line_count();
            for &line in section.code_highlight_lines.iter().flatten() {
                if line == 0 || line > line_count {
                    report.push(Violation::HighlightLineOutOfRange {
                        location: location(),
                        section: s,
                        line,
                        line_count,
                    });
                }
            }

            if let Some(diagram) = &section.diagram
                && let Some(missing) = diagram.missing_payload()
            {
                report.push(Violation::MissingDiagramPayload {
                    location: location(),
                    section: s,
                    kind: diagram.kind,
                    missing,
                });
            }
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for tag in &entry.tags {
            if !seen.insert(tag.as_str()) && reported.insert(tag.as_str()) {
                report.push(Violation::DuplicateTag {
                    location: location(),
                    tag: tag.clone(),
                });
            }
        }
    }
}
