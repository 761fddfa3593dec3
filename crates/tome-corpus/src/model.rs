//! Content schema: entries, categories, part modules and languages.
//!
//! Field names are camelCase on the wire (`cheatSheetSummary`,
//! `codeHighlightLines`, `correctIndex`, ...). Optional annotations are
//! omitted when absent, so serializing and parsing back yields an equal value.

use serde::{Deserialize, Serialize};

use crate::id::{CategoryId, EntryId, LanguageId, PartId};

/// Difficulty tag of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Wire name of the difficulty.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Difficulty`] from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected beginner, intermediate or advanced)")]
pub struct UnknownDifficulty(pub String);

impl std::str::FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(UnknownDifficulty(other.to_owned())),
        }
    }
}

/// Diagram format, interpreted by the diagram renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    /// Graph-description text carried in `code`.
    Mermaid,
    /// Structured data carried in `data`.
    Custom,
}

impl std::fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Mermaid => "mermaid",
            Self::Custom => "custom",
        })
    }
}

/// Diagram descriptor attached to a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    /// Payload format.
    pub kind: DiagramKind,
    /// Renderer-specific discriminator for custom diagrams.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub diagram_type: Option<String>,
    /// Graph-description text, required for mermaid diagrams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Structured payload, required (non-null) for custom diagrams.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
    /// Text shown under the diagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Diagram {
    /// Name of the payload field this diagram's kind requires, if it is missing.
    #[must_use]
    pub fn missing_payload(&self) -> Option<&'static str> {
        match self.kind {
            DiagramKind::Mermaid if self.code.as_deref().is_none_or(str::is_empty) => Some("code"),
            DiagramKind::Custom if self.data.is_null() => Some("data"),
            _ => None,
        }
    }
}

/// One content block of an entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section title.
    pub heading: String,
    /// Body prose.
    pub content: String,
    /// Illustrative code sample.
    pub code: String,
    /// Literal expected output of `code`.
    pub output: String,
    /// Optional callout: a practical tip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    /// Optional callout: a pitfall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Optional callout: an aside.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Optional callout: an everyday comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analogy: Option<String>,
    /// Optional illustration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Diagram>,
    /// 1-based line numbers of `code` to highlight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_highlight_lines: Option<Vec<usize>>,
}

impl Section {
    /// Number of lines in the code sample.
    ///
    /// A single trailing newline does not start a new line; empty code has
    /// no lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.code.is_empty() {
            return 0;
        }
        let code = self.code.strip_suffix('\n').unwrap_or(&self.code);
        code.split('\n').count()
    }
}

/// Multiple-choice quiz question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text.
    pub question: String,
    /// Answer choices, in display order.
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_index: usize,
    /// Shown after answering.
    pub explanation: String,
}

impl QuizQuestion {
    /// The correct option, if `correct_index` is in range.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// Coding exercise attached to an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Task description.
    pub prompt: String,
    /// Code the learner starts from.
    pub starter_code: String,
    /// Reference solution.
    pub solution: String,
    /// Progressive hints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// A single documentation page describing one language feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Slug, unique within the language.
    pub id: EntryId,
    /// Display title.
    pub title: String,
    /// Difficulty tag.
    pub difficulty: Difficulty,
    /// Free-form tags, matched case-insensitively.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// One-line summary for cheat sheets.
    pub cheat_sheet_summary: String,
    /// Content blocks, in reading order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    /// Optional quiz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<QuizQuestion>>,
    /// Optional coding exercise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
}

impl Entry {
    /// Whether any tag matches, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Number of quiz questions (zero without a quiz).
    #[must_use]
    pub fn quiz_len(&self) -> usize {
        self.quiz.as_ref().map_or(0, Vec::len)
    }
}

/// Named, ordered group of entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Slug, unique within the language.
    pub id: CategoryId,
    /// Display label.
    pub label: String,
    /// Opaque icon reference for the rendering layer.
    #[serde(default)]
    pub icon: String,
    /// Entries, in reading order.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Authoring-time group of categories, merged at assembly time.
#[derive(Clone, Debug, PartialEq)]
pub struct PartModule {
    /// Where the part came from.
    pub id: PartId,
    /// Categories, in authored order.
    pub categories: Vec<Category>,
}

impl PartModule {
    /// Create a part module.
    #[must_use]
    pub fn new(id: impl Into<PartId>, categories: Vec<Category>) -> Self {
        Self {
            id: id.into(),
            categories,
        }
    }
}

/// Display metadata of a language, opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageMeta {
    /// Slug, unique within the corpus.
    pub id: LanguageId,
    /// Display name.
    pub label: String,
    /// Icon reference.
    #[serde(default)]
    pub icon: String,
    /// Brand color.
    #[serde(default)]
    pub color: String,
    /// Link to the language's documentation.
    #[serde(default)]
    pub official_url: String,
    /// Short pitch.
    #[serde(default)]
    pub tagline: String,
    /// Link to an online playground.
    #[serde(default)]
    pub playground_url: String,
    /// Identifier understood by the code execution service.
    #[serde(default)]
    pub execution_api_id: String,
}

/// Authored language config: metadata plus the part files in assembly order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageManifest {
    /// Display metadata, inlined in the manifest.
    #[serde(flatten)]
    pub meta: LanguageMeta,
    /// Part files relative to the language root, in assembly order.
    #[serde(default)]
    pub parts: Vec<String>,
}

/// Top-level per-language aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Display metadata.
    #[serde(flatten)]
    pub meta: LanguageMeta,
    /// Assembled categories, in reading order.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Language {
    /// Language id.
    #[must_use]
    pub fn id(&self) -> &LanguageId {
        &self.meta.id
    }

    /// Iterate every entry in assembled order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    /// Total number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_entry_from_yaml() {
        let yaml = r#"
id: if-else
title: if / else
difficulty: beginner
tags: [control-flow, conditionals]
cheatSheetSummary: Branch on a condition.
sections:
  - heading: Basics
    content: Runs a block when the condition is truthy.
    code: |
      if (x > 1) {
        console.log("big");
      }
    output: big
    tip: Prefer strict equality.
    codeHighlightLines: [1, 3]
quiz:
  - question: What does `if ("")` do?
    options: [Runs, Skips]
    correctIndex: 1
    explanation: Empty strings are falsy.
challenge:
  prompt: Print even or odd.
  starterCode: "function parity(n) {}"
  solution: "function parity(n) { return n % 2 ? 'odd' : 'even'; }"
  hints: [Use the remainder operator.]
"#;
        let entry: Entry = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(entry.id, "if-else");
        assert_eq!(entry.difficulty, Difficulty::Beginner);
        assert_eq!(entry.tags, vec!["control-flow", "conditionals"]);
        assert_eq!(entry.sections[0].code_highlight_lines, Some(vec![1, 3]));
        assert_eq!(entry.sections[0].line_count(), 3);
        assert_eq!(entry.quiz_len(), 1);
        assert_eq!(entry.quiz.as_ref().unwrap()[0].correct_option(), Some("Skips"));
        assert_eq!(entry.challenge.unwrap().hints.len(), 1);
    }

    #[test]
    fn test_parse_rejects_unknown_difficulty() {
        let yaml = "id: x\ntitle: X\ndifficulty: expert\ncheatSheetSummary: s\n";
        let result: Result<Entry, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_missing_required_field() {
        let json = r#"{"id": "x", "difficulty": "beginner", "cheatSheetSummary": "s"}"#;
        let result: Result<Entry, _> = serde_json::from_str(json);
        assert!(result.unwrap_err().to_string().contains("title"));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
        assert_eq!(
            "Advanced".parse::<Difficulty>(),
            Err(UnknownDifficulty("Advanced".to_owned()))
        );
    }

    #[test]
    fn test_line_count() {
        assert_eq!(section("").line_count(), 0);
        assert_eq!(section("one").line_count(), 1);
        assert_eq!(section("one\n").line_count(), 1);
        assert_eq!(section("one\ntwo").line_count(), 2);
        assert_eq!(section("one\n\nthree\n").line_count(), 3);
    }

    #[test]
    fn test_diagram_missing_payload() {
        let mermaid = Diagram {
            kind: DiagramKind::Mermaid,
            diagram_type: None,
            code: None,
            data: serde_json::Value::Null,
            caption: Some("Flow".to_owned()),
        };
        assert_eq!(mermaid.missing_payload(), Some("code"));

        let custom = Diagram {
            kind: DiagramKind::Custom,
            diagram_type: Some("event-loop".to_owned()),
            code: None,
            data: serde_json::json!({"queue": ["a", "b"]}),
            caption: None,
        };
        assert_eq!(custom.missing_payload(), None);

        let empty = Diagram {
            data: serde_json::Value::Null,
            ..custom
        };
        assert_eq!(empty.missing_payload(), Some("data"));
    }

    #[test]
    fn test_optional_fields_omitted_when_serialized() {
        let value = serde_json::to_value(entry("closures")).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("cheatSheetSummary"));
        assert!(!object.contains_key("quiz"));
        assert!(!object.contains_key("challenge"));
        assert!(!object.contains_key("tags"));
        assert!(!object["sections"][0].as_object().unwrap().contains_key("tip"));
    }

    #[test]
    fn test_language_meta_flattened() {
        let language = Language {
            meta: LanguageMeta {
                official_url: "https://tc39.es".to_owned(),
                execution_api_id: "nodejs".to_owned(),
                ..meta("javascript")
            },
            categories: vec![category("basics", &["variables"])],
        };

        let value = serde_json::to_value(&language).unwrap();

        assert_eq!(value["id"], "javascript");
        assert_eq!(value["officialUrl"], "https://tc39.es");
        assert_eq!(value["executionApiId"], "nodejs");
        assert_eq!(value["categories"][0]["entries"][0]["id"], "variables");
    }

    #[test]
    fn test_manifest_parts_in_order() {
        let yaml = "id: javascript\nlabel: JavaScript\nparts:\n  - parts/part2.yaml\n  - parts/part1.yaml\n";
        let manifest: LanguageManifest = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(manifest.meta.id, "javascript");
        assert_eq!(manifest.parts, vec!["parts/part2.yaml", "parts/part1.yaml"]);
    }

    #[test]
    fn test_entries_iterates_in_order() {
        let language = Language {
            meta: meta("javascript"),
            categories: vec![category("a", &["e1", "e2"]), category("b", &["e3"])],
        };

        let ids: Vec<_> = language.entries().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["e1", "e2", "e3"]);
        assert_eq!(language.entry_count(), 3);
    }
}
