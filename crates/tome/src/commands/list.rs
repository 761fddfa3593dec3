//! `tome list` command implementation.

use clap::Args;
use tome_config::CliSettings;
use tome_corpus::{Assembly, Corpus, Difficulty, EntryRef};

use super::{ContentArgs, loader};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Language to list in full (default: summary of every language).
    language: Option<String>,

    /// Only list entries of this difficulty.
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Only list entries carrying this tag (case-insensitive).
    #[arg(short, long)]
    tag: Option<String>,

    #[command(flatten)]
    content: ContentArgs,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.content.load_config(CliSettings::default())?;
        let loader = loader(&config);
        let filtered = self.difficulty.is_some() || self.tag.is_some();

        let corpus = if let Some(language) = &self.language {
            Corpus::new(vec![loader.load_language(language)?])
        } else {
            let corpus = loader.load_corpus(config.content_resolved.languages.as_deref())?;
            if corpus.languages().is_empty() {
                output.warning(&format!(
                    "No languages found in {}",
                    config.content_resolved.source_dir.display()
                ));
            }
            corpus
        };

        for assembly in corpus.languages() {
            if filtered {
                let found = matching(assembly, self.difficulty, self.tag.as_deref());
                output.heading(&format!(
                    "{} ({}): {} matching entries",
                    assembly.language().meta.label,
                    assembly.id(),
                    found.len()
                ));
                for r in found {
                    output.line(&format!(
                        "  {} [{}] {}",
                        r.address(),
                        r.entry.difficulty,
                        r.entry.title
                    ));
                }
            } else {
                print_language(&output, assembly, self.language.is_some());
            }
        }
        Ok(())
    }
}

/// Entries matching every given filter, in assembled order.
fn matching<'a>(
    assembly: &'a Assembly,
    difficulty: Option<Difficulty>,
    tag: Option<&'a str>,
) -> Vec<EntryRef<'a>> {
    match (difficulty, tag) {
        (Some(difficulty), Some(tag)) => assembly
            .with_difficulty(difficulty)
            .filter(|r| r.entry.has_tag(tag))
            .collect(),
        (Some(difficulty), None) => assembly.with_difficulty(difficulty).collect(),
        (None, Some(tag)) => assembly.with_tag(tag).collect(),
        (None, None) => assembly.entries().collect(),
    }
}

/// Print a language header and its categories, with entries when `detailed`.
fn print_language(output: &Output, assembly: &Assembly, detailed: bool) {
    let language = assembly.language();
    output.heading(&format!(
        "{} ({}): {} categories, {} entries",
        language.meta.label,
        assembly.id(),
        language.categories.len(),
        language.entry_count()
    ));

    for category in &language.categories {
        output.line(&format!(
            "  {} - {} ({} entries)",
            category.id,
            category.label,
            category.entries.len()
        ));
        if detailed {
            for entry in &category.entries {
                output.muted(&format!(
                    "    {} [{}] {}",
                    entry.id, entry.difficulty, entry.title
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tome_corpus::{
        Category, CategoryId, Entry, EntryId, LanguageId, LanguageMeta, PartModule, assemble,
    };

    use super::*;

    fn entry(id: &str, difficulty: Difficulty, tags: &[&str]) -> Entry {
        Entry {
            id: EntryId::new(id),
            title: id.to_owned(),
            difficulty,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            cheat_sheet_summary: String::new(),
            sections: Vec::new(),
            quiz: None,
            challenge: None,
        }
    }

    fn assembly() -> Assembly {
        assemble(
            LanguageMeta {
                id: LanguageId::new("javascript"),
                label: "JavaScript".to_owned(),
                icon: String::new(),
                color: String::new(),
                official_url: String::new(),
                tagline: String::new(),
                playground_url: String::new(),
                execution_api_id: String::new(),
            },
            vec![PartModule::new(
                "parts/part1.yaml",
                vec![Category {
                    id: CategoryId::new("async"),
                    label: "Async".to_owned(),
                    icon: String::new(),
                    entries: vec![
                        entry("callbacks", Difficulty::Beginner, &["async"]),
                        entry("promises", Difficulty::Intermediate, &["Async", "es6"]),
                        entry("generators", Difficulty::Advanced, &["es6"]),
                    ],
                }],
            )],
        )
    }

    fn ids(found: &[EntryRef<'_>]) -> Vec<String> {
        found.iter().map(|r| r.entry.id.to_string()).collect()
    }

    #[test]
    fn test_matching_filters() {
        let assembly = assembly();

        assert_eq!(
            ids(&matching(&assembly, None, Some("async"))),
            vec!["callbacks", "promises"]
        );
        assert_eq!(
            ids(&matching(&assembly, Some(Difficulty::Advanced), None)),
            vec!["generators"]
        );
        assert_eq!(
            ids(&matching(&assembly, Some(Difficulty::Intermediate), Some("es6"))),
            vec!["promises"]
        );
        assert_eq!(ids(&matching(&assembly, None, None)).len(), 3);
    }

    #[test]
    fn test_difficulty_flag_parses() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            list: ListArgs,
        }

        let parsed = Harness::try_parse_from(["list", "javascript", "-d", "advanced", "-t", "es6"])
            .unwrap();
        assert_eq!(parsed.list.difficulty, Some(Difficulty::Advanced));
        assert_eq!(parsed.list.tag.as_deref(), Some("es6"));

        assert!(Harness::try_parse_from(["list", "-d", "expert"]).is_err());
    }
}
