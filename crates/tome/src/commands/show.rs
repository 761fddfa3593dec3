//! `tome show` command implementation.

use clap::Args;
use tome_config::CliSettings;
use tome_corpus::{EntryAddress, EntryRef};

use super::{ContentArgs, loader};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Entry address: `<language>/<category>/<entry>`.
    address: EntryAddress,

    #[command(flatten)]
    content: ContentArgs,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the address does not resolve.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.content.load_config(CliSettings::default())?;
        let assembly = loader(&config).load_language(self.address.language.as_str())?;

        let found = assembly
            .resolve(&self.address)
            .ok_or_else(|| CliError::NotFound(self.address.to_string()))?;

        output.heading(&found.entry.title);
        for line in describe(&found) {
            output.line(&line);
        }

        let previous = found.position.checked_sub(1).and_then(|p| assembly.entry_at(p));
        output.muted(&neighbour("Previous", previous));
        output.muted(&neighbour("Next", assembly.entry_at(found.position + 1)));
        Ok(())
    }
}

/// Navigation line for a neighbouring entry.
fn neighbour(label: &str, entry: Option<EntryRef<'_>>) -> String {
    match entry {
        Some(r) => format!("{label}: {} ({})", r.address(), r.entry.title),
        None => format!("{label}: -"),
    }
}

/// Summary lines for an entry.
fn describe(found: &EntryRef<'_>) -> Vec<String> {
    let entry = found.entry;
    let mut lines = vec![
        format!("Address:    {}", found.address()),
        format!("Category:   {}", found.category.label),
        format!("Difficulty: {}", entry.difficulty),
    ];
    if !entry.tags.is_empty() {
        lines.push(format!("Tags:       {}", entry.tags.join(", ")));
    }
    lines.push(format!("Summary:    {}", entry.cheat_sheet_summary));
    lines.push(format!("Sections:   {}", entry.sections.len()));
    for section in &entry.sections {
        lines.push(format!("  - {}", section.heading));
    }
    lines.push(format!("Quiz:       {} question(s)", entry.quiz_len()));
    lines.push(format!(
        "Challenge:  {}",
        if entry.challenge.is_some() { "yes" } else { "no" }
    ));
    lines
}
