use super::usage;
use crate::commands::registry::{CommandHandler, CommandInvocation};
use crate::core::catalog::{Catalog, Writeup};
use crate::core::config::ReadFormat;
use crate::core::fetch::FetchError;
use crate::core::output::CommandOutput;
use crate::core::session::Session;
use crate::ui::markdown::to_terminal_text;
use crate::utils::url::resolve_resource;
use async_trait::async_trait;
use std::fmt::Write as _;
use tracing::{debug, warn};

const USAGE_READ: &str = "Usage: read <id>. Use 'writeups' to list available writeups.";
const CATEGORY_COLUMN: usize = 12;
const UNGROUPED: &str = "Independent";

pub(crate) fn handle_writeups(session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
    let catalog = session.catalog;
    let Some(category) = invocation.arg(0) else {
        let all: Vec<&Writeup> = catalog.writeups().iter().collect();
        let heading = format!("Writeups ({})", all.len());
        return CommandOutput::text(render_report(&heading, &all));
    };

    if !catalog.has_category(category) {
        return CommandOutput::text(format!(
            "Category '{category}' not found. Available categories: {}",
            category_names(catalog).join(", ")
        ));
    }

    let matching = catalog.find_by_category(category);
    if matching.is_empty() {
        return CommandOutput::text(format!("No writeups in category '{category}' yet."));
    }
    let heading = format!("Writeups in '{category}' ({})", matching.len());
    CommandOutput::text(render_report(&heading, &matching))
}

pub(crate) fn handle_categories(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    let catalog = session.catalog;
    let mut out = String::from("Available categories:\n\n");
    for category in catalog.list_categories() {
        let count = catalog.count_in_category(&category.name);
        let noun = if count == 1 { "writeup" } else { "writeups" };
        let _ = writeln!(
            out,
            "  {:<width$} {} ({count} {noun})",
            category.name,
            category.description,
            width = CATEGORY_COLUMN
        );
    }
    out.push_str("\nUse 'writeups <category>' to filter.");
    CommandOutput::text(out)
}

/// Fetches the writeup body; falls back to a summary built from the catalog
/// when the body cannot be loaded.
pub(crate) struct ReadCommand;

#[async_trait]
impl CommandHandler for ReadCommand {
    async fn run(&self, session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
        let Some(id) = invocation.arg(0) else {
            return usage(USAGE_READ);
        };
        let Some(writeup) = session.catalog.find_by_id(id) else {
            return CommandOutput::text(format!(
                "Writeup '{id}' not found. Use 'writeups' to list available writeups."
            ));
        };

        let location = resolve_resource(&session.content_base, &writeup.file_path);
        debug!(id, %location, "Loading writeup");
        let content = match session.fetcher.fetch_resource(&location).await {
            Ok(body) => format!("{}{}", metadata_header(writeup), body),
            Err(err) => {
                warn!(id, %location, error = %err, "Falling back to generated writeup");
                fallback_content(writeup, &err)
            }
        };

        match session.config.read_format() {
            ReadFormat::Markdown => CommandOutput::Markdown {
                content,
                writeup: Some(Box::new(writeup.clone())),
            },
            ReadFormat::Plain => CommandOutput::text(to_terminal_text(&content)),
        }
    }
}

fn category_names(catalog: &Catalog) -> Vec<&str> {
    catalog
        .list_categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

/// Records grouped by platform, groups in order of first appearance.
fn render_report(heading: &str, writeups: &[&Writeup]) -> String {
    let mut groups: Vec<(&str, Vec<&Writeup>)> = Vec::new();
    for &writeup in writeups {
        let key = writeup.platform.map(|p| p.label()).unwrap_or(UNGROUPED);
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, members)) => members.push(writeup),
            None => groups.push((key, vec![writeup])),
        }
    }

    let mut out = format!("{heading}\n");
    for (platform, members) in groups {
        let _ = write!(out, "\n== {platform} ==\n");
        for writeup in members {
            render_entry(&mut out, writeup);
        }
    }
    out.push_str("\nUse 'read <id>' to open a writeup.");
    out
}

fn render_entry(out: &mut String, writeup: &Writeup) {
    let _ = writeln!(
        out,
        "  {} {}  {}",
        writeup.difficulty.marker(),
        writeup.id,
        writeup.title
    );

    let mut details = vec![writeup.date.clone()];
    if let Some(event) = &writeup.event {
        details.push(event.clone());
    }
    details.push(writeup.difficulty.label().to_string());
    if let Some(count) = writeup.challenge_count {
        details.push(format!("{count} challenges"));
    }
    let _ = writeln!(out, "     {}", details.join(" | "));

    if !writeup.tags.is_empty() {
        let tags: Vec<String> = writeup.tags.iter().map(|t| format!("#{t}")).collect();
        let _ = writeln!(out, "     {}", tags.join(" "));
    }
    let _ = writeln!(out, "     {}", writeup.description);
}

fn metadata_header(writeup: &Writeup) -> String {
    let mut header = format!("# {}\n\n", writeup.title);
    let mut first = Vec::new();
    if let Some(event) = &writeup.event {
        first.push(format!("**Event:** {event}"));
    }
    if let Some(platform) = writeup.platform {
        first.push(format!("**Platform:** {platform}"));
    }
    first.push(format!("**Date:** {}", writeup.date));
    let _ = writeln!(header, "{}", first.join(" | "));

    let mut second = vec![
        format!("**Difficulty:** {}", writeup.difficulty),
        format!("**Category:** {}", writeup.categories().join(", ")),
    ];
    if let Some(count) = writeup.challenge_count {
        second.push(format!("**Challenges:** {count}"));
    }
    let _ = writeln!(header, "{}", second.join(" | "));

    if !writeup.tags.is_empty() {
        let _ = writeln!(header, "**Tags:** {}", writeup.tags.join(", "));
    }
    header.push_str("\n---\n\n");
    header
}

fn fallback_content(writeup: &Writeup, err: &FetchError) -> String {
    let platform = writeup
        .platform
        .map(|p| p.label())
        .unwrap_or(UNGROUPED);
    let mut out = format!("Error loading writeup '{}': {err}\n\n", writeup.id);
    let _ = write!(
        out,
        "# {title}\n\n\
         > The full writeup could not be loaded. Showing a summary from the catalog.\n\n\
         **Platform:** {platform} | **Difficulty:** {difficulty} | **Category:** {category}\n\n\
         ## Overview\n\n\
         {description}\n\n\
         ## Details\n\n",
        title = writeup.title,
        difficulty = writeup.difficulty,
        category = writeup.categories().join(", "),
        description = writeup.description,
    );
    if let Some(event) = &writeup.event {
        let _ = writeln!(out, "- Event: {event}");
    }
    let _ = writeln!(out, "- Date: {}", writeup.date);
    if !writeup.tags.is_empty() {
        let _ = writeln!(out, "- Tags: {}", writeup.tags.join(", "));
    }
    let _ = write!(out, "\nExpected source: {}", writeup.file_path);
    out
}
