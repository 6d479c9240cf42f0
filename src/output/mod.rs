//! Output formatting for CLI display
//!
//! Item lines, tag listings, detail views, and a [`TerminalRenderer`] that
//! collects what the view controller mounts so the CLI can print it.

use crate::models::{Category, Item};
use crate::view::{Container, DetailView, Renderer};
use colored::Colorize;
use std::fmt::Write as _;

/// Marker shown in front of bookmarked items
pub const BOOKMARK_MARK: &str = "★";

/// Longest body preview shown in list views, in characters
const PREVIEW_CHARS: usize = 80;

/// First line of the body, shortened for list views
#[must_use]
pub fn preview(body: &str) -> String {
    let first = body.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if first.chars().count() > PREVIEW_CHARS {
        let cut: String = first.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{cut}…")
    } else {
        first.to_string()
    }
}

/// Format one item for a list
///
/// `score` is shown when the item is a search hit.
#[must_use]
pub fn item_line(item: &Item, bookmarked: bool, score: Option<u32>, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", item.category, item.title);
    }

    let mut line = String::from("  ");
    if bookmarked {
        let _ = write!(line, "{} ", BOOKMARK_MARK.yellow());
    }
    if item.pinned {
        let _ = write!(line, "{} ", "[pinned]".magenta());
    }
    let _ = write!(line, "{}", item.title.bold());
    if let Some(score) = score {
        let _ = write!(line, " {}", format!("(score {score}, {})", item.category).dimmed());
    }
    if !item.tags.is_empty() {
        let tags: Vec<&str> = item.tags.iter().map(String::as_str).collect();
        let _ = write!(line, " [{}]", tags.join(", ").cyan());
    }
    if let Some(posted) = item.posted_on() {
        let _ = write!(line, "\n    {}", posted.dimmed());
    }
    let _ = write!(line, "\n    {}", preview(item.body()));
    if let Some(file) = &item.file {
        let _ = write!(line, "\n    {} {}", "Download:".green(), file);
    }
    line
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} item(s))")
    }
}

/// Format the full detail view of one item
#[must_use]
pub fn detail(view: &DetailView) -> String {
    let mut out = String::new();
    let mark = if view.bookmarked {
        format!("{BOOKMARK_MARK} ")
    } else {
        String::new()
    };
    let _ = writeln!(out, "{mark}{}", view.title.bold());
    let _ = writeln!(out, "{}", view.category.label().dimmed());
    if let Some(posted) = &view.posted_on {
        let _ = writeln!(out, "{}", posted.dimmed());
    }
    if !view.tags.is_empty() {
        let _ = writeln!(out, "[{}]", view.tags.join(", ").cyan());
    }
    for paragraph in &view.paragraphs {
        let _ = writeln!(out, "\n{paragraph}");
    }
    if let Some(file) = &view.file {
        let _ = writeln!(out, "\n{} {file}", "Download:".green());
    }
    out
}

/// Heading for a container section
#[must_use]
pub fn container_heading(container: Container) -> String {
    let label = match container {
        Container::Category(category) => category.label(),
        Container::SearchResults => "Search Results",
    };
    format!("== {label} ==").bold().to_string()
}

/// Renderer collecting terminal output per container
#[derive(Debug)]
pub struct TerminalRenderer {
    quiet: bool,
    sections: Vec<(Container, Vec<String>)>,
    details: Vec<String>,
    tabs_enabled: bool,
    search_visible: bool,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let sections = Category::ALL
            .into_iter()
            .map(Container::Category)
            .chain(std::iter::once(Container::SearchResults))
            .map(|c| (c, Vec::new()))
            .collect();
        Self {
            quiet,
            sections,
            details: Vec::new(),
            tabs_enabled: true,
            search_visible: false,
        }
    }

    fn section(&mut self, container: Container) -> &mut Vec<String> {
        let index = self
            .sections
            .iter()
            .position(|(c, _)| *c == container)
            .unwrap_or(0);
        &mut self.sections[index].1
    }

    #[must_use]
    pub const fn tabs_enabled(&self) -> bool {
        self.tabs_enabled
    }

    /// Everything collected so far, non-empty containers only
    #[must_use]
    pub fn finish(&self) -> String {
        let mut out = String::new();
        for (container, lines) in &self.sections {
            if lines.is_empty() {
                continue;
            }
            if *container == Container::SearchResults && !self.search_visible {
                continue;
            }
            if !self.quiet {
                let _ = writeln!(out, "{}", container_heading(*container));
            }
            for line in lines {
                let _ = writeln!(out, "{line}");
            }
        }
        for detail in &self.details {
            out.push_str(detail);
        }
        out
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self, container: Container) {
        self.section(container).clear();
    }

    fn mount(&mut self, item: &Item, container: Container, bookmarked: bool) {
        let line = item_line(item, bookmarked, None, self.quiet);
        self.section(container).push(line);
    }

    fn show_message(&mut self, container: Container, message: &str) {
        let text = if self.quiet {
            message.to_string()
        } else {
            format!("  {}", message.red())
        };
        let section = self.section(container);
        section.clear();
        section.push(text);
    }

    fn set_tabs_enabled(&mut self, enabled: bool) {
        self.tabs_enabled = enabled;
    }

    fn set_search_visible(&mut self, visible: bool) {
        self.search_visible = visible;
    }

    fn show_detail(&mut self, view: &DetailView) {
        self.details.push(detail(view));
    }
}
