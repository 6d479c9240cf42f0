//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for reshub using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: List one category in browse order (default)
//! - **search**: Rank items across every category by query and tags
//! - **tags**: List every tag with its usage count
//! - **show**: Print the detail view of one item
//! - **bookmark** / **bookmarks**: Toggle and list bookmarks
//! - **shell**: Line-oriented interactive session
//! - **config**: Inspect or save the configuration
//!
//! # Examples
//!
//! ```
//! use reshub::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["reshub", "search", "alpha", "-t", "release"]);
//! assert!(matches!(cli.get_command(), Commands::Search { .. }));
//! ```

use crate::models::Category;
use crate::search::TagSelection;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the configuration file
    Path,

    /// Write the effective configuration (with --url/--dir applied) to the config file
    Save,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "reshub")]
#[command(about = "Browse and search updates, knowledge articles and downloads", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Fetch collections from this base URL (overrides config)
    #[arg(long = "url", value_name = "URL", global = true, conflicts_with = "dir")]
    pub url: Option<String>,

    /// Read collections from this directory (overrides config)
    #[arg(long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List a category in browse order (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Category to list (updates, knowledge-articles, downloads)
        #[arg(value_name = "CATEGORY")]
        category: Option<Category>,
    },

    /// Search every category by text and tags
    #[command(visible_alias = "s")]
    Search {
        /// Search text; all words are joined into one phrase
        #[arg(value_name = "QUERY")]
        query: Vec<String>,

        /// Tags to filter by; an item matches if it has any of them
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// List all tags with usage counts
    Tags,

    /// Show the full detail of one item
    Show {
        #[arg(value_name = "CATEGORY")]
        category: Category,

        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Toggle the bookmark on one item
    Bookmark {
        #[arg(value_name = "CATEGORY")]
        category: Category,

        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// List bookmarked items
    Bookmarks,

    /// Interactive line-oriented session
    Shell,

    /// Inspect or save configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Search text with the words joined by single spaces
    #[must_use]
    pub fn get_query_from_search(&self) -> Option<String> {
        match self {
            Self::Search { query, .. } => Some(query.join(" ")),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_tags_from_search(&self) -> TagSelection {
        match self {
            Self::Search { tags, .. } => tags.iter().cloned().collect(),
            _ => TagSelection::default(),
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { category: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["reshub"]);
        assert_eq!(cli.get_command(), Commands::Browse { category: None });
    }

    #[test]
    fn test_parse_browse_category() {
        let cli = Cli::parse_from(["reshub", "b", "downloads"]);
        assert_eq!(
            cli.get_command(),
            Commands::Browse {
                category: Some(Category::Downloads)
            }
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["reshub", "browse", "videos"]).is_err());
    }

    #[test]
    fn test_parse_search_query_and_tags() {
        let cli = Cli::parse_from(["reshub", "search", "alpha", "release", "-t", "faq", "--tag", "ops"]);
        let command = cli.get_command();

        assert_eq!(command.get_query_from_search().as_deref(), Some("alpha release"));
        let tags = command.get_tags_from_search();
        assert!(tags.contains("faq"));
        assert!(tags.contains("ops"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_search_with_tags_only() {
        let cli = Cli::parse_from(["reshub", "s", "-t", "faq"]);
        let command = cli.get_command();
        assert_eq!(command.get_query_from_search().as_deref(), Some(""));
        assert_eq!(command.get_tags_from_search().len(), 1);
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from(["reshub", "show", "knowledge-articles", "Reset a password"]);
        assert_eq!(
            cli.get_command(),
            Commands::Show {
                category: Category::KnowledgeArticles,
                title: "Reset a password".into()
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["reshub", "tags", "--dir", "data", "-q", "-v"]);
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert_eq!(cli.dir, Some(PathBuf::from("data")));
    }

    #[test]
    fn test_url_conflicts_with_dir() {
        assert!(Cli::try_parse_from(["reshub", "--url", "http://x", "--dir", "d"]).is_err());
    }

    #[test]
    fn test_parse_config_save_with_source_override() {
        let cli = Cli::parse_from(["reshub", "--dir", "data", "config", "save"]);
        assert_eq!(
            cli.get_command(),
            Commands::Config {
                command: ConfigCommands::Save
            }
        );
        assert_eq!(cli.dir, Some(PathBuf::from("data")));
    }
}
