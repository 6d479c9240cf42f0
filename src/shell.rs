//! Line commands for the interactive shell
//!
//! Plain text replaces the search query. Lines starting with `:` are
//! commands; item numbers refer to the last printed listing, starting at 1.

use crate::models::Category;
use thiserror::Error;

/// Help text listing the shell commands
pub const HELP: &str = "\
<text>         search for text (an empty line keeps the current view)
:query [text]  set the search text; without text, clear it and keep tags
:tab <cat>     browse a category (ignored while searching)
:tag <tag>     toggle a tag filter
:clear         clear query and tags, back to the last category
:open <n>      show item n of the listing
:mark <n>      toggle the bookmark on item n
:reload        fetch every collection again
:tags          list tags with counts
:help          show this help
:quit          leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Replace the query text; empty clears it
    Query(String),
    Tab(Category),
    Tag(String),
    Clear,
    Open(usize),
    Mark(usize),
    Reload,
    Tags,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("Unknown command ':{0}' (try :help)")]
    UnknownCommand(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not an item number")]
    BadIndex(String),

    #[error(transparent)]
    Category(#[from] crate::models::UnknownCategory),
}

/// Parse one input line
///
/// # Errors
///
/// Returns `ShellError` for unknown commands, missing arguments and
/// malformed item numbers or categories.
pub fn parse(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Ok(ShellCommand::Nothing);
        }
        return Ok(ShellCommand::Query(line.to_string()));
    };

    let (name, arg) = match rest.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };

    match name {
        "query" => Ok(ShellCommand::Query(arg.to_string())),
        "tab" | "t" => Ok(ShellCommand::Tab(required(arg, "tab")?.parse()?)),
        "tag" => Ok(ShellCommand::Tag(required(arg, "tag")?.to_string())),
        "clear" | "c" => Ok(ShellCommand::Clear),
        "open" | "o" => Ok(ShellCommand::Open(index(required(arg, "open")?)?)),
        "mark" | "m" => Ok(ShellCommand::Mark(index(required(arg, "mark")?)?)),
        "reload" | "r" => Ok(ShellCommand::Reload),
        "tags" => Ok(ShellCommand::Tags),
        "help" | "h" | "?" => Ok(ShellCommand::Help),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        other => Err(ShellError::UnknownCommand(other.to_string())),
    }
}

fn required<'a>(arg: &'a str, command: &'static str) -> Result<&'a str, ShellError> {
    if arg.is_empty() {
        Err(ShellError::MissingArgument(command))
    } else {
        Ok(arg)
    }
}

fn index(arg: &str) -> Result<usize, ShellError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ShellError::BadIndex(arg.to_string())),
    }
}
