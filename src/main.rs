//! Reshub CLI application entry point
//!
//! Loads the three collections from the configured source and lets the user
//! browse, search, inspect and bookmark items.
//!
//! # Usage
//!
//! ```bash
//! # Browse updates (default command)
//! reshub --dir ./data
//! reshub browse downloads
//!
//! # Search across every category
//! reshub search password reset
//! reshub search -t release -t faq
//!
//! # Detail view and bookmarks
//! reshub show knowledge-articles "Reset a password"
//! reshub bookmark downloads Installer
//! reshub bookmarks
//!
//! # Interactive session
//! reshub shell
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr. `RESHUB_LOG` (or `RUST_LOG`) takes an env-filter
//! directive; `-v` turns on debug output for reshub itself.

use colored::Colorize;
use reshub::{
    ReshubError,
    bookmarks::BookmarkStore,
    cli::{Cli, Commands, ConfigCommands},
    config::HubConfig,
    loader::{CollectionSource, LoadOptions},
    models::Category,
    output::{self, TerminalRenderer},
    search::Ranked,
    shell::{self, ShellCommand},
    view::{NO_RESULTS, ViewController, ViewError, ViewState, Visible, render_failure},
};
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

type Result<T> = std::result::Result<T, ReshubError>;

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RESHUB_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            if verbose {
                EnvFilter::new("reshub=debug,warn")
            } else {
                EnvFilter::new("warn")
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Config file plus environment, with `--url`/`--dir` applied on top
fn load_config(cli: &Cli) -> Result<HubConfig> {
    let mut config = HubConfig::load()?;
    if let Some(url) = &cli.url {
        config.use_url(url.clone());
    }
    if let Some(dir) = &cli.dir {
        config.use_dir(dir.clone());
    }
    Ok(config)
}

/// Open the bookmark store, continuing without bookmarks if it is unavailable
fn open_bookmarks(config: &HubConfig) -> Option<BookmarkStore> {
    if !config.bookmarks.enabled {
        return None;
    }
    let path = match config.bookmark_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(error = %e, "bookmarks unavailable");
            return None;
        }
    };
    match BookmarkStore::open(&path) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not open bookmark database");
            None
        }
    }
}

fn print_rendered(controller: &ViewController, quiet: bool) {
    let mut renderer = TerminalRenderer::new(quiet);
    controller.render(&mut renderer);
    print!("{}", renderer.finish());

    if let ViewState::Browsing { category } = controller.state()
        && controller.visible().is_empty()
        && !quiet
    {
        println!("No items in {}.", category.label());
    }
}

fn print_hits(controller: &ViewController, hits: &[Ranked<'_>], quiet: bool) {
    if hits.is_empty() {
        if !quiet {
            println!("{NO_RESULTS}");
        }
        return;
    }
    for hit in hits {
        let bookmarked = controller.is_bookmarked(hit.item);
        println!("{}", output::item_line(hit.item, bookmarked, Some(hit.score), quiet));
    }
}

/// Numbered listing of the current view, used by the shell
fn print_listing(controller: &ViewController, quiet: bool) {
    let visible = controller.visible();
    if !quiet {
        println!("{}", output::container_heading(visible.container()));
    }
    if visible.is_empty() {
        let message = if controller.state().is_searching() {
            NO_RESULTS
        } else {
            "No items."
        };
        println!("{message}");
        return;
    }
    let scored: Vec<(Option<u32>, &reshub::Item)> = match &visible {
        Visible::Category { items, .. } => items.iter().map(|item| (None, *item)).collect(),
        Visible::SearchResults { hits } => hits.iter().map(|hit| (Some(hit.score), hit.item)).collect(),
    };
    for (i, (score, item)) in scored.into_iter().enumerate() {
        let line = output::item_line(item, controller.is_bookmarked(item), score, quiet);
        println!("{:>3}{line}", i + 1);
    }
}

fn print_tags(controller: &ViewController, quiet: bool) {
    let index = controller.tag_index();
    if index.is_empty() {
        if !quiet {
            println!("No tags found.");
        }
        return;
    }
    if !quiet {
        println!("Tags ({}):", index.len());
    }
    for (tag, count) in index.with_counts() {
        println!("{}", output::tag_with_count(tag, count, quiet));
    }
}

fn print_detail(controller: &ViewController, category: Category, title: &str, quiet: bool) -> Result<()> {
    let mut renderer = TerminalRenderer::new(quiet);
    controller.show_detail(category, title, &mut renderer)?;
    print!("{}", renderer.finish());
    Ok(())
}

fn toggle_bookmark(controller: &mut ViewController, category: Category, title: &str, quiet: bool) -> Result<()> {
    let marked = controller.toggle_bookmark(category, title)?;
    if !quiet {
        if marked {
            println!("{} Bookmarked '{title}'", output::BOOKMARK_MARK.yellow());
        } else {
            println!("Removed bookmark from '{title}'");
        }
    }
    Ok(())
}

/// Category and title of item `n` (1-based) in the current listing
fn nth_visible(controller: &ViewController, n: usize) -> Option<(Category, String)> {
    controller
        .visible()
        .items()
        .get(n - 1)
        .map(|item| (item.category, item.title.clone()))
}

fn prompt(state: &ViewState) -> String {
    match state {
        ViewState::Browsing { category } => format!("{category}> "),
        ViewState::Searching { filter, .. } => {
            let tags: Vec<&str> = filter.tags.iter().collect();
            if tags.is_empty() {
                format!("search '{}'> ", filter.query.raw())
            } else {
                format!("search '{}' [{}]> ", filter.query.raw(), tags.join(", "))
            }
        }
    }
}

async fn run_shell(
    controller: &mut ViewController,
    source: &dyn CollectionSource,
    options: LoadOptions,
    quiet: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !quiet {
        println!("Type :help for commands.");
    }
    print_listing(controller, quiet);

    loop {
        print!("{}", prompt(controller.state()));
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match shell::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command {
            ShellCommand::Nothing => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{}", shell::HELP);
                continue;
            }
            ShellCommand::Tags => {
                print_tags(controller, quiet);
                continue;
            }
            ShellCommand::Query(text) => {
                controller.set_query(&text);
            }
            ShellCommand::Tab(category) => {
                if controller.state().is_searching() && !quiet {
                    println!("Tabs are disabled while searching (:clear first).");
                }
                controller.select_category(category);
            }
            ShellCommand::Tag(tag) => {
                if !controller.tag_index().contains(&tag) {
                    tracing::warn!(tag = %tag, "no item carries this tag");
                }
                controller.toggle_tag(&tag);
            }
            ShellCommand::Clear => {
                controller.clear();
            }
            ShellCommand::Open(n) => {
                match nth_visible(controller, n) {
                    Some((category, title)) => print_detail(controller, category, &title, quiet)?,
                    None => eprintln!("No item {n} in this listing"),
                }
                continue;
            }
            ShellCommand::Mark(n) => {
                match nth_visible(controller, n) {
                    Some((category, title)) => {
                        if let Err(e) = toggle_bookmark(controller, category, &title, quiet) {
                            eprintln!("{e}");
                        }
                    }
                    None => eprintln!("No item {n} in this listing"),
                }
                continue;
            }
            ShellCommand::Reload => {
                if let Err(e) = controller.reload(source, options).await {
                    let mut renderer = TerminalRenderer::new(quiet);
                    render_failure(&e, &mut renderer);
                    eprint!("{}", renderer.finish());
                    continue;
                }
            }
        }

        print_listing(controller, quiet);
    }

    Ok(())
}

fn handle_config_command(config: &HubConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(config).map_err(|e| {
                ::config::ConfigError::Message(format!("Failed to serialize config: {e}"))
            })?;
            print!("{text}");
        }
        ConfigCommands::Path => {
            println!("{}", HubConfig::config_path()?.display());
        }
        ConfigCommands::Save => {
            config.save()?;
            if !quiet {
                println!("Saved configuration to {}", HubConfig::config_path()?.display());
            }
        }
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(&config, command, quiet);
    }

    let source = config.source.open()?;
    let options = config.load_options();
    tracing::debug!(source = %source.describe(), "loading collections");

    let mut controller = ViewController::load(source.as_ref(), options).await?;
    if let Some(store) = open_bookmarks(&config) {
        controller = controller.with_bookmarks(store);
    }

    match &command {
        Commands::Browse { category } => {
            if let Some(category) = category {
                controller.select_category(*category);
            }
            print_rendered(&controller, quiet);
        }
        Commands::Search { .. } => {
            let query = command.get_query_from_search().unwrap_or_default();
            controller.set_query(&query);
            controller.set_tags(command.get_tags_from_search());
            match controller.visible() {
                Visible::SearchResults { hits } => print_hits(&controller, &hits, quiet),
                Visible::Category { .. } => print_rendered(&controller, quiet),
            }
        }
        Commands::Tags => print_tags(&controller, quiet),
        Commands::Show { category, title } => print_detail(&controller, *category, title, quiet)?,
        Commands::Bookmark { category, title } => {
            toggle_bookmark(&mut controller, *category, title, quiet)?;
        }
        Commands::Bookmarks => {
            if controller.bookmarks().is_none() {
                return Err(ViewError::BookmarksDisabled.into());
            }
            let marked = controller.bookmarked_items();
            if marked.is_empty() && !quiet {
                println!("No bookmarks yet.");
            }
            for item in marked {
                println!("{}", output::item_line(item, true, None, quiet));
            }
        }
        Commands::Shell => run_shell(&mut controller, source.as_ref(), options, quiet).await?,
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ReshubError::ViewError(e @ (ViewError::Load(_) | ViewError::FilterFailure(_)))) => {
            let mut renderer = TerminalRenderer::new(cli.quiet);
            render_failure(&e, &mut renderer);
            eprint!("{}", renderer.finish());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
