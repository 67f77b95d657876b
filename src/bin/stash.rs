//! Thin CLI over the stash core library.
//!
//! Owns argument parsing, terminal output, and color; all decision
//! logic lives in the library modules.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stash::editor::{edit_value, open_editor};
use stash::highlight::{matches_excerpt, HighlightOptions, HighlightStyle};
use stash::{
    resolve, Attr, Config, ListOptions, ResolveMode, StashError, StashResult, Store, NO_LIMIT,
};

#[derive(Parser)]
#[command(name = "stash", version, about = "Personal attribute/note store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new note from an argument, stdin ("-"), or the editor
    New { note: Option<String> },
    /// List records, optionally filtered
    #[command(alias = "grep")]
    Ls {
        /// Free-text filters; a record must match every term
        filters: Vec<String>,
        /// Only removed records
        #[arg(long)]
        removed: bool,
        /// Short mode: marked records only
        #[arg(short, long)]
        short: bool,
        /// List the children of this record
        #[arg(long)]
        root: Option<i64>,
        /// Include child records under the root
        #[arg(short, long)]
        recursive: bool,
        /// Pagination offset
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
        /// Maximum rows returned
        #[arg(short = 'L', long)]
        limit: Option<i64>,
        /// List everything, alias for no limit
        #[arg(short, long)]
        all: bool,
        /// Lines to print after a match
        #[arg(short = 'A', long)]
        after: Option<usize>,
    },
    /// Edit records in $EDITOR
    Edit { ids: Vec<String> },
    /// Set an alias: one argument names the record, the other the alias
    Alias { first: String, second: String },
    /// Remove an alias (exact match required)
    Unalias { alias: String },
    /// Mark records for short-mode listing
    Mark { ids: Vec<String> },
    /// Unmark records
    Unmark { ids: Vec<String> },
    /// Print record values
    #[command(alias = "show")]
    Cat { ids: Vec<String> },
    /// Soft-delete records
    #[command(alias = "remove")]
    Rm { ids: Vec<String> },
    /// Restore soft-deleted records
    #[command(aliases = ["unrm", "unremove", "recover"])]
    Restore { ids: Vec<String> },
    /// Import files as records
    Addfile { files: Vec<PathBuf> },
    /// Attach attributes under a parent record
    Addattr {
        /// Parent record id or alias
        parent: String,
        /// Attributes, each "name:value" or a bare value
        attrs: Vec<String>,
    },
    /// Initialize the database schema
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> StashResult<()> {
    let config = Config::load_default()?;
    let mut store = Store::open(config.database_path()?)?;
    store.set_order(config.order);

    match cli.command {
        Command::New { note } => cmd_new(&store, &config, note),
        Command::Ls {
            filters,
            removed,
            short,
            root,
            recursive,
            offset,
            limit,
            all,
            after,
        } => {
            let opts = ListOptions {
                include_removed: removed,
                root_id: root,
                recursive,
                short_mode: short,
                filters,
                offset,
                limit: if all {
                    NO_LIMIT
                } else {
                    limit.unwrap_or(config.default_limit)
                },
                order: config.order,
            };
            cmd_ls(&store, &config, &opts, after)
        }
        Command::Edit { ids } => cmd_edit(&store, &config, &ids),
        Command::Alias { first, second } => cmd_alias(&store, &first, &second),
        Command::Unalias { alias } => cmd_unalias(&store, &alias),
        Command::Mark { ids } => cmd_set_mark(&store, &ids, 1),
        Command::Unmark { ids } => cmd_set_mark(&store, &ids, 0),
        Command::Cat { ids } => cmd_cat(&store, &ids),
        Command::Rm { ids } => cmd_rm(&store, &ids),
        Command::Restore { ids } => cmd_restore(&store, &ids),
        Command::Addfile { files } => cmd_addfile(&store, &files),
        Command::Addattr { parent, attrs } => cmd_addattr(&store, &parent, &attrs),
        Command::Init => {
            store.init_schema()?;
            println!("repository initialized");
            Ok(())
        }
    }
}

/// Resolve each id-or-alias input, warning on misses.
fn resolve_all(store: &Store, inputs: &[String], mode: ResolveMode) -> StashResult<Vec<Attr>> {
    let mut attrs = Vec::new();
    for input in inputs {
        match resolve(store, input, mode)? {
            Some(attr) => attrs.push(attr),
            None => eprintln!("not found: {}", input),
        }
    }
    Ok(attrs)
}

/// The targets of a show/cat/edit command: the given ids, or the most
/// recent record when none were given.
fn targets(store: &Store, inputs: &[String]) -> StashResult<Vec<Attr>> {
    if inputs.is_empty() {
        let last = match store.last_id()? {
            Some(id) => id,
            None => return Ok(Vec::new()),
        };
        return Ok(store.find_by_id(last)?.into_iter().collect());
    }
    resolve_all(store, inputs, ResolveMode::Fuzzy)
}

fn cmd_new(store: &Store, config: &Config, note: Option<String>) -> StashResult<()> {
    let value_text = match note.as_deref() {
        Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
        Some(text) => text.to_string(),
        None => {
            let file = tempfile::Builder::new().prefix("stash-new-").tempfile()?;
            open_editor(file.path(), config.editor.as_deref())?;
            std::fs::read_to_string(file.path())?
        }
    };

    if value_text.is_empty() {
        eprintln!("empty note, nothing saved");
        return Ok(());
    }

    let id = store.insert_note(&value_text)?;
    println!("New note ID:{}", id);
    Ok(())
}

fn cmd_ls(
    store: &Store,
    config: &Config,
    opts: &ListOptions,
    after: Option<usize>,
) -> StashResult<()> {
    let highlight_opts = HighlightOptions {
        context_after: after.unwrap_or(config.after_lines),
        max_matches: None,
        style: HighlightStyle::default(),
    };

    for attr in store.list(opts)? {
        let identifier = attr.identifier();
        if attr.is_marked() {
            println!("({}) {}", identifier, attr.title());
        } else {
            println!("[{}] {}", identifier, attr.title());
        }
        if !opts.filters.is_empty() {
            print!(
                "{}",
                matches_excerpt(
                    &attr.display_value(),
                    &identifier,
                    &opts.filters,
                    &highlight_opts,
                )
            );
        }
    }
    Ok(())
}

fn cmd_edit(store: &Store, config: &Config, ids: &[String]) -> StashResult<()> {
    let mut total = 0;
    for attr in targets(store, ids)? {
        total += edit_value(store, &attr, config.editor.as_deref())?;
    }
    println!("{} records updated", total);
    Ok(())
}

fn cmd_alias(store: &Store, first: &str, second: &str) -> StashResult<()> {
    // one numeric argument names the record, the other the alias
    if let Ok(id) = first.parse::<i64>() {
        return assign_alias(store, id, second);
    }
    if let Ok(id) = second.parse::<i64>() {
        return assign_alias(store, id, first);
    }

    // both are aliases: rename whichever one exists to the other
    let a = resolve(store, first, ResolveMode::ExactOnly)?;
    let b = resolve(store, second, ResolveMode::ExactOnly)?;
    match (a, b) {
        (Some(attr), None) => assign_alias(store, attr.id, second),
        (None, Some(attr)) => assign_alias(store, attr.id, first),
        _ => {
            eprintln!("not changing anything");
            Ok(())
        }
    }
}

fn assign_alias(store: &Store, id: i64, alias: &str) -> StashResult<()> {
    let attr = store
        .find_by_id(id)?
        .ok_or_else(|| StashError::not_found(format!("no record with id {}", id)))?;
    store.set_alias(id, Some(alias))?;
    println!("alias set: {} => {}", attr.identifier(), alias);
    Ok(())
}

fn cmd_unalias(store: &Store, alias: &str) -> StashResult<()> {
    let attr = resolve(store, alias, ResolveMode::ExactOnly)?
        .ok_or_else(|| StashError::not_found(format!("alias \"{}\" not found", alias)))?;
    store.set_alias(attr.id, None)?;
    println!("ID:{} unaliased", attr.id);
    Ok(())
}

fn cmd_set_mark(store: &Store, ids: &[String], mark: i64) -> StashResult<()> {
    let mut total = 0;
    for attr in resolve_all(store, ids, ResolveMode::Fuzzy)? {
        total += store.set_mark(attr.id, mark)?;
    }
    println!("{} {}", total, if mark == 0 { "unmarked" } else { "marked" });
    Ok(())
}

fn cmd_cat(store: &Store, ids: &[String]) -> StashResult<()> {
    for attr in targets(store, ids)? {
        let value = attr.display_value();
        print!("{}", value);
        if !value.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn cmd_rm(store: &Store, ids: &[String]) -> StashResult<()> {
    let mut total = 0;
    for input in ids {
        // numeric input addresses the id directly and aliases must
        // match exactly, so a typo cannot remove a fuzzy-matched record
        let found = if let Ok(id) = input.parse::<i64>() {
            store.find_by_id(id)?
        } else {
            resolve(store, input, ResolveMode::ExactOnly)?
        };
        match found {
            Some(attr) => total += store.soft_delete(attr.id)?,
            None => eprintln!("not found: {}", input),
        }
    }
    if total > 0 {
        println!("{} deleted", total);
    }
    Ok(())
}

fn cmd_restore(store: &Store, ids: &[String]) -> StashResult<()> {
    let mut total = 0;
    for input in ids {
        if let Ok(id) = input.parse::<i64>() {
            total += store.restore(id)?;
        } else if let Some(attr) = store.find_removed_by_alias(input)? {
            total += store.restore(attr.id)?;
        } else {
            eprintln!("not found: {}", input);
        }
    }
    if total > 0 {
        println!("{} recovered", total);
    }
    Ok(())
}

fn cmd_addfile(store: &Store, files: &[PathBuf]) -> StashResult<()> {
    for file in files {
        let absolute = std::fs::canonicalize(file)?;
        let contents = std::fs::read(&absolute)?;
        let id = store.insert_file(&absolute.to_string_lossy(), &contents)?;
        println!("added {} ID:{}", absolute.display(), id);
    }
    Ok(())
}

fn cmd_addattr(store: &Store, parent: &str, attrs: &[String]) -> StashResult<()> {
    let parent = resolve(store, parent, ResolveMode::Fuzzy)?
        .ok_or_else(|| StashError::not_found(format!("no record matches \"{}\"", parent)))?;

    for attr in attrs {
        // "name:value" attaches a named attribute, a bare value an
        // unnamed one
        let (name, value) = match attr.split_once(':') {
            Some((name, value)) => (Some(name), value),
            None => (None, attr.as_str()),
        };
        let id = store.insert_attr(name, value, Some(parent.id))?;
        println!("New attribute ID:{}", id);
    }
    Ok(())
}
