//! `notebox` command-line caller.
//!
//! # Responsibility
//! - Turn command-line input into note intents.
//! - Render the refreshed list the core hands back.

mod commands;

use clap::Parser;
use commands::{Cli, Commands};
use notebox_core::{
    init_logging, Note, NoteId, NoteStore, NoteSync, NoteboxConfig, SqliteNoteStore, StoreResult,
    SyncOutcome,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_ref() {
        let log_dir = log_dir.to_string_lossy();
        if let Err(err) = init_logging(config.log_level, &log_dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let store = match SqliteNoteStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let (mut sync, loaded) = NoteSync::start(store);
    if let SyncOutcome::Faulted(err) = loaded {
        eprintln!("error: cannot load notes: {err}");
        return ExitCode::FAILURE;
    }

    let (outcome, json) = match cli.command {
        Commands::Add { title, details } => {
            (sync.submit_new_note(&title, details.as_deref()), false)
        }
        Commands::Edit { id, title, details } => {
            match submit_edit_form(&mut sync, id, &title, details) {
                Ok(outcome) => (outcome, false),
                Err(err) => {
                    eprintln!("error: cannot load note {id}: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Commands::Toggle { id } => (sync.toggle_done(id), false),
        Commands::Delete { id } => (sync.delete_note(id), false),
        Commands::List { json } => (SyncOutcome::Applied { matched: true }, json),
        Commands::Show { id, json } => return show_note(&sync, id, json),
    };

    match outcome {
        SyncOutcome::Applied { matched: false } => eprintln!("note not found; nothing changed"),
        SyncOutcome::Skipped => eprintln!("title is empty; nothing saved"),
        SyncOutcome::Faulted(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        SyncOutcome::Applied { matched: true } => {}
    }

    print_list(&sync.get_current_list(), json)
}

/// Submits the edit form the way a pre-filled form would.
///
/// When `--details` is omitted on an existing note, its current details are
/// carried over instead of being cleared.
fn submit_edit_form<S: NoteStore>(
    sync: &mut NoteSync<S>,
    id: NoteId,
    title: &str,
    details: Option<String>,
) -> StoreResult<SyncOutcome> {
    let details = match details {
        Some(details) => Some(details),
        None if id > 0 => sync.store().get(id)?.and_then(|note| note.details),
        None => None,
    };
    Ok(sync.submit_edit(id, title, details.as_deref()))
}

fn resolve_config(cli: &Cli) -> Result<NoteboxConfig, notebox_core::ConfigError> {
    let mut config = NoteboxConfig::from_env()?;
    if let Some(db) = cli.db.as_ref() {
        config = config.with_db_path(db);
    }
    if let Some(level) = cli.log_level.as_deref() {
        config = config.with_log_level(level)?;
    }
    if let Some(dir) = cli.log_dir.as_ref() {
        config = config.with_log_dir(dir)?;
    }
    Ok(config)
}

fn show_note(sync: &NoteSync<SqliteNoteStore>, id: i64, json: bool) -> ExitCode {
    match sync.store().get(id) {
        Ok(Some(note)) if json => print_json(&note),
        Ok(Some(note)) => {
            println!("{}", render_line(&note));
            if let Some(details) = note.details.as_deref().filter(|d| !d.is_empty()) {
                println!("    {details}");
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("note {id} not found");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_list(notes: &[Note], json: bool) -> ExitCode {
    if json {
        return print_json(notes);
    }
    if notes.is_empty() {
        println!("No notes.");
    }
    for note in notes {
        println!("{}", render_line(note));
    }
    ExitCode::SUCCESS
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_line(note: &Note) -> String {
    let mark = if note.done { "[x]" } else { "[ ]" };
    format!("{:>4} {} {}", note.id, mark, note.title)
}
