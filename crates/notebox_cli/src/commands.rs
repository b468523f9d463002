use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notebox")]
#[command(version, about = "Local note list backed by SQLite")]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite file (overrides NOTEBOX_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides NOTEBOX_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides NOTEBOX_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note
    Add {
        title: String,

        #[arg(long, short)]
        details: Option<String>,
    },

    /// Submit the edit form: id 0 creates a note, a positive id edits it
    Edit {
        id: i64,

        title: String,

        /// New details; the current details are kept when omitted
        #[arg(long, short)]
        details: Option<String>,
    },

    /// Flip the done checkbox of a note
    Toggle { id: i64 },

    /// Delete a note permanently
    Delete { id: i64 },

    /// Print the current list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single note
    Show {
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
