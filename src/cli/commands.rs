//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "podiary")]
#[command(about = "Photo diary: capture annotated snapshots and move them around as zip archives", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new diary
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Capture a frame with a note
    Capture {
        /// Note attached to the photo
        #[arg(short, long)]
        note: String,

        /// Image file holding the frame to capture
        #[arg(value_name = "FRAME")]
        frame: PathBuf,
    },

    /// List entries, newest first
    List {
        /// Only show entries with exactly this note
        #[arg(long)]
        note: Option<String>,

        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show distinct notes with their entry counts
    Notes,

    /// Save all entries to a zip archive
    Export {
        /// Output path (default: configured archive name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge entries from a previously exported zip archive
    Import {
        /// Archive to import
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
    },

    /// Show or change the remembered camera device
    Camera {
        /// Device id to remember
        device_id: Option<String>,

        /// Forget the remembered device
        #[arg(long, conflicts_with = "device_id")]
        reset: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Delete every entry
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}
