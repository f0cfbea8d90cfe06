//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diary")]
#[command(about = "Travel diary: trip entries, photos, doodles and AI stories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Diary root directory (default: $DIARY_ROOT, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new diary
    Init {
        /// Directory to initialize (default: diary root)
        path: Option<PathBuf>,
    },

    /// Record a new entry
    Add {
        /// Place visited
        #[arg(short, long)]
        location: String,

        /// Date of the trip, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Notes about the trip
        #[arg(short, long, default_value = "")]
        text: String,

        /// Photo to attach
        #[arg(long, value_name = "FILE")]
        photo: Option<PathBuf>,

        /// Caption for the photo
        #[arg(long)]
        title: Option<String>,

        /// Sticker image to stamp onto the photo
        #[arg(long, value_name = "FILE", requires = "photo")]
        sticker: Option<PathBuf>,

        /// Sticker position: top-left, top-right, bottom-left, bottom-right (default), center or X,Y
        #[arg(long, requires = "sticker")]
        sticker_at: Option<String>,

        /// Decorative text or emoji to draw onto the photo
        #[arg(long, value_name = "TEXT", requires = "photo")]
        stamp_text: Option<String>,

        /// Text position, same values as --sticker-at
        #[arg(long, requires = "stamp_text")]
        stamp_at: Option<String>,

        /// TrueType/OpenType font for --stamp-text (falls back to the built-in font)
        #[arg(long, value_name = "FILE", requires = "stamp_text")]
        font: Option<PathBuf>,

        /// Doodle image to attach
        #[arg(long, value_name = "FILE")]
        doodle: Option<PathBuf>,

        /// One-word emotion tag
        #[arg(short, long)]
        keyword: Option<String>,

        /// Ask the AI service for an emotion tag when none is given
        #[arg(long, conflicts_with = "keyword")]
        auto_keyword: bool,
    },

    /// List entries, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Show in the order they were written
        #[arg(long)]
        oldest_first: bool,
    },

    /// Show one entry in full
    Show {
        /// Entry id
        id: String,
    },

    /// Write a short narrative for an entry or for ad-hoc notes
    Story {
        /// Entry id to narrate
        #[arg(required_unless_present = "location")]
        id: Option<String>,

        /// Place, when narrating notes that are not saved
        #[arg(short, long, conflicts_with = "id")]
        location: Option<String>,

        /// Notes, when narrating notes that are not saved
        #[arg(short, long, requires = "location")]
        notes: Option<String>,
    },

    /// Travel ideas for a destination
    Recommend {
        /// Where to go next
        destination: String,
    },

    /// List image files no entry refers to
    Orphans,

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
}
