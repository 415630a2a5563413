use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rAttendance
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Face-recognition attendance tracker: check-in, check-out, monthly reports and exports",
    long_about = None
)]
pub struct Cli {
    /// Override the data directory (useful for tests or a separate dataset)
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Run in test mode (default config, no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Record filters shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring of the person's name
    #[arg(long)]
    pub name: Option<String>,

    /// Exact date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Period: YYYY, YYYY-MM, YYYY-MM-DD or ranges like YYYY-MM:YYYY-MM
    #[arg(long, short = 'r', conflicts_with_all = ["from", "to"])]
    pub range: Option<String>,

    /// First date included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Status: present, late, incomplete, absent
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the data directory
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration
        #[arg(long = "print")]
        print_config: bool,

        /// Edit the configuration file (default editor: $EDITOR, or nano/notepad)
        #[arg(long = "edit")]
        edit_config: bool,

        /// Editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor")]
        editor: Option<String>,
    },

    /// List, add or delete users (no option → list)
    Users {
        /// Add a user with the given name
        #[arg(long, value_name = "NAME", conflicts_with = "del")]
        add: Option<String>,

        /// Delete the user with the given id (and its registered face)
        #[arg(long, value_name = "ID")]
        del: Option<u32>,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Register (or re-register) a face for a user
    Register {
        /// User name (created if unknown)
        name: String,

        /// Face scan produced by the embedding service (JSON, `-` for stdin)
        #[arg(long, value_name = "FILE")]
        faces: String,

        /// Replace an already registered face
        #[arg(long)]
        replace: bool,
    },

    /// Recognize a face and record a check-in or check-out
    Attend {
        /// Face scan produced by the embedding service (JSON, `-` for stdin)
        #[arg(long, value_name = "FILE")]
        faces: String,

        /// Event type: check_in or check_out
        #[arg(long = "type", default_value = "check_in")]
        kind: String,

        /// Overwrite an existing check-in for today
        #[arg(long)]
        force: bool,

        /// Override the configured match tolerance
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Manually correct an attendance record
    Edit {
        /// Attendance record id
        id: u32,

        /// New check-in time (HH:MM or HH:MM:SS)
        #[arg(long = "in", conflicts_with = "clear_in")]
        check_in: Option<String>,

        /// New check-out time (HH:MM or HH:MM:SS)
        #[arg(long = "out", conflicts_with = "clear_out")]
        check_out: Option<String>,

        /// Remove the check-in time
        #[arg(long)]
        clear_in: bool,

        /// Remove the check-out time
        #[arg(long)]
        clear_out: bool,
    },

    /// List attendance records
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show only today's records
        #[arg(long, conflicts_with_all = ["date", "range", "from", "to"])]
        today: bool,
    },

    /// Monthly attendance summary
    Summary {
        /// Year (default: current)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (default: current)
        #[arg(long)]
        month: Option<u32>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export attendance records
    Export {
        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the data files
    Backup {
        /// Destination file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress into a single .zip
        #[arg(long)]
        compress: bool,

        /// Overwrite existing backup files
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        /// Print all entries
        #[arg(long = "print")]
        print: bool,
    },
}
