use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rollcall
/// Lecture attendance with rotating 4-digit codes over SQLite
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stateless lecture attendance: rotating 4-digit codes, streaks and leaderboards",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the server-wide secret seed from the config file
    #[arg(global = true, long = "seed")]
    pub seed: Option<String>,

    /// Pin the request clock to a fixed instant (RFC 3339)
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show the current codes for a lecturer's in-session lectures
    Code {
        #[arg(long = "lecturer", help = "Lecturer identity")]
        lecturer: String,
    },

    /// Submit an attendance code as a student
    Attend {
        #[arg(long = "student", help = "Student identity")]
        student: String,

        #[arg(long = "code", help = "The 4-digit code shown in the lecture")]
        code: String,
    },

    /// Show the attendance leaderboard for a course
    Leaderboard {
        /// Course code (e.g. COMP1711)
        course: String,
    },

    /// List a student's chronological enrollment history
    List {
        #[arg(long = "student", help = "Student identity")]
        student: String,

        #[arg(long = "course", help = "Restrict to one course code")]
        course: Option<String>,
    },

    /// Recompute streak counters from full attendance history
    Repair {
        #[arg(
            long = "student",
            help = "Repair a single student (default: all students)"
        )]
        student: Option<String>,
    },

    /// Populate an empty database with a demo dataset
    Seed,

    /// Export attendance records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "course", help = "Restrict to one course code")]
        course: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
