use crate::export::ExportFormat;
use crate::models::Collection;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTripdesk
#[derive(Parser)]
#[command(
    name = "rtripdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import pasted rosters, schedules and trip exports, then match people to destinations",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Show debug logging on stderr
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Import pasted text (file or stdin) and merge it into the stored data
    Import {
        /// What the text contains: roster, events (schedule blocks) or records (trip export)
        #[arg(value_enum)]
        what: Collection,

        #[arg(long, short, value_name = "FILE", help = "Read from FILE instead of stdin")]
        file: Option<String>,

        /// Reference date (YYYY-MM-DD) used to infer years of MM-DD dates
        #[arg(long = "reference-date", value_name = "DATE")]
        reference_date: Option<String>,

        #[arg(long = "dry-run", help = "Parse and report without saving")]
        dry_run: bool,
    },

    /// List stored roster members, events or trip records
    List {
        #[arg(value_enum)]
        what: Collection,

        #[arg(
            long = "unresolved",
            help = "Only events or records without an identity key"
        )]
        unresolved: bool,
    },

    /// Match events to trip records and show the destination labels
    Resolve {
        #[arg(long = "event", value_name = "EVENT_ID", help = "Only this event")]
        event: Option<String>,

        #[arg(
            long = "choose",
            value_name = "RECORD_ID",
            requires = "event",
            help = "Save RECORD_ID as the destination record of --event"
        )]
        choose: Option<String>,
    },

    /// Save which roster member an ambiguous name refers to
    Identify {
        #[arg(long, help = "Name as it appears in schedules")]
        name: String,

        #[arg(long, help = "Identity key of the chosen roster member")]
        key: String,
    },

    /// Export a stored collection
    Export {
        #[arg(value_enum)]
        what: Collection,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
