//! CLI definitions for jobfill.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// jobfill CLI.
#[derive(Parser)]
#[command(name = "jobfill")]
#[command(about = "Detect and autofill job application forms")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ~/.jobfill/config.toml when present)
    #[arg(short, long, global = true, env = "JOBFILL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the fillable fields of a page and what each would receive
    Analyze {
        #[command(flatten)]
        page: PageArgs,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Fill a page from a profile
    Fill {
        #[command(flatten)]
        page: PageArgs,

        /// Profile JSON file (otherwise fetched from the backend)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Write the filled page here
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Keep the configured delays between fields
        #[arg(long)]
        paced: bool,

        /// Use the label-driven filler of older extension builds
        #[arg(long)]
        legacy: bool,
    },

    /// Decide whether a page hosts a job application
    Detect {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Backend profile commands
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show recent autofill attempts
    History {
        /// Show the error log instead
        #[arg(long)]
        errors: bool,

        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Show or set the stored ATS mode toggle
    AtsMode {
        #[arg(value_enum)]
        state: Option<Toggle>,
    },
}

/// An HTML file and the URL it was loaded from.
#[derive(clap::Args)]
pub(crate) struct PageArgs {
    /// HTML file to load
    pub html: PathBuf,

    /// URL the page was served from
    #[arg(long, default_value = "about:blank")]
    pub url: String,

    /// Force the Workday strategy
    #[arg(long, conflicts_with = "generic")]
    pub workday: bool,

    /// Force the generic strategy
    #[arg(long)]
    pub generic: bool,
}

impl PageArgs {
    /// `None` lets the URL decide.
    pub fn workday_flag(&self) -> Option<bool> {
        match (self.workday, self.generic) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ProfileAction {
    /// Fetch the profile from the backend and cache it
    Fetch,

    /// Print the cached profile
    Show,

    /// End the backend session and forget the cached profile
    Logout,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Toggle {
    On,
    Off,
}
