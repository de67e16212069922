use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[clap(bin_name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// Path to the configuration file
    #[clap(name = "config")]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List filming sessions in a date window
    Sessions {
        /// First day of the window (defaults to today)
        #[clap(long)]
        from: Option<NaiveDate>,
        /// Last day of the window (defaults to one month after `from`)
        #[clap(long)]
        to: Option<NaiveDate>,
    },
    /// List the equipment inventory
    Equipment {
        /// Include items marked as not functional
        #[clap(long)]
        all: bool,
    },
    /// Check equipment availability for a session
    Check {
        /// Target session id
        session: u32,
        /// Candidate equipment ids (defaults to the session's assignment)
        equipment: Vec<u32>,
    },
    /// Replace a session's equipment assignment
    Assign {
        /// Target session id
        session: u32,
        /// The complete new equipment assignment
        #[clap(required = true)]
        equipment: Vec<u32>,
    },
    /// List announcements
    Announcements,
    /// List absences in a date window (class teachers and admins)
    Absences {
        /// First day of the window (defaults to today)
        #[clap(long)]
        from: Option<NaiveDate>,
        /// Last day of the window (defaults to one month after `from`)
        #[clap(long)]
        to: Option<NaiveDate>,
    },
}
