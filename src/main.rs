#![warn(
    clippy::all,
    // clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    // clippy::unwrap_used
)]
use std::process::ExitCode;

use clap::Parser;

pub mod api;
pub mod auth;
pub mod bulletin;
mod cli;
mod commands;
pub mod config;
pub mod schedule;

fn main() -> ExitCode {
    env_logger::builder().init();

    let cli = cli::Cli::parse();

    let config = match config::init(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load the configuration file: {e}");
            return ExitCode::FAILURE;
        }
    };

    commands::run(&config, cli.command)
}
