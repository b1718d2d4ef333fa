// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod handlers;

use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(name = "securevault")]
#[command(about = "Password manager core: accounts, credential entries, generator")]
pub struct Args {
    /// Directory for the local store and session files
    #[arg(long, env = "SECUREVAULT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Account API base URL; omit to run against the local store
    #[arg(long, env = "SECUREVAULT_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}
