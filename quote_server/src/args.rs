//! Command-line arguments for the quote server.
//!
//! This module defines the CLI interface using `clap`. Two modes exist:
//! `quote_server -i <NEW_FILE>` creates a store and exits, `quote_server <DB_FILE>`
//! serves HTTP using an existing store. Without either, usage is printed.
use std::path::PathBuf;

use clap::Parser;
use quote_common::net::{HTTP_PORT, PROVIDER_ACCESS_KEY, PROVIDER_BASE_URL};

/// Parsed command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Latest end-of-day quote lookup service", long_about = None)]
pub struct ServerArgs {
    /// Create and initialize a new database file, then exit.
    #[clap(short = 'i', long = "init", value_name = "NEW_FILE")]
    pub init: Option<PathBuf>,

    /// Database file to serve with.
    #[clap(value_name = "DB_FILE")]
    pub db_file: Option<PathBuf>,

    /// HTTP port to listen on.
    #[clap(long, default_value_t = HTTP_PORT)]
    pub port: u16,

    /// Directory served under /static/ (and holding coffee.ico).
    #[clap(long, default_value = "./static")]
    pub static_dir: PathBuf,

    /// Directory served for every other path.
    #[clap(long, default_value = ".")]
    pub root_dir: PathBuf,

    /// Base URL of the end-of-day provider.
    #[clap(long, default_value = PROVIDER_BASE_URL)]
    pub provider_url: String,

    /// Provider access key.
    #[clap(long, default_value = PROVIDER_ACCESS_KEY, hide_default_value = true)]
    pub access_key: String,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Initialize a new store file.
    Init(PathBuf),
    /// Serve HTTP with an existing store file.
    Serve(PathBuf),
    /// Nothing to do; print usage.
    Usage,
}

impl ServerArgs {
    /// Resolve the run mode. `-i` wins over a positional database file.
    pub fn mode(&self) -> Mode {
        match (&self.init, &self.db_file) {
            (Some(new_file), _) => Mode::Init(new_file.clone()),
            (None, Some(db_file)) => Mode::Serve(db_file.clone()),
            (None, None) => Mode::Usage,
        }
    }
}
