//! Quote lookup server binary.
//!
//! ```bash
//! quote_server -i sites.db      # create and initialize a store file
//! quote_server sites.db         # serve on :8000 using that store
//! ```
//!
//! Logging goes through `env_logger`; the level defaults to `info` and can be changed
//! with `RUST_LOG`.
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::error;
use quote_common::QuoteError;
use quote_server::args::{Mode, ServerArgs};
use quote_server::{serve, store};

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();
    let args = ServerArgs::parse();

    match args.mode() {
        Mode::Init(new_file) => match store::init_store(&new_file) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
        Mode::Usage => {
            if let Err(e) = ServerArgs::command().print_help() {
                error!("{}", e);
            }
            ExitCode::SUCCESS
        }
        Mode::Serve(db_file) => match serve(&args, &db_file).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e @ QuoteError::StoreMissing(_)) => {
                error!("{} Create one using:\n\tquote_server -i {}", e, db_file.display());
                ExitCode::FAILURE
            }
            Err(e) => {
                error!("Server failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
