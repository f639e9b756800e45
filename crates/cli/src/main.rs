//! ossctl - Object storage bucket configuration CLI
//!
//! Manages per-bucket configuration documents of S3 and OSS compatible
//! services: response header rules, CORS, lifecycle, website and policy.

use clap::Parser;
use ossctl::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
