// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Account enable job harness
//!
//! Prints the result of one lifecycle step as JSON on stdout and exits 1
//! when the step failed. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;

use idn_enable_account::harness::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "idn_enable_account=info,idn_auth=info".to_string()),
        ))
        .init();

    let cli = Cli::parse();
    let stdin = std::io::stdin().lock();
    let output = harness::run(cli, |key| std::env::var(key).ok(), stdin).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output.body).context("Failed to serialize output")?
    );

    if !output.success {
        std::process::exit(1);
    }
    Ok(())
}
