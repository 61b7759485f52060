// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Command-line job harness
//!
//! Runs one lifecycle step of the enable action and returns its result as
//! JSON. A failed step returns the failure in the shape that
//! `error --failure` reads back, so a scheduler can pipe one into the other.
//!
//! Settings, credentials, and the fallback tenant domain (`IDN_DOMAIN`) are
//! read through a lookup function so the whole harness runs against an
//! injected environment. Credentials are resolved only when a request is
//! about to be sent.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use idn_accounts_api::{EnableAccountInput, PriorFailure};
use idn_auth::CredentialSource;
use serde::Serialize;
use serde_json::Value;

use crate::authorizer::CredentialAuthorizer;
use crate::config::EnableConfig;
use crate::error::EnableError;
use crate::job::EnableAccountJob;
use crate::transport::HttpTransport;

/// Tenant domain used when neither `--domain` nor the input JSON has one
pub const ENV_DOMAIN: &str = "IDN_DOMAIN";

const STDIN_PATH: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "idn-enable-account", version)]
#[command(about = "Enable a disabled identity-platform account", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send the enable request once
    Invoke {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Recover from a failed invoke with at most one retry
    Error {
        #[command(flatten)]
        input: InputArgs,
        /// JSON file (or "-" for stdin) holding the prior failure
        #[arg(long, conflicts_with_all = ["status", "message"])]
        failure: Option<PathBuf>,
        /// HTTP status of the prior failure, if known
        #[arg(long)]
        status: Option<u16>,
        /// Message of the prior failure
        #[arg(long)]
        message: Option<String>,
    },
    /// Report a halt; makes no network calls
    Halt {
        /// Why the job is being halted
        #[arg(long)]
        reason: String,
        /// Account the job was working on
        #[arg(long)]
        account_id: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON file (or "-" for stdin) holding the job input
    #[arg(
        long,
        conflicts_with_all = ["account_id", "external_verification_id", "force_provisioning"]
    )]
    input: Option<PathBuf>,
    /// Account to enable
    #[arg(long)]
    account_id: Option<String>,
    /// Bare tenant domain, e.g. acme.api.identitynow.com. Overrides the
    /// input JSON; IDN_DOMAIN is used when neither has one.
    #[arg(long)]
    domain: Option<String>,
    /// Passed through to the platform when set
    #[arg(long)]
    external_verification_id: Option<String>,
    /// Force provisioning (true/false); omitted when not given
    #[arg(long)]
    force_provisioning: Option<bool>,
}

impl InputArgs {
    fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_some_and(is_stdin)
    }

    fn into_input<F, R>(self, lookup: &F, stdin: &mut R) -> Result<EnableAccountInput>
    where
        F: Fn(&str) -> Option<String>,
        R: Read,
    {
        let mut input = match &self.input {
            Some(path) => {
                let value: Value = serde_json::from_str(&read_source(path, stdin)?)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                EnableAccountInput::from_value(value)
                    .map_err(|e| EnableError::InvalidInput(e.to_string()))?
            }
            None => EnableAccountInput {
                account_id: self.account_id,
                domain: None,
                external_verification_id: self.external_verification_id,
                force_provisioning: self.force_provisioning,
            },
        };

        input.domain = self
            .domain
            .or(input.domain)
            .or_else(|| lookup(ENV_DOMAIN).filter(|d| !d.trim().is_empty()));

        Ok(input)
    }
}

/// Result of one harness step.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessOutput {
    /// The step's result, or a prior-failure document on failure
    pub body: Value,
    /// Whether the step succeeded; the binary exits 1 otherwise
    pub success: bool,
}

impl HarnessOutput {
    fn success<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            body: serde_json::to_value(value).context("Failed to serialize output")?,
            success: true,
        })
    }

    fn failure(err: EnableError) -> Result<Self> {
        tracing::error!(error = %err, status = err.status_code(), "Enable job failed");
        Ok(Self {
            body: serde_json::to_value(err.to_prior_failure())
                .context("Failed to serialize failure")?,
            success: false,
        })
    }

    fn from_outcome<T: Serialize>(outcome: Result<T, EnableError>) -> Result<Self> {
        match outcome {
            Ok(value) => Self::success(&value),
            Err(err) => Self::failure(err),
        }
    }
}

/// Run one harness step.
///
/// `lookup` supplies environment settings and `stdin` backs any `-` path.
/// Usage problems (unreadable files, two stdin sources) are `Err`; job
/// failures are an unsuccessful [`HarnessOutput`].
pub async fn run<F, R>(cli: Cli, lookup: F, mut stdin: R) -> Result<HarnessOutput>
where
    F: Fn(&str) -> Option<String>,
    R: Read,
{
    let config = EnableConfig::from_vars(&lookup);

    match cli.command {
        Commands::Invoke { input } => {
            let input = match input.into_input(&lookup, &mut stdin) {
                Ok(input) => input,
                Err(err) => return invalid_input(err),
            };
            let job = build_job(config, &lookup)?;
            HarnessOutput::from_outcome(job.invoke(&input).await)
        }
        Commands::Error {
            input,
            failure,
            status,
            message,
        } => {
            if input.reads_stdin() && failure.as_deref().is_some_and(is_stdin) {
                bail!("--input and --failure cannot both read from stdin");
            }

            let input = match input.into_input(&lookup, &mut stdin) {
                Ok(input) => input,
                Err(err) => return invalid_input(err),
            };
            let failure = match failure {
                Some(path) => {
                    let raw = read_source(&path, &mut stdin)?;
                    serde_json::from_str::<PriorFailure>(&raw)
                        .with_context(|| format!("Failed to parse {}", path.display()))?
                }
                None => PriorFailure {
                    status_code: status,
                    message: message.unwrap_or_default(),
                },
            };

            let job = build_job(config, &lookup)?;
            HarnessOutput::from_outcome(job.error(&input, &failure).await)
        }
        Commands::Halt { reason, account_id } => {
            HarnessOutput::success(&crate::halt::halt(&reason, account_id.as_deref()))
        }
    }
}

/// Input that parsed as JSON but not as job input is a job failure; other
/// errors stay usage errors.
fn invalid_input(err: anyhow::Error) -> Result<HarnessOutput> {
    match err.downcast::<EnableError>() {
        Ok(err) => HarnessOutput::failure(err),
        Err(err) => Err(err),
    }
}

fn build_job<F>(config: EnableConfig, lookup: &F) -> Result<EnableAccountJob>
where
    F: Fn(&str) -> Option<String>,
{
    let transport = HttpTransport::new(config.request_timeout)?;
    let credentials = CredentialSource::from_vars(lookup);
    let authorizer = CredentialAuthorizer::new(credentials, transport.client().clone());

    Ok(EnableAccountJob::new(config, Arc::new(transport), authorizer))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

fn read_source<R: Read>(path: &Path, stdin: &mut R) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
