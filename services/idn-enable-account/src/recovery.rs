// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Recovery entry point
//!
//! The harness calls recovery with the failure of a previous attempt. The
//! executor walks a fixed state machine:
//!
//! ```text
//! Received ──fatal──────────────────────────────▶ RecoveredFatal
//!    │
//!    └─retryable─▶ BackoffWait ─▶ Retrying ─ok──▶ RecoveredSuccess
//!                                    │
//!                                    └─any error─▶ RecoveredFatal
//! ```
//!
//! `Retrying` has no edge back to `BackoffWait`, so at most one network
//! call is made per recovery, whatever the retry returns.

use std::time::Duration;

use idn_accounts_api::{HttpStatusCode, PriorFailure, RecoveredEnable};

use crate::classifier::{Disposition, FailureClass, Outcome, disposition};
use crate::config::EnableConfig;
use crate::error::EnableError;
use crate::invoker::EnableInvoker;
use crate::request::EnableParams;

/// States of one recovery.
#[derive(Debug)]
pub enum RecoveryState {
    Received,
    BackoffWait {
        class: FailureClass,
        backoff: Duration,
    },
    Retrying {
        class: FailureClass,
    },
    RecoveredSuccess(RecoveredEnable),
    RecoveredFatal(EnableError),
}

impl RecoveryState {
    fn name(&self) -> &'static str {
        match self {
            RecoveryState::Received => "received",
            RecoveryState::BackoffWait { .. } => "backoff_wait",
            RecoveryState::Retrying { .. } => "retrying",
            RecoveryState::RecoveredSuccess(_) => "recovered_success",
            RecoveryState::RecoveredFatal(_) => "recovered_fatal",
        }
    }
}

/// Drives a single recovery to a terminal state.
pub struct RecoveryExecutor<'a> {
    invoker: &'a EnableInvoker,
    config: &'a EnableConfig,
}

impl<'a> RecoveryExecutor<'a> {
    pub fn new(invoker: &'a EnableInvoker, config: &'a EnableConfig) -> Self {
        Self { invoker, config }
    }

    /// Run recovery for `params` given the failure of the previous attempt.
    pub async fn recover(
        &self,
        params: &EnableParams,
        failure: &PriorFailure,
    ) -> Result<RecoveredEnable, EnableError> {
        let mut state = RecoveryState::Received;
        loop {
            state = match state {
                RecoveryState::RecoveredSuccess(recovered) => return Ok(recovered),
                RecoveryState::RecoveredFatal(err) => return Err(err),
                other => {
                    let from = other.name();
                    let next = self.step(other, params, failure).await;
                    tracing::debug!(
                        account_id = %params.account_id,
                        from,
                        to = next.name(),
                        "Recovery transition"
                    );
                    next
                }
            };
        }
    }

    async fn step(
        &self,
        state: RecoveryState,
        params: &EnableParams,
        failure: &PriorFailure,
    ) -> RecoveryState {
        match state {
            RecoveryState::Received => {
                match disposition(failure.status_code, &failure.message, self.config) {
                    Disposition::Retryable { class, backoff } => {
                        RecoveryState::BackoffWait { class, backoff }
                    }
                    Disposition::Fatal { message } => {
                        tracing::error!(
                            account_id = %params.account_id,
                            status = failure.status_code,
                            "Failure is not recoverable"
                        );
                        RecoveryState::RecoveredFatal(unrecoverable(
                            params,
                            failure.status_code,
                            message,
                        ))
                    }
                }
            }
            RecoveryState::BackoffWait { class, backoff } => {
                tracing::info!(
                    account_id = %params.account_id,
                    backoff_ms = backoff.as_millis() as u64,
                    recovery_method = %class.recovery_method(),
                    "Waiting before retrying enable"
                );
                tokio::time::sleep(backoff).await;
                RecoveryState::Retrying { class }
            }
            RecoveryState::Retrying { class } => {
                match self.invoker.attempt(params).await.and_then(Outcome::into_result) {
                    Ok(result) => {
                        tracing::info!(
                            account_id = %params.account_id,
                            recovery_method = %class.recovery_method(),
                            "Account enable recovered"
                        );
                        RecoveryState::RecoveredSuccess(RecoveredEnable {
                            result,
                            recovery_method: class.recovery_method(),
                        })
                    }
                    Err(err) => {
                        tracing::error!(
                            account_id = %params.account_id,
                            error = %err,
                            "Retry failed; giving up"
                        );
                        RecoveryState::RecoveredFatal(unrecoverable(
                            params,
                            err.status_code(),
                            err.to_string(),
                        ))
                    }
                }
            }
            terminal @ (RecoveryState::RecoveredSuccess(_) | RecoveryState::RecoveredFatal(_)) => {
                terminal
            }
        }
    }
}

fn unrecoverable(
    params: &EnableParams,
    status: Option<HttpStatusCode>,
    message: String,
) -> EnableError {
    EnableError::Unrecoverable {
        account_id: params.account_id.clone(),
        status,
        message,
    }
}
