// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Job lifecycle entry points
//!
//! The harness calls [`EnableAccountJob::invoke`] first. If that fails it
//! may call [`EnableAccountJob::error`] once with the failure, and it may
//! call [`EnableAccountJob::halt`] at any time. `invoke` never retries on
//! its own; the only retry happens inside `error`, so every retry is
//! visible to the harness.

use std::sync::Arc;

use idn_accounts_api::{
    EnableAccountInput, EnableResult, HaltReport, PriorFailure, RecoveredEnable,
};

use crate::authorizer::Authorizer;
use crate::classifier::Outcome;
use crate::config::EnableConfig;
use crate::error::EnableError;
use crate::halt;
use crate::invoker::EnableInvoker;
use crate::recovery::RecoveryExecutor;
use crate::request::EnableParams;
use crate::transport::EnableTransport;

/// The enable-account action.
#[derive(Clone)]
pub struct EnableAccountJob {
    config: EnableConfig,
    invoker: EnableInvoker,
}

impl EnableAccountJob {
    /// Create the action around a transport and the source of its
    /// `Authorization` header. The authorizer is consulted only when a
    /// request is about to be sent.
    pub fn new(
        config: EnableConfig,
        transport: Arc<dyn EnableTransport>,
        authorizer: impl Authorizer + 'static,
    ) -> Self {
        Self {
            config,
            invoker: EnableInvoker::new(transport, authorizer),
        }
    }

    pub fn config(&self) -> &EnableConfig {
        &self.config
    }

    /// Primary attempt: one request, success or error.
    pub async fn invoke(&self, input: &EnableAccountInput) -> Result<EnableResult, EnableError> {
        let params = EnableParams::from_input(input, &self.config.api_scheme)?;

        tracing::info!(
            account_id = %params.account_id,
            base = params.base.as_str(),
            force_provisioning = ?params.force_provisioning,
            "Enabling account"
        );

        self.invoker
            .attempt(&params)
            .await
            .and_then(Outcome::into_result)
    }

    /// Recovery entry point for a failed `invoke`.
    pub async fn error(
        &self,
        input: &EnableAccountInput,
        failure: &PriorFailure,
    ) -> Result<RecoveredEnable, EnableError> {
        let params = EnableParams::from_input(input, &self.config.api_scheme)?;

        tracing::info!(
            account_id = %params.account_id,
            status = failure.status_code,
            message = %failure.message,
            "Recovering from failed enable"
        );

        RecoveryExecutor::new(&self.invoker, &self.config)
            .recover(&params, failure)
            .await
    }

    /// Halt the job.
    pub fn halt(&self, reason: &str, account_id: Option<&str>) -> HaltReport {
        halt::halt(reason, account_id)
    }
}
