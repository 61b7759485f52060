// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! One enable attempt: build, send, classify.

use std::sync::Arc;

use crate::authorizer::Authorizer;
use crate::classifier::{Outcome, classify_response};
use crate::error::EnableError;
use crate::request::{EnableParams, EnableRequest};
use crate::transport::EnableTransport;

/// Performs single enable attempts against a transport.
#[derive(Clone)]
pub struct EnableInvoker {
    transport: Arc<dyn EnableTransport>,
    authorizer: Arc<dyn Authorizer>,
}

impl EnableInvoker {
    pub fn new(
        transport: Arc<dyn EnableTransport>,
        authorizer: impl Authorizer + 'static,
    ) -> Self {
        Self {
            transport,
            authorizer: Arc::new(authorizer),
        }
    }

    /// Send exactly one enable request for `params`.
    ///
    /// A completed exchange is always `Ok`, whatever its status; only a
    /// request that could not be authorized, built or sent is `Err`.
    pub async fn attempt(&self, params: &EnableParams) -> Result<Outcome, EnableError> {
        let authorization = self.authorizer.authorization().await?;
        let request = EnableRequest::build(params, &authorization)?;
        let response = self.transport.send(&request).await?;
        let status = response.status;
        let outcome = classify_response(&params.account_id, response);

        match &outcome {
            Outcome::Enabled(result) => tracing::info!(
                account_id = %params.account_id,
                status,
                task_id = result.task_id.as_deref().unwrap_or(""),
                "Account enable accepted"
            ),
            Outcome::Failure(failure) => tracing::warn!(
                account_id = %params.account_id,
                status,
                message = %failure.message,
                "Account enable rejected"
            ),
        }

        Ok(outcome)
    }
}
