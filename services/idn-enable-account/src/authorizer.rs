// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Supplies the `Authorization` header for enable requests.
//!
//! Credentials are selected and resolved on first use, so a job that never
//! sends a request (invalid input, a fatal prior failure, a halt) never
//! talks to a token endpoint.

use async_trait::async_trait;
use idn_auth::{AuthHeader, CredentialSource};
use tokio::sync::OnceCell;

use crate::error::EnableError;

/// Source of the header attached to each enable request.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorization(&self) -> Result<AuthHeader, EnableError>;
}

/// An already resolved header.
#[async_trait]
impl Authorizer for AuthHeader {
    async fn authorization(&self) -> Result<AuthHeader, EnableError> {
        Ok(self.clone())
    }
}

/// Resolves the configured credential once, on the first request.
pub struct CredentialAuthorizer {
    source: CredentialSource,
    client: reqwest::Client,
    header: OnceCell<AuthHeader>,
}

impl CredentialAuthorizer {
    /// `client` is used for a client-credentials token exchange, if one is
    /// configured.
    pub fn new(source: CredentialSource, client: reqwest::Client) -> Self {
        Self {
            source,
            client,
            header: OnceCell::new(),
        }
    }
}

#[async_trait]
impl Authorizer for CredentialAuthorizer {
    async fn authorization(&self) -> Result<AuthHeader, EnableError> {
        let header = self
            .header
            .get_or_try_init(|| async {
                let credential = self.source.clone().select()?;
                tracing::info!(scheme = credential.kind(), "Resolving configured credential");
                credential.resolve(&self.client).await
            })
            .await?;
        Ok(header.clone())
    }
}
