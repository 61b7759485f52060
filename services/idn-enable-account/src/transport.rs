// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP exchange for the enable request
//!
//! The transport sends exactly one POST per call and hands back the status
//! and body without interpreting either. The POST is not idempotent on the
//! platform side, so nothing here retries.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use idn_accounts_api::HttpStatusCode;

use crate::error::EnableError;
use crate::request::EnableRequest;

const USER_AGENT: &str = concat!("idn-enable-account/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: HttpStatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait abstraction for the transport used by the action.
#[async_trait]
pub trait EnableTransport: Send + Sync {
    /// Send one enable request. Only failures to complete the exchange
    /// (DNS, TLS, connect, timeout) are errors.
    async fn send(&self, request: &EnableRequest) -> Result<RawResponse, EnableError>;
}

/// Transport backed by a reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new(timeout: Duration) -> Result<Self> {
        idn_auth::ensure_crypto_provider();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// The underlying client, shared with credential resolution.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl EnableTransport for HttpTransport {
    async fn send(&self, request: &EnableRequest) -> Result<RawResponse, EnableError> {
        let authorization = request.authorization.to_header_value()?;

        tracing::debug!(
            account_id = %request.account_id,
            url = %request.url,
            "Sending enable request"
        );

        let response = self
            .client
            .post(request.url.clone())
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    account_id = %request.account_id,
                    error = %e,
                    "Enable request failed in transit"
                );
                EnableError::failed(None, transport_detail(e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| EnableError::failed(Some(status), e))?;

        Ok(RawResponse { status, body })
    }
}

/// Describe a failed exchange without the request URL. The URL carries the
/// account id and port, and the text of a status-less failure is later
/// scanned for rate-limit markers.
fn transport_detail(err: reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request not completed"
    };
    format!("{} ({})", kind, err.without_url())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use crate::classifier::failure_class;

    #[test]
    fn test_success_range() {
        let ok = |status| RawResponse {
            status,
            body: String::new(),
        };
        assert!(ok(202).is_success());
        assert!(ok(200).is_success());
        assert!(!ok(301).is_success());
        assert!(!ok(429).is_success());
    }

    #[tokio::test]
    async fn test_connect_failure_detail_omits_url() {
        idn_auth::ensure_crypto_provider();
        let err = reqwest::Client::new()
            .post("http://127.0.0.1:9/v3/accounts/user-4291/enable")
            .send()
            .await
            .unwrap_err();

        let message = EnableError::failed(None, transport_detail(err)).to_string();
        assert!(message.starts_with("Failed to enable account: connection failed"), "{}", message);
        assert!(!message.contains("4291"), "{}", message);
        assert!(!message.contains("127.0.0.1"), "{}", message);
        assert_eq!(failure_class(None, &message), None);
    }
}
