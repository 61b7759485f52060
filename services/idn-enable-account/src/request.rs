// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Enable request construction
//!
//! Input is validated once into [`EnableParams`]; every attempt (the
//! original call and the single recovery retry) then builds its own
//! [`EnableRequest`] from those params.
//!
//! The account id is an opaque, caller-controlled string placed in a URL
//! path segment. It is always percent-encoded as a whole segment so that
//! `/`, `?`, `&`, `=` and friends cannot alter the path or add a query.

use idn_accounts_api::{EnableAccountBody, EnableAccountInput};
use idn_auth::AuthHeader;
use url::Url;

use crate::error::EnableError;

/// Scheme and host of the platform's REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseAddress(Url);

impl BaseAddress {
    /// Combine a bare tenant domain (`host` or `host:port`) with a scheme.
    ///
    /// Anything that is not a bare domain (a scheme, a path, a query,
    /// credentials, or whitespace) is rejected rather than guessed at.
    pub fn from_domain(domain: &str, scheme: &str) -> Result<Self, EnableError> {
        let domain = domain.strip_suffix('/').unwrap_or(domain);

        if domain.is_empty() {
            return Err(EnableError::InvalidInput("domain is required".to_string()));
        }
        if domain.contains("://")
            || domain
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@' | '\\'))
        {
            return Err(EnableError::InvalidInput(format!(
                "domain must be a bare host name, got {:?}",
                domain
            )));
        }

        let url = Url::parse(&format!("{}://{}", scheme, domain)).map_err(|e| {
            EnableError::InvalidInput(format!("domain {:?} is not a valid host: {}", domain, e))
        })?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(EnableError::InvalidInput(format!(
                "domain {:?} is not a valid host",
                domain
            )));
        }

        Ok(Self(url))
    }

    /// `{base}/v3/accounts/{id}/enable` with the id encoded as one segment.
    pub fn enable_url(&self, account_id: &str) -> Result<Url, EnableError> {
        let base = self.0.as_str().trim_end_matches('/');
        let url = format!(
            "{}/v3/accounts/{}/enable",
            base,
            urlencoding::encode(account_id)
        );
        Url::parse(&url)
            .map_err(|e| EnableError::InvalidInput(format!("cannot build request URL: {}", e)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated job input shared by every attempt of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableParams {
    pub account_id: String,
    pub base: BaseAddress,
    pub external_verification_id: Option<String>,
    pub force_provisioning: Option<bool>,
}

impl EnableParams {
    /// Validate harness input.
    pub fn from_input(input: &EnableAccountInput, scheme: &str) -> Result<Self, EnableError> {
        let account_id = input
            .account_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| EnableError::InvalidInput("accountId is required".to_string()))?;

        // Dot segments survive percent-encoding and would be collapsed by URL
        // normalization, retargeting the request at a different resource.
        if account_id == "." || account_id == ".." {
            return Err(EnableError::InvalidInput(format!(
                "accountId {:?} is not a valid identifier",
                account_id
            )));
        }

        let domain = input
            .domain
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| EnableError::InvalidInput("domain is required".to_string()))?;

        Ok(Self {
            account_id: account_id.to_string(),
            base: BaseAddress::from_domain(domain.trim(), scheme)?,
            external_verification_id: input.external_verification_id.clone(),
            force_provisioning: input.force_provisioning,
        })
    }

    /// Parse and validate raw JSON input. Non-string fields are rejected.
    pub fn from_value(value: serde_json::Value, scheme: &str) -> Result<Self, EnableError> {
        let input = EnableAccountInput::from_value(value)
            .map_err(|e| EnableError::InvalidInput(e.to_string()))?;
        Self::from_input(&input, scheme)
    }
}

/// One fully formed, not yet sent, enable request.
#[derive(Debug, Clone)]
pub struct EnableRequest {
    pub account_id: String,
    pub url: Url,
    pub body: EnableAccountBody,
    pub authorization: AuthHeader,
}

impl EnableRequest {
    pub fn build(params: &EnableParams, authorization: &AuthHeader) -> Result<Self, EnableError> {
        Ok(Self {
            account_id: params.account_id.clone(),
            url: params.base.enable_url(&params.account_id)?,
            body: EnableAccountBody::new(
                params.external_verification_id.as_deref(),
                params.force_provisioning,
            ),
            authorization: authorization.clone(),
        })
    }
}
