// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resolved `Authorization` header values

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;

use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// A fully formed `Authorization` header value.
///
/// The value is a credential, so `Debug` shows only the scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    /// Build a bearer header from a token that may or may not already carry
    /// the `Bearer ` prefix. The result carries it exactly once.
    pub fn bearer(token: &str) -> Self {
        let token = match token.get(..BEARER_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => {
                &token[BEARER_PREFIX.len()..]
            }
            _ => token,
        };
        Self(format!("{}{}", BEARER_PREFIX, token))
    }

    /// Build an HTTP Basic header from a username/password pair.
    pub fn basic(username: &str, password: &str) -> Self {
        let credentials = format!("{}:{}", username, password);
        Self(format!("Basic {}", STANDARD.encode(credentials.as_bytes())))
    }

    /// The header value as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The auth scheme name (`Bearer`, `Basic`).
    pub fn scheme(&self) -> &str {
        self.0.split(' ').next().unwrap_or("")
    }

    /// Convert to a header value marked sensitive so it is redacted by
    /// reqwest's own debug output.
    pub fn to_header_value(&self) -> Result<HeaderValue, AuthError> {
        let mut value = HeaderValue::from_str(&self.0)
            .map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthHeader({} [REDACTED])", self.scheme())
    }
}
