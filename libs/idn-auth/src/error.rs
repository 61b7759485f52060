// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for idn-auth

use thiserror::Error;

/// Errors that can occur while resolving an `Authorization` header
#[derive(Error, Debug)]
pub enum AuthError {
    /// No credential scheme is fully configured
    #[error(
        "No credentials configured: set a bearer token, basic username/password, \
         OAuth2 access token, or OAuth2 client credentials"
    )]
    MissingCredentials,

    /// A credential scheme is partially or incorrectly configured
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The token endpoint answered, but not with a usable token
    #[error("OAuth2 token exchange failed (HTTP {status}): {message}")]
    TokenExchange { status: u16, message: String },

    /// The token endpoint could not be reached
    #[error("OAuth2 token request failed: {0}")]
    TokenRequest(#[from] reqwest::Error),

    /// The resolved value cannot be carried in an HTTP header
    #[error("Invalid authorization header: {0}")]
    InvalidHeader(String),
}
