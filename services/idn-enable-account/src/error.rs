// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for the enable action

use idn_accounts_api::{HttpStatusCode, PriorFailure};
use idn_auth::AuthError;
use thiserror::Error;

/// Prefix of every message describing a failed enable attempt
pub const FAILED_PREFIX: &str = "Failed to enable account";

/// Errors surfaced to the job harness
#[derive(Error, Debug)]
pub enum EnableError {
    /// Missing or malformed job input; never retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No usable credential could be resolved; never retried
    #[error("Failed to resolve credentials: {0}")]
    Auth(#[from] AuthError),

    /// The platform rejected the request, or it never reached the platform.
    /// `message` already starts with "Failed to enable account".
    #[error("{message}")]
    Failed {
        status: Option<HttpStatusCode>,
        message: String,
    },

    /// The recovery entry point gave up
    #[error("Unrecoverable error enabling account {account_id}: {message}")]
    Unrecoverable {
        account_id: String,
        status: Option<HttpStatusCode>,
        message: String,
    },
}

impl EnableError {
    /// Build a `Failed` error from upstream detail text.
    pub fn failed(status: Option<HttpStatusCode>, detail: impl std::fmt::Display) -> Self {
        EnableError::Failed {
            status,
            message: format!("{}: {}", FAILED_PREFIX, detail),
        }
    }

    /// Numeric HTTP status, when one is known
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            EnableError::Failed { status, .. } | EnableError::Unrecoverable { status, .. } => {
                *status
            }
            EnableError::InvalidInput(_) | EnableError::Auth(_) => None,
        }
    }

    /// The form in which the harness hands this error back to recovery.
    pub fn to_prior_failure(&self) -> PriorFailure {
        PriorFailure {
            status_code: self.status_code(),
            message: self.to_string(),
        }
    }
}
