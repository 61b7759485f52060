// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Shared types for the account enable action.
//!
//! This crate contains the data structures that cross a process boundary:
//! the job input handed to the action by its harness, the JSON body sent to
//! the identity platform, and the results (or prior failure) the harness
//! receives back and may replay into the recovery entry point.
//!
//! All JSON is camelCase to match the platform's v3 REST conventions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// HTTP status code type
pub type HttpStatusCode = u16;

/// Opaque platform account identifier
pub type AccountId = String;

/// Literal reported by the halt path when no account id was supplied
pub const UNKNOWN_ACCOUNT: &str = "unknown";

/// Message used when a successful response body carries none of its own
pub const DEFAULT_ENABLE_MESSAGE: &str = "Account enable operation initiated";

// ============================================================================
// Job Input
// ============================================================================

/// Parameters the harness supplies to `invoke` and to the recovery entry
/// point.
///
/// Every field is optional at this layer so that a missing required value
/// surfaces as an input validation error rather than a deserialization
/// failure with a less useful message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableAccountInput {
    /// The account to enable
    #[serde(default)]
    pub account_id: Option<String>,
    /// Bare tenant domain, e.g. `acme.api.identitynow.com`
    #[serde(default, alias = "sailpointDomain")]
    pub domain: Option<String>,
    /// Passed through verbatim when non-empty
    #[serde(default)]
    pub external_verification_id: Option<String>,
    /// Tri-state: absent is preserved, never defaulted to `false`
    #[serde(default)]
    pub force_provisioning: Option<bool>,
}

impl EnableAccountInput {
    /// Parse job input from an arbitrary JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

// ============================================================================
// Wire Body
// ============================================================================

/// JSON body of `POST /v3/accounts/{id}/enable`.
///
/// Keys are present only when the corresponding input is present, so the
/// serialized form of an empty body is `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableAccountBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_verification_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_provisioning: Option<bool>,
}

impl EnableAccountBody {
    /// Build a body by conditional inclusion.
    ///
    /// An empty `external_verification_id` is dropped. `force_provisioning`
    /// is carried as given, so `Some(false)` stays on the wire.
    pub fn new(external_verification_id: Option<&str>, force_provisioning: Option<bool>) -> Self {
        Self {
            external_verification_id: external_verification_id
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            force_provisioning,
        }
    }
}

// ============================================================================
// Job Output
// ============================================================================

/// Result of an accepted enable request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableResult {
    pub account_id: AccountId,
    pub enabled: bool,
    /// Provisioning task created by the platform, when it reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub message: String,
    /// Local wall-clock time at which the success response was observed
    pub enabled_at: DateTime<Utc>,
}

/// Which failure class a successful recovery retried past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMethod {
    RateLimitRetry,
    ServiceRetry,
}

impl RecoveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryMethod::RateLimitRetry => "rate_limit_retry",
            RecoveryMethod::ServiceRetry => "service_retry",
        }
    }
}

impl std::fmt::Display for RecoveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the recovery entry point when its single retry succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveredEnable {
    #[serde(flatten)]
    pub result: EnableResult,
    pub recovery_method: RecoveryMethod,
}

/// A failed attempt as the harness carries it back into recovery.
///
/// `status_code` may have been lost in transit; recovery then falls back
/// to inspecting `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<HttpStatusCode>,
    pub message: String,
}

/// Report produced by the halt path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HaltReport {
    pub account_id: AccountId,
    pub reason: String,
    pub halted_at: DateTime<Utc>,
    pub cleanup_completed: bool,
}
