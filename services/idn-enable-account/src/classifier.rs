// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Outcome classification
//!
//! Two decisions live here:
//!
//! 1. [`classify_response`] turns a raw exchange into an [`Outcome`]: any
//!    2xx is `Enabled`, everything else is a `Failure` whose message carries
//!    the most specific detail the platform gave us (`detailCode` and
//!    `trackingId`, then `message`, then the raw body text, then just the
//!    status).
//! 2. [`disposition`] decides whether a failure is worth the single
//!    recovery retry. 429 is a rate limit; 502/503/504 are upstream outages;
//!    everything else is fatal. When the status was lost, a message that
//!    mentions "429" or "rate limit" still counts as a rate limit.

use chrono::Utc;
use idn_accounts_api::{DEFAULT_ENABLE_MESSAGE, EnableResult, HttpStatusCode, RecoveryMethod};
use serde_json::Value;
use std::time::Duration;

use crate::config::EnableConfig;
use crate::error::EnableError;
use crate::transport::RawResponse;

/// A non-2xx response, already rendered for operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status_code: HttpStatusCode,
    pub message: String,
    pub raw_body: Option<String>,
}

/// Result of one completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Enabled(EnableResult),
    Failure(Failure),
}

impl Outcome {
    pub fn into_result(self) -> Result<EnableResult, EnableError> {
        match self {
            Outcome::Enabled(result) => Ok(result),
            Outcome::Failure(failure) => Err(failure.into()),
        }
    }
}

impl From<Failure> for EnableError {
    fn from(failure: Failure) -> Self {
        EnableError::Failed {
            status: Some(failure.status_code),
            message: failure.message,
        }
    }
}

/// Failure classes eligible for the single recovery retry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    RateLimit,
    ServiceError,
}

impl FailureClass {
    pub fn recovery_method(&self) -> RecoveryMethod {
        match self {
            FailureClass::RateLimit => RecoveryMethod::RateLimitRetry,
            FailureClass::ServiceError => RecoveryMethod::ServiceRetry,
        }
    }
}

/// Verdict on a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Retryable {
        class: FailureClass,
        backoff: Duration,
    },
    Fatal {
        message: String,
    },
}

/// Classify a completed exchange for `account_id`.
pub fn classify_response(account_id: &str, response: RawResponse) -> Outcome {
    if response.is_success() {
        return Outcome::Enabled(enabled_result(account_id, &response.body));
    }

    let message = format!(
        "{}: {}",
        crate::error::FAILED_PREFIX,
        failure_detail(response.status, &response.body)
    );

    Outcome::Failure(Failure {
        status_code: response.status,
        message,
        raw_body: (!response.body.is_empty()).then_some(response.body),
    })
}

fn enabled_result(account_id: &str, body: &str) -> EnableResult {
    // A 202 body is informational; an unparseable one still means accepted.
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let task_id = ["id", "taskId"]
        .iter()
        .find_map(|key| parsed.get(key).and_then(value_text));

    let message = parsed
        .get("message")
        .and_then(value_text)
        .unwrap_or_else(|| DEFAULT_ENABLE_MESSAGE.to_string());

    EnableResult {
        account_id: account_id.to_string(),
        enabled: true,
        task_id,
        message,
        enabled_at: Utc::now(),
    }
}

fn failure_detail(status: HttpStatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => {
            if let Some(detail_code) = parsed.get("detailCode").and_then(value_text) {
                let tracking_id = parsed
                    .get("trackingId")
                    .and_then(value_text)
                    .unwrap_or_default();
                format!("{} - {}", detail_code, tracking_id)
            } else if let Some(message) = parsed.get("message").and_then(value_text) {
                message
            } else {
                format!("HTTP {}", status)
            }
        }
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                text.to_string()
            }
        }
    }
}

/// Render a JSON scalar as text; `null` and empty strings count as absent.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Which retryable class, if any, a failure belongs to.
pub fn failure_class(status: Option<HttpStatusCode>, message: &str) -> Option<FailureClass> {
    match status {
        Some(429) => Some(FailureClass::RateLimit),
        Some(502..=504) => Some(FailureClass::ServiceError),
        Some(_) => None,
        None => {
            let lower = message.to_lowercase();
            (lower.contains("429") || lower.contains("rate limit"))
                .then_some(FailureClass::RateLimit)
        }
    }
}

/// Decide how a failure should be handled by the recovery entry point.
pub fn disposition(
    status: Option<HttpStatusCode>,
    message: &str,
    config: &EnableConfig,
) -> Disposition {
    match failure_class(status, message) {
        Some(class) => Disposition::Retryable {
            class,
            backoff: config.backoff_for(class),
        },
        None => Disposition::Fatal {
            message: message.to_string(),
        },
    }
}
