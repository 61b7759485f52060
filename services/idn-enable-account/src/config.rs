// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Action configuration

use std::time::Duration;

use crate::classifier::FailureClass;

/// Default wait before retrying a rate-limited request (milliseconds)
const DEFAULT_RATE_LIMIT_BACKOFF_MS: u64 = 30_000;

/// Default wait before retrying after an upstream outage (milliseconds)
const DEFAULT_SERVICE_ERROR_BACKOFF_MS: u64 = 10_000;

/// Default scheme prefixed to the bare tenant domain
const DEFAULT_API_SCHEME: &str = "https";

/// Default HTTP timeout per request (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_RATE_LIMIT_BACKOFF_MS: &str = "RATE_LIMIT_BACKOFF_MS";
pub const ENV_SERVICE_ERROR_BACKOFF_MS: &str = "SERVICE_ERROR_BACKOFF_MS";
pub const ENV_API_SCHEME: &str = "IDN_API_SCHEME";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "IDN_REQUEST_TIMEOUT_SECS";

/// Action configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnableConfig {
    /// Wait before the single retry of a 429
    pub rate_limit_backoff: Duration,
    /// Wait before the single retry of a 502/503/504
    pub service_error_backoff: Duration,
    /// `http` or `https`
    pub api_scheme: String,
    /// HTTP timeout for the enable request
    pub request_timeout: Duration,
}

impl Default for EnableConfig {
    fn default() -> Self {
        Self {
            rate_limit_backoff: Duration::from_millis(DEFAULT_RATE_LIMIT_BACKOFF_MS),
            service_error_backoff: Duration::from_millis(DEFAULT_SERVICE_ERROR_BACKOFF_MS),
            api_scheme: DEFAULT_API_SCHEME.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl EnableConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup. Unparseable values,
    /// and a zero request timeout, fall back to their defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u64| -> u64 {
            match lookup(key) {
                None => default,
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    tracing::warn!(key, value = %raw, default, "Ignoring unparseable setting");
                    default
                }),
            }
        };

        let request_timeout_secs = match number(
            ENV_REQUEST_TIMEOUT_SECS,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ) {
            0 => {
                tracing::warn!(
                    key = ENV_REQUEST_TIMEOUT_SECS,
                    value = 0,
                    default = DEFAULT_REQUEST_TIMEOUT_SECS,
                    "Ignoring zero request timeout"
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            }
            secs => secs,
        };

        let api_scheme = match lookup(ENV_API_SCHEME) {
            None => DEFAULT_API_SCHEME.to_string(),
            Some(raw) => {
                let scheme = raw.trim().to_ascii_lowercase();
                if scheme == "http" || scheme == "https" {
                    scheme
                } else {
                    tracing::warn!(
                        key = ENV_API_SCHEME,
                        value = %raw,
                        default = DEFAULT_API_SCHEME,
                        "Ignoring unsupported scheme"
                    );
                    DEFAULT_API_SCHEME.to_string()
                }
            }
        };

        Self {
            rate_limit_backoff: Duration::from_millis(number(
                ENV_RATE_LIMIT_BACKOFF_MS,
                DEFAULT_RATE_LIMIT_BACKOFF_MS,
            )),
            service_error_backoff: Duration::from_millis(number(
                ENV_SERVICE_ERROR_BACKOFF_MS,
                DEFAULT_SERVICE_ERROR_BACKOFF_MS,
            )),
            api_scheme,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    /// Backoff to wait before retrying a failure of the given class
    pub fn backoff_for(&self, class: FailureClass) -> Duration {
        match class {
            FailureClass::RateLimit => self.rate_limit_backoff,
            FailureClass::ServiceError => self.service_error_backoff,
        }
    }
}
