// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Account Enable Action Library
//!
//! Enables a disabled account on the identity platform by POSTing to
//! `/v3/accounts/{id}/enable`, then classifies the result. The platform
//! accepts the request asynchronously (202) and creates a provisioning task
//! that this action does not follow.
//!
//! # Modules
//!
//! - [`authorizer`] - Lazily resolved `Authorization` header
//! - [`config`] - Backoff, scheme, and timeout settings from the environment
//! - [`request`] - Input validation and request construction
//! - [`transport`] - The HTTP exchange
//! - [`invoker`] - One attempt: build, send, classify
//! - [`classifier`] - Outcomes and retry dispositions
//! - [`recovery`] - The single bounded retry behind the recovery entry point
//! - [`halt`] - Halt reporting
//! - [`job`] - The `invoke` / `error` / `halt` lifecycle used by harnesses
//! - [`harness`] - The command-line harness around [`job`]

pub mod authorizer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod halt;
pub mod harness;
pub mod invoker;
pub mod job;
pub mod recovery;
pub mod request;
pub mod transport;

pub use authorizer::{Authorizer, CredentialAuthorizer};
pub use classifier::{Disposition, FailureClass, Outcome};
pub use config::EnableConfig;
pub use error::EnableError;
pub use job::EnableAccountJob;
pub use transport::{EnableTransport, HttpTransport, RawResponse};
