// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Authorization for identity-platform REST calls
//!
//! This library turns whichever credential the deployment configured into
//! a single `Authorization` header value. It supports:
//!
//! - A static bearer secret
//! - HTTP Basic username/password
//! - A pre-obtained OAuth2 access token (authorization-code flow)
//! - An OAuth2 client-credentials exchange against a token endpoint, with
//!   the client secret delivered either as a Basic header or as form fields
//!
//! # Selection
//!
//! When several schemes are configured the first complete one wins, in the
//! order listed above. Callers consume only the resulting [`AuthHeader`].
//!
//! # Example
//!
//! ```ignore
//! use idn_auth::CredentialSource;
//!
//! let credential = CredentialSource::from_env().select()?;
//! let header = credential.resolve(&reqwest::Client::new()).await?;
//! ```

pub mod credential;
pub mod error;
pub mod header;
pub mod oauth;

pub use credential::{AuthStyle, Credential, CredentialSource};
pub use error::AuthError;
pub use header::AuthHeader;
pub use oauth::{ClientCredentialsGrant, exchange_client_credentials};

/// Install the workspace's rustls crypto provider (`ring`) as the process
/// default. reqwest is built with `rustls-no-provider`, so this must run
/// before the first client is constructed. Safe to call repeatedly.
pub fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
