// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Credential schemes and their selection from the environment

use secrecy::{ExposeSecret, SecretString};

use crate::error::AuthError;
use crate::header::AuthHeader;
use crate::oauth::{ClientCredentialsGrant, exchange_client_credentials};

pub const ENV_BEARER_TOKEN: &str = "SECRETS_BEARER_AUTH_TOKEN";
pub const ENV_BASIC_USERNAME: &str = "SECRETS_BASIC_USERNAME";
pub const ENV_BASIC_PASSWORD: &str = "SECRETS_BASIC_PASSWORD";
pub const ENV_OAUTH2_ACCESS_TOKEN: &str = "SECRETS_OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN";
pub const ENV_OAUTH2_TOKEN_URL: &str = "ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL";
pub const ENV_OAUTH2_CLIENT_ID: &str = "ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID";
pub const ENV_OAUTH2_CLIENT_SECRET: &str = "SECRETS_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET";
pub const ENV_OAUTH2_SCOPE: &str = "ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_SCOPE";
pub const ENV_OAUTH2_AUDIENCE: &str = "ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_AUDIENCE";
pub const ENV_OAUTH2_AUTH_STYLE: &str = "ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_AUTH_STYLE";

/// How client credentials are delivered to the token endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStyle {
    /// HTTP Basic `Authorization` header
    InHeader,
    /// `client_id` / `client_secret` form fields
    #[default]
    InParams,
}

impl std::str::FromStr for AuthStyle {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("InHeader") {
            Ok(AuthStyle::InHeader)
        } else if s.eq_ignore_ascii_case("InParams") {
            Ok(AuthStyle::InParams)
        } else {
            Err(AuthError::ConfigError(format!(
                "{} must be InHeader or InParams, got {:?}",
                ENV_OAUTH2_AUTH_STYLE, s
            )))
        }
    }
}

/// One configured way of authenticating to the platform.
#[derive(Debug)]
pub enum Credential {
    /// Static bearer secret
    Bearer { token: SecretString },
    /// Username/password pair sent as HTTP Basic
    Basic {
        username: String,
        password: SecretString,
    },
    /// Access token obtained out of band through an authorization-code flow
    OAuth2AccessToken { token: SecretString },
    /// Token minted on demand through a client-credentials exchange
    OAuth2ClientCredentials(ClientCredentialsGrant),
}

impl Credential {
    /// Short scheme name for logs; never contains secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Bearer { .. } => "bearer",
            Credential::Basic { .. } => "basic",
            Credential::OAuth2AccessToken { .. } => "oauth2_authorization_code",
            Credential::OAuth2ClientCredentials(_) => "oauth2_client_credentials",
        }
    }

    /// Produce the `Authorization` header value for this credential.
    ///
    /// Only the client-credentials scheme touches the network.
    pub async fn resolve(&self, client: &reqwest::Client) -> Result<AuthHeader, AuthError> {
        tracing::debug!(scheme = self.kind(), "Resolving authorization header");
        match self {
            Credential::Bearer { token } | Credential::OAuth2AccessToken { token } => {
                Ok(AuthHeader::bearer(token.expose_secret()))
            }
            Credential::Basic { username, password } => {
                Ok(AuthHeader::basic(username, password.expose_secret()))
            }
            Credential::OAuth2ClientCredentials(grant) => {
                let token = exchange_client_credentials(client, grant).await?;
                Ok(AuthHeader::bearer(&token))
            }
        }
    }
}

/// Raw credential settings, before a scheme is chosen.
#[derive(Default, Clone)]
pub struct CredentialSource {
    pub bearer_token: Option<String>,
    pub basic_username: Option<String>,
    pub basic_password: Option<String>,
    pub oauth2_access_token: Option<String>,
    pub oauth2_token_url: Option<String>,
    pub oauth2_client_id: Option<String>,
    pub oauth2_client_secret: Option<String>,
    pub oauth2_scope: Option<String>,
    pub oauth2_audience: Option<String>,
    pub oauth2_auth_style: Option<String>,
}

impl CredentialSource {
    /// Load credential settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load credential settings through an arbitrary lookup. Empty values
    /// are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            bearer_token: get(ENV_BEARER_TOKEN),
            basic_username: get(ENV_BASIC_USERNAME),
            basic_password: get(ENV_BASIC_PASSWORD),
            oauth2_access_token: get(ENV_OAUTH2_ACCESS_TOKEN),
            oauth2_token_url: get(ENV_OAUTH2_TOKEN_URL),
            oauth2_client_id: get(ENV_OAUTH2_CLIENT_ID),
            oauth2_client_secret: get(ENV_OAUTH2_CLIENT_SECRET),
            oauth2_scope: get(ENV_OAUTH2_SCOPE),
            oauth2_audience: get(ENV_OAUTH2_AUDIENCE),
            oauth2_auth_style: get(ENV_OAUTH2_AUTH_STYLE),
        }
    }

    /// Choose a credential: bearer, then basic, then OAuth2 access token,
    /// then OAuth2 client credentials. The first complete scheme wins.
    pub fn select(self) -> Result<Credential, AuthError> {
        if let Some(token) = self.bearer_token {
            return Ok(Credential::Bearer {
                token: SecretString::from(token),
            });
        }

        if let (Some(username), Some(password)) = (self.basic_username, self.basic_password) {
            return Ok(Credential::Basic {
                username,
                password: SecretString::from(password),
            });
        }

        if let Some(token) = self.oauth2_access_token {
            return Ok(Credential::OAuth2AccessToken {
                token: SecretString::from(token),
            });
        }

        if self.oauth2_token_url.is_none()
            && self.oauth2_client_id.is_none()
            && self.oauth2_client_secret.is_none()
        {
            return Err(AuthError::MissingCredentials);
        }

        let require = |value: Option<String>, key: &str| {
            value.ok_or_else(|| {
                AuthError::ConfigError(format!(
                    "OAuth2 client credentials are incomplete: {} is not set",
                    key
                ))
            })
        };

        let auth_style = match self.oauth2_auth_style.as_deref() {
            Some(style) => style.parse()?,
            None => AuthStyle::default(),
        };

        Ok(Credential::OAuth2ClientCredentials(ClientCredentialsGrant {
            token_url: require(self.oauth2_token_url, ENV_OAUTH2_TOKEN_URL)?,
            client_id: require(self.oauth2_client_id, ENV_OAUTH2_CLIENT_ID)?,
            client_secret: SecretString::from(require(
                self.oauth2_client_secret,
                ENV_OAUTH2_CLIENT_SECRET,
            )?),
            scope: self.oauth2_scope,
            audience: self.oauth2_audience,
            auth_style,
        }))
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSource")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .field("basic_username", &self.basic_username)
            .field("basic_password", &self.basic_password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "oauth2_access_token",
                &self.oauth2_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("oauth2_token_url", &self.oauth2_token_url)
            .field("oauth2_client_id", &self.oauth2_client_id)
            .field(
                "oauth2_client_secret",
                &self.oauth2_client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("oauth2_scope", &self.oauth2_scope)
            .field("oauth2_audience", &self.oauth2_audience)
            .field("oauth2_auth_style", &self.oauth2_auth_style)
            .finish()
    }
}
