// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! OAuth2 client-credentials token exchange

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::credential::AuthStyle;
use crate::error::AuthError;
use crate::header::AuthHeader;

/// Everything needed to mint a token at a client-credentials endpoint.
#[derive(Debug)]
pub struct ClientCredentialsGrant {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub scope: Option<String>,
    pub audience: Option<String>,
    pub auth_style: AuthStyle,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

impl ClientCredentialsGrant {
    /// Form-encoded request body for this grant.
    pub fn form_body(&self) -> String {
        let mut form = url::form_urlencoded::Serializer::new(String::new());
        form.append_pair("grant_type", "client_credentials");
        if let Some(scope) = &self.scope {
            form.append_pair("scope", scope);
        }
        if let Some(audience) = &self.audience {
            form.append_pair("audience", audience);
        }
        if self.auth_style == AuthStyle::InParams {
            form.append_pair("client_id", &self.client_id);
            form.append_pair("client_secret", self.client_secret.expose_secret());
        }
        form.finish()
    }
}

/// Exchange client credentials for an access token.
pub async fn exchange_client_credentials(
    client: &reqwest::Client,
    grant: &ClientCredentialsGrant,
) -> Result<String, AuthError> {
    let mut request = client
        .post(&grant.token_url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT, "application/json")
        .body(grant.form_body());

    if grant.auth_style == AuthStyle::InHeader {
        let basic = AuthHeader::basic(&grant.client_id, grant.client_secret.expose_secret());
        request = request.header(AUTHORIZATION, basic.to_header_value()?);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            token_url = %grant.token_url,
            "OAuth2 token endpoint rejected client credentials"
        );
        return Err(AuthError::TokenExchange {
            status: status.as_u16(),
            message: text,
        });
    }

    let token = serde_json::from_str::<TokenResponse>(&text)
        .ok()
        .and_then(|t| t.access_token)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::TokenExchange {
            status: status.as_u16(),
            message: "response did not include an access_token".to_string(),
        })?;

    tracing::debug!(token_url = %grant.token_url, "Obtained OAuth2 access token");
    Ok(token)
}
