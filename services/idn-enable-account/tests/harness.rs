// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Tests for the command-line harness: argument parsing, environment
//! lookup, the failure document, and piping `invoke` into `error`.

use std::collections::HashMap;

use clap::Parser;
use idn_enable_account::harness::{self, Cli, HarnessOutput};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A mock platform plus the environment the harness sees
struct HarnessContext {
    server: MockServer,
    vars: HashMap<String, String>,
}

impl HarnessContext {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let vars = HashMap::from([
            ("IDN_API_SCHEME".to_string(), "http".to_string()),
            ("RATE_LIMIT_BACKOFF_MS".to_string(), "10".to_string()),
            ("SERVICE_ERROR_BACKOFF_MS".to_string(), "10".to_string()),
            ("IDN_DOMAIN".to_string(), server.uri().replace("http://", "")),
        ]);
        Self { server, vars }
    }

    fn with_bearer(mut self) -> Self {
        self.set("SECRETS_BEARER_AUTH_TOKEN", "harness-token");
        self
    }

    fn with_client_credentials(mut self) -> Self {
        let token_url = format!("{}/oauth/token", self.server.uri());
        self.set("ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL", &token_url);
        self.set("ENVIRONMENT_OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID", "client");
        self.set("SECRETS_OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET", "secret");
        self
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    async fn run(&self, args: &[&str], stdin: &[u8]) -> anyhow::Result<HarnessOutput> {
        let mut argv = vec!["idn-enable-account"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        harness::run(cli, |key| self.vars.get(key).cloned(), stdin).await
    }

    async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    async fn mount_token_endpoint(&self) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "minted" })),
            )
            .mount(&self.server)
            .await;
    }
}

// ============================================================================
// invoke
// ============================================================================

#[tokio::test]
async fn test_invoke_uses_domain_from_environment() {
    let ctx = HarnessContext::new().await.with_bearer();
    Mock::given(method("POST"))
        .and(path("/v3/accounts/acc-1/enable"))
        .and(header("authorization", "Bearer harness-token"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": "task1" })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let output = ctx.run(&["invoke", "--account-id", "acc-1"], b"").await.unwrap();

    assert!(output.success);
    assert_eq!(output.body["accountId"], "acc-1");
    assert_eq!(output.body["enabled"], true);
    assert_eq!(output.body["taskId"], "task1");
}

#[tokio::test]
async fn test_invoke_reads_json_input_from_stdin() {
    let ctx = HarnessContext::new().await.with_bearer();
    Mock::given(method("POST"))
        .and(path("/v3/accounts/acc-2/enable"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    // No domain in the document; IDN_DOMAIN supplies it.
    let output = ctx
        .run(&["invoke", "--input", "-"], br#"{"accountId":"acc-2"}"#)
        .await
        .unwrap();

    assert!(output.success);
    assert_eq!(output.body["accountId"], "acc-2");
}

#[tokio::test]
async fn test_failed_invoke_prints_prior_failure() {
    let ctx = HarnessContext::new().await.with_bearer();
    Mock::given(method("POST"))
        .and(path("/v3/accounts/acc-1/enable"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detailCode": "NOT_FOUND",
            "trackingId": "track123"
        })))
        .mount(&ctx.server)
        .await;

    let output = ctx.run(&["invoke", "--account-id", "acc-1"], b"").await.unwrap();

    assert_eq!(
        output,
        HarnessOutput {
            body: json!({
                "statusCode": 404,
                "message": "Failed to enable account: NOT_FOUND - track123"
            }),
            success: false,
        }
    );
}

#[tokio::test]
async fn test_invalid_input_reported_before_credentials() {
    // No credentials configured and no account id: the input problem wins
    // and nothing is sent.
    let ctx = HarnessContext::new().await;

    let output = ctx.run(&["invoke"], b"").await.unwrap();

    assert!(!output.success);
    let message = output.body["message"].as_str().unwrap();
    assert!(message.starts_with("Invalid input: "), "{}", message);
    assert_eq!(ctx.request_count().await, 0);
}

// ============================================================================
// invoke | error --failure -
// ============================================================================

#[tokio::test]
async fn test_failure_pipes_into_recovery() {
    let ctx = HarnessContext::new().await.with_bearer();
    Mock::given(method("POST"))
        .and(path("/v3/accounts/acc-1/enable"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "Too Many Requests"
        })))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/accounts/acc-1/enable"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": "task9" })))
        .mount(&ctx.server)
        .await;

    let failed = ctx.run(&["invoke", "--account-id", "acc-1"], b"").await.unwrap();
    assert!(!failed.success);
    assert_eq!(failed.body["statusCode"], 429);

    let piped = serde_json::to_vec(&failed.body).unwrap();
    let recovered = ctx
        .run(&["error", "--account-id", "acc-1", "--failure", "-"], &piped)
        .await
        .unwrap();

    assert!(recovered.success);
    assert_eq!(recovered.body["recoveryMethod"], "rate_limit_retry");
    assert_eq!(recovered.body["taskId"], "task9");
    assert_eq!(ctx.request_count().await, 2);
}

#[tokio::test]
async fn test_fatal_failure_skips_token_exchange() {
    let ctx = HarnessContext::new().await.with_client_credentials();
    ctx.mount_token_endpoint().await;

    let output = ctx
        .run(
            &[
                "error",
                "--account-id",
                "acc-1",
                "--status",
                "401",
                "--message",
                "Failed to enable account: Unauthorized",
            ],
            b"",
        )
        .await
        .unwrap();

    assert_eq!(
        output,
        HarnessOutput {
            body: json!({
                "statusCode": 401,
                "message": "Unrecoverable error enabling account acc-1: \
                            Failed to enable account: Unauthorized"
            }),
            success: false,
        }
    );
    // Neither the token endpoint nor the platform was contacted.
    assert_eq!(ctx.request_count().await, 0);
}

#[tokio::test]
async fn test_client_credentials_exchanged_before_send() {
    let ctx = HarnessContext::new().await.with_client_credentials();
    ctx.mount_token_endpoint().await;
    Mock::given(method("POST"))
        .and(path("/v3/accounts/acc-1/enable"))
        .and(header("authorization", "Bearer minted"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let output = ctx.run(&["invoke", "--account-id", "acc-1"], b"").await.unwrap();

    assert!(output.success);
    assert_eq!(ctx.request_count().await, 2);
}

#[tokio::test]
async fn test_two_stdin_sources_rejected() {
    let ctx = HarnessContext::new().await.with_bearer();

    let err = ctx
        .run(&["error", "--input", "-", "--failure", "-"], b"{}")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("stdin"), "{}", err);
    assert_eq!(ctx.request_count().await, 0);
}

// ============================================================================
// halt
// ============================================================================

#[tokio::test]
async fn test_halt_reports_without_network() {
    let ctx = HarnessContext::new().await;

    let output = ctx.run(&["halt", "--reason", "cancelled"], b"").await.unwrap();

    assert!(output.success);
    assert_eq!(output.body["accountId"], "unknown");
    assert_eq!(output.body["reason"], "cancelled");
    assert_eq!(output.body["cleanupCompleted"], true);
    assert_eq!(ctx.request_count().await, 0);
}
