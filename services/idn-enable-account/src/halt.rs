// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Halt handling
//!
//! There is nothing to compensate: an enable POST that was already sent
//! cannot be withdrawn, and one that was not sent is simply abandoned.

use chrono::Utc;
use idn_accounts_api::{HaltReport, UNKNOWN_ACCOUNT};

/// Report a halt. Always succeeds.
pub fn halt(reason: &str, account_id: Option<&str>) -> HaltReport {
    let account_id = account_id
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_ACCOUNT);

    tracing::info!(account_id, reason, "Enable job halted");

    HaltReport {
        account_id: account_id.to_string(),
        reason: reason.to_string(),
        halted_at: Utc::now(),
        cleanup_completed: true,
    }
}
