//! Session state
//!
//! One `Session` exists per connection. It is created on `opened` with a
//! fresh ephemeral key and discarded on close; nothing is reused across
//! reconnects.

use serde_json::Value;
use tracing::debug;

use crate::auth::{AuthParams, AuthStatus};
use crate::signer::SessionKey;

/// Wire amounts are base units of 1e-6; the tracked balance is decimal.
const BASE_UNITS_PER_WHOLE: f64 = 1_000_000.0;

/// Convert a base-unit amount string to its decimal form.
pub fn units_to_decimal(amount: &str) -> Option<String> {
    let units: f64 = amount.parse().ok()?;
    Some((units / BASE_UNITS_PER_WHOLE).to_string())
}

/// Per-connection session state.
pub struct Session {
    /// Ephemeral signing identity, fresh every connection
    pub key: SessionKey,
    /// Handshake progress
    pub auth: AuthStatus,
    /// Policy sent in auth_request; retained unmodified until the handshake
    /// completes because the challenge signature binds these exact values
    pub auth_params: Option<AuthParams>,
    /// Tracked decimal balance for the configured asset
    pub balance: String,
    /// Open channel id, if the clearnode reports one
    pub channel_id: Option<String>,
    /// Most recent server error
    pub last_error: Option<String>,
}

impl Session {
    /// Create a fresh session with a newly generated ephemeral identity.
    pub fn new() -> Self {
        Self {
            key: SessionKey::generate(),
            auth: AuthStatus::Unauthenticated,
            auth_params: None,
            balance: "0".to_string(),
            channel_id: None,
            last_error: None,
        }
    }

    /// Apply a `get_ledger_balances` snapshot. Returns true when the tracked
    /// balance changed.
    pub fn apply_balance_snapshot(&mut self, result: &Value, asset: &str) -> bool {
        let entries = result["ledger_balances"].as_array();
        self.apply_balance_entries(entries, asset)
    }

    /// Apply a `bu` push. Returns true when the payload contained the tracked
    /// asset; the caller re-queries the snapshot otherwise.
    pub fn apply_balance_update(&mut self, result: &Value, asset: &str) -> bool {
        let entries = result["balance_updates"].as_array();
        let found = entries
            .map(|list| list.iter().any(|e| e["asset"].as_str() == Some(asset)))
            .unwrap_or(false);
        if found {
            self.apply_balance_entries(entries, asset);
        }
        found
    }

    fn apply_balance_entries(&mut self, entries: Option<&Vec<Value>>, asset: &str) -> bool {
        let Some(entries) = entries else {
            return false;
        };
        for entry in entries {
            if entry["asset"].as_str() != Some(asset) {
                continue;
            }
            if let Some(decimal) = entry["amount"].as_str().and_then(units_to_decimal) {
                let changed = self.balance != decimal;
                self.balance = decimal;
                return changed;
            }
        }
        false
    }

    /// Apply a channel list (`get_channels`/`channels`) or single-channel
    /// update (`cu`). Records the first channel with status "open", clears
    /// the recorded id when none is open.
    pub fn apply_channels(&mut self, result: &Value) {
        let channels: Vec<&Value> = if let Some(list) = result["channels"].as_array() {
            list.iter().collect()
        } else if let Some(list) = result.as_array() {
            list.iter().collect()
        } else if result.is_object() {
            // cu pushes carry one channel object
            vec![result]
        } else {
            return;
        };

        let open = channels
            .iter()
            .find(|c| c["status"].as_str() == Some("open"));

        match open {
            Some(channel) => {
                let id = channel["channel_id"]
                    .as_str()
                    .or_else(|| channel["id"].as_str())
                    .map(|s| s.to_string());
                if id.is_some() {
                    self.channel_id = id;
                }
            }
            None => {
                if self.channel_id.is_some() {
                    debug!("No open channel reported, clearing recorded channel id");
                }
                self.channel_id = None;
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
