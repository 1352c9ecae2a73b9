//! Authentication handshake types
//!
//! The handshake runs: generate session key → `auth_request` (unsigned) →
//! `auth_challenge` from the clearnode → wallet signs the challenge policy →
//! `auth_verify` → success or failure. Failures are terminal for the session;
//! the only retry path is a full reconnect with a fresh session identity.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ClientConfig;

/// A declared (asset, amount) ceiling the session may move without further
/// per-operation wallet approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub asset: String,
    pub amount: String,
}

/// The declared policy for a session, sent as `auth_request` params.
///
/// Immutable once sent: the wallet's typed signature binds the challenge to
/// these exact values and the clearnode checks them for consistency, so the
/// params are retained unmodified until the handshake completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthParams {
    pub address: String,
    pub session_key: String,
    pub application: String,
    pub allowances: Vec<Allowance>,
    pub expires_at: u64,
    pub scope: String,
}

impl AuthParams {
    /// Build the policy for a new session.
    pub fn new(config: &ClientConfig, wallet_address: &str, session_public_id: &str) -> Self {
        let expires_at = Utc::now().timestamp() as u64 + config.auth_ttl.as_secs();
        Self {
            address: wallet_address.to_string(),
            session_key: session_public_id.to_string(),
            application: config.application.clone(),
            allowances: vec![Allowance {
                asset: config.asset.clone(),
                amount: config.allowance_amount.clone(),
            }],
            expires_at,
            scope: config.scope.clone(),
        }
    }
}

/// Handshake state. Only ever advances; reset happens by replacing the whole
/// session on reconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// No auth request sent yet
    Unauthenticated,
    /// `auth_request` sent, waiting for the challenge
    AuthRequested,
    /// Challenge received, wallet signature in progress
    Challenged,
    /// `auth_verify` sent, waiting for the verdict
    Verifying,
    /// Session accepted by the clearnode
    Authenticated,
    /// Handshake rejected or errored; reconnect to retry
    Failed,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }
}

/// The typed structured message the wallet signs to approve a session.
///
/// Schema must match the clearnode's `Policy`/`Allowance` EIP-712 types
/// exactly; any field drift invalidates the signature server-side.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengePolicy {
    pub challenge: String,
    pub scope: String,
    pub wallet: String,
    pub session_key: String,
    pub expires_at: u64,
    pub allowances: Vec<Allowance>,
}

impl ChallengePolicy {
    /// Bind a server challenge to the retained auth params.
    pub fn new(challenge: &str, params: &AuthParams) -> Self {
        Self {
            challenge: challenge.to_string(),
            scope: params.scope.clone(),
            wallet: params.address.clone(),
            session_key: params.session_key.clone(),
            expires_at: params.expires_at,
            allowances: params.allowances.clone(),
        }
    }

    /// Full typed-data payload (domain, types, primary type, message) handed
    /// to the wallet signing capability.
    pub fn typed_data(&self, application: &str) -> Value {
        json!({
            "domain": { "name": application },
            "types": {
                "EIP712Domain": [
                    { "name": "name", "type": "string" }
                ],
                "Policy": [
                    { "name": "challenge", "type": "string" },
                    { "name": "scope", "type": "string" },
                    { "name": "wallet", "type": "address" },
                    { "name": "session_key", "type": "address" },
                    { "name": "expires_at", "type": "uint64" },
                    { "name": "allowances", "type": "Allowance[]" }
                ],
                "Allowance": [
                    { "name": "asset", "type": "string" },
                    { "name": "amount", "type": "string" }
                ]
            },
            "primaryType": "Policy",
            "message": {
                "challenge": self.challenge,
                "scope": self.scope,
                "wallet": self.wallet,
                "session_key": self.session_key,
                "expires_at": self.expires_at,
                "allowances": self.allowances,
            }
        })
    }
}

/// Whether an `auth_verify` result indicates success.
///
/// The clearnode has signalled success three different ways across versions:
/// an explicit `success` flag, an `authenticated` flag, or just echoing the
/// accepted `session_key`.
pub fn verify_succeeded(result: &Value) -> bool {
    result["success"].as_bool().unwrap_or(false)
        || result["authenticated"].as_bool().unwrap_or(false)
        || result.get("session_key").map_or(false, |v| !v.is_null())
}

/// Extract the server-supplied failure message from an `auth_verify` result.
pub fn verify_error(result: &Value) -> String {
    result["error"]
        .as_str()
        .unwrap_or("clearnode authentication failed")
        .to_string()
}
