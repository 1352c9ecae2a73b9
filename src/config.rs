//! Configuration for the clearnode client
//!
//! Plain config struct with environment overrides, one instance per client.

use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Clearnode WebSocket URL
    pub url: String,
    /// Application name declared in the auth request (EIP-712 domain name)
    pub application: String,
    /// Auth scope string
    pub scope: String,
    /// Asset identifier tracked by this session
    pub asset: String,
    /// Allowance ceiling (base units) declared per session
    pub allowance_amount: String,
    /// Per-vote transfer amount (decimal)
    pub vote_amount: String,
    /// Default transfer counterparty (the settlement server's address)
    pub counterparty: Option<String>,
    /// Faucet endpoint for testnet credit requests (optional)
    pub faucet_url: Option<String>,
    /// Delay before reconnecting after an unexpected close
    pub reconnect_delay: Duration,
    /// Timeout for a correlated request to receive its response
    pub request_timeout: Duration,
    /// Timeout for `connect()` to observe an open connection
    pub connect_timeout: Duration,
    /// Lifetime of the declared auth policy
    pub auth_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "wss://clearnet-sandbox.yellow.com/ws".to_string(),
            application: "ViralForge".to_string(),
            scope: "test.app".to_string(),
            asset: "ytest.usd".to_string(),
            allowance_amount: "1000000000".to_string(),
            vote_amount: "0.0001".to_string(),
            counterparty: None,
            faucet_url: Some("https://clearnet-sandbox.yellow.com/faucet/requestTokens".to_string()),
            reconnect_delay: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
            auth_ttl: Duration::from_secs(3600),
        }
    }
}

impl ClientConfig {
    /// Create config from environment
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("CLEARNODE_WS_URL").unwrap_or(defaults.url),
            application: std::env::var("CLEARNODE_APPLICATION").unwrap_or(defaults.application),
            scope: std::env::var("CLEARNODE_SCOPE").unwrap_or(defaults.scope),
            asset: std::env::var("CLEARNODE_ASSET").unwrap_or(defaults.asset),
            allowance_amount: std::env::var("CLEARNODE_ALLOWANCE")
                .unwrap_or(defaults.allowance_amount),
            vote_amount: std::env::var("VOTE_COST_AMOUNT").unwrap_or(defaults.vote_amount),
            counterparty: std::env::var("CLEARNODE_COUNTERPARTY").ok(),
            faucet_url: std::env::var("CLEARNODE_FAUCET_URL")
                .ok()
                .or(defaults.faucet_url),
            reconnect_delay: Duration::from_secs(
                std::env::var("CLEARNODE_RECONNECT_DELAY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            request_timeout: Duration::from_secs(
                std::env::var("CLEARNODE_REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            connect_timeout: defaults.connect_timeout,
            auth_ttl: defaults.auth_ttl,
        }
    }

    /// Validate configuration before any network I/O
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("clearnode URL must not be empty".to_string());
        }
        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(format!("clearnode URL must be a ws:// or wss:// URL: {}", self.url));
        }
        if self.asset.is_empty() {
            return Err("asset identifier must not be empty".to_string());
        }
        Ok(())
    }
}
