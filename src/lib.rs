//! State-channel session client for Yellow Network clearnodes
//!
//! Opens one persistent WebSocket connection to a clearnode, authenticates
//! via the challenge/verify handshake (ephemeral session key declared by an
//! EIP-712 wallet signature), tracks the session's asset balance and open
//! channel, and issues session-signed transfers correlated by request id.
//! Unexpected disconnects fail pending requests immediately and reconnect
//! with a brand-new session identity after a fixed delay.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clearnode_client::{
//!     ChallengePolicy, ClearnodeClient, ClientConfig, Result, WalletSigner,
//! };
//!
//! struct EnvWallet;
//!
//! #[async_trait::async_trait]
//! impl WalletSigner for EnvWallet {
//!     fn address(&self) -> String {
//!         "0xYourWallet".to_string()
//!     }
//!
//!     async fn sign_policy(&self, policy: &ChallengePolicy) -> Result<String> {
//!         // Delegate to your key management (browser wallet, HSM, ...)
//!         let _typed = policy.typed_data("ViralForge");
//!         todo!("produce the EIP-712 signature")
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let client = ClearnodeClient::new(ClientConfig::from_env(), Arc::new(EnvWallet))?;
//! client.connect().await?;
//!
//! let receipt = client.send_transfer("0xCounterparty", "0.0001").await?;
//! println!("transfer {}", receipt.transfer_id);
//!
//! let status = client.status().await;
//! println!("balance {}", status.balance);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod correlator;
pub mod error;
pub mod rpc;
pub mod session;
pub mod signer;

// Re-export main types
pub use auth::{Allowance, AuthParams, AuthStatus, ChallengePolicy};
pub use client::{ClearnodeClient, ClientEvent, ClientStatus, TransferReceipt};
pub use config::ClientConfig;
pub use correlator::RequestCorrelator;
pub use error::{ClearnodeError, Result};
pub use rpc::{RpcRequest, RpcResponse};
pub use session::Session;
pub use signer::{SessionKey, WalletSigner};
