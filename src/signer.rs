//! Signing capabilities
//!
//! Two distinct keys sign two distinct things and must never be conflated:
//! the ephemeral session key signs routine operational requests (transfers),
//! while the long-lived wallet key signs only the auth challenge policy.

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::auth::ChallengePolicy;
use crate::error::Result;

/// Ephemeral session keypair, generated fresh on every connection.
///
/// Signs the raw hash of the canonical request string with no message
/// prefix or extra framing; the clearnode verifies the bare hash.
pub struct SessionKey {
    signing_key: SigningKey,
}

impl SessionKey {
    /// Generate a fresh keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Hex-encoded public identifier, sent as `session_key` in AuthParams.
    pub fn public_id(&self) -> String {
        let verifying: VerifyingKey = self.signing_key.verifying_key();
        format!("0x{}", hex::encode(verifying.as_bytes()))
    }

    /// Sign the hash of an exact canonical string.
    pub fn sign_canonical(&self, canonical: &str) -> Result<String> {
        let hash = Sha256::digest(canonical.as_bytes());
        let signature = self.signing_key.sign(hash.as_slice());
        Ok(format!("0x{}", hex::encode(signature.to_bytes())))
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose private material
        f.debug_struct("SessionKey")
            .field("public_id", &self.public_id())
            .finish()
    }
}

/// Long-lived wallet identity, supplied externally.
///
/// Produces the typed structured signature over the challenge policy that
/// proves the wallet holder approved this session. Key management lives
/// outside the client (browser wallet, HSM, env-provisioned key).
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Stable wallet address, used in AuthParams and faucet requests.
    fn address(&self) -> String;

    /// Sign the challenge policy as typed structured data.
    async fn sign_policy(&self, policy: &ChallengePolicy) -> Result<String>;
}
