use crate::*;
use sha2::{Digest, Sha256};

/// Number of base64 characters of the signature kept on the ledger for audit display
pub const SIGNATURE_FRAGMENT_LEN: usize = 64;

/// Lowercase hex SHA-256 of the raw token bytes
pub fn fingerprint(token: &[u8]) -> String {
    hex::encode(Sha256::digest(token))
}

/// One cast ballot, as embedded in a block.
///
/// Carries no voter identity. `signature_fragment` is display-only and never
/// takes part in any check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub token_fingerprint: String,
    pub candidate: String,

    /// Unix time in milliseconds
    pub timestamp: i64,
    pub signature_fragment: String,
}

impl Vote {
    pub fn new(
        token_fingerprint: String,
        candidate: String,
        timestamp: i64,
        encoded_signature: &str,
    ) -> Self {
        let signature_fragment = encoded_signature
            .chars()
            .take(SIGNATURE_FRAGMENT_LEN)
            .collect();

        Vote {
            token_fingerprint,
            candidate,
            timestamp,
            signature_fragment,
        }
    }
}
