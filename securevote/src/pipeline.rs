//! Per-request vote submission: decode the wire credential, then commit through the ledger.

use crate::*;

/// Vote request as it arrives on the wire
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VoteRequest {
    #[serde(default)]
    pub token_hex: String,

    #[serde(default)]
    pub signature_b64: String,

    #[serde(default)]
    pub candidate: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoteResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_index: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<Receipt, ValidationError>> for VoteResponse {
    fn from(result: Result<Receipt, ValidationError>) -> Self {
        match result {
            Ok(receipt) => VoteResponse {
                success: true,
                tx_hash: Some(receipt.tx_hash),
                block_index: Some(receipt.block_index),
                error: None,
                reason: None,
            },
            Err(err) => VoteResponse {
                success: false,
                tx_hash: None,
                block_index: None,
                error: Some(err.to_string()),
                reason: Some(err.reason().to_owned()),
            },
        }
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Validate and commit one vote.
///
/// Every field is checked and decoded before the ledger is touched.
pub fn submit(ledger: &Ledger, request: &VoteRequest) -> Result<Receipt, ValidationError> {
    let token_hex = required(&request.token_hex, "token_hex")?;
    let signature_b64 = required(&request.signature_b64, "signature_b64")?;
    let candidate = required(&request.candidate, "candidate")?;

    let token = Token::from_hex(token_hex).map_err(ValidationError::MalformedCredential)?;
    let signature = Signature::decode(signature_b64, ledger.public_key())
        .map_err(ValidationError::MalformedCredential)?;

    let result = ledger.submit_vote(&token, &signature, candidate);
    if let Err(err) = &result {
        log::debug!("securevote: vote rejected ({})", err.reason());
    }
    result
}

/// `submit`, shaped for the wire
pub fn handle_vote(ledger: &Ledger, request: &VoteRequest) -> VoteResponse {
    submit(ledger, request).into()
}
