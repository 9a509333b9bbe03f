use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("securevote: no modular inverse exists")]
    NoInverse,

    #[error("securevote: invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("securevote: key too small - {0} bits, need at least {} bits", crate::MIN_KEY_BITS)]
    KeyTooSmall(usize),

    #[error("securevote: invalid token - invalid hexidecimal")]
    TokenBadHex,

    #[error("securevote: invalid token - wrong length {0}")]
    TokenBadLen(usize),

    #[error("securevote: invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("securevote: wrong length - expected {expected} bytes, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("securevote: RSA error: {0}")]
    RSAError(#[from] rsa::errors::Error),

    #[error("securevote: PKCS#1 error: {0}")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    #[error("securevote: PKCS#8 error: {0}")]
    Pkcs8(#[from] rsa::pkcs8::Error),

    #[error("securevote: public key error: {0}")]
    Spki(#[from] rsa::pkcs8::spki::Error),

    #[error("securevote: block {0} not found")]
    BlockNotFound(u64),

    #[error("securevote: chain integrity failure at block {at_index}")]
    CorruptChain { at_index: u64 },

    #[error("securevote: ledger lock poisoned")]
    LedgerPoisoned,
}

/// Vote submission rejections
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("securevote validation: missing field {0}")]
    MissingField(&'static str),

    #[error("securevote validation: invalid candidate {0}")]
    InvalidCandidate(String),

    #[error("securevote validation: malformed credential: {0}")]
    MalformedCredential(Error),

    #[error("securevote validation: token already used")]
    TokenAlreadyUsed,

    #[error("securevote validation: invalid token signature")]
    InvalidSignature,

    #[error("securevote validation: ledger unavailable: {0}")]
    LedgerUnavailable(Error),
}

impl ValidationError {
    /// Stable machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidCandidate(_) => "invalid_candidate",
            ValidationError::MalformedCredential(_) => "malformed_credential",
            ValidationError::TokenAlreadyUsed => "token_already_used",
            ValidationError::InvalidSignature => "invalid_signature",
            ValidationError::LedgerUnavailable(_) => "ledger_unavailable",
        }
    }

    /// Rejections that exercise the anonymity or double-voting guarantees,
    /// as opposed to malformed input.
    pub fn is_security_rejection(&self) -> bool {
        matches!(
            self,
            ValidationError::TokenAlreadyUsed | ValidationError::InvalidSignature
        )
    }
}

/// Credential issuance rejections
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("securevote registration: missing field {0}")]
    MissingField(&'static str),

    #[error("securevote registration: invalid voter id format")]
    InvalidVoterId,

    #[error("securevote registration: voter id not found in eligible voters list")]
    NotEligible,

    #[error("securevote registration: token already issued to this voter")]
    AlreadyIssued,

    #[error("securevote registration: malformed blinded token: {0}")]
    MalformedBlindedToken(Error),

    #[error("securevote registration: signing failed: {0}")]
    Signing(Error),
}

impl RegistrationError {
    /// Stable machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            RegistrationError::MissingField(_) => "missing_field",
            RegistrationError::InvalidVoterId => "invalid_voter_id",
            RegistrationError::NotEligible => "not_eligible",
            RegistrationError::AlreadyIssued => "already_issued",
            RegistrationError::MalformedBlindedToken(_) => "malformed_blinded_token",
            RegistrationError::Signing(_) => "signing_failed",
        }
    }
}
