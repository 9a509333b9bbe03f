use crate::*;

/// Registration request as it arrives on the wire
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub voter_id: String,

    #[serde(default)]
    pub blinded_token_b64: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blind_sig_b64: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RegisterResponse {
    fn rejected(err: &RegistrationError) -> Self {
        RegisterResponse {
            success: false,
            blind_sig_b64: None,
            error: Some(err.to_string()),
            reason: Some(err.reason().to_owned()),
        }
    }
}

/// Non-empty, ASCII letters, digits and underscores
pub fn is_valid_voter_id(voter_id: &str) -> bool {
    !voter_id.is_empty()
        && voter_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// The credential issuer: checks eligibility, then blind-signs.
///
/// Never sees the voter's token. What it signs is blinded, and what it
/// records is the voter id and the time of issuance.
#[derive(Debug)]
pub struct Issuer {
    key: IssuerKey,
}

impl Issuer {
    pub fn new(key: IssuerKey) -> Self {
        Issuer { key }
    }

    pub fn public_key(&self) -> IssuerPublicKey {
        self.key.public_key()
    }

    /// Issue one blind signature to an eligible voter who has not had one yet
    pub fn register<R: Registry>(
        &self,
        registry: &mut R,
        voter_id: &str,
        blinded: &BlindedToken,
    ) -> Result<BlindSignature, RegistrationError> {
        if !is_valid_voter_id(voter_id) {
            return Err(RegistrationError::InvalidVoterId);
        }
        if !registry.is_eligible(voter_id) {
            log::warn!("securevote: registration refused for unknown voter {}", voter_id);
            return Err(RegistrationError::NotEligible);
        }
        if registry.has_token_issued(voter_id) {
            log::warn!("securevote: registration refused, {} already issued", voter_id);
            return Err(RegistrationError::AlreadyIssued);
        }

        let signed = self.key.blind_sign(blinded).map_err(|err| match err {
            Error::InvalidParameter(_) => RegistrationError::MalformedBlindedToken(err),
            err => RegistrationError::Signing(err),
        })?;

        registry.mark_issued(voter_id, chrono::Utc::now().timestamp_millis())?;
        log::info!("securevote: issued credential to {}", voter_id);

        Ok(signed)
    }

    /// Wire adapter around `register`
    pub fn handle_register<R: Registry>(
        &self,
        registry: &mut R,
        request: &RegisterRequest,
    ) -> RegisterResponse {
        match self.register_request(registry, request) {
            Ok(blind_sig_b64) => RegisterResponse {
                success: true,
                blind_sig_b64: Some(blind_sig_b64),
                error: None,
                reason: None,
            },
            Err(err) => RegisterResponse::rejected(&err),
        }
    }

    fn register_request<R: Registry>(
        &self,
        registry: &mut R,
        request: &RegisterRequest,
    ) -> Result<String, RegistrationError> {
        let voter_id = request.voter_id.trim();
        let blinded_b64 = request.blinded_token_b64.trim();

        if voter_id.is_empty() {
            return Err(RegistrationError::MissingField("voter_id"));
        }
        if blinded_b64.is_empty() {
            return Err(RegistrationError::MissingField("blinded_token_b64"));
        }
        if !is_valid_voter_id(voter_id) {
            return Err(RegistrationError::InvalidVoterId);
        }

        let public_key = self.public_key();
        let blinded = BlindedToken::decode(blinded_b64, &public_key)
            .map_err(RegistrationError::MalformedBlindedToken)?;

        let signed = self.register(registry, voter_id, &blinded)?;
        signed
            .encode(&public_key)
            .map_err(RegistrationError::Signing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use num_bigint_dig::BigUint;

    fn issuer() -> Issuer {
        Issuer::new(fixtures::issuer_key().clone())
    }

    #[test]
    fn test_voter_id_format() {
        assert!(is_valid_voter_id("VOTER_00001"));
        assert!(is_valid_voter_id("abc123"));
        assert!(!is_valid_voter_id(""));
        assert!(!is_valid_voter_id("VOTER 1"));
        assert!(!is_valid_voter_id("VOTER-1"));
        assert!(!is_valid_voter_id("VOTER_1; DROP TABLE"));
        assert!(!is_valid_voter_id("VÖTER"));
    }

    #[test]
    fn test_register() {
        let issuer = issuer();
        let public = issuer.public_key();
        let mut registry = MemRegistry::with_demo_voters(5);

        let token = Token::generate();
        let (blinded, factor) = public.blind(&token).unwrap();
        let signed = issuer.register(&mut registry, "VOTER_00001", &blinded).unwrap();
        let signature = public.unblind(&signed, factor).unwrap();
        assert!(public.verify(&token, &signature).unwrap());

        let status = registry.status("VOTER_00001");
        assert!(status.token_issued);
        assert!(status.token_issued_at.is_some());

        // One credential per voter
        let (blinded, _) = public.blind(&Token::generate()).unwrap();
        assert!(matches!(
            issuer.register(&mut registry, "VOTER_00001", &blinded),
            Err(RegistrationError::AlreadyIssued)
        ));
    }

    #[test]
    fn test_register_rejections() {
        let issuer = issuer();
        let mut registry = MemRegistry::with_demo_voters(5);
        let (blinded, _) = issuer.public_key().blind(&Token::generate()).unwrap();

        assert!(matches!(
            issuer.register(&mut registry, "VOTER_99999", &blinded),
            Err(RegistrationError::NotEligible)
        ));
        assert!(matches!(
            issuer.register(&mut registry, "VOTER 1", &blinded),
            Err(RegistrationError::InvalidVoterId)
        ));

        let too_big = BlindedToken::from_biguint(issuer.public_key().n() + BigUint::from(1u32));
        assert!(matches!(
            issuer.register(&mut registry, "VOTER_00002", &too_big),
            Err(RegistrationError::MalformedBlindedToken(_))
        ));

        // Failed attempts never mark the voter
        assert!(!registry.has_token_issued("VOTER_00002"));
        assert_eq!(registry.issued_count(), 0);
    }

    #[test]
    fn test_handle_register() {
        let issuer = issuer();
        let public = issuer.public_key();
        let mut registry = MemRegistry::with_demo_voters(5);

        let token = Token::generate();
        let (blinded, factor) = public.blind(&token).unwrap();
        let request = RegisterRequest {
            voter_id: " VOTER_00003 ".to_owned(),
            blinded_token_b64: blinded.encode(&public).unwrap(),
        };

        let response = issuer.handle_register(&mut registry, &request);
        assert!(response.success);
        assert!(response.error.is_none());

        let signed = BlindSignature::decode(&response.blind_sig_b64.unwrap(), &public).unwrap();
        let signature = public.unblind(&signed, factor).unwrap();
        assert!(public.verify(&token, &signature).unwrap());

        let response = issuer.handle_register(&mut registry, &request);
        assert!(!response.success);
        assert_eq!(response.reason.as_deref(), Some("already_issued"));
        assert!(response.blind_sig_b64.is_none());
    }

    #[test]
    fn test_handle_register_bad_input() {
        let issuer = issuer();
        let mut registry = MemRegistry::with_demo_voters(5);

        let cases = vec![
            (RegisterRequest::default(), "missing_field"),
            (
                RegisterRequest {
                    voter_id: "VOTER_00004".to_owned(),
                    blinded_token_b64: "  ".to_owned(),
                },
                "missing_field",
            ),
            (
                RegisterRequest {
                    voter_id: "VOTER-4".to_owned(),
                    blinded_token_b64: "AAAA".to_owned(),
                },
                "invalid_voter_id",
            ),
            (
                RegisterRequest {
                    voter_id: "VOTER_00004".to_owned(),
                    blinded_token_b64: "AAAA".to_owned(),
                },
                "malformed_blinded_token",
            ),
            (
                RegisterRequest {
                    voter_id: "VOTER_00004".to_owned(),
                    blinded_token_b64: "!!not base64!!".to_owned(),
                },
                "malformed_blinded_token",
            ),
            (
                RegisterRequest {
                    voter_id: "VOTER_77777".to_owned(),
                    blinded_token_b64: fixtures::BLINDED_B64.to_owned(),
                },
                "not_eligible",
            ),
        ];

        for (request, reason) in cases {
            let response = issuer.handle_register(&mut registry, &request);
            assert!(!response.success);
            assert_eq!(response.reason.as_deref(), Some(reason));
        }
        assert_eq!(registry.issued_count(), 0);

        // JSON with fields absent decodes to empty strings
        let request: RegisterRequest = serde_json::from_str(r#"{"voter_id":"VOTER_00001"}"#).unwrap();
        let response = issuer.handle_register(&mut registry, &request);
        assert_eq!(response.reason.as_deref(), Some("missing_field"));
    }
}
