//! Credential-holder side: everything here runs on the voter's machine.

use crate::config::Config;
use crate::error::CliError;
use crate::files::{self, Credential, Session};
use securevote::*;
use serde::Serialize;

/// Create a token, blind it and save the session needed to unblind later
pub fn command_blind(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let out = crate::expand(
        matches
            .get_one::<String>("out")
            .map(String::as_str)
            .unwrap_or("./session.json"),
    )?;
    if files::exists(&out) && !matches.get_flag("force") {
        return Err(CliError::Exists(out));
    }

    let public_key = files::load_public_key(config)?;
    let token = Token::generate();
    let (blinded, factor) = public_key.blind(&token)?;

    let session = Session {
        token_hex: token.to_hex(),
        blinding_factor_b64: factor.encode(&public_key)?,
        blinded_token_b64: blinded.encode(&public_key)?,
    };
    files::save_json(&out, &session)?;

    eprintln!("session saved to {}", out);
    println!("{}", session.blinded_token_b64);
    Ok(())
}

/// Turn the issuer's blind signature into a credential and discard the session
pub fn command_unblind(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let session_path = crate::expand(required(matches, "SESSION")?)?;
    let blind_sig = required(matches, "BLIND-SIG")?;
    let out = crate::expand(
        matches
            .get_one::<String>("out")
            .map(String::as_str)
            .unwrap_or("./credential.json"),
    )?;

    let public_key = files::load_public_key(config)?;
    let session: Session = files::load_json(&session_path)?;

    let token = Token::from_hex(&session.token_hex)?;
    let factor = BlindingFactor::decode(&session.blinding_factor_b64, &public_key)?;
    let signed = BlindSignature::decode(blind_sig, &public_key)?;
    let signature = public_key.unblind(&signed, factor)?;

    if !public_key.verify(&token, &signature)? {
        return Err(CliError::Rejected(
            "blind signature does not verify under the issuer key".to_owned(),
        ));
    }

    let credential = Credential {
        token_hex: token.to_hex(),
        signature_b64: signature.encode(&public_key)?,
    };
    files::save_json(&out, &credential)?;
    std::fs::remove_file(&session_path).map_err(|source| CliError::Write {
        path: session_path.clone(),
        source,
    })?;

    println!("credential saved to {}", out);
    Ok(())
}

#[derive(Serialize)]
pub struct CredentialCheck {
    pub valid: bool,
}

/// Does the credential verify under the issuer key. Nothing is spent.
pub fn check_credential(
    public_key: &IssuerPublicKey,
    credential: &Credential,
) -> Result<CredentialCheck, CliError> {
    let token = Token::from_hex(credential.token_hex.trim())?;
    let signature = Signature::decode(&credential.signature_b64, public_key)?;
    Ok(CredentialCheck {
        valid: public_key.verify(&token, &signature)?,
    })
}

pub fn command_check_credential(
    matches: &clap::ArgMatches,
    config: &Config,
) -> Result<(), CliError> {
    let credential_path = crate::expand(required(matches, "CREDENTIAL")?)?;
    let credential: Credential = files::load_json(&credential_path)?;

    let check = check_credential(&files::load_public_key(config)?, &credential)?;
    crate::print_json(&check)?;
    if !check.valid {
        return Err(CliError::Rejected("invalid_signature".to_owned()));
    }
    Ok(())
}

pub(crate) fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a str, CliError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CliError::Config {
            name: "argument",
            value: name.to_owned(),
        })
}
