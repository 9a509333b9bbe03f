use crate::command_holder::required;
use crate::config::Config;
use crate::error::CliError;
use crate::files::{self, Credential};
use securevote::*;

pub fn command_vote(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let credential_path = crate::expand(required(matches, "CREDENTIAL")?)?;
    let candidate = required(matches, "CANDIDATE")?;

    let credential: Credential = files::load_json(&credential_path)?;
    let request = VoteRequest {
        token_hex: credential.token_hex,
        signature_b64: credential.signature_b64,
        candidate: candidate.to_owned(),
    };

    let ledger = files::load_ledger(config, files::load_public_key(config)?)?;
    let response = handle_vote(&ledger, &request);
    if response.success {
        files::save_ledger(config, &ledger)?;
    }

    crate::print_json(&response)?;
    match response.reason {
        Some(reason) => Err(CliError::Rejected(reason)),
        None => Ok(()),
    }
}
