use crate::command_holder::required;
use crate::config::Config;
use crate::error::CliError;
use crate::files;
use securevote::*;

/// Issuer side of registration
pub fn command_register(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let request = RegisterRequest {
        voter_id: required(matches, "VOTER-ID")?.to_owned(),
        blinded_token_b64: required(matches, "BLINDED")?.to_owned(),
    };

    let issuer = Issuer::new(files::load_issuer_key(config)?);
    let mut registry = files::load_registry(config)?;

    let response = issuer.handle_register(&mut registry, &request);
    if response.success {
        files::save_registry(config, &registry)?;
    }

    crate::print_json(&response)?;
    match response.reason {
        Some(reason) => Err(CliError::Rejected(reason)),
        None => Ok(()),
    }
}

pub fn command_status(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let voter_id = required(matches, "VOTER-ID")?;
    if !is_valid_voter_id(voter_id) {
        return Err(CliError::Rejected(RegistrationError::InvalidVoterId.reason().to_owned()));
    }

    let registry = files::load_registry(config)?;
    crate::print_json(&registry.status(voter_id))
}
