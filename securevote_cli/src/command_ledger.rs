//! Read-only views of the ledger

use crate::config::Config;
use crate::error::CliError;
use crate::files;
use securevote::*;

fn ledger(config: &Config) -> Result<Ledger, CliError> {
    files::load_ledger(config, files::load_public_key(config)?)
}

pub fn command_tally(config: &Config) -> Result<(), CliError> {
    let tally = ledger(config)?.get_tally()?;
    for (candidate, votes) in tally.iter() {
        println!("  {} got {} votes", candidate, votes);
    }
    Ok(())
}

pub fn command_verify(config: &Config) -> Result<(), CliError> {
    let status = files::verify_chain_file(&config.chain_path)?;
    crate::print_json(&status)?;

    match status {
        ChainStatus::Valid => Ok(()),
        ChainStatus::Invalid { at_index } => Err(Error::CorruptChain { at_index }.into()),
    }
}

/// Dump the whole chain for auditing
pub fn command_chain(config: &Config) -> Result<(), CliError> {
    let chain = ledger(config)?.get_chain()?;
    crate::print_json(&chain)
}

pub fn command_block(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let index = matches.get_one::<u64>("INDEX").copied().unwrap_or(0);
    let block = ledger(config)?.get_block(index)?;
    crate::print_json(&block)
}

pub fn command_stats(config: &Config) -> Result<(), CliError> {
    let stats = ledger(config)?.stats()?;
    crate::print_json(&stats)
}
