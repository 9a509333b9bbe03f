use clap::{value_parser, Arg, ArgAction, Command};
use error::CliError;
use serde::Serialize;

mod command_e2e;
mod command_holder;
mod command_keygen;
mod command_ledger;
mod command_register;
mod command_vote;
mod config;
mod error;
mod files;

use command_e2e::*;
use command_holder::*;
use command_keygen::*;
use command_ledger::*;
use command_register::*;
use command_vote::*;

fn main() {
    let matches = Command::new("SecureVote CLI")
        .version("0.1.0")
        .author("Patrick Hayes <patrick.d.hayes@gmail.com>")
        .about("Blind-signature credentials and a hash-chained ballot ledger")
        .subcommand_required(true)
        .arg(
            Arg::new("v")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            Command::new("keygen")
                .about("Generate the issuer key pair")
                .arg(
                    Arg::new("bits")
                        .long("bits")
                        .value_parser(value_parser!(usize))
                        .default_value("2048")
                        .help("Modulus size, at least 2048"),
                )
                .arg(force()),
        )
        .subcommand(Command::new("public-key").about("Print the issuer public key PEM"))
        .subcommand(
            Command::new("blind")
                .about("Create and blind a fresh voter token")
                .arg(out("Session file to write, default ./session.json"))
                .arg(force()),
        )
        .subcommand(
            Command::new("register")
                .about("Issue a blind signature to an eligible voter")
                .arg(positional("VOTER-ID", 1, "Voter id, letters digits and underscores"))
                .arg(positional("BLINDED", 2, "Blinded token, base64")),
        )
        .subcommand(
            Command::new("status")
                .about("Show the registration status of a voter")
                .arg(positional("VOTER-ID", 1, "Voter id")),
        )
        .subcommand(
            Command::new("unblind")
                .about("Unblind the issuer's blind signature into a credential")
                .arg(positional("SESSION", 1, "Session file written by blind"))
                .arg(positional("BLIND-SIG", 2, "Blind signature, base64"))
                .arg(out("Credential file to write, default ./credential.json")),
        )
        .subcommand(
            Command::new("vote")
                .about("Cast a vote with a credential")
                .arg(positional("CREDENTIAL", 1, "Credential file written by unblind"))
                .arg(positional("CANDIDATE", 2, "Candidate name")),
        )
        .subcommand(
            Command::new("check-credential")
                .about("Check a credential against the issuer key without voting")
                .arg(positional("CREDENTIAL", 1, "Credential file written by unblind")),
        )
        .subcommand(Command::new("tally").about("Count the votes on the chain"))
        .subcommand(Command::new("verify").about("Verify the whole chain"))
        .subcommand(Command::new("chain").about("Print the whole chain for auditing"))
        .subcommand(
            Command::new("block").about("Print one block").arg(
                Arg::new("INDEX")
                    .index(1)
                    .required(true)
                    .value_parser(value_parser!(u64))
                    .help("Block index, genesis is 0"),
            ),
        )
        .subcommand(Command::new("stats").about("Print ledger statistics"))
        .subcommand(Command::new("e2e").about("Run a registration and vote end to end in memory"))
        .get_matches();

    let level = match matches.get_count("v") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("securevote: {}", e);
            std::process::exit(1);
        }
    };

    let (name, result) = match matches.subcommand() {
        Some(("keygen", m)) => ("keygen", command_keygen(m, &config)),
        Some(("public-key", _)) => ("public-key", command_public_key(&config)),
        Some(("blind", m)) => ("blind", command_blind(m, &config)),
        Some(("register", m)) => ("register", command_register(m, &config)),
        Some(("status", m)) => ("status", command_status(m, &config)),
        Some(("unblind", m)) => ("unblind", command_unblind(m, &config)),
        Some(("vote", m)) => ("vote", command_vote(m, &config)),
        Some(("check-credential", m)) => ("check-credential", command_check_credential(m, &config)),
        Some(("tally", _)) => ("tally", command_tally(&config)),
        Some(("verify", _)) => ("verify", command_verify(&config)),
        Some(("chain", _)) => ("chain", command_chain(&config)),
        Some(("block", m)) => ("block", command_block(m, &config)),
        Some(("stats", _)) => ("stats", command_stats(&config)),
        Some(("e2e", _)) => ("e2e", command_e2e(&config)),
        Some((other, _)) => (
            other,
            Err(CliError::Config {
                name: "command",
                value: other.to_owned(),
            }),
        ),
        None => ("", Ok(())),
    };

    if let Err(e) = result {
        eprintln!("securevote {}: {}", name, e);
        std::process::exit(1);
    }
}

fn positional(name: &'static str, index: usize, help: &'static str) -> Arg {
    Arg::new(name).index(index).required(true).help(help)
}

fn out(help: &'static str) -> Arg {
    Arg::new("out").long("out").short('o').help(help)
}

fn force() -> Arg {
    Arg::new("force")
        .long("force")
        .action(ArgAction::SetTrue)
        .help("Overwrite existing files")
}

/// Expand `~` and environment variables in a path
pub fn expand(input: &str) -> Result<String, CliError> {
    shellexpand::full(input)
        .map(|expanded| expanded.into_owned())
        .map_err(|_| CliError::Expand(input.to_owned()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| CliError::Json {
        path: "stdout".to_owned(),
        source,
    })?;
    println!("{}", json);
    Ok(())
}
