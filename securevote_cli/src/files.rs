use crate::config::Config;
use crate::error::CliError;
use securevote::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Holder-side state between `blind` and `unblind`
#[derive(Serialize, Deserialize)]
pub struct Session {
    pub token_hex: String,
    pub blinding_factor_b64: String,
    pub blinded_token_b64: String,
}

/// A spendable credential, produced by `unblind`
#[derive(Serialize, Deserialize)]
pub struct Credential {
    pub token_hex: String,
    pub signature_b64: String,
}

pub fn exists(path: &str) -> bool {
    Path::new(path).exists()
}

pub fn read(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Written to `<path>.tmp` first, then renamed into place
pub fn write(path: &str, contents: &str) -> Result<(), CliError> {
    let tmp = format!("{}.tmp", path);
    let map_err = |source| CliError::Write {
        path: path.to_owned(),
        source,
    };
    std::fs::write(&tmp, contents).map_err(map_err)?;
    std::fs::rename(&tmp, path).map_err(map_err)
}

pub fn load_json<T: DeserializeOwned>(path: &str) -> Result<T, CliError> {
    let contents = read(path)?;
    serde_json::from_str(&contents).map_err(|source| CliError::Json {
        path: path.to_owned(),
        source,
    })
}

pub fn save_json<T: Serialize>(path: &str, value: &T) -> Result<(), CliError> {
    let contents = serde_json::to_string_pretty(value).map_err(|source| CliError::Json {
        path: path.to_owned(),
        source,
    })?;
    write(path, &contents)
}

pub fn load_issuer_key(config: &Config) -> Result<IssuerKey, CliError> {
    let pem = read(&config.private_key_path)?;
    Ok(IssuerKey::from_pem(&pem)?)
}

/// The public PEM if present, otherwise derived from the private key
pub fn load_public_key(config: &Config) -> Result<IssuerPublicKey, CliError> {
    if exists(&config.public_key_path) {
        let pem = read(&config.public_key_path)?;
        return Ok(IssuerPublicKey::from_pem(&pem)?);
    }
    Ok(load_issuer_key(config)?.public_key())
}

/// Restore the ledger snapshot, or start a new chain when there is none
pub fn load_ledger(config: &Config, public_key: IssuerPublicKey) -> Result<Ledger, CliError> {
    if !exists(&config.chain_path) {
        log::info!("no chain at {}, starting a new ledger", config.chain_path);
        return Ok(Ledger::new(config.candidates.clone(), public_key));
    }

    let snapshot: LedgerSnapshot = load_json(&config.chain_path)?;
    Ok(Ledger::restore(
        snapshot,
        config.candidates.clone(),
        public_key,
    )?)
}

/// Verify a chain snapshot on disk without restoring it, so a tampered
/// chain is reported instead of refused
pub fn verify_chain_file(path: &str) -> Result<ChainStatus, CliError> {
    let snapshot: LedgerSnapshot = load_json(path)?;
    Ok(verify_blocks(&snapshot.chain, POW_DIFFICULTY))
}

pub fn save_ledger(config: &Config, ledger: &Ledger) -> Result<(), CliError> {
    save_json(&config.chain_path, &ledger.snapshot()?)
}

/// Load the registry, seeding demo voters when there is none yet
pub fn load_registry(config: &Config) -> Result<MemRegistry, CliError> {
    if !exists(&config.registry_path) {
        log::info!(
            "no registry at {}, seeding {} demo voters",
            config.registry_path,
            config.eligible_voters
        );
        return Ok(MemRegistry::with_demo_voters(config.eligible_voters));
    }
    load_json(&config.registry_path)
}

pub fn save_registry(config: &Config, registry: &MemRegistry) -> Result<(), CliError> {
    save_json(&config.registry_path, registry)
}
