use crate::error::CliError;
use securevote::DEFAULT_CANDIDATES;
use std::env::var;

pub struct Config {
    pub private_key_path: String,
    pub public_key_path: String,
    pub chain_path: String,
    pub registry_path: String,
    pub candidates: Vec<String>,
    pub eligible_voters: usize,
}

fn path_var(name: &str, default: &str) -> Result<String, CliError> {
    match var(name) {
        Ok(val) => crate::expand(&val),
        Err(_e) => crate::expand(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, CliError> {
        let private_key_path = path_var("SECUREVOTE_PRIVATE_KEY", "./issuer_key.pem")?;
        let public_key_path = path_var("SECUREVOTE_PUBLIC_KEY", "./issuer_pub.pem")?;
        let chain_path = path_var("SECUREVOTE_CHAIN_PATH", "./chain.json")?;
        let registry_path = path_var("SECUREVOTE_REGISTRY_PATH", "./registry.json")?;

        let candidates: Vec<String> = match var("SECUREVOTE_CANDIDATES") {
            Ok(val) => val
                .split(',')
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty())
                .collect(),
            Err(_e) => DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect(),
        };
        if candidates.is_empty() {
            return Err(CliError::Config {
                name: "SECUREVOTE_CANDIDATES",
                value: "no candidates".to_owned(),
            });
        }

        let eligible_voters = match var("SECUREVOTE_ELIGIBLE_VOTERS") {
            Ok(val) => val.trim().parse().map_err(|_| CliError::Config {
                name: "SECUREVOTE_ELIGIBLE_VOTERS",
                value: val.clone(),
            })?,
            Err(_e) => 50,
        };

        Ok(Config {
            private_key_path,
            public_key_path,
            chain_path,
            registry_path,
            candidates,
            eligible_voters,
        })
    }
}
