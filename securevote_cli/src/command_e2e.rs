use crate::config::Config;
use crate::error::CliError;
use crate::files;
use securevote::*;

/// Run the whole registration and voting flow in memory.
///
/// Uses the configured issuer key when one exists and a throwaway key
/// otherwise. No files are written.
pub fn command_e2e(config: &Config) -> Result<(), CliError> {
    let key = if files::exists(&config.private_key_path) {
        files::load_issuer_key(config)?
    } else {
        println!("> Generating a throwaway {} bit issuer key", MIN_KEY_BITS);
        IssuerKey::generate(MIN_KEY_BITS)?
    };

    let issuer = Issuer::new(key);
    let public_key = issuer.public_key();
    let mut registry = MemRegistry::with_demo_voters(config.eligible_voters.max(1));
    let ledger = Ledger::new(config.candidates.clone(), public_key.clone());

    let genesis = ledger.get_block(0)?;
    println!("> Genesis block {}", genesis.hash);

    // Holder: blind a fresh token
    let token = Token::generate();
    let (blinded, factor) = public_key.blind(&token)?;

    // Issuer: sign it for VOTER_00001
    let voter_id = "VOTER_00001";
    let signed = issuer
        .register(&mut registry, voter_id, &blinded)
        .map_err(|e| CliError::Rejected(e.reason().to_owned()))?;
    println!("> Issued a blind signature to {}", voter_id);

    // Holder: unblind
    let signature = public_key.unblind(&signed, factor)?;
    if !public_key.verify(&token, &signature)? {
        return Err(CliError::Rejected("unblinded signature does not verify".to_owned()));
    }
    println!("> Credential verified, fingerprint {}", token.fingerprint());

    let candidate = config.candidates.first().ok_or(CliError::Config {
        name: "SECUREVOTE_CANDIDATES",
        value: "no candidates".to_owned(),
    })?;
    let request = VoteRequest {
        token_hex: token.to_hex(),
        signature_b64: signature.encode(&public_key)?,
        candidate: candidate.clone(),
    };

    let receipt = submit(&ledger, &request).map_err(|e| CliError::Rejected(e.reason().to_owned()))?;
    println!(
        "> Voted for {} in block {} ({})",
        candidate, receipt.block_index, receipt.tx_hash
    );

    match submit(&ledger, &request) {
        Err(e) => println!("> Second attempt rejected: {}", e.reason()),
        Ok(_) => return Err(CliError::Rejected("double vote accepted".to_owned())),
    }

    let status = ledger.verify_chain()?;
    if !status.is_valid() {
        return Err(CliError::Rejected(format!("chain invalid: {:?}", status)));
    }
    println!("> Chain verified OK, {} blocks", ledger.stats()?.block_count);

    println!("Tally:");
    for (candidate, votes) in ledger.get_tally()?.iter() {
        println!("  {} got {} votes", candidate, votes);
    }
    Ok(())
}
