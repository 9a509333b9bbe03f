use crate::*;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::sync::{Mutex, MutexGuard};

/// Candidate whitelist used when none is configured
pub const DEFAULT_CANDIDATES: [&str; 3] = ["Candidate A", "Candidate B", "Candidate C"];

/// Vote count per candidate, in whitelist order
pub type Tally = IndexMap<String, usize>;

pub fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect()
}

/// Returned for a committed vote
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: String,
    pub block_index: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    pub block_count: usize,
    pub total_votes: usize,
    pub spent_tokens: usize,
    pub candidates: Vec<String>,
}

/// Persistable form of a ledger. The spent set is rebuilt from the chain on restore.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub chain: Vec<Block>,
}

struct LedgerState {
    chain: Vec<Block>,
    spent: HashSet<String>,
    pending: PendingBlock,
}

/// The ballot ledger.
///
/// All state sits behind one mutex. `submit_vote` holds it from the
/// spent-set check through mining and append, so a fingerprint is never
/// seen as unspent by two submissions at once.
pub struct Ledger {
    state: Mutex<LedgerState>,
    candidates: Vec<String>,
    public_key: IssuerPublicKey,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl Ledger {
    /// Start a new chain holding only a freshly mined genesis block
    pub fn new(candidates: Vec<String>, public_key: IssuerPublicKey) -> Self {
        let genesis = Block::genesis(now_millis(), POW_DIFFICULTY);
        log::info!("securevote: created ledger, genesis {}", genesis.hash);

        let pending = PendingBlock::new(1, genesis.hash.clone());
        Ledger {
            state: Mutex::new(LedgerState {
                chain: vec![genesis],
                spent: HashSet::new(),
                pending,
            }),
            candidates,
            public_key,
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// The chain must verify and no token fingerprint may appear twice.
    /// A chain that fails either check is refused, never repaired.
    pub fn restore(
        snapshot: LedgerSnapshot,
        candidates: Vec<String>,
        public_key: IssuerPublicKey,
    ) -> Result<Self, Error> {
        if let ChainStatus::Invalid { at_index } = verify_blocks(&snapshot.chain, POW_DIFFICULTY) {
            log::warn!("securevote: refusing snapshot, chain invalid at block {}", at_index);
            return Err(Error::CorruptChain { at_index });
        }

        let mut spent = HashSet::new();
        for block in &snapshot.chain {
            for vote in &block.votes {
                if !spent.insert(vote.token_fingerprint.clone()) {
                    log::warn!(
                        "securevote: refusing snapshot, fingerprint {} spent twice",
                        vote.token_fingerprint
                    );
                    return Err(Error::CorruptChain {
                        at_index: block.index,
                    });
                }
            }
        }

        let last = snapshot
            .chain
            .last()
            .ok_or(Error::CorruptChain { at_index: 0 })?;
        let pending = PendingBlock::new(last.index + 1, last.hash.clone());

        log::info!(
            "securevote: restored ledger with {} blocks",
            snapshot.chain.len()
        );
        Ok(Ledger {
            state: Mutex::new(LedgerState {
                chain: snapshot.chain,
                spent,
                pending,
            }),
            candidates,
            public_key,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>, Error> {
        self.state.lock().map_err(|_| Error::LedgerPoisoned)
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn public_key(&self) -> &IssuerPublicKey {
        &self.public_key
    }

    /// Verify a credential and commit it as a vote in a new block.
    ///
    /// The fingerprint is reserved before the signature check and released
    /// again if the check fails, all under the ledger lock. Nothing is
    /// committed on any error path.
    pub fn submit_vote(
        &self,
        token: &Token,
        signature: &Signature,
        candidate: &str,
    ) -> Result<Receipt, ValidationError> {
        if !self.candidates.iter().any(|c| c == candidate) {
            return Err(ValidationError::InvalidCandidate(candidate.to_owned()));
        }

        let fingerprint = token.fingerprint();
        let encoded = signature
            .encode(&self.public_key)
            .map_err(ValidationError::MalformedCredential)?;

        let mut state = self.lock().map_err(ValidationError::LedgerUnavailable)?;

        if !state.spent.insert(fingerprint.clone()) {
            log::warn!("securevote: rejected reused token {}", fingerprint);
            return Err(ValidationError::TokenAlreadyUsed);
        }

        match self.public_key.verify(token, signature) {
            Ok(true) => {}
            Ok(false) => {
                state.spent.remove(&fingerprint);
                log::warn!("securevote: rejected invalid signature for {}", fingerprint);
                return Err(ValidationError::InvalidSignature);
            }
            Err(err) => {
                state.spent.remove(&fingerprint);
                return Err(ValidationError::MalformedCredential(err));
            }
        }

        let timestamp = now_millis();
        let mut pending = state.pending.clone();
        pending.push(Vote::new(
            fingerprint.clone(),
            candidate.to_owned(),
            timestamp,
            &encoded,
        ));
        let block = pending.mine(timestamp, POW_DIFFICULTY);

        let receipt = Receipt {
            tx_hash: block.hash.clone(),
            block_index: block.index,
        };
        state.pending = PendingBlock::new(block.index + 1, block.hash.clone());
        state.chain.push(block);

        log::info!(
            "securevote: committed vote {} in block {} ({})",
            fingerprint,
            receipt.block_index,
            receipt.tx_hash
        );
        Ok(receipt)
    }

    pub fn get_block(&self, index: u64) -> Result<Block, Error> {
        let state = self.lock()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| state.chain.get(i))
            .cloned()
            .ok_or(Error::BlockNotFound(index))
    }

    pub fn get_chain(&self) -> Result<Vec<Block>, Error> {
        Ok(self.lock()?.chain.clone())
    }

    /// Count votes by folding over the whole chain.
    ///
    /// Every whitelisted candidate appears, zero or not. Candidates found on
    /// the chain but missing from the whitelist are appended after them.
    pub fn get_tally(&self) -> Result<Tally, Error> {
        let state = self.lock()?;

        let mut tally: Tally = self.candidates.iter().map(|c| (c.clone(), 0)).collect();
        for vote in state.chain.iter().flat_map(|block| block.votes.iter()) {
            *tally.entry(vote.candidate.clone()).or_insert(0) += 1;
        }
        Ok(tally)
    }

    pub fn verify_chain(&self) -> Result<ChainStatus, Error> {
        let state = self.lock()?;
        Ok(verify_blocks(&state.chain, POW_DIFFICULTY))
    }

    pub fn is_token_spent(&self, fingerprint: &str) -> Result<bool, Error> {
        Ok(self.lock()?.spent.contains(fingerprint))
    }

    pub fn stats(&self) -> Result<LedgerStats, Error> {
        let state = self.lock()?;
        Ok(LedgerStats {
            block_count: state.chain.len(),
            total_votes: state.chain.iter().map(|b| b.votes.len()).sum(),
            spent_tokens: state.spent.len(),
            candidates: self.candidates.clone(),
        })
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, Error> {
        Ok(LedgerSnapshot {
            chain: self.lock()?.chain.clone(),
        })
    }

    #[cfg(test)]
    pub(crate) fn tamper<F: FnOnce(&mut Vec<Block>)>(&self, f: F) {
        f(&mut self.state.lock().unwrap().chain);
    }
}
