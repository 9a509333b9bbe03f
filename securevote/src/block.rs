use crate::*;
use sha2::{Digest, Sha256};

/// Leading `0` hex digits a block hash needs
pub const POW_DIFFICULTY: usize = 2;

/// `previous_hash` of the genesis block
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// A block that is still collecting votes and has no nonce yet
#[derive(Debug, Clone)]
pub struct PendingBlock {
    index: u64,
    previous_hash: String,
    votes: Vec<Vote>,
}

impl PendingBlock {
    pub fn new(index: u64, previous_hash: String) -> Self {
        PendingBlock {
            index,
            previous_hash,
            votes: vec![],
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn push(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    /// Search nonces upward from zero until the hash meets the target
    pub fn mine(self, timestamp: i64, difficulty: usize) -> Block {
        let mut block = Block {
            index: self.index,
            timestamp,
            votes: self.votes,
            previous_hash: self.previous_hash,
            nonce: 0,
            hash: String::new(),
        };

        loop {
            let hash = block.compute_hash();
            if meets_target(&hash, difficulty) {
                block.hash = hash;
                break;
            }
            block.nonce += 1;
        }

        log::debug!(
            "securevote: mined block {} after {} attempts",
            block.index,
            block.nonce + 1
        );
        block
    }
}

/// A mined block.
///
/// Blocks on a chain are never modified; `verify_blocks` detects any change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub index: u64,

    /// Unix time in milliseconds
    pub timestamp: i64,
    pub votes: Vec<Vote>,
    pub previous_hash: String,
    pub nonce: u64,
    pub hash: String,
}

impl Block {
    /// The first block of every chain: no votes, all-zero previous hash
    pub fn genesis(timestamp: i64, difficulty: usize) -> Self {
        PendingBlock::new(0, GENESIS_PREVIOUS_HASH.to_owned()).mine(timestamp, difficulty)
    }

    /// Recompute the hash from the block contents, ignoring the stored `hash`.
    ///
    /// Integers are fixed-width big-endian and every string is prefixed by its
    /// byte length, so the encoding is injective:
    ///
    /// ```text
    /// u64(index) i64(timestamp) u64(#votes)
    ///   { str(fingerprint) str(candidate) i64(timestamp) str(fragment) }*
    /// str(previous_hash) u64(nonce)
    /// ```
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_be_bytes());
        hasher.update(self.timestamp.to_be_bytes());
        hasher.update((self.votes.len() as u64).to_be_bytes());
        for vote in &self.votes {
            update_str(&mut hasher, &vote.token_fingerprint);
            update_str(&mut hasher, &vote.candidate);
            hasher.update(vote.timestamp.to_be_bytes());
            update_str(&mut hasher, &vote.signature_fragment);
        }
        update_str(&mut hasher, &self.previous_hash);
        hasher.update(self.nonce.to_be_bytes());
        hex::encode(hasher.finalize())
    }
}

fn update_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_be_bytes());
    hasher.update(s.as_bytes());
}

/// Does the hex hash start with `difficulty` zeros
pub fn meets_target(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

/// Result of a full-chain integrity check
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "status")]
#[serde(rename_all = "snake_case")]
pub enum ChainStatus {
    Valid,
    Invalid { at_index: u64 },
}

impl ChainStatus {
    pub fn is_valid(&self) -> bool {
        *self == ChainStatus::Valid
    }
}

/// Check every block from genesis and report the first one that fails.
///
/// For block `i`: its index is `i`, the recomputed hash equals the stored
/// hash and meets the target, and `previous_hash` links to block `i - 1`
/// (or is all zeros for genesis, which must also hold no votes).
pub fn verify_blocks(blocks: &[Block], difficulty: usize) -> ChainStatus {
    if blocks.is_empty() {
        return ChainStatus::Invalid { at_index: 0 };
    }

    let mut previous_hash = GENESIS_PREVIOUS_HASH;
    for (i, block) in blocks.iter().enumerate() {
        let i = i as u64;
        let valid = block.index == i
            && (i != 0 || block.votes.is_empty())
            && block.previous_hash == previous_hash
            && block.compute_hash() == block.hash
            && meets_target(&block.hash, difficulty);

        if !valid {
            return ChainStatus::Invalid { at_index: i };
        }
        previous_hash = &block.hash;
    }

    ChainStatus::Valid
}
