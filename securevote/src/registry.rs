use crate::*;
use std::collections::BTreeMap;

/// Registration state of one voter
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoterStatus {
    pub voter_id: String,
    pub eligible: bool,
    pub token_issued: bool,

    /// Unix time in milliseconds
    pub token_issued_at: Option<i64>,
}

/// Eligibility and issuance bookkeeping.
///
/// Records voter ids and issuance times only. Nothing here may hold a
/// token, a blinding factor or any signature.
pub trait Registry {
    fn is_eligible(&self, voter_id: &str) -> bool;

    /// When a credential was issued to this voter, if ever
    fn token_issued_at(&self, voter_id: &str) -> Option<i64>;

    /// Record issuance. Fails for unknown voters and for voters already issued.
    fn mark_issued(&mut self, voter_id: &str, issued_at: i64) -> Result<(), RegistrationError>;

    fn has_token_issued(&self, voter_id: &str) -> bool {
        self.token_issued_at(voter_id).is_some()
    }

    fn status(&self, voter_id: &str) -> VoterStatus {
        let token_issued_at = self.token_issued_at(voter_id);
        VoterStatus {
            voter_id: voter_id.to_owned(),
            eligible: self.is_eligible(voter_id),
            token_issued: token_issued_at.is_some(),
            token_issued_at,
        }
    }
}

/// A simple registry that uses an in-memory BTreeMap
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct MemRegistry {
    voters: BTreeMap<String, Option<i64>>,
}

impl MemRegistry {
    /// Add eligible voters. Existing entries keep their issuance state.
    pub fn seed<I, S>(&mut self, voter_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for voter_id in voter_ids {
            self.voters.entry(voter_id.into()).or_insert(None);
        }
    }

    /// `VOTER_00001` to `VOTER_{count}`
    pub fn with_demo_voters(count: usize) -> Self {
        let mut registry = MemRegistry::default();
        registry.seed((1..=count).map(|i| format!("VOTER_{:05}", i)));
        registry
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn issued_count(&self) -> usize {
        self.voters.values().filter(|v| v.is_some()).count()
    }
}

impl Registry for MemRegistry {
    fn is_eligible(&self, voter_id: &str) -> bool {
        self.voters.contains_key(voter_id)
    }

    fn token_issued_at(&self, voter_id: &str) -> Option<i64> {
        self.voters.get(voter_id).copied().flatten()
    }

    fn mark_issued(&mut self, voter_id: &str, issued_at: i64) -> Result<(), RegistrationError> {
        match self.voters.get_mut(voter_id) {
            None => Err(RegistrationError::NotEligible),
            Some(Some(_)) => Err(RegistrationError::AlreadyIssued),
            Some(slot) => {
                *slot = Some(issued_at);
                Ok(())
            }
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for MemRegistry {
    fn from(voter_ids: Vec<S>) -> Self {
        let mut registry = MemRegistry::default();
        registry.seed(voter_ids);
        registry
    }
}
