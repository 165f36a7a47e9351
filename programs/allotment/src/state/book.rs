use anchor_lang::prelude::*;

use crate::constants::{MAX_BENEFICIARIES, MAX_GRANTS, MAX_GRANTS_PER_BENEFICIARY, MAX_NAME_LEN};
use crate::engine::AllotmentStore;
use crate::error::VestingError;

/// A named, time-locked allotment held in custody for one beneficiary.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub beneficiary: Pubkey,
    pub name: String,
    /// Unix seconds; release is refused before this instant.
    pub release_time: i64,
    /// Remaining unreleased amount. Pinned at zero once released.
    pub token_count: u64,
    pub released: bool,
}

impl Grant {
    pub const SIZE: usize =
        32 + // beneficiary
        4 + MAX_NAME_LEN + // name
        8 +  // release_time
        8 +  // token_count
        1;   // released

    pub fn new(beneficiary: Pubkey, name: &str, release_time: i64, token_count: u64) -> Self {
        Self {
            beneficiary,
            name: name.to_string(),
            release_time,
            token_count,
            released: false,
        }
    }

    /// Paid out already, or carrying nothing left to pay.
    pub fn is_released(&self) -> bool {
        self.released || self.token_count == 0
    }

    fn is_key(&self, beneficiary: &Pubkey, name: &str) -> bool {
        self.beneficiary == *beneficiary && self.name == name
    }
}

/// Grant names are short non-empty labels.
pub fn validate_name(name: &str) -> core::result::Result<(), VestingError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(VestingError::InvalidName);
    }
    Ok(())
}

/// PDA holding every grant plus the beneficiary index, both in insertion order.
#[account]
#[derive(Debug, Default)]
pub struct AllotmentBook {
    /// Every beneficiary that ever received a grant. Append-only, no duplicates.
    pub beneficiaries: Vec<Pubkey>,
    /// Grant arena keyed by (beneficiary, name).
    pub grants: Vec<Grant>,
}

impl AllotmentBook {
    /// Space for discriminator + both vectors at full capacity.
    pub const fn space() -> usize {
        8 + 4 + MAX_BENEFICIARIES * 32 + 4 + MAX_GRANTS * Grant::SIZE
    }

    fn position(&self, beneficiary: &Pubkey, name: &str) -> Option<usize> {
        self.grants.iter().position(|g| g.is_key(beneficiary, name))
    }

    fn grant_mut(
        &mut self,
        beneficiary: &Pubkey,
        name: &str,
    ) -> core::result::Result<&mut Grant, VestingError> {
        self.grants
            .iter_mut()
            .find(|g| g.is_key(beneficiary, name))
            .ok_or(VestingError::GrantNotFound)
    }
}

impl AllotmentStore for AllotmentBook {
    fn check_insert(
        &self,
        beneficiary: &Pubkey,
        name: &str,
    ) -> core::result::Result<(), VestingError> {
        if self.position(beneficiary, name).is_some() {
            return Err(VestingError::DuplicateGrant);
        }
        if self.grants.len() >= MAX_GRANTS {
            return Err(VestingError::AllotmentBookFull);
        }
        let held = self
            .grants
            .iter()
            .filter(|g| g.beneficiary == *beneficiary)
            .count();
        if held >= MAX_GRANTS_PER_BENEFICIARY {
            return Err(VestingError::BeneficiaryGrantLimit);
        }
        if !self.beneficiaries.contains(beneficiary) && self.beneficiaries.len() >= MAX_BENEFICIARIES
        {
            return Err(VestingError::BeneficiaryIndexFull);
        }
        Ok(())
    }

    fn insert(&mut self, grant: Grant) -> core::result::Result<(), VestingError> {
        self.check_insert(&grant.beneficiary, &grant.name)?;
        if !self.beneficiaries.contains(&grant.beneficiary) {
            self.beneficiaries.push(grant.beneficiary);
        }
        self.grants.push(grant);
        Ok(())
    }

    fn get(&self, beneficiary: &Pubkey, name: &str) -> Option<Grant> {
        self.position(beneficiary, name).map(|i| self.grants[i].clone())
    }

    fn list_by_beneficiary(&self, beneficiary: &Pubkey) -> Vec<Grant> {
        self.grants
            .iter()
            .filter(|g| g.beneficiary == *beneficiary)
            .cloned()
            .collect()
    }

    fn set_release_time(
        &mut self,
        beneficiary: &Pubkey,
        name: &str,
        new_time: i64,
    ) -> core::result::Result<(), VestingError> {
        self.grant_mut(beneficiary, name)?.release_time = new_time;
        Ok(())
    }

    fn zero_out(
        &mut self,
        beneficiary: &Pubkey,
        name: &str,
    ) -> core::result::Result<u64, VestingError> {
        let grant = self.grant_mut(beneficiary, name)?;
        let previous = core::mem::take(&mut grant.token_count);
        grant.released = true;
        Ok(previous)
    }

    fn restore(&mut self, grant: Grant) -> core::result::Result<(), VestingError> {
        let slot = self.grant_mut(&grant.beneficiary, &grant.name)?;
        *slot = grant;
        Ok(())
    }

    fn all_beneficiaries(&self) -> Vec<Pubkey> {
        self.beneficiaries.clone()
    }
}
