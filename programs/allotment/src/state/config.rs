use anchor_lang::prelude::*;

use crate::constants::MAX_ALLOTERS;
use crate::engine::{CapabilityGate, Role};
use crate::error::VestingError;

/// Single allotment configuration PDA. Its address is the custodian identity:
/// it owns the vault and must be the mint authority of `mint`.
#[account]
#[derive(Debug)]
pub struct AllotmentConfig {
    /// Administrative owner (creates, extends, releases on behalf of anyone).
    pub owner: Pubkey,
    /// Token mint backing every allotment.
    pub mint: Pubkey,
    /// Custodian vault token account.
    pub vault: Pubkey,
    /// Hard cap on the mint's total supply.
    pub supply_cap: u64,
    /// Accounts allowed to create allotments without owner privileges.
    pub alloters: Vec<Pubkey>,
    /// PDA bump.
    pub bump: u8,
}

impl AllotmentConfig {
    pub const SIZE: usize =
        32 + // owner
        32 + // mint
        32 + // vault
        8 +  // supply_cap
        4 + MAX_ALLOTERS * 32 + // alloters
        1;   // bump

    pub fn is_alloter(&self, account: &Pubkey) -> bool {
        self.alloters.iter().any(|a| a == account)
    }

    pub fn grant_alloter(&mut self, account: Pubkey) -> core::result::Result<(), VestingError> {
        if account == Pubkey::default() {
            return Err(VestingError::InvalidConfig);
        }
        if self.is_alloter(&account) {
            return Err(VestingError::AlloterAlreadyGranted);
        }
        if self.alloters.len() >= MAX_ALLOTERS {
            return Err(VestingError::AlloterListFull);
        }
        self.alloters.push(account);
        Ok(())
    }

    pub fn revoke_alloter(&mut self, account: &Pubkey) -> core::result::Result<(), VestingError> {
        let idx = self
            .alloters
            .iter()
            .position(|a| a == account)
            .ok_or(VestingError::AlloterNotFound)?;
        self.alloters.remove(idx);
        Ok(())
    }
}

impl CapabilityGate for AllotmentConfig {
    fn owner(&self) -> Pubkey {
        self.owner
    }

    fn has_role(&self, role: Role, account: &Pubkey) -> bool {
        match role {
            Role::Owner => *account == self.owner,
            Role::Alloter => self.is_alloter(account),
        }
    }
}
