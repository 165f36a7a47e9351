use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use super::TokenLedger;
use crate::error::VestingError;

/// Capped, role-gated in-memory token.
#[derive(Debug, Default)]
pub struct MemoryToken {
    cap: u64,
    supply: u64,
    minters: Vec<Pubkey>,
    balances: BTreeMap<Pubkey, u64>,
    fail_transfers: bool,
}

impl MemoryToken {
    pub fn new(cap: u64) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    pub fn add_minter(&mut self, minter: Pubkey) {
        self.minters.push(minter);
    }

    pub fn supply(&self) -> u64 {
        self.supply
    }

    pub fn fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }
}

impl TokenLedger for MemoryToken {
    // The custodian mints to itself, so the recipient doubles as the caller.
    fn mint(&mut self, to: &Pubkey, amount: u64) -> Result<(), VestingError> {
        if !self.minters.contains(to) {
            return Err(VestingError::MintUnauthorized);
        }
        let supply = self
            .supply
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if supply > self.cap {
            return Err(VestingError::CapExceeded);
        }
        self.supply = supply;
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }

    fn balance_of(&self, who: &Pubkey) -> u64 {
        self.balances.get(who).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), VestingError> {
        if self.fail_transfers || self.balance_of(from) < amount {
            return Err(VestingError::TransferFailed);
        }
        *self.balances.entry(*from).or_default() -= amount;
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }
}
