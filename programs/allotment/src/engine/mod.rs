//! Account-agnostic allotment core.
//!
//! The engine only talks to its collaborators through the traits below, so the
//! same rules run against on-chain accounts and against in-memory fakes.

use anchor_lang::prelude::Pubkey;

use crate::error::VestingError;
use crate::state::Grant;

pub mod events;
mod vesting;

#[cfg(test)]
pub(crate) mod testing;

pub use events::*;
pub use vesting::*;

/// Grant records plus the beneficiary index. No authorization or time logic.
pub trait AllotmentStore {
    /// Would `insert` accept this key? Checked before any supply is minted.
    fn check_insert(&self, beneficiary: &Pubkey, name: &str) -> Result<(), VestingError>;
    fn insert(&mut self, grant: Grant) -> Result<(), VestingError>;
    fn get(&self, beneficiary: &Pubkey, name: &str) -> Option<Grant>;
    fn list_by_beneficiary(&self, beneficiary: &Pubkey) -> Vec<Grant>;
    fn set_release_time(
        &mut self,
        beneficiary: &Pubkey,
        name: &str,
        new_time: i64,
    ) -> Result<(), VestingError>;
    /// Resets the token count to zero and returns what it was.
    fn zero_out(&mut self, beneficiary: &Pubkey, name: &str) -> Result<u64, VestingError>;
    /// Puts back a previously read record, undoing a `zero_out`.
    fn restore(&mut self, grant: Grant) -> Result<(), VestingError>;
    fn all_beneficiaries(&self) -> Vec<Pubkey>;
}

/// The capped token the custodian mints into and pays out from.
pub trait TokenLedger {
    fn mint(&mut self, to: &Pubkey, amount: u64) -> Result<(), VestingError>;
    fn balance_of(&self, who: &Pubkey) -> u64;
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), VestingError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The single administrative identity.
    Owner,
    /// May create allotments.
    Alloter,
}

pub trait CapabilityGate {
    fn owner(&self) -> Pubkey;
    fn has_role(&self, role: Role, account: &Pubkey) -> bool;
}
