use anchor_lang::prelude::*;

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantCreated {
    pub custodian: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub name: String,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTimeExtended {
    pub custodian: Pubkey,
    pub beneficiary: Pubkey,
    pub name: String,
    pub new_release_time: i64,
}

/// `amount` is zero when the grant had already been paid out.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantReleased {
    pub custodian: Pubkey,
    pub beneficiary: Pubkey,
    pub name: String,
    pub amount: u64,
}
