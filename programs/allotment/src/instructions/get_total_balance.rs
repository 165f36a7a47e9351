use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::constants::CONFIG_SEED;
use crate::engine::total_balance;
use crate::error::VestingError;
use crate::ledger::SplLedger;
use crate::state::AllotmentConfig;

/// Balances are read per token account: the result is what the owner of
/// `token_account` holds in that account. Pass the vault for the custodian.
#[derive(Accounts)]
pub struct GetTotalBalance<'info> {
    #[account(seeds = [CONFIG_SEED], bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(constraint = mint.key() == allotment_config.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    #[account(constraint = token_account.mint == allotment_config.mint @ VestingError::InvalidTokenMint)]
    pub token_account: Account<'info, TokenAccount>,
}

impl<'info> GetTotalBalance<'info> {
    pub fn process(&self) -> Result<u64> {
        let cfg = &self.allotment_config;
        let holder = self.token_account.owner;
        let ledger = SplLedger::new(cfg.key(), &self.mint, cfg.supply_cap).with_holding(
            holder,
            self.token_account.key(),
            self.token_account.amount,
        );
        Ok(total_balance(&ledger, &holder))
    }
}
