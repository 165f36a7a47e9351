use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::CONFIG_SEED;
use crate::engine::{CapabilityGate, Role, TokenLedger};
use crate::error::VestingError;
use crate::ledger::SplLedger;
use crate::state::AllotmentConfig;

#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(seeds = [CONFIG_SEED], bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(
        mut,
        constraint = mint.key() == allotment_config.mint @ VestingError::InvalidTokenMint,
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = owner_token_account.mint == allotment_config.mint @ VestingError::InvalidTokenMint,
        constraint = owner_token_account.owner == owner.key() @ VestingError::InvalidTokenAccount,
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> MintTokens<'info> {
    /// Mints unvested supply straight to the owner, under the same cap as allotments.
    pub fn process(&mut self, config_bump: u8, amount: u64) -> Result<()> {
        require!(amount > 0, VestingError::InvalidAllocation);

        let cfg = &self.allotment_config;
        let owner = self.owner.key();
        require!(cfg.has_role(Role::Owner, &owner), VestingError::Unauthorized);

        let mut ledger = SplLedger::new(cfg.key(), &self.mint, cfg.supply_cap).with_holding(
            owner,
            self.owner_token_account.key(),
            self.owner_token_account.amount,
        );
        ledger.mint(&owner, amount)?;
        let supply = ledger.supply();

        let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config_bump]]];
        ledger.commit(
            &self.token_program.to_account_info(),
            &self.mint.to_account_info(),
            &self.allotment_config.to_account_info(),
            &[self.owner_token_account.to_account_info()],
            signer_seeds,
        )?;

        emit!(TokensMinted {
            to: owner,
            amount,
            supply,
        });
        Ok(())
    }
}

#[event]
pub struct TokensMinted {
    pub to: Pubkey,
    pub amount: u64,
    pub supply: u64,
}
