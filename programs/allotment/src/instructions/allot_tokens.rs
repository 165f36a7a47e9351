use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BOOK_SEED, CONFIG_SEED, VAULT_SEED};
use crate::engine::VestingEngine;
use crate::error::VestingError;
use crate::ledger::SplLedger;
use crate::state::{AllotmentBook, AllotmentConfig};

#[derive(Accounts)]
pub struct AllotTokens<'info> {
    #[account(seeds = [CONFIG_SEED], bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(
        mut,
        seeds = [BOOK_SEED, allotment_config.key().as_ref()],
        bump
    )]
    pub allotment_book: Account<'info, AllotmentBook>,

    #[account(
        mut,
        seeds = [VAULT_SEED, allotment_config.key().as_ref()],
        bump,
        constraint = vault.mint == allotment_config.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = mint.key() == allotment_config.mint @ VestingError::InvalidTokenMint,
    )]
    pub mint: Account<'info, Mint>,

    /// Owner or alloter.
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> AllotTokens<'info> {
    pub fn process(
        &mut self,
        config_bump: u8,
        beneficiary: Pubkey,
        release_time: i64,
        amount: u64,
        name: String,
    ) -> Result<()> {
        let custodian = self.allotment_config.key();
        let clock = Clock::get()?;
        let cfg = &self.allotment_config;
        let mut ledger = SplLedger::new(custodian, &self.mint, cfg.supply_cap).with_holding(
            custodian,
            self.vault.key(),
            self.vault.amount,
        );

        let event = VestingEngine::new(&mut *self.allotment_book, &**cfg, custodian)
            .create_grant(
                &mut ledger,
                &clock,
                &self.authority.key(),
                beneficiary,
                release_time,
                amount,
                &name,
            )?;

        // Mint into the vault, signed by the config PDA as mint authority.
        let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config_bump]]];
        ledger.commit(
            &self.token_program.to_account_info(),
            &self.mint.to_account_info(),
            &self.allotment_config.to_account_info(),
            &[self.vault.to_account_info()],
            signer_seeds,
        )?;

        emit!(event);
        Ok(())
    }
}
