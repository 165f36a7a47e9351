use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BOOK_SEED, CONFIG_SEED, VAULT_SEED};
use crate::engine::VestingEngine;
use crate::error::VestingError;
use crate::ledger::SplLedger;
use crate::state::{AllotmentBook, AllotmentConfig};

/// Shared by the beneficiary and owner release paths: runs the engine against
/// the vault and the beneficiary's token account, then pays out via CPI.
#[allow(clippy::too_many_arguments)]
pub(crate) fn settle_release<'info>(
    config: &Account<'info, AllotmentConfig>,
    book: &mut Account<'info, AllotmentBook>,
    vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    mint: &Account<'info, Mint>,
    token_program: &Program<'info, Token>,
    config_bump: u8,
    caller: Pubkey,
    beneficiary: Pubkey,
    name: &str,
) -> Result<()> {
    let custodian = config.key();
    let clock = Clock::get()?;
    let mut ledger = SplLedger::new(custodian, mint, config.supply_cap)
        .with_holding(custodian, vault.key(), vault.amount)
        .with_holding(beneficiary, destination.key(), destination.amount);

    let event = VestingEngine::new(&mut **book, &**config, custodian).release(
        &mut ledger,
        &clock,
        &caller,
        &beneficiary,
        name,
    )?;

    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config_bump]]];
    ledger.commit(
        &token_program.to_account_info(),
        &mint.to_account_info(),
        &config.to_account_info(),
        &[vault.to_account_info(), destination.to_account_info()],
        signer_seeds,
    )?;

    emit!(event);
    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseAllotment<'info> {
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
        constraint = beneficiary_token_account.mint == allotment_config.mint @ VestingError::InvalidTokenMint,
        constraint = beneficiary_token_account.owner == beneficiary.key() @ VestingError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    #[account(constraint = mint.key() == allotment_config.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ReleaseAllotment<'info> {
    /// Beneficiary pulls one of its own allotments.
    pub fn process(&mut self, config_bump: u8, name: String) -> Result<()> {
        let beneficiary = self.beneficiary.key();
        settle_release(
            &self.allotment_config,
            &mut self.allotment_book,
            &self.vault,
            &self.beneficiary_token_account,
            &self.mint,
            &self.token_program,
            config_bump,
            beneficiary,
            beneficiary,
            &name,
        )
    }
}
