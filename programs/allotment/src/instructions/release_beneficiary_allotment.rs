use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BOOK_SEED, CONFIG_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::instructions::release_allotment::settle_release;
use crate::state::{AllotmentBook, AllotmentConfig};

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct ReleaseBeneficiaryAllotment<'info> {
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
        constraint = beneficiary_token_account.owner == beneficiary @ VestingError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    #[account(constraint = mint.key() == allotment_config.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ReleaseBeneficiaryAllotment<'info> {
    /// Owner pushes a beneficiary's allotment out once it has unlocked.
    pub fn process(&mut self, config_bump: u8, beneficiary: Pubkey, name: String) -> Result<()> {
        let caller = self.owner.key();
        settle_release(
            &self.allotment_config,
            &mut self.allotment_book,
            &self.vault,
            &self.beneficiary_token_account,
            &self.mint,
            &self.token_program,
            config_bump,
            caller,
            beneficiary,
            &name,
        )
    }
}
