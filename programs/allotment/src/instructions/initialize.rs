use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BOOK_SEED, CONFIG_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::ledger::holds_mint_authority;
use crate::state::{AllotmentBook, AllotmentConfig};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + AllotmentConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(
        init,
        payer = owner,
        space = AllotmentBook::space(),
        seeds = [BOOK_SEED, allotment_config.key().as_ref()],
        bump
    )]
    pub allotment_book: Account<'info, AllotmentBook>,

    #[account(
        init,
        payer = owner,
        token::mint = mint,
        token::authority = allotment_config,
        seeds = [VAULT_SEED, allotment_config.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Mint authority must already be handed to the config PDA, so every
    /// mint goes through the capped path.
    #[account(
        constraint = holds_mint_authority(
            mint.mint_authority.into(),
            &allotment_config.key()
        ) @ VestingError::MintUnauthorized,
    )]
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> Initialize<'info> {
    pub fn process(&mut self, config_bump: u8, supply_cap: u64) -> Result<()> {
        require!(supply_cap > 0, VestingError::InvalidConfig);
        require!(self.mint.supply <= supply_cap, VestingError::CapExceeded);

        let cfg = &mut self.allotment_config;
        cfg.owner = self.owner.key();
        cfg.mint = self.mint.key();
        cfg.vault = self.vault.key();
        cfg.supply_cap = supply_cap;
        cfg.alloters = Vec::new();
        cfg.bump = config_bump;

        let book = &mut self.allotment_book;
        book.beneficiaries = Vec::new();
        book.grants = Vec::new();

        msg!(
            "allotment config {} for mint {}, cap {}",
            cfg.key(),
            cfg.mint,
            supply_cap
        );

        emit!(AllotmentInitialized {
            owner: cfg.owner,
            mint: cfg.mint,
            vault: cfg.vault,
            supply_cap,
        });

        Ok(())
    }
}

#[event]
pub struct AllotmentInitialized {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub supply_cap: u64,
}
