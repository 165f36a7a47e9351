use anchor_lang::prelude::*;

use crate::constants::{BOOK_SEED, CONFIG_SEED};
use crate::engine::VestingEngine;
use crate::state::{AllotmentBook, AllotmentConfig};

#[derive(Accounts)]
pub struct SetNewReleaseTime<'info> {
    #[account(seeds = [CONFIG_SEED], bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(
        mut,
        seeds = [BOOK_SEED, allotment_config.key().as_ref()],
        bump
    )]
    pub allotment_book: Account<'info, AllotmentBook>,

    pub owner: Signer<'info>,
}

impl<'info> SetNewReleaseTime<'info> {
    pub fn process(
        &mut self,
        beneficiary: Pubkey,
        name: String,
        new_release_time: i64,
    ) -> Result<()> {
        let custodian = self.allotment_config.key();
        let cfg = &self.allotment_config;

        let event = VestingEngine::new(&mut *self.allotment_book, &**cfg, custodian)
            .extend_release_time(&self.owner.key(), &beneficiary, &name, new_release_time)?;

        emit!(event);
        Ok(())
    }
}
