use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::error::VestingError;
use crate::state::AllotmentConfig;

#[derive(Accounts)]
pub struct GrantAlloterRole<'info> {
    #[account(mut, seeds = [CONFIG_SEED], bump = allotment_config.bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,
    pub owner: Signer<'info>,
}

impl<'info> GrantAlloterRole<'info> {
    pub fn process(&mut self, account: Pubkey) -> Result<()> {
        let cfg = &mut self.allotment_config;
        require_keys_eq!(self.owner.key(), cfg.owner, VestingError::Unauthorized);

        cfg.grant_alloter(account)?;
        msg!("alloter role granted to {}", account);

        emit!(AlloterRoleGranted {
            owner: cfg.owner,
            account,
        });
        Ok(())
    }
}

#[event]
pub struct AlloterRoleGranted {
    pub owner: Pubkey,
    pub account: Pubkey,
}
