use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::error::VestingError;
use crate::state::AllotmentConfig;

#[derive(Accounts)]
pub struct RevokeAlloterRole<'info> {
    #[account(mut, seeds = [CONFIG_SEED], bump = allotment_config.bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,
    pub owner: Signer<'info>,
}

impl<'info> RevokeAlloterRole<'info> {
    pub fn process(&mut self, account: Pubkey) -> Result<()> {
        let cfg = &mut self.allotment_config;
        require_keys_eq!(self.owner.key(), cfg.owner, VestingError::Unauthorized);

        cfg.revoke_alloter(&account)?;
        msg!("alloter role revoked from {}", account);

        emit!(AlloterRoleRevoked {
            owner: cfg.owner,
            account,
        });
        Ok(())
    }
}

#[event]
pub struct AlloterRoleRevoked {
    pub owner: Pubkey,
    pub account: Pubkey,
}
