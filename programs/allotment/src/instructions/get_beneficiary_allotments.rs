use anchor_lang::prelude::*;

use crate::constants::{BOOK_SEED, CONFIG_SEED};
use crate::engine::AllotmentQuery;
use crate::state::{AllotmentBook, AllotmentConfig, Grant};

#[derive(Accounts)]
pub struct GetBeneficiaryAllotments<'info> {
    #[account(seeds = [CONFIG_SEED], bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(seeds = [BOOK_SEED, allotment_config.key().as_ref()], bump)]
    pub allotment_book: Account<'info, AllotmentBook>,
}

impl<'info> GetBeneficiaryAllotments<'info> {
    pub fn process(&self, beneficiary: Pubkey) -> Result<Vec<Grant>> {
        Ok(AllotmentQuery::new(&*self.allotment_book).get_beneficiary_allotments(&beneficiary))
    }
}
