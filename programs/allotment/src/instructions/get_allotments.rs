use anchor_lang::prelude::*;

use crate::constants::{BOOK_SEED, CONFIG_SEED};
use crate::engine::AllotmentQuery;
use crate::state::{AllotmentBook, AllotmentConfig, Grant};

#[derive(Accounts)]
pub struct GetAllotments<'info> {
    #[account(seeds = [CONFIG_SEED], bump)]
    pub allotment_config: Account<'info, AllotmentConfig>,

    #[account(seeds = [BOOK_SEED, allotment_config.key().as_ref()], bump)]
    pub allotment_book: Account<'info, AllotmentBook>,

    pub caller: Signer<'info>,
}

impl<'info> GetAllotments<'info> {
    /// Allotments of the signing account, in creation order.
    pub fn process(&self) -> Result<Vec<Grant>> {
        let query = AllotmentQuery::new(&*self.allotment_book);
        Ok(query.get_allotments(&self.caller.key()))
    }
}
