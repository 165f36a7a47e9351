use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::Grant;

declare_id!("ECTraGnLHpcxLbiYgeyppNzyxs3zNYdniLiCownn5Xgx");

#[program]
pub mod allotment {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, supply_cap: u64) -> Result<()> {
        ctx.accounts.process(ctx.bumps.allotment_config, supply_cap)
    }

    pub fn grant_alloter_role(ctx: Context<GrantAlloterRole>, account: Pubkey) -> Result<()> {
        ctx.accounts.process(account)
    }

    pub fn revoke_alloter_role(ctx: Context<RevokeAlloterRole>, account: Pubkey) -> Result<()> {
        ctx.accounts.process(account)
    }

    pub fn allot_tokens(
        ctx: Context<AllotTokens>,
        beneficiary: Pubkey,
        release_time: i64,
        amount: u64,
        name: String,
    ) -> Result<()> {
        ctx.accounts.process(
            ctx.bumps.allotment_config,
            beneficiary,
            release_time,
            amount,
            name,
        )
    }

    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        ctx.accounts.process(ctx.bumps.allotment_config, amount)
    }

    pub fn set_new_release_time(
        ctx: Context<SetNewReleaseTime>,
        beneficiary: Pubkey,
        name: String,
        new_release_time: i64,
    ) -> Result<()> {
        ctx.accounts.process(beneficiary, name, new_release_time)
    }

    pub fn release_allotment(ctx: Context<ReleaseAllotment>, name: String) -> Result<()> {
        ctx.accounts.process(ctx.bumps.allotment_config, name)
    }

    pub fn release_beneficiary_allotment(
        ctx: Context<ReleaseBeneficiaryAllotment>,
        beneficiary: Pubkey,
        name: String,
    ) -> Result<()> {
        ctx.accounts
            .process(ctx.bumps.allotment_config, beneficiary, name)
    }

    pub fn get_allotments(ctx: Context<GetAllotments>) -> Result<Vec<Grant>> {
        ctx.accounts.process()
    }

    pub fn get_beneficiary_allotments(
        ctx: Context<GetBeneficiaryAllotments>,
        beneficiary: Pubkey,
    ) -> Result<Vec<Grant>> {
        ctx.accounts.process(beneficiary)
    }

    pub fn get_all_beneficiaries(ctx: Context<GetAllBeneficiaries>) -> Result<Vec<Pubkey>> {
        ctx.accounts.process()
    }

    pub fn get_total_balance(ctx: Context<GetTotalBalance>) -> Result<u64> {
        ctx.accounts.process()
    }
}
