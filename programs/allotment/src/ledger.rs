//! SPL Token backed `TokenLedger`.
//!
//! The engine runs against a snapshot of the mint and the token accounts passed
//! to the instruction. Mints and transfers are validated and staged here, then
//! `commit` replays them as token-program CPIs signed by the config PDA. Any
//! failure before or during the commit aborts the whole transaction.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Transfer};

use crate::engine::TokenLedger;
use crate::error::VestingError;

/// True when `custodian` is the mint's current mint authority.
pub fn holds_mint_authority(mint_authority: Option<Pubkey>, custodian: &Pubkey) -> bool {
    mint_authority.as_ref() == Some(custodian)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Holding {
    owner: Pubkey,
    account: Pubkey,
    amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StagedOp {
    MintTo { account: Pubkey, amount: u64 },
    Transfer { from: Pubkey, to: Pubkey, amount: u64 },
}

#[derive(Debug)]
pub struct SplLedger {
    custodian: Pubkey,
    /// Custodian holds the mint authority.
    can_mint: bool,
    supply: u64,
    cap: u64,
    holdings: Vec<Holding>,
    staged: Vec<StagedOp>,
}

impl SplLedger {
    pub fn new(custodian: Pubkey, mint: &Mint, cap: u64) -> Self {
        let can_mint = holds_mint_authority(mint.mint_authority.into(), &custodian);
        Self::from_parts(custodian, can_mint, mint.supply, cap)
    }

    pub fn from_parts(custodian: Pubkey, can_mint: bool, supply: u64, cap: u64) -> Self {
        Self {
            custodian,
            can_mint,
            supply,
            cap,
            holdings: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Registers a token account `owner` may receive into or pay from.
    pub fn with_holding(mut self, owner: Pubkey, account: Pubkey, amount: u64) -> Self {
        self.holdings.push(Holding {
            owner,
            account,
            amount,
        });
        self
    }

    pub fn supply(&self) -> u64 {
        self.supply
    }

    #[cfg(test)]
    pub fn staged(&self) -> &[StagedOp] {
        &self.staged
    }

    fn holding_index(&self, owner: &Pubkey) -> core::result::Result<usize, VestingError> {
        self.holdings
            .iter()
            .position(|h| h.owner == *owner)
            .ok_or(VestingError::InvalidTokenAccount)
    }

    /// Replays staged operations as SPL Token CPIs.
    pub fn commit<'info>(
        self,
        token_program: &AccountInfo<'info>,
        mint: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        accounts: &[AccountInfo<'info>],
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        let lookup = |key: &Pubkey| -> Result<AccountInfo<'info>> {
            accounts
                .iter()
                .find(|a| a.key == key)
                .cloned()
                .ok_or_else(|| error!(VestingError::InvalidTokenAccount))
        };

        for op in self.staged {
            match op {
                StagedOp::MintTo { account, amount } => token::mint_to(
                    CpiContext::new_with_signer(
                        token_program.clone(),
                        MintTo {
                            mint: mint.clone(),
                            to: lookup(&account)?,
                            authority: authority.clone(),
                        },
                        signer_seeds,
                    ),
                    amount,
                )?,
                StagedOp::Transfer { from, to, amount } => token::transfer(
                    CpiContext::new_with_signer(
                        token_program.clone(),
                        Transfer {
                            from: lookup(&from)?,
                            to: lookup(&to)?,
                            authority: authority.clone(),
                        },
                        signer_seeds,
                    ),
                    amount,
                )?,
            }
        }
        Ok(())
    }
}

impl TokenLedger for SplLedger {
    fn mint(&mut self, to: &Pubkey, amount: u64) -> core::result::Result<(), VestingError> {
        if !self.can_mint {
            return Err(VestingError::MintUnauthorized);
        }
        let supply = self
            .supply
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if supply > self.cap {
            return Err(VestingError::CapExceeded);
        }
        let idx = self.holding_index(to)?;
        let holding = &mut self.holdings[idx];
        holding.amount = holding
            .amount
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        let account = holding.account;
        self.supply = supply;
        self.staged.push(StagedOp::MintTo { account, amount });
        Ok(())
    }

    fn balance_of(&self, who: &Pubkey) -> u64 {
        self.holdings
            .iter()
            .filter(|h| h.owner == *who)
            .fold(0u64, |acc, h| acc.saturating_add(h.amount))
    }

    // Only the custodian's own funds move; the config PDA signs every transfer.
    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> core::result::Result<(), VestingError> {
        if *from != self.custodian {
            return Err(VestingError::TransferFailed);
        }
        let src = self
            .holding_index(from)
            .map_err(|_| VestingError::TransferFailed)?;
        let dst = self
            .holding_index(to)
            .map_err(|_| VestingError::TransferFailed)?;
        if self.holdings[src].amount < amount {
            return Err(VestingError::TransferFailed);
        }
        if src != dst {
            let credited = self.holdings[dst]
                .amount
                .checked_add(amount)
                .ok_or(VestingError::MathOverflow)?;
            self.holdings[src].amount -= amount;
            self.holdings[dst].amount = credited;
        }
        let from_account = self.holdings[src].account;
        let to_account = self.holdings[dst].account;

        if amount > 0 {
            self.staged.push(StagedOp::Transfer {
                from: from_account,
                to: to_account,
                amount,
            });
        }
        Ok(())
    }
}
