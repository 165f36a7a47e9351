use anchor_lang::prelude::*;

/// Custom error codes for the allotment program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[msg("An allotment with this name already exists for the beneficiary")]
    DuplicateGrant,

    #[msg("Allotment not found")]
    GrantNotFound,

    #[msg("Allotment already released; release time is frozen")]
    GrantAlreadyReleased,

    #[msg("New release time must be later than the current release time")]
    ReleaseTimeNotIncreasing,

    #[msg("Current time is before release time")]
    TooEarly,

    #[msg("Supply cap exceeded")]
    CapExceeded,

    #[msg("Custodian does not hold the mint authority")]
    MintUnauthorized,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Invalid allocation (must be > 0)")]
    InvalidAllocation,

    #[msg("Invalid allotment name")]
    InvalidName,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Release time is before current time")]
    ReleaseTimeInPast,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Alloter list is full")]
    AlloterListFull,

    #[msg("Account already holds the alloter role")]
    AlloterAlreadyGranted,

    #[msg("Account does not hold the alloter role")]
    AlloterNotFound,

    #[msg("Beneficiary index is full")]
    BeneficiaryIndexFull,

    #[msg("Beneficiary holds the maximum number of allotments")]
    BeneficiaryGrantLimit,

    #[msg("Allotment book is full")]
    AllotmentBookFull,

    #[msg("Math overflow")]
    MathOverflow,
}
