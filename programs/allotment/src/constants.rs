//! Program-wide constants.

/// PDA seed of the single allotment configuration account (custodian identity).
pub const CONFIG_SEED: &[u8] = b"allotment_config";

/// PDA seed of the allotment book, derived under the config account.
pub const BOOK_SEED: &[u8] = b"allotment_book";

/// PDA seed of the custodian vault token account, derived under the config account.
pub const VAULT_SEED: &[u8] = b"vault";

/// Max accounts holding the alloter role at once.
pub const MAX_ALLOTERS: usize = 8;

/// Max distinct beneficiaries in the beneficiary index.
/// Bounded so `get_all_beneficiaries` fits in 1024 bytes of return data.
pub const MAX_BENEFICIARIES: usize = 24;

/// Max grants stored in the allotment book across all beneficiaries.
pub const MAX_GRANTS: usize = 64;

/// Max grants held by a single beneficiary.
pub const MAX_GRANTS_PER_BENEFICIARY: usize = 8;

/// Max length in bytes of a grant name ("stake", "team", ...).
pub const MAX_NAME_LEN: usize = 16;
