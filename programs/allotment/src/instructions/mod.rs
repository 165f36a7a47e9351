pub mod initialize;
pub mod grant_alloter_role;
pub mod revoke_alloter_role;
pub mod allot_tokens;
pub mod mint_tokens;
pub mod set_new_release_time;
pub mod release_allotment;
pub mod release_beneficiary_allotment;
pub mod get_allotments;
pub mod get_beneficiary_allotments;
pub mod get_all_beneficiaries;
pub mod get_total_balance;

pub use initialize::*;
pub use grant_alloter_role::*;
pub use revoke_alloter_role::*;
pub use allot_tokens::*;
pub use mint_tokens::*;
pub use set_new_release_time::*;
pub use release_allotment::*;
pub use release_beneficiary_allotment::*;
pub use get_allotments::*;
pub use get_beneficiary_allotments::*;
pub use get_all_beneficiaries::*;
pub use get_total_balance::*;
