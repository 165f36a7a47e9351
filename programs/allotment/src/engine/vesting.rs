use anchor_lang::prelude::Pubkey;

use super::{
    AllotmentStore, CapabilityGate, GrantCreated, GrantReleased, ReleaseTimeExtended, Role,
    TokenLedger,
};
use crate::error::VestingError;
use crate::state::{validate_name, Grant};
use crate::utils::time::{self, TimeSource};

/// Creates, extends and releases allotments held by `custodian`.
///
/// Every mutating operation either returns the event it produced or fails
/// leaving the store untouched.
pub struct VestingEngine<'a, S, G> {
    store: &'a mut S,
    gate: &'a G,
    custodian: Pubkey,
}

impl<'a, S: AllotmentStore, G: CapabilityGate> VestingEngine<'a, S, G> {
    pub fn new(store: &'a mut S, gate: &'a G, custodian: Pubkey) -> Self {
        Self {
            store,
            gate,
            custodian,
        }
    }

    /// Mints `amount` into custody and records it as a grant named `name`.
    ///
    /// `release_time` must lie strictly after the clock's current time.
    pub fn create_grant<L: TokenLedger, T: TimeSource>(
        &mut self,
        ledger: &mut L,
        clock: &T,
        caller: &Pubkey,
        beneficiary: Pubkey,
        release_time: i64,
        amount: u64,
        name: &str,
    ) -> Result<GrantCreated, VestingError> {
        let allowed =
            self.gate.has_role(Role::Owner, caller) || self.gate.has_role(Role::Alloter, caller);
        if !allowed {
            return Err(VestingError::Unauthorized);
        }
        if amount == 0 {
            return Err(VestingError::InvalidAllocation);
        }
        validate_name(name)?;
        time::validate_release_time(release_time, clock.now())?;
        self.store.check_insert(&beneficiary, name)?;

        // Nothing is recorded unless the supply was actually minted.
        ledger.mint(&self.custodian, amount)?;
        self.store
            .insert(Grant::new(beneficiary, name, release_time, amount))?;

        Ok(GrantCreated {
            custodian: self.custodian,
            beneficiary,
            amount,
            name: name.to_string(),
        })
    }

    /// Pushes the release time of an unreleased grant strictly later. Owner only.
    pub fn extend_release_time(
        &mut self,
        caller: &Pubkey,
        beneficiary: &Pubkey,
        name: &str,
        new_release_time: i64,
    ) -> Result<ReleaseTimeExtended, VestingError> {
        if *caller != self.gate.owner() {
            return Err(VestingError::Unauthorized);
        }
        let grant = self
            .store
            .get(beneficiary, name)
            .ok_or(VestingError::GrantNotFound)?;
        if grant.is_released() {
            return Err(VestingError::GrantAlreadyReleased);
        }
        if new_release_time <= grant.release_time {
            return Err(VestingError::ReleaseTimeNotIncreasing);
        }
        self.store
            .set_release_time(beneficiary, name, new_release_time)?;

        Ok(ReleaseTimeExtended {
            custodian: self.custodian,
            beneficiary: *beneficiary,
            name: name.to_string(),
            new_release_time,
        })
    }

    /// Pays the grant's remaining count to the beneficiary.
    ///
    /// Callable by the beneficiary or the owner. A grant that was already paid
    /// releases zero and still succeeds.
    pub fn release<L: TokenLedger, T: TimeSource>(
        &mut self,
        ledger: &mut L,
        clock: &T,
        caller: &Pubkey,
        beneficiary: &Pubkey,
        name: &str,
    ) -> Result<GrantReleased, VestingError> {
        if caller != beneficiary && !self.gate.has_role(Role::Owner, caller) {
            return Err(VestingError::Unauthorized);
        }
        let before = self
            .store
            .get(beneficiary, name)
            .ok_or(VestingError::GrantNotFound)?;
        let now = clock.now();
        if !time::is_unlocked(now, before.release_time) {
            return Err(VestingError::TooEarly);
        }

        let amount = self.store.zero_out(beneficiary, name)?;
        if let Err(err) = ledger.transfer(&self.custodian, beneficiary, amount) {
            self.store.restore(before)?;
            return Err(err);
        }

        Ok(GrantReleased {
            custodian: self.custodian,
            beneficiary: *beneficiary,
            name: name.to_string(),
            amount,
        })
    }
}

/// Balance `who` holds on the ledger. Needs no allotment state.
pub fn total_balance<L: TokenLedger>(ledger: &L, who: &Pubkey) -> u64 {
    ledger.balance_of(who)
}

/// Side-effect free view over a store.
pub struct AllotmentQuery<'a, S> {
    store: &'a S,
}

impl<'a, S: AllotmentStore> AllotmentQuery<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Grants held by the calling account.
    pub fn get_allotments(&self, caller: &Pubkey) -> Vec<Grant> {
        self.store.list_by_beneficiary(caller)
    }

    pub fn get_beneficiary_allotments(&self, beneficiary: &Pubkey) -> Vec<Grant> {
        self.store.list_by_beneficiary(beneficiary)
    }

    pub fn get_all_beneficiaries(&self) -> Vec<Pubkey> {
        self.store.all_beneficiaries()
    }

    /// Sum of unreleased token counts. Equals the custodian balance.
    pub fn locked_total(&self) -> Result<u64, VestingError> {
        self.store
            .all_beneficiaries()
            .iter()
            .flat_map(|b| self.store.list_by_beneficiary(b))
            .try_fold(0u64, |acc, g| {
                acc.checked_add(g.token_count)
                    .ok_or(VestingError::MathOverflow)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::MemoryToken;
    use crate::state::{AllotmentBook, AllotmentConfig};
    use crate::utils::time::FixedTime;

    const T: i64 = 1_600_128_000;
    /// Grants are created one day before they unlock.
    const CREATED: i64 = T - 86_400;
    const CAP: u64 = 1_000;

    struct Fixture {
        owner: Pubkey,
        alloter: Pubkey,
        custodian: Pubkey,
        config: AllotmentConfig,
        book: AllotmentBook,
        token: MemoryToken,
    }

    impl Fixture {
        fn new() -> Self {
            let owner = Pubkey::new_unique();
            let alloter = Pubkey::new_unique();
            let custodian = Pubkey::new_unique();
            let mut config = AllotmentConfig {
                owner,
                mint: Pubkey::new_unique(),
                vault: Pubkey::new_unique(),
                supply_cap: CAP,
                alloters: Vec::new(),
                bump: 255,
            };
            config.grant_alloter(alloter).unwrap();
            let mut token = MemoryToken::new(CAP);
            token.add_minter(custodian);
            Self {
                owner,
                alloter,
                custodian,
                config,
                book: AllotmentBook::default(),
                token,
            }
        }

        fn engine(
            &mut self,
        ) -> (VestingEngine<'_, AllotmentBook, AllotmentConfig>, &mut MemoryToken) {
            (
                VestingEngine::new(&mut self.book, &self.config, self.custodian),
                &mut self.token,
            )
        }

        fn create(
            &mut self,
            caller: Pubkey,
            beneficiary: Pubkey,
            amount: u64,
            name: &str,
        ) -> Result<GrantCreated, VestingError> {
            let (mut engine, token) = self.engine();
            engine.create_grant(
                token,
                &FixedTime(CREATED),
                &caller,
                beneficiary,
                T,
                amount,
                name,
            )
        }

        fn release_at(
            &mut self,
            now: i64,
            caller: Pubkey,
            beneficiary: Pubkey,
            name: &str,
        ) -> Result<GrantReleased, VestingError> {
            let (mut engine, token) = self.engine();
            engine.release(token, &FixedTime(now), &caller, &beneficiary, name)
        }

        fn extend(
            &mut self,
            caller: Pubkey,
            beneficiary: Pubkey,
            name: &str,
            new_time: i64,
        ) -> Result<ReleaseTimeExtended, VestingError> {
            let (mut engine, _) = self.engine();
            engine.extend_release_time(&caller, &beneficiary, name, new_time)
        }

        fn grant(&self, beneficiary: Pubkey, name: &str) -> Grant {
            self.book.get(&beneficiary, name).unwrap()
        }

        fn assert_conserved(&self) {
            let locked = AllotmentQuery::new(&self.book)
                .locked_total()
                .unwrap();
            assert_eq!(self.token.balance_of(&self.custodian), locked);
        }
    }

    #[test]
    fn create_mints_into_custody() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();

        let ev = fx.create(fx.owner, b, 100, "stake").unwrap();
        assert_eq!(
            ev,
            GrantCreated {
                custodian: fx.custodian,
                beneficiary: b,
                amount: 100,
                name: "stake".to_string(),
            }
        );

        let q = AllotmentQuery::new(&fx.book);
        assert_eq!(total_balance(&fx.token, &fx.custodian), 100);
        assert_eq!(total_balance(&fx.token, &b), 0);
        assert_eq!(q.get_allotments(&b), vec![Grant::new(b, "stake", T, 100)]);
        fx.assert_conserved();
    }

    #[test]
    fn alloter_may_create_but_stranger_may_not() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();

        fx.create(fx.alloter, b, 10, "promo").unwrap();
        assert!(matches!(
            fx.create(Pubkey::new_unique(), b, 10, "team"),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            fx.create(b, b, 10, "team"),
            Err(VestingError::Unauthorized)
        ));
        assert_eq!(fx.token.supply(), 10);
        assert_eq!(fx.book.list_by_beneficiary(&b).len(), 1);
    }

    #[test]
    fn create_validates_input_before_minting() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();

        assert!(matches!(
            fx.create(fx.owner, b, 0, "stake"),
            Err(VestingError::InvalidAllocation)
        ));
        assert!(matches!(
            fx.create(fx.owner, b, 5, ""),
            Err(VestingError::InvalidName)
        ));
        let owner = fx.owner;
        let (mut engine, token) = fx.engine();
        assert!(matches!(
            engine.create_grant(token, &FixedTime(CREATED), &owner, b, 0, 5, "stake"),
            Err(VestingError::InvalidTimestamp)
        ));
        assert_eq!(fx.token.supply(), 0);
        assert!(fx.book.all_beneficiaries().is_empty());
    }

    #[test]
    fn past_release_time_mints_nothing() {
        let mut fx = Fixture::new();
        let owner = fx.owner;
        let b = Pubkey::new_unique();
        let (mut engine, token) = fx.engine();

        assert!(matches!(
            engine.create_grant(token, &FixedTime(T), &owner, b, T, 5, "stake"),
            Err(VestingError::ReleaseTimeInPast)
        ));
        assert!(matches!(
            engine.create_grant(token, &FixedTime(T + 1), &owner, b, T, 5, "stake"),
            Err(VestingError::ReleaseTimeInPast)
        ));
        engine
            .create_grant(token, &FixedTime(T - 1), &owner, b, T, 5, "stake")
            .unwrap();
        assert_eq!(fx.token.supply(), 5);
        assert_eq!(fx.book.list_by_beneficiary(&b).len(), 1);
    }

    #[test]
    fn duplicate_grant_leaves_first_untouched() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();

        fx.create(fx.owner, b, 100, "stake").unwrap();
        assert!(matches!(
            fx.create(fx.owner, b, 50, "stake"),
            Err(VestingError::DuplicateGrant)
        ));
        assert_eq!(fx.grant(b, "stake"), Grant::new(b, "stake", T, 100));
        assert_eq!(fx.token.supply(), 100);
        fx.assert_conserved();
    }

    #[test]
    fn cap_breach_inserts_nothing() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        let late = Pubkey::new_unique();

        fx.create(fx.owner, b, CAP - 1, "stake").unwrap();
        assert!(matches!(
            fx.create(fx.owner, late, 2, "excess"),
            Err(VestingError::CapExceeded)
        ));
        assert!(fx.book.get(&late, "excess").is_none());
        assert_eq!(fx.book.all_beneficiaries(), vec![b]);

        // Exactly reaching the cap is fine.
        fx.create(fx.owner, late, 1, "last").unwrap();
        assert_eq!(fx.token.supply(), CAP);
        fx.assert_conserved();
    }

    #[test]
    fn custodian_without_mint_capability_fails() {
        let mut fx = Fixture::new();
        fx.token = MemoryToken::new(CAP);
        let b = Pubkey::new_unique();

        assert!(matches!(
            fx.create(fx.owner, b, 10, "stake"),
            Err(VestingError::MintUnauthorized)
        ));
        assert!(fx.book.get(&b, "stake").is_none());
        assert!(fx.book.all_beneficiaries().is_empty());
    }

    #[test]
    fn release_before_time_is_refused() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();

        assert!(matches!(
            fx.release_at(T - 1, b, b, "stake"),
            Err(VestingError::TooEarly)
        ));
        assert_eq!(fx.token.balance_of(&b), 0);
        assert_eq!(fx.token.balance_of(&fx.custodian), 100);
        assert_eq!(fx.grant(b, "stake").token_count, 100);
    }

    #[test]
    fn release_pays_once_then_zero() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();

        let ev = fx.release_at(T, b, b, "stake").unwrap();
        assert_eq!(ev.amount, 100);
        assert_eq!(ev.beneficiary, b);
        assert_eq!(fx.token.balance_of(&b), 100);
        let g = fx.grant(b, "stake");
        assert_eq!(g.token_count, 0);
        assert!(g.released);
        fx.assert_conserved();

        let again = fx.release_at(T + 10, b, b, "stake").unwrap();
        assert_eq!(again.amount, 0);
        assert_eq!(fx.token.balance_of(&b), 100);
        fx.assert_conserved();
    }

    #[test]
    fn owner_releases_on_behalf_of_beneficiary() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();

        let ev = fx.release_at(T + 1, fx.owner, b, "stake").unwrap();
        assert_eq!(ev.amount, 100);
        assert_eq!(fx.token.balance_of(&b), 100);
        assert_eq!(fx.token.balance_of(&fx.owner), 0);
    }

    #[test]
    fn others_cannot_release() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();

        assert!(matches!(
            fx.release_at(T, fx.alloter, b, "stake"),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            fx.release_at(T, Pubkey::new_unique(), b, "stake"),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            fx.release_at(T, b, b, "team"),
            Err(VestingError::GrantNotFound)
        ));
        assert_eq!(fx.grant(b, "stake").token_count, 100);
    }

    #[test]
    fn failed_transfer_rolls_back_zeroing() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();
        fx.token.fail_transfers(true);

        assert!(matches!(
            fx.release_at(T, b, b, "stake"),
            Err(VestingError::TransferFailed)
        ));
        assert_eq!(fx.grant(b, "stake"), Grant::new(b, "stake", T, 100));
        fx.assert_conserved();

        fx.token.fail_transfers(false);
        assert_eq!(fx.release_at(T, b, b, "stake").unwrap().amount, 100);
    }

    #[test]
    fn extension_is_owner_only_and_strictly_increasing() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();

        let ev = fx.extend(fx.owner, b, "stake", T + 1000).unwrap();
        assert_eq!(ev.new_release_time, T + 1000);
        assert_eq!(fx.grant(b, "stake").release_time, T + 1000);

        assert!(matches!(
            fx.extend(fx.owner, b, "stake", T - 1),
            Err(VestingError::ReleaseTimeNotIncreasing)
        ));
        assert!(matches!(
            fx.extend(fx.owner, b, "stake", T + 1000),
            Err(VestingError::ReleaseTimeNotIncreasing)
        ));
        assert!(matches!(
            fx.extend(b, b, "stake", T + 5000),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            fx.extend(fx.alloter, b, "stake", T + 5000),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            fx.extend(fx.owner, b, "team", T + 5000),
            Err(VestingError::GrantNotFound)
        ));
        assert_eq!(fx.grant(b, "stake").release_time, T + 1000);
    }

    #[test]
    fn extended_grant_cannot_release_on_old_time() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "promo").unwrap();
        fx.extend(fx.owner, b, "promo", T + 2000).unwrap();

        assert!(matches!(
            fx.release_at(T, b, b, "promo"),
            Err(VestingError::TooEarly)
        ));
        assert_eq!(fx.release_at(T + 2000, b, b, "promo").unwrap().amount, 100);
    }

    #[test]
    fn release_time_frozen_after_release() {
        let mut fx = Fixture::new();
        let b = Pubkey::new_unique();
        fx.create(fx.owner, b, 100, "stake").unwrap();
        fx.release_at(T, b, b, "stake").unwrap();

        assert!(matches!(
            fx.extend(fx.owner, b, "stake", T + 1000),
            Err(VestingError::GrantAlreadyReleased)
        ));
        assert_eq!(fx.grant(b, "stake").release_time, T);
    }

    #[test]
    fn queries_are_stable_and_ordered() {
        let mut fx = Fixture::new();
        let staking = Pubkey::new_unique();
        let promo = Pubkey::new_unique();
        let team = Pubkey::new_unique();

        fx.create(fx.owner, staking, 300, "stake").unwrap();
        fx.create(fx.alloter, promo, 70, "promo").unwrap();
        fx.create(fx.owner, team, 70, "team").unwrap();
        fx.create(fx.owner, staking, 30, "bonus").unwrap();
        fx.release_at(T, staking, staking, "stake").unwrap();

        let q = AllotmentQuery::new(&fx.book);
        assert_eq!(q.get_all_beneficiaries(), vec![staking, promo, team]);
        let first = q.get_beneficiary_allotments(&staking);
        assert_eq!(first, q.get_beneficiary_allotments(&staking));
        assert_eq!(first, q.get_allotments(&staking));
        let names: Vec<_> = first.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["stake", "bonus"]);

        assert_eq!(total_balance(&fx.token, &fx.custodian), 170);
        assert_eq!(total_balance(&fx.token, &staking), 300);
        assert_eq!(q.locked_total().unwrap(), 170);
    }

    #[test]
    fn conservation_across_mixed_sequence() {
        let mut fx = Fixture::new();
        let people: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();

        for (i, p) in people.iter().enumerate() {
            fx.create(fx.owner, *p, 50 + i as u64, "stake").unwrap();
            fx.assert_conserved();
        }
        let _ = fx.create(fx.owner, people[0], 1, "stake");
        fx.assert_conserved();
        let _ = fx.release_at(T - 1, people[1], people[1], "stake");
        fx.assert_conserved();
        fx.release_at(T, people[2], people[2], "stake").unwrap();
        fx.assert_conserved();
        fx.extend(fx.owner, people[3], "stake", T + 9).unwrap();
        fx.release_at(T + 9, fx.owner, people[3], "stake").unwrap();
        fx.assert_conserved();

        let paid: u64 = people.iter().map(|p| fx.token.balance_of(p)).sum();
        assert_eq!(paid + fx.token.balance_of(&fx.custodian), fx.token.supply());
    }
}
