//! Random operation sequences run against both the keeper and the pure model.
//!
//! After every step the program's state, projected onto the model, must equal the
//! model's state, and every model predicate and program invariant must hold.

use mm_integration_tests::*;
use mm_program::ModuleAccount;
use model_safety as model;
use proptest::prelude::*;

const USERS: u8 = 3;

#[derive(Debug, Clone)]
enum Op {
    Apply(u8, Vec<u64>),
    Include(Vec<(u8, u64)>),
    Exclude(Vec<(u8, u64)>),
    Reject(Vec<(u8, u64)>),
    Distribute(Vec<(u8, u64, u128)>),
    Claim(u8),
    SetDeposit(u128),
}

fn handle() -> impl Strategy<Value = (u8, u64)> {
    (0..USERS, 1u64..=4)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..USERS, prop::collection::vec(1u64..=4, 0..4)).prop_map(|(u, p)| Op::Apply(u, p)),
        2 => prop::collection::vec(handle(), 0..3).prop_map(Op::Include),
        1 => prop::collection::vec(handle(), 0..3).prop_map(Op::Exclude),
        1 => prop::collection::vec(handle(), 0..3).prop_map(Op::Reject),
        2 => prop::collection::vec((0..USERS, 1u64..=4, 0u128..2_000_000), 0..3).prop_map(Op::Distribute),
        1 => (0..USERS).prop_map(Op::Claim),
        1 => (0u128..3_000_000).prop_map(Op::SetDeposit),
    ]
}

fn step(chain: &mut TestChain, s: model::State, op: &Op) -> model::State {
    match op {
        Op::Apply(u, pairs) => {
            let _ = chain.apply(*u, pairs);
            model::apply(s, *u, pairs)
        }
        Op::Include(h) => {
            let _ = chain.include(h);
            model::include(s, h)
        }
        Op::Exclude(h) => {
            let _ = chain.exclude(h);
            model::exclude(s, h)
        }
        Op::Reject(h) => {
            let _ = chain.reject(h);
            model::reject(s, h)
        }
        Op::Distribute(items) => {
            let _ = chain.distribute(items);
            model::distribute(s, items)
        }
        Op::Claim(u) => {
            let _ = chain.claim(*u);
            model::claim(s, *u)
        }
        Op::SetDeposit(amount) => {
            chain.set_deposit_amount(*amount).unwrap();
            model::set_deposit_amount(s, *amount)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn keeper_matches_model(ops in prop::collection::vec(op(), 1..40)) {
        let mut chain = TestChain::new(1_000_000, &[1, 2, 3], &[5_000_000, 3_000_000, 500_000], 10_000_000).unwrap();
        let initial = chain.initial_model().unwrap();
        let mut s = initial.clone();

        for op in &ops {
            s = step(&mut chain, s, op);
            let projected = chain.to_model(&initial).unwrap();
            prop_assert_eq!(&projected, &s, "diverged after {:?}", op);
            prop_assert!(model::all_invariants_ok(&s), "model invariant broken after {:?}", op);
            chain.assert_invariants();

            let recorded = chain.deposit_total().unwrap();
            let escrowed: u128 = s.slots.iter().filter_map(|slot| slot.deposit).sum();
            prop_assert_eq!(chain.reserve(ModuleAccount::DepositReserve).unwrap(), recorded, "reserve drifted after {:?}", op);
            prop_assert_eq!(recorded, escrowed, "deposit records drifted after {:?}", op);
        }
    }

    #[test]
    fn failed_calls_leave_store_untouched(pairs in prop::collection::vec(4u64..=9, 1..4)) {
        let mut chain = TestChain::new(1_000_000, &[1, 2, 3], &[5_000_000], 0).unwrap();
        let before = chain.store.clone();
        let mut with_valid = vec![1];
        with_valid.extend(pairs);
        prop_assert!(chain.apply(0, &with_valid).is_err());
        prop_assert_eq!(&chain.store, &before);
        prop_assert!(chain.events.is_empty());
    }
}
