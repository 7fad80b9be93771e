//! Scenario tests for the market-maker lifecycle
//!
//! Each test drives the keeper through the public entry points and checks balances,
//! registry contents and the invariant checker after every step.

use mm_integration_tests::*;
use mm_program::{
    all_invariants, registry, Event, IncentiveDistribution, MarketMakerError, MarketMakerHandle, MarketMakerProposal,
    ModuleAccount, ParamChange, ParameterChangeProposal, ProposalContent,
};

const DEPOSIT: u128 = 1_000_000;

fn chain() -> TestChain {
    TestChain::new(DEPOSIT, &[1, 2, 3], &[10_000_000, 10_000_000, 10_000_000], 100_000_000).unwrap()
}

fn proposal(title: &str) -> MarketMakerProposal {
    MarketMakerProposal {
        title: title.to_string(),
        description: format!("{title} description"),
        ..Default::default()
    }
}

/// Apply [1,2]; include 1; distribute 500000stake to pair 1; claim
#[test]
fn test_full_lifecycle() {
    let mut chain = chain();

    chain.apply(0, &[1, 2]).unwrap();
    assert_eq!(chain.user_balance(0).unwrap(), 8_000_000);
    assert_eq!(chain.reserve(ModuleAccount::DepositReserve).unwrap(), 2_000_000);
    chain.assert_invariants();

    chain.include(&[(0, 1)]).unwrap();
    assert_eq!(chain.user_balance(0).unwrap(), 9_000_000);
    assert_eq!(chain.reserve(ModuleAccount::DepositReserve).unwrap(), 1_000_000);
    assert!(registry::get_deposit(&chain.store, &user(0), 1).unwrap().is_none());
    assert!(registry::get_deposit(&chain.store, &user(0), 2).unwrap().is_some());
    chain.assert_invariants();

    chain.distribute(&[(0, 1, 500_000)]).unwrap();
    assert_eq!(chain.claimable(0).unwrap(), 500_000);
    assert_eq!(chain.budget_balance().unwrap(), 99_500_000);
    chain.assert_invariants();

    chain.claim(0).unwrap();
    assert_eq!(chain.user_balance(0).unwrap(), 9_500_000);
    assert_eq!(chain.claimable(0).unwrap(), 0);
    assert_eq!(chain.reserve(ModuleAccount::ClaimableIncentiveReserve).unwrap(), 0);
    chain.assert_invariants();

    let kinds: Vec<&str> = chain
        .events
        .iter()
        .map(|e| match e {
            Event::ApplyMarketMaker { .. } => "apply",
            Event::IncludeMarketMaker { .. } => "include",
            Event::ExcludeMarketMaker { .. } => "exclude",
            Event::RejectMarketMaker { .. } => "reject",
            Event::DistributeIncentive { .. } => "distribute",
            Event::ClaimIncentives { .. } => "claim",
        })
        .collect();
    assert_eq!(kinds, vec!["apply", "include", "distribute", "claim"]);
}

#[test]
fn test_apply_with_invalid_pair_changes_nothing() {
    let mut chain = chain();
    let before = chain.store.clone();

    let err = chain.apply(0, &[1, 9]).unwrap_err();
    assert_eq!(err, MarketMakerError::UnregisteredPair(9));
    assert_eq!(chain.store, before);
    assert!(chain.events.is_empty());
}

#[test]
fn test_refund_uses_recorded_deposit() {
    let mut chain = chain();
    chain.apply(0, &[1]).unwrap();
    chain.set_deposit_amount(2_500_000).unwrap();
    chain.apply(1, &[1]).unwrap();

    chain.include(&[(0, 1)]).unwrap();
    assert_eq!(chain.user_balance(0).unwrap(), 10_000_000);

    chain.reject(&[(1, 1)]).unwrap();
    assert_eq!(chain.user_balance(1).unwrap(), 10_000_000);
    assert_eq!(chain.reserve(ModuleAccount::DepositReserve).unwrap(), 0);
    chain.assert_invariants();
}

#[test]
fn test_distributions_accumulate_then_claim_zeroes() {
    let mut chain = chain();
    chain.apply(0, &[1, 2]).unwrap();
    chain.include(&[(0, 1), (0, 2)]).unwrap();

    chain.distribute(&[(0, 1, 100)]).unwrap();
    chain.distribute(&[(0, 2, 50)]).unwrap();
    assert_eq!(chain.claimable(0).unwrap(), 150);

    let before = chain.user_balance(0).unwrap();
    chain.claim(0).unwrap();
    assert_eq!(chain.user_balance(0).unwrap(), before + 150);
    assert_eq!(chain.claimable(0).unwrap(), 0);
    assert_eq!(chain.claim(0), Err(MarketMakerError::EmptyClaimable(user(0))));
}

#[test]
fn test_excluded_maker_keeps_incentive_and_can_reapply() {
    let mut chain = chain();
    chain.apply(0, &[1]).unwrap();
    chain.include(&[(0, 1)]).unwrap();
    chain.distribute(&[(0, 1, 700)]).unwrap();

    chain.exclude(&[(0, 1)]).unwrap();
    assert!(registry::get_market_maker(&chain.store, &user(0), 1).unwrap().is_none());
    assert_eq!(chain.claimable(0).unwrap(), 700);
    assert_eq!(
        chain.distribute(&[(0, 1, 1)]),
        Err(MarketMakerError::NotFound {
            address: user(0),
            pair_id: 1
        })
    );

    chain.apply(0, &[1]).unwrap();
    chain.claim(0).unwrap();
    chain.assert_invariants();
}

#[test]
fn test_proposal_includes_and_pays_atomically() {
    let mut chain = chain();
    chain.apply(0, &[1]).unwrap();
    chain.apply(1, &[2]).unwrap();

    let mut p = proposal("Epoch 1");
    p.inclusions = vec![MarketMakerHandle::new(user(0), 1)];
    p.distributions = vec![IncentiveDistribution {
        address: user(0),
        pair_id: 1,
        amount: coins(1_000),
    }];
    p.rejections = vec![MarketMakerHandle::new(user(1), 2)];
    chain.propose(&ProposalContent::MarketMaker(p)).unwrap();

    assert_eq!(chain.claimable(0).unwrap(), 1_000);
    assert_eq!(chain.user_balance(1).unwrap(), 10_000_000);
    assert_eq!(chain.reserve(ModuleAccount::DepositReserve).unwrap(), 0);
    chain.assert_invariants();
}

#[test]
fn test_failed_proposal_rolls_back_every_batch() {
    let mut chain = chain();
    chain.apply(0, &[1]).unwrap();
    let before = chain.store.clone();
    let events = chain.events.len();

    let mut p = proposal("Epoch 1");
    p.inclusions = vec![MarketMakerHandle::new(user(0), 1)];
    p.distributions = vec![IncentiveDistribution {
        address: user(0),
        pair_id: 1,
        amount: coins(200_000_000),
    }];
    let err = chain.propose(&ProposalContent::MarketMaker(p)).unwrap_err();

    assert!(matches!(err, MarketMakerError::InsufficientFunds { .. }));
    assert_eq!(chain.store, before);
    assert_eq!(chain.events.len(), events);
}

#[test]
fn test_parameter_change_whitelists_new_pair() {
    let mut chain = chain();
    assert_eq!(chain.apply(0, &[4]), Err(MarketMakerError::UnregisteredPair(4)));

    let content = ProposalContent::ParameterChange(ParameterChangeProposal {
        title: "Add pair 4".to_string(),
        description: "Whitelist pair 4".to_string(),
        changes: vec![ParamChange::IncentivePairs(
            [1, 2, 3, 4].into_iter().map(pair_config).collect(),
        )],
    });
    chain.propose(&content).unwrap();
    chain.apply(0, &[4]).unwrap();
    chain.assert_invariants();
}

#[test]
fn test_invariant_checker_is_idempotent() {
    let mut chain = chain();
    chain.apply(0, &[1, 2, 3]).unwrap();
    chain.include(&[(0, 2)]).unwrap();
    let first = all_invariants(&chain.keeper, &chain.store);
    let second = all_invariants(&chain.keeper, &chain.store);
    assert_eq!(first, second);
    assert!(!first.1);
}

#[test]
fn test_proposal_file_format() {
    let json = r#"{
        "type": "market_maker",
        "title": "Epoch 2",
        "description": "Reject pending maker",
        "rejections": [{"address": "ADDRESS", "pair_id": 1}]
    }"#
    .replace("ADDRESS", &user(0).to_string());
    let content: ProposalContent = serde_json::from_str(&json).unwrap();

    let mut chain = chain();
    chain.apply(0, &[1]).unwrap();
    chain.propose(&content).unwrap();
    assert!(registry::market_makers(&chain.store).unwrap().is_empty());
}
