//! # Platform Integration Tests
//!
//! Property-based and scenario tests across the staking ledger, vault
//! registry and contest engine, driven through the shared harness:
//! - custody properties checked with `proptest`
//! - invariant and transition invariant checks
//! - state exploration against the reference model
//! - the full admission path from custody to a recorded match

extern crate std;

use contest::{ContestError, MatchOutcome};
use proptest::prelude::*;
use soroban_sdk::Address;
use vault_registry::VaultError;

use test_framework::generators::*;
use test_framework::invariants::*;
use test_framework::state_explorer::*;
use test_framework::*;

const TOURNAMENT: u64 = 1;

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// **Property**: any number of deposits leaves a principal with exactly
    /// one sub-vault, and the vault id never changes.
    #[test]
    fn prop_single_vault_per_principal(batches in prop::collection::vec(1u32..=3, 1..5)) {
        let harness = PlatformHarness::new();
        let alice = harness.principal();

        let mut first_id = None;
        for n in batches {
            let ids = harness.mint_players(&alice, n, "Soccer", "Men");
            let vault = harness.deposit_players(&alice, &ids);
            let expected = *first_id.get_or_insert(vault.id);
            prop_assert_eq!(vault.id, expected);
        }
        prop_assert_eq!(harness.vault.vault_count(), 1);
        InvariantSet::custody_defaults().assert_all(&harness.snapshot(&[alice]));
    }

    /// **Property**: the category counter equals the units deposited minus
    /// the units removed, whichever mix of players and boosters moved.
    #[test]
    fn prop_counter_conservation(
        players in 1u32..=6,
        boosters in 1u64..=8,
        reverted in 0usize..=6,
        burned in 0u64..=8,
    ) {
        let harness = PlatformHarness::new();
        let soccer = harness.sport("Soccer");
        let alice = harness.principal();

        let ids = harness.mint_players(&alice, players, "Soccer", "Men");
        let booster = harness.create_boosters(&alice, boosters, "Soccer", "Women");
        harness.deposit_players(&alice, &ids);
        harness.vault.deposit_boosters(&alice, &alice, &booster, &boosters);

        let reverted = reverted.min(ids.len());
        if reverted > 0 {
            harness.revert_players(&alice, &ids[..reverted]);
        }
        let burned = burned.min(boosters);
        if burned > 0 {
            harness
                .vault
                .burn_boosters(&alice, &harness.ids(&[booster]), &harness.ids(&[burned]));
        }

        let expected = u64::from(players) - reverted as u64 + boosters - burned;
        prop_assert_eq!(harness.vault.category_count(&alice, &soccer), expected);
        InvariantSet::custody_defaults().assert_all(&harness.snapshot(&[alice]));
    }

    /// **Property**: with the requirement fixed, eligibility flips exactly
    /// when the counter reaches `players_needed` and never flips back while
    /// units are only added.
    #[test]
    fn prop_eligibility_monotone_under_deposits(needed in players_needed_strategy()) {
        let harness = PlatformHarness::new();
        let soccer = harness.sport("Soccer");
        harness.vault.add_sport(&harness.admin, &soccer, &needed);
        let alice = harness.principal();
        let ids = harness.mint_players(&alice, needed + 1, "Soccer", "Men");

        let mut was_eligible = false;
        for (deposited, id) in ids.iter().enumerate() {
            harness.deposit_players(&alice, &[*id]);
            let eligible = harness.vault.check_eligible(&alice, &soccer);
            prop_assert_eq!(eligible, deposited as u32 + 1 >= needed);
            prop_assert!(eligible || !was_eligible, "eligibility regressed");
            was_eligible = eligible;
        }
    }

    /// **Property**: a batch containing one asset the principal does not own
    /// moves nothing and creates no vault.
    #[test]
    fn prop_failed_batch_is_atomic(good in 1u32..=4, position in 0usize..=4) {
        let harness = PlatformHarness::new();
        let soccer = harness.sport("Soccer");
        let alice = harness.principal();
        let bob = harness.principal();

        let mut ids = harness.mint_players(&alice, good, "Soccer", "Men");
        let foreign = harness.mint_players(&bob, 1, "Soccer", "Men")[0];
        ids.insert(position.min(ids.len()), foreign);

        let result = harness.vault.try_deposit_nfts(&alice, &alice, &harness.ids(&ids));
        prop_assert_eq!(result, Err(Ok(VaultError::NotAssetOwner)));
        prop_assert_eq!(harness.vault.category_count(&alice, &soccer), 0);
        prop_assert!(harness.vault.vault_of(&alice).is_none());
        for id in &ids {
            prop_assert!(harness.vault.custodian_of(id).is_none());
        }
        InvariantSet::custody_defaults().assert_all(&harness.snapshot(&[alice, bob]));
    }

    /// **Property**: reverting `n` units charges exactly `n * commission`,
    /// all of which reaches the treasury.
    #[test]
    fn prop_revert_fee_is_per_unit(commission in commission_strategy(), n in 1u32..=5) {
        let harness = PlatformHarness::new();
        harness.vault.set_revert_commission(&harness.admin, &commission);
        let alice = harness.principal();
        let ids = harness.mint_players(&alice, n, "Soccer", "Men");
        harness.deposit_players(&alice, &ids);

        let fee = commission * i128::from(n);
        if fee > 0 {
            harness.fund_commission(&alice, fee);
        }
        let charged = harness.revert_players(&alice, &ids);

        prop_assert_eq!(charged, fee);
        prop_assert_eq!(harness.treasury_balance(), fee);
        prop_assert_eq!(harness.env.balance(&harness.token, &alice), 0);
    }

    /// **Property**: the recorded outcome follows the scores, with equal
    /// scores recorded as a draw.
    #[test]
    fn prop_match_outcome_follows_scores((score_a, score_b) in score_pair_strategy()) {
        let harness = PlatformHarness::new();
        let soccer = setup_tournament(&harness, 5, 0);
        let a = admitted_player(&harness, 5);
        let b = admitted_player(&harness, 5);

        let record = harness.contest.play(
            &harness.referee, &a, &score_a, &b, &score_b, &soccer, &TOURNAMENT,
        );
        let (winner, outcome) = if score_a > score_b {
            (Some(a.clone()), MatchOutcome::PlayerAWins)
        } else if score_b > score_a {
            (Some(b.clone()), MatchOutcome::PlayerBWins)
        } else {
            (None, MatchOutcome::Draw)
        };
        prop_assert_eq!(record.winner, winner);
        prop_assert_eq!(record.outcome, outcome);
    }

    /// **Property**: random custody workloads never diverge from the model
    /// or break an invariant.
    #[test]
    fn prop_random_custody_sequences(actions in custody_action_sequence(25)) {
        let harness = PlatformHarness::new();
        let mut explorer = StateExplorer::with_defaults(&harness, 3);
        let result = explorer.explore(&actions);
        prop_assert!(result.passed(), "Violations: {:?}", result.summary.invariant_violations);
    }

    /// **Property**: historical workload patterns hold up for any pool size.
    #[test]
    fn prop_historical_patterns(
        pattern in transaction_pattern_strategy(),
        users in 1usize..=4,
    ) {
        let harness = PlatformHarness::new();
        let actions = pattern_to_actions(&pattern, users);
        let mut explorer = StateExplorer::with_defaults(&harness, users);
        let result = explorer.explore(&actions);
        prop_assert!(result.passed(), "{:?}: {:?}", pattern, result.summary.invariant_violations);
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Helpers
// ═════════════════════════════════════════════════════════════════════════════

/// Configure Soccer with `players_needed`, a fee for [`TOURNAMENT`] and a
/// minimum stake of `min_stake` whole tokens.
fn setup_tournament(harness: &PlatformHarness, players_needed: u32, min_stake: i128) -> soroban_sdk::Symbol {
    let soccer = harness.sport("Soccer");
    harness.vault.add_sport(&harness.admin, &soccer, &players_needed);
    harness
        .contest
        .set_tournament_fee(&harness.admin, &TOURNAMENT, &(5 * TOKEN));
    harness
        .contest
        .set_min_staked_play(&harness.admin, &(min_stake * TOKEN));
    soccer
}

/// A principal holding `players` Soccer players in custody, staked to the
/// configured minimum and paid up for [`TOURNAMENT`].
fn admitted_player(harness: &PlatformHarness, players: u32) -> Address {
    let who = harness.principal();
    let ids = harness.mint_players(&who, players, "Soccer", "Men");
    harness.deposit_players(&who, &ids);
    let min_stake = harness.contest.get_min_staked_play();
    if min_stake > 0 {
        harness.stake(&who, min_stake);
    }
    harness.pay_fee(&who, TOURNAMENT);
    who
}

// ═════════════════════════════════════════════════════════════════════════════
//  Invariant Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_all_invariants_hold_on_fresh_platform() {
    let harness = PlatformHarness::new();
    let principals = std::vec![harness.principal(), harness.principal()];
    InvariantSet::custody_defaults().assert_all(&harness.snapshot(&principals));
}

#[test]
fn test_invariants_through_deposit_and_revert_cycle() {
    let harness = PlatformHarness::new();
    let soccer = harness.sport("Soccer");
    harness.vault.add_sport(&harness.admin, &soccer, &5);
    harness.vault.set_revert_commission(&harness.admin, &TOKEN);

    let alice = harness.principal();
    let bob = harness.principal();
    let principals = std::vec![alice.clone(), bob.clone()];
    let invariants = InvariantSet::custody_defaults();

    let ids = harness.mint_players(&alice, 5, "Soccer", "Men");
    let booster = harness.create_boosters(&bob, 4, "Soccer", "Women");
    invariants.assert_all(&harness.snapshot(&principals));

    // Alice qualifies.
    harness.deposit_players(&alice, &ids);
    invariants.assert_all(&harness.snapshot(&principals));
    assert!(harness.vault.check_eligible(&alice, &soccer));

    // Bob deposits boosters and stakes.
    harness.vault.deposit_boosters(&bob, &bob, &booster, &4);
    harness.stake(&bob, 20 * TOKEN);
    invariants.assert_all(&harness.snapshot(&principals));

    // Alice leaves.
    harness.fund_commission(&alice, 5 * TOKEN);
    assert_eq!(harness.revert_players(&alice, &ids), 5 * TOKEN);
    invariants.assert_all(&harness.snapshot(&principals));

    let snapshot = harness.snapshot(&principals);
    let alice_state = snapshot.principal(&alice).unwrap();
    assert_eq!(alice_state.counter(&soccer), 0);
    assert!(alice_state.vault.is_some(), "sub-vault survives emptying");
    for id in &ids {
        assert_eq!(snapshot.player(*id).unwrap().registry_owner, Some(alice.clone()));
    }
    assert_eq!(harness.treasury_balance(), 5 * TOKEN);
}

#[test]
fn test_transition_counter_delta_on_deposit_and_burn() {
    let harness = PlatformHarness::new();
    let soccer = harness.sport("Soccer");
    let alice = harness.principal();
    let principals = std::vec![alice.clone()];
    let booster = harness.create_boosters(&alice, 6, "Soccer", "Women");

    let before = harness.snapshot(&principals);
    harness.vault.deposit_boosters(&alice, &alice, &booster, &6);
    let after = harness.snapshot(&principals);

    let mut transitions = TransitionInvariantSet::new();
    transitions.add(Box::new(CounterDelta {
        principal: alice.clone(),
        sport: soccer.clone(),
        delta: 6,
    }));
    transitions.add(Box::new(VaultStability));
    transitions.assert_all(&before, &after);

    harness
        .vault
        .burn_boosters(&alice, &harness.ids(&[booster, booster]), &harness.ids(&[2, 1]));
    let burned = harness.snapshot(&principals);

    let delta = CounterDelta {
        principal: alice,
        sport: soccer,
        delta: -3,
    };
    assert!(delta.check(&after, &burned).is_ok());
    assert!(VaultStability.check(&after, &burned).is_ok());
}

#[test]
fn test_transition_counter_delta_detects_wrong_amount() {
    let harness = PlatformHarness::new();
    let soccer = harness.sport("Soccer");
    let alice = harness.principal();
    let principals = std::vec![alice.clone()];
    let ids = harness.mint_players(&alice, 3, "Soccer", "Men");

    let before = harness.snapshot(&principals);
    harness.deposit_players(&alice, &ids);
    let after = harness.snapshot(&principals);

    let wrong = CounterDelta {
        principal: alice,
        sport: soccer,
        delta: 2,
    };
    assert!(wrong.check(&before, &after).is_err());
}

#[test]
fn test_stake_coverage_tracks_deposits_and_withdrawals() {
    let harness = PlatformHarness::new();
    let alice = harness.principal();
    let bob = harness.principal();
    let principals = std::vec![alice.clone(), bob.clone()];

    harness.stake(&alice, 30 * TOKEN);
    harness.stake(&bob, 70 * TOKEN);
    harness.staking.withdraw(&alice, &(10 * TOKEN));

    let snapshot = harness.snapshot(&principals);
    assert_eq!(snapshot.total_staked, 90 * TOKEN);
    assert!(StakeCoverage.check(&snapshot).is_ok());
}

// ═════════════════════════════════════════════════════════════════════════════
//  State Space Explorer Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_explorer_simple_sequence() {
    let harness = PlatformHarness::new();
    let actions = std::vec![
        CustodyAction::SetPlayersNeeded { players_needed: 3 },
        CustodyAction::DepositPlayers { user_index: 0, count: 3 },
        CustodyAction::DepositBoosters { user_index: 1, quantity: 2 },
        CustodyAction::SetCommission { whole_tokens: 2 },
        CustodyAction::RevertPlayers { user_index: 0, count: 1 },
        CustodyAction::BurnBoosters { user_index: 1, quantity: 1 },
    ];

    let mut explorer = StateExplorer::with_defaults(&harness, 2);
    let result = explorer.explore(&actions);

    assert!(result.passed(), "Violations: {:?}", result.summary.invariant_violations);
    assert_eq!(result.summary.actions_executed, 6);
    assert!(result.summary.entry_points_hit.contains("deposit_nfts"));
    assert!(result.summary.entry_points_hit.contains("revert_nfts_to_wallet"));
    assert!(result.summary.entry_points_hit.contains("burn_boosters"));
    assert_eq!(harness.treasury_balance(), 2 * TOKEN);
    assert_eq!(explorer.model().users[0].counter(), 2);
}

#[test]
fn test_explorer_predicts_rejections() {
    let harness = PlatformHarness::new();
    let actions = std::vec![
        // nothing custodied yet
        CustodyAction::RevertPlayers { user_index: 0, count: 1 },
        CustodyAction::BurnBoosters { user_index: 0, quantity: 1 },
        CustodyAction::DepositBoosters { user_index: 0, quantity: BOOSTERS_PER_USER + 1 },
        CustodyAction::DepositBoosters { user_index: 0, quantity: 2 },
        CustodyAction::RevertBoosters { user_index: 0, quantity: 3 },
        CustodyAction::Pause,
        CustodyAction::DepositPlayers { user_index: 0, count: 1 },
        CustodyAction::Unpause,
        CustodyAction::DepositPlayers { user_index: 0, count: 3 },
        CustodyAction::DepositPlayers { user_index: 0, count: 3 },
        CustodyAction::DepositPlayers { user_index: 0, count: 1 },
    ];

    let mut explorer = StateExplorer::with_defaults(&harness, 1);
    let result = explorer.explore(&actions);

    assert!(result.passed(), "Violations: {:?}", result.summary.invariant_violations);
    let rejected: std::vec::Vec<u32> = result
        .action_log
        .iter()
        .filter_map(|(_, outcome)| match outcome {
            ActionOutcome::ExpectedError(code) => Some(*code),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejected,
        std::vec![
            VaultError::VaultNotFound as u32,
            VaultError::VaultNotFound as u32,
            VaultError::InsufficientAssetBalance as u32,
            VaultError::InsufficientHeldQuantity as u32,
            VaultError::Paused as u32,
            VaultError::NotAssetOwner as u32,
        ]
    );
}

#[test]
fn test_explorer_coverage_tracking() {
    let harness = PlatformHarness::new();
    let actions = std::vec![
        CustodyAction::SetPlayersNeeded { players_needed: 2 },
        CustodyAction::SetCommission { whole_tokens: 1 },
        CustodyAction::DepositPlayers { user_index: 0, count: 2 },
        CustodyAction::DepositBoosters { user_index: 0, quantity: 4 },
        CustodyAction::AdvanceTime { delta: 3_600 },
        CustodyAction::RevertPlayers { user_index: 0, count: 2 },
        CustodyAction::RevertBoosters { user_index: 0, quantity: 1 },
        CustodyAction::BurnBoosters { user_index: 0, quantity: 3 },
        CustodyAction::Pause,
        CustodyAction::Unpause,
    ];

    let mut explorer = StateExplorer::with_defaults(&harness, 1);
    let result = explorer.explore(&actions);

    assert!(result.passed(), "Violations: {:?}", result.summary.invariant_violations);
    let coverage = result.summary.entry_point_coverage(CUSTODY_ENTRY_POINTS.len());
    assert!(
        coverage >= 0.9,
        "Expected at least 90% coverage, got {:.1}%",
        coverage * 100.0
    );
}

#[test]
fn test_explorer_with_historical_patterns() {
    let patterns = std::vec![
        TransactionPattern::QualifyAndLeave,
        TransactionPattern::InterleavedDeposits,
        TransactionPattern::BoosterBurnDown,
        TransactionPattern::ThresholdChangeUnderLoad,
        TransactionPattern::PausedWindow,
    ];

    for pattern in &patterns {
        let harness = PlatformHarness::new();
        let actions = pattern_to_actions(pattern, 3);
        let mut explorer = StateExplorer::with_defaults(&harness, 3);
        let result = explorer.explore(&actions);
        assert!(
            result.passed(),
            "Pattern {:?} failed: {:?}",
            pattern,
            result.summary.invariant_violations
        );
    }
}

#[test]
fn test_explorer_records_snapshots() {
    let harness = PlatformHarness::new();
    let config = ExplorerConfig {
        max_steps: 2,
        fail_fast: true,
        record_snapshots: true,
    };
    let mut explorer = StateExplorer::new(&harness, InvariantSet::custody_defaults(), config, 1);
    let actions = std::vec![
        CustodyAction::DepositPlayers { user_index: 0, count: 2 },
        CustodyAction::DepositPlayers { user_index: 0, count: 2 },
        CustodyAction::DepositPlayers { user_index: 0, count: 2 },
    ];
    let result = explorer.explore(&actions);

    assert!(result.passed());
    assert_eq!(result.summary.actions_executed, 2);
    // initial state plus one per executed action
    assert_eq!(result.snapshots.len(), 3);
    assert_eq!(result.snapshots[2].vault_count, 1);
}

// ═════════════════════════════════════════════════════════════════════════════
//  End-to-End Scenarios
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_admission_scenario_end_to_end() {
    let harness = PlatformHarness::new();
    let soccer = setup_tournament(&harness, 5, 100);

    let a = admitted_player(&harness, 5);
    let b = admitted_player(&harness, 5);
    let outsider = harness.principal();
    let few = harness.mint_players(&outsider, 4, "Soccer", "Men");
    harness.deposit_players(&outsider, &few);
    harness.stake(&outsider, 100 * TOKEN);
    harness.pay_fee(&outsider, TOURNAMENT);

    let record = harness
        .contest
        .play(&harness.referee, &a, &10, &b, &11, &soccer, &TOURNAMENT);
    assert_eq!(record.winner, Some(b.clone()));
    assert_eq!(record.outcome, MatchOutcome::PlayerBWins);
    assert_eq!(record.match_index, 0);
    assert_eq!(harness.contest.match_count(&soccer), 1);

    let refused = harness.contest.try_play(
        &harness.referee,
        &a,
        &1,
        &outsider,
        &0,
        &soccer,
        &TOURNAMENT,
    );
    assert_eq!(refused, Err(Ok(ContestError::NotEligible)));
    assert_eq!(harness.contest.collected_fees(), 15 * TOKEN);

    let principals = std::vec![a, b, outsider];
    InvariantSet::custody_defaults().assert_all(&harness.snapshot(&principals));
}

#[test]
fn test_leaving_custody_revokes_admission() {
    let harness = PlatformHarness::new();
    let soccer = setup_tournament(&harness, 5, 0);
    let a = admitted_player(&harness, 5);
    let b = admitted_player(&harness, 5);

    harness
        .contest
        .play(&harness.referee, &a, &2, &b, &2, &soccer, &TOURNAMENT);

    let held: std::vec::Vec<u64> = harness.vault.held_nfts(&a).iter().take(1).collect();
    harness.revert_players(&a, &held);
    assert!(!harness.vault.check_eligible(&a, &soccer));

    let result = harness
        .contest
        .try_play(&harness.referee, &a, &3, &b, &1, &soccer, &TOURNAMENT);
    assert_eq!(result, Err(Ok(ContestError::NotEligible)));
    assert_eq!(harness.contest.match_count(&soccer), 1);
}

#[test]
fn test_boosters_complete_eligibility_and_burning_removes_it() {
    let harness = PlatformHarness::new();
    let soccer = harness.sport("Soccer");
    harness.vault.add_sport(&harness.admin, &soccer, &5);
    let alice = harness.principal();

    let ids = harness.mint_players(&alice, 3, "Soccer", "Men");
    let booster = harness.create_boosters(&alice, 2, "Soccer", "Women");
    harness.deposit_players(&alice, &ids);
    assert!(!harness.vault.check_eligible(&alice, &soccer));

    harness.vault.deposit_boosters(&alice, &alice, &booster, &2);
    assert!(harness.vault.check_eligible(&alice, &soccer));

    harness
        .vault
        .burn_boosters(&alice, &harness.ids(&[booster]), &harness.ids(&[1]));
    assert!(!harness.vault.check_eligible(&alice, &soccer));
    assert_eq!(harness.sft.balance_of(&harness.vault.address, &booster), 1);
    InvariantSet::custody_defaults().assert_all(&harness.snapshot(&[alice]));
}

#[test]
fn test_round_trip_restores_wallet() {
    let harness = PlatformHarness::new();
    let soccer = harness.sport("Soccer");
    let alice = harness.principal();
    let ids = harness.mint_players(&alice, 5, "Soccer", "Men");

    harness.deposit_players(&alice, &ids);
    assert_eq!(harness.vault.category_count(&alice, &soccer), 5);
    assert_eq!(harness.revert_players(&alice, &ids), 0);

    assert_eq!(harness.vault.category_count(&alice, &soccer), 0);
    assert!(harness.vault.held_nfts(&alice).is_empty());
    for id in &ids {
        assert_eq!(harness.nft.owner_of(id), Some(alice.clone()));
    }
}
