//! Events emitted by the contest engine.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::MatchOutcome;

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("CONTEST"), Symbol::new(env, topic)), data);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TournamentFeeSetEvent {
    pub by: Address,
    pub tournament_id: u64,
    pub fee: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeePaidEvent {
    pub player: Address,
    pub tournament_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinStakeSetEvent {
    pub by: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchPlayedEvent {
    pub sport: Symbol,
    pub match_index: u32,
    pub tournament_id: u64,
    pub winner: Option<Address>,
    pub outcome: MatchOutcome,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesWithdrawnEvent {
    pub by: Address,
    pub to: Address,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

pub fn publish_tournament_fee_set(env: &Env, by: Address, tournament_id: u64, fee: i128) {
    emit(
        env,
        "TournamentFeeSet",
        TournamentFeeSetEvent {
            by,
            tournament_id,
            fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_paid(env: &Env, player: Address, tournament_id: u64, amount: i128) {
    emit(
        env,
        "FeePaid",
        FeePaidEvent {
            player,
            tournament_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_min_stake_set(env: &Env, by: Address, amount: i128) {
    emit(
        env,
        "MinStakeSet",
        MinStakeSetEvent {
            by,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_match_played(
    env: &Env,
    sport: Symbol,
    match_index: u32,
    tournament_id: u64,
    winner: Option<Address>,
    outcome: MatchOutcome,
) {
    emit(
        env,
        "MatchPlayed",
        MatchPlayedEvent {
            sport,
            match_index,
            tournament_id,
            winner,
            outcome,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fees_withdrawn(env: &Env, by: Address, to: Address, amount: i128, remaining: i128) {
    emit(
        env,
        "FeesWithdrawn",
        FeesWithdrawnEvent {
            by,
            to,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}
