//! Events emitted by the staking ledger.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("STAKE"), soroban_sdk::Symbol::new(env, topic)), data);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeSpentEvent {
    pub staker: Address,
    pub collector: Address,
    pub to: Address,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockPeriodSetEvent {
    pub by: Address,
    pub lock_period: u64,
    pub timestamp: u64,
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total: i128) {
    emit(
        env,
        "Staked",
        StakedEvent {
            staker,
            amount,
            new_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, remaining: i128) {
    emit(
        env,
        "Unstaked",
        UnstakedEvent {
            staker,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_spent(
    env: &Env,
    staker: Address,
    collector: Address,
    to: Address,
    amount: i128,
    remaining: i128,
) {
    emit(
        env,
        "StakeSpent",
        StakeSpentEvent {
            staker,
            collector,
            to,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_lock_period_set(env: &Env, by: Address, lock_period: u64) {
    emit(
        env,
        "LockSet",
        LockPeriodSetEvent {
            by,
            lock_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}
