//! Events emitted by the vault registry.

use common::CustodyUnit;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("VAULT"), Symbol::new(env, topic)), data);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultCreatedEvent {
    pub owner: Address,
    pub vault_id: u64,
    pub custodian: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub owner: Address,
    pub vault_id: u64,
    pub unit: CustodyUnit,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevertedEvent {
    pub owner: Address,
    pub vault_id: u64,
    pub unit: CustodyUnit,
    pub fee_charged: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostersBurnedEvent {
    pub owner: Address,
    pub vault_id: u64,
    pub unit: CustodyUnit,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SportAddedEvent {
    pub by: Address,
    pub sport: Symbol,
    pub players_needed: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionSetEvent {
    pub by: Address,
    pub fee_per_unit: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasurySetEvent {
    pub by: Address,
    pub treasury: Address,
    pub timestamp: u64,
}

pub fn publish_vault_created(env: &Env, owner: Address, vault_id: u64, custodian: Address) {
    emit(
        env,
        "VaultCreated",
        VaultCreatedEvent {
            owner,
            vault_id,
            custodian,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, owner: Address, vault_id: u64, unit: CustodyUnit) {
    emit(
        env,
        "Deposited",
        DepositedEvent {
            owner,
            vault_id,
            unit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reverted(
    env: &Env,
    owner: Address,
    vault_id: u64,
    unit: CustodyUnit,
    fee_charged: i128,
) {
    emit(
        env,
        "Reverted",
        RevertedEvent {
            owner,
            vault_id,
            unit,
            fee_charged,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_boosters_burned(env: &Env, owner: Address, vault_id: u64, unit: CustodyUnit) {
    emit(
        env,
        "BoostersBurned",
        BoostersBurnedEvent {
            owner,
            vault_id,
            unit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_sport_added(env: &Env, by: Address, sport: Symbol, players_needed: u32) {
    emit(
        env,
        "SportAdded",
        SportAddedEvent {
            by,
            sport,
            players_needed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_commission_set(env: &Env, by: Address, fee_per_unit: i128) {
    emit(
        env,
        "CommissionSet",
        CommissionSetEvent {
            by,
            fee_per_unit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_treasury_set(env: &Env, by: Address, treasury: Address) {
    emit(
        env,
        "TreasurySet",
        TreasurySetEvent {
            by,
            treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}
