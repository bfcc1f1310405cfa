//! Per-(principal, sport) category counters and the sport requirement table.
//!
//! Counters move only through [`credit`] and [`debit`], which take a
//! [`CustodyUnit`] so unique assets and booster batches share one code path.

use common::{ttl, CustodyUnit};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::VaultError;

const COUNTER: Symbol = symbol_short!("CNT");
const SPORT: Symbol = symbol_short!("SPORT");
const SPORT_LIST: Symbol = symbol_short!("SPT_LST");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SportRequirement {
    pub sport: Symbol,
    /// Category-matching units a principal must hold to be eligible.
    pub players_needed: u32,
}

pub fn count(env: &Env, owner: &Address, sport: &Symbol) -> u64 {
    env.storage()
        .persistent()
        .get(&(COUNTER, owner.clone(), sport.clone()))
        .unwrap_or(0)
}

fn store_count(env: &Env, owner: &Address, sport: &Symbol, value: u64) {
    let key = (COUNTER, owner.clone(), sport.clone());
    env.storage().persistent().set(&key, &value);
    ttl::extend_persistent(env, &key);
}

/// Adds the unit's weight to the owner's counter for its sport.
pub fn credit(env: &Env, owner: &Address, unit: &CustodyUnit) -> Result<u64, VaultError> {
    let sport = unit.sport();
    let next = count(env, owner, &sport)
        .checked_add(unit.eligibility_units())
        .ok_or(VaultError::InvalidInput)?;
    store_count(env, owner, &sport, next);
    Ok(next)
}

/// Removes the unit's weight; the counter never goes below zero.
pub fn debit(env: &Env, owner: &Address, unit: &CustodyUnit) -> Result<u64, VaultError> {
    let sport = unit.sport();
    let next = count(env, owner, &sport)
        .checked_sub(unit.eligibility_units())
        .ok_or(VaultError::InsufficientHeldQuantity)?;
    store_count(env, owner, &sport, next);
    Ok(next)
}

pub fn set_requirement(env: &Env, sport: &Symbol, players_needed: u32) -> SportRequirement {
    let requirement = SportRequirement {
        sport: sport.clone(),
        players_needed,
    };
    let key = (SPORT, sport.clone());
    env.storage().persistent().set(&key, &requirement);
    ttl::extend_persistent(env, &key);

    let mut sports = list_sports(env);
    if !sports.contains(sport) {
        sports.push_back(sport.clone());
        env.storage().instance().set(&SPORT_LIST, &sports);
    }
    requirement
}

pub fn requirement(env: &Env, sport: &Symbol) -> Option<SportRequirement> {
    env.storage().persistent().get(&(SPORT, sport.clone()))
}

pub fn list_sports(env: &Env) -> Vec<Symbol> {
    env.storage()
        .instance()
        .get(&SPORT_LIST)
        .unwrap_or(Vec::new(env))
}

/// `false` for sports nobody configured.
pub fn is_eligible(env: &Env, owner: &Address, sport: &Symbol) -> bool {
    match requirement(env, sport) {
        Some(req) => count(env, owner, sport) >= u64::from(req.players_needed),
        None => false,
    }
}
