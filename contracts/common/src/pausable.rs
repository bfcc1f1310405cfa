#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::CommonError;

const PAUSED: Symbol = symbol_short!("PAUSED");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub by: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Returns `true` when the contract is paused.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Guard: returns `CommonError::Paused` when the contract is paused.
///
/// Deposits, reversals, burns, stake movements, fee payments and match
/// recording call this first. Views never do.
pub fn require_not_paused(env: &Env) -> Result<(), CommonError> {
    if is_paused(env) {
        return Err(CommonError::Paused);
    }
    Ok(())
}

/// Records the new pause state and emits `("PAUSE", "Paused" | "Unpaused")`.
///
/// Callers enforce `Capability::Configure` before invoking this.
pub fn set_paused(env: &Env, by: &Address, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
    let topic = if paused { "Paused" } else { "Unpaused" };
    env.events().publish(
        (symbol_short!("PAUSE"), Symbol::new(env, topic)),
        PauseChangedEvent {
            by: by.clone(),
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}
