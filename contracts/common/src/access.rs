//! Capability-based authorisation shared by every contract in the suite.
//!
//! One admin principal is recorded at initialisation. The admin implicitly
//! holds every [`Capability`]; any other principal holds only what has been
//! granted to it. Privileged entry points authenticate first
//! (`caller.require_auth()`) and then call [`require_capability`].
//!
//! The module does not call `require_auth` itself so that the calling contract
//! decides where in its precondition order authentication happens.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{ttl, CommonError};

const ADMIN: Symbol = symbol_short!("ADMIN");
const CAPABILITY: Symbol = symbol_short!("CAP");

/// Privileged actions a principal may be allowed to perform.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    /// Sport thresholds, fees, commissions, lock periods, pausing.
    Configure,
    /// Recording match results.
    Referee,
    /// Moving collected fees out of contract custody.
    Treasury,
    /// Spending a principal's stake on that principal's behalf.
    Collector,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapabilityChangedEvent {
    pub principal: Address,
    pub capability: Capability,
    pub granted: bool,
    pub timestamp: u64,
}

fn capability_key(who: &Address, capability: Capability) -> (Symbol, Address, Capability) {
    (CAPABILITY, who.clone(), capability)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
    ttl::extend_instance(env);
}

pub fn admin(env: &Env) -> Result<Address, CommonError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(CommonError::NotInitialized)
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), CommonError> {
    if *caller != admin(env)? {
        return Err(CommonError::AccessDenied);
    }
    Ok(())
}

/// Grants `capability` to `who`. Idempotent.
pub fn grant(env: &Env, who: &Address, capability: Capability) {
    let key = capability_key(who, capability);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    publish_change(env, who, capability, true);
}

/// Revokes `capability` from `who`. Has no effect on the admin.
pub fn revoke(env: &Env, who: &Address, capability: Capability) {
    env.storage()
        .persistent()
        .remove(&capability_key(who, capability));
    publish_change(env, who, capability, false);
}

pub fn has_capability(env: &Env, who: &Address, capability: Capability) -> bool {
    if let Ok(admin) = admin(env) {
        if admin == *who {
            return true;
        }
    }
    env.storage()
        .persistent()
        .get(&capability_key(who, capability))
        .unwrap_or(false)
}

/// Guard: `NotInitialized` before an admin exists, `AccessDenied` when
/// `caller` holds neither the capability nor the admin role.
pub fn require_capability(
    env: &Env,
    caller: &Address,
    capability: Capability,
) -> Result<(), CommonError> {
    admin(env)?;
    if !has_capability(env, caller, capability) {
        return Err(CommonError::AccessDenied);
    }
    Ok(())
}

fn publish_change(env: &Env, who: &Address, capability: Capability, granted: bool) {
    let topic = if granted { "CapGranted" } else { "CapRevoked" };
    env.events().publish(
        (symbol_short!("ACCESS"), Symbol::new(env, topic)),
        CapabilityChangedEvent {
            principal: who.clone(),
            capability,
            granted,
            timestamp: env.ledger().timestamp(),
        },
    );
}
