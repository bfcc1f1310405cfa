//! Sub-vault arena and custody records.
//!
//! ## Storage Keys
//!
//! - `"VLT_SEQ"` → u64 (instance; last issued vault id)
//! - `("VAULT", vault_id)` → SubVault
//! - `("VLT_OF", owner)` → u64 vault id
//! - `("HELD", asset_id)` → HeldAsset (non-fungible, at most one vault per id)
//! - `("HELD_LST", vault_id)` → Vec<u64> of non-fungible ids in that vault
//! - `("BATCH", vault_id, asset_id)` → HeldBatch (semi-fungible quantity)

use common::{ttl, Category};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const VAULT_SEQ: Symbol = symbol_short!("VLT_SEQ");
const VAULT: Symbol = symbol_short!("VAULT");
const VAULT_OF: Symbol = symbol_short!("VLT_OF");
const HELD: Symbol = symbol_short!("HELD");
const HELD_LIST: Symbol = symbol_short!("HELD_LST");
const BATCH: Symbol = symbol_short!("BATCH");

/// Isolated custody namespace of one principal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubVault {
    /// Stable arena index, starting at 1.
    pub id: u64,
    pub owner: Address,
    /// Address that holds the assets at the registry level.
    pub custodian: Address,
    pub created_at: u64,
}

/// A non-fungible asset currently in a sub-vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeldAsset {
    pub asset_id: u64,
    pub category: Category,
    pub vault_id: u64,
    pub deposited_at: u64,
}

/// Semi-fungible units of one id currently in a sub-vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeldBatch {
    pub asset_id: u64,
    pub category: Category,
    pub vault_id: u64,
    pub quantity: u64,
}

// ── Sub-vault arena ───────────────────────────────────────────────────────────

pub fn vault_count(env: &Env) -> u64 {
    env.storage().instance().get(&VAULT_SEQ).unwrap_or(0)
}

pub fn get_vault(env: &Env, vault_id: u64) -> Option<SubVault> {
    env.storage().persistent().get(&(VAULT, vault_id))
}

pub fn vault_of(env: &Env, owner: &Address) -> Option<SubVault> {
    let vault_id: u64 = env.storage().persistent().get(&(VAULT_OF, owner.clone()))?;
    get_vault(env, vault_id)
}

/// Returns the owner's sub-vault, creating it on first use.
///
/// The boolean is `true` only for the call that created it.
pub fn provision(env: &Env, owner: &Address) -> (SubVault, bool) {
    if let Some(vault) = vault_of(env, owner) {
        return (vault, false);
    }

    let vault_id = vault_count(env) + 1;
    let vault = SubVault {
        id: vault_id,
        owner: owner.clone(),
        custodian: env.current_contract_address(),
        created_at: env.ledger().timestamp(),
    };

    let vault_key = (VAULT, vault_id);
    env.storage().persistent().set(&vault_key, &vault);
    ttl::extend_persistent(env, &vault_key);

    let owner_key = (VAULT_OF, owner.clone());
    env.storage().persistent().set(&owner_key, &vault_id);
    ttl::extend_persistent(env, &owner_key);

    env.storage().instance().set(&VAULT_SEQ, &vault_id);
    (vault, true)
}

// ── Non-fungible custody ──────────────────────────────────────────────────────

pub fn held_asset(env: &Env, asset_id: u64) -> Option<HeldAsset> {
    env.storage().persistent().get(&(HELD, asset_id))
}

pub fn held_list(env: &Env, vault_id: u64) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&(HELD_LIST, vault_id))
        .unwrap_or(Vec::new(env))
}

pub fn store_held_asset(env: &Env, held: &HeldAsset) {
    let key = (HELD, held.asset_id);
    env.storage().persistent().set(&key, held);
    ttl::extend_persistent(env, &key);

    let mut list = held_list(env, held.vault_id);
    list.push_back(held.asset_id);
    let list_key = (HELD_LIST, held.vault_id);
    env.storage().persistent().set(&list_key, &list);
    ttl::extend_persistent(env, &list_key);
}

pub fn remove_held_asset(env: &Env, held: &HeldAsset) {
    env.storage().persistent().remove(&(HELD, held.asset_id));

    let mut list = held_list(env, held.vault_id);
    if let Some(index) = list.first_index_of(held.asset_id) {
        list.remove(index);
    }
    let list_key = (HELD_LIST, held.vault_id);
    env.storage().persistent().set(&list_key, &list);
    ttl::extend_persistent(env, &list_key);
}

// ── Semi-fungible custody ─────────────────────────────────────────────────────

pub fn held_batch(env: &Env, vault_id: u64, asset_id: u64) -> Option<HeldBatch> {
    env.storage().persistent().get(&(BATCH, vault_id, asset_id))
}

/// Writes the batch, dropping the entry once its quantity reaches zero.
pub fn store_batch(env: &Env, batch: &HeldBatch) {
    let key = (BATCH, batch.vault_id, batch.asset_id);
    if batch.quantity == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, batch);
    ttl::extend_persistent(env, &key);
}
