//! Asset categories, custody units, and the interfaces of the external asset
//! registries the vault consumes.
//!
//! Non-fungible assets ("players") and semi-fungible batches ("boosters")
//! both feed the same per-sport eligibility counter. Both are described by a
//! [`CustodyUnit`] so the counter logic never branches on the asset standard.

use soroban_sdk::{contractclient, contracttype, Address, Env, Symbol};

/// `(sport, sub-group)` tag fixed when an asset is minted, e.g.
/// `("Soccer", "Men")`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Category {
    pub sport: Symbol,
    pub sub_category: Symbol,
}

impl Category {
    pub fn new(env: &Env, sport: &str, sub_category: &str) -> Self {
        Category {
            sport: Symbol::new(env, sport),
            sub_category: Symbol::new(env, sub_category),
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssetKind {
    /// One indivisible asset from the non-fungible registry.
    Unique,
    /// A quantity of one id from the semi-fungible registry.
    Batch,
}

/// Category-tagged unit of custody moving into or out of a sub-vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustodyUnit {
    pub kind: AssetKind,
    pub asset_id: u64,
    pub category: Category,
    /// Always 1 for `Unique`.
    pub quantity: u64,
}

impl CustodyUnit {
    pub fn unique(asset_id: u64, category: Category) -> Self {
        CustodyUnit {
            kind: AssetKind::Unique,
            asset_id,
            category,
            quantity: 1,
        }
    }

    pub fn batch(asset_id: u64, category: Category, quantity: u64) -> Self {
        CustodyUnit {
            kind: AssetKind::Batch,
            asset_id,
            category,
            quantity,
        }
    }

    pub fn sport(&self) -> Symbol {
        self.category.sport.clone()
    }

    /// Weight of this unit in its sport's eligibility counter.
    pub fn eligibility_units(&self) -> u64 {
        match self.kind {
            AssetKind::Unique => 1,
            AssetKind::Batch => self.quantity,
        }
    }
}

// ── Collaborator interfaces ───────────────────────────────────────────────────

/// Non-fungible asset registry (one owner per id).
#[contractclient(name = "NftRegistryClient")]
pub trait NonFungibleRegistry {
    /// `None` when the id was never minted.
    fn owner_of(env: Env, asset_id: u64) -> Option<Address>;

    /// True when `spender` owns `asset_id` or was approved for it.
    fn is_approved_or_owner(env: Env, spender: Address, asset_id: u64) -> bool;

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, asset_id: u64);

    fn category_of(env: Env, asset_id: u64) -> Option<Category>;
}

/// Semi-fungible asset registry (balances per owner per id).
#[contractclient(name = "SftRegistryClient")]
pub trait SemiFungibleRegistry {
    /// True once the id has been created, even if its supply is now zero.
    fn exists(env: Env, asset_id: u64) -> bool;

    fn balance_of(env: Env, owner: Address, asset_id: u64) -> u64;

    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;

    fn transfer_from(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        asset_id: u64,
        amount: u64,
    );

    fn burn(env: Env, operator: Address, from: Address, asset_id: u64, amount: u64);

    fn category_of(env: Env, asset_id: u64) -> Option<Category>;
}
