//! In-memory asset registries implementing [`NonFungibleRegistry`] and
//! [`SemiFungibleRegistry`] for tests.
//!
//! They carry the registry-side rules the vault relies on but does not
//! enforce itself: category capacity on mint, owner/operator approvals on
//! transfer, and balance checks on transfer and burn.
//!
//! [`NonFungibleRegistry`]: crate::assets::NonFungibleRegistry
//! [`SemiFungibleRegistry`]: crate::assets::SemiFungibleRegistry

extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short,
    testutils::Events as _,
    xdr::{ContractEventBody, ScVal},
    Address, Env, Symbol, TryFromVal,
};

use crate::assets::Category;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    UnknownAsset = 200,
    NotOwner = 201,
    NotApproved = 202,
    InsufficientBalance = 203,
    /// Minting would exceed the category's configured maximum.
    CategoryCapacityExceeded = 204,
    ZeroAmount = 205,
}

// ── Non-fungible ─────────────────────────────────────────────────────────────

const NFT_NEXT: Symbol = symbol_short!("NFT_NEXT");
const NFT_OWNER: Symbol = symbol_short!("NFT_OWN");
const NFT_APPROVED: Symbol = symbol_short!("NFT_APR");
const NFT_OPERATOR: Symbol = symbol_short!("NFT_OPR");
const NFT_CATEGORY: Symbol = symbol_short!("NFT_CAT");
const NFT_CAPACITY: Symbol = symbol_short!("NFT_CAP");
const NFT_MINTED: Symbol = symbol_short!("NFT_CNT");

#[contract]
pub struct MockNftRegistry;

#[contractimpl]
impl MockNftRegistry {
    pub fn set_category_amount(env: Env, sport: Symbol, sub_category: Symbol, max: u32) {
        env.storage()
            .persistent()
            .set(&(NFT_CAPACITY, sport, sub_category), &max);
    }

    pub fn category_amount(env: Env, sport: Symbol, sub_category: Symbol) -> u32 {
        env.storage()
            .persistent()
            .get(&(NFT_CAPACITY, sport, sub_category))
            .unwrap_or(0)
    }

    pub fn category_count(env: Env, sport: Symbol, sub_category: Symbol) -> u32 {
        env.storage()
            .persistent()
            .get(&(NFT_MINTED, sport, sub_category))
            .unwrap_or(0)
    }

    /// Mints the next id (starting at 1) to `to`.
    pub fn mint(
        env: Env,
        to: Address,
        sport: Symbol,
        sub_category: Symbol,
    ) -> Result<u64, RegistryError> {
        let max = Self::category_amount(env.clone(), sport.clone(), sub_category.clone());
        let minted = Self::category_count(env.clone(), sport.clone(), sub_category.clone());
        if minted >= max {
            return Err(RegistryError::CategoryCapacityExceeded);
        }

        let id: u64 = env.storage().instance().get(&NFT_NEXT).unwrap_or(1);
        env.storage().instance().set(&NFT_NEXT, &(id + 1));
        env.storage().persistent().set(&(NFT_OWNER, id), &to);
        env.storage().persistent().set(
            &(NFT_CATEGORY, id),
            &Category {
                sport: sport.clone(),
                sub_category: sub_category.clone(),
            },
        );
        env.storage()
            .persistent()
            .set(&(NFT_MINTED, sport, sub_category), &(minted + 1));
        Ok(id)
    }

    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        asset_id: u64,
    ) -> Result<(), RegistryError> {
        owner.require_auth();
        let current = Self::owner_of(env.clone(), asset_id).ok_or(RegistryError::UnknownAsset)?;
        if current != owner {
            return Err(RegistryError::NotOwner);
        }
        env.storage()
            .persistent()
            .set(&(NFT_APPROVED, asset_id), &spender);
        Ok(())
    }

    pub fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();
        env.storage()
            .persistent()
            .set(&(NFT_OPERATOR, owner, operator), &approved);
    }

    pub fn owner_of(env: Env, asset_id: u64) -> Option<Address> {
        env.storage().persistent().get(&(NFT_OWNER, asset_id))
    }

    pub fn is_approved_or_owner(env: Env, spender: Address, asset_id: u64) -> bool {
        let owner = match Self::owner_of(env.clone(), asset_id) {
            Some(owner) => owner,
            None => return false,
        };
        if owner == spender {
            return true;
        }
        let approved: Option<Address> = env.storage().persistent().get(&(NFT_APPROVED, asset_id));
        if approved == Some(spender.clone()) {
            return true;
        }
        env.storage()
            .persistent()
            .get(&(NFT_OPERATOR, owner, spender))
            .unwrap_or(false)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        asset_id: u64,
    ) -> Result<(), RegistryError> {
        spender.require_auth();
        let owner = Self::owner_of(env.clone(), asset_id).ok_or(RegistryError::UnknownAsset)?;
        if owner != from {
            return Err(RegistryError::NotOwner);
        }
        if !Self::is_approved_or_owner(env.clone(), spender, asset_id) {
            return Err(RegistryError::NotApproved);
        }
        env.storage().persistent().set(&(NFT_OWNER, asset_id), &to);
        env.storage().persistent().remove(&(NFT_APPROVED, asset_id));
        Ok(())
    }

    pub fn category_of(env: Env, asset_id: u64) -> Option<Category> {
        env.storage().persistent().get(&(NFT_CATEGORY, asset_id))
    }
}

// ── Semi-fungible ────────────────────────────────────────────────────────────

const SFT_NEXT: Symbol = symbol_short!("SFT_NEXT");
const SFT_BALANCE: Symbol = symbol_short!("SFT_BAL");
const SFT_SUPPLY: Symbol = symbol_short!("SFT_SUP");
const SFT_OPERATOR: Symbol = symbol_short!("SFT_OPR");
const SFT_CATEGORY: Symbol = symbol_short!("SFT_CAT");
const SFT_CAPACITY: Symbol = symbol_short!("SFT_CAP");
const SFT_MINTED: Symbol = symbol_short!("SFT_CNT");

#[contract]
pub struct MockSftRegistry;

#[contractimpl]
impl MockSftRegistry {
    /// Caps the total units that may ever be created in a category.
    pub fn set_category_amount(env: Env, sport: Symbol, sub_category: Symbol, max: u64) {
        env.storage()
            .persistent()
            .set(&(SFT_CAPACITY, sport, sub_category), &max);
    }

    pub fn category_count(env: Env, sport: Symbol, sub_category: Symbol) -> u64 {
        env.storage()
            .persistent()
            .get(&(SFT_MINTED, sport, sub_category))
            .unwrap_or(0)
    }

    /// Creates a new id (starting at 1) and mints `amount` units to `to`.
    pub fn create(
        env: Env,
        to: Address,
        sport: Symbol,
        sub_category: Symbol,
        amount: u64,
    ) -> Result<u64, RegistryError> {
        if amount == 0 {
            return Err(RegistryError::ZeroAmount);
        }
        let max: u64 = env
            .storage()
            .persistent()
            .get(&(SFT_CAPACITY, sport.clone(), sub_category.clone()))
            .unwrap_or(0);
        let minted = Self::category_count(env.clone(), sport.clone(), sub_category.clone());
        if minted.saturating_add(amount) > max {
            return Err(RegistryError::CategoryCapacityExceeded);
        }

        let id: u64 = env.storage().instance().get(&SFT_NEXT).unwrap_or(1);
        env.storage().instance().set(&SFT_NEXT, &(id + 1));
        env.storage().persistent().set(&(SFT_BALANCE, to, id), &amount);
        env.storage().persistent().set(&(SFT_SUPPLY, id), &amount);
        env.storage().persistent().set(
            &(SFT_CATEGORY, id),
            &Category {
                sport: sport.clone(),
                sub_category: sub_category.clone(),
            },
        );
        env.storage()
            .persistent()
            .set(&(SFT_MINTED, sport, sub_category), &(minted + amount));
        Ok(id)
    }

    pub fn exists(env: Env, asset_id: u64) -> bool {
        env.storage().persistent().has(&(SFT_CATEGORY, asset_id))
    }

    pub fn total_supply(env: Env, asset_id: u64) -> u64 {
        env.storage()
            .persistent()
            .get(&(SFT_SUPPLY, asset_id))
            .unwrap_or(0)
    }

    pub fn balance_of(env: Env, owner: Address, asset_id: u64) -> u64 {
        env.storage()
            .persistent()
            .get(&(SFT_BALANCE, owner, asset_id))
            .unwrap_or(0)
    }

    pub fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();
        env.storage()
            .persistent()
            .set(&(SFT_OPERATOR, owner, operator), &approved);
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(SFT_OPERATOR, owner, operator))
            .unwrap_or(false)
    }

    pub fn transfer_from(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        asset_id: u64,
        amount: u64,
    ) -> Result<(), RegistryError> {
        operator.require_auth();
        Self::debit(&env, &operator, &from, asset_id, amount)?;
        let to_balance = Self::balance_of(env.clone(), to.clone(), asset_id);
        env.storage()
            .persistent()
            .set(&(SFT_BALANCE, to, asset_id), &(to_balance + amount));
        Ok(())
    }

    pub fn burn(
        env: Env,
        operator: Address,
        from: Address,
        asset_id: u64,
        amount: u64,
    ) -> Result<(), RegistryError> {
        operator.require_auth();
        Self::debit(&env, &operator, &from, asset_id, amount)?;
        let supply = Self::total_supply(env.clone(), asset_id);
        env.storage()
            .persistent()
            .set(&(SFT_SUPPLY, asset_id), &supply.saturating_sub(amount));
        Ok(())
    }

    pub fn category_of(env: Env, asset_id: u64) -> Option<Category> {
        env.storage().persistent().get(&(SFT_CATEGORY, asset_id))
    }

    fn debit(
        env: &Env,
        operator: &Address,
        from: &Address,
        asset_id: u64,
        amount: u64,
    ) -> Result<(), RegistryError> {
        if !Self::exists(env.clone(), asset_id) {
            return Err(RegistryError::UnknownAsset);
        }
        if operator != from && !Self::is_approved_for_all(env.clone(), from.clone(), operator.clone()) {
            return Err(RegistryError::NotApproved);
        }
        let balance = Self::balance_of(env.clone(), from.clone(), asset_id);
        if balance < amount {
            return Err(RegistryError::InsufficientBalance);
        }
        env.storage()
            .persistent()
            .set(&(SFT_BALANCE, from.clone(), asset_id), &(balance - amount));
        Ok(())
    }
}

// ── Event inspection ─────────────────────────────────────────────────────────

/// Payloads of the `(_, name)` events `contract` published during the last
/// top-level invocation, decoded as `T`, in emission order.
pub fn published<T>(env: &Env, contract: &Address, name: &str) -> std::vec::Vec<T>
where
    T: TryFromVal<Env, ScVal>,
{
    let wanted = Symbol::new(env, name);
    env.events()
        .all()
        .filter_by_contract(contract)
        .events()
        .iter()
        .filter_map(|event| {
            let ContractEventBody::V0(body) = &event.body;
            let topic = Symbol::try_from_val(env, body.topics.get(1)?).ok()?;
            if topic != wanted {
                return None;
            }
            T::try_from_val(env, &body.data).ok()
        })
        .collect()
}
