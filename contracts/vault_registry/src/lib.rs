//! # Vault Registry
//!
//! Custody of categorized game assets in per-principal sub-vaults, and the
//! eligibility counters those holdings feed.
//!
//! A principal's [`SubVault`] is created lazily by its first successful
//! deposit and reused forever after; it is a logical namespace keyed by the
//! principal, while the assets themselves sit at this contract's address in
//! the external registries. Each asset carries a `(sport, sub_category)`
//! [`Category`](common::Category); depositing credits the owner's counter for that sport,
//! reverting or burning debits it, and [`VaultRegistryContract::check_eligible`]
//! compares the counter with the sport's `players_needed`.
//!
//! Every entry point reads ownership, approvals, balances and allowances from
//! the collaborators before its first write, so a failing call surfaces a
//! [`VaultError`] and leaves custody and counters untouched.
#![no_std]

mod commission;
pub mod eligibility;
pub mod events;
pub mod storage;


use common::{
    access, assets::NftRegistryClient, assets::SftRegistryClient, pausable, ttl, Capability,
    CommonError, CustodyUnit,
};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, Map, Symbol,
    Vec,
};

pub use eligibility::SportRequirement;
pub use storage::{HeldAsset, HeldBatch, SubVault};

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    Paused = 5,
    NotAssetOwner = 10,
    TransferNotApproved = 11,
    UnknownAsset = 20,
    VaultNotFound = 21,
    FeeNotApproved = 30,
    InsufficientBalance = 31,
    InsufficientAssetBalance = 32,
    NotCustodied = 40,
    InsufficientHeldQuantity = 41,
    LengthMismatch = 42,
    CategoryMismatch = 43,
    DuplicateAsset = 44,
}

fn map_common_error(e: CommonError) -> VaultError {
    match e {
        CommonError::NotInitialized => VaultError::NotInitialized,
        CommonError::AlreadyInitialized => VaultError::AlreadyInitialized,
        CommonError::Paused => VaultError::Paused,
        CommonError::InvalidInput => VaultError::InvalidInput,
        CommonError::AccessDenied | CommonError::RecordNotFound => VaultError::Unauthorized,
    }
}

/// Collaborator addresses and the reversal commission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub nft_registry: Address,
    pub sft_registry: Address,
    /// Token the reversal commission is paid in.
    pub fee_token: Address,
    pub treasury: Address,
    /// Charged per unit leaving a sub-vault for a wallet.
    pub revert_commission: i128,
}

#[contract]
pub struct VaultRegistryContract;

#[contractimpl]
impl VaultRegistryContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        nft_registry: Address,
        sft_registry: Address,
        fee_token: Address,
        treasury: Address,
    ) -> Result<(), VaultError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::AlreadyInitialized);
        }
        admin.require_auth();

        access::set_admin(&env, &admin);
        let config = VaultConfig {
            nft_registry,
            sft_registry,
            fee_token,
            treasury,
            revert_commission: 0,
        };
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);
        Ok(())
    }

    // ── Deposits ──────────────────────────────────────────────────────────────

    /// Move non-fungible assets from `on_behalf_of`'s wallet into their
    /// sub-vault.
    ///
    /// `caller` must be the wallet owner or approved for each asset, and
    /// this contract must be approved to move it. Either every asset moves
    /// or none does.
    pub fn deposit_nfts(
        env: Env,
        caller: Address,
        on_behalf_of: Address,
        asset_ids: Vec<u64>,
    ) -> Result<SubVault, VaultError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if asset_ids.is_empty() {
            return Err(VaultError::InvalidInput);
        }

        let config = Self::get_config(env.clone())?;
        let registry = NftRegistryClient::new(&env, &config.nft_registry);
        let this = env.current_contract_address();

        let mut seen: Map<u64, bool> = Map::new(&env);
        let mut units: Vec<CustodyUnit> = Vec::new(&env);
        for asset_id in asset_ids.iter() {
            if seen.contains_key(asset_id) {
                return Err(VaultError::DuplicateAsset);
            }
            seen.set(asset_id, true);

            let owner = registry
                .owner_of(&asset_id)
                .ok_or(VaultError::UnknownAsset)?;
            if owner != on_behalf_of {
                return Err(VaultError::NotAssetOwner);
            }
            if caller != on_behalf_of && !registry.is_approved_or_owner(&caller, &asset_id) {
                return Err(VaultError::NotAssetOwner);
            }
            if !registry.is_approved_or_owner(&this, &asset_id) {
                return Err(VaultError::TransferNotApproved);
            }
            let category = registry
                .category_of(&asset_id)
                .ok_or(VaultError::UnknownAsset)?;
            units.push_back(CustodyUnit::unique(asset_id, category));
        }

        let vault = Self::provision(&env, &on_behalf_of);
        let now = env.ledger().timestamp();
        for unit in units.iter() {
            registry.transfer_from(&this, &on_behalf_of, &this, &unit.asset_id);
            storage::store_held_asset(
                &env,
                &HeldAsset {
                    asset_id: unit.asset_id,
                    category: unit.category.clone(),
                    vault_id: vault.id,
                    deposited_at: now,
                },
            );
            eligibility::credit(&env, &on_behalf_of, &unit)?;
            events::publish_deposited(&env, on_behalf_of.clone(), vault.id, unit);
        }
        Ok(vault)
    }

    /// Move `quantity` booster units of `asset_id` into `on_behalf_of`'s
    /// sub-vault.
    ///
    /// `caller` must be the holder or one of their approved operators; this
    /// contract must be an approved operator of the holder.
    pub fn deposit_boosters(
        env: Env,
        caller: Address,
        on_behalf_of: Address,
        asset_id: u64,
        quantity: u64,
    ) -> Result<SubVault, VaultError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if quantity == 0 {
            return Err(VaultError::InvalidInput);
        }

        let config = Self::get_config(env.clone())?;
        let registry = SftRegistryClient::new(&env, &config.sft_registry);
        let this = env.current_contract_address();

        if !registry.exists(&asset_id) {
            return Err(VaultError::UnknownAsset);
        }
        if caller != on_behalf_of && !registry.is_approved_for_all(&on_behalf_of, &caller) {
            return Err(VaultError::NotAssetOwner);
        }
        if registry.balance_of(&on_behalf_of, &asset_id) < quantity {
            return Err(VaultError::InsufficientAssetBalance);
        }
        if !registry.is_approved_for_all(&on_behalf_of, &this) {
            return Err(VaultError::TransferNotApproved);
        }
        let category = registry
            .category_of(&asset_id)
            .ok_or(VaultError::UnknownAsset)?;

        let vault = Self::provision(&env, &on_behalf_of);
        let mut batch = storage::held_batch(&env, vault.id, asset_id).unwrap_or(HeldBatch {
            asset_id,
            category: category.clone(),
            vault_id: vault.id,
            quantity: 0,
        });
        batch.quantity = batch
            .quantity
            .checked_add(quantity)
            .ok_or(VaultError::InvalidInput)?;
        let unit = CustodyUnit::batch(asset_id, category, quantity);

        registry.transfer_from(&this, &on_behalf_of, &this, &asset_id, &quantity);
        storage::store_batch(&env, &batch);
        eligibility::credit(&env, &on_behalf_of, &unit)?;
        events::publish_deposited(&env, on_behalf_of, vault.id, unit);
        Ok(vault)
    }

    // ── Sub-vault operations ──────────────────────────────────────────────────

    /// Return non-fungible assets from the owner's sub-vault to their wallet.
    ///
    /// Charges `revert_commission × asset_ids.len()` to the treasury and
    /// returns the amount charged.
    pub fn revert_nfts_to_wallet(
        env: Env,
        owner: Address,
        asset_ids: Vec<u64>,
    ) -> Result<i128, VaultError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if asset_ids.is_empty() {
            return Err(VaultError::InvalidInput);
        }
        let vault = storage::vault_of(&env, &owner).ok_or(VaultError::VaultNotFound)?;
        let config = Self::get_config(env.clone())?;

        let mut seen: Map<u64, bool> = Map::new(&env);
        let mut held: Vec<HeldAsset> = Vec::new(&env);
        for asset_id in asset_ids.iter() {
            if seen.contains_key(asset_id) {
                return Err(VaultError::DuplicateAsset);
            }
            seen.set(asset_id, true);

            match storage::held_asset(&env, asset_id) {
                Some(record) if record.vault_id == vault.id => held.push_back(record),
                _ => return Err(VaultError::NotCustodied),
            }
        }

        let fee = commission::quote(&config, u64::from(held.len()))?;
        let fee_per_asset = commission::quote(&config, 1)?;
        commission::ensure_payable(&env, &config, &owner, fee)?;

        let registry = NftRegistryClient::new(&env, &config.nft_registry);
        let this = env.current_contract_address();
        commission::collect(&env, &config, &owner, fee);
        for record in held.iter() {
            registry.transfer_from(&this, &this, &owner, &record.asset_id);
            storage::remove_held_asset(&env, &record);
            let unit = CustodyUnit::unique(record.asset_id, record.category.clone());
            eligibility::debit(&env, &owner, &unit)?;
            events::publish_reverted(&env, owner.clone(), vault.id, unit, fee_per_asset);
        }
        Ok(fee)
    }

    /// Return `quantity` booster units to the owner's wallet.
    ///
    /// `sport` must match the booster's category. Charges
    /// `revert_commission × quantity` and returns the amount charged.
    pub fn revert_boosters_to_wallet(
        env: Env,
        owner: Address,
        asset_id: u64,
        sport: Symbol,
        quantity: u64,
    ) -> Result<i128, VaultError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if quantity == 0 {
            return Err(VaultError::InvalidInput);
        }
        let vault = storage::vault_of(&env, &owner).ok_or(VaultError::VaultNotFound)?;
        let mut batch =
            storage::held_batch(&env, vault.id, asset_id).ok_or(VaultError::NotCustodied)?;
        if batch.category.sport != sport {
            return Err(VaultError::CategoryMismatch);
        }
        if quantity > batch.quantity {
            return Err(VaultError::InsufficientHeldQuantity);
        }

        let config = Self::get_config(env.clone())?;
        let fee = commission::quote(&config, quantity)?;
        commission::ensure_payable(&env, &config, &owner, fee)?;

        let registry = SftRegistryClient::new(&env, &config.sft_registry);
        let this = env.current_contract_address();
        commission::collect(&env, &config, &owner, fee);
        registry.transfer_from(&this, &this, &owner, &asset_id, &quantity);

        batch.quantity -= quantity;
        storage::store_batch(&env, &batch);
        let unit = CustodyUnit::batch(asset_id, batch.category.clone(), quantity);
        eligibility::debit(&env, &owner, &unit)?;
        events::publish_reverted(&env, owner, vault.id, unit, fee);
        Ok(fee)
    }

    /// Permanently destroy held boosters; no fee, and the burned units stop
    /// counting towards eligibility.
    ///
    /// `asset_ids[i]` is burned by `quantities[i]`. An id may repeat; the
    /// repeated quantities are summed before being checked against the
    /// held amount.
    pub fn burn_boosters(
        env: Env,
        owner: Address,
        asset_ids: Vec<u64>,
        quantities: Vec<u64>,
    ) -> Result<(), VaultError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if asset_ids.len() != quantities.len() {
            return Err(VaultError::LengthMismatch);
        }
        if asset_ids.is_empty() {
            return Err(VaultError::InvalidInput);
        }
        let vault = storage::vault_of(&env, &owner).ok_or(VaultError::VaultNotFound)?;

        let mut requested: Map<u64, u64> = Map::new(&env);
        for (asset_id, quantity) in asset_ids.iter().zip(quantities.iter()) {
            if quantity == 0 {
                return Err(VaultError::InvalidInput);
            }
            let total = requested
                .get(asset_id)
                .unwrap_or(0)
                .checked_add(quantity)
                .ok_or(VaultError::InvalidInput)?;
            requested.set(asset_id, total);
        }

        let mut batches: Vec<HeldBatch> = Vec::new(&env);
        for (asset_id, quantity) in requested.iter() {
            let mut batch =
                storage::held_batch(&env, vault.id, asset_id).ok_or(VaultError::NotCustodied)?;
            if quantity > batch.quantity {
                return Err(VaultError::InsufficientHeldQuantity);
            }
            batch.quantity -= quantity;
            batches.push_back(batch);
        }

        let config = Self::get_config(env.clone())?;
        let registry = SftRegistryClient::new(&env, &config.sft_registry);
        let this = env.current_contract_address();
        for batch in batches.iter() {
            let quantity = requested.get(batch.asset_id).unwrap_or(0);
            registry.burn(&this, &this, &batch.asset_id, &quantity);
            storage::store_batch(&env, &batch);
            let unit = CustodyUnit::batch(batch.asset_id, batch.category.clone(), quantity);
            eligibility::debit(&env, &owner, &unit)?;
            events::publish_boosters_burned(&env, owner.clone(), vault.id, unit);
        }
        Ok(())
    }

    // ── Sub-vault reads ───────────────────────────────────────────────────────

    pub fn vault_of(env: Env, principal: Address) -> Option<SubVault> {
        storage::vault_of(&env, &principal)
    }

    pub fn get_vault(env: Env, vault_id: u64) -> Result<SubVault, VaultError> {
        storage::get_vault(&env, vault_id).ok_or(VaultError::VaultNotFound)
    }

    pub fn vault_count(env: Env) -> u64 {
        storage::vault_count(&env)
    }

    /// Non-fungible ids currently in `principal`'s sub-vault, in deposit order.
    pub fn held_nfts(env: Env, principal: Address) -> Vec<u64> {
        match storage::vault_of(&env, &principal) {
            Some(vault) => storage::held_list(&env, vault.id),
            None => Vec::new(&env),
        }
    }

    /// `None` while the asset sits in a wallet.
    pub fn custodian_of(env: Env, asset_id: u64) -> Option<HeldAsset> {
        storage::held_asset(&env, asset_id)
    }

    pub fn held_boosters(env: Env, principal: Address, asset_id: u64) -> u64 {
        storage::vault_of(&env, &principal)
            .and_then(|vault| storage::held_batch(&env, vault.id, asset_id))
            .map(|batch| batch.quantity)
            .unwrap_or(0)
    }

    pub fn category_count(env: Env, principal: Address, sport: Symbol) -> u64 {
        eligibility::count(&env, &principal, &sport)
    }

    // ── Sports and eligibility ────────────────────────────────────────────────

    /// Set or overwrite how many category-matching units `sport` requires.
    pub fn add_sport(
        env: Env,
        caller: Address,
        sport: Symbol,
        players_needed: u32,
    ) -> Result<SportRequirement, VaultError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        if players_needed == 0 {
            return Err(VaultError::InvalidInput);
        }
        let requirement = eligibility::set_requirement(&env, &sport, players_needed);
        events::publish_sport_added(&env, caller, sport, players_needed);
        Ok(requirement)
    }

    pub fn get_sport(env: Env, sport: Symbol) -> Option<SportRequirement> {
        eligibility::requirement(&env, &sport)
    }

    pub fn list_sports(env: Env) -> Vec<Symbol> {
        eligibility::list_sports(&env)
    }

    pub fn check_eligible(env: Env, principal: Address, sport: Symbol) -> bool {
        eligibility::is_eligible(&env, &principal, &sport)
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn set_revert_commission(
        env: Env,
        caller: Address,
        fee_per_unit: i128,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        if fee_per_unit < 0 {
            return Err(VaultError::InvalidInput);
        }
        let mut config = Self::get_config(env.clone())?;
        config.revert_commission = fee_per_unit;
        env.storage().instance().set(&CONFIG, &config);
        events::publish_commission_set(&env, caller, fee_per_unit);
        Ok(())
    }

    pub fn get_revert_commission(env: Env) -> i128 {
        Self::get_config(env)
            .map(|config| config.revert_commission)
            .unwrap_or(0)
    }

    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), VaultError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Treasury)
            .map_err(map_common_error)?;
        let mut config = Self::get_config(env.clone())?;
        config.treasury = treasury.clone();
        env.storage().instance().set(&CONFIG, &config);
        events::publish_treasury_set(&env, caller, treasury);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(VaultError::NotInitialized)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), VaultError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        pausable::set_paused(&env, &caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), VaultError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        pausable::set_paused(&env, &caller, false);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    // ── Access control ────────────────────────────────────────────────────────

    pub fn grant_capability(
        env: Env,
        caller: Address,
        who: Address,
        capability: Capability,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        access::require_admin(&env, &caller).map_err(map_common_error)?;
        access::grant(&env, &who, capability);
        Ok(())
    }

    pub fn revoke_capability(
        env: Env,
        caller: Address,
        who: Address,
        capability: Capability,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        access::require_admin(&env, &caller).map_err(map_common_error)?;
        access::revoke(&env, &who, capability);
        Ok(())
    }

    pub fn has_capability(env: Env, who: Address, capability: Capability) -> bool {
        access::has_capability(&env, &who, capability)
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VaultError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    fn provision(env: &Env, owner: &Address) -> SubVault {
        let (vault, created) = storage::provision(env, owner);
        if created {
            events::publish_vault_created(env, owner.clone(), vault.id, vault.custodian.clone());
        }
        vault
    }
}
