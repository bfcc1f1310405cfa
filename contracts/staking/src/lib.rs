//! # Staking Ledger
//!
//! Tracks how much of the platform utility token each principal has staked.
//! The contest engine reads [`StakingContract::get_staked`] to gate match
//! admission against its minimum-stake setting.
//!
//! Deposits are allowance based: the staker first approves this contract on
//! the token, then calls [`StakingContract::deposit`], which pulls the tokens
//! with `transfer_from`. Allowance and balance are checked up front so a
//! shortfall surfaces as [`ContractError::InsufficientAllowance`] or
//! [`ContractError::InsufficientBalance`] rather than a token trap.
//!
//! Withdrawals return staked tokens to the wallet once the configured lock
//! period has elapsed since the staker's most recent deposit.
#![no_std]

pub mod events;


use common::{access, pausable, ttl, Capability, CommonError};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env,
    Symbol,
};

// ── Storage keys ──────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const LOCK_PERIOD: Symbol = symbol_short!("LOCK");
const TOTAL_STAKED: Symbol = symbol_short!("TOTAL");
const STAKE: Symbol = symbol_short!("STAKE");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientAllowance = 5,
    InsufficientBalance = 6,
    InsufficientStake = 7,
    StakeLocked = 8,
    Paused = 9,
}

fn map_common_error(e: CommonError) -> ContractError {
    match e {
        CommonError::NotInitialized => ContractError::NotInitialized,
        CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
        CommonError::Paused => ContractError::Paused,
        CommonError::InvalidInput => ContractError::InvalidAmount,
        CommonError::AccessDenied | CommonError::RecordNotFound => ContractError::Unauthorized,
    }
}

/// One principal's position in the stake token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    pub staker: Address,
    pub token: Address,
    /// Net deposits minus withdrawals; never negative.
    pub amount: i128,
    pub last_deposit_at: u64,
    pub updated_at: u64,
}

fn stake_key(staker: &Address) -> (Symbol, Address) {
    (STAKE, staker.clone())
}

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    pub fn initialize(env: Env, admin: Address, stake_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        access::set_admin(&env, &admin);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&LOCK_PERIOD, &0u64);
        env.storage().instance().set(&TOTAL_STAKED, &0i128);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);
        Ok(())
    }

    // ── Staking ───────────────────────────────────────────────────────────────

    /// Pull `amount` stake tokens from `staker` into ledger custody.
    ///
    /// Returns the staker's new staked amount.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let stake_token = Self::get_stake_token(env.clone())?;
        let this = env.current_contract_address();
        let client = token::Client::new(&env, &stake_token);
        if client.allowance(&staker, &this) < amount {
            return Err(ContractError::InsufficientAllowance);
        }
        if client.balance(&staker) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        let now = env.ledger().timestamp();
        let mut record = Self::get_stake_record(env.clone(), staker.clone()).unwrap_or(StakeRecord {
            staker: staker.clone(),
            token: stake_token.clone(),
            amount: 0,
            last_deposit_at: now,
            updated_at: now,
        });
        record.amount = record
            .amount
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;
        record.last_deposit_at = now;
        record.updated_at = now;

        let total = Self::get_total_staked(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;

        client.transfer_from(&this, &staker, &this, &amount);

        Self::store_record(&env, &record);
        env.storage().instance().set(&TOTAL_STAKED, &total);

        events::publish_staked(&env, staker, amount, record.amount);
        Ok(record.amount)
    }

    /// Return `amount` staked tokens to the staker's wallet.
    ///
    /// Fails with `StakeLocked` until `lock_period` seconds have passed since
    /// the staker's last deposit. Returns the remaining staked amount.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut record = Self::get_stake_record(env.clone(), staker.clone())
            .ok_or(ContractError::InsufficientStake)?;
        if amount > record.amount {
            return Err(ContractError::InsufficientStake);
        }

        let now = env.ledger().timestamp();
        let unlocks_at = record
            .last_deposit_at
            .saturating_add(Self::get_lock_period(env.clone()));
        if now < unlocks_at {
            return Err(ContractError::StakeLocked);
        }

        record.amount -= amount;
        record.updated_at = now;
        let total = Self::get_total_staked(env.clone()) - amount;

        let client = token::Client::new(&env, &record.token);
        client.transfer(&env.current_contract_address(), &staker, &amount);

        Self::store_record(&env, &record);
        env.storage().instance().set(&TOTAL_STAKED, &total);

        events::publish_unstaked(&env, staker, amount, record.amount);
        Ok(record.amount)
    }

    /// Pay `amount` out of `staker`'s stake to `to`, on behalf of the staker.
    ///
    /// Only a `Collector` may call this, and the staker must authorize it.
    /// The lock period does not apply: the tokens leave to settle a platform
    /// charge rather than return to the wallet. Returns the remaining stake.
    pub fn spend_stake(
        env: Env,
        collector: Address,
        staker: Address,
        to: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        collector.require_auth();
        access::require_capability(&env, &collector, Capability::Collector)
            .map_err(map_common_error)?;
        staker.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let mut record = Self::get_stake_record(env.clone(), staker.clone())
            .ok_or(ContractError::InsufficientStake)?;
        if amount > record.amount {
            return Err(ContractError::InsufficientStake);
        }

        record.amount -= amount;
        record.updated_at = env.ledger().timestamp();
        let total = Self::get_total_staked(env.clone()) - amount;

        let client = token::Client::new(&env, &record.token);
        client.transfer(&env.current_contract_address(), &to, &amount);

        Self::store_record(&env, &record);
        env.storage().instance().set(&TOTAL_STAKED, &total);

        events::publish_stake_spent(&env, staker, collector, to, amount, record.amount);
        Ok(record.amount)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Staked amount of `staker` in `token`; zero for any token other than the
    /// configured stake token.
    pub fn total_staked(env: Env, staker: Address, token: Address) -> i128 {
        match Self::get_stake_record(env, staker) {
            Some(record) if record.token == token => record.amount,
            _ => 0,
        }
    }

    pub fn get_staked(env: Env, staker: Address) -> i128 {
        Self::get_stake_record(env, staker)
            .map(|r| r.amount)
            .unwrap_or(0)
    }

    pub fn get_stake_record(env: Env, staker: Address) -> Option<StakeRecord> {
        env.storage().persistent().get(&stake_key(&staker))
    }

    /// Sum of every staker's amount.
    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn set_lock_period(env: Env, caller: Address, lock_period: u64) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure).map_err(map_common_error)?;
        env.storage().instance().set(&LOCK_PERIOD, &lock_period);
        events::publish_lock_period_set(&env, caller, lock_period);
        Ok(())
    }

    pub fn get_lock_period(env: Env) -> u64 {
        env.storage().instance().get(&LOCK_PERIOD).unwrap_or(0)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure).map_err(map_common_error)?;
        pausable::set_paused(&env, &caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure).map_err(map_common_error)?;
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
    ) -> Result<(), ContractError> {
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
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_admin(&env, &caller).map_err(map_common_error)?;
        access::revoke(&env, &who, capability);
        Ok(())
    }

    pub fn has_capability(env: Env, who: Address, capability: Capability) -> bool {
        access::has_capability(&env, &who, capability)
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn store_record(env: &Env, record: &StakeRecord) {
        let key = stake_key(&record.staker);
        env.storage().persistent().set(&key, record);
        ttl::extend_persistent(env, &key);
    }
}
