//! # Contest Engine
//!
//! Charges per-tournament entry fees and records head-to-head matches between
//! two admitted players.
//!
//! ## Admission
//! A match is recorded only when both players
//! 1. are eligible for the sport according to the vault registry,
//! 2. have at least `min_staked_play` staked in the staking ledger, and
//! 3. have paid the tournament's entry fee.
//!
//! The checks run in that order, player A before player B, and the first
//! failure rejects the whole call with `NotEligible`, `InsufficientStake` or
//! `FeeNotPaid`.
//!
//! ## Results
//! The higher score wins; equal scores are recorded as a draw with no winner.
//! Matches are append-only per sport and indexed from 0.
//!
//! Entry fees are paid from the player's wallet or, through the staking
//! ledger's `Collector` capability, from the player's stake.
//! Entry fees stay in engine custody until a `Treasury` principal withdraws
//! them.
#![no_std]
#![allow(clippy::too_many_arguments)]

pub mod events;
pub mod oracles;


use common::{access, pausable, ttl, Capability, CommonError};
use oracles::{EligibilityOracleClient, StakeOracleClient};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage keys ──────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const COLLECTED: Symbol = symbol_short!("COLLECTD");
const FEE: Symbol = symbol_short!("FEE");
const PAID: Symbol = symbol_short!("PAID");
const MATCH: Symbol = symbol_short!("MATCH");
const MATCH_COUNT: Symbol = symbol_short!("MATCH_CT");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContestError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    Paused = 5,
    TournamentNotFound = 20,
    MatchNotFound = 21,
    InsufficientAllowance = 30,
    InsufficientBalance = 31,
    InsufficientCollectedFees = 32,
    AlreadyPaid = 40,
    SamePlayer = 41,
    NotEligible = 50,
    InsufficientStake = 51,
    FeeNotPaid = 52,
}

fn map_common_error(e: CommonError) -> ContestError {
    match e {
        CommonError::NotInitialized => ContestError::NotInitialized,
        CommonError::AlreadyInitialized => ContestError::AlreadyInitialized,
        CommonError::Paused => ContestError::Paused,
        CommonError::InvalidInput => ContestError::InvalidInput,
        CommonError::AccessDenied | CommonError::RecordNotFound => ContestError::Unauthorized,
    }
}

// ── Types ─────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContestConfig {
    pub staking: Address,
    pub vault_registry: Address,
    pub fee_token: Address,
    /// Stake each player must hold to be admitted to a match.
    pub min_staked_play: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeePayment {
    pub tournament_id: u64,
    pub player: Address,
    pub amount: i128,
    pub paid_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchOutcome {
    PlayerAWins,
    PlayerBWins,
    Draw,
}

impl MatchOutcome {
    pub fn from_scores(score_a: u32, score_b: u32) -> Self {
        match score_a.cmp(&score_b) {
            core::cmp::Ordering::Greater => MatchOutcome::PlayerAWins,
            core::cmp::Ordering::Less => MatchOutcome::PlayerBWins,
            core::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// Immutable result of one match.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchRecord {
    pub sport: Symbol,
    pub match_index: u32,
    pub tournament_id: u64,
    pub player_a: Address,
    pub score_a: u32,
    pub player_b: Address,
    pub score_b: u32,
    /// `None` for a draw.
    pub winner: Option<Address>,
    pub outcome: MatchOutcome,
    pub played_at: u64,
}

#[contract]
pub struct ContestContract;

#[contractimpl]
impl ContestContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        staking: Address,
        vault_registry: Address,
        fee_token: Address,
    ) -> Result<(), ContestError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContestError::AlreadyInitialized);
        }
        admin.require_auth();

        access::set_admin(&env, &admin);
        let config = ContestConfig {
            staking,
            vault_registry,
            fee_token,
            min_staked_play: 0,
        };
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&COLLECTED, &0i128);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);
        Ok(())
    }

    // ── Tournament fees ───────────────────────────────────────────────────────

    /// Create or update a tournament's entry fee.
    ///
    /// Players who already paid keep their payment; the new fee applies to
    /// later payers only.
    pub fn set_tournament_fee(
        env: Env,
        caller: Address,
        tournament_id: u64,
        fee: i128,
    ) -> Result<(), ContestError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        if fee < 0 {
            return Err(ContestError::InvalidInput);
        }
        let key = (FEE, tournament_id);
        env.storage().persistent().set(&key, &fee);
        ttl::extend_persistent(&env, &key);
        events::publish_tournament_fee_set(&env, caller, tournament_id, fee);
        Ok(())
    }

    pub fn get_tournament_fee(env: Env, tournament_id: u64) -> Result<i128, ContestError> {
        env.storage()
            .persistent()
            .get(&(FEE, tournament_id))
            .ok_or(ContestError::TournamentNotFound)
    }

    /// Pay the entry fee for `tournament_id` from the player's wallet.
    ///
    /// The player must have approved this contract for the fee. A second
    /// payment for the same tournament is rejected. Returns the amount paid.
    pub fn pay_tournament_fee(
        env: Env,
        player: Address,
        tournament_id: u64,
    ) -> Result<i128, ContestError> {
        Self::require_initialized(&env)?;
        player.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        let fee = Self::get_tournament_fee(env.clone(), tournament_id)?;
        if Self::has_paid(env.clone(), tournament_id, player.clone()) {
            return Err(ContestError::AlreadyPaid);
        }

        let collected = Self::collected_fees(env.clone())
            .checked_add(fee)
            .ok_or(ContestError::InvalidInput)?;

        if fee > 0 {
            let config = Self::get_config(env.clone())?;
            let this = env.current_contract_address();
            let client = token::Client::new(&env, &config.fee_token);
            if client.allowance(&player, &this) < fee {
                return Err(ContestError::InsufficientAllowance);
            }
            if client.balance(&player) < fee {
                return Err(ContestError::InsufficientBalance);
            }
            client.transfer_from(&this, &player, &this, &fee);
        }

        Self::record_fee_payment(&env, player, tournament_id, fee, collected);
        Ok(fee)
    }

    /// Pay the entry fee for `tournament_id` out of the player's stake.
    ///
    /// The staking ledger must hold this engine as a `Collector` and stake in
    /// the fee token. The stake moves straight into engine custody, so the
    /// player's admission stake drops by the fee. Returns the amount paid.
    pub fn pay_tournament_fee_from_stake(
        env: Env,
        player: Address,
        tournament_id: u64,
    ) -> Result<i128, ContestError> {
        Self::require_initialized(&env)?;
        player.require_auth();
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        let fee = Self::get_tournament_fee(env.clone(), tournament_id)?;
        if Self::has_paid(env.clone(), tournament_id, player.clone()) {
            return Err(ContestError::AlreadyPaid);
        }

        let collected = Self::collected_fees(env.clone())
            .checked_add(fee)
            .ok_or(ContestError::InvalidInput)?;

        if fee > 0 {
            let config = Self::get_config(env.clone())?;
            let stakes = StakeOracleClient::new(&env, &config.staking);
            if stakes.get_stake_token() != config.fee_token {
                return Err(ContestError::InvalidInput);
            }
            if stakes.get_staked(&player) < fee {
                return Err(ContestError::InsufficientStake);
            }
            let this = env.current_contract_address();
            stakes.spend_stake(&this, &player, &this, &fee);
        }

        Self::record_fee_payment(&env, player, tournament_id, fee, collected);
        Ok(fee)
    }

    pub fn has_paid(env: Env, tournament_id: u64, player: Address) -> bool {
        env.storage()
            .persistent()
            .has(&(PAID, tournament_id, player))
    }

    pub fn get_fee_payment(env: Env, tournament_id: u64, player: Address) -> Option<FeePayment> {
        env.storage()
            .persistent()
            .get(&(PAID, tournament_id, player))
    }

    // ── Stake gate ────────────────────────────────────────────────────────────

    pub fn set_min_staked_play(env: Env, caller: Address, amount: i128) -> Result<(), ContestError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        if amount < 0 {
            return Err(ContestError::InvalidInput);
        }
        let mut config = Self::get_config(env.clone())?;
        config.min_staked_play = amount;
        env.storage().instance().set(&CONFIG, &config);
        events::publish_min_stake_set(&env, caller, amount);
        Ok(())
    }

    pub fn get_min_staked_play(env: Env) -> i128 {
        Self::get_config(env)
            .map(|config| config.min_staked_play)
            .unwrap_or(0)
    }

    // ── Matches ───────────────────────────────────────────────────────────────

    /// Record a match between two admitted players.
    pub fn play(
        env: Env,
        caller: Address,
        player_a: Address,
        score_a: u32,
        player_b: Address,
        score_b: u32,
        sport: Symbol,
        tournament_id: u64,
    ) -> Result<MatchRecord, ContestError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Referee)
            .map_err(map_common_error)?;
        pausable::require_not_paused(&env).map_err(map_common_error)?;

        if player_a == player_b {
            return Err(ContestError::SamePlayer);
        }
        Self::get_tournament_fee(env.clone(), tournament_id)?;

        let config = Self::get_config(env.clone())?;
        let eligibility = EligibilityOracleClient::new(&env, &config.vault_registry);
        for player in [&player_a, &player_b] {
            if !eligibility.check_eligible(player, &sport) {
                return Err(ContestError::NotEligible);
            }
        }
        let stakes = StakeOracleClient::new(&env, &config.staking);
        for player in [&player_a, &player_b] {
            if stakes.get_staked(player) < config.min_staked_play {
                return Err(ContestError::InsufficientStake);
            }
        }
        for player in [&player_a, &player_b] {
            if !Self::has_paid(env.clone(), tournament_id, player.clone()) {
                return Err(ContestError::FeeNotPaid);
            }
        }

        let outcome = MatchOutcome::from_scores(score_a, score_b);
        let winner = match outcome {
            MatchOutcome::PlayerAWins => Some(player_a.clone()),
            MatchOutcome::PlayerBWins => Some(player_b.clone()),
            MatchOutcome::Draw => None,
        };

        let match_index = Self::match_count(env.clone(), sport.clone());
        let record = MatchRecord {
            sport: sport.clone(),
            match_index,
            tournament_id,
            player_a,
            score_a,
            player_b,
            score_b,
            winner: winner.clone(),
            outcome,
            played_at: env.ledger().timestamp(),
        };

        let key = (MATCH, sport.clone(), match_index);
        env.storage().persistent().set(&key, &record);
        ttl::extend_persistent(&env, &key);
        let count_key = (MATCH_COUNT, sport.clone());
        env.storage()
            .persistent()
            .set(&count_key, &(match_index + 1));
        ttl::extend_persistent(&env, &count_key);

        events::publish_match_played(&env, sport, match_index, tournament_id, winner, outcome);
        Ok(record)
    }

    pub fn get_match(env: Env, sport: Symbol, index: u32) -> Result<MatchRecord, ContestError> {
        env.storage()
            .persistent()
            .get(&(MATCH, sport, index))
            .ok_or(ContestError::MatchNotFound)
    }

    pub fn match_count(env: Env, sport: Symbol) -> u32 {
        env.storage()
            .persistent()
            .get(&(MATCH_COUNT, sport))
            .unwrap_or(0)
    }

    // ── Collected fees ────────────────────────────────────────────────────────

    /// Entry fees held by the engine and not yet withdrawn.
    pub fn collected_fees(env: Env) -> i128 {
        env.storage().instance().get(&COLLECTED).unwrap_or(0)
    }

    pub fn withdraw_fees(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<i128, ContestError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Treasury)
            .map_err(map_common_error)?;

        if amount <= 0 {
            return Err(ContestError::InvalidInput);
        }
        let collected = Self::collected_fees(env.clone());
        if amount > collected {
            return Err(ContestError::InsufficientCollectedFees);
        }

        let config = Self::get_config(env.clone())?;
        let client = token::Client::new(&env, &config.fee_token);
        client.transfer(&env.current_contract_address(), &to, &amount);

        let remaining = collected - amount;
        env.storage().instance().set(&COLLECTED, &remaining);
        events::publish_fees_withdrawn(&env, caller, to, amount, remaining);
        Ok(remaining)
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<ContestConfig, ContestError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContestError::NotInitialized)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), ContestError> {
        caller.require_auth();
        access::require_capability(&env, &caller, Capability::Configure)
            .map_err(map_common_error)?;
        pausable::set_paused(&env, &caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContestError> {
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
    ) -> Result<(), ContestError> {
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
    ) -> Result<(), ContestError> {
        caller.require_auth();
        access::require_admin(&env, &caller).map_err(map_common_error)?;
        access::revoke(&env, &who, capability);
        Ok(())
    }

    pub fn has_capability(env: Env, who: Address, capability: Capability) -> bool {
        access::has_capability(&env, &who, capability)
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    fn record_fee_payment(env: &Env, player: Address, tournament_id: u64, fee: i128, collected: i128) {
        let payment = FeePayment {
            tournament_id,
            player: player.clone(),
            amount: fee,
            paid_at: env.ledger().timestamp(),
        };
        let key = (PAID, tournament_id, player.clone());
        env.storage().persistent().set(&key, &payment);
        ttl::extend_persistent(env, &key);
        env.storage().instance().set(&COLLECTED, &collected);

        events::publish_fee_paid(env, player, tournament_id, fee);
    }

    fn require_initialized(env: &Env) -> Result<(), ContestError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContestError::NotInitialized);
        }
        Ok(())
    }
}
