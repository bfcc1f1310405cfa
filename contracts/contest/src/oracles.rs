//! Interfaces of the contracts the engine consults before admitting a match.

use soroban_sdk::{contractclient, Address, Env, Symbol};

/// The staking ledger: stake reads, plus spending stake on a player's behalf
/// once this engine holds the `Collector` capability there.
#[contractclient(name = "StakeOracleClient")]
pub trait StakeOracle {
    fn get_staked(env: Env, staker: Address) -> i128;
    fn get_stake_token(env: Env) -> Address;
    fn spend_stake(env: Env, collector: Address, staker: Address, to: Address, amount: i128)
        -> i128;
}

/// Read side of the vault registry's eligibility counters.
#[contractclient(name = "EligibilityOracleClient")]
pub trait EligibilityOracle {
    fn check_eligible(env: Env, principal: Address, sport: Symbol) -> bool;
}
