//! Reversal commission: quoting, affordability checks, and collection.

use soroban_sdk::{token, Address, Env};

use crate::{VaultConfig, VaultError};

/// `fee_per_unit × units`, rejecting overflow.
pub fn quote(config: &VaultConfig, units: u64) -> Result<i128, VaultError> {
    config
        .revert_commission
        .checked_mul(i128::from(units))
        .ok_or(VaultError::InvalidInput)
}

/// Checks that `payer` approved and holds `fee`; performs no transfer.
pub fn ensure_payable(
    env: &Env,
    config: &VaultConfig,
    payer: &Address,
    fee: i128,
) -> Result<(), VaultError> {
    if fee == 0 {
        return Ok(());
    }
    let client = token::Client::new(env, &config.fee_token);
    if client.allowance(payer, &env.current_contract_address()) < fee {
        return Err(VaultError::FeeNotApproved);
    }
    if client.balance(payer) < fee {
        return Err(VaultError::InsufficientBalance);
    }
    Ok(())
}

/// Moves `fee` from `payer` straight to the treasury.
pub fn collect(env: &Env, config: &VaultConfig, payer: &Address, fee: i128) {
    if fee == 0 {
        return;
    }
    let client = token::Client::new(env, &config.fee_token);
    client.transfer_from(
        &env.current_contract_address(),
        payer,
        &config.treasury,
        &fee,
    );
}
