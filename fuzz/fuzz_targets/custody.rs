#![no_main]

use arbitrary::Arbitrary;
use common::testutils::{MockNftRegistry, MockNftRegistryClient, MockSftRegistry, MockSftRegistryClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, Symbol,
};
use vault_registry::{VaultRegistryContract, VaultRegistryContractClient};

/// Custody operations on a small pool of principals.
///
/// `pick` selects a principal, `n` a count or quantity; both are reduced
/// modulo small bounds so most inputs reach the contract logic.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    DepositPlayers { pick: u8, n: u8 },
    DepositBoosters { pick: u8, n: u8 },
    RevertPlayers { pick: u8, n: u8 },
    RevertBoosters { pick: u8, n: u8 },
    BurnBoosters { pick: u8, n: u8 },
    SetCommission { units: u8 },
    SetPlayersNeeded { n: u8 },
    Pause,
    Unpause,
}

const PLAYERS: u32 = 4;
const BOOSTERS: u64 = 8;
const FUNDS: i128 = 1_000_000_000;

struct Principal {
    address: Address,
    players: Vec<u64>,
    booster: u64,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let treasury = Address::generate(&env);
    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let nft_id = env.register(MockNftRegistry, ());
    let sft_id = env.register(MockSftRegistry, ());
    let nft = MockNftRegistryClient::new(&env, &nft_id);
    let sft = MockSftRegistryClient::new(&env, &sft_id);

    let vault_id = env.register(VaultRegistryContract, ());
    let client = VaultRegistryContractClient::new(&env, &vault_id);
    if client
        .try_initialize(&admin, &nft_id, &sft_id, &fee_token, &treasury)
        .is_err()
    {
        return;
    }

    let soccer = Symbol::new(&env, "Soccer");
    let (men, women) = (Symbol::new(&env, "Men"), Symbol::new(&env, "Women"));
    nft.set_category_amount(&soccer, &men, &(PLAYERS * 3));
    sft.set_category_amount(&soccer, &women, &(BOOSTERS * 3));

    let mut principals = Vec::new();
    for _ in 0..3 {
        let address = Address::generate(&env);
        let players = (0..PLAYERS).map(|_| nft.mint(&address, &soccer, &men)).collect();
        let booster = sft.create(&address, &soccer, &women, &BOOSTERS);
        nft.set_approval_for_all(&address, &vault_id, &true);
        sft.set_approval_for_all(&address, &vault_id, &true);
        StellarAssetClient::new(&env, &fee_token).mint(&address, &FUNDS);
        TokenClient::new(&env, &fee_token).approve(&address, &vault_id, &FUNDS, &100_000);
        principals.push(Principal {
            address,
            players,
            booster,
        });
    }

    for action in actions {
        match action {
            FuzzAction::DepositPlayers { pick, n } => {
                let p = &principals[pick as usize % principals.len()];
                let mut ids = vec![&env];
                for id in p.players.iter().take(1 + n as usize % PLAYERS as usize) {
                    ids.push_back(*id);
                }
                let _ = client.try_deposit_nfts(&p.address, &p.address, &ids);
            }
            FuzzAction::DepositBoosters { pick, n } => {
                let p = &principals[pick as usize % principals.len()];
                let _ = client.try_deposit_boosters(&p.address, &p.address, &p.booster, &(n as u64 % 5));
            }
            FuzzAction::RevertPlayers { pick, n } => {
                let p = &principals[pick as usize % principals.len()];
                let held = client.held_nfts(&p.address);
                let mut ids = vec![&env];
                for id in held.iter().take(1 + n as usize % PLAYERS as usize) {
                    ids.push_back(id);
                }
                let _ = client.try_revert_nfts_to_wallet(&p.address, &ids);
            }
            FuzzAction::RevertBoosters { pick, n } => {
                let p = &principals[pick as usize % principals.len()];
                let _ = client.try_revert_boosters_to_wallet(&p.address, &p.booster, &soccer, &(n as u64 % 5));
            }
            FuzzAction::BurnBoosters { pick, n } => {
                let p = &principals[pick as usize % principals.len()];
                let _ = client.try_burn_boosters(
                    &p.address,
                    &vec![&env, p.booster],
                    &vec![&env, n as u64 % 5],
                );
            }
            FuzzAction::SetCommission { units } => {
                let _ = client.try_set_revert_commission(&admin, &(units as i128 * 1_000));
            }
            FuzzAction::SetPlayersNeeded { n } => {
                let _ = client.try_add_sport(&admin, &soccer, &(n as u32 % 12));
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&admin);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&admin);
            }
        }

        // ── Post-action invariant checks ──
        let needed = client.get_sport(&soccer).map(|r| r.players_needed);
        for p in &principals {
            let held_players = client.held_nfts(&p.address).len() as u64;
            let held_boosters = client.held_boosters(&p.address, &p.booster);
            let counter = client.category_count(&p.address, &soccer);
            assert_eq!(
                counter,
                held_players + held_boosters,
                "INVARIANT VIOLATION: counter differs from custodied units"
            );

            let wallet_players = p
                .players
                .iter()
                .filter(|id| nft.owner_of(*id) == Some(p.address.clone()))
                .count() as u64;
            assert_eq!(
                wallet_players + held_players,
                PLAYERS as u64,
                "INVARIANT VIOLATION: player neither in wallet nor in custody"
            );
            assert!(
                sft.balance_of(&p.address, &p.booster) + held_boosters <= BOOSTERS,
                "INVARIANT VIOLATION: boosters created out of thin air"
            );

            let expected = needed.map(|n| counter >= n as u64).unwrap_or(false);
            assert_eq!(
                client.check_eligible(&p.address, &soccer),
                expected,
                "INVARIANT VIOLATION: eligibility disagrees with counter"
            );
        }
    }
});
