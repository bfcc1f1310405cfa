use soroban_sdk::{Env, IntoVal, Val};

/// ~30 days at ~5s/ledger. Entries below this are bumped on touch.
pub const TTL_THRESHOLD: u32 = 518_400;
/// ~180 days at ~5s/ledger.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends a persistent entry so per-principal custody records outlive idle periods.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
