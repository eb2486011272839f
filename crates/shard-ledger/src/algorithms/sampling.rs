//! # Sample Transaction Generation
//!
//! Synthetic traffic for the simulator. Fully determined by its inputs: the
//! shard set is passed in explicitly and randomness comes from the supplied
//! generator, so a seeded RNG reproduces the same batch.

use super::routing::choose_destination;
use crate::domain::{LedgerConfig, ShardId, Transaction};
use num_bigint::BigUint;
use rand::Rng;

/// Prefix of synthetic account identifiers.
pub const ACCOUNT_PREFIX: &str = "account-";

/// Draw a synthetic account identifier.
pub fn sample_account<R: Rng + ?Sized>(account_space: u32, rng: &mut R) -> String {
    format!("{}{}", ACCOUNT_PREFIX, rng.gen_range(0..account_space.max(1)))
}

/// Generate `count` transactions originating on `origin`.
///
/// Nonces run from `first_nonce` upwards. Sender and recipient differ
/// whenever the account space allows it.
pub fn sample_transactions<R: Rng + ?Sized>(
    origin: ShardId,
    count: usize,
    shards: &[ShardId],
    first_nonce: u64,
    config: &LedgerConfig,
    rng: &mut R,
) -> Vec<Transaction> {
    let max_amount = config.max_amount.max(1);

    (0..count)
        .map(|i| {
            let sender = sample_account(config.account_space, rng);
            let mut recipient = sample_account(config.account_space, rng);
            while config.account_space > 1 && recipient == sender {
                recipient = sample_account(config.account_space, rng);
            }

            let amount = BigUint::from(rng.gen_range(1..=max_amount));
            let to_shard = choose_destination(origin, shards, config.local_ratio, rng);

            Transaction::new(
                sender,
                recipient,
                amount,
                first_nonce + i as u64,
                origin,
                to_shard,
            )
        })
        .collect()
}
