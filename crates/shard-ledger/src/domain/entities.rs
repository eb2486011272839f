//! # Domain Entities
//!
//! Transactions and blocks. Both are immutable once built: fields are
//! private and only exposed through accessors.

use super::errors::{AccountId, ShardId};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Transfer between two accounts, tagged with origin and destination shard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    sender: AccountId,
    recipient: AccountId,
    amount: BigUint,
    nonce: u64,
    from_shard: ShardId,
    to_shard: ShardId,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(
        sender: impl Into<AccountId>,
        recipient: impl Into<AccountId>,
        amount: BigUint,
        nonce: u64,
        from_shard: ShardId,
        to_shard: ShardId,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            nonce,
            from_shard,
            to_shard,
        }
    }

    /// Sending account.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Receiving account.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Transferred amount.
    pub fn amount(&self) -> &BigUint {
        &self.amount
    }

    /// Sender nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Shard the transaction originated on.
    pub fn from_shard(&self) -> ShardId {
        self.from_shard
    }

    /// Shard the transaction must be mined on.
    pub fn to_shard(&self) -> ShardId {
        self.to_shard
    }

    /// Origin and destination differ.
    pub fn is_cross_shard(&self) -> bool {
        self.from_shard != self.to_shard
    }
}

/// A numbered batch of transactions appended to a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    number: u64,
    transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block candidate.
    pub fn new(number: u64, transactions: Vec<Transaction>) -> Self {
        Self {
            number,
            transactions,
        }
    }

    /// Implicit genesis block (number 0, no transactions).
    pub fn genesis() -> Self {
        Self::new(0, Vec::new())
    }

    /// Block number (height it occupies once committed).
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Included transactions, in ingestion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of included transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True if the block carries no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Consume the block, returning its transactions.
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }
}
