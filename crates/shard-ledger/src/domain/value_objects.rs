//! # Domain Value Objects
//!
//! Plain records passed across the network boundary and to the persistence
//! collaborator.

use super::errors::{NodeId, ShardId};
use serde::{Deserialize, Deserializer, Serialize};

/// What happens to drained transactions when a mined candidate is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RejectionPolicy {
    /// Drop them, as the drain already happened.
    #[default]
    Discard,
    /// Put them back at the front of the pending queue.
    Requeue,
}

/// Identity of a node as persisted in a topology snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Node identifier.
    pub id: NodeId,
    /// Shard the node belongs to.
    pub shard_id: ShardId,
    /// Opaque network address.
    pub address: String,
}

/// Persisted network topology: identities and shard membership only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    /// Node descriptors in traversal order. A missing or `null` list reads
    /// as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<NodeDescriptor>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<NodeDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<NodeDescriptor>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TopologySnapshot {
    /// Number of described nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node is described.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Point-in-time view of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeStatus {
    /// Node identifier.
    pub id: NodeId,
    /// Shard the node belongs to.
    pub shard_id: ShardId,
    /// Opaque network address.
    pub address: String,
    /// Chain height.
    pub height: u64,
    /// Pending queue length.
    pub pending: usize,
    /// Relay queue length.
    pub relay: usize,
}

/// Outcome of fanning a transaction out to a shard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Target shard.
    pub shard_id: ShardId,
    /// Nodes that ingested the transaction.
    pub recipients: usize,
}

impl DeliveryReport {
    /// True if no node received the transaction.
    pub fn is_empty(&self) -> bool {
        self.recipients == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_policy_default() {
        assert_eq!(RejectionPolicy::default(), RejectionPolicy::Discard);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let snapshot = TopologySnapshot {
            nodes: vec![NodeDescriptor {
                id: 1,
                shard_id: 0,
                address: "192.168.1.1".to_string(),
            }],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [{ "id": 1, "shard_id": 0, "address": "192.168.1.1" }]
            })
        );
    }

    #[test]
    fn test_snapshot_accepts_large_ids() {
        let json = format!(
            r#"{{"nodes":[{{"id":{},"shard_id":{},"address":"x"}}]}}"#,
            u64::MAX,
            u64::MAX - 1
        );
        let snapshot: TopologySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.nodes[0].id, u64::MAX);
        assert_eq!(snapshot.nodes[0].shard_id, u64::MAX - 1);
    }

    #[test]
    fn test_snapshot_null_or_missing_nodes_is_empty() {
        let null: TopologySnapshot = serde_json::from_str(r#"{"nodes": null}"#).unwrap();
        assert!(null.is_empty());

        let missing: TopologySnapshot = serde_json::from_str("{}").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_delivery_report_empty() {
        let report = DeliveryReport {
            shard_id: 3,
            recipients: 0,
        };
        assert!(report.is_empty());
    }
}
