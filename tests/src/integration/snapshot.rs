//! # Topology Persistence
//!
//! File-backed snapshot store exercised through the network and the
//! simulator, as the CLI uses it across invocations.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use shard_ledger::{
        JsonFileTopologyStore, LedgerConfig, NodeId, ShardId, ShardNetwork, TopologyStore,
    };
    use shard_runtime::{RuntimeConfig, Simulator};
    use tempfile::TempDir;

    fn triples(network: &ShardNetwork) -> BTreeSet<(NodeId, ShardId, String)> {
        network
            .snapshot()
            .nodes
            .into_iter()
            .map(|d| (d.id, d.shard_id, d.address))
            .collect()
    }

    fn simulator(dir: &TempDir) -> Simulator {
        let config = RuntimeConfig {
            state_file: dir.path().join("network_state.json"),
            seed: Some(3),
            ..Default::default()
        };
        let store = JsonFileTopologyStore::new(config.state_file.clone());
        Simulator::load(config, Box::new(store))
    }

    #[test]
    fn test_file_round_trip_preserves_membership() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileTopologyStore::new(dir.path().join("topology.json"));
        let network = ShardNetwork::with_topology(3, 2);

        network.persist(&store).unwrap();
        let restored = ShardNetwork::restore(&store, &LedgerConfig::default());

        assert_eq!(triples(&restored), triples(&network));
    }

    #[test]
    fn test_round_trip_ignores_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("topology.json");
        fs::write(
            &path,
            r#"{"nodes": [
                {"id": 4, "shard_id": 1, "address": "d"},
                {"id": 1, "shard_id": 0, "address": "a"},
                {"id": 3, "shard_id": 1, "address": "c"},
                {"id": 2, "shard_id": 0, "address": "b"}
            ]}"#,
        )
        .unwrap();

        let store = JsonFileTopologyStore::new(&path);
        let restored = ShardNetwork::restore(&store, &LedgerConfig::default());

        let mut expected = BTreeSet::new();
        for (id, shard, addr) in [(1, 0, "a"), (2, 0, "b"), (3, 1, "c"), (4, 1, "d")] {
            expected.insert((id, shard, addr.to_string()));
        }
        assert_eq!(triples(&restored), expected);
        assert_eq!(restored.shards(), vec![0, 1]);
    }

    #[test]
    fn test_state_survives_only_as_topology() {
        let dir = TempDir::new().unwrap();

        let mut first = simulator(&dir);
        first.start(2, 2);
        first.save().unwrap();
        first.generate(1, 10).unwrap();
        first.mine(1).unwrap();

        let second = simulator(&dir);
        assert_eq!(triples(second.network()), triples(first.network()));
        assert!(second
            .status()
            .iter()
            .all(|s| s.height == 0 && s.pending == 0 && s.relay == 0));
    }

    #[test]
    fn test_init_overwrites_previous_topology() {
        let dir = TempDir::new().unwrap();

        let mut sim = simulator(&dir);
        sim.start(4, 4);
        sim.save().unwrap();
        sim.init();
        sim.save().unwrap();

        assert!(simulator(&dir).network().is_empty());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("network_state.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let store = JsonFileTopologyStore::new(&path);
        assert!(store.load().is_err());
        assert!(simulator(&dir).network().is_empty());
    }

    #[test]
    fn test_null_node_list_loads_as_initialized_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("network_state.json");
        fs::write(&path, "{\n  \"nodes\": null\n}").unwrap();

        let store = JsonFileTopologyStore::new(&path);
        assert_eq!(store.load().unwrap().map(|s| s.len()), Some(0));

        let sim = simulator(&dir);
        assert!(sim.is_initialized());
        assert!(sim.network().is_empty());
    }

    #[test]
    fn test_written_file_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("topology.json");
        ShardNetwork::with_topology(1, 2)
            .persist(&JsonFileTopologyStore::new(&path))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["nodes"][1]["address"], "192.168.1.2");
    }
}
