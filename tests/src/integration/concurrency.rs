//! # Concurrent Execution
//!
//! The engine is synchronous and holds no mutable state, so batches over
//! independent snapshots may run on any number of threads.

#[cfg(test)]
mod tests {
    use crate::fixtures::{actor, alice, owned_darc, Ledger};
    use dc_02_contracts::{
        evolve_instruction, genesis_instruction, EngineConfig, ExecutionService,
        InMemoryCollection,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinSet;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_ledgers_in_parallel() {
        let service = Arc::new(ExecutionService::new(EngineConfig::default()).unwrap());
        let mut tasks = JoinSet::new();

        for n in 0..16u64 {
            let service = Arc::clone(&service);
            tasks.spawn_blocking(move || {
                let owner = actor(&format!("owner-{n}"));
                let genesis = owned_darc(&owner, "genesis");
                let batch = vec![
                    genesis_instruction(&genesis, Duration::from_millis(100 + n)).unwrap(),
                    evolve_instruction(&genesis.evolve(), [owner.identity()]).unwrap(),
                ];
                let mut store = InMemoryCollection::new();
                let outcome = service.execute_batch(&store, &batch, Vec::new()).unwrap();
                store.apply_all(&outcome.state_changes).unwrap();
                (n, outcome.all_succeeded(), service.block_interval(&store).unwrap())
            });
        }

        let mut seen = 0;
        while let Some(joined) = tasks.join_next().await {
            let (n, ok, interval) = joined.unwrap();
            assert!(ok, "ledger {n} rejected a valid batch");
            assert_eq!(interval, Duration::from_millis(100 + n));
            seen += 1;
        }
        assert_eq!(seen, 16);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_snapshot_gives_identical_outcomes() {
        let (ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let snapshot = Arc::new(ledger.store.clone());
        let service = Arc::new(ledger.service.clone());
        let batch = Arc::new(vec![
            evolve_instruction(&genesis.evolve(), [alice().identity()]).unwrap(),
        ]);

        let mut tasks = JoinSet::new();
        for _ in 0..8 {
            let (snapshot, service, batch) =
                (Arc::clone(&snapshot), Arc::clone(&service), Arc::clone(&batch));
            tasks.spawn_blocking(move || {
                service
                    .execute_batch(snapshot.as_ref(), &batch, Vec::new())
                    .unwrap()
                    .state_changes
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.unwrap());
        }
        assert_eq!(outcomes.len(), 8);
        assert!(outcomes.windows(2).all(|w| w[0] == w[1]));

        // The snapshot itself was never written.
        assert_eq!(snapshot.len(), ledger.store.len());
        assert_eq!(
            dc_02_contracts::load_genesis_darc(snapshot.as_ref()).unwrap(),
            genesis
        );
    }
}
