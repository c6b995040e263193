//! # Genesis and Evolution Flow
//!
//! Drives the execution service the way a block applier would: execute a
//! batch against the current store, then apply the accepted changes.

#[cfg(test)]
mod tests {
    use crate::fixtures::{alice, bob, init_test_logging, owned_darc, Ledger};
    use dc_01_darc::{Darc, Rules, EVOLVE};
    use dc_02_contracts::domain::encode_varint;
    use dc_02_contracts::{
        evolve_instruction, genesis_instruction, load_config, load_darc, Arguments,
        ContractError, EngineConfig, Instruction, StateAction, StoreError,
    };
    use shared_types::{
        DarcId, ObjectId, CONTRACT_CONFIG_ID, CONTRACT_DARC_ID, GENESIS_REFERENCE_ID,
        ONE_NONCE, ZERO_NONCE,
    };
    use std::time::Duration;

    // =========================================================================
    // GENESIS
    // =========================================================================

    #[test]
    fn test_genesis_creates_reference_darc_and_config() {
        init_test_logging();
        let mut ledger = Ledger::new(EngineConfig::default()).unwrap();
        let genesis = owned_darc(&alice(), "genesis");
        let id = genesis.base_id();

        let outcome = ledger
            .submit(&[genesis_instruction(&genesis, Duration::from_millis(1500)).unwrap()])
            .unwrap();
        assert!(outcome.all_succeeded());

        let changes = &outcome.state_changes;
        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| c.action == StateAction::Create));
        assert_eq!(
            (changes[0].object_id, changes[0].contract_id.as_str()),
            (GENESIS_REFERENCE_ID, CONTRACT_CONFIG_ID)
        );
        assert_eq!(
            (changes[1].object_id, changes[1].contract_id.as_str()),
            (ObjectId::new(id, ZERO_NONCE), CONTRACT_DARC_ID)
        );
        assert_eq!(
            (changes[2].object_id, changes[2].contract_id.as_str()),
            (ObjectId::new(id, ONE_NONCE), CONTRACT_CONFIG_ID)
        );

        assert_eq!(ledger.darc(id).unwrap(), genesis);
        assert_eq!(
            load_config(&ledger.store).unwrap().block_interval,
            Duration::from_millis(1500)
        );
        assert_eq!(
            ledger.service.block_interval(&ledger.store).unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_rejected_genesis_emits_nothing() {
        let mut ledger = Ledger::new(EngineConfig::default()).unwrap();

        // Empty rule set.
        let empty = Darc::new(Rules::new(), "empty");
        let outcome = ledger
            .submit(&[genesis_instruction(&empty, Duration::from_secs(1)).unwrap()])
            .unwrap();
        assert_eq!(outcome.results[0], Err(ContractError::EmptyPolicy));

        // Zero block interval.
        let genesis = owned_darc(&alice(), "genesis");
        let args = Arguments::new()
            .with("darc", genesis.encode().unwrap())
            .with("block_interval", encode_varint(0));
        let zero = Instruction::spawn(
            ObjectId::darc_slot(genesis.base_id()),
            CONTRACT_CONFIG_ID,
            args,
        );
        let outcome = ledger.submit(&[zero]).unwrap();
        assert!(matches!(
            outcome.results[0],
            Err(ContractError::InvalidArgument { .. })
        ));

        assert!(outcome.state_changes.is_empty());
        assert!(ledger.store.is_empty());
        assert_eq!(
            ledger.service.block_interval(&ledger.store).unwrap(),
            EngineConfig::default().default_block_interval
        );
    }

    #[test]
    fn test_duplicate_genesis_rejected_in_same_batch() {
        let mut ledger = Ledger::new(EngineConfig::default()).unwrap();
        let genesis = owned_darc(&alice(), "genesis");
        let ins = genesis_instruction(&genesis, Duration::from_secs(1)).unwrap();

        let outcome = ledger.submit(&[ins.clone(), ins]).unwrap();
        assert!(outcome.results[0].is_ok());
        assert_eq!(
            outcome.results[1],
            Err(ContractError::Store(StoreError::AlreadyExists {
                key: GENESIS_REFERENCE_ID
            }))
        );
        assert_eq!(ledger.store.len(), 3);
    }

    #[test]
    fn test_duplicate_genesis_rejected_in_later_batch() {
        let (mut ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();

        // A different genesis darc still collides on the reference key.
        let other = owned_darc(&bob(), "second genesis");
        let outcome = ledger
            .submit(&[genesis_instruction(&other, Duration::from_secs(9)).unwrap()])
            .unwrap();
        assert!(matches!(
            outcome.results[0],
            Err(ContractError::Store(StoreError::AlreadyExists { .. }))
        ));

        assert_eq!(ledger.store.len(), 3);
        assert_eq!(load_config(&ledger.store).unwrap().block_interval, Duration::from_secs(1));
        assert_eq!(
            dc_02_contracts::load_genesis_darc(&ledger.store).unwrap(),
            genesis
        );
    }

    // =========================================================================
    // EVOLUTION
    // =========================================================================

    #[test]
    fn test_alice_evolves_then_bob_is_denied() {
        init_test_logging();
        let (mut ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let base = genesis.base_id();

        // Alice moves the darc to version 1.
        let mut v1 = genesis.evolve();
        v1.description = b"alice v1".to_vec();
        let outcome = ledger
            .submit(&[evolve_instruction(&v1, [alice().identity()]).unwrap()])
            .unwrap();
        assert!(outcome.all_succeeded());
        assert_eq!(outcome.state_changes.len(), 1);
        assert_eq!(outcome.state_changes[0].action, StateAction::Update);
        assert_eq!(ledger.darc(base).unwrap(), v1);

        // Bob tries to take over with version 2.
        let mut v2 = v1.evolve();
        v2.rules
            .update(EVOLVE, dc_01_darc::Expression::single(&bob().identity()))
            .unwrap();
        let outcome = ledger
            .submit(&[evolve_instruction(&v2, [bob().identity()]).unwrap()])
            .unwrap();
        assert_eq!(
            outcome.results[0],
            Err(ContractError::AuthorizationDenied {
                action: "evolve".to_string()
            })
        );
        assert_eq!(ledger.darc(base).unwrap(), v1);
    }

    #[test]
    fn test_evolution_rejections() {
        let (mut ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let signers = [alice().identity()];

        let mut skipped = genesis.evolve();
        skipped.version = 3;

        let mut foreign = genesis.evolve();
        foreign.base_id = Some(DarcId::new([0x42; 32]));
        let mut foreign_ins = evolve_instruction(&foreign, signers).unwrap();
        foreign_ins.object_id = ObjectId::darc_slot(genesis.base_id());

        let outcome = ledger
            .submit(&[
                evolve_instruction(&skipped, signers).unwrap(),
                foreign_ins,
                evolve_instruction(&genesis.evolve(), [bob().identity()]).unwrap(),
            ])
            .unwrap();
        assert_eq!(
            outcome.results[0],
            Err(ContractError::VersionMismatch {
                expected: 1,
                actual: 3
            })
        );
        assert!(matches!(
            outcome.results[1],
            Err(ContractError::BaseIdMismatch { .. })
        ));
        assert!(matches!(
            outcome.results[2],
            Err(ContractError::AuthorizationDenied { .. })
        ));
        assert!(outcome.state_changes.is_empty());
        assert_eq!(ledger.darc(genesis.base_id()).unwrap(), genesis);
    }

    #[test]
    fn test_chained_evolutions_in_one_batch() {
        let (mut ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let v1 = genesis.evolve();
        let v2 = v1.evolve();
        let v3 = v2.evolve();
        let batch: Vec<Instruction> = [&v1, &v2, &v3]
            .into_iter()
            .map(|d| evolve_instruction(d, [alice().identity()]).unwrap())
            .collect();

        let outcome = ledger.submit(&batch).unwrap();
        assert!(outcome.all_succeeded());
        assert_eq!(outcome.stats.state_changes, 3);
        assert_eq!(ledger.darc(genesis.base_id()).unwrap().version, 3);

        // Replaying the same batch now fails at every step.
        let outcome = ledger.submit(&batch).unwrap();
        assert_eq!(outcome.stats.failed, 3);
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    #[test]
    fn test_darc_contract_only_invoked() {
        let (mut ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let target = ObjectId::darc_slot(genesis.base_id());

        for command in ["evolve", "add", "anything"] {
            let spawn = Instruction::spawn(
                target,
                CONTRACT_DARC_ID,
                Arguments::new().with("command", command.as_bytes().to_vec()),
            )
            .signed_by([alice().identity()]);
            let delete = Instruction::delete(target).signed_by([alice().identity()]);

            let outcome = ledger.submit(&[spawn, delete]).unwrap();
            for result in &outcome.results {
                assert_eq!(
                    result,
                    &Err(ContractError::UnsupportedOperation {
                        contract: "darc",
                        allowed: "invoked",
                    })
                );
            }
        }
        assert_eq!(ledger.darc(genesis.base_id()).unwrap(), genesis);
    }

    #[test]
    fn test_unknown_commands() {
        let (mut ledger, genesis) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let target = ObjectId::darc_slot(genesis.base_id());
        let outcome = ledger
            .submit(&[
                Instruction::invoke(target, "add", Arguments::new()),
                Instruction::invoke(target, "transfer", Arguments::new()),
                Instruction::invoke(ObjectId::config_slot(genesis.base_id()), "evolve", Arguments::new()),
            ])
            .unwrap();
        assert_eq!(
            outcome.results[0],
            Err(ContractError::NotImplemented("add".to_string()))
        );
        assert_eq!(
            outcome.results[1].as_ref().unwrap_err().to_string(),
            "invalid command: transfer"
        );
        assert_eq!(
            outcome.results[2],
            Err(ContractError::UnsupportedOperation {
                contract: "config",
                allowed: "spawned",
            })
        );
    }

    #[test]
    fn test_engine_config_from_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "max_batch_size": 2, "max_darc_size": 4096 }"#).unwrap();
        let mut ledger = Ledger::new(config).unwrap();
        let genesis = owned_darc(&alice(), "genesis");
        let ins = genesis_instruction(&genesis, Duration::from_secs(1)).unwrap();

        assert!(ledger.submit(&[ins.clone(), ins.clone(), ins]).is_err());
        assert!(ledger.store.is_empty());
        assert!(load_darc(&ledger.store, &ObjectId::darc_slot(genesis.base_id())).is_err());
    }
}
