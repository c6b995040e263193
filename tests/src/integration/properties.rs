//! # Property Tests
//!
//! Encoding round-trips and lineage rules over generated darcs.

#[cfg(test)]
mod tests {
    use crate::fixtures::Ledger;
    use dc_01_darc::{Darc, Expression, Identity, NoDelegation, Rules, Signer, EVOLVE, SIGN};
    use dc_02_contracts::domain::{decode_varint_exact, encode_varint};
    use dc_02_contracts::{evolve_instruction, ChainConfig, ContractError};
    use proptest::prelude::*;
    use std::time::Duration;

    fn signers(max: usize) -> impl Strategy<Value = Vec<Signer>> {
        prop::collection::vec(any::<[u8; 32]>(), 1..=max)
            .prop_map(|seeds| seeds.into_iter().map(Signer::from_seed).collect())
    }

    fn identities(signers: &[Signer]) -> Vec<Identity> {
        signers.iter().map(Signer::identity).collect()
    }

    prop_compose! {
        fn arb_darc()(
            owners in signers(4),
            description in prop::collection::vec(any::<u8>(), 0..64),
            extra in prop::collection::btree_map("[a-z]{1,8}", 0usize..4, 0..4),
            all in any::<bool>(),
        ) -> Darc {
            let ids = identities(&owners);
            let owner = if all { Expression::all_of(&ids) } else { Expression::any_of(&ids) };
            let mut rules = Rules::owned_by(&owner);
            for (action, index) in extra {
                let expr = Expression::single(&ids[index % ids.len()]);
                // Generated names may collide with the reserved actions.
                let _ = rules.add(&action, expr);
            }
            Darc::new(rules, description)
        }
    }

    proptest! {
        #[test]
        fn prop_darc_round_trip(darc in arb_darc(), signed in any::<bool>(), seed in any::<[u8; 32]>()) {
            let mut darc = darc;
            if signed {
                darc.sign(&Signer::from_seed(seed));
            }
            let bytes = darc.encode().unwrap();
            let decoded = Darc::decode(&bytes).unwrap();
            prop_assert_eq!(&decoded, &darc);
            prop_assert_eq!(decoded.encode().unwrap(), bytes);
            prop_assert_eq!(decoded.id(), darc.id());
        }

        #[test]
        fn prop_signatures_do_not_change_id(darc in arb_darc(), seed in any::<[u8; 32]>()) {
            let mut signed = darc.clone();
            signed.sign(&Signer::from_seed(seed));
            prop_assert_eq!(signed.id(), darc.id());
            prop_assert!(signed.verify(false).is_ok());
        }

        #[test]
        fn prop_chain_config_round_trip(nanos in 1u64..=u64::MAX) {
            let config = ChainConfig::new(Duration::from_nanos(nanos)).unwrap();
            let bytes = config.encode().unwrap();
            prop_assert_eq!(ChainConfig::decode(&bytes).unwrap(), config);
        }

        #[test]
        fn prop_varint_round_trip(value in any::<i64>()) {
            prop_assert_eq!(decode_varint_exact(&encode_varint(value)), Some(value));
        }

        #[test]
        fn prop_evolution_keeps_lineage(darc in arb_darc(), steps in 1usize..6) {
            let mut current = darc.clone();
            for _ in 0..steps {
                current = current.evolve();
            }
            prop_assert_eq!(current.base_id(), darc.base_id());
            prop_assert_eq!(current.version, steps as u64);
        }

        #[test]
        fn prop_only_next_version_accepted(darc in arb_darc(), version in 0u64..10) {
            let owners: Vec<Identity> = darc
                .rules
                .get(EVOLVE)
                .unwrap()
                .parse()
                .unwrap()
                .identities();
            let mut next = darc.evolve();
            next.version = version;
            let result = next.sanity_check(&darc, &owners, &NoDelegation, 0);
            if version == 1 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn prop_any_owner_may_evolve(owners in signers(4), pick in any::<prop::sample::Index>()) {
            let ids = identities(&owners);
            let darc = Darc::new(Rules::owned_by(&Expression::any_of(&ids)), "shared");
            let chosen = ids[pick.index(ids.len())];
            prop_assert!(darc.evolve().sanity_check(&darc, &[chosen], &NoDelegation, 0).is_ok());
            prop_assert!(darc.check_rule(SIGN, &[chosen], &NoDelegation, 0).is_ok());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_ledger_rejects_foreign_evolvers(owner in any::<[u8; 32]>(), intruder in any::<[u8; 32]>()) {
            prop_assume!(owner != intruder);
            let owner = Signer::from_seed(owner);
            let intruder = Signer::from_seed(intruder);
            let (mut ledger, genesis) = Ledger::bootstrap(&owner, Duration::from_secs(1)).unwrap();

            let outcome = ledger
                .submit(&[evolve_instruction(&genesis.evolve(), [intruder.identity()]).unwrap()])
                .unwrap();
            let is_denied = matches!(
                outcome.results[0],
                Err(ContractError::AuthorizationDenied { .. })
            );
            prop_assert!(is_denied);
            prop_assert_eq!(ledger.darc(genesis.base_id()).unwrap(), genesis);
        }
    }
}
