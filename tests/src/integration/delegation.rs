//! # Delegated Authorization
//!
//! A `darc:<id>` identity in a rule holds when the signers satisfy the
//! `_sign` rule of the referenced darc, as currently stored.

#[cfg(test)]
mod tests {
    use crate::fixtures::{alice, bob, carol, owned_darc, Ledger};
    use dc_01_darc::{Darc, Expression, Identity, Rules, EVOLVE, SIGN};
    use dc_02_contracts::{evolve_instruction, ContractError, EngineConfig};
    use std::time::Duration;

    /// Darc whose `evolve` and `_sign` rules delegate to `delegate`.
    fn delegating(delegate: &Darc, description: &str) -> Darc {
        let expr = Expression::single(&Identity::Darc(delegate.base_id()));
        let mut rules = Rules::new();
        rules.add(EVOLVE, expr.clone()).unwrap();
        rules.add(SIGN, expr).unwrap();
        Darc::new(rules, description)
    }

    #[test]
    fn test_team_member_evolves_project() {
        let (mut ledger, _) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let team = owned_darc(&bob(), "team");
        let project = delegating(&team, "project");
        ledger.install(&team).unwrap();
        ledger.install(&project).unwrap();

        let outcome = ledger
            .submit(&[evolve_instruction(&project.evolve(), [bob().identity()]).unwrap()])
            .unwrap();
        assert!(outcome.all_succeeded());
        assert_eq!(ledger.darc(project.base_id()).unwrap().version, 1);
    }

    #[test]
    fn test_membership_follows_current_team_version() {
        let (mut ledger, _) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let team = owned_darc(&bob(), "team");
        let project = delegating(&team, "project");
        ledger.install(&team).unwrap();
        ledger.install(&project).unwrap();

        // Bob hands the team's signing right to Carol in the same batch.
        let mut team_v1 = team.evolve();
        team_v1
            .rules
            .update(SIGN, Expression::single(&carol().identity()))
            .unwrap();
        let outcome = ledger
            .submit(&[
                evolve_instruction(&team_v1, [bob().identity()]).unwrap(),
                evolve_instruction(&project.evolve(), [bob().identity()]).unwrap(),
                evolve_instruction(&project.evolve(), [carol().identity()]).unwrap(),
            ])
            .unwrap();
        assert!(outcome.results[0].is_ok());
        assert!(matches!(
            outcome.results[1],
            Err(ContractError::AuthorizationDenied { .. })
        ));
        assert!(outcome.results[2].is_ok());
    }

    #[test]
    fn test_delegation_cycle_denied() {
        let (mut ledger, _) = Ledger::bootstrap(&alice(), Duration::from_secs(1)).unwrap();
        let left = owned_darc(&carol(), "left");
        let right = delegating(&left, "right");
        ledger.install(&left).unwrap();
        ledger.install(&right).unwrap();

        // Carol closes the loop: left now delegates to right.
        let mut left_v1 = left.evolve();
        let back = Expression::single(&Identity::Darc(right.base_id()));
        left_v1.rules.update(EVOLVE, back.clone()).unwrap();
        left_v1.rules.update(SIGN, back).unwrap();
        let outcome = ledger
            .submit(&[evolve_instruction(&left_v1, [carol().identity()]).unwrap()])
            .unwrap();
        assert!(outcome.all_succeeded());

        // No ed25519 key is reachable through the loop any more.
        for signer in [carol(), bob()] {
            let outcome = ledger
                .submit(&[evolve_instruction(&left_v1.evolve(), [signer.identity()]).unwrap()])
                .unwrap();
            assert!(matches!(
                outcome.results[0],
                Err(ContractError::AuthorizationDenied { .. })
            ));
        }
    }

    #[test]
    fn test_delegation_depth_limit() {
        let config = EngineConfig {
            max_delegation_depth: 1,
            ..EngineConfig::default()
        };
        let mut ledger = Ledger::new(config).unwrap();

        // project -> team -> inner, where inner is signed by Bob.
        let inner = owned_darc(&bob(), "inner");
        let team = delegating(&inner, "team");
        let project = delegating(&team, "project");
        for darc in [&inner, &team, &project] {
            ledger.install(darc).unwrap();
        }

        let ins = evolve_instruction(&project.evolve(), [bob().identity()]).unwrap();
        let outcome = ledger.submit(&[ins]).unwrap();
        assert!(matches!(
            outcome.results[0],
            Err(ContractError::AuthorizationDenied { .. })
        ));

        // One hop suffices for team itself.
        let outcome = ledger
            .submit(&[evolve_instruction(&team.evolve(), [bob().identity()]).unwrap()])
            .unwrap();
        assert!(outcome.all_succeeded());
    }
}
