//! # Protocol Flows
//!
//! Multi-block histories through one service: an asset is issued, traded,
//! handed to a new issuer and finally locked, with balances and records
//! checked at every step.

#[cfg(test)]
mod tests {
    use asset_protocol::{
        AssetProtocolApi, IssuanceRequest, ParseOutcome, SendRequest, Status, UNIT,
    };
    use asset_protocol::adapters::JournalAction;
    use shared_types::{Address, Network};

    use crate::fixtures::{plain_issuance, tx_hash, ChainSimulator};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const FOO: u64 = 4_276_985;
    const BAR: u64 = 4_276_986;

    fn alice() -> Address {
        Address::from("1Alice")
    }

    fn bob() -> Address {
        Address::from("1Bob")
    }

    fn carol() -> Address {
        Address::from("1Carol")
    }

    fn make_simulator(height: u64) -> ChainSimulator {
        ChainSimulator::mainnet(height)
            .register(FOO, "FOO")
            .register(BAR, "BAR")
            .fund(&alice(), "XCP", 10 * UNIT)
            .fund(&bob(), "XCP", 10 * UNIT)
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[test]
    fn test_issue_trade_transfer_lock() {
        let mut sim = make_simulator(320_000);

        let record = sim.issue(&alice(), &plain_issuance(FOO, 1_000));
        assert!(record.status.is_valid());
        sim.mine_block();

        assert!(sim.send(&alice(), &bob(), FOO, 300).status.is_valid());
        assert!(sim.send(&bob(), &carol(), FOO, 100).status.is_valid());
        sim.mine_block();

        // Ownership moves to bob; alice keeps her units.
        let record = sim.issue_to(&alice(), Some(&bob()), &plain_issuance(FOO, 0));
        assert!(record.status.is_valid(), "{}", record.status);
        assert_eq!(record.issuer, bob());

        let record = sim.issue(&bob(), &plain_issuance(FOO, 50));
        assert!(record.status.is_valid(), "{}", record.status);
        assert_eq!(record.fee_paid, 0);

        let mut lock = plain_issuance(FOO, 0);
        lock.description = "Lock".to_string();
        let record = sim.issue(&bob(), &lock);
        assert!(record.locked);
        sim.mine_block();

        let record = sim.issue(&bob(), &plain_issuance(FOO, 1));
        assert_eq!(
            record.status,
            Status::Invalid("locked asset and non‐zero quantity".to_string())
        );

        assert_eq!(sim.balance(&alice(), "FOO"), 700);
        assert_eq!(sim.balance(&bob(), "FOO"), 250);
        assert_eq!(sim.balance(&carol(), "FOO"), 100);
        assert_eq!(sim.ledger().supply("FOO"), 1_050);
        assert_eq!(sim.ledger().issuances().len(), 5);
        assert_eq!(sim.ledger().sends().len(), 2);
    }

    #[test]
    fn test_journal_mirrors_balance_changes() {
        let mut sim = make_simulator(320_000);
        sim.issue(&alice(), &plain_issuance(FOO, 1_000));
        sim.send(&alice(), &bob(), FOO, 400);
        sim.send(&bob(), &carol(), FOO, 500);

        let net: i128 = sim
            .ledger()
            .journal()
            .iter()
            .filter(|entry| entry.asset == "FOO")
            .map(|entry| match entry.action {
                JournalAction::Credit => i128::from(entry.quantity),
                JournalAction::Debit => -i128::from(entry.quantity),
            })
            .sum();
        assert_eq!(net, 1_000);

        // The failed send left no journal entries under its hash.
        assert!(sim
            .ledger()
            .journal()
            .iter()
            .all(|entry| entry.event != tx_hash(3)));

        let fee = sim
            .ledger()
            .journal()
            .iter()
            .find(|entry| entry.asset == "XCP")
            .map(|entry| (entry.action, entry.quantity, entry.event));
        assert_eq!(fee, Some((JournalAction::Debit, UNIT / 2, tx_hash(1))));
    }

    #[test]
    fn test_protocol_currency_is_sendable() {
        let mut sim = make_simulator(320_000);
        let xcp_id = asset_protocol::XCP_ID;
        let record = sim.send(&alice(), &carol(), xcp_id, UNIT);
        assert!(record.status.is_valid());
        assert_eq!(sim.balance(&carol(), "XCP"), UNIT);
        assert_eq!(sim.balance(&alice(), "XCP"), 9 * UNIT);
    }

    #[test]
    fn test_fee_schedule_across_history() {
        let mut sim = make_simulator(281_000);
        let start = sim.balance(&alice(), "XCP");

        let mut paid = Vec::new();
        for (asset, height) in [(FOO, 281_000), (BAR, 286_000)] {
            sim.jump_to(height);
            paid.push(sim.issue(&alice(), &plain_issuance(asset, 10)).fee_paid);
        }
        sim.jump_to(291_700);
        paid.push(sim.issue(&alice(), &plain_issuance(FOO, 10)).fee_paid);
        sim.jump_to(310_000);
        paid.push(sim.issue(&alice(), &plain_issuance(FOO, 10)).fee_paid);

        assert_eq!(paid, vec![0, 5 * UNIT, UNIT / 2, 0]);
        assert_eq!(sim.balance(&alice(), "XCP"), start - 5 * UNIT - UNIT / 2);
        assert_eq!(sim.ledger().supply("FOO"), 30);
    }

    #[test]
    fn test_divisibility_fixed_by_first_issuance() {
        let mut sim = make_simulator(320_000);
        sim.issue(&alice(), &plain_issuance(FOO, 10));
        let mut indivisible = plain_issuance(FOO, 10);
        indivisible.divisible = false;
        let record = sim.issue(&alice(), &indivisible);
        assert_eq!(record.status.to_string(), "invalid: cannot change divisibility");
    }

    // =============================================================================
    // COMPOSE → PARSE
    // =============================================================================

    #[test]
    fn test_composed_messages_confirm() {
        let mut sim = make_simulator(320_000);

        let request = IssuanceRequest::new(alice(), "FOO", 5_000, true).with_description("genesis");
        let composed = sim.service().compose_issuance(&request).unwrap();
        sim.mine_block();
        match sim.submit_composed(composed) {
            ParseOutcome::Issuance(record) => {
                assert!(record.status.is_valid(), "{}", record.status);
                assert_eq!(record.description.as_deref(), Some("genesis"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let request = SendRequest::new(alice(), bob(), "FOO", 1_234).with_published_balance(5_000);
        let composed = sim.service().compose_send(&request).unwrap();
        sim.mine_block();
        assert!(matches!(
            sim.submit_composed(composed),
            ParseOutcome::Send(record) if record.status.is_valid()
        ));
        assert_eq!(sim.balance(&bob(), "FOO"), 1_234);
    }

    #[test]
    fn test_stale_published_balance_fails_after_other_send() {
        let mut sim = make_simulator(320_000);
        sim.issue(&alice(), &plain_issuance(FOO, 100));

        let request = SendRequest::new(alice(), bob(), "FOO", 10).with_published_balance(100);
        let composed = sim.service().compose_send(&request).unwrap();

        // Another send confirms first and changes the balance.
        sim.send(&alice(), &carol(), FOO, 1);
        match sim.submit_composed(composed) {
            ParseOutcome::Send(record) => {
                assert_eq!(record.status.to_string(), "invalid: incorrect published balance")
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(sim.balance(&bob(), "FOO"), 0);
    }

    // =============================================================================
    // TEST NETWORK
    // =============================================================================

    #[test]
    fn test_testnet_history_charges_every_issuance() {
        let mut sim = ChainSimulator::new(Network::Testnet, 10)
            .register(FOO, "FOO")
            .fund(&alice(), "XCP", UNIT);

        let record = sim.issue(&alice(), &plain_issuance(FOO, 0));
        assert!(record.status.is_valid());
        assert_eq!(record.fee_paid, UNIT / 2);

        let record = sim.issue(&alice(), &plain_issuance(FOO, 10));
        assert!(record.status.is_valid());
        assert_eq!(record.fee_paid, UNIT / 2);
        assert_eq!(sim.balance(&alice(), "XCP"), 0);

        let record = sim.issue(&alice(), &plain_issuance(FOO, 10));
        assert_eq!(record.status.to_string(), "invalid: insufficient funds");
        assert_eq!(sim.ledger().supply("FOO"), 10);
    }
}
