//! Ledger-wide concurrency properties
//!
//! These tests drive a shared `Ledger` from many OS threads at once and
//! check the guarantees that must hold whatever the interleaving.

use account_ledger::{InvalidRequest, Ledger, LedgerConfig, LedgerError};
use rstest::rstest;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

fn shared_ledger(accounts: &[(&str, i64)]) -> Arc<Ledger> {
    let ledger = Arc::new(Ledger::new(LedgerConfig::default()));
    for (id, balance) in accounts {
        ledger.create_account(id, Some(*balance)).unwrap();
    }
    ledger
}

fn balance(ledger: &Ledger, id: &str) -> i64 {
    ledger.get_account(id).unwrap().balance()
}

#[test]
fn test_concurrent_transfers_conserve_total() {
    let ids = ["a", "b", "c", "d", "e"];
    let ledger = shared_ledger(&ids.map(|id| (id, 1_000)));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..200 {
                    let from = ids[(worker + i) % ids.len()];
                    let to = ids[(worker + 2 * i + 1) % ids.len()];
                    let amount = (i % 50 + 1) as i64;
                    match ledger.transfer(from, to, amount) {
                        Ok(())
                        | Err(LedgerError::InsufficientFunds { .. })
                        | Err(LedgerError::InvalidRequest(InvalidRequest::SameAccountTransfer(_))) => {}
                        Err(e) => panic!("unexpected transfer failure: {}", e),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(ledger.total_balance(), 5_000);
    assert!(ledger.list_accounts().iter().all(|a| a.balance() >= 0));
    assert!(ids.iter().all(|id| !ledger.locks().is_held(id)));
}

#[rstest]
#[case::few(4)]
#[case::many(32)]
fn test_at_most_one_concurrent_creation(#[case] creators: i64) {
    let ledger = shared_ledger(&[]);
    let barrier = Arc::new(Barrier::new(creators as usize));

    let handles: Vec<_> = (1..=creators)
        .map(|requested| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (requested, ledger.create_account("shared", Some(requested)))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<i64> = results
        .iter()
        .filter(|(_, result)| result.is_ok())
        .map(|(requested, _)| *requested)
        .collect();

    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter(|(_, result)| result.is_err())
        .all(|(_, result)| *result == Err(LedgerError::already_exists("shared"))));
    assert_eq!(balance(&ledger, "shared"), winners[0]);
}

#[test]
fn test_opposing_transfers_never_deadlock() {
    // Any circular wait would surface as a LockTimeout instead of hanging
    let ledger = Arc::new(Ledger::new(LedgerConfig::with_lock_timeout(
        Duration::from_secs(2),
    )));
    ledger.create_account("x", Some(10_000)).unwrap();
    ledger.create_account("y", Some(10_000)).unwrap();
    let barrier = Arc::new(Barrier::new(2));

    let spawn = |from: &'static str, to: &'static str| {
        let ledger = Arc::clone(&ledger);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            (0..1_000)
                .map(|_| ledger.transfer(from, to, 1))
                .filter(|result| result.is_err())
                .count()
        })
    };
    let forward = spawn("x", "y");
    let backward = spawn("y", "x");

    assert_eq!(forward.join().unwrap(), 0);
    assert_eq!(backward.join().unwrap(), 0);
    assert_eq!(balance(&ledger, "x"), 10_000);
    assert_eq!(balance(&ledger, "y"), 10_000);
}

#[test]
fn test_same_account_transfer_is_rejected_without_locking() {
    let ledger = shared_ledger(&[("x", 100)]);

    let result = ledger.transfer("x", "x", 10);

    assert_eq!(
        result,
        Err(LedgerError::InvalidRequest(InvalidRequest::SameAccountTransfer(
            "x".to_string()
        )))
    );
    assert_eq!(balance(&ledger, "x"), 100);
    assert!(!ledger.locks().is_held("x"));
}

#[test]
fn test_insufficient_funds_leaves_state_untouched() {
    let ledger = shared_ledger(&[("from", 100), ("to", 0)]);

    let result = ledger.transfer("from", "to", 150);

    assert_eq!(result, Err(LedgerError::insufficient_funds("from", 100, 150)));
    assert_eq!(balance(&ledger, "from"), 100);
    assert_eq!(balance(&ledger, "to"), 0);
}

#[test]
fn test_transfer_then_duplicate_creation() {
    let ledger = shared_ledger(&[("a", 100), ("b", 100)]);

    ledger.transfer("a", "b", 30).unwrap();
    assert_eq!(balance(&ledger, "a"), 70);
    assert_eq!(balance(&ledger, "b"), 130);

    assert_eq!(
        ledger.create_account("a", Some(50)),
        Err(LedgerError::already_exists("a"))
    );
    assert_eq!(balance(&ledger, "a"), 70);
}

#[test]
fn test_reads_proceed_while_an_account_is_locked() {
    let ledger = shared_ledger(&[("a", 5)]);
    let _held = ledger.locks().lock("a", Duration::from_millis(10)).unwrap();

    assert_eq!(balance(&ledger, "a"), 5);
    assert_eq!(ledger.list_accounts().len(), 1);
}
