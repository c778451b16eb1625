#![allow(missing_docs)]

//! Deferred values settled from other threads and delivered on the worker
//! scheduler.

mod common;

use deferred::{DeferredValue, Outcome, Reaction, State, WorkerConfig, WorkerScheduler};
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

fn sender<V: Send + 'static>(tx: &mpsc::Sender<(&'static str, V)>, label: &'static str) -> Reaction<V> {
    let tx = tx.clone();
    Box::new(move |value: V| {
        let _ = tx.send((label, value));
    })
}

#[test]
fn settlement_from_producer_thread_delivers_in_order() {
    common::init_test_logging();
    deferred::test_phase!("settlement_from_producer_thread_delivers_in_order");

    let worker = WorkerScheduler::start(WorkerConfig::new().with_thread_name("reactions")).unwrap();
    let (go_tx, go_rx) = mpsc::channel::<()>();
    let value: DeferredValue<u64, String> = DeferredValue::new(worker.clone(), move |ok, _| {
        thread::spawn(move || {
            go_rx.recv_timeout(WAIT).unwrap();
            ok.settle(42);
        });
    });

    let (tx, rx) = mpsc::channel::<(&'static str, u64)>();
    value.on_fulfilled(sender(&tx, "A"));
    value.on_fulfilled(sender(&tx, "B"));
    value.on_fulfilled(sender(&tx, "C"));
    assert!(value.is_pending());

    go_tx.send(()).unwrap();
    let delivered: Vec<_> = (0..3).map(|_| rx.recv_timeout(WAIT).unwrap()).collect();
    deferred::assert_with_log!(
        delivered == vec![("A", 42), ("B", 42), ("C", 42)],
        "worker delivers in registration order",
        vec![("A", 42), ("B", 42), ("C", 42)],
        delivered
    );
    assert_eq!(value.state(), State::Fulfilled);
    worker.shutdown();
    deferred::test_complete!("settlement_from_producer_thread_delivers_in_order");
}

#[test]
fn racing_settlements_pick_exactly_one_outcome() {
    common::init_test_logging();
    let worker = WorkerScheduler::start_default().unwrap();

    for _ in 0..20 {
        let mut handles = None;
        let value: DeferredValue<u32, u32> =
            DeferredValue::new(worker.clone(), |ok, err| handles = Some((ok, err)));
        let (ok, err) = handles.unwrap();

        let (tx, rx) = mpsc::channel::<Outcome<u32, u32>>();
        value.then(
            {
                let tx = tx.clone();
                move |v| tx.send(Outcome::Fulfilled(v)).unwrap()
            },
            move |e| tx.send(Outcome::Rejected(e)).unwrap(),
        );

        let barrier = Arc::new(Barrier::new(2));
        let b = Arc::clone(&barrier);
        let fulfiller = thread::spawn(move || {
            b.wait();
            ok.settle(1);
        });
        barrier.wait();
        err.settle(2);
        fulfiller.join().unwrap();

        let delivered = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(Some(delivered), value.outcome());
        // The losing side was dropped with the registration; nothing else arrives.
        assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
    }
    worker.shutdown();
}

#[test]
fn concurrent_registrations_are_each_delivered_once() {
    common::init_test_logging();
    let worker = WorkerScheduler::start_default().unwrap();
    let mut fulfill = None;
    let value: DeferredValue<u8, ()> =
        DeferredValue::new(worker.clone(), |ok, _| fulfill = Some(ok));

    let (tx, rx) = mpsc::channel::<(&'static str, u8)>();
    let registrars: Vec<_> = (0..4)
        .map(|_| {
            let value = value.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    value.on_fulfilled(sender(&tx, "r"));
                }
            })
        })
        .collect();
    fulfill.unwrap().settle(9);
    for registrar in registrars {
        registrar.join().unwrap();
    }
    drop(tx);

    let delivered: Vec<_> = rx.iter().take(100).collect();
    assert_eq!(delivered.len(), 100);
    assert!(delivered.iter().all(|&(_, v)| v == 9));
    worker.shutdown();
}

#[test]
fn panicking_reaction_does_not_block_later_reactions() {
    common::init_test_logging();
    let worker = WorkerScheduler::start_default().unwrap();
    let value: DeferredValue<i32, String> = DeferredValue::fulfilled(worker.clone(), 3);

    let (tx, rx) = mpsc::channel::<(&'static str, i32)>();
    value.on_fulfilled(|_| panic!("reaction failed"));
    value.on_fulfilled(sender(&tx, "after"));

    assert_eq!(rx.recv_timeout(WAIT).unwrap(), ("after", 3));
    worker.shutdown();
    assert_eq!(worker.executed(), 2);
}
