#![allow(missing_docs)]

//! Property tests: whatever order settlements and registrations arrive in,
//! the first settlement decides the outcome and every registration is
//! delivered exactly once, in order.

mod common;

use common::queue;
use deferred::{DeferredValue, Outcome, State};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Fulfil(u8),
    Reject(u8),
    Register,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Fulfil),
        any::<u8>().prop_map(Op::Reject),
        Just(Op::Register),
    ]
}

proptest! {
    #[test]
    fn first_settlement_decides_and_every_registration_fires_once(
        ops in proptest::collection::vec(op(), 0..24)
    ) {
        let q = queue();
        let mut handles = None;
        let value: DeferredValue<u8, u8> =
            DeferredValue::new(q.clone(), |ok, err| handles = Some((ok, err)));
        let (ok, err) = handles.unwrap();

        let log: Arc<Mutex<Vec<(usize, Outcome<u8, u8>)>>> = Arc::default();
        let mut registrations = 0_usize;
        let mut first = None;
        for op in &ops {
            match *op {
                Op::Fulfil(v) => {
                    first.get_or_insert(Outcome::Fulfilled(v));
                    ok.settle(v);
                }
                Op::Reject(e) => {
                    first.get_or_insert(Outcome::Rejected(e));
                    err.settle(e);
                }
                Op::Register => {
                    let n = registrations;
                    registrations += 1;
                    let on_ok = Arc::clone(&log);
                    let on_err = Arc::clone(&log);
                    value.then(
                        move |v| on_ok.lock().push((n, Outcome::Fulfilled(v))),
                        move |e| on_err.lock().push((n, Outcome::Rejected(e))),
                    );
                }
            }
        }

        // Nothing is delivered before the queue gets a turn.
        prop_assert!(log.lock().is_empty());
        q.run_until_idle();

        prop_assert_eq!(value.outcome(), first.clone());
        let delivered = log.lock().clone();
        match first {
            None => {
                prop_assert_eq!(value.state(), State::Pending);
                prop_assert!(delivered.is_empty());
                prop_assert_eq!(value.pending_reactions(), registrations);
            }
            Some(outcome) => {
                let expected: Vec<_> = (0..registrations).map(|n| (n, outcome.clone())).collect();
                prop_assert_eq!(delivered, expected);
                prop_assert_eq!(value.pending_reactions(), 0);
            }
        }
    }
}
