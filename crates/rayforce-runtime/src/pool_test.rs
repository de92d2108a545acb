// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn running_an_empty_batch_returns_no_results() {
    let pool = Pool::new(2, 16);
    assert_eq!(pool.run(Vec::new()).len(), 0);
}

#[test]
fn results_come_back_ordered_by_task_id_not_completion_order() {
    let pool = Pool::new(4, 64);
    let tasks = (0..20)
        .map(|i| Task::new(i, move || Value::I64(i as i64 * 2)))
        .collect();
    let results = pool.run(tasks);
    assert_eq!(results.len(), 20);
    for (i, value) in results.into_iter().enumerate() {
        match value {
            Value::I64(n) => assert_eq!(n, i as i64 * 2),
            other => panic!("expected I64, got {other:?}"),
        }
    }
}

#[test]
fn every_task_in_a_batch_runs_exactly_once() {
    let pool = Pool::new(8, 256);
    let counter = Arc::new(AtomicUsize::new(0));
    let tasks = (0..200)
        .map(|i| {
            let counter = Arc::clone(&counter);
            Task::new(i, move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Value::Null
            })
        })
        .collect();
    pool.run(tasks);
    assert_eq!(counter.load(Ordering::SeqCst), 200);
}

#[test]
fn repeated_batches_on_the_same_pool_all_complete() {
    let pool = Pool::new(3, 32);
    for batch in 0..5 {
        let tasks = (0..10).map(|i| Task::new(i, move || Value::I64(batch * 10 + i as i64))).collect();
        let results = pool.run(tasks);
        assert_eq!(results.len(), 10);
    }
}

#[test]
fn shutdown_joins_every_executor_thread() {
    let mut pool = Pool::new(4, 16);
    assert_eq!(pool.num_executors(), 4);
    pool.shutdown();
    assert_eq!(pool.executors.len(), 0);
}
