// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The fixed executor pool (§4.10), transcribed from
//! `original_source/core/pool.c`'s `pool_create`/`pool_prepare`/
//! `pool_add_task`/`pool_run`/`executor_run`.
//!
//! The C engine represents a task as a raw function pointer plus an
//! `argc`/`argv[8]` array and dispatches through a giant arity switch
//! in `pool_call_task_fn`. A Rust closure already captures whatever
//! arguments it needs, so [`Task`] collapses all of that into a single
//! `Box<dyn FnOnce() -> Value + Send>` -- the switch has no counterpart
//! here, which is a simplification of the original's plumbing rather
//! than a change in behavior.
//!
//! The original's wake-up protocol is a single `pthread_cond_wait` per
//! task batch; reused verbatim across repeated `prepare`/`run` cycles
//! it is vulnerable to a lost wake-up if an executor is late to wait
//! for a signal that already fired. [`PoolState::generation`] closes
//! that race: an executor only stops waiting once it has observed a
//! generation strictly newer than the last batch it drained, so a
//! signal that arrives before it starts waiting is never missed.

use rayforce_arena::Arena;
use rayforce_value::Value;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use crate::mpmc::Mpmc;

/// One unit of work submitted to the pool. `id` orders the result
/// alongside its siblings once every task in a batch has completed.
pub struct Task {
    pub id: u64,
    pub work: Box<dyn FnOnce() -> Value + Send>,
}

impl Task {
    pub fn new(id: u64, work: impl FnOnce() -> Value + Send + 'static) -> Self {
        Self { id, work: Box::new(work) }
    }
}

struct PoolState {
    /// Bumped once per `run`; an executor stops waiting once it has
    /// seen a generation newer than the one it last drained.
    generation: u64,
    task_count: usize,
    done_count: usize,
    shutdown: bool,
}

struct Shared {
    task_queue: Mpmc<Task>,
    result_queue: Mpmc<(u64, Value)>,
    state: Mutex<PoolState>,
    run_cv: Condvar,
    done_cv: Condvar,
    /// The arena executors borrow startup capacity from and merge
    /// their leftover blocks back into (`Arena::borrow`/`merge`,
    /// `pool_prepare`'s heap handout). Each executor still owns its
    /// own thread-local [`rayforce_arena`] arena day to day; this is
    /// only the shared lender.
    prewarm: Mutex<Arena>,
}

/// A fixed set of executor threads that run batches of [`Task`]s to
/// completion, in parallel, and hand back their results ordered by id.
pub struct Pool {
    shared: Arc<Shared>,
    executors: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawns `num_executors` executor threads, each backed by a queue
    /// sized to hold `queue_size` in-flight tasks.
    #[must_use]
    pub fn new(num_executors: usize, queue_size: usize) -> Self {
        let shared = Arc::new(Shared {
            task_queue: Mpmc::new(queue_size),
            result_queue: Mpmc::new(queue_size),
            state: Mutex::new(PoolState { generation: 0, task_count: 0, done_count: 0, shutdown: false }),
            run_cv: Condvar::new(),
            done_cv: Condvar::new(),
            prewarm: Mutex::new(Arena::new()),
        });
        let executors = (0..num_executors.max(1))
            .map(|idx| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("rayforce-executor-{idx}"))
                    .spawn(move || executor_run(&shared))
                    .expect("spawn executor thread")
            })
            .collect();
        Self { shared, executors }
    }

    #[must_use]
    pub fn num_executors(&self) -> usize {
        self.executors.len()
    }

    /// Submits `tasks` and blocks until every one has run, returning
    /// their results ordered by [`Task::id`]. The calling thread drains
    /// the task queue cooperatively alongside the executors rather than
    /// only waiting on them (§4.10).
    pub fn run(&self, tasks: Vec<Task>) -> Vec<Value> {
        let task_count = tasks.len();
        if task_count == 0 {
            return Vec::new();
        }

        {
            let mut state = self.shared.state.lock().expect("pool state poisoned");
            state.generation += 1;
            state.task_count = task_count;
            state.done_count = 0;
        }
        for task in tasks {
            self.shared.task_queue.push(task).expect("task queue sized for the submitted batch");
        }
        self.shared.run_cv.notify_all();

        rayforce_arena::enter_parallel();
        self.drain_until_done();
        rayforce_arena::leave_parallel();

        let mut results = Vec::with_capacity(task_count);
        while results.len() < task_count {
            if let Some(pair) = self.shared.result_queue.pop() {
                results.push(pair);
            }
        }
        results.sort_by_key(|(id, _)| *id);
        results.into_iter().map(|(_, value)| value).collect()
    }

    /// Runs tasks on the calling thread until the whole batch is done,
    /// falling back to waiting on `done_cv` once the queue is empty but
    /// other executors are still finishing their share.
    fn drain_until_done(&self) {
        loop {
            while let Some(task) = self.shared.task_queue.pop() {
                run_task(&self.shared, task);
            }
            let state = self.shared.state.lock().expect("pool state poisoned");
            if state.done_count == state.task_count {
                return;
            }
            let (state, _) = self
                .shared
                .done_cv
                .wait_timeout(state, std::time::Duration::from_millis(1))
                .expect("pool state poisoned");
            if state.done_count == state.task_count {
                return;
            }
            drop(state);
        }
    }

    /// Signals every executor to exit and joins its thread. Blocks
    /// until all have stopped.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.state.lock().expect("pool state poisoned");
            state.shutdown = true;
        }
        self.shared.run_cv.notify_all();
        for handle in self.executors.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_task(shared: &Shared, task: Task) {
    let Task { id, work } = task;
    {
        let mut prewarm = shared.prewarm.lock().expect("prewarm arena poisoned");
        rayforce_arena::with_arena(|mine| prewarm.borrow(mine));
    }
    let value = work();
    {
        let mut prewarm = shared.prewarm.lock().expect("prewarm arena poisoned");
        rayforce_arena::with_arena(|mine| prewarm.merge(mine));
    }
    shared.result_queue.push((id, value)).expect("result queue sized for the submitted batch");
    let mut state = shared.state.lock().expect("pool state poisoned");
    state.done_count += 1;
    if state.done_count == state.task_count {
        shared.done_cv.notify_all();
    }
}

fn executor_run(shared: &Arc<Shared>) {
    let mut seen_generation = 0;
    loop {
        let mut state = shared.state.lock().expect("pool state poisoned");
        while state.generation == seen_generation && !state.shutdown {
            state = shared.run_cv.wait(state).expect("pool state poisoned");
        }
        if state.shutdown {
            return;
        }
        seen_generation = state.generation;
        drop(state);

        while let Some(task) = shared.task_queue.pop() {
            run_task(shared, task);
        }
    }
}

#[cfg(test)]
mod pool_test;
