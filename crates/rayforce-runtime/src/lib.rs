// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The reactor, executor pool, and IPC plumbing that turn a bare
//! [`rayforce_vm::Evaluator`] into a running server (§4.10-§4.13).

mod ipc;
mod mpmc;
mod pool;
mod reactor;
mod timer;

pub use ipc::{Connection, Frame, PROTOCOL_VERSION, TX_QUEUE_CAPACITY};
pub use mpmc::{Mpmc, QueueFull};
pub use pool::{Pool, Task};
pub use reactor::{Reactor, ReactorEvent, CONTROL_TOKEN};
pub use timer::{Timers, REPEAT_FOREVER};
