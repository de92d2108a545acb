// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The event loop (§4.11), transcribed from `original_source/core/epoll.c`'s
//! `poll_init`/`poll_register`/`poll_deregister`/`poll_run`. `mio` stands in
//! for the raw `epoll(7)`/`kqueue(2)`/IOCP calls the original dispatches on
//! by platform (`poll.c`'s `#if defined(__linux__) ... #elif __APPLE__ ...`)
//! -- it's the same cross-platform multiplexer wrapper, just off the shelf.
//!
//! `sigint_handler` writes to an `eventfd` to wake the blocked
//! `epoll_wait`; the signal-safety constraints that motivate that pattern
//! (a signal handler can't safely touch a `Mutex` or allocate) don't carry
//! over to the control-pipe approach here -- `Reactor::control_waker` is a
//! plain [`mio::Waker`], parked with the rest of the registry, woken from
//! any thread (typically a `ctrlc`-style SIGINT handler installed by the
//! binary crate) without needing a raw `eventfd`.

use mio::event::Source;
use mio::{Events, Interest, Poll, Token};
use rayforce_core::{ErrorKind, RayError};
use std::io;
use std::time::Duration;

/// Token reserved for the shutdown waker; every other registration gets a
/// token strictly greater than this, mirroring `SELECTOR_ID_OFFSET`'s
/// "shift past the reserved low ids" trick.
pub const CONTROL_TOKEN: Token = Token(0);

/// What happened to a registered source during one `run` iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactorEvent {
    Readable,
    Writable,
    /// Hangup or error; the original tears the selector down unconditionally
    /// on `EPOLLERR`/`EPOLLHUP` rather than trying to recover it.
    Closed,
}

/// The event loop itself. Owns the OS-level multiplexer and a monotonic
/// token allocator; callers register their own I/O sources and get a
/// `Token` back to key their own per-connection state by (mirroring
/// `selector_t` living behind `poll_t`'s freelist in the original, except
/// ownership of that per-connection state stays with the caller here).
pub struct Reactor {
    poll: Poll,
    events: Events,
    next_token: usize,
    shutdown: bool,
}

impl Reactor {
    pub fn new(max_events: usize) -> io::Result<Self> {
        let poll = Poll::new()?;
        Ok(Self { poll, events: Events::with_capacity(max_events), next_token: CONTROL_TOKEN.0 + 1, shutdown: false })
    }

    /// Builds a [`mio::Waker`] that, once woken from any thread, causes the
    /// next [`Reactor::run`] iteration to observe
    /// [`ReactorEvent`] on [`CONTROL_TOKEN`].
    pub fn waker(&self) -> io::Result<mio::Waker> {
        mio::Waker::new(self.poll.registry(), CONTROL_TOKEN)
    }

    /// Registers `source` for the given interest set and returns the token
    /// it was assigned.
    pub fn register(&mut self, source: &mut impl Source, interest: Interest) -> Result<Token, RayError> {
        let token = Token(self.next_token);
        self.next_token += 1;
        self.poll
            .registry()
            .register(source, token, interest)
            .map_err(|e| RayError::new(ErrorKind::Io, format!("poll_register: {e}")))?;
        Ok(token)
    }

    pub fn deregister(&mut self, source: &mut impl Source) -> Result<(), RayError> {
        self.poll.registry().deregister(source).map_err(|e| RayError::new(ErrorKind::Io, format!("poll_deregister: {e}")))
    }

    pub fn request_shutdown(&mut self) {
        self.shutdown = true;
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Blocks until at least one registered source is ready (or `timeout`
    /// elapses), then calls `on_event` once per ready token, mirroring
    /// `poll_run`'s inner `for (n = 0; n < nfds; n++)` dispatch loop.
    /// `timeout = None` blocks indefinitely, matching `TIMEOUT_INFINITY`.
    pub fn run_once(&mut self, timeout: Option<Duration>, mut on_event: impl FnMut(Token, ReactorEvent)) -> Result<(), RayError> {
        loop {
            match self.poll.poll(&mut self.events, timeout) {
                Ok(()) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(RayError::new(ErrorKind::Io, format!("poll_run: {e}"))),
            }
        }

        for event in self.events.iter() {
            let token = event.token();
            if token == CONTROL_TOKEN {
                self.shutdown = true;
                continue;
            }
            if event.is_error() || event.is_read_closed() || event.is_write_closed() {
                on_event(token, ReactorEvent::Closed);
                continue;
            }
            if event.is_readable() {
                on_event(token, ReactorEvent::Readable);
            }
            if event.is_writable() {
                on_event(token, ReactorEvent::Writable);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod reactor_test;
