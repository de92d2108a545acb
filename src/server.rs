// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The TCP listener (§6.2, §4.12): one reactor thread owning the
//! multiplexer, the timers, and every connected socket (§5 "one reactor
//! thread... owns the multiplexer, the timers, all sockets, and the root
//! env"); each inbound sync/async call hands its evaluation to the worker
//! pool and the result flows back out through the connection's send queue.

use mio::net::{TcpListener, TcpStream};
use mio::{Interest, Token};
use rayforce_core::RayError;
use rayforce_runtime::{Connection, Frame, Pool, Reactor, ReactorEvent, Task, Timers, PROTOCOL_VERSION};
use rayforce_storage::MsgType;
use rayforce_value::{ErrorValue, Value};
use rayforce_vm::{Environment, Evaluator};
use std::collections::HashMap;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

struct Peer {
    stream: TcpStream,
    conn: Connection,
}

/// Blocks the calling thread running the reactor loop until the process
/// receives a shutdown request through the returned waker (installed by the
/// caller, e.g. a SIGINT handler) or an unrecoverable IO error occurs.
pub fn run(port: u16, global: Environment, pool: &Pool, timers: &mut Timers) -> Result<(), RayError> {
    let mut reactor = Reactor::new(1024).map_err(|e| RayError::new(rayforce_core::ErrorKind::Io, format!("reactor init: {e}")))?;
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    let mut listener = TcpListener::bind(addr).map_err(|e| RayError::new(rayforce_core::ErrorKind::Io, format!("bind {addr}: {e}")))?;
    let listener_token = reactor.register(&mut listener, Interest::READABLE)?;

    let mut peers: HashMap<Token, Peer> = HashMap::new();

    loop {
        if reactor.is_shutdown() {
            return Ok(());
        }
        let timeout = timers.fire_due(now_millis());
        let mut closed = Vec::new();
        let mut readable = Vec::new();
        let mut writable = Vec::new();

        reactor.run_once(timeout.or(Some(Duration::from_millis(50))), |token, event| {
            if token == listener_token {
                if event == ReactorEvent::Readable {
                    readable.push(token);
                }
                return;
            }
            match event {
                ReactorEvent::Readable => readable.push(token),
                ReactorEvent::Writable => writable.push(token),
                ReactorEvent::Closed => closed.push(token),
            }
        })?;

        if readable.contains(&listener_token) {
            accept_all(&mut listener, &mut reactor, &mut peers);
        }

        for token in readable {
            if token == listener_token {
                continue;
            }
            service_readable(token, &mut peers, &global, pool);
        }

        for token in writable {
            service_writable(token, &mut peers);
        }

        for token in closed {
            if let Some(mut peer) = peers.remove(&token) {
                let _ = reactor.deregister(&mut peer.stream);
            }
        }
    }
}

fn accept_all(listener: &mut TcpListener, reactor: &mut Reactor, peers: &mut HashMap<Token, Peer>) {
    loop {
        match listener.accept() {
            Ok((mut stream, addr)) => {
                debug!(%addr, "accepted ipc connection");
                if let Err(e) = stream.write_all(&[PROTOCOL_VERSION, 0x00]) {
                    warn!(%addr, error = %e, "handshake write failed");
                    continue;
                }
                match reactor.register(&mut stream, Interest::READABLE) {
                    Ok(token) => {
                        peers.insert(token, Peer { stream, conn: Connection::new() });
                    }
                    Err(e) => warn!(%addr, error = %e, "registering connection failed"),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return,
            Err(e) => {
                warn!(error = %e, "accept failed");
                return;
            }
        }
    }
}

fn service_readable(token: Token, peers: &mut HashMap<Token, Peer>, global: &Environment, pool: &Pool) {
    let Some(peer) = peers.get_mut(&token) else { return };
    let frames = match peer.conn.recv(&mut peer.stream) {
        Ok(frames) => frames,
        Err(e) => {
            warn!(error = %e, "ipc recv failed");
            Vec::new()
        }
    };
    for frame in frames {
        dispatch(peer, frame, global, pool);
    }
}

fn dispatch(peer: &mut Peer, frame: Frame, global: &Environment, pool: &Pool) {
    let env = global.clone();
    let term = frame.value;
    let results = pool.run(vec![Task::new(0, move || {
        let mut evaluator = Evaluator::new(env);
        match evaluator.eval(&term) {
            Ok(value) => value,
            Err(e) => Value::Error(ErrorValue::new(e)),
        }
    })]);
    let Some(result) = results.into_iter().next() else {
        return;
    };
    match frame.msgtype {
        MsgType::Sync => {
            if let Err(e) = peer.conn.enqueue(MsgType::Response, &result) {
                warn!(error = %e, "queuing ipc response failed");
            }
        }
        MsgType::Async => {
            if let Value::Error(err) = &result {
                warn!(error = %err.inner(), "async ipc call failed");
            }
        }
        MsgType::Response => {
            warn!("received an unexpected standalone response frame");
        }
    }
}

fn service_writable(token: Token, peers: &mut HashMap<Token, Peer>) {
    let Some(peer) = peers.get_mut(&token) else { return };
    if let Err(e) = peer.conn.send(&mut peer.stream) {
        warn!(error = %e, "ipc send failed");
    }
}

fn now_millis() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as i64).unwrap_or(0)
}
