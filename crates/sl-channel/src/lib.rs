// Copyright (c) Silence Laboratories Pte. Ltd. All Rights Reserved.
// This software is licensed under the Silence Laboratories License Agreement.

//! Blocking two-party byte channels.
//!
//! A [`Transport`] moves opaque, length-delimited frames between exactly two
//! parties. Protocol crates stay agnostic of the underlying pipe: anything
//! that can ship a frame and report failure can back a session.

use thiserror::Error;

mod pair;

pub use pair::SimplePair;

/// Channel failures.
///
/// Every failure is fatal for the protocol session using the channel. The
/// channel owner decides about timeouts and reconnects; by the time an error
/// reaches a protocol, that session is over.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer hung up or the channel is no longer usable
    #[error("channel closed by peer")]
    Closed,

    /// An I/O failure reported by the underlying stream
    #[error("channel i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// A bidirectional, length-delimited byte channel between two parties.
///
/// Implementations own the framing: `send_bytes` transmits one frame,
/// `recv_bytes` blocks until one full frame is available. `flush` returns
/// only after buffered frames have been handed off to the peer side.
pub trait Transport {
    /// Send a single frame.
    fn send_bytes(&mut self, buf: &[u8]) -> Result<(), TransportError>;

    /// Block until the next frame arrives.
    fn recv_bytes(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Deliver any buffered frames before returning.
    fn flush(&mut self) -> Result<(), TransportError>;
}
