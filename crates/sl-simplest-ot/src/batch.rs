//! Batched wire-label transfer.
//!
//! Runs one full OT session per label pair over a blocking
//! [`Transport`], in strict positional order: the curve identifier once
//! per connection, then `A.x A.y / B.x B.y / e0 e1` for every pair.
//! Labels never travel in the clear; an observer of the channel sees only
//! point coordinates and masked pairs.

use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument, trace};

use sl_channel::Transport;

use crate::simplest_ot::{PointMsg, ReceiverConfig, SenderConfig, SimplestOTError};

/// A pair of secret labels, one of which the receiver learns.
pub type LabelPair = (Vec<u8>, Vec<u8>);

/// Sending side of a batched label transfer.
pub struct BatchSender<T> {
    config: SenderConfig,
    channel: T,
}

impl<T: Transport> BatchSender<T> {
    /// Announce the configured group on a fresh connection.
    pub fn new(config: SenderConfig, mut channel: T) -> Result<Self, SimplestOTError> {
        channel.send_bytes(config.curve_id().as_bytes())?;
        channel.flush()?;

        Ok(BatchSender { config, channel })
    }

    /// Transfer `pairs`, one OT session per pair, in order.
    #[instrument(level = "debug", skip_all, fields(pairs = pairs.len()))]
    pub fn send<R: CryptoRng + RngCore>(
        &mut self,
        pairs: &[LabelPair],
        rng: &mut R,
    ) -> Result<(), SimplestOTError> {
        for (i, (m0, m1)) in pairs.iter().enumerate() {
            let mut session = self.config.start_transfer(m0, m1, rng)?;

            let point_a = session.point_a()?;
            self.channel.send_bytes(&point_a.x)?;
            self.channel.send_bytes(&point_a.y)?;
            self.channel.flush()?;
            trace!(i, "sent A");

            let bx = self.channel.recv_bytes()?;
            let by = self.channel.recv_bytes()?;
            session.receive_b(&PointMsg::from_bytes(&bx, &by)?)?;
            trace!(i, "processed B");

            let masked = session.masked_pair()?;
            self.channel.send_bytes(&masked.e0)?;
            self.channel.send_bytes(&masked.e1)?;
            self.channel.flush()?;
            trace!(i, "sent masked pair");
        }

        Ok(())
    }
}

/// Receiving side of a batched label transfer.
pub struct BatchReceiver<T> {
    config: ReceiverConfig,
    channel: T,
}

impl<T: Transport> BatchReceiver<T> {
    /// Read the peer's group announcement.
    ///
    /// Both parties must agree on one group before any point material
    /// moves; a disagreement is fatal for the connection.
    pub fn new(config: ReceiverConfig, mut channel: T) -> Result<Self, SimplestOTError> {
        let announced = channel.recv_bytes()?;

        if announced != config.curve_id().as_bytes() {
            return Err(SimplestOTError::CurveMismatch {
                peer: String::from_utf8_lossy(&announced).into_owned(),
                ours: config.curve_id().into(),
            });
        }
        debug!(curve = config.curve_id(), "negotiated group");

        Ok(BatchReceiver { config, channel })
    }

    /// Recover one label per selection bit, in order.
    #[instrument(level = "debug", skip_all, fields(bits = bits.len()))]
    pub fn receive<R: CryptoRng + RngCore>(
        &mut self,
        bits: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Vec<u8>>, SimplestOTError> {
        let mut labels = Vec::with_capacity(bits.len());

        for (i, &bit) in bits.iter().enumerate() {
            let mut session = self.config.start_transfer(bit, rng)?;

            let ax = self.channel.recv_bytes()?;
            let ay = self.channel.recv_bytes()?;
            session.receive_a(&PointMsg::from_bytes(&ax, &ay)?)?;

            let point_b = session.point_b()?;
            self.channel.send_bytes(&point_b.x)?;
            self.channel.send_bytes(&point_b.y)?;
            self.channel.flush()?;
            trace!(i, "sent B");

            let e0 = self.channel.recv_bytes()?;
            let e1 = self.channel.recv_bytes()?;
            labels.push(session.receive_e(&e0, &e1)?);
            trace!(i, "recovered label");
        }

        Ok(labels)
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use sl_channel::SimplePair;

    use super::*;

    #[test]
    fn batch_preserves_order() {
        let pairs: Vec<LabelPair> = (0..5u8)
            .map(|i| (vec![i; 16], vec![i | 0x80; 16]))
            .collect();
        let bits = [false, true, true, false, true];

        let expected: Vec<Vec<u8>> = pairs
            .iter()
            .zip(bits)
            .map(|((m0, m1), bit)| if bit { m1.clone() } else { m0.clone() })
            .collect();

        let (left, right) = SimplePair::connect();

        let sender_pairs = pairs.clone();
        let handle = thread::spawn(move || {
            let mut sender = BatchSender::new(SenderConfig::new(), left).unwrap();
            sender.send(&sender_pairs, &mut rand::thread_rng()).unwrap();
        });

        let mut receiver = BatchReceiver::new(ReceiverConfig::new(), right).unwrap();
        let labels = receiver.receive(&bits, &mut rand::thread_rng()).unwrap();

        handle.join().unwrap();

        assert_eq!(labels, expected);
    }

    #[test]
    fn rejects_unknown_curve() {
        let (mut left, right) = SimplePair::connect();

        left.send_bytes(b"P-256").unwrap();

        let result = BatchReceiver::new(ReceiverConfig::new(), right);
        assert!(matches!(
            result,
            Err(SimplestOTError::CurveMismatch { .. })
        ));
    }

    #[test]
    fn surfaces_transport_failure() {
        let (left, right) = SimplePair::connect();
        drop(left);

        let result = BatchReceiver::new(ReceiverConfig::new(), right);
        assert!(matches!(result, Err(SimplestOTError::Transport(_))));
    }
}
