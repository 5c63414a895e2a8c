//! One-transfer sender and receiver sessions.
//!
//! Message flow per transfer: sender publishes `A`, receiver answers `B`,
//! sender answers the masked pair `(e0, e1)`, receiver unmasks the selected
//! one. Each session is single use; scalars never cross sessions and never
//! travel.

mod messages;
mod sender;

mod receiver;

pub use messages::*;
pub use receiver::*;
pub use sender::*;

use thiserror::Error;

use sl_channel::TransportError;

/// Simplest OT errors.
///
/// Every variant is fatal for the transfer it occurs in: the session is
/// abandoned and the error surfaces to the caller. None of these are
/// transient, so there is no in-core retry.
#[derive(Debug, Error)]
pub enum SimplestOTError {
    /// The secure random source failed while drawing a session scalar
    #[error("secure random source failure")]
    Randomness,

    /// The two parties are configured for different groups
    #[error("curve mismatch: peer announced {peer}, expected {ours}")]
    CurveMismatch {
        /// Identifier announced by the peer
        peer: String,
        /// Identifier this party is configured with
        ours: String,
    },

    /// Received coordinates do not name a usable group element
    #[error("received coordinates are not a valid curve point")]
    InvalidPoint,

    /// A session handler was invoked outside its single-use order
    #[error("protocol message handled out of order")]
    ProtocolState,

    /// The channel failed; the enclosing transfer is aborted
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A secret does not fit under one derived mask
    #[error("secret of {len} bytes exceeds the {max} byte mask")]
    SecretTooLarge {
        /// Offending secret length
        len: usize,
        /// Mask length, the largest transferable secret
        max: usize,
    },
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use elliptic_curve::bigint::Encoding;
    use k256::{ProjectivePoint, U256};

    use crate::params::KDF_OUTPUT_LEN;
    use crate::utils::random_nonzero_scalar;

    use super::*;

    fn run_transfer(m0: &[u8], m1: &[u8], bit: bool) -> Vec<u8> {
        let mut rng = rand::thread_rng();

        let mut sender = SenderConfig::new()
            .start_transfer(m0, m1, &mut rng)
            .unwrap();
        let mut receiver = ReceiverConfig::new().start_transfer(bit, &mut rng).unwrap();

        receiver.receive_a(&sender.point_a().unwrap()).unwrap();
        sender.receive_b(&receiver.point_b().unwrap()).unwrap();

        let masked = sender.masked_pair().unwrap();
        receiver.receive_e(&masked.e0, &masked.e1).unwrap()
    }

    #[test]
    fn transfers_selected_secret() {
        for bit in [false, true] {
            for len in [1usize, 16, 32] {
                let m0 = vec![0x11; len];
                let m1 = vec![0x77; len];

                let secret = run_transfer(&m0, &m1, bit);
                assert_eq!(secret, if bit { m1 } else { m0 });
            }
        }
    }

    #[test]
    fn wire_labels_end_to_end() {
        // 16 bytes of 0x00 against 16 bytes of 0xff, selection bit 1
        let secret = run_transfer(&[0x00; 16], &[0xff; 16], true);
        assert_eq!(secret, vec![0xff; 16]);
    }

    #[test]
    fn rejects_oversized_secret() {
        let mut rng = rand::thread_rng();
        let long = vec![0u8; KDF_OUTPUT_LEN + 1];

        let result = SenderConfig::new().start_transfer(&long, &[0u8; 16], &mut rng);
        assert!(matches!(
            result,
            Err(SimplestOTError::SecretTooLarge { .. })
        ));

        let result = SenderConfig::new().start_transfer(&[0u8; 16], &long, &mut rng);
        assert!(matches!(
            result,
            Err(SimplestOTError::SecretTooLarge { .. })
        ));
    }

    #[test]
    fn sender_session_is_single_use() {
        let mut rng = rand::thread_rng();
        let mut sender = SenderConfig::new()
            .start_transfer(b"m0", b"m1", &mut rng)
            .unwrap();
        let mut receiver = ReceiverConfig::new()
            .start_transfer(false, &mut rng)
            .unwrap();

        // the masked pair does not exist before B has been processed
        assert!(matches!(
            sender.masked_pair(),
            Err(SimplestOTError::ProtocolState)
        ));

        receiver.receive_a(&sender.point_a().unwrap()).unwrap();
        let point_b = receiver.point_b().unwrap();

        sender.receive_b(&point_b).unwrap();
        assert!(matches!(
            sender.receive_b(&point_b),
            Err(SimplestOTError::ProtocolState)
        ));
        assert!(matches!(
            sender.point_a(),
            Err(SimplestOTError::ProtocolState)
        ));
    }

    #[test]
    fn receiver_session_is_single_use() {
        let mut rng = rand::thread_rng();
        let mut sender = SenderConfig::new()
            .start_transfer(b"m0", b"m1", &mut rng)
            .unwrap();
        let mut receiver = ReceiverConfig::new().start_transfer(true, &mut rng).unwrap();

        // no B before A has been processed
        assert!(matches!(
            receiver.point_b(),
            Err(SimplestOTError::ProtocolState)
        ));

        let point_a = sender.point_a().unwrap();
        receiver.receive_a(&point_a).unwrap();
        assert!(matches!(
            receiver.receive_a(&point_a),
            Err(SimplestOTError::ProtocolState)
        ));

        sender.receive_b(&receiver.point_b().unwrap()).unwrap();
        let masked = sender.masked_pair().unwrap();

        receiver.receive_e(&masked.e0, &masked.e1).unwrap();
        assert!(matches!(
            receiver.receive_e(&masked.e0, &masked.e1),
            Err(SimplestOTError::ProtocolState)
        ));
    }

    #[test]
    fn exported_point_is_stable() {
        let mut rng = rand::thread_rng();
        let mut sender = SenderConfig::new()
            .start_transfer(b"m0", b"m1", &mut rng)
            .unwrap();

        assert_eq!(sender.point_a().unwrap(), sender.point_a().unwrap());
    }

    #[test]
    fn point_negation_cancels() {
        // the sender's mask shift relies on -P being (x, p - y); build the
        // negation from raw coordinates and check it annihilates P
        let field_p = U256::from_be_hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        );
        let mut rng = rand::thread_rng();

        for _ in 0..8 {
            let scalar = random_nonzero_scalar(&mut rng).unwrap();
            let point = ProjectivePoint::GENERATOR * scalar;

            let msg = PointMsg::from_point(&point).unwrap();
            let neg_y = U256::from_be_bytes(msg.y).neg_mod(&field_p);

            let neg_msg = PointMsg::from_bytes(&msg.x, &neg_y.to_be_bytes()).unwrap();
            let neg_point = neg_msg.to_point().unwrap();

            assert_eq!(point + neg_point, ProjectivePoint::IDENTITY);
            assert_eq!(neg_point, -point);
        }
    }

    #[test]
    fn unchosen_mask_varies_between_transfers() {
        // same inputs, fresh scalars: the unchosen masked value must never
        // repeat, otherwise it would correlate with the selection
        let mut rng = rand::thread_rng();
        let mut seen = HashSet::new();

        for _ in 0..32 {
            let mut sender = SenderConfig::new()
                .start_transfer(&[0xaa; 16], &[0xbb; 16], &mut rng)
                .unwrap();
            let mut receiver = ReceiverConfig::new().start_transfer(true, &mut rng).unwrap();

            receiver.receive_a(&sender.point_a().unwrap()).unwrap();
            sender.receive_b(&receiver.point_b().unwrap()).unwrap();

            let masked = sender.masked_pair().unwrap();
            assert!(seen.insert(masked.e0.clone()), "unchosen mask repeated");
        }
    }

    #[test]
    fn rejects_off_curve_point() {
        let mut rng = rand::thread_rng();

        // (1, 1) does not satisfy y^2 = x^3 + 7
        let bogus = PointMsg::from_bytes(&[0x01], &[0x01]).unwrap();

        let mut receiver = ReceiverConfig::new()
            .start_transfer(false, &mut rng)
            .unwrap();
        assert!(matches!(
            receiver.receive_a(&bogus),
            Err(SimplestOTError::InvalidPoint)
        ));

        let mut sender = SenderConfig::new()
            .start_transfer(b"m0", b"m1", &mut rng)
            .unwrap();
        assert!(matches!(
            sender.receive_b(&bogus),
            Err(SimplestOTError::InvalidPoint)
        ));
    }
}
