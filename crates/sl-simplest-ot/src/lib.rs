// Copyright (c) Silence Laboratories Pte. Ltd. All Rights Reserved.
// This software is licensed under the Silence Laboratories License Agreement.

//! 1-out-of-2 Oblivious Transfer from the "Simplest OT" construction
//! (Chou-Orlandi, <https://eprint.iacr.org/2015/267.pdf>) over secp256k1.
//!
//! The sender holds two secrets `m0, m1`; the receiver holds a selection
//! bit. After one two-round exchange the receiver knows exactly the
//! selected secret, the sender has not learned the selection, and the
//! unchosen secret stays hidden from the receiver under DDH.

/// Curve-bound protocol constants
pub mod params;

/// Mask derivation from shared curve points
pub mod kdf;

/// Sender and receiver transfer sessions
pub mod simplest_ot;

/// Batched label transfer over a [`sl_channel::Transport`]
pub mod batch;

/// Utility functions
pub mod utils {
    use k256::{FieldBytes, NonZeroScalar, Scalar};
    use rand::{CryptoRng, RngCore};

    use crate::simplest_ot::SimplestOTError;

    /// XOR `data` against `key`, truncating to the shorter of the two.
    ///
    /// Applying the same key twice restores the input, so one function
    /// serves masking and unmasking.
    pub fn mask(data: &[u8], key: &[u8]) -> Vec<u8> {
        data.iter().zip(key.iter()).map(|(d, k)| d ^ k).collect()
    }

    /// Draw a uniform scalar from `[1, n-1]`.
    ///
    /// Candidates are rejected until one lands in range; a failing random
    /// source surfaces as [`SimplestOTError::Randomness`] and the transfer
    /// is abandoned rather than retried with a correlated draw.
    pub fn random_nonzero_scalar<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> Result<Scalar, SimplestOTError> {
        // secp256k1's order is close to 2^256, a second draw is already rare
        for _ in 0..64 {
            let mut repr = FieldBytes::default();
            rng.try_fill_bytes(repr.as_mut_slice())
                .map_err(|_| SimplestOTError::Randomness)?;

            let candidate: Option<NonZeroScalar> = NonZeroScalar::from_repr(repr).into();
            if let Some(scalar) = candidate {
                return Ok(*scalar);
            }
        }

        Err(SimplestOTError::Randomness)
    }

}
