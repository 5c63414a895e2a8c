use elliptic_curve::subtle::{Choice, ConditionallySelectable};
use k256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::kdf::kdf;
use crate::params::CURVE_ID;
use crate::utils::{mask, random_nonzero_scalar};

use super::{PointMsg, SimplestOTError};

/// Long-lived receiver configuration, counterpart of
/// [`super::SenderConfig`].
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    curve_id: &'static str,
}

impl ReceiverConfig {
    /// Create a receiver configuration for the secp256k1 group.
    pub fn new() -> Self {
        ReceiverConfig { curve_id: CURVE_ID }
    }

    /// Identifier expected from the peer during the batch handshake.
    pub fn curve_id(&self) -> &'static str {
        self.curve_id
    }

    /// Begin a transfer for one selection bit.
    pub fn start_transfer<R: CryptoRng + RngCore>(
        &self,
        bit: bool,
        rng: &mut R,
    ) -> Result<ReceiverSession, SimplestOTError> {
        // b <- [1, n-1]
        let b = random_nonzero_scalar(rng)?;

        Ok(ReceiverSession {
            b,
            bit: Choice::from(bit as u8),
            state: ReceiverState::Created,
        })
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One single-use receiver transfer, `Created -> AwaitingE -> Completed`.
pub struct ReceiverSession {
    b: Scalar,
    bit: Choice,
    state: ReceiverState,
}

enum ReceiverState {
    Created,
    AwaitingE {
        point_b: ProjectivePoint,
        shared: ProjectivePoint,
    },
    Completed,
}

impl ReceiverSession {
    /// Process the sender's point `A`.
    ///
    /// `B` is `bG` for bit 0 and `bG + A` for bit 1, selected in constant
    /// time; folding `A` in is what makes the sender's shifted mask land
    /// on `bA`. Valid only as the first message of the session.
    pub fn receive_a(&mut self, msg: &PointMsg) -> Result<(), SimplestOTError> {
        if !matches!(self.state, ReceiverState::Created) {
            return Err(SimplestOTError::ProtocolState);
        }

        let point_a = msg.to_point()?;

        let plain = ProjectivePoint::GENERATOR * self.b;
        let blinded = plain + point_a;
        let point_b = ProjectivePoint::conditional_select(&plain, &blinded, self.bit);

        // bA, the only mask key this party can ever reconstruct
        let shared = point_a * self.b;

        self.state = ReceiverState::AwaitingE { point_b, shared };

        Ok(())
    }

    /// Coordinates of `B`, the receiver's reply to `A`.
    pub fn point_b(&self) -> Result<PointMsg, SimplestOTError> {
        match &self.state {
            ReceiverState::AwaitingE { point_b, .. } => PointMsg::from_point(point_b),
            _ => Err(SimplestOTError::ProtocolState),
        }
    }

    /// Unmask the selected secret from the sender's pair. Valid exactly
    /// once.
    ///
    /// The unchosen value stays what it already is to this party: bytes
    /// indistinguishable from random.
    pub fn receive_e(&mut self, e0: &[u8], e1: &[u8]) -> Result<Vec<u8>, SimplestOTError> {
        let shared = match &self.state {
            ReceiverState::AwaitingE { shared, .. } => *shared,
            _ => return Err(SimplestOTError::ProtocolState),
        };

        let key = kdf(&shared, 0)?;
        let secret = if bool::from(self.bit) {
            mask(e1, &key)
        } else {
            mask(e0, &key)
        };

        self.state = ReceiverState::Completed;

        Ok(secret)
    }
}

impl Drop for ReceiverSession {
    fn drop(&mut self) {
        self.b.zeroize();
    }
}
