use k256::{ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::kdf::kdf;
use crate::params::{CURVE_ID, KDF_OUTPUT_LEN};
use crate::utils::{mask, random_nonzero_scalar};

use super::{MaskedPair, PointMsg, SimplestOTError};

/// Long-lived sender configuration: the group both parties must share.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    curve_id: &'static str,
}

impl SenderConfig {
    /// Create a sender configuration for the secp256k1 group.
    pub fn new() -> Self {
        SenderConfig { curve_id: CURVE_ID }
    }

    /// Identifier announced during the batch handshake.
    pub fn curve_id(&self) -> &'static str {
        self.curve_id
    }

    /// Begin a transfer of the secret pair `(m0, m1)`.
    ///
    /// Draws the session scalar and derives every point the two rounds
    /// need; no I/O happens here. Secrets longer than one mask are
    /// rejected, the XOR masking would silently truncate them otherwise.
    pub fn start_transfer<R: CryptoRng + RngCore>(
        &self,
        m0: &[u8],
        m1: &[u8],
        rng: &mut R,
    ) -> Result<SenderSession, SimplestOTError> {
        check_secret_len(m0)?;
        check_secret_len(m1)?;

        // a <- [1, n-1]
        let a = random_nonzero_scalar(rng)?;

        // A = aG, and -aA to shift the bit-1 mask later
        let big_a = ProjectivePoint::GENERATOR * a;
        let neg_aa = -(big_a * a);

        Ok(SenderSession {
            a,
            big_a,
            neg_aa,
            state: SenderState::Created {
                m0: m0.to_vec(),
                m1: m1.to_vec(),
            },
        })
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_secret_len(secret: &[u8]) -> Result<(), SimplestOTError> {
    if secret.len() > KDF_OUTPUT_LEN {
        return Err(SimplestOTError::SecretTooLarge {
            len: secret.len(),
            max: KDF_OUTPUT_LEN,
        });
    }
    Ok(())
}

/// One single-use sender transfer.
///
/// The session walks `Created -> AwaitingB -> Completed`. Handlers check
/// the state tag instead of guessing from which fields happen to be
/// filled, so a replayed message fails loudly rather than overwriting
/// anything.
pub struct SenderSession {
    a: Scalar,
    big_a: ProjectivePoint,
    neg_aa: ProjectivePoint,
    state: SenderState,
}

enum SenderState {
    Created { m0: Vec<u8>, m1: Vec<u8> },
    AwaitingB { m0: Vec<u8>, m1: Vec<u8> },
    Completed { e0: Vec<u8>, e1: Vec<u8> },
}

impl SenderSession {
    /// Coordinates of `A = aG`, the sender's first message.
    ///
    /// Every call before the round closes returns the same bytes; once the
    /// reply to `A` has been processed the round is over and exporting it
    /// again is an ordering bug.
    pub fn point_a(&mut self) -> Result<PointMsg, SimplestOTError> {
        let msg = PointMsg::from_point(&self.big_a)?;

        match &mut self.state {
            SenderState::Created { m0, m1 } => {
                let m0 = std::mem::take(m0);
                let m1 = std::mem::take(m1);
                self.state = SenderState::AwaitingB { m0, m1 };
            }
            SenderState::AwaitingB { .. } => {}
            SenderState::Completed { .. } => return Err(SimplestOTError::ProtocolState),
        }

        Ok(msg)
    }

    /// Process the receiver's point `B` and derive both masked secrets.
    ///
    /// `aB` keys the bit-0 mask; adding `-aA` turns it into the bit-1 mask
    /// exactly when the receiver folded `A` into `B`. Valid exactly once.
    pub fn receive_b(&mut self, msg: &PointMsg) -> Result<(), SimplestOTError> {
        let point_b = msg.to_point()?;

        // aB and aB - aA; at most one of them equals the receiver's bA
        let shared0 = point_b * self.a;
        let shared1 = shared0 + self.neg_aa;

        let k0 = kdf(&shared0, 0)?;
        let k1 = kdf(&shared1, 0)?;

        let (mut m0, mut m1) = match &mut self.state {
            SenderState::Created { m0, m1 } | SenderState::AwaitingB { m0, m1 } => {
                (std::mem::take(m0), std::mem::take(m1))
            }
            SenderState::Completed { .. } => return Err(SimplestOTError::ProtocolState),
        };

        let e0 = mask(&m0, &k0);
        let e1 = mask(&m1, &k1);

        m0.zeroize();
        m1.zeroize();

        self.state = SenderState::Completed { e0, e1 };

        Ok(())
    }

    /// Both masked secrets, available once `B` has been processed.
    pub fn masked_pair(&self) -> Result<MaskedPair, SimplestOTError> {
        match &self.state {
            SenderState::Completed { e0, e1 } => Ok(MaskedPair {
                e0: e0.clone(),
                e1: e1.clone(),
            }),
            _ => Err(SimplestOTError::ProtocolState),
        }
    }
}

impl Drop for SenderSession {
    fn drop(&mut self) {
        self.a.zeroize();
        if let SenderState::Created { m0, m1 } | SenderState::AwaitingB { m0, m1 } =
            &mut self.state
        {
            m0.zeroize();
            m1.zeroize();
        }
    }
}
