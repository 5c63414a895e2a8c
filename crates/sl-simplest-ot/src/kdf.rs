//! Mask derivation from curve points.

use elliptic_curve::sec1::ToEncodedPoint;
use k256::ProjectivePoint;
use sha2::{Digest, Sha256};

use crate::params::KDF_OUTPUT_LEN;
use crate::simplest_ot::SimplestOTError;

/// Derive a `tag`-specific mask from a shared curve point.
///
/// Hashes the x coordinate, the y coordinate and the tag as an 8-byte
/// big-endian integer. Both coordinates come from the uncompressed SEC1
/// encoding, so they are always [`crate::params::FIELD_ELEMENT_LEN`] bytes
/// regardless of leading zeros. The identity has no affine representation
/// and is rejected.
///
/// A single transfer only uses tag 0; distinct tags derive independent
/// masks from the same point.
pub fn kdf(point: &ProjectivePoint, tag: u64) -> Result<[u8; KDF_OUTPUT_LEN], SimplestOTError> {
    let encoded = point.to_encoded_point(false);
    let (x, y) = match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(SimplestOTError::InvalidPoint),
    };

    let mut hasher = Sha256::new();
    hasher.update(x);
    hasher.update(y);
    hasher.update(tag.to_be_bytes());

    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use k256::ProjectivePoint;

    use crate::utils::random_nonzero_scalar;

    use super::*;

    #[test]
    fn deterministic() {
        let point =
            ProjectivePoint::GENERATOR * random_nonzero_scalar(&mut rand::thread_rng()).unwrap();

        assert_eq!(kdf(&point, 7).unwrap(), kdf(&point, 7).unwrap());
    }

    #[test]
    fn tag_separates_masks() {
        let point =
            ProjectivePoint::GENERATOR * random_nonzero_scalar(&mut rand::thread_rng()).unwrap();

        assert_ne!(kdf(&point, 0).unwrap(), kdf(&point, 1).unwrap());
    }

    #[test]
    fn distinct_points_distinct_masks() {
        let mut rng = rand::thread_rng();
        let mut seen = HashSet::new();

        for _ in 0..512 {
            let point = ProjectivePoint::GENERATOR * random_nonzero_scalar(&mut rng).unwrap();
            assert!(seen.insert(kdf(&point, 0).unwrap()), "mask collision");
        }
    }

    #[test]
    fn rejects_identity() {
        assert!(matches!(
            kdf(&ProjectivePoint::IDENTITY, 0),
            Err(SimplestOTError::InvalidPoint)
        ));
    }
}
