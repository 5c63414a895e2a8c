use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint};

use crate::params::FIELD_ELEMENT_LEN;

use super::SimplestOTError;

/// Affine coordinates of a curve point, zero-padded to the field width.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointMsg {
    /// Big-endian x coordinate
    pub x: [u8; FIELD_ELEMENT_LEN],
    /// Big-endian y coordinate
    pub y: [u8; FIELD_ELEMENT_LEN],
}

impl PointMsg {
    /// Rebuild a message from raw coordinate frames.
    ///
    /// Padding ownership lives here: values shorter than the field width
    /// are left-padded with zero bytes, values longer than it cannot name a
    /// field element and are rejected.
    pub fn from_bytes(x: &[u8], y: &[u8]) -> Result<Self, SimplestOTError> {
        Ok(PointMsg {
            x: pad_coordinate(x)?,
            y: pad_coordinate(y)?,
        })
    }

    /// Encode a point for transmission.
    ///
    /// The identity has no affine coordinates and cannot be exported.
    pub(crate) fn from_point(point: &ProjectivePoint) -> Result<Self, SimplestOTError> {
        let encoded = point.to_encoded_point(false);
        match (encoded.x(), encoded.y()) {
            (Some(x), Some(y)) => Ok(PointMsg {
                x: (*x).into(),
                y: (*y).into(),
            }),
            _ => Err(SimplestOTError::InvalidPoint),
        }
    }

    /// Decode the named group element.
    ///
    /// Validation belongs to the group library: off-curve coordinates
    /// decode to nothing, and no arithmetic ever runs on them.
    pub(crate) fn to_point(&self) -> Result<ProjectivePoint, SimplestOTError> {
        let encoded = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&self.x),
            FieldBytes::from_slice(&self.y),
            false,
        );

        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        affine
            .map(ProjectivePoint::from)
            .ok_or(SimplestOTError::InvalidPoint)
    }
}

fn pad_coordinate(value: &[u8]) -> Result<[u8; FIELD_ELEMENT_LEN], SimplestOTError> {
    if value.len() > FIELD_ELEMENT_LEN {
        return Err(SimplestOTError::InvalidPoint);
    }

    let mut out = [0u8; FIELD_ELEMENT_LEN];
    out[FIELD_ELEMENT_LEN - value.len()..].copy_from_slice(value);
    Ok(out)
}

/// Both masked secrets of one transfer, in selection order.
///
/// To anyone without the matching mask these are uniformly random bytes;
/// the pair is safe to transmit as-is.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskedPair {
    /// `KDF(aB, 0) XOR m0`
    pub e0: Vec<u8>,
    /// `KDF(aB - aA, 0) XOR m1`
    pub e1: Vec<u8>,
}
