/// Identifier of the group, announced once per batch connection.
pub const CURVE_ID: &str = "secp256k1";

/// Width in bytes of one secp256k1 field element.
///
/// Coordinate serialization is pinned to this width. Shorter big-endian
/// values are zero-padded on decode; leading zero bytes are never stripped
/// on encode, since the KDF hashes these exact bytes.
pub const FIELD_ELEMENT_LEN: usize = 32;

/// Length in bytes of one derived mask (SHA-256 digest size).
///
/// Also the upper bound on a transferable secret: the XOR mask would
/// silently truncate anything longer, so longer inputs are rejected.
pub const KDF_OUTPUT_LEN: usize = 32;
