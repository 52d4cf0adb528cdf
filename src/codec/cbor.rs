//! Minimal CBOR encoder
//!
//! This is not a general purpose CBOR library. Every structure the
//! authenticator emits has a fixed schema, so the module exposes the header
//! primitives plus one dedicated builder for the COSE EC2 public key. Map
//! entries are written in the order they are passed in, which must match the
//! schemas relying parties expect.

/// CBOR major types used by the authenticator
const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_MAP: u8 = 5;

/// COSE key labels and values for an ES256 / P-256 EC2 key
const COSE_KEY_KTY: i64 = 1;
const COSE_KEY_ALG: i64 = 3;
const COSE_EC2_CRV: i64 = -1;
const COSE_EC2_X: i64 = -2;
const COSE_EC2_Y: i64 = -3;
const COSE_KTY_EC2: i64 = 2;
const COSE_CRV_P256: i64 = 1;

/// COSE algorithm identifier for ECDSA P-256 with SHA-256
pub const COSE_ALG_ES256: i64 = -7;

/// Size of a P-256 field element
pub const P256_COORDINATE_LEN: usize = 32;

/// Write a CBOR head for `major` with argument `value`
///
/// Arguments below 24 are packed into the initial byte; larger values use
/// the shortest of the 1, 2, 4 or 8 byte big-endian forms.
fn write_head(out: &mut Vec<u8>, major: u8, value: u64) {
    let major = major << 5;
    if value < 24 {
        // Fits in the low five bits
        #[allow(clippy::cast_possible_truncation)]
        out.push(major | value as u8);
    } else if let Ok(v) = u8::try_from(value) {
        out.push(major | 24);
        out.push(v);
    } else if let Ok(v) = u16::try_from(value) {
        out.push(major | 25);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(value) {
        out.push(major | 26);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.push(major | 27);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// Encode a signed integer (major type 0 or 1)
#[must_use]
pub fn int(value: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    if value >= 0 {
        write_head(&mut out, MAJOR_UNSIGNED, value.unsigned_abs());
    } else {
        // Negative integers carry -1 - n
        write_head(&mut out, MAJOR_NEGATIVE, (-1 - value).unsigned_abs());
    }
    out
}

/// Encode a UTF-8 text string (major type 3)
#[must_use]
pub fn text(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 9);
    write_head(&mut out, MAJOR_TEXT, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
    out
}

/// Encode a byte string (major type 2)
#[must_use]
pub fn bytes(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 9);
    write_head(&mut out, MAJOR_BYTES, value.len() as u64);
    out.extend_from_slice(value);
    out
}

/// Encode a definite-length map from already encoded key/value pairs
///
/// The header is `0xA0 | n` for the small maps used by `WebAuthn`. Pairs
/// are concatenated in the given order.
#[must_use]
pub fn map(pairs: &[(Vec<u8>, Vec<u8>)]) -> Vec<u8> {
    let body_len: usize = pairs.iter().map(|(k, v)| k.len() + v.len()).sum();
    let mut out = Vec::with_capacity(body_len + 9);
    write_head(&mut out, MAJOR_MAP, pairs.len() as u64);
    for (key, value) in pairs {
        out.extend_from_slice(key);
        out.extend_from_slice(value);
    }
    out
}

/// Left-pad a P-256 coordinate with zeros to 32 bytes
///
/// Coordinates longer than 32 bytes keep their least significant 32 bytes,
/// which only drops leading zeros for a valid field element.
#[must_use]
pub fn pad_coordinate(coordinate: &[u8]) -> [u8; P256_COORDINATE_LEN] {
    let mut padded = [0u8; P256_COORDINATE_LEN];
    let take = coordinate.len().min(P256_COORDINATE_LEN);
    padded[P256_COORDINATE_LEN - take..].copy_from_slice(&coordinate[coordinate.len() - take..]);
    padded
}

/// Build the COSE EC2 key for an ES256 / P-256 public key
///
/// Produces exactly `{1: 2, 3: -7, -1: 1, -2: x, -3: y}` with `x` and `y`
/// zero-padded to 32 bytes.
#[must_use]
pub fn cose_es256_key(x: &[u8], y: &[u8]) -> Vec<u8> {
    map(&[
        (int(COSE_KEY_KTY), int(COSE_KTY_EC2)),
        (int(COSE_KEY_ALG), int(COSE_ALG_ES256)),
        (int(COSE_EC2_CRV), int(COSE_CRV_P256)),
        (int(COSE_EC2_X), bytes(&pad_coordinate(x))),
        (int(COSE_EC2_Y), bytes(&pad_coordinate(y))),
    ])
}
