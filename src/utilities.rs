//! Byte padding helpers shared by the precompiles.
use core::cmp::min;
use primitives::Bytes;

/// Copies `data` into a `LEN`-byte array, right-padding with zeroes.
/// Bytes beyond `LEN` are ignored.
#[inline]
pub fn right_pad<const LEN: usize>(data: &[u8]) -> [u8; LEN] {
    right_pad_with_offset(data, 0)
}

/// Copies `data[offset..]` into a `LEN`-byte array, right-padding with
/// zeroes. Offsets past the end of `data` yield an all-zero array.
#[inline]
pub fn right_pad_with_offset<const LEN: usize>(data: &[u8], offset: usize) -> [u8; LEN] {
    let mut padded = [0; LEN];
    let start = min(offset, data.len());
    let end = min(start.saturating_add(LEN), data.len());
    padded[..end - start].copy_from_slice(&data[start..end]);
    padded
}

/// Copies `data` into a vector of length `len`, right-padding with zeroes.
#[inline]
pub fn right_pad_vec(data: &[u8], len: usize) -> Vec<u8> {
    let mut padded = vec![0; len];
    let end = min(len, data.len());
    padded[..end].copy_from_slice(&data[..end]);
    padded
}

/// Copies `data` into the tail of a `LEN`-byte array, left-padding with
/// zeroes. If `data` is longer than `LEN`, the rightmost bytes are dropped.
#[inline]
pub fn left_pad<const LEN: usize>(data: &[u8]) -> [u8; LEN] {
    let mut padded = [0; LEN];
    let end = min(LEN, data.len());
    padded[LEN - end..].copy_from_slice(&data[..end]);
    padded
}

/// Copies `data` into the tail of a vector of length `len`, left-padding
/// with zeroes. If `data` is longer than `len`, the rightmost bytes are
/// dropped.
#[inline]
pub fn left_pad_vec(data: &[u8], len: usize) -> Vec<u8> {
    let mut padded = vec![0; len];
    let end = min(len, data.len());
    padded[len - end..].copy_from_slice(&data[..end]);
    padded
}

/// Converts a boolean to a 32-byte word holding 0 or 1 in the last byte.
#[inline]
pub fn bool_to_bytes32(value: bool) -> Bytes {
    let mut out = [0u8; 32];
    out[31] = value as u8;
    out.into()
}
