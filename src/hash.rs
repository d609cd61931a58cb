//! SHA-256 and RIPEMD-160 precompiles.
use crate::{
    calc_linear_cost_u32,
    interface::{PrecompileResult, Revision},
};
use sha2::Digest;

/// `60 + 12 · ⌈len/32⌉`, every revision.
pub fn sha256_gas(input: &[u8], _rev: Revision) -> u64 {
    calc_linear_cost_u32(input.len(), 60, 12)
}

/// Computes the SHA-256 digest of the input. Never fails.
///
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000002>
pub fn sha256_run(input: &[u8]) -> PrecompileResult {
    let output = sha2::Sha256::digest(input);
    Ok(output.to_vec().into())
}

/// `600 + 120 · ⌈len/32⌉`, every revision.
pub fn ripemd160_gas(input: &[u8], _rev: Revision) -> u64 {
    calc_linear_cost_u32(input.len(), 600, 120)
}

/// Computes the RIPEMD-160 digest of the input, left-padded to a 32-byte
/// word. Never fails.
///
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000003>
pub fn ripemd160_run(input: &[u8]) -> PrecompileResult {
    let mut hasher = ripemd::Ripemd160::new();
    hasher.update(input);

    let mut output = [0u8; 32];
    hasher.finalize_into((&mut output[12..]).into());
    Ok(output.into())
}
