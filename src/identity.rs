//! Identity precompile.
use crate::{
    calc_linear_cost_u32,
    interface::{PrecompileResult, Revision},
};

/// The base cost of the operation.
pub const IDENTITY_BASE: u64 = 15;
/// The cost per word.
pub const IDENTITY_PER_WORD: u64 = 3;

/// `15 + 3 · ⌈len/32⌉`, every revision.
pub fn identity_gas(input: &[u8], _rev: Revision) -> u64 {
    calc_linear_cost_u32(input.len(), IDENTITY_BASE, IDENTITY_PER_WORD)
}

/// Takes the input bytes, copies them, and returns them as the output.
///
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000004>
pub fn identity_run(input: &[u8]) -> PrecompileResult {
    Ok(input.to_vec().into())
}
