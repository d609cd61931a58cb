//! `MODEXP` precompile: arbitrary-precision modular exponentiation
//! (EIP-198, repriced by EIP-2565 from Berlin).
//!
//! Input layout, right-padded with zeroes as needed:
//! `[32 bytes base_len][32 bytes exp_len][32 bytes mod_len][base][exponent][modulus]`
use crate::{
    interface::{PrecompileResult, Revision},
    utilities::{left_pad, left_pad_vec, right_pad, right_pad_vec, right_pad_with_offset},
};
use primitives::{Bytes, U256};

/// Gas floor from Berlin onwards (EIP-2565).
pub const BERLIN_MIN_GAS: u64 = 200;

/// Length of the three length fields at the head of the input.
const HEADER_LENGTH: usize = 96;

/// EIP-198 multiplication complexity, piecewise-quadratic in the larger of
/// the base and modulus lengths.
fn mult_complexity_eip198(x: U256) -> U256 {
    let x_squared = x * x;
    if x <= U256::from(64) {
        x_squared
    } else if x <= U256::from(1024) {
        (x_squared >> 2) + U256::from(96) * x - U256::from(3072)
    } else {
        (x_squared >> 4) + U256::from(480) * x - U256::from(199_680)
    }
}

/// EIP-2565 multiplication complexity, `⌈max_len/8⌉²`.
fn mult_complexity_eip2565(max_len: U256) -> U256 {
    let words = (max_len + U256::from(7)) >> 3;
    words * words
}

/// Prices the call from the three length fields and the head of the
/// exponent. Total over all inputs; costs that do not fit 64 bits come back
/// as [`u64::MAX`].
pub fn modexp_gas(input: &[u8], rev: Revision) -> u64 {
    let min_gas = if rev < Revision::Berlin { 0 } else { BERLIN_MIN_GAS };

    let header = right_pad::<HEADER_LENGTH>(input);

    let base_len = U256::from_be_slice(&header[0..32]);
    let exp_len = U256::from_be_slice(&header[32..64]);
    let mod_len = U256::from_be_slice(&header[64..96]);

    // Priced as a no-op whatever the declared exponent length.
    if base_len == U256::ZERO && mod_len == U256::ZERO {
        return min_gas;
    }

    let u64_max = U256::from(u64::MAX);
    if base_len > u64_max || exp_len > u64_max || mod_len > u64_max {
        return u64::MAX;
    }

    let base_len64 = base_len.to::<u64>() as usize;
    let exp_len64 = exp_len.to::<u64>() as usize;

    // First 32 bytes of the exponent. When fewer than 32 bytes are declared,
    // the declared bytes occupy the low positions of the 32-byte head.
    let exp_head_offset = HEADER_LENGTH.saturating_add(base_len64);
    let exp_head = if exp_len64 < 32 {
        let head = right_pad_with_offset::<32>(input, exp_head_offset);
        U256::from_be_bytes(left_pad::<32>(&head[..exp_len64]))
    } else {
        U256::from_be_bytes(right_pad_with_offset::<32>(input, exp_head_offset))
    };
    let bit_len = exp_head.bit_len();

    let mut adjusted_exp_len = U256::ZERO;
    if exp_len > U256::from(32) {
        adjusted_exp_len = U256::from(8) * (exp_len - U256::from(32));
    }
    if bit_len > 1 {
        adjusted_exp_len += U256::from(bit_len - 1);
    }
    if adjusted_exp_len < U256::from(1) {
        adjusted_exp_len = U256::from(1);
    }

    let max_len = core::cmp::max(mod_len, base_len);

    // At most 195 bits wide, so the product cannot overflow.
    let gas = if rev < Revision::Berlin {
        mult_complexity_eip198(max_len) * adjusted_exp_len / U256::from(20)
    } else {
        mult_complexity_eip2565(max_len) * adjusted_exp_len / U256::from(3)
    };

    if gas > u64_max {
        u64::MAX
    } else {
        core::cmp::max(min_gas, gas.to::<u64>())
    }
}

/// Computes `base ^ exponent mod modulus` over the declared big-endian
/// operands. Every input yields a defined result; the output is exactly
/// `mod_len` bytes, left-padded with zeroes.
pub fn modexp_run(input: &[u8]) -> PrecompileResult {
    let header = right_pad::<HEADER_LENGTH>(input);

    // Only the low 8 bytes of each length field are observed here; larger
    // lengths are already unpayable through the gas function.
    let base_len = u64::from_be_bytes(header[24..32].try_into().unwrap()) as usize;
    let exp_len = u64::from_be_bytes(header[56..64].try_into().unwrap()) as usize;
    let mod_len = u64::from_be_bytes(header[88..96].try_into().unwrap()) as usize;

    if mod_len == 0 {
        return Ok(Bytes::new());
    }

    let data = input.get(HEADER_LENGTH..).unwrap_or_default();
    let total_len = base_len.saturating_add(exp_len).saturating_add(mod_len);
    let padded = right_pad_vec(data, total_len);
    let (base, rest) = padded.split_at(base_len);
    let (exponent, modulus) = rest.split_at(exp_len);

    // Zero modulus yields a zero output of the modulus width.
    if modulus.iter().all(|b| *b == 0) {
        return Ok(vec![0; mod_len].into());
    }

    let output = aurora_engine_modexp::modexp(base, exponent, modulus);
    Ok(left_pad_vec(&output, mod_len).into())
}
