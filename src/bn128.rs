//! alt_bn128 precompiles: G1 point addition, G1 scalar multiplication and
//! the optimal ate pairing check (EIP-196 / EIP-197, repriced by EIP-1108
//! at Istanbul).
use crate::{
    interface::{PrecompileError, PrecompileResult, Revision},
    utilities::{bool_to_bytes32, right_pad},
};
use bn::{AffineG1, AffineG2, Fq, Fq2, Group, Gt, G1, G2};
use primitives::Bytes;

/// bn128 gas costs.
mod costs {
    /// Cost of the Byzantium alt_bn128_add operation.
    pub(super) const BYZANTIUM_ADD: u64 = 500;

    /// Cost of the Byzantium alt_bn128_mul operation.
    pub(super) const BYZANTIUM_MUL: u64 = 40_000;

    /// Cost of the alt_bn128_pair operation per point.
    pub(super) const BYZANTIUM_PAIR_PER_POINT: u64 = 80_000;

    /// Base cost of the alt_bn128_pair operation.
    pub(super) const BYZANTIUM_PAIR_BASE: u64 = 100_000;

    /// Cost of the Istanbul alt_bn128_add operation.
    pub(super) const ISTANBUL_ADD: u64 = 150;

    /// Cost of the Istanbul alt_bn128_mul operation.
    pub(super) const ISTANBUL_MUL: u64 = 6_000;

    /// Cost of the Istanbul alt_bn128_pair operation per point.
    pub(super) const ISTANBUL_PAIR_PER_POINT: u64 = 34_000;

    /// Base cost of the Istanbul alt_bn128_pair operation.
    pub(super) const ISTANBUL_PAIR_BASE: u64 = 45_000;
}

/// Input length for the add operation.
/// `ADD` takes two uncompressed G1 points (64 bytes each).
pub const ADD_INPUT_LEN: usize = 64 + 64;

/// Input length for the multiplication operation.
/// `MUL` takes an uncompressed G1 point (64 bytes) and a scalar (32 bytes).
pub const MUL_INPUT_LEN: usize = 64 + 32;

/// Pair element length.
/// `PAIR` elements are composed of an uncompressed G1 point (64 bytes) and
/// an uncompressed G2 point (128 bytes).
pub const PAIR_ELEMENT_LEN: usize = 64 + 128;

/// 150 from Istanbul (EIP-1108), 500 before.
pub fn add_gas(_input: &[u8], rev: Revision) -> u64 {
    if rev >= Revision::Istanbul {
        costs::ISTANBUL_ADD
    } else {
        costs::BYZANTIUM_ADD
    }
}

/// 6000 from Istanbul (EIP-1108), 40000 before.
pub fn mul_gas(_input: &[u8], rev: Revision) -> u64 {
    if rev >= Revision::Istanbul {
        costs::ISTANBUL_MUL
    } else {
        costs::BYZANTIUM_MUL
    }
}

/// `34000·k + 45000` from Istanbul (EIP-1108), `80000·k + 100000` before,
/// where `k` is the number of 192-byte pair elements.
pub fn pair_gas(input: &[u8], rev: Revision) -> u64 {
    let k = (input.len() / PAIR_ELEMENT_LEN) as u64;
    if rev >= Revision::Istanbul {
        costs::ISTANBUL_PAIR_PER_POINT * k + costs::ISTANBUL_PAIR_BASE
    } else {
        costs::BYZANTIUM_PAIR_PER_POINT * k + costs::BYZANTIUM_PAIR_BASE
    }
}

/// Reads a single `Fq` element from a 32-byte big-endian slice, rejecting
/// values at or above the field modulus.
#[inline]
fn read_fq(input: &[u8]) -> Result<Fq, PrecompileError> {
    Fq::from_slice(&input[..32]).map_err(|_| PrecompileError::Bn128FieldPointNotAMember)
}

/// Creates a `G1` point from affine coordinates, mapping `(0, 0)` to the
/// group identity.
fn new_g1_point(px: Fq, py: Fq) -> Result<G1, PrecompileError> {
    if px == Fq::zero() && py == Fq::zero() {
        Ok(G1::zero())
    } else {
        AffineG1::new(px, py)
            .map(Into::into)
            .map_err(|_| PrecompileError::Bn128AffineGFailedToCreate)
    }
}

/// Reads a G1 point from 64 bytes of input.
fn read_g1_point(input: &[u8]) -> Result<G1, PrecompileError> {
    let px = read_fq(&input[0..32])?;
    let py = read_fq(&input[32..64])?;
    new_g1_point(px, py)
}

/// Reads a G2 point from 128 bytes of input: two Fp2 elements, each with
/// the higher-order coefficient serialized first. `(0, 0)` maps to the
/// group identity; `AffineG2::new` enforces both the curve equation and
/// membership in the order-`r` subgroup.
fn read_g2_point(input: &[u8]) -> Result<G2, PrecompileError> {
    let xc1 = read_fq(&input[0..32])?;
    let xc0 = read_fq(&input[32..64])?;
    let yc1 = read_fq(&input[64..96])?;
    let yc0 = read_fq(&input[96..128])?;

    let x = Fq2::new(xc0, xc1);
    let y = Fq2::new(yc0, yc1);
    if x.is_zero() && y.is_zero() {
        Ok(G2::zero())
    } else {
        AffineG2::new(x, y)
            .map(Into::into)
            .map_err(|_| PrecompileError::Bn128AffineGFailedToCreate)
    }
}

/// Encodes a G1 point into 64 bytes; the identity encodes as all zeroes.
fn encode_g1_point(point: G1) -> Bytes {
    let mut output = [0u8; 64];
    if let Some(affine) = AffineG1::from_jacobian(point) {
        // Writing into 32-byte halves cannot fail.
        affine.x().to_big_endian(&mut output[..32]).unwrap();
        affine.y().to_big_endian(&mut output[32..]).unwrap();
    }
    output.into()
}

/// Adds two G1 points and returns the encoded sum.
///
/// See: <https://eips.ethereum.org/EIPS/eip-196>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000006>
pub fn run_add(input: &[u8]) -> PrecompileResult {
    let input = right_pad::<ADD_INPUT_LEN>(input);

    let p1 = read_g1_point(&input[..64])?;
    let p2 = read_g1_point(&input[64..])?;

    Ok(encode_g1_point(p1 + p2))
}

/// Multiplies a G1 point by a 256-bit scalar and returns the encoded
/// product.
///
/// See: <https://eips.ethereum.org/EIPS/eip-196>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000007>
pub fn run_mul(input: &[u8]) -> PrecompileResult {
    let input = right_pad::<MUL_INPUT_LEN>(input);

    let p = read_g1_point(&input[..64])?;

    // `Fr::from_slice` only fails when the length is not 32; every 256-bit
    // scalar is accepted. G1 has prime order, so the implicit reduction
    // modulo the group order leaves the product unchanged.
    let fr = bn::Fr::from_slice(&input[64..96]).unwrap();

    Ok(encode_g1_point(p * fr))
}

/// Checks whether `∏ e(Aᵢ, Bᵢ)` equals the identity and returns the result
/// as a 32-byte word.
///
/// See: <https://eips.ethereum.org/EIPS/eip-197>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000008>
pub fn run_pair(input: &[u8]) -> PrecompileResult {
    if input.len() % PAIR_ELEMENT_LEN != 0 {
        return Err(PrecompileError::Bn128PairLength);
    }

    let elements = input.len() / PAIR_ELEMENT_LEN;
    let mut pairs = Vec::with_capacity(elements);
    for idx in 0..elements {
        let element = &input[idx * PAIR_ELEMENT_LEN..(idx + 1) * PAIR_ELEMENT_LEN];
        let a = read_g1_point(&element[..64])?;
        let b = read_g2_point(&element[64..])?;

        // An identity on either side contributes the unit element to the
        // product and can be dropped after validation.
        if !a.is_zero() && !b.is_zero() {
            pairs.push((a, b));
        }
    }

    // One shared final exponentiation over the batched Miller loops; the
    // empty product is the identity.
    let success = bn::pairing_batch(&pairs) == Gt::one();
    Ok(bool_to_bytes32(success))
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::hex;

    #[test]
    fn add_known_points() {
        let input = hex!(
            "18b18acfb4c2c30276db5411368e7185b311dd124691610c5d3b74034e093dc9"
            "063c909c4720840cb5134cb9f59fa749755796819658d32efc0d288198f37266"
            "07c2b7f58a84bd6145f00c9c2bc0bb1a187f20ff2c92963a88019e7c6a014eed"
            "06614e20c147e940f2d70da3f74c9a17df361706a4485c742bd6788478fa17d7"
        );
        let expected = hex!(
            "2243525c5efd4b9c3d3c45ac0ca3fe4dd85e830a4ce6b65fa1eeaee202839703"
            "301d1d33be6da8e509df21cc35964723180eed7532537db9ae5e7d48f195c915"
        );
        assert_eq!(run_add(&input).unwrap().as_ref(), expected);
        assert_eq!(add_gas(&input, Revision::Istanbul), 150);
        assert_eq!(add_gas(&input, Revision::Byzantium), 500);
    }

    #[test]
    fn add_generator_to_itself() {
        let input = hex!(
            "0000000000000000000000000000000000000000000000000000000000000001"
            "0000000000000000000000000000000000000000000000000000000000000002"
            "0000000000000000000000000000000000000000000000000000000000000001"
            "0000000000000000000000000000000000000000000000000000000000000002"
        );
        let expected = hex!(
            "030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd3"
            "15ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4"
        );
        assert_eq!(run_add(&input).unwrap().as_ref(), expected);
    }

    #[test]
    fn add_identity_round_trips() {
        // The empty input decodes as two identities and the sum encodes as
        // 64 zero bytes.
        let expected = [0u8; 64];
        assert_eq!(run_add(&[]).unwrap().as_ref(), expected);
    }

    #[test]
    fn add_rejects_point_off_curve() {
        let input = hex!(
            "1111111111111111111111111111111111111111111111111111111111111111"
            "1111111111111111111111111111111111111111111111111111111111111111"
            "1111111111111111111111111111111111111111111111111111111111111111"
            "1111111111111111111111111111111111111111111111111111111111111111"
        );
        assert_eq!(
            run_add(&input),
            Err(PrecompileError::Bn128AffineGFailedToCreate)
        );
    }

    #[test]
    fn mul_known_point() {
        let input = hex!(
            "2bd3e6d0f3b142924f5ca7b49ce5b9d54c4703d7ae5648e61d02268b1a0a9fb7"
            "21611ce0a6af85915e2f1d70300909ce2e49dfad4a4619c8390cae66cefdb204"
            "00000000000000000000000000000000000000000000000011138ce750fa15c2"
        );
        let expected = hex!(
            "070a8d6a982153cae4be29d434e8faef8a47b274a053f5a4ee2a6c9c13c31e5c"
            "031b8ce914eba3a9ffb989f9cdd5b0f01943074bf4f0f315690ec3cec6981afc"
        );
        assert_eq!(run_mul(&input).unwrap().as_ref(), expected);
        assert_eq!(mul_gas(&input, Revision::Istanbul), 6_000);
        assert_eq!(mul_gas(&input, Revision::Byzantium), 40_000);
    }

    #[test]
    fn mul_by_zero_one_and_group_order() {
        let generator = hex!(
            "0000000000000000000000000000000000000000000000000000000000000001"
            "0000000000000000000000000000000000000000000000000000000000000002"
        );

        // 0 · G is the identity.
        let mut input = [0u8; 96];
        input[..64].copy_from_slice(&generator);
        assert_eq!(run_mul(&input).unwrap().as_ref(), [0u8; 64]);

        // 1 · G is G.
        input[95] = 1;
        assert_eq!(run_mul(&input).unwrap().as_ref(), generator);

        // r · G is the identity; the full 256-bit scalar is accepted.
        input[64..96].copy_from_slice(&hex!(
            "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001"
        ));
        assert_eq!(run_mul(&input).unwrap().as_ref(), [0u8; 64]);
    }

    #[test]
    fn pair_known_points() {
        let input = hex!(
            "1c76476f4def4bb94541d57ebba1193381ffa7aa76ada664dd31c16024c43f59"
            "3034dd2920f673e204fee2811c678745fc819b55d3e9d294e45c9b03a76aef41"
            "209dd15ebff5d46c4bd888e51a93cf99a7329636c63514396b4a452003a35bf7"
            "04bf11ca01483bfa8b34b43561848d28905960114c8ac04049af4b6315a41678"
            "2bb8324af6cfc93537a2ad1a445cfd0ca2a71acd7ac41fadbf933c2a51be344d"
            "120a2a4cf30c1bf9845f20c6fe39e07ea2cce61f0c9bb048165fe5e4de877550"
            "111e129f1cf1097710d41c4ac70fcdfa5ba2023c6ff1cbeac322de49d1b6df7c"
            "2032c61a830e3c17286de9462bf242fca2883585b93870a73853face6a6bf411"
            "198e9393920d483a7260bfb731fb5d25f1aa493335a9e71297e485b7aef312c2"
            "1800deef121f1e76426a00665e5c4479674322d4f75edadd46debd5cd992f6ed"
            "090689d0585ff075ec9e99ad690c3395bc4b313370b38ef355acdadcd122975b"
            "12c85ea5db8c6deb4aab71808dcb408fe3d1e7690c43d37b4ce6cc0166fa7daa"
        );
        let expected = hex!("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(run_pair(&input).unwrap().as_ref(), expected);

        // k = 2
        assert_eq!(pair_gas(&input, Revision::Istanbul), 113_000);
        assert_eq!(pair_gas(&input, Revision::Byzantium), 260_000);
    }

    #[test]
    fn pair_empty_input_is_identity() {
        let expected = hex!("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(run_pair(&[]).unwrap().as_ref(), expected);
        assert_eq!(pair_gas(&[], Revision::Istanbul), 45_000);
        assert_eq!(pair_gas(&[], Revision::Byzantium), 100_000);
    }

    #[test]
    fn pair_skips_identity_pairs() {
        // e(0, Q) = 1 for the G2 generator Q.
        let input = hex!(
            "0000000000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000000"
            "198e9393920d483a7260bfb731fb5d25f1aa493335a9e71297e485b7aef312c2"
            "1800deef121f1e76426a00665e5c4479674322d4f75edadd46debd5cd992f6ed"
            "090689d0585ff075ec9e99ad690c3395bc4b313370b38ef355acdadcd122975b"
            "12c85ea5db8c6deb4aab71808dcb408fe3d1e7690c43d37b4ce6cc0166fa7daa"
        );
        let expected = hex!("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(run_pair(&input).unwrap().as_ref(), expected);
    }

    #[test]
    fn pair_rejects_invalid_length() {
        let input = [0x11u8; 95];
        assert_eq!(run_pair(&input), Err(PrecompileError::Bn128PairLength));
    }

    #[test]
    fn pair_rejects_point_off_curve() {
        let input = [0x11u8; PAIR_ELEMENT_LEN];
        assert_eq!(
            run_pair(&input),
            Err(PrecompileError::Bn128AffineGFailedToCreate)
        );
    }
}
