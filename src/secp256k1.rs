//! `ecrecover` precompile and secp256k1 helpers.
//!
//! Uses the `secp256k1` crate, the Rust bindings to libsecp256k1 (the C
//! implementation used in Bitcoin Core). The recovery context carries only
//! precomputed tables and is expensive to build, so each thread constructs
//! one lazily on first use and reuses it afterwards.
//!
//! Input format:
//! `[32 bytes for message hash][32 bytes for v][32 bytes for r][32 bytes for s]`
//!
//! Output format:
//! `[12 zero bytes][20 bytes for recovered address]`

use crate::{
    interface::{PrecompileResult, Revision},
    utilities::right_pad,
};
use primitives::{keccak256, Bytes, B256, B512, U256};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey,
};

/// Base gas of the operation.
pub const ECRECOVER_BASE: u64 = 3_000;

/// The secp256k1 group order `n`.
const SECP256K1N: U256 = U256::from_limbs([
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
]);

thread_local! {
    /// Signing+verification context, built once per thread.
    static SECP256K1: Secp256k1<All> = Secp256k1::new();
}

/// Checks that both signature components are in `[1, n)`.
///
/// The EIP-2 lower-half-order constraint on `s` does not apply to the
/// precompile.
fn is_valid_signature(r: U256, s: U256) -> bool {
    r != U256::ZERO && s != U256::ZERO && r < SECP256K1N && s < SECP256K1N
}

/// Constant 3000, independent of input length and revision.
pub fn ec_recover_gas(_input: &[u8], _rev: Revision) -> u64 {
    ECRECOVER_BASE
}

/// `ecrecover` precompile function. Read more about input and output format
/// in [this module docs](self).
///
/// An unrecoverable signature is not an error: the call succeeds with empty
/// return data.
pub fn ec_recover_run(input: &[u8]) -> PrecompileResult {
    let input = right_pad::<128>(input);

    let r = U256::from_be_slice(&input[64..96]);
    let s = U256::from_be_slice(&input[96..128]);
    if !is_valid_signature(r, s) {
        return Ok(Bytes::new());
    }

    // `v` must be a 32-byte big-endian integer equal to 27 or 28.
    if !(input[32..63].iter().all(|&b| b == 0) && matches!(input[63], 27 | 28)) {
        return Ok(Bytes::new());
    }

    let msg = B256::from_slice(&input[0..32]);
    let recid = input[63] - 27;
    let sig = B512::from_slice(&input[64..128]);

    let out = match ecrecover(&sig, recid, &msg) {
        Ok(address) => address.to_vec().into(),
        Err(_) => Bytes::new(),
    };
    Ok(out)
}

/// Recovers the signer of `msg` from a compact signature and a recovery id,
/// returning the 32-byte word holding the signer's address.
pub fn ecrecover(sig: &B512, recid: u8, msg: &B256) -> Result<B256, secp256k1::Error> {
    let recid = RecoveryId::try_from(recid as i32).expect("recovery ID is valid");
    let sig = RecoverableSignature::from_compact(sig.as_slice(), recid)?;

    let msg = Message::from_digest(msg.0);
    let public = SECP256K1.with(|secp| secp.recover_ecdsa(&msg, &sig))?;

    let mut hash = keccak256(&public.serialize_uncompressed()[1..]);
    hash[..12].fill(0);
    Ok(hash)
}

/// Raw ECDH: the x coordinate of the shared secret point `secret · public`.
///
/// The unhashed variant consumed by ECIES-style handshakes.
pub fn ecdh_x(public_key: &PublicKey, secret_key: &SecretKey) -> B256 {
    let point = secp256k1::ecdh::shared_secret_point(public_key, secret_key);
    B256::from_slice(&point[..32])
}
