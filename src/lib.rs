//! # evm-precompile
//!
//! Implementations of the nine EVM precompiled contracts up to and
//! including Istanbul, exposed as `(gas, run)` function pairs.
//!
//! Each contract's [`GasFn`] prices a call from the input bytes and the
//! active [`Revision`]; it is total and reports unpayable costs as
//! [`u64::MAX`]. Each [`RunFn`] maps input bytes to output bytes,
//! deterministically and independently of the revision. Gas accounting
//! against a call budget, dispatch by address and state interaction belong
//! to the executor, not to this crate.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod blake2;
pub mod bn128;
pub mod hash;
pub mod identity;
pub mod interface;
pub mod modexp;
pub mod secp256k1;
pub mod utilities;

pub use interface::*;

use primitives::Address;

/// Computes the linear gas cost `base + word · ⌈len/32⌉`.
pub fn calc_linear_cost_u32(len: usize, base: u64, word: u64) -> u64 {
    (len as u64).div_ceil(32) * word + base
}

/// Number of contracts active before Byzantium.
pub const NUM_FRONTIER_CONTRACTS: usize = 4;
/// Number of contracts active from Byzantium.
pub const NUM_BYZANTIUM_CONTRACTS: usize = 8;
/// Number of contracts active from Istanbul.
pub const NUM_ISTANBUL_CONTRACTS: usize = 9;

/// The precompiled contracts, indexed by address minus one.
///
/// Index 0 is `ecrecover` at address `0x…01`, index 8 is `blake2f` at
/// address `0x…09`. Callers activate the prefix selected by [`contracts`].
pub const CONTRACTS: [Contract; NUM_ISTANBUL_CONTRACTS] = [
    Contract {
        gas: secp256k1::ec_recover_gas,
        run: secp256k1::ec_recover_run,
    },
    Contract {
        gas: hash::sha256_gas,
        run: hash::sha256_run,
    },
    Contract {
        gas: hash::ripemd160_gas,
        run: hash::ripemd160_run,
    },
    Contract {
        gas: identity::identity_gas,
        run: identity::identity_run,
    },
    Contract {
        gas: modexp::modexp_gas,
        run: modexp::modexp_run,
    },
    Contract {
        gas: bn128::add_gas,
        run: bn128::run_add,
    },
    Contract {
        gas: bn128::mul_gas,
        run: bn128::run_mul,
    },
    Contract {
        gas: bn128::pair_gas,
        run: bn128::run_pair,
    },
    Contract {
        gas: blake2::blake2f_gas,
        run: blake2::blake2f_run,
    },
];

/// Returns the contracts active at the given revision: the first 4 before
/// Byzantium, 8 before Istanbul, all 9 from Istanbul on.
pub fn contracts(rev: Revision) -> &'static [Contract] {
    let n = if rev >= Revision::Istanbul {
        NUM_ISTANBUL_CONTRACTS
    } else if rev >= Revision::Byzantium {
        NUM_BYZANTIUM_CONTRACTS
    } else {
        NUM_FRONTIER_CONTRACTS
    };
    &CONTRACTS[..n]
}

/// Const function for making an address by concatenating the bytes from
/// two given numbers.
///
/// Note that 32 + 128 = 160 = 20 bytes (the length of an address).
///
/// This function is used as a convenience for specifying the addresses of
/// the various precompiles.
#[inline]
pub const fn u64_to_address(x: u64) -> Address {
    let x = x.to_be_bytes();
    Address::new([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7],
    ])
}
