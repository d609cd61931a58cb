//! Interface for the precompiled contracts: the protocol revision tag, the
//! contract table entry, and the run result and error types.
use core::fmt;
use primitives::Bytes;

/// Protocol revision, numbered as in the EVMC ABI.
///
/// Only the [`Istanbul`](Revision::Istanbul) and [`Berlin`](Revision::Berlin)
/// thresholds change the behavior of the contracts in this crate: Istanbul
/// reprices the bn128 operations (EIP-1108) and Berlin switches `MODEXP`
/// pricing to EIP-2565. Every other value behaves as "before" or "after"
/// those two cut-offs.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Revision {
    Frontier = 0,
    Homestead = 1,
    TangerineWhistle = 2,
    SpuriousDragon = 3,
    Byzantium = 4,
    Constantinople = 5,
    Petersburg = 6,
    Istanbul = 7,
    Berlin = 8,
    London = 9,
    Paris = 10,
    Shanghai = 11,
    Cancun = 12,
    Prague = 13,
}

impl Revision {
    /// Maps a raw EVMC revision number onto [`Revision`], clamping values
    /// outside the known range to the nearest end.
    pub const fn from_evmc(raw: i32) -> Self {
        match raw {
            i32::MIN..=0 => Self::Frontier,
            1 => Self::Homestead,
            2 => Self::TangerineWhistle,
            3 => Self::SpuriousDragon,
            4 => Self::Byzantium,
            5 => Self::Constantinople,
            6 => Self::Petersburg,
            7 => Self::Istanbul,
            8 => Self::Berlin,
            9 => Self::London,
            10 => Self::Paris,
            11 => Self::Shanghai,
            12 => Self::Cancun,
            _ => Self::Prague,
        }
    }
}

/// A precompile operation result type.
///
/// Returns either `Ok(output_bytes)` or `Err(error)`. An `Err` corresponds
/// to a precompile failure that consumes all call gas; `Ok` with an empty
/// output is a successful call with no return data (e.g. `ecrecover` on an
/// unrecoverable signature).
pub type PrecompileResult = Result<Bytes, PrecompileError>;

/// Gas cost function. Total over all inputs; costs beyond the 64-bit range
/// are reported as [`u64::MAX`], which no call can afford.
pub type GasFn = fn(input: &[u8], rev: Revision) -> u64;

/// Run function. Pure over the input bytes; the revision never affects the
/// output, only the price.
pub type RunFn = fn(input: &[u8]) -> PrecompileResult;

/// A precompiled contract: its gas cost function and its run function.
#[derive(Clone, Copy, Debug)]
pub struct Contract {
    pub gas: GasFn,
    pub run: RunFn,
}

/// Precompile error type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrecompileError {
    /// Blake2 input is not exactly 213 bytes
    Blake2WrongLength,
    /// Blake2 final indicator flag is neither 0 nor 1
    Blake2WrongFinalIndicatorFlag,
    /// Bn128 field element is not a member of the field
    Bn128FieldPointNotAMember,
    /// Bn128 affine point failed to create (off curve or outside the subgroup)
    Bn128AffineGFailedToCreate,
    /// Bn128 pairing input is not a multiple of the pair length
    Bn128PairLength,
}

impl core::error::Error for PrecompileError {}

impl fmt::Display for PrecompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Blake2WrongLength => "wrong input length for blake2",
            Self::Blake2WrongFinalIndicatorFlag => "wrong final indicator flag for blake2",
            Self::Bn128FieldPointNotAMember => "field point not a member of bn128 curve",
            Self::Bn128AffineGFailedToCreate => "failed to create affine g point for bn128 curve",
            Self::Bn128PairLength => "bn128 invalid pair length",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_ordering_matches_evmc_numbering() {
        assert!(Revision::Byzantium < Revision::Istanbul);
        assert!(Revision::Istanbul < Revision::Berlin);
        assert_eq!(Revision::Istanbul as i32, 7);
        assert_eq!(Revision::Berlin as i32, 8);
    }

    #[test]
    fn from_evmc_clamps_out_of_range() {
        assert_eq!(Revision::from_evmc(-3), Revision::Frontier);
        assert_eq!(Revision::from_evmc(7), Revision::Istanbul);
        assert_eq!(Revision::from_evmc(8), Revision::Berlin);
        assert_eq!(Revision::from_evmc(99), Revision::Prague);
    }
}
