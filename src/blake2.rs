//! `BLAKE2b F` compression function precompile (EIP-152).
use crate::interface::{PrecompileError, PrecompileResult, Revision};

/// Gas per compression round.
pub const F_ROUND: u64 = 1;
/// The exact input length the contract accepts.
const INPUT_LENGTH: usize = 213;

/// The price is the caller-chosen round count, read big-endian from the
/// first 4 bytes. Inputs too short to hold it are priced at zero; the run
/// rejects them anyway.
pub fn blake2f_gas(input: &[u8], _rev: Revision) -> u64 {
    if input.len() < 4 {
        return 0;
    }
    u32::from_be_bytes(input[..4].try_into().unwrap()) as u64 * F_ROUND
}

/// Runs the BLAKE2b compression function for the requested number of
/// rounds.
///
/// Input format:
/// `[4 bytes for rounds][64 bytes for h][128 bytes for m][8 bytes for t_0][8 bytes for t_1][1 byte for f]`
///
/// See: <https://eips.ethereum.org/EIPS/eip-152>
pub fn blake2f_run(input: &[u8]) -> PrecompileResult {
    if input.len() != INPUT_LENGTH {
        return Err(PrecompileError::Blake2WrongLength);
    }

    // The final block indicator flag must be exactly 0 or 1.
    let f = match input[212] {
        1 => true,
        0 => false,
        _ => return Err(PrecompileError::Blake2WrongFinalIndicatorFlag),
    };

    // Rounds, big-endian, unlike every other field.
    let rounds = u32::from_be_bytes(input[..4].try_into().unwrap()) as usize;

    // State vector h.
    let mut h = [0u64; 8];
    for (i, item) in h.iter_mut().enumerate() {
        *item = u64::from_le_bytes(input[4 + i * 8..12 + i * 8].try_into().unwrap());
    }

    // Message block vector m.
    let mut m = [0u64; 16];
    for (i, item) in m.iter_mut().enumerate() {
        *item = u64::from_le_bytes(input[68 + i * 8..76 + i * 8].try_into().unwrap());
    }

    // 2w-bit offset counter t.
    let t = [
        u64::from_le_bytes(input[196..204].try_into().unwrap()),
        u64::from_le_bytes(input[204..212].try_into().unwrap()),
    ];

    algo::compress(rounds, &mut h, m, t, f);

    let mut out = [0u8; 64];
    for (i, h) in (0..64).step_by(8).zip(h.iter()) {
        out[i..i + 8].copy_from_slice(&h.to_le_bytes());
    }

    Ok(out.into())
}

/// BLAKE2b compression algorithm, RFC 7693 with a caller-chosen round
/// count.
pub mod algo {
    /// SIGMA from the spec: <https://datatracker.ietf.org/doc/html/rfc7693#section-2.7>
    pub const SIGMA: [[usize; 16]; 10] = [
        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
        [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
        [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
        [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
        [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
        [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
        [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
        [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
        [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
        [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
    ];

    /// Initialization vector, the same constants as SHA-512.
    pub const IV: [u64; 8] = [
        0x6a09e667f3bcc908,
        0xbb67ae8584caa73b,
        0x3c6ef372fe94f82b,
        0xa54ff53a5f1d36f1,
        0x510e527fade682d1,
        0x9b05688c2b3e6c1f,
        0x1f83d9abfb41bd6b,
        0x5be0cd19137e2179,
    ];

    /// G mixing function: <https://tools.ietf.org/html/rfc7693#section-3.1>
    #[inline(always)]
    #[allow(clippy::many_single_char_names)]
    fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
        v[a] = v[a].wrapping_add(v[b]);
        v[a] = v[a].wrapping_add(x);
        v[d] ^= v[a];
        v[d] = v[d].rotate_right(32);
        v[c] = v[c].wrapping_add(v[d]);
        v[b] ^= v[c];
        v[b] = v[b].rotate_right(24);

        v[a] = v[a].wrapping_add(v[b]);
        v[a] = v[a].wrapping_add(y);
        v[d] ^= v[a];
        v[d] = v[d].rotate_right(16);
        v[c] = v[c].wrapping_add(v[d]);
        v[b] ^= v[c];
        v[b] = v[b].rotate_right(63);
    }

    #[inline(always)]
    fn round(v: &mut [u64; 16], m: &[u64; 16], r: usize) {
        // Message word selection permutation for this round.
        let s = &SIGMA[r % 10];
        g(v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        g(v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        g(v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        g(v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

        g(v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        g(v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        g(v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        g(v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    /// Compression function F. Takes the state vector `h`, message block
    /// vector `m`, 2w-bit offset counter `t`, and final block indicator
    /// flag `f`, and updates `h` in place.
    pub fn compress(rounds: usize, h: &mut [u64; 8], m: [u64; 16], t: [u64; 2], f: bool) {
        let mut v = [0u64; 16];
        v[..8].copy_from_slice(h); // First half from state.
        v[8..].copy_from_slice(&IV); // Second half from IV.

        v[12] ^= t[0];
        v[13] ^= t[1];

        if f {
            v[14] = !v[14]; // Invert all bits if the last-block-flag is set.
        }

        for i in 0..rounds {
            round(&mut v, &m, i);
        }

        for i in 0..8 {
            h[i] ^= v[i] ^ v[i + 8];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::hex;

    // EIP-152 test vectors 4-7 share everything but the round count and
    // the final block flag.
    fn eip152_input(rounds_be: [u8; 4], f: u8) -> Vec<u8> {
        let mut input = Vec::with_capacity(213);
        input.extend_from_slice(&rounds_be);
        input.extend_from_slice(&hex!(
            "48c9bdf267e6096a3ba7ca8485ae67bb2bf894fe72f36e3cf1361d5f3af54fa5"
            "d182e6ad7f520e511f6c3e2b8c68059b6bbd41fbabd9831f79217e1319cde05b"
        ));
        input.extend_from_slice(&hex!(
            "6162630000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000000"
            "0000000000000000000000000000000000000000000000000000000000000000"
        ));
        input.extend_from_slice(&hex!("03000000000000000000000000000000"));
        input.push(f);
        input
    }

    #[test]
    fn eip152_vector_4_zero_rounds() {
        let input = eip152_input([0, 0, 0, 0], 1);
        assert_eq!(blake2f_gas(&input, Revision::Istanbul), 0);
        let out = blake2f_run(&input).unwrap();
        assert_eq!(
            out.as_ref(),
            hex!(
                "08c9bcf367e6096a3ba7ca8485ae67bb2bf894fe72f36e3cf1361d5f3af54fa5"
                "d282e6ad7f520e511f6c3e2b8c68059b9442be0454267ce079217e1319cde05b"
            )
        );
    }

    #[test]
    fn eip152_vector_5_twelve_rounds() {
        let input = eip152_input([0, 0, 0, 12], 1);
        assert_eq!(blake2f_gas(&input, Revision::Istanbul), 12);
        let out = blake2f_run(&input).unwrap();
        assert_eq!(
            out.as_ref(),
            hex!(
                "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1"
                "7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
            )
        );
    }

    #[test]
    fn eip152_vector_7_one_round() {
        let input = eip152_input([0, 0, 0, 1], 1);
        assert_eq!(blake2f_gas(&input, Revision::Istanbul), 1);
        let out = blake2f_run(&input).unwrap();
        assert_eq!(
            out.as_ref(),
            hex!(
                "b63a380cb2897d521994a85234ee2c181b5f844d2c624c002677e9703449d2fb"
                "a551b3a8333bcdf5f2f7e08993d53923de3d64fcc68c034e717b9293fed7a421"
            )
        );
    }

    #[test]
    fn rejects_wrong_length() {
        let mut input = eip152_input([0, 0, 0, 12], 1);
        input.pop();
        assert_eq!(blake2f_run(&input), Err(PrecompileError::Blake2WrongLength));

        let mut input = eip152_input([0, 0, 0, 12], 1);
        input.push(0);
        assert_eq!(blake2f_run(&input), Err(PrecompileError::Blake2WrongLength));
    }

    #[test]
    fn rejects_bad_final_flag() {
        let input = eip152_input([0, 0, 0, 12], 2);
        assert_eq!(
            blake2f_run(&input),
            Err(PrecompileError::Blake2WrongFinalIndicatorFlag)
        );
    }

    #[test]
    fn short_input_is_priced_at_zero() {
        assert_eq!(blake2f_gas(&hex!("0000"), Revision::Istanbul), 0);
        assert_eq!(
            blake2f_run(&hex!("0000")),
            Err(PrecompileError::Blake2WrongLength)
        );
    }
}
