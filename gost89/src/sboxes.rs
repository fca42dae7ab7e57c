/// Four lookup tables, one per input byte, with both nibble substitutions
/// applied and the result already shifted into place.
pub type ExpSbox = [[u32; 256]; 4];
/// Eight 4-bit substitution rows; row `i` substitutes nibble `i` counting
/// from the least significant one.
pub type SboxRows = [[u8; 16]; 8];

/// Trait for GOST 28147-89 S-box parameter sets
pub trait Sbox {
    /// Parameter set name
    const NAME: &'static str;
    /// Substitution rows
    const SBOX: SboxRows;
    /// Byte-wise expansion of `SBOX`, computed at compile time
    const EXP_SBOX: ExpSbox = expand(&Self::SBOX);

    /// Round function: `rotl11(S(a + k mod 2^32))`
    #[inline(always)]
    fn g(a: u32, k: u32) -> u32 {
        let x = a.wrapping_add(k);
        let y = Self::EXP_SBOX[0][(x & 0xff) as usize]
            | Self::EXP_SBOX[1][((x >> 8) & 0xff) as usize]
            | Self::EXP_SBOX[2][((x >> 16) & 0xff) as usize]
            | Self::EXP_SBOX[3][(x >> 24) as usize];
        y.rotate_left(11)
    }
}

const fn expand(rows: &SboxRows) -> ExpSbox {
    let mut out = [[0u32; 256]; 4];
    let mut i = 0;
    while i < 4 {
        let mut b = 0;
        while b < 256 {
            let lo = rows[2 * i][b & 0x0f] as u32;
            let hi = rows[2 * i + 1][b >> 4] as u32;
            out[i][b] = (lo | (hi << 4)) << (8 * i);
            b += 1;
        }
        i += 1;
    }
    out
}

/// S-box defined in GOST R 34.12-2015 (`id-tc26-gost-28147-param-Z`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tc26;

impl Sbox for Tc26 {
    const NAME: &'static str = "Tc26";
    const SBOX: SboxRows = [
        [12, 4, 6, 2, 10, 5, 11, 9, 14, 8, 13, 7, 0, 3, 15, 1],
        [6, 8, 2, 3, 9, 10, 5, 12, 1, 14, 4, 7, 11, 13, 0, 15],
        [11, 3, 5, 8, 2, 15, 10, 13, 14, 1, 7, 4, 12, 9, 6, 0],
        [12, 8, 2, 1, 13, 4, 15, 6, 7, 0, 10, 5, 3, 14, 9, 11],
        [7, 15, 5, 10, 8, 1, 6, 13, 0, 9, 3, 14, 11, 4, 2, 12],
        [5, 13, 15, 6, 9, 2, 12, 10, 11, 7, 8, 1, 4, 3, 14, 0],
        [8, 14, 2, 5, 6, 9, 1, 12, 15, 4, 11, 0, 13, 10, 3, 7],
        [1, 7, 14, 13, 0, 5, 8, 3, 4, 15, 10, 6, 9, 12, 11, 2],
    ];
}

/// S-box `id-Gost28147-89-CryptoPro-A-ParamSet` (RFC 4357)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CryptoProA;

impl Sbox for CryptoProA {
    const NAME: &'static str = "CryptoProA";
    const SBOX: SboxRows = [
        [9, 6, 3, 2, 8, 11, 1, 7, 10, 4, 14, 15, 12, 0, 13, 5],
        [3, 7, 14, 9, 8, 10, 15, 0, 5, 2, 6, 12, 11, 4, 13, 1],
        [14, 4, 6, 2, 11, 3, 13, 8, 12, 15, 5, 10, 0, 7, 1, 9],
        [14, 7, 10, 12, 13, 1, 3, 9, 0, 2, 11, 4, 15, 8, 5, 6],
        [11, 5, 1, 9, 8, 13, 15, 0, 14, 4, 2, 3, 12, 7, 10, 6],
        [3, 10, 13, 12, 1, 2, 0, 11, 7, 5, 9, 4, 8, 15, 14, 6],
        [1, 13, 2, 9, 7, 10, 6, 0, 8, 12, 4, 5, 15, 3, 11, 14],
        [11, 10, 15, 5, 0, 12, 14, 8, 6, 2, 3, 9, 1, 7, 13, 4],
    ];
}

/// Test S-box `id-GostR3411-94-TestParamSet`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestSbox;

impl Sbox for TestSbox {
    const NAME: &'static str = "TestSbox";
    const SBOX: SboxRows = [
        [4, 10, 9, 2, 13, 8, 0, 14, 6, 11, 1, 12, 7, 15, 5, 3],
        [14, 11, 4, 12, 6, 13, 15, 10, 2, 3, 8, 1, 0, 7, 5, 9],
        [5, 8, 1, 13, 10, 3, 4, 2, 14, 15, 12, 7, 6, 0, 9, 11],
        [7, 13, 10, 1, 0, 8, 9, 15, 14, 4, 6, 12, 11, 2, 5, 3],
        [6, 12, 7, 1, 5, 15, 13, 8, 4, 10, 9, 14, 0, 3, 11, 2],
        [4, 11, 10, 0, 7, 2, 1, 13, 3, 6, 8, 5, 9, 12, 15, 14],
        [13, 11, 4, 1, 3, 15, 5, 9, 0, 10, 14, 7, 6, 8, 2, 12],
        [1, 15, 13, 0, 5, 7, 10, 4, 9, 2, 3, 14, 6, 11, 8, 12],
    ];
}
