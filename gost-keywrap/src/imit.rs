//! GOST 28147-89 imitovstavka: 16-round CBC-like MAC.

use gost89::{Sbox, BLOCK_SIZE, KEY_SIZE};
use zeroize::Zeroize;

/// MAC length emitted by the key export methods.
pub const MAC_SIZE: usize = 4;

/// Computes the MAC of `data` under `key`, starting from `iv`.
///
/// The last partial block is zero padded. A message of a single block is
/// followed by an extra all-zero block, as GOST 28147-89 requires at least
/// two MAC iterations.
pub(crate) fn imit<S: Sbox>(key: &[u8; KEY_SIZE], iv: &[u8; BLOCK_SIZE], data: &[u8]) -> [u8; MAC_SIZE] {
    let mut k = [0u32; 8];
    for (w, chunk) in k.iter_mut().zip(key.chunks_exact(4)) {
        *w = be_u32(chunk);
    }

    let mut state = *iv;
    let mut blocks = 0;
    for chunk in data.chunks(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block[..chunk.len()].copy_from_slice(chunk);
        absorb::<S>(&k, &mut state, &block);
        block.zeroize();
        blocks += 1;
    }
    if blocks == 1 {
        absorb::<S>(&k, &mut state, &[0u8; BLOCK_SIZE]);
    }

    let mut mac = [0u8; MAC_SIZE];
    mac.copy_from_slice(&state[..MAC_SIZE]);
    state.zeroize();
    k.zeroize();
    mac
}

fn absorb<S: Sbox>(k: &[u32; 8], state: &mut [u8; BLOCK_SIZE], block: &[u8; BLOCK_SIZE]) {
    for (s, b) in state.iter_mut().zip(block.iter()) {
        *s ^= *b;
    }
    let mut v = (be_u32(&state[0..4]), be_u32(&state[4..8]));
    for round in 0..16 {
        v = (v.1, v.0 ^ S::g(v.1, k[round % 8]));
    }
    state[0..4].copy_from_slice(&v.0.to_be_bytes());
    state[4..8].copy_from_slice(&v.1.to_be_bytes());
}

fn be_u32(chunk: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(chunk);
    u32::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gost89::Tc26;
    use hex_literal::hex;

    const KEY: [u8; KEY_SIZE] = hex!("
        FFEEDDCCBBAA99887766554433221100
        F0F1F2F3F4F5F6F7F8F9FAFBFCFDFEFF
    ");
    const DATA: [u8; 32] = hex!("
        92DEF06B3C130A59DB54C704F8189D20
        4A98FB2E67A8024C8912409B17B57E41
    ");

    // regression value for the big-endian cipher
    #[test]
    fn full_blocks_regression() {
        assert_eq!(imit::<Tc26>(&KEY, &[0; 8], &DATA), hex!("A4F54A7D"));
    }

    #[test]
    fn short_message_is_padded_to_two_blocks() {
        assert_eq!(imit::<Tc26>(&KEY, &[0; 8], &DATA[..5]), hex!("24929EC4"));
        let mut padded = [0u8; 16];
        padded[..5].copy_from_slice(&DATA[..5]);
        assert_eq!(imit::<Tc26>(&KEY, &[0; 8], &padded), hex!("24929EC4"));
    }

    #[test]
    fn iv_changes_mac() {
        assert_ne!(
            imit::<Tc26>(&KEY, &[0; 8], &DATA),
            imit::<Tc26>(&KEY, &[1; 8], &DATA),
        );
    }
}
