//! CryptoPro-style KEK diversification, after RFC 4357 section 6.5.

use gost89::{
    cipher::{generic_array::GenericArray, InnerIvInit, KeyInit},
    Gost89, Sbox, BLOCK_SIZE, KEY_SIZE,
};
use gost_cfb::Cfb;
use zeroize::Zeroizing;

use crate::UKM_SIZE;

/// Derives the transport key from `kek` and `ukm`.
///
/// Each UKM byte drives one CFB pass of the key over itself; the IV of the
/// pass is the pair of sums of the little-endian key words whose index bit
/// is set (first half) or clear (second half) in that byte.
pub(crate) fn cryptopro_diversify<S: Sbox>(
    kek: &[u8; KEY_SIZE],
    ukm: &[u8; UKM_SIZE],
) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut key = Zeroizing::new(*kek);
    for &u in ukm.iter() {
        let mut set = 0u32;
        let mut clear = 0u32;
        for (j, chunk) in key.chunks_exact(4).enumerate() {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            let w = u32::from_le_bytes(word);
            if (u >> j) & 1 == 1 {
                set = set.wrapping_add(w);
            } else {
                clear = clear.wrapping_add(w);
            }
        }

        let mut iv = [0u8; BLOCK_SIZE];
        iv[..4].copy_from_slice(&set.to_le_bytes());
        iv[4..].copy_from_slice(&clear.to_le_bytes());

        let cipher = Gost89::<S>::new(GenericArray::from_slice(&key[..]));
        let mut cfb = Cfb::inner_iv_init(cipher, GenericArray::from_slice(&iv));
        cfb.encrypt(&mut key[..]);
    }
    key
}
