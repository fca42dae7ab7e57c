//! Implementation of the [block cipher][1] defined in GOST 28147-89
//! and GOST R 34.12-2015, generic over the S-box parameter set.
//!
//! # Examples
//! ```
//! use gost89::Magma;
//! use gost89::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! // Example vector from GOST 34.12-2018
//! let key = hex!("
//!     FFEEDDCCBBAA99887766554433221100
//!     F0F1F2F3F4F5F6F7F8F9FAFBFCFDFEFF
//! ");
//! let plaintext = hex!("FEDCBA9876543210");
//! let ciphertext = hex!("4EE901E5C2D8CA3D");
//!
//! let cipher = Magma::new(GenericArray::from_slice(&key));
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! Key and block words are read big-endian, following GOST R 34.12-2015.
//!
//! [1]: https://en.wikipedia.org/wiki/GOST_(block_cipher)
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U32, U8},
    AlgorithmName, BlockCipher, KeyInit, KeySizeUser,
};
use core::{fmt, marker::PhantomData};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod sboxes;

pub use sboxes::{CryptoProA, ExpSbox, Sbox, SboxRows, Tc26, TestSbox};

/// Block over which the GOST 28147-89 cipher operates.
pub type Block = cipher::Block<Magma>;
/// The GOST 28147-89 cipher key.
pub type Key = cipher::Key<Magma>;

/// Key size in bytes.
pub const KEY_SIZE: usize = 32;
/// Block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Block cipher defined in GOST 28147-89 generic over S-box
pub struct Gost89<S: Sbox> {
    key: [u32; 8],
    _p: PhantomData<S>,
}

impl<S: Sbox> Gost89<S> {
    /// Subkey used by encryption round `round` (zero based): subkeys
    /// 0..7 three times in ascending order, then 7..0.
    #[inline(always)]
    fn subkey(&self, round: usize) -> u32 {
        if round < 24 {
            self.key[round % 8]
        } else {
            self.key[31 - round]
        }
    }
}

impl<S: Sbox> Clone for Gost89<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            _p: PhantomData,
        }
    }
}

impl<S: Sbox> KeySizeUser for Gost89<S> {
    type KeySize = U32;
}

impl<S: Sbox> KeyInit for Gost89<S> {
    fn new(key: &cipher::Key<Self>) -> Self {
        let mut key_u32 = [0u32; 8];
        key.chunks_exact(4)
            .zip(key_u32.iter_mut())
            .for_each(|(chunk, v)| *v = to_u32(chunk));
        Self {
            key: key_u32,
            _p: PhantomData,
        }
    }
}

impl<S: Sbox> BlockCipher for Gost89<S> {}

cipher::impl_simple_block_encdec!(
    <S: Sbox> Gost89, U8, cipher, block,
    encrypt: {
        let b = block.get_in();
        let mut v = (to_u32(&b[0..4]), to_u32(&b[4..8]));
        for round in 0..32 {
            v = (v.1, v.0 ^ S::g(v.1, cipher.subkey(round)));
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&v.1.to_be_bytes());
        block[4..8].copy_from_slice(&v.0.to_be_bytes());
    }
    decrypt: {
        let b = block.get_in();
        let mut v = (to_u32(&b[0..4]), to_u32(&b[4..8]));
        for round in (0..32).rev() {
            v = (v.1, v.0 ^ S::g(v.1, cipher.subkey(round)));
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&v.1.to_be_bytes());
        block[4..8].copy_from_slice(&v.0.to_be_bytes());
    }
);

impl<S: Sbox> AlgorithmName for Gost89<S> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gost89<{}>", S::NAME)
    }
}

impl<S: Sbox> fmt::Debug for Gost89<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gost89<{}> {{ ... }}", S::NAME)
    }
}

impl<S: Sbox> Drop for Gost89<S> {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl<S: Sbox> ZeroizeOnDrop for Gost89<S> {}

/// Block cipher defined in GOST R 34.12-2015 (Magma)
pub type Magma = Gost89<Tc26>;
/// Block cipher defined in GOST 28147-89 with test S-box
pub type Gost89Test = Gost89<TestSbox>;
/// Block cipher defined in GOST 28147-89 with CryptoPro S-box version A
pub type Gost89CryptoProA = Gost89<CryptoProA>;

#[inline(always)]
fn to_u32(chunk: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(chunk);
    u32::from_be_bytes(buf)
}
