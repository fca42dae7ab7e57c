//! [Cipher feedback][1] (CFB) mode with full block feedback.
//!
//! The shift register always advances with ciphertext and the underlying
//! cipher is only ever used in the encryption direction. Messages of any
//! length are supported: a trailing partial segment consumes a prefix of
//! the keystream block, and a later call on the same stream continues
//! from where the previous one stopped.
//!
//! ```
//! use gost_cfb::Cfb;
//! use gost_cfb::cipher::KeyIvInit;
//! use gost89::Magma;
//!
//! let key = [0x42; 32];
//! let iv = [0x24; 8];
//! let mut buf = *b"arbitrary length message";
//!
//! Cfb::<Magma>::new_from_slices(&key, &iv).unwrap().encrypt(&mut buf);
//! assert_ne!(&buf, b"arbitrary length message");
//!
//! Cfb::<Magma>::new_from_slices(&key, &iv).unwrap().decrypt(&mut buf);
//! assert_eq!(&buf, b"arbitrary length message");
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/Block_cipher_mode_of_operation#Cipher_feedback_(CFB)

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    crypto_common::{InnerUser, IvSizeUser},
    generic_array::typenum::Unsigned,
    Block, BlockCipher, BlockEncrypt, BlockSizeUser, InnerIvInit, Iv,
};
use zeroize::Zeroize;

/// CFB mode stream over the block cipher `C`.
pub struct Cfb<C: BlockEncrypt + BlockCipher> {
    cipher: C,
    /// Keystream block being consumed; bytes before `pos` were already
    /// replaced by the matching ciphertext bytes.
    iv: Block<C>,
    pos: usize,
}

impl<C: BlockEncrypt + BlockCipher> Cfb<C> {
    /// Encrypt `buf` in place, continuing the stream.
    pub fn encrypt(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            self.refill();
            self.iv[self.pos] ^= *b;
            *b = self.iv[self.pos];
            self.pos += 1;
        }
    }

    /// Decrypt `buf` in place, continuing the stream.
    pub fn decrypt(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            self.refill();
            let c = *b;
            *b ^= self.iv[self.pos];
            self.iv[self.pos] = c;
            self.pos += 1;
        }
    }

    /// Encrypt `input` into `output` of the same length.
    ///
    /// # Panics
    /// If `input` and `output` lengths differ.
    pub fn encrypt_b2b(&mut self, input: &[u8], output: &mut [u8]) {
        assert_eq!(input.len(), output.len());
        output.copy_from_slice(input);
        self.encrypt(output);
    }

    /// Decrypt `input` into `output` of the same length.
    ///
    /// # Panics
    /// If `input` and `output` lengths differ.
    pub fn decrypt_b2b(&mut self, input: &[u8], output: &mut [u8]) {
        assert_eq!(input.len(), output.len());
        output.copy_from_slice(input);
        self.decrypt(output);
    }

    /// Once a full segment of ciphertext sits in the register, turn it
    /// into the next keystream block.
    #[inline(always)]
    fn refill(&mut self) {
        if self.pos == C::BlockSize::USIZE {
            self.cipher.encrypt_block(&mut self.iv);
            self.pos = 0;
        }
    }
}

impl<C: BlockEncrypt + BlockCipher> BlockSizeUser for Cfb<C> {
    type BlockSize = C::BlockSize;
}

impl<C: BlockEncrypt + BlockCipher> InnerUser for Cfb<C> {
    type Inner = C;
}

impl<C: BlockEncrypt + BlockCipher> IvSizeUser for Cfb<C> {
    type IvSize = C::BlockSize;
}

impl<C: BlockEncrypt + BlockCipher> InnerIvInit for Cfb<C> {
    #[inline]
    fn inner_iv_init(cipher: C, iv: &Iv<Self>) -> Self {
        Self {
            cipher,
            iv: iv.clone(),
            pos: C::BlockSize::USIZE,
        }
    }
}

impl<C: BlockEncrypt + BlockCipher + Clone> Clone for Cfb<C> {
    fn clone(&self) -> Self {
        Self {
            cipher: self.cipher.clone(),
            iv: self.iv.clone(),
            pos: self.pos,
        }
    }
}

impl<C: BlockEncrypt + BlockCipher> Drop for Cfb<C> {
    fn drop(&mut self) {
        self.iv.as_mut_slice().zeroize();
    }
}
