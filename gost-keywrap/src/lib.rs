//! Key export methods for GOST 28147-89 session keys, laid out after the
//! two export methods of [RFC 4357][1].
//!
//! A 256-bit content-encryption key (CEK) is wrapped under a 256-bit
//! key-exchange key (KEK). The encoded blob is
//!
//! ```text
//! method id (1) || UKM (8) || ECB(KEK', CEK) (32) || IMIT(KEK', UKM, CEK) (4)
//! ```
//!
//! where `KEK'` is the KEK itself for [`KeyWrapMethod::GostKeyExport`] and
//! the UKM-diversified KEK for [`KeyWrapMethod::CryptoProKeyExport`].
//!
//! The cipher and the MAC read key and block words big-endian, as
//! GOST R 34.12-2015 does. RFC 4357 and CryptoPro use little-endian words,
//! so blobs produced here do not interoperate with them.
//!
//! # Examples
//! ```
//! use gost_keywrap::{KeyWrap, KeyWrapMethod};
//! use gost89::CryptoProA;
//!
//! let kek = [0x11; 32];
//! let cek = [0x22; 32];
//! let ukm = [0x33; 8];
//!
//! let wrap = KeyWrap::<CryptoProA>::new(&kek, KeyWrapMethod::CryptoProKeyExport).unwrap();
//! let blob = wrap.wrap_key(&cek, &ukm).unwrap();
//! let unwrapped = wrap.unwrap_key(&blob).unwrap();
//! assert_eq!(*unwrapped, cek);
//! ```
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc4357#section-6
#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub use gost89;

use core::{fmt, marker::PhantomData, str::FromStr};
use gost89::{
    cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit},
    Gost89, Sbox, BLOCK_SIZE,
};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

mod diversify;
mod imit;

pub use gost89::KEY_SIZE;
pub use imit::MAC_SIZE;

/// User keying material (UKM) size in bytes.
pub const UKM_SIZE: usize = 8;
/// Size of an encoded wrapped key.
pub const WRAPPED_KEY_SIZE: usize = 1 + UKM_SIZE + KEY_SIZE + MAC_SIZE;

const UKM_OFFSET: usize = 1;
const ENC_OFFSET: usize = UKM_OFFSET + UKM_SIZE;
const MAC_OFFSET: usize = ENC_OFFSET + KEY_SIZE;

/// Encoded wrapped key.
pub type WrappedKey = [u8; WRAPPED_KEY_SIZE];

/// Key wrapping errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Key, UKM or blob has the wrong length.
    InvalidSize {
        /// Which input was rejected
        what: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Supplied length in bytes
        actual: usize,
    },
    /// Export method identifier or name outside the supported set.
    UnsupportedMethod,
    /// Wrapped key failed verification.
    Integrity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize {
                what,
                expected,
                actual,
            } => write!(f, "invalid {} size: expected {}, got {}", what, expected, actual),
            Error::UnsupportedMethod => f.write_str("unsupported key export method"),
            Error::Integrity => f.write_str("wrapped key integrity check failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Key export method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyWrapMethod {
    /// KEK used directly (the method of RFC 4357, section 6.1).
    GostKeyExport = 0,
    /// KEK diversified with the UKM first (the method of RFC 4357, section 6.2).
    CryptoProKeyExport = 1,
}

impl KeyWrapMethod {
    /// All supported methods.
    pub const ALL: [KeyWrapMethod; 2] = [
        KeyWrapMethod::GostKeyExport,
        KeyWrapMethod::CryptoProKeyExport,
    ];

    /// Identifier stored in the first byte of the encoded blob.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            KeyWrapMethod::GostKeyExport => "GostKeyExport",
            KeyWrapMethod::CryptoProKeyExport => "CryptoProKeyExport",
        }
    }
}

impl TryFrom<u8> for KeyWrapMethod {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.id() == id)
            .ok_or(Error::UnsupportedMethod)
    }
}

impl FromStr for KeyWrapMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or(Error::UnsupportedMethod)
    }
}

impl fmt::Display for KeyWrapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key-exchange key bound to an export method and S-box parameter set.
pub struct KeyWrap<S: Sbox> {
    kek: Zeroizing<[u8; KEY_SIZE]>,
    method: KeyWrapMethod,
    _p: PhantomData<S>,
}

impl<S: Sbox> KeyWrap<S> {
    /// Binds `kek` to `method`.
    pub fn new(kek: &[u8], method: KeyWrapMethod) -> Result<Self, Error> {
        if kek.len() != KEY_SIZE {
            return Err(Error::InvalidSize {
                what: "key-exchange key",
                expected: KEY_SIZE,
                actual: kek.len(),
            });
        }
        let mut buf = Zeroizing::new([0u8; KEY_SIZE]);
        buf.copy_from_slice(kek);
        Ok(Self {
            kek: buf,
            method,
            _p: PhantomData,
        })
    }

    /// Export method this wrapper encodes with.
    pub fn method(&self) -> KeyWrapMethod {
        self.method
    }

    /// Wraps `cek` using caller supplied keying material.
    pub fn wrap_key(&self, cek: &[u8], ukm: &[u8; UKM_SIZE]) -> Result<WrappedKey, Error> {
        if cek.len() != KEY_SIZE {
            return Err(Error::InvalidSize {
                what: "session key",
                expected: KEY_SIZE,
                actual: cek.len(),
            });
        }
        let kek = self.transport_key(ukm);

        let mut out = [0u8; WRAPPED_KEY_SIZE];
        out[0] = self.method.id();
        out[UKM_OFFSET..ENC_OFFSET].copy_from_slice(ukm);

        let mac = imit::imit::<S>(&kek, ukm, cek);
        out[MAC_OFFSET..].copy_from_slice(&mac);

        let cipher = Gost89::<S>::new(GenericArray::from_slice(&kek[..]));
        let enc = &mut out[ENC_OFFSET..MAC_OFFSET];
        enc.copy_from_slice(cek);
        for block in enc.chunks_exact_mut(BLOCK_SIZE) {
            cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(out)
    }

    /// Wraps `cek` with a fresh UKM drawn from `rng`.
    pub fn wrap_key_with_rng<R: CryptoRng + RngCore>(
        &self,
        cek: &[u8],
        rng: &mut R,
    ) -> Result<WrappedKey, Error> {
        let mut ukm = [0u8; UKM_SIZE];
        rng.fill_bytes(&mut ukm);
        self.wrap_key(cek, &ukm)
    }

    /// Recovers the session key from `blob`.
    ///
    /// A wrong method tag, wrong KEK or any corruption of the blob all
    /// result in the same [`Error::Integrity`].
    pub fn unwrap_key(&self, blob: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>, Error> {
        if blob.len() != WRAPPED_KEY_SIZE {
            return Err(Error::InvalidSize {
                what: "wrapped key",
                expected: WRAPPED_KEY_SIZE,
                actual: blob.len(),
            });
        }
        let mut ukm = [0u8; UKM_SIZE];
        ukm.copy_from_slice(&blob[UKM_OFFSET..ENC_OFFSET]);
        let kek = self.transport_key(&ukm);

        let cipher = Gost89::<S>::new(GenericArray::from_slice(&kek[..]));
        let mut cek = Zeroizing::new([0u8; KEY_SIZE]);
        cek.copy_from_slice(&blob[ENC_OFFSET..MAC_OFFSET]);
        for block in cek.chunks_exact_mut(BLOCK_SIZE) {
            cipher.decrypt_block(GenericArray::from_mut_slice(block));
        }

        let mac = imit::imit::<S>(&kek, &ukm, &cek[..]);
        let tag_ok = blob[0] == self.method.id();
        let mac_ok = ct_eq(&mac, &blob[MAC_OFFSET..]);
        if tag_ok & mac_ok {
            Ok(cek)
        } else {
            Err(Error::Integrity)
        }
    }

    fn transport_key(&self, ukm: &[u8; UKM_SIZE]) -> Zeroizing<[u8; KEY_SIZE]> {
        match self.method {
            KeyWrapMethod::GostKeyExport => self.kek.clone(),
            KeyWrapMethod::CryptoProKeyExport => diversify::cryptopro_diversify::<S>(&self.kek, ukm),
        }
    }
}

impl<S: Sbox> fmt::Debug for KeyWrap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyWrap<{}> {{ method: {}, .. }}", S::NAME, self.method)
    }
}

/// Compares without branching on the data.
#[inline(never)]
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    core::hint::black_box(diff) == 0
}
