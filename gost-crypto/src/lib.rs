//! GOST 28147-89 toolkit: block cipher, CFB mode, key transport
//! and HMAC over GOST R 34.11-2012 (Streebog).
//!
//! The primitives live in their own `no_std` crates ([`gost89`],
//! [`gost_cfb`], [`gost_keywrap`], [`gost_hmac`]). This crate puts them
//! behind byte-slice entry points, one [`Error`] type and a closed
//! [`Algorithm`] registry.
//!
//! # Examples
//! ```
//! use gost_crypto::{Algorithm, CipherConfig, Padding};
//! use hex_literal::hex;
//!
//! let key = [0x42; 32];
//! let iv = [0x24; 8];
//! let config = CipherConfig::builder().padding(Padding::Pkcs7).build().unwrap();
//!
//! let alg: Algorithm = "GOST28147".parse().unwrap();
//! let cipher = alg.create_cipher(&key, Some(&iv[..]), config).unwrap();
//! let ct = cipher.encrypt(b"attack at dawn").unwrap();
//! assert_eq!(cipher.decrypt(&ct).unwrap(), b"attack at dawn");
//!
//! let mut mac = Algorithm::HmacGost3411_2012_256.create_mac(Some(&key[..])).unwrap();
//! mac.update(b"message").unwrap();
//! assert_eq!(mac.finalize().unwrap().len(), 32);
//!
//! let ct = gost_crypto::encrypt_block(
//!     &hex!("ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff"),
//!     &hex!("fedcba9876543210"),
//! )
//! .unwrap();
//! assert_eq!(ct, hex!("4ee901e5c2d8ca3d"));
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use gost89;
pub use gost_cfb;
pub use gost_hmac;
pub use gost_keywrap;

mod cipher;
mod config;
mod error;
mod keyexchange;
mod registry;

pub use crate::cipher::{CfbStream, Gost28147};
pub use crate::config::{
    CipherConfig, CipherConfigBuilder, CipherMode, Padding, ParamSet, FEEDBACK_SIZE,
};
pub use crate::error::{Error, Result};
pub use crate::keyexchange::{
    decode, encode, method_from_id, KeyTransport, KeyWrapMethod, WRAPPED_KEY_SIZE,
};
pub use crate::registry::{Algorithm, AlgorithmKind, Mac};
pub use gost89::{BLOCK_SIZE, KEY_SIZE};

/// Encrypts one 8-byte block under the GOST R 34.12-2015 (TC26 Z) S-box.
pub fn encrypt_block(key: &[u8], block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    cipher::encrypt_block_with::<gost89::Tc26>(key, block)
}

/// Decrypts one 8-byte block under the GOST R 34.12-2015 (TC26 Z) S-box.
pub fn decrypt_block(key: &[u8], block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    cipher::decrypt_block_with::<gost89::Tc26>(key, block)
}

/// CFB-encrypts `data` of any length under the TC26 Z S-box.
pub fn cfb_encrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    Gost28147::new(key, Some(iv), CipherConfig::default())?.encrypt(data)
}

/// Inverse of [`cfb_encrypt`].
pub fn cfb_decrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    Gost28147::new(key, Some(iv), CipherConfig::default())?.decrypt(data)
}
