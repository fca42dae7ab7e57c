//! Generic [HMAC][1] whose key-hashing threshold is a type parameter
//! rather than the block size advertised by the digest.
//!
//! GOST R 34.11-2012 HMAC as shipped by several vendors reports a block
//! size of 32 bytes for the 256-bit digest: keys longer than 32 bytes are
//! hashed first. The ipad/opad blocks always span the digest's own block
//! (64 bytes for Streebog). RFC 7836 hashes only keys longer than 64 bytes.
//! Both are expressible here:
//!
//! ```
//! use gost_hmac::{HmacGost3411_2012_256, HmacStreebog256};
//! use hex_literal::hex;
//!
//! let key = hex!("
//!     292608554026988F6F29F1F21F55520F
//!     B42C5705275721749E986E4469AFE6CE
//! ");
//! let mut mac = HmacGost3411_2012_256::new_from_slice(&key);
//! mac.update(b"").unwrap();
//! assert_eq!(mac.finalize().unwrap()[..], hex!("
//!     FDAF889FFD2B99B5F90D230F9826B445
//!     FE7080DDF386A8AC99A12C08F8B45420
//! ")[..]);
//!
//! assert_eq!(HmacGost3411_2012_256::block_size(), 32);
//! assert_eq!(HmacStreebog256::block_size(), 64);
//! ```
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc2104
#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub use digest;

use core::{fmt, marker::PhantomData};
use digest::{
    consts::{U32, U64},
    core_api::BlockSizeUser,
    generic_array::{ArrayLength, GenericArray},
    typenum::Unsigned,
    CtOutput, Digest, Output,
};
use streebog::{Streebog256, Streebog512};
use zeroize::Zeroize;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// `update` or `finalize` called on a finalized context.
    UseAfterFinalize,
    /// Tag passed to `verify` does not match.
    MacMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::UseAfterFinalize => "HMAC context used after finalization",
            Error::MacMismatch => "MAC tag mismatch",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Lifecycle of an HMAC context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Keyed, no data yet.
    Initialized,
    /// At least one `update` happened.
    Accumulating,
    /// Digest extracted; only `reset` is accepted.
    Finalized,
}

/// HMAC over digest `D`; keys longer than `B` bytes are hashed first.
pub struct Hmac<D: Digest + BlockSizeUser + Clone, B: ArrayLength<u8>> {
    inner: D,
    inner_init: D,
    outer_init: D,
    state: State,
    _b: PhantomData<B>,
}

/// HMAC-GOST R 34.11-2012 (256-bit digest), block size 32.
pub type HmacGost3411_2012_256 = Hmac<Streebog256, U32>;
/// HMAC-GOST R 34.11-2012 (512-bit digest), block size 64.
pub type HmacGost3411_2012_512 = Hmac<Streebog512, U64>;
/// HMAC_GOSTR3411_2012_256 of RFC 7836, block size 64.
pub type HmacStreebog256 = Hmac<Streebog256, U64>;

impl<D: Digest + BlockSizeUser + Clone, B: ArrayLength<u8>> Hmac<D, B> {
    /// Creates a context; an absent key is the zero-length key.
    pub fn new(key: Option<&[u8]>) -> Self {
        Self::new_from_slice(key.unwrap_or(&[]))
    }

    /// Creates a context keyed with `key` of any length.
    ///
    /// Keys longer than `B` are replaced by their digest. The result is
    /// zero padded to `D`'s block size before the ipad/opad XOR.
    pub fn new_from_slice(key: &[u8]) -> Self {
        let pad_len = <<D as BlockSizeUser>::BlockSize as Unsigned>::USIZE;
        debug_assert!(B::USIZE <= pad_len);
        debug_assert!(<D as Digest>::output_size() <= pad_len);

        let mut block = GenericArray::<u8, <D as BlockSizeUser>::BlockSize>::default();
        if key.len() <= B::USIZE {
            block[..key.len()].copy_from_slice(key);
        } else {
            let mut h = D::digest(key);
            block[..h.len()].copy_from_slice(&h);
            h.as_mut_slice().zeroize();
        }

        let mut inner_init = D::new();
        let mut outer_init = D::new();
        for b in block.iter_mut() {
            *b ^= IPAD;
        }
        Digest::update(&mut inner_init, &block);
        for b in block.iter_mut() {
            *b ^= IPAD ^ OPAD;
        }
        Digest::update(&mut outer_init, &block);
        block.as_mut_slice().zeroize();

        Self {
            inner: inner_init.clone(),
            inner_init,
            outer_init,
            state: State::Initialized,
            _b: PhantomData,
        }
    }

    /// Block size in bytes: the longest key used without hashing.
    pub fn block_size() -> usize {
        B::USIZE
    }

    /// Digest size in bytes.
    pub fn output_size() -> usize {
        <D as Digest>::output_size()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Absorbs `data`. Any chunking of a message gives the same digest.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.state == State::Finalized {
            return Err(Error::UseAfterFinalize);
        }
        Digest::update(&mut self.inner, data);
        self.state = State::Accumulating;
        Ok(())
    }

    /// Returns `H(K ^ opad || H(K ^ ipad || m))` and finalizes the context.
    pub fn finalize(&mut self) -> Result<Output<D>, Error> {
        if self.state == State::Finalized {
            return Err(Error::UseAfterFinalize);
        }
        self.state = State::Finalized;
        let inner = core::mem::replace(&mut self.inner, self.inner_init.clone());
        let mut outer = self.outer_init.clone();
        Digest::update(&mut outer, &inner.finalize());
        Ok(outer.finalize())
    }

    /// Finalizes and compares against `tag` in constant time.
    pub fn verify(&mut self, tag: &[u8]) -> Result<(), Error> {
        let out = self.finalize()?;
        if tag.len() != out.len() {
            return Err(Error::MacMismatch);
        }
        let expected = CtOutput::<D>::new(Output::<D>::clone_from_slice(tag));
        if CtOutput::<D>::new(out) == expected {
            Ok(())
        } else {
            Err(Error::MacMismatch)
        }
    }

    /// Drops absorbed data and returns to [`State::Initialized`] with the
    /// same key.
    pub fn reset(&mut self) {
        self.inner = self.inner_init.clone();
        self.state = State::Initialized;
    }
}

impl<D: Digest + BlockSizeUser + Clone, B: ArrayLength<u8>> Default for Hmac<D, B> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<D: Digest + BlockSizeUser + Clone, B: ArrayLength<u8>> Clone for Hmac<D, B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            inner_init: self.inner_init.clone(),
            outer_init: self.outer_init.clone(),
            state: self.state,
            _b: PhantomData,
        }
    }
}

impl<D: Digest + BlockSizeUser + Clone, B: ArrayLength<u8>> fmt::Debug for Hmac<D, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hmac<{}> {{ state: {:?}, .. }}", B::USIZE, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_machine() {
        let mut mac = HmacGost3411_2012_256::new(Some(&b"key"[..]));
        assert_eq!(mac.state(), State::Initialized);
        mac.update(b"a").unwrap();
        assert_eq!(mac.state(), State::Accumulating);
        let first = mac.finalize().unwrap();
        assert_eq!(mac.state(), State::Finalized);
        assert_eq!(mac.update(b"b"), Err(Error::UseAfterFinalize));
        assert_eq!(mac.finalize(), Err(Error::UseAfterFinalize));

        mac.reset();
        assert_eq!(mac.state(), State::Initialized);
        mac.update(b"a").unwrap();
        assert_eq!(mac.finalize().unwrap(), first);
    }

    #[test]
    fn finalize_without_update() {
        let mut a = HmacGost3411_2012_256::new_from_slice(b"key");
        let mut b = HmacGost3411_2012_256::new_from_slice(b"key");
        b.update(&[]).unwrap();
        assert_eq!(a.finalize().unwrap(), b.finalize().unwrap());
    }
}
