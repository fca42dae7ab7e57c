//! Closed registry of the algorithms this crate provides.

use std::fmt;
use std::str::FromStr;

use gost_hmac::{HmacGost3411_2012_256, HmacGost3411_2012_512};
use tracing::warn;

use crate::cipher::Gost28147;
use crate::config::CipherConfig;
use crate::error::{Error, Result};

/// Whether an algorithm is a cipher or a MAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// Block cipher
    Cipher,
    /// Keyed hash
    Mac,
}

/// Supported algorithm identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// GOST 28147-89 block cipher.
    Gost28147,
    /// HMAC over GOST R 34.11-2012 with a 256-bit digest.
    HmacGost3411_2012_256,
    /// HMAC over GOST R 34.11-2012 with a 512-bit digest.
    HmacGost3411_2012_512,
}

impl Algorithm {
    /// Every registered algorithm.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Gost28147,
        Algorithm::HmacGost3411_2012_256,
        Algorithm::HmacGost3411_2012_512,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Gost28147 => "GOST28147",
            Algorithm::HmacGost3411_2012_256 => "HMACGOST3411_2012_256",
            Algorithm::HmacGost3411_2012_512 => "HMACGOST3411_2012_512",
        }
    }

    /// Object identifier in dotted form.
    pub fn oid(self) -> &'static str {
        match self {
            Algorithm::Gost28147 => "1.2.643.2.2.21",
            Algorithm::HmacGost3411_2012_256 => "1.2.643.7.1.1.4.1",
            Algorithm::HmacGost3411_2012_512 => "1.2.643.7.1.1.4.2",
        }
    }

    /// Cipher or MAC.
    pub fn kind(self) -> AlgorithmKind {
        match self {
            Algorithm::Gost28147 => AlgorithmKind::Cipher,
            Algorithm::HmacGost3411_2012_256 | Algorithm::HmacGost3411_2012_512 => {
                AlgorithmKind::Mac
            }
        }
    }

    /// Builds a cipher context.
    pub fn create_cipher(
        self,
        key: &[u8],
        iv: Option<&[u8]>,
        config: CipherConfig,
    ) -> Result<Gost28147> {
        match self {
            Algorithm::Gost28147 => Gost28147::new(key, iv, config),
            other => Err(Error::UnsupportedAlgorithm(format!("{} is not a cipher", other))),
        }
    }

    /// Builds a MAC context; `None` is the zero-length key.
    pub fn create_mac(self, key: Option<&[u8]>) -> Result<Mac> {
        match self {
            Algorithm::HmacGost3411_2012_256 => {
                Ok(Mac::Gost3411_2012_256(HmacGost3411_2012_256::new(key)))
            }
            Algorithm::HmacGost3411_2012_512 => {
                Ok(Mac::Gost3411_2012_512(HmacGost3411_2012_512::new(key)))
            }
            other => Err(Error::UnsupportedAlgorithm(format!("{} is not a MAC", other))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical name (any case) or the OID.
impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(s) || a.oid() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_owned()))
    }
}

/// MAC context of a registered algorithm.
#[derive(Clone, Debug)]
pub enum Mac {
    /// 256-bit digest, 32-byte pads
    Gost3411_2012_256(HmacGost3411_2012_256),
    /// 512-bit digest, 64-byte pads
    Gost3411_2012_512(HmacGost3411_2012_512),
}

macro_rules! with_mac {
    ($mac:expr, $m:ident => $body:expr) => {
        match $mac {
            Mac::Gost3411_2012_256($m) => $body,
            Mac::Gost3411_2012_512($m) => $body,
        }
    };
}

impl Mac {
    /// Registry entry this context belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Mac::Gost3411_2012_256(_) => Algorithm::HmacGost3411_2012_256,
            Mac::Gost3411_2012_512(_) => Algorithm::HmacGost3411_2012_512,
        }
    }

    /// Pad size in bytes.
    pub fn block_size(&self) -> usize {
        match self {
            Mac::Gost3411_2012_256(_) => HmacGost3411_2012_256::block_size(),
            Mac::Gost3411_2012_512(_) => HmacGost3411_2012_512::block_size(),
        }
    }

    /// Digest size in bytes.
    pub fn output_size(&self) -> usize {
        match self {
            Mac::Gost3411_2012_256(_) => HmacGost3411_2012_256::output_size(),
            Mac::Gost3411_2012_512(_) => HmacGost3411_2012_512::output_size(),
        }
    }

    /// Absorbs `data`.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        let algorithm = self.algorithm();
        with_mac!(self, m => m.update(data)).map_err(|err| {
            warn!(%algorithm, "update on a finalized MAC context");
            Error::from(err)
        })
    }

    /// Extracts the digest; the context must be `reset` before reuse.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let algorithm = self.algorithm();
        with_mac!(self, m => m.finalize().map(|out| out.to_vec())).map_err(|err| {
            warn!(%algorithm, "finalize on a finalized MAC context");
            Error::from(err)
        })
    }

    /// Finalizes and checks `tag` in constant time.
    pub fn verify(&mut self, tag: &[u8]) -> Result<()> {
        with_mac!(self, m => m.verify(tag)).map_err(Error::from)
    }

    /// Returns to the initial keyed state.
    pub fn reset(&mut self) {
        with_mac!(self, m => m.reset())
    }
}
