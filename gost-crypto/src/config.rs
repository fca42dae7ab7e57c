//! Immutable cipher configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Block chaining mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// Electronic codebook; every block enciphered independently.
    Ecb,
    /// Cipher feedback with full-block feedback.
    Cfb,
}

/// Padding applied before encryption and checked after decryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Padding {
    /// No padding; ECB then requires block-aligned input.
    None,
    /// Zero bytes up to the block boundary, left in place on decryption.
    Zeros,
    /// PKCS#7: 1 to 8 bytes each holding the pad length.
    Pkcs7,
}

/// GOST 28147-89 S-box parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamSet {
    /// `id-tc26-gost-28147-param-Z`, the GOST R 34.12-2015 Magma S-box.
    Tc26Z,
    /// `id-Gost28147-89-CryptoPro-A-ParamSet`.
    CryptoProA,
    /// `id-GostR3411-94-TestParamSet`.
    Test,
}

impl ParamSet {
    /// All supported parameter sets.
    pub const ALL: [ParamSet; 3] = [ParamSet::Tc26Z, ParamSet::CryptoProA, ParamSet::Test];

    /// Canonical identifier.
    pub fn name(self) -> &'static str {
        match self {
            ParamSet::Tc26Z => "id-tc26-gost-28147-param-Z",
            ParamSet::CryptoProA => "id-Gost28147-89-CryptoPro-A-ParamSet",
            ParamSet::Test => "id-GostR3411-94-TestParamSet",
        }
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_owned()))
    }
}

/// The only legal feedback size, in bits.
pub const FEEDBACK_SIZE: usize = 64;

/// Validated cipher configuration.
///
/// Built once through [`CipherConfig::builder`] and never mutated; a
/// context always runs with the configuration it was created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CipherConfig {
    mode: CipherMode,
    feedback_size: usize,
    padding: Padding,
    param_set: ParamSet,
}

impl CipherConfig {
    /// Starts from the defaults: CFB, 64-bit feedback, no padding,
    /// TC26 Z S-box.
    pub fn builder() -> CipherConfigBuilder {
        CipherConfigBuilder {
            inner: CipherConfig::default(),
        }
    }

    /// Chaining mode.
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Feedback size in bits.
    pub fn feedback_size(&self) -> usize {
        self.feedback_size
    }

    /// Padding mode.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// S-box parameter set.
    pub fn param_set(&self) -> ParamSet {
        self.param_set
    }
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            mode: CipherMode::Cfb,
            feedback_size: FEEDBACK_SIZE,
            padding: Padding::None,
            param_set: ParamSet::Tc26Z,
        }
    }
}

/// Builder for [`CipherConfig`].
#[derive(Clone, Copy, Debug)]
pub struct CipherConfigBuilder {
    inner: CipherConfig,
}

impl CipherConfigBuilder {
    /// Sets the chaining mode.
    pub fn mode(mut self, mode: CipherMode) -> Self {
        self.inner.mode = mode;
        self
    }

    /// Sets the feedback size in bits.
    pub fn feedback_size(mut self, bits: usize) -> Self {
        self.inner.feedback_size = bits;
        self
    }

    /// Sets the padding mode.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.inner.padding = padding;
        self
    }

    /// Sets the S-box parameter set.
    pub fn param_set(mut self, param_set: ParamSet) -> Self {
        self.inner.param_set = param_set;
        self
    }

    /// Validates and freezes the configuration.
    pub fn build(self) -> Result<CipherConfig> {
        if self.inner.feedback_size != FEEDBACK_SIZE {
            return Err(Error::size(
                "feedback",
                FEEDBACK_SIZE,
                self.inner.feedback_size,
            ));
        }
        Ok(self.inner)
    }
}
