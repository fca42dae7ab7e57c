//! Session key transport under a key-exchange key.

use gost_keywrap::{KeyWrap, UKM_SIZE};
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::config::ParamSet;
use crate::error::{Error, Result};

pub use gost_keywrap::{KeyWrapMethod, KEY_SIZE, WRAPPED_KEY_SIZE};

/// Binds `$s` to the S-box type of `$param_set` for `$body`.
macro_rules! with_sbox {
    ($param_set:expr, $s:ident => $body:expr) => {
        match $param_set {
            ParamSet::Tc26Z => {
                type $s = gost89::Tc26;
                $body
            }
            ParamSet::CryptoProA => {
                type $s = gost89::CryptoProA;
                $body
            }
            ParamSet::Test => {
                type $s = gost89::TestSbox;
                $body
            }
        }
    };
}

/// Export method plus S-box parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyTransport {
    method: KeyWrapMethod,
    param_set: ParamSet,
}

impl KeyTransport {
    /// Transport with `method` under the CryptoPro A parameter set.
    pub fn new(method: KeyWrapMethod) -> Self {
        Self::with_param_set(method, ParamSet::CryptoProA)
    }

    /// Transport with an explicit parameter set.
    pub fn with_param_set(method: KeyWrapMethod, param_set: ParamSet) -> Self {
        Self { method, param_set }
    }

    /// Export method.
    pub fn method(&self) -> KeyWrapMethod {
        self.method
    }

    /// S-box parameter set.
    pub fn param_set(&self) -> ParamSet {
        self.param_set
    }

    /// Wraps `session_key` with a UKM drawn from the operating system RNG.
    pub fn encode(&self, session_key: &[u8], kek: &[u8]) -> Result<Vec<u8>> {
        self.encode_with_rng(session_key, kek, &mut OsRng)
    }

    /// Wraps `session_key` with a UKM drawn from `rng`.
    pub fn encode_with_rng<R: CryptoRng + RngCore>(
        &self,
        session_key: &[u8],
        kek: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let mut ukm = [0u8; UKM_SIZE];
        rng.try_fill_bytes(&mut ukm).map_err(|err| {
            warn!(%err, "UKM generation failed");
            Error::RandomSource(err.to_string())
        })?;
        self.encode_with_ukm(session_key, kek, &ukm)
    }

    /// Wraps `session_key` with caller supplied keying material.
    pub fn encode_with_ukm(&self, session_key: &[u8], kek: &[u8], ukm: &[u8]) -> Result<Vec<u8>> {
        if ukm.len() != UKM_SIZE {
            return Err(Error::size("ukm", UKM_SIZE, ukm.len()));
        }
        let mut fixed = [0u8; UKM_SIZE];
        fixed.copy_from_slice(ukm);
        let blob = with_sbox!(self.param_set, S => {
            KeyWrap::<S>::new(kek, self.method)?.wrap_key(session_key, &fixed)?
        });
        debug!(method = %self.method, param_set = %self.param_set, "session key wrapped");
        Ok(blob.to_vec())
    }

    /// Recovers the session key from `blob`.
    pub fn decode(&self, blob: &[u8], kek: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
        let res = with_sbox!(self.param_set, S => {
            KeyWrap::<S>::new(kek, self.method)?.unwrap_key(blob)
        });
        res.map_err(|err| {
            if err == gost_keywrap::Error::Integrity {
                warn!(method = %self.method, "wrapped key rejected");
            }
            Error::from(err)
        })
    }
}

/// Wraps `session_key` under `kek` with `method` (CryptoPro A S-box).
pub fn encode(session_key: &[u8], kek: &[u8], method: KeyWrapMethod) -> Result<Vec<u8>> {
    KeyTransport::new(method).encode(session_key, kek)
}

/// Inverse of [`encode`].
pub fn decode(blob: &[u8], kek: &[u8], method: KeyWrapMethod) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    KeyTransport::new(method).decode(blob, kek)
}

/// Resolves a method from its wire identifier.
pub fn method_from_id(id: u8) -> Result<KeyWrapMethod> {
    Ok(KeyWrapMethod::try_from(id)?)
}
