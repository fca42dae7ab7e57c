//! Error type shared by every operation of the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by ciphers, key transport and MACs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key, block, IV, feedback or data length outside its legal value.
    #[error("invalid {what} size: expected {expected}, got {actual}")]
    InvalidSize {
        /// Rejected input
        what: &'static str,
        /// Legal value (bytes, or bits for the feedback size)
        expected: usize,
        /// Supplied value
        actual: usize,
    },

    /// Key export method outside the supported set.
    #[error("unsupported key export method")]
    UnsupportedMethod,

    /// Wrapped key failed verification.
    #[error("key transport integrity check failed")]
    IntegrityError,

    /// HMAC context reused after its digest was extracted.
    #[error("HMAC context used after finalization")]
    UseAfterFinalize,

    /// HMAC tag did not verify.
    #[error("MAC verification failed")]
    MacMismatch,

    /// Algorithm name unknown, or known but of another kind.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The random number generator could not produce a UKM.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// Decrypted data carries malformed padding.
    #[error("invalid padding")]
    InvalidPadding,
}

impl Error {
    pub(crate) fn size(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::InvalidSize {
            what,
            expected,
            actual,
        }
    }
}

impl From<gost_keywrap::Error> for Error {
    fn from(err: gost_keywrap::Error) -> Self {
        match err {
            gost_keywrap::Error::InvalidSize {
                what,
                expected,
                actual,
            } => Error::size(what, expected, actual),
            gost_keywrap::Error::UnsupportedMethod => Error::UnsupportedMethod,
            gost_keywrap::Error::Integrity => Error::IntegrityError,
        }
    }
}

impl From<gost_hmac::Error> for Error {
    fn from(err: gost_hmac::Error) -> Self {
        match err {
            gost_hmac::Error::UseAfterFinalize => Error::UseAfterFinalize,
            gost_hmac::Error::MacMismatch => Error::MacMismatch,
        }
    }
}
