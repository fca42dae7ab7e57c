//! GOST 28147-89 contexts: single blocks, ECB/CFB messages and CFB streams.

use gost89::{
    cipher::{
        block_padding::{Padding as BlockPadding, Pkcs7, ZeroPadding},
        consts::U8,
        generic_array::GenericArray,
        BlockDecrypt, BlockEncrypt, InnerIvInit, KeyInit,
    },
    Gost89, Sbox, BLOCK_SIZE, KEY_SIZE,
};
use gost_cfb::Cfb;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::{CipherConfig, CipherMode, Padding, ParamSet};
use crate::error::{Error, Result};

/// Keyed cipher for one parameter set.
enum Engine {
    Tc26(Gost89<gost89::Tc26>),
    CryptoProA(Gost89<gost89::CryptoProA>),
    Test(Gost89<gost89::TestSbox>),
}

/// Runs `$body` against whichever parameter set variant `$value` holds.
macro_rules! dispatch {
    ($ty:ident, $value:expr, $c:ident => $body:expr) => {
        match $value {
            $ty::Tc26($c) => $body,
            $ty::CryptoProA($c) => $body,
            $ty::Test($c) => $body,
        }
    };
}

impl Engine {
    fn new(param_set: ParamSet, key: &[u8]) -> Result<Self> {
        check_size("key", KEY_SIZE, key.len())?;
        let key = GenericArray::from_slice(key);
        Ok(match param_set {
            ParamSet::Tc26Z => Engine::Tc26(Gost89::new(key)),
            ParamSet::CryptoProA => Engine::CryptoProA(Gost89::new(key)),
            ParamSet::Test => Engine::Test(Gost89::new(key)),
        })
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        dispatch!(Engine, self, c => c.encrypt_block(GenericArray::from_mut_slice(block)))
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        dispatch!(Engine, self, c => c.decrypt_block(GenericArray::from_mut_slice(block)))
    }

    fn cfb(&self, iv: &[u8; BLOCK_SIZE]) -> StreamEngine {
        let iv = GenericArray::from_slice(iv);
        match self {
            Engine::Tc26(c) => StreamEngine::Tc26(Cfb::inner_iv_init(c.clone(), iv)),
            Engine::CryptoProA(c) => StreamEngine::CryptoProA(Cfb::inner_iv_init(c.clone(), iv)),
            Engine::Test(c) => StreamEngine::Test(Cfb::inner_iv_init(c.clone(), iv)),
        }
    }
}

enum StreamEngine {
    Tc26(Cfb<Gost89<gost89::Tc26>>),
    CryptoProA(Cfb<Gost89<gost89::CryptoProA>>),
    Test(Cfb<Gost89<gost89::TestSbox>>),
}

/// CFB stream bound to one IV.
///
/// Successive calls continue the keystream, so a message may be fed in
/// chunks of any size. Use one stream per message and direction.
pub struct CfbStream {
    engine: StreamEngine,
}

impl CfbStream {
    /// Encrypts `buf` in place.
    pub fn encrypt(&mut self, buf: &mut [u8]) {
        dispatch!(StreamEngine, &mut self.engine, s => s.encrypt(buf))
    }

    /// Decrypts `buf` in place.
    pub fn decrypt(&mut self, buf: &mut [u8]) {
        dispatch!(StreamEngine, &mut self.engine, s => s.decrypt(buf))
    }
}

/// GOST 28147-89 context with a fixed key, IV and configuration.
pub struct Gost28147 {
    engine: Engine,
    iv: Option<Zeroizing<[u8; BLOCK_SIZE]>>,
    config: CipherConfig,
}

impl Gost28147 {
    /// Binds `key` and `iv` to `config`.
    ///
    /// CFB requires an 8-byte IV; ECB ignores it. Sizes are checked before
    /// any key material is processed.
    pub fn new(key: &[u8], iv: Option<&[u8]>, config: CipherConfig) -> Result<Self> {
        let iv = match (config.mode(), iv) {
            (CipherMode::Cfb, None) => return Err(Error::size("iv", BLOCK_SIZE, 0)),
            (_, Some(iv)) => {
                check_size("iv", BLOCK_SIZE, iv.len())?;
                let mut buf = Zeroizing::new([0u8; BLOCK_SIZE]);
                buf.copy_from_slice(iv);
                Some(buf)
            }
            (CipherMode::Ecb, None) => None,
        };
        let engine = Engine::new(config.param_set(), key)?;
        debug!(
            mode = ?config.mode(),
            padding = ?config.padding(),
            param_set = %config.param_set(),
            "GOST 28147-89 context created"
        );
        Ok(Self { engine, iv, config })
    }

    /// Configuration this context was created with.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    /// Encrypts exactly one 8-byte block.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        let mut out = to_block(block)?;
        self.engine.encrypt_block(&mut out);
        Ok(out)
    }

    /// Decrypts exactly one 8-byte block.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        let mut out = to_block(block)?;
        self.engine.decrypt_block(&mut out);
        Ok(out)
    }

    /// Starts a CFB stream at this context's IV.
    pub fn cfb_stream(&self) -> Result<CfbStream> {
        let iv = self.iv.as_ref().ok_or_else(|| Error::size("iv", BLOCK_SIZE, 0))?;
        Ok(CfbStream {
            engine: self.engine.cfb(iv),
        })
    }

    /// Pads and encrypts a whole message.
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut buf = pad(data, self.config.padding());
        match self.config.mode() {
            CipherMode::Ecb => {
                check_aligned(buf.len())?;
                for block in buf.chunks_exact_mut(BLOCK_SIZE) {
                    self.engine.encrypt_block(block);
                }
            }
            CipherMode::Cfb => self.cfb_stream()?.encrypt(&mut buf),
        }
        Ok(buf)
    }

    /// Decrypts a whole message and removes its padding.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        let aligned_input = self.config.mode() == CipherMode::Ecb
            || self.config.padding() == Padding::Pkcs7;
        if aligned_input {
            check_aligned(data.len())?;
        }
        let mut buf = data.to_vec();
        match self.config.mode() {
            CipherMode::Ecb => {
                for block in buf.chunks_exact_mut(BLOCK_SIZE) {
                    self.engine.decrypt_block(block);
                }
            }
            CipherMode::Cfb => self.cfb_stream()?.decrypt(&mut buf),
        }
        unpad(buf, self.config.padding())
    }
}

impl std::fmt::Debug for Gost28147 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gost28147")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Single-block encryption under `S` without building a context.
pub(crate) fn encrypt_block_with<S: Sbox>(key: &[u8], block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    check_size("key", KEY_SIZE, key.len())?;
    let mut out = to_block(block)?;
    Gost89::<S>::new(GenericArray::from_slice(key))
        .encrypt_block(GenericArray::from_mut_slice(&mut out));
    Ok(out)
}

/// Single-block decryption under `S` without building a context.
pub(crate) fn decrypt_block_with<S: Sbox>(key: &[u8], block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    check_size("key", KEY_SIZE, key.len())?;
    let mut out = to_block(block)?;
    Gost89::<S>::new(GenericArray::from_slice(key))
        .decrypt_block(GenericArray::from_mut_slice(&mut out));
    Ok(out)
}

fn check_size(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::size(what, expected, actual))
    }
}

fn check_aligned(len: usize) -> Result<()> {
    check_size("data length modulo block", 0, len % BLOCK_SIZE)
}

fn to_block(block: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    check_size("block", BLOCK_SIZE, block.len())?;
    let mut out = [0u8; BLOCK_SIZE];
    out.copy_from_slice(block);
    Ok(out)
}

type PadBlock = GenericArray<u8, U8>;

fn pad(data: &[u8], padding: Padding) -> Vec<u8> {
    let rem = data.len() % BLOCK_SIZE;
    let full = data.len() - rem;
    let mut buf = Vec::with_capacity(full + BLOCK_SIZE);
    buf.extend_from_slice(&data[..full]);

    let mut last = PadBlock::default();
    last[..rem].copy_from_slice(&data[full..]);
    match padding {
        Padding::None => buf.extend_from_slice(&last[..rem]),
        Padding::Zeros if rem == 0 => {}
        Padding::Zeros => {
            ZeroPadding::pad(&mut last, rem);
            buf.extend_from_slice(&last);
        }
        Padding::Pkcs7 => {
            Pkcs7::pad(&mut last, rem);
            buf.extend_from_slice(&last);
        }
    }
    buf
}

fn unpad(mut buf: Vec<u8>, padding: Padding) -> Result<Vec<u8>> {
    if padding == Padding::Pkcs7 {
        let start = buf
            .len()
            .checked_sub(BLOCK_SIZE)
            .ok_or(Error::InvalidPadding)?;
        let kept = <Pkcs7 as BlockPadding<U8>>::unpad(PadBlock::from_slice(&buf[start..]))
            .map_err(|_| Error::InvalidPadding)?
            .len();
        buf.truncate(start + kept);
    }
    Ok(buf)
}
