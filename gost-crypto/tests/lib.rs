use gost_crypto::{
    cfb_decrypt, cfb_encrypt, decode, decrypt_block, encode, encrypt_block, method_from_id,
    Algorithm, CipherConfig, CipherMode, Error, Gost28147, KeyTransport, KeyWrapMethod, Padding,
    ParamSet, WRAPPED_KEY_SIZE,
};
use hex_literal::hex;
use proptest::prelude::*;
use rand_core::{CryptoRng, RngCore};
use std::num::NonZeroU32;

const KEY: [u8; 32] = hex!("
    FFEEDDCCBBAA99887766554433221100
    F0F1F2F3F4F5F6F7F8F9FAFBFCFDFEFF
");
const IV: [u8; 8] = hex!("1234567890ABCDEF");
const PLAINTEXT: [u8; 32] = hex!("
    92DEF06B3C130A59DB54C704F8189D20
    4A98FB2E67A8024C8912409B17B57E41
");

const KEK: [u8; 32] = hex!("
    8182838485868788898A8B8C8D8E8F80
    D1D2D3D4D5D6D7D8D9DADBDCDDDEDFD0
");
const CEK: [u8; 32] = hex!("
    0102030405060708F1F2F3F4F5F6F7F8
    A1A2A3A4A5A6A7A8B1B2B3B4B5B6B7B8
");
const UKM: [u8; 8] = hex!("0102030405060708");

fn ecb(padding: Padding) -> CipherConfig {
    CipherConfig::builder()
        .mode(CipherMode::Ecb)
        .padding(padding)
        .build()
        .unwrap()
}

#[test]
fn single_block() {
    let pt = hex!("FEDCBA9876543210");
    let ct = encrypt_block(&KEY, &pt).unwrap();
    assert_eq!(ct, hex!("4EE901E5C2D8CA3D"));
    assert_eq!(decrypt_block(&KEY, &ct).unwrap(), pt);
}

#[test]
fn ecb_vector() {
    let cipher = Gost28147::new(&KEY, None, ecb(Padding::None)).unwrap();
    let ct = cipher.encrypt(&PLAINTEXT).unwrap();
    assert_eq!(ct, hex!("
        2B073F0494F372A0DE70E715D3556E48
        11D8D9E9EACFBC1E7C68260996C67EFB
    "));
    assert_eq!(cipher.decrypt(&ct).unwrap(), PLAINTEXT);
}

#[test]
fn cfb_vector() {
    let ct = cfb_encrypt(&KEY, &IV, &PLAINTEXT).unwrap();
    assert_eq!(ct, hex!("
        DB37E0E266903C83B571EE29CCA54CE7
        91FABCB3ABBE2FE3FF5D972D770F6AE9
    "));
    assert_eq!(cfb_decrypt(&KEY, &IV, &ct).unwrap(), PLAINTEXT);

    let partial = cfb_encrypt(&KEY, &IV, &PLAINTEXT[..13]).unwrap();
    assert_eq!(partial, ct[..13]);
}

#[test]
fn cfb_stream_in_chunks() {
    let cipher = Gost28147::new(&KEY, Some(&IV[..]), CipherConfig::default()).unwrap();
    let mut buf = PLAINTEXT;
    let mut stream = cipher.cfb_stream().unwrap();
    for chunk in buf.chunks_mut(5) {
        stream.encrypt(chunk);
    }
    assert_eq!(buf.to_vec(), cipher.encrypt(&PLAINTEXT).unwrap());

    let mut stream = cipher.cfb_stream().unwrap();
    let (a, b) = buf.split_at_mut(11);
    stream.decrypt(a);
    stream.decrypt(b);
    assert_eq!(buf, PLAINTEXT);
}

#[test]
fn padding_modes() {
    let msg = b"twenty-one byte input";

    let cipher = Gost28147::new(&KEY, None, ecb(Padding::Pkcs7)).unwrap();
    let ct = cipher.encrypt(msg).unwrap();
    assert_eq!(ct.len(), 24);
    assert_eq!(cipher.decrypt(&ct).unwrap(), msg);

    let cipher = Gost28147::new(&KEY, None, ecb(Padding::Zeros)).unwrap();
    let pt = cipher.decrypt(&cipher.encrypt(msg).unwrap()).unwrap();
    assert_eq!(&pt[..msg.len()], msg);
    assert_eq!(pt[msg.len()..], [0, 0, 0]);

    let cipher = Gost28147::new(&KEY, None, ecb(Padding::None)).unwrap();
    assert_eq!(
        cipher.encrypt(msg),
        Err(Error::InvalidSize {
            what: "data length modulo block",
            expected: 0,
            actual: 5,
        })
    );
}

#[test]
fn malformed_pkcs7_padding() {
    let raw = Gost28147::new(&KEY, None, ecb(Padding::None)).unwrap();
    let padded = Gost28147::new(&KEY, None, ecb(Padding::Pkcs7)).unwrap();
    for block in [hex!("0102030405060700"), hex!("0102030405060709"), hex!("0102030405060302")] {
        let ct = raw.encrypt(&block).unwrap();
        assert_eq!(padded.decrypt(&ct), Err(Error::InvalidPadding));
    }
    assert!(matches!(padded.decrypt(&[0; 7]), Err(Error::InvalidSize { .. })));
}

#[test]
fn parameter_sets_differ() {
    let outputs: Vec<Vec<u8>> = ParamSet::ALL
        .iter()
        .map(|&p| {
            let config = CipherConfig::builder().param_set(p).build().unwrap();
            Gost28147::new(&KEY, Some(&IV[..]), config)
                .unwrap()
                .encrypt(&PLAINTEXT)
                .unwrap()
        })
        .collect();
    assert_ne!(outputs[0], outputs[1]);
    assert_ne!(outputs[1], outputs[2]);
    assert_ne!(outputs[0], outputs[2]);
}

#[test]
fn invalid_sizes() {
    for len in [0, 16, 31, 33, 64] {
        assert_eq!(
            encrypt_block(&vec![0; len], &[0; 8]),
            Err(Error::InvalidSize { what: "key", expected: 32, actual: len })
        );
    }
    for len in [0, 7, 9, 16] {
        assert_eq!(
            decrypt_block(&KEY, &vec![0; len]),
            Err(Error::InvalidSize { what: "block", expected: 8, actual: len })
        );
    }
    assert_eq!(
        Gost28147::new(&KEY, None, CipherConfig::default()).unwrap_err(),
        Error::InvalidSize { what: "iv", expected: 8, actual: 0 }
    );
    assert_eq!(
        cfb_encrypt(&KEY, &IV[..7], b"x"),
        Err(Error::InvalidSize { what: "iv", expected: 8, actual: 7 })
    );
    assert_eq!(
        CipherConfig::builder().feedback_size(8).build(),
        Err(Error::InvalidSize { what: "feedback", expected: 64, actual: 8 })
    );
}

/// Same regression blobs as the key-wrap crate, through the facade.
#[test]
fn key_transport_regression_blobs() {
    let blob = KeyTransport::new(KeyWrapMethod::CryptoProKeyExport)
        .encode_with_ukm(&CEK, &KEK, &UKM)
        .unwrap();
    assert_eq!(blob, hex!("
        01 0102030405060708
        3109A0DBC77EDCA2565C154C2DD67C0D39ED6844CE5655A84C6C58CECDDDE2E3
        A184D491
    "));
    assert_eq!(*decode(&blob, &KEK, KeyWrapMethod::CryptoProKeyExport).unwrap(), CEK);

    let transport = KeyTransport::with_param_set(KeyWrapMethod::GostKeyExport, ParamSet::Tc26Z);
    let blob = transport.encode_with_ukm(&CEK, &KEK, &UKM).unwrap();
    assert_eq!(blob, hex!("
        00 0102030405060708
        7B757CA3F2360E6699BCC56E34B7C07B856EDA0AB750967C17B07071A7A50EAC
        C91D3187
    "));
    assert_eq!(*transport.decode(&blob, &KEK).unwrap(), CEK);
}

#[test]
fn key_transport_roundtrip() {
    for method in KeyWrapMethod::ALL {
        let blob = encode(&CEK, &KEK, method).unwrap();
        assert_eq!(blob.len(), WRAPPED_KEY_SIZE);
        assert_eq!(*decode(&blob, &KEK, method).unwrap(), CEK);
    }
}

#[test]
fn key_transport_tamper() {
    for method in KeyWrapMethod::ALL {
        let blob = encode(&CEK, &KEK, method).unwrap();
        for bit in 0..blob.len() * 8 {
            let mut bad = blob.clone();
            bad[bit / 8] ^= 1 << (bit % 8);
            assert_eq!(
                decode(&bad, &KEK, method).unwrap_err(),
                Error::IntegrityError,
                "{} bit {}",
                method,
                bit
            );
        }
    }
}

#[test]
fn key_transport_errors() {
    let method = KeyWrapMethod::GostKeyExport;
    assert_eq!(method_from_id(1), Ok(KeyWrapMethod::CryptoProKeyExport));
    assert_eq!(method_from_id(5), Err(Error::UnsupportedMethod));
    assert_eq!(
        "SimpleExport".parse::<KeyWrapMethod>().map_err(Error::from),
        Err(Error::UnsupportedMethod)
    );
    assert_eq!(
        encode(&CEK[..31], &KEK, method),
        Err(Error::InvalidSize { what: "session key", expected: 32, actual: 31 })
    );
    assert_eq!(
        encode(&CEK, &KEK[..16], method),
        Err(Error::InvalidSize { what: "key-exchange key", expected: 32, actual: 16 })
    );
    assert_eq!(
        KeyTransport::new(method).encode_with_ukm(&CEK, &KEK, &UKM[..4]),
        Err(Error::InvalidSize { what: "ukm", expected: 8, actual: 4 })
    );
    assert_eq!(
        decode(&[0; 44], &KEK, method).unwrap_err(),
        Error::InvalidSize { what: "wrapped key", expected: 45, actual: 44 }
    );

    let blob = encode(&CEK, &KEK, method).unwrap();
    assert_eq!(
        decode(&blob, &KEK, KeyWrapMethod::CryptoProKeyExport).unwrap_err(),
        Error::IntegrityError
    );
    assert_eq!(decode(&blob, &CEK, method).unwrap_err(), Error::IntegrityError);
}

struct BrokenRng;

impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(NonZeroU32::new(rand_core::Error::CUSTOM_START)
            .map(rand_core::Error::from)
            .unwrap())
    }
}

impl CryptoRng for BrokenRng {}

#[test]
fn rng_failure_is_reported() {
    let transport = KeyTransport::new(KeyWrapMethod::CryptoProKeyExport);
    assert!(matches!(
        transport.encode_with_rng(&CEK, &KEK, &mut BrokenRng),
        Err(Error::RandomSource(_))
    ));

    let blob = transport.encode_with_rng(&CEK, &KEK, &mut rand_core::OsRng).unwrap();
    assert_eq!(*transport.decode(&blob, &KEK).unwrap(), CEK);
}

#[test]
fn registry() {
    assert_eq!("gost28147".parse::<Algorithm>(), Ok(Algorithm::Gost28147));
    assert_eq!("1.2.643.7.1.1.4.2".parse::<Algorithm>(), Ok(Algorithm::HmacGost3411_2012_512));
    assert_eq!(
        "Kuznyechik".parse::<Algorithm>(),
        Err(Error::UnsupportedAlgorithm("Kuznyechik".to_owned()))
    );

    let cipher = Algorithm::Gost28147
        .create_cipher(&KEY, Some(&IV[..]), CipherConfig::default())
        .unwrap();
    assert_eq!(cipher.encrypt(&PLAINTEXT).unwrap(), cfb_encrypt(&KEY, &IV, &PLAINTEXT).unwrap());

    assert!(matches!(
        Algorithm::Gost28147.create_mac(None),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn hmac_through_registry() {
    let key = hex!("292608554026988F6F29F1F21F55520FB42C5705275721749E986E4469AFE6CE");
    let expected = hex!("FDAF889FFD2B99B5F90D230F9826B445FE7080DDF386A8AC99A12C08F8B45420");

    let mut mac = Algorithm::HmacGost3411_2012_256.create_mac(Some(&key[..])).unwrap();
    assert_eq!(mac.finalize().unwrap(), expected);
    assert_eq!(mac.update(b"more"), Err(Error::UseAfterFinalize));
    assert_eq!(mac.finalize(), Err(Error::UseAfterFinalize));

    mac.reset();
    assert_eq!(mac.verify(&expected), Ok(()));
    mac.reset();
    assert_eq!(mac.verify(&[0; 32]), Err(Error::MacMismatch));
}

proptest! {
    #[test]
    fn cfb_roundtrip(key in any::<[u8; 32]>(), iv in any::<[u8; 8]>(), data in prop::collection::vec(any::<u8>(), 0..200)) {
        let ct = cfb_encrypt(&key, &iv, &data).unwrap();
        prop_assert_eq!(ct.len(), data.len());
        prop_assert_eq!(cfb_decrypt(&key, &iv, &ct).unwrap(), data);
    }

    #[test]
    fn ecb_pkcs7_roundtrip(key in any::<[u8; 32]>(), data in prop::collection::vec(any::<u8>(), 0..200)) {
        let cipher = Gost28147::new(&key, None, ecb(Padding::Pkcs7)).unwrap();
        let ct = cipher.encrypt(&data).unwrap();
        prop_assert_eq!(ct.len() % 8, 0);
        prop_assert!(ct.len() > data.len());
        prop_assert_eq!(cipher.decrypt(&ct).unwrap(), data);
    }

    #[test]
    fn key_transport_roundtrip_any(kek in any::<[u8; 32]>(), cek in any::<[u8; 32]>(), ukm in any::<[u8; 8]>()) {
        for method in KeyWrapMethod::ALL {
            for param_set in ParamSet::ALL {
                let t = KeyTransport::with_param_set(method, param_set);
                let blob = t.encode_with_ukm(&cek, &kek, &ukm).unwrap();
                prop_assert_eq!(*t.decode(&blob, &kek).unwrap(), cek);
            }
        }
    }
}
