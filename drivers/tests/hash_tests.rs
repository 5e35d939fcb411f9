// Licensed under the Apache-2.0 license

mod common;

use common::{engine_mp13, engine_mp15, message, reference, run, supported};
use hashacc_drivers::{ErrorKind, HashAccError, HashAlgorithm, HashDriver, HashMode};
use hashacc_hw_model::ModelEmulated;

const SHA256_ABC: [u8; 32] = [
    0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22, 0x23,
    0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00, 0x15, 0xad,
];

const SHA256_EMPTY: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

const SHA1_ABC: [u8; 20] = [
    0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50, 0xc2, 0x6c,
    0x9c, 0xd0, 0xd8, 0x9d,
];

const MD5_ABC: [u8; 16] = [
    0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0, 0xd6, 0x96, 0x3f, 0x7d, 0x28, 0xe1, 0x7f, 0x72,
];

const SHA3_256_ABC: [u8; 32] = [
    0x3a, 0x98, 0x5d, 0xa7, 0x4f, 0xe2, 0x25, 0xb2, 0x04, 0x5c, 0x17, 0x2d, 0x6b, 0xd3, 0x90, 0xbd,
    0x85, 0x5f, 0x08, 0x6e, 0x3e, 0x9d, 0x52, 0x5b, 0x46, 0xbf, 0xe2, 0x45, 0x11, 0x43, 0x15, 0x32,
];

const SHA512_ABC: [u8; 64] = [
    0xdd, 0xaf, 0x35, 0xa1, 0x93, 0x61, 0x7a, 0xba, 0xcc, 0x41, 0x73, 0x49, 0xae, 0x20, 0x41, 0x31,
    0x12, 0xe6, 0xfa, 0x4e, 0x89, 0xa9, 0x7e, 0xa2, 0x0a, 0x9e, 0xee, 0xe6, 0x4b, 0x55, 0xd3, 0x9a,
    0x21, 0x92, 0x99, 0x2a, 0x27, 0x4f, 0xc1, 0xa8, 0x36, 0xba, 0x3c, 0x23, 0xa3, 0xfe, 0xeb, 0xbd,
    0x45, 0x4d, 0x44, 0x23, 0x64, 0x3c, 0xe8, 0x0e, 0x2a, 0x9a, 0xc9, 0x4f, 0xa5, 0x4c, 0xa4, 0x9f,
];

#[test]
fn test_digest_size() {
    let engine = engine_mp13();
    for algo in supported(&engine) {
        let session = engine.alloc(HashMode::Hash, algo).unwrap();
        assert_eq!(session.digest_size(), algo.digest_size());
    }

    let engine = engine_mp15();
    let session = engine.alloc(HashMode::Hash, HashAlgorithm::Md5).unwrap();
    assert_eq!(session.digest_size(), 16);
    let session = engine.alloc(HashMode::Hash, HashAlgorithm::Sha224).unwrap();
    assert_eq!(session.digest_size(), 28);
}

#[test]
fn test_known_answers() {
    let engine = engine_mp13();
    assert_eq!(run(&engine, HashAlgorithm::Sha256, None, b"abc", 64), SHA256_ABC);
    assert_eq!(run(&engine, HashAlgorithm::Sha256, None, b"", 64), SHA256_EMPTY);
    assert_eq!(run(&engine, HashAlgorithm::Sha1, None, b"abc", 1), SHA1_ABC);
    assert_eq!(run(&engine, HashAlgorithm::Sha3_256, None, b"abc", 2), SHA3_256_ABC);
    assert_eq!(run(&engine, HashAlgorithm::Sha512, None, b"abc", 3), SHA512_ABC);

    let engine = engine_mp15();
    assert_eq!(run(&engine, HashAlgorithm::Md5, None, b"abc", 64), MD5_ABC);
    assert_eq!(run(&engine, HashAlgorithm::Sha256, None, b"abc", 1), SHA256_ABC);
}

#[test]
fn test_chunking_does_not_change_digest() {
    for engine in [engine_mp13(), engine_mp15()] {
        for algo in supported(&engine) {
            let block = algo.block_size();
            for len in [0, 1, 3, 4, 55, block - 1, block, block + 3, block + 4, 3 * block + 7] {
                let msg = message(len);
                let expected = reference(algo, None, &msg);
                for chunk in [1, 3, 4, 7, 64, block + 5, len] {
                    assert_eq!(
                        run(&engine, algo, None, &msg, chunk),
                        expected,
                        "{algo:?} len {len} chunk {chunk}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_long_message() {
    let engine = engine_mp13();
    let msg = message(10_000);
    for algo in supported(&engine) {
        assert_eq!(run(&engine, algo, None, &msg, 1000), reference(algo, None, &msg));
    }
}

#[test]
fn test_queue_threshold() {
    let engine = engine_mp13();
    let mut session = engine.alloc(HashMode::Hash, HashAlgorithm::Sha256).unwrap();
    session.init(None).unwrap();
    assert_eq!(session.queue_size(), 68);

    session.update(&message(67)).unwrap();
    assert_eq!(session.pending_len(), 67);
    assert_eq!(session.queue_size(), 68);

    session.update(&[0x55]).unwrap();
    assert!(session.pending_len() < 64);
    assert_eq!(session.queue_size(), 64);

    for len in [1, 5, 63, 64, 130] {
        session.update(&message(len)).unwrap();
        assert!(session.pending_len() < session.queue_size());
    }

    // A new computation starts over with the initial headroom.
    session.init(None).unwrap();
    assert_eq!(session.pending_len(), 0);
    assert_eq!(session.queue_size(), 68);

    // One large update leaves most of a block behind, not just a partial word.
    session.update(&message(108)).unwrap();
    assert_eq!(session.pending_len(), 40);
    assert_eq!(session.queue_size(), 64);
    session.update(&message(20)).unwrap();
    assert_eq!(session.pending_len(), 60);

    let mut digest = [0u8; 32];
    session.finalize(&mut digest, None).unwrap();
    let mut msg = message(108);
    msg.extend_from_slice(&message(20));
    assert_eq!(digest[..], reference(HashAlgorithm::Sha256, None, &msg)[..]);
}

#[test]
fn test_buffered_update_skips_hardware() {
    let engine = engine_mp13();
    let mut session = engine.alloc(HashMode::Hash, HashAlgorithm::Sha384).unwrap();
    session.init(None).unwrap();

    let accesses = engine.platform().accesses();
    let enables = engine.platform().clock_enables();
    session.update(&message(100)).unwrap();
    session.update(&message(20)).unwrap();
    assert_eq!(engine.platform().accesses(), accesses);
    assert_eq!(engine.platform().clock_enables(), enables);

    session.update(&message(20)).unwrap();
    assert!(engine.platform().accesses() > accesses);
}

#[test]
fn test_empty_update() {
    let engine = engine_mp13();
    let mut session = engine.alloc(HashMode::Hash, HashAlgorithm::Sha256).unwrap();
    session.init(None).unwrap();
    session.update(b"ab").unwrap();

    let accesses = engine.platform().accesses();
    session.update(&[]).unwrap();
    assert_eq!(engine.platform().accesses(), accesses);
    assert_eq!(session.pending_len(), 2);

    session.update(b"c").unwrap();
    let mut digest = [0u8; 32];
    session.finalize(&mut digest, None).unwrap();
    assert_eq!(digest, SHA256_ABC);
}

#[test]
fn test_digest_buffer() {
    let engine = engine_mp13();
    let mut session = engine.alloc(HashMode::Hash, HashAlgorithm::Sha256).unwrap();
    session.init(None).unwrap();
    session.update(b"abc").unwrap();

    let mut short = [0u8; 31];
    let err = session.finalize(&mut short, None).unwrap_err();
    assert_eq!(err, HashAccError::DRIVER_HASH_DIGEST_BUFFER_TOO_SMALL);
    assert_eq!(err.kind(), ErrorKind::BadParameters);

    // The rejected call leaves the computation intact.
    let mut long = [0xffu8; 40];
    session.finalize(&mut long, None).unwrap();
    assert_eq!(long[..32], SHA256_ABC);
    assert_eq!(long[32..], [0xff; 8]);
}

#[test]
fn test_unsupported_algorithm() {
    let engine = engine_mp13();
    let err = engine.alloc(HashMode::Hash, HashAlgorithm::Md5).err().unwrap();
    assert_eq!(err, HashAccError::DRIVER_HASH_ALGO_NOT_SUPPORTED);
    assert_eq!(err.kind(), ErrorKind::NotImplemented);

    let engine = engine_mp15();
    for algo in [
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_512,
    ] {
        let err = engine.alloc(HashMode::Hash, algo).err().unwrap();
        assert_eq!(err, HashAccError::DRIVER_HASH_ALGO_NOT_SUPPORTED);
    }
}

#[test]
#[cfg(not(feature = "hmac"))]
fn test_hmac_mode_disabled() {
    let engine = engine_mp13();
    let err = engine.alloc(HashMode::Hmac, HashAlgorithm::Sha256).err().unwrap();
    assert_eq!(err, HashAccError::DRIVER_HASH_MODE_DISABLED);
    assert_eq!(err.kind(), ErrorKind::NotImplemented);

    // Disabled mode wins over a missing capability.
    let err = engine.alloc(HashMode::Hmac, HashAlgorithm::Md5).err().unwrap();
    assert_eq!(err, HashAccError::DRIVER_HASH_MODE_DISABLED);

    assert!(engine.alloc(HashMode::Hash, HashAlgorithm::Sha256).is_ok());
}

#[test]
fn test_driver_probe() {
    let mut driver = HashDriver::<ModelEmulated>::new();
    let err = driver.alloc(HashMode::Hash, HashAlgorithm::Sha256).err().unwrap();
    assert_eq!(err, HashAccError::DRIVER_HASH_NOT_PROBED);
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert!(driver.engine().is_none());

    let model = ModelEmulated::stm32mp13();
    let compat = model.compat();
    driver.probe(model, compat);

    let mut session = driver.alloc(HashMode::Hash, HashAlgorithm::Sha256).unwrap();
    session.init(None).unwrap();
    session.update(b"abc").unwrap();
    let mut digest = [0u8; 32];
    session.finalize(&mut digest, None).unwrap();
    assert_eq!(digest, SHA256_ABC);
}

#[test]
#[should_panic]
fn test_probe_reset_failure() {
    let model = ModelEmulated::stm32mp13();
    model.set_reset_fault(true);
    let compat = model.compat();
    let _ = hashacc_drivers::HashEngine::probe(model, compat);
}

#[test]
fn test_clock_gating() {
    let engine = engine_mp13();
    assert!(!engine.platform().clock_enabled());

    let msg = message(300);
    for algo in supported(&engine) {
        run(&engine, algo, None, &msg, 17);
        assert!(!engine.platform().clock_enabled());
    }
    assert_eq!(engine.platform().ungated_accesses(), 0);
}
