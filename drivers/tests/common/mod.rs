// Licensed under the Apache-2.0 license

#![allow(dead_code)]

use hashacc_drivers::{HashAlgorithm, HashEngine, HashMode};
use hashacc_hw_model::ModelEmulated;
use hmac::{Mac, SimpleHmac};
use sha2::Digest;

pub type Engine = HashEngine<ModelEmulated>;

/// Engine with SHA-1, SHA-2 and SHA-3
pub fn engine_mp13() -> Engine {
    let model = ModelEmulated::stm32mp13();
    let compat = model.compat();
    HashEngine::probe(model, compat)
}

/// Engine with MD5, SHA-1, SHA-224 and SHA-256
pub fn engine_mp15() -> Engine {
    let model = ModelEmulated::stm32mp15();
    let compat = model.compat();
    HashEngine::probe(model, compat)
}

/// Algorithms the engine advertises
pub fn supported(engine: &Engine) -> Vec<HashAlgorithm> {
    HashAlgorithm::ALL
        .into_iter()
        .filter(|algo| engine.capabilities().contains(algo.capability()))
        .collect()
}

pub fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

fn hmac_with<M: Mac + hmac::digest::KeyInit>(key: &[u8], msg: &[u8]) -> Vec<u8> {
    let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(key).unwrap();
    mac.update(msg);
    mac.finalize().into_bytes().to_vec()
}

/// Expected digest or MAC from the RustCrypto implementations
pub fn reference(algo: HashAlgorithm, key: Option<&[u8]>, msg: &[u8]) -> Vec<u8> {
    match key {
        None => match algo {
            HashAlgorithm::Md5 => md5::Md5::digest(msg).to_vec(),
            HashAlgorithm::Sha1 => sha1::Sha1::digest(msg).to_vec(),
            HashAlgorithm::Sha224 => sha2::Sha224::digest(msg).to_vec(),
            HashAlgorithm::Sha256 => sha2::Sha256::digest(msg).to_vec(),
            HashAlgorithm::Sha384 => sha2::Sha384::digest(msg).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(msg).to_vec(),
            HashAlgorithm::Sha3_224 => sha3::Sha3_224::digest(msg).to_vec(),
            HashAlgorithm::Sha3_256 => sha3::Sha3_256::digest(msg).to_vec(),
            HashAlgorithm::Sha3_384 => sha3::Sha3_384::digest(msg).to_vec(),
            HashAlgorithm::Sha3_512 => sha3::Sha3_512::digest(msg).to_vec(),
        },
        Some(key) => match algo {
            HashAlgorithm::Md5 => hmac_with::<SimpleHmac<md5::Md5>>(key, msg),
            HashAlgorithm::Sha1 => hmac_with::<SimpleHmac<sha1::Sha1>>(key, msg),
            HashAlgorithm::Sha224 => hmac_with::<SimpleHmac<sha2::Sha224>>(key, msg),
            HashAlgorithm::Sha256 => hmac_with::<SimpleHmac<sha2::Sha256>>(key, msg),
            HashAlgorithm::Sha384 => hmac_with::<SimpleHmac<sha2::Sha384>>(key, msg),
            HashAlgorithm::Sha512 => hmac_with::<SimpleHmac<sha2::Sha512>>(key, msg),
            HashAlgorithm::Sha3_224 => hmac_with::<SimpleHmac<sha3::Sha3_224>>(key, msg),
            HashAlgorithm::Sha3_256 => hmac_with::<SimpleHmac<sha3::Sha3_256>>(key, msg),
            HashAlgorithm::Sha3_384 => hmac_with::<SimpleHmac<sha3::Sha3_384>>(key, msg),
            HashAlgorithm::Sha3_512 => hmac_with::<SimpleHmac<sha3::Sha3_512>>(key, msg),
        },
    }
}

/// Run one complete computation, feeding `msg` in pieces of `chunk` bytes
pub fn run(
    engine: &Engine,
    algo: HashAlgorithm,
    key: Option<&[u8]>,
    msg: &[u8],
    chunk: usize,
) -> Vec<u8> {
    let mode = if key.is_some() {
        HashMode::Hmac
    } else {
        HashMode::Hash
    };
    let mut session = engine.alloc(mode, algo).unwrap();
    session.init(key).unwrap();
    for piece in msg.chunks(chunk.max(1)) {
        session.update(piece).unwrap();
        assert!(session.pending_len() < session.queue_size());
    }
    let mut out = vec![0u8; session.digest_size()];
    session.finalize(&mut out, key).unwrap();
    session.free();
    out
}
