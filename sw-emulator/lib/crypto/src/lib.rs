/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the hash accelerator emulator crypto library.

--*/

mod keccak;
mod md5;
mod sha1;
mod sha256;
mod sha512;

pub use keccak::{Keccak, Sha3Mode};
pub use md5::Md5;
pub use sha1::Sha1;
pub use sha256::{Sha256, Sha256Mode};
pub use sha512::{Sha512, Sha512Mode};

/// Digest algorithms the emulated engine can compute
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HashAlgo {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl HashAlgo {
    pub const ALL: [HashAlgo; 10] = [
        HashAlgo::Md5,
        HashAlgo::Sha1,
        HashAlgo::Sha224,
        HashAlgo::Sha256,
        HashAlgo::Sha384,
        HashAlgo::Sha512,
        HashAlgo::Sha3_224,
        HashAlgo::Sha3_256,
        HashAlgo::Sha3_384,
        HashAlgo::Sha3_512,
    ];

    /// Compression block (or sponge rate) in bytes
    pub const fn block_size(self) -> usize {
        match self {
            HashAlgo::Md5 | HashAlgo::Sha1 | HashAlgo::Sha224 | HashAlgo::Sha256 => 64,
            HashAlgo::Sha384 | HashAlgo::Sha512 => 128,
            HashAlgo::Sha3_224 => Sha3Mode::Sha3_224.rate(),
            HashAlgo::Sha3_256 => Sha3Mode::Sha3_256.rate(),
            HashAlgo::Sha3_384 => Sha3Mode::Sha3_384.rate(),
            HashAlgo::Sha3_512 => Sha3Mode::Sha3_512.rate(),
        }
    }

    pub const fn hash_size(self) -> usize {
        match self {
            HashAlgo::Md5 => 16,
            HashAlgo::Sha1 => 20,
            HashAlgo::Sha224 | HashAlgo::Sha3_224 => 28,
            HashAlgo::Sha256 | HashAlgo::Sha3_256 => 32,
            HashAlgo::Sha384 | HashAlgo::Sha3_384 => 48,
            HashAlgo::Sha512 | HashAlgo::Sha3_512 => 64,
        }
    }

    /// Number of 32-bit words needed to hold the chaining state
    pub const fn state_words(self) -> usize {
        match self {
            HashAlgo::Md5 => Md5::STATE_WORDS,
            HashAlgo::Sha1 => Sha1::STATE_WORDS,
            HashAlgo::Sha224 | HashAlgo::Sha256 => Sha256::STATE_WORDS,
            HashAlgo::Sha384 | HashAlgo::Sha512 => Sha512::STATE_WORDS,
            _ => Keccak::STATE_WORDS,
        }
    }

    pub const fn is_sha3(self) -> bool {
        matches!(
            self,
            HashAlgo::Sha3_224 | HashAlgo::Sha3_256 | HashAlgo::Sha3_384 | HashAlgo::Sha3_512
        )
    }

    fn sha3_mode(self) -> Sha3Mode {
        match self {
            HashAlgo::Sha3_224 => Sha3Mode::Sha3_224,
            HashAlgo::Sha3_384 => Sha3Mode::Sha3_384,
            HashAlgo::Sha3_512 => Sha3Mode::Sha3_512,
            _ => Sha3Mode::Sha3_256,
        }
    }
}

#[derive(Debug, Clone)]
enum Engine {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
    Keccak(Keccak),
}

/// Chaining state of one digest computation, fed one block at a time
#[derive(Debug, Clone)]
pub struct HashState {
    algo: HashAlgo,
    engine: Engine,
}

impl HashState {
    /// Start a digest from the algorithm's initial value
    pub fn new(algo: HashAlgo) -> Self {
        let engine = match algo {
            HashAlgo::Md5 => Engine::Md5(Md5::default()),
            HashAlgo::Sha1 => Engine::Sha1(Sha1::default()),
            HashAlgo::Sha224 => Engine::Sha256(Sha256::new(Sha256Mode::Sha224)),
            HashAlgo::Sha256 => Engine::Sha256(Sha256::new(Sha256Mode::Sha256)),
            HashAlgo::Sha384 => Engine::Sha512(Sha512::new(Sha512Mode::Sha384)),
            HashAlgo::Sha512 => Engine::Sha512(Sha512::new(Sha512Mode::Sha512)),
            _ => Engine::Keccak(Keccak::new(algo.sha3_mode())),
        };
        Self { algo, engine }
    }

    /// Resume a digest from words previously produced by [`HashState::to_words`]
    pub fn from_words(algo: HashAlgo, words: &[u32]) -> Self {
        let engine = match algo {
            HashAlgo::Md5 => Engine::Md5(Md5::from_words(words)),
            HashAlgo::Sha1 => Engine::Sha1(Sha1::from_words(words)),
            HashAlgo::Sha224 => Engine::Sha256(Sha256::from_words(Sha256Mode::Sha224, words)),
            HashAlgo::Sha256 => Engine::Sha256(Sha256::from_words(Sha256Mode::Sha256, words)),
            HashAlgo::Sha384 => Engine::Sha512(Sha512::from_words(Sha512Mode::Sha384, words)),
            HashAlgo::Sha512 => Engine::Sha512(Sha512::from_words(Sha512Mode::Sha512, words)),
            _ => Engine::Keccak(Keccak::from_words(algo.sha3_mode(), words)),
        };
        Self { algo, engine }
    }

    pub fn to_words(&self, words: &mut [u32]) {
        match &self.engine {
            Engine::Md5(e) => e.to_words(words),
            Engine::Sha1(e) => e.to_words(words),
            Engine::Sha256(e) => e.to_words(words),
            Engine::Sha512(e) => e.to_words(words),
            Engine::Keccak(e) => e.to_words(words),
        }
    }

    pub fn algo(&self) -> HashAlgo {
        self.algo
    }

    /// Compress one full block
    ///
    /// # Arguments
    ///
    /// * `block` - Exactly `algo.block_size()` bytes
    pub fn compress(&mut self, block: &[u8]) {
        match &mut self.engine {
            Engine::Md5(e) => e.update(as_block(block)),
            Engine::Sha1(e) => e.update(as_block(block)),
            Engine::Sha256(e) => e.update(as_block(block)),
            Engine::Sha512(e) => e.update(as_block(block)),
            Engine::Keccak(e) => e.update(block),
        }
    }

    /// Pad the trailing bytes and produce the digest
    ///
    /// # Arguments
    ///
    /// * `tail` - Unprocessed bytes, shorter than one block
    /// * `total_len` - Message length in bytes, `tail` included
    pub fn finalize(mut self, tail: &[u8], total_len: u64) -> Vec<u8> {
        let block_size = self.algo.block_size();
        let mut padded = tail.to_vec();

        if self.algo.is_sha3() {
            padded.resize(block_size, 0);
            padded[tail.len()] ^= 0x06;
            padded[block_size - 1] ^= 0x80;
        } else {
            let len_field = if block_size == 128 { 16 } else { 8 };
            padded.push(0x80);
            while padded.len() % block_size != block_size - len_field {
                padded.push(0);
            }
            let bits = u128::from(total_len) << 3;
            match self.algo {
                HashAlgo::Md5 => padded.extend_from_slice(&(bits as u64).to_le_bytes()),
                _ if len_field == 16 => padded.extend_from_slice(&bits.to_be_bytes()),
                _ => padded.extend_from_slice(&(bits as u64).to_be_bytes()),
            }
        }

        for block in padded.chunks_exact(block_size) {
            self.compress(block);
        }

        let mut hash = vec![0u8; self.algo.hash_size()];
        match &self.engine {
            Engine::Md5(e) => e.hash(&mut hash),
            Engine::Sha1(e) => e.hash(&mut hash),
            Engine::Sha256(e) => e.hash(&mut hash),
            Engine::Sha512(e) => e.hash(&mut hash),
            Engine::Keccak(e) => e.hash(&mut hash),
        }
        hash
    }
}

fn as_block<const N: usize>(block: &[u8]) -> &[u8; N] {
    // Callers always hand over exactly one block.
    <&[u8; N]>::try_from(block).expect("block size mismatch")
}

/// One-shot digest of `data`
pub fn digest(algo: HashAlgo, data: &[u8]) -> Vec<u8> {
    let mut state = HashState::new(algo);
    let mut blocks = data.chunks_exact(algo.block_size());
    for block in blocks.by_ref() {
        state.compress(block);
    }
    state.finalize(blocks.remainder(), data.len() as u64)
}
