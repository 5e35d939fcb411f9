/*++

Licensed under the Apache-2.0 license.

File Name:

    session.rs

Abstract:

    File contains the session context: one suspendable streaming digest
    computation on the shared engine.

--*/

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashacc_error::{HashAccError, HashAccResult};
use hashacc_registers::CR;
use zeroize::Zeroize;

use crate::algo::{HashAlgorithm, HashMode};
use crate::context::Snapshot;
use crate::digest::write_key;
use crate::engine::{HashEngine, HashPlatform};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum SessionState {
    /// Allocated, `init` not called yet
    Allocated,

    /// Accepting data
    Active,

    /// Digest produced; `init` required before reuse
    Finalized,

    /// A hardware call failed; the snapshot is not trustworthy
    Faulted,
}

/// One streaming digest computation
pub struct HashSession<'e, P: HashPlatform> {
    pub(crate) engine: &'e HashEngine<P>,
    pub(crate) mode: HashMode,
    pub(crate) algo: HashAlgorithm,
    pub(crate) state: SessionState,

    /// Bytes accepted but not yet pushed to the engine
    pub(crate) pending: Box<[u8]>,
    pub(crate) pending_len: usize,

    /// Byte count that forces a flush into the engine
    pub(crate) queue_size: usize,

    pub(crate) snapshot: Snapshot,
}

impl<'e, P: HashPlatform> HashSession<'e, P> {
    pub(crate) fn new(
        engine: &'e HashEngine<P>,
        mode: HashMode,
        algo: HashAlgorithm,
    ) -> HashAccResult<Self> {
        // One block plus one register of FIFO headroom.
        let capacity = algo.block_size() + 4;
        let mut pending = Vec::new();
        pending
            .try_reserve_exact(capacity)
            .map_err(|_| HashAccError::DRIVER_HASH_OUT_OF_MEMORY)?;
        pending.resize(capacity, 0u8);

        Ok(Self {
            engine,
            mode,
            algo,
            state: SessionState::Allocated,
            pending: pending.into_boxed_slice(),
            pending_len: 0,
            queue_size: capacity,
            snapshot: Snapshot::new(algo.save_class(), mode)?,
        })
    }

    pub fn mode(&self) -> HashMode {
        self.mode
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algo
    }

    /// Digest length in bytes
    pub fn digest_size(&self) -> usize {
        self.algo.digest_size()
    }

    /// Bytes buffered in software awaiting the next flush
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    /// Current flush threshold in bytes
    pub fn queue_size(&self) -> usize {
        self.queue_size
    }

    /// Number of context swap registers this session saves
    pub fn snapshot_len(&self) -> usize {
        self.snapshot.csr().len()
    }

    pub(crate) fn ensure_active(&self) -> HashAccResult<()> {
        if self.state != SessionState::Active {
            return Err(HashAccError::DRIVER_HASH_INVALID_STATE);
        }
        Ok(())
    }

    /// Record a hardware failure so the session refuses further data
    pub(crate) fn track<T>(&mut self, result: HashAccResult<T>) -> HashAccResult<T> {
        if result.is_err() {
            self.state = SessionState::Faulted;
        }
        result
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.zeroize();
        self.pending_len = 0;
    }

    /// Start a new computation, keyed in HMAC mode
    ///
    /// # Arguments
    ///
    /// * `key` - HMAC key; ignored in hash mode
    pub fn init(&mut self, key: Option<&[u8]>) -> HashAccResult<()> {
        let key = match self.mode {
            HashMode::Hash => None,
            HashMode::Hmac => Some(
                key.filter(|k| !k.is_empty())
                    .ok_or(HashAccError::DRIVER_HASH_HMAC_KEY_MISSING)?,
            ),
        };

        self.clear_pending();
        self.queue_size = self.algo.block_size() + 4;

        let result = self.hw_init(key);
        self.state = SessionState::Active;
        self.track(result)
    }

    fn hw_init(&mut self, key: Option<&[u8]>) -> HashAccResult<()> {
        let engine = self.engine;
        let hw = engine.access();
        let regs = hw.regs();

        let mut cr =
            (CR::INIT::SET + CR::DATATYPE::Byte).value | self.algo.selector(engine.capabilities());

        if let Some(key) = key {
            cr |= CR::MODE::Hmac.value;
            if key.len() > self.algo.block_size() {
                cr |= CR::LKEY::SET.value;
            }
            regs.set_cr(cr);
            write_key(&regs, key)?;
        } else {
            regs.set_cr(cr);
        }

        self.snapshot.save(&regs)
    }

    /// Copy the complete state of `src` into this session, keeping this
    /// session's own buffers. Both sessions must belong to the same engine.
    pub fn copy_from(&mut self, src: &Self) -> HashAccResult<()> {
        if !core::ptr::eq(self.engine, src.engine)
            || self.mode != src.mode
            || self.algo != src.algo
        {
            return Err(HashAccError::DRIVER_HASH_COPY_MISMATCH);
        }

        self.snapshot.copy_from(&src.snapshot)?;
        self.pending.copy_from_slice(&src.pending);
        self.pending_len = src.pending_len;
        self.queue_size = src.queue_size;
        self.state = src.state;
        Ok(())
    }

    /// Duplicate this session into independent storage
    pub fn deep_copy(&self) -> HashAccResult<Self> {
        let mut copy = Self::new(self.engine, self.mode, self.algo)?;
        copy.copy_from(self)?;
        Ok(copy)
    }

    /// Release the session's buffers
    pub fn free(self) {}
}

impl<P: HashPlatform> Drop for HashSession<'_, P> {
    fn drop(&mut self) {
        self.pending.zeroize();
        self.snapshot.zeroize();
    }
}
