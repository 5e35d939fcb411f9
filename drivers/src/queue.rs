/*++

Licensed under the Apache-2.0 license.

File Name:

    queue.rs

Abstract:

    File contains the streaming queue: word-at-a-time feeding of caller
    data into the engine, tracking the engine's block boundaries.

--*/

use hashacc_error::{HashAccError, HashAccResult};
use crate::engine::HashPlatform;
use crate::session::HashSession;
use crate::words::pack_le;

impl<P: HashPlatform> HashSession<'_, P> {
    /// Feed message bytes
    ///
    /// Input that does not reach the flush threshold is only buffered; the
    /// engine is not touched.
    ///
    /// # Arguments
    ///
    /// * `data` - Message bytes
    pub fn update(&mut self, data: &[u8]) -> HashAccResult<()> {
        self.ensure_active()?;

        if data.is_empty() {
            return Ok(());
        }

        let queued = self.pending_len + data.len();
        if queued < self.queue_size {
            self.pending[self.pending_len..queued].copy_from_slice(data);
            self.pending_len = queued;
            return Ok(());
        }

        let result = self.flush(data);
        self.track(result)
    }

    fn flush(&mut self, mut data: &[u8]) -> HashAccResult<()> {
        let engine = self.engine;
        let hw = engine.access();
        let regs = hw.regs();

        self.snapshot.restore(&regs);

        if self.pending_len > 0 {
            // Complete the last pending word from the head of the new input.
            let align = self.pending_len.next_multiple_of(4) - self.pending_len;
            let (head, rest) = data
                .split_at_checked(align)
                .ok_or(HashAccError::DRIVER_HASH_INPUT_UNDERRUN)?;
            let end = self.pending_len + align;
            self.pending[self.pending_len..end].copy_from_slice(head);
            data = rest;

            for word in self.pending[..end].chunks_exact(4) {
                regs.write_data(pack_le(word))?;
            }
            self.clear_pending();
        }

        // Keep feeding until the engine has closed a block and less than one
        // block of input is left.
        let block_size = self.algo.block_size();
        while data.len() >= block_size || !regs.input_ready() {
            let Some((word, rest)) = data.split_first_chunk::<4>() else {
                return Err(HashAccError::DRIVER_HASH_INPUT_UNDERRUN);
            };
            regs.write_data(u32::from_le_bytes(*word))?;
            data = rest;
        }
        self.queue_size = block_size;

        if data.len() > self.pending.len() {
            return Err(HashAccError::DRIVER_HASH_PENDING_OVERFLOW);
        }
        self.pending[..data.len()].copy_from_slice(data);
        self.pending_len = data.len();

        self.snapshot.save(&regs)
    }
}
