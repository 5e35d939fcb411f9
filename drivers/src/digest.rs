/*++

Licensed under the Apache-2.0 license.

File Name:

    digest.rs

Abstract:

    File contains HMAC key injection and digest finalization.

--*/

use hashacc_error::{HashAccError, HashAccResult};

use crate::algo::HashMode;
use crate::engine::HashPlatform;
use crate::regs::HashRegs;
use crate::session::{HashSession, SessionState};
use crate::words::{pack_le, unpack_be};

/// Stream an HMAC key into the engine and close the key pass
pub(crate) fn write_key<P: HashPlatform>(regs: &HashRegs<'_, P>, key: &[u8]) -> HashAccResult<()> {
    regs.set_nblw(key.len() % 4);

    for word in key.chunks(4) {
        regs.write_data(pack_le(word))?;
    }

    regs.start_calc();
    Ok(())
}

impl<P: HashPlatform> HashSession<'_, P> {
    /// Flush the remaining input and read the digest
    ///
    /// # Arguments
    ///
    /// * `digest` - Output, at least `digest_size()` bytes
    /// * `key` - HMAC key for the outer pass; ignored in hash mode
    pub fn finalize(&mut self, digest: &mut [u8], key: Option<&[u8]>) -> HashAccResult<()> {
        self.ensure_active()?;

        let key = match self.mode {
            HashMode::Hash => None,
            HashMode::Hmac => Some(
                key.filter(|k| !k.is_empty())
                    .ok_or(HashAccError::DRIVER_HASH_FINAL_KEY_MISSING)?,
            ),
        };

        let out = digest
            .get_mut(..self.digest_size())
            .ok_or(HashAccError::DRIVER_HASH_DIGEST_BUFFER_TOO_SMALL)?;

        let result = self.finish(out, key);
        if result.is_ok() {
            self.state = SessionState::Finalized;
        }
        self.track(result)
    }

    fn finish(&mut self, out: &mut [u8], key: Option<&[u8]>) -> HashAccResult<()> {
        let engine = self.engine;
        let hw = engine.access();
        let regs = hw.regs();

        self.snapshot.restore(&regs);

        if self.pending_len > 0 {
            for word in self.pending[..self.pending_len].chunks(4) {
                regs.write_data(pack_le(word))?;
            }
            regs.set_nblw(self.pending_len % 4);
            self.clear_pending();
        } else {
            regs.set_nblw(0);
        }

        regs.start_calc();

        if let Some(key) = key {
            write_key(&regs, key)?;
        }

        regs.wait_digest_ready()?;

        for (i, word) in out.chunks_mut(4).enumerate() {
            unpack_be(regs.hr(i), word);
        }

        Ok(())
    }
}
