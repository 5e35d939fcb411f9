/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_hmac.rs

Abstract:

    File contains the hash/HMAC engine peripheral implementation.

--*/

use hashacc_emu_bus::{Bus, BusError, RvAddr, RvData, RvSize};
use hashacc_emu_crypto::{digest, HashAlgo, HashState};
use hashacc_registers::{
    HASH_CR, HASH_CSR_BASE, HASH_CSR_COUNT, HASH_DIN, HASH_HR_BASE, HASH_HR_COUNT, HASH_IMR,
    HASH_SR, HASH_STR, HASH_VERR, CR, SR, STR,
};
use tock_registers::LocalRegisterCopy;

/// Number of status reads that report BUSY after a block or calculation
const BUSY_READS: u32 = 2;

/// Context swap register holding the number of queued FIFO words
const CSR_FIFO_COUNT: usize = 0;

/// Context swap register holding the FIFO head word
const CSR_FIFO_HEAD: usize = 1;

/// Context swap registers holding the processed byte count (low, high)
const CSR_LEN_LO: usize = 3;
const CSR_LEN_HI: usize = 4;

/// First context swap register of the chaining state
const CSR_STATE: usize = 5;

/// How the control register selects the algorithm
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SelectorEncoding {
    /// MD5-capable engines: bits 18 and 7 pick SHA-1, MD5, SHA-224 or SHA-256
    Legacy,

    /// Four-bit algorithm field at bit 17, MD5 absent
    Extended,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum HmacPhase {
    Message = 0,
    KeyInner = 1,
    KeyOuter = 2,
}

impl From<u32> for HmacPhase {
    fn from(val: u32) -> Self {
        match val {
            1 => HmacPhase::KeyInner,
            2 => HmacPhase::KeyOuter,
            _ => HmacPhase::Message,
        }
    }
}

/// Hash/HMAC engine
pub struct HashPeriph {
    /// Control register
    cr: LocalRegisterCopy<u32, CR::Register>,

    /// Last-word valid bit count
    nblw: u32,

    /// Interrupt mask register
    imr: u32,

    /// Version register value
    version: u32,

    /// Context swap registers
    csr: [u32; HASH_CSR_COUNT],

    /// Digest registers
    hr: [u32; HASH_HR_COUNT],

    /// Words accepted but not yet consumed
    fifo: Vec<u32>,

    /// Key bytes collected during a key phase
    key: Vec<u8>,

    /// Inner HMAC digest awaiting the outer pass
    inner: Vec<u8>,

    encoding: SelectorEncoding,
    dinis: bool,
    digest_ready: bool,
    busy_reads: u32,
    stuck_busy: bool,
}

impl HashPeriph {
    /// Create a new engine in its power-on state
    ///
    /// # Arguments
    ///
    /// * `encoding` - Algorithm selector layout of the modelled chip
    /// * `version` - Value returned by the version register
    pub fn new(encoding: SelectorEncoding, version: u32) -> Self {
        Self {
            cr: LocalRegisterCopy::new(0),
            nblw: 0,
            imr: 0,
            version,
            csr: [0; HASH_CSR_COUNT],
            hr: [0; HASH_HR_COUNT],
            fifo: Vec::new(),
            key: Vec::new(),
            inner: Vec::new(),
            encoding,
            dinis: true,
            digest_ready: false,
            busy_reads: 0,
            stuck_busy: false,
        }
    }

    /// Return every register to its power-on value
    pub fn reset(&mut self) {
        let stuck_busy = self.stuck_busy;
        *self = Self::new(self.encoding, self.version);
        self.stuck_busy = stuck_busy;
    }

    /// Hold the BUSY flag set regardless of engine activity
    pub fn set_stuck_busy(&mut self, stuck: bool) {
        self.stuck_busy = stuck;
    }

    /// Algorithm selected by the current control register
    pub fn algo(&self) -> Option<HashAlgo> {
        match self.encoding {
            SelectorEncoding::Legacy => {
                let hi = self.cr.get() & (1 << 18) != 0;
                let md5 = self.cr.is_set(CR::ALGO_MD5);
                Some(match (hi, md5) {
                    (false, false) => HashAlgo::Sha1,
                    (false, true) => HashAlgo::Md5,
                    (true, false) => HashAlgo::Sha224,
                    (true, true) => HashAlgo::Sha256,
                })
            }
            SelectorEncoding::Extended => {
                if self.cr.is_set(CR::ALGO_MD5) {
                    return None;
                }
                match self.cr.read(CR::ALGO) {
                    0x0 => Some(HashAlgo::Sha1),
                    0x2 => Some(HashAlgo::Sha224),
                    0x3 => Some(HashAlgo::Sha256),
                    0x4 => Some(HashAlgo::Sha3_224),
                    0x5 => Some(HashAlgo::Sha3_256),
                    0x6 => Some(HashAlgo::Sha3_384),
                    0x7 => Some(HashAlgo::Sha3_512),
                    0xC => Some(HashAlgo::Sha384),
                    0xF => Some(HashAlgo::Sha512),
                    _ => None,
                }
            }
        }
    }

    /// Number of words waiting in the input FIFO
    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    /// Context swap register holding the HMAC phase for `algo`
    fn phase_index(algo: HashAlgo) -> usize {
        match algo {
            HashAlgo::Sha384 | HashAlgo::Sha512 => 91,
            _ if algo.is_sha3() => 72,
            _ => 38,
        }
    }

    fn phase(&self, algo: HashAlgo) -> HmacPhase {
        HmacPhase::from(self.csr[Self::phase_index(algo)])
    }

    fn set_phase(&mut self, algo: HashAlgo, phase: HmacPhase) {
        self.csr[Self::phase_index(algo)] = phase as u32;
    }

    fn state(&self, algo: HashAlgo) -> HashState {
        HashState::from_words(algo, &self.csr[CSR_STATE..CSR_STATE + algo.state_words()])
    }

    fn store_state(&mut self, state: &HashState) {
        let words = state.algo().state_words();
        state.to_words(&mut self.csr[CSR_STATE..CSR_STATE + words]);
    }

    fn processed_len(&self) -> u64 {
        u64::from(self.csr[CSR_LEN_LO]) | (u64::from(self.csr[CSR_LEN_HI]) << 32)
    }

    fn set_processed_len(&mut self, len: u64) {
        self.csr[CSR_LEN_LO] = len as u32;
        self.csr[CSR_LEN_HI] = (len >> 32) as u32;
    }

    fn sync_fifo_csr(&mut self) {
        self.csr[CSR_FIFO_COUNT] = self.fifo.len() as u32;
        self.csr[CSR_FIFO_HEAD] = self.fifo.first().copied().unwrap_or(0);
    }

    fn word_bytes(&self, word: u32) -> [u8; 4] {
        if self.cr.matches_all(CR::DATATYPE::Byte) {
            word.to_le_bytes()
        } else {
            word.to_be_bytes()
        }
    }

    /// Bytes of the queued words, the last one trimmed to the valid length
    fn drain_fifo_bytes(&mut self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .fifo
            .iter()
            .flat_map(|w| self.word_bytes(*w))
            .collect();
        if !self.fifo.is_empty() && self.nblw != 0 {
            let drop = 4 - (self.nblw as usize / 8);
            bytes.truncate(bytes.len() - drop);
        }
        self.fifo.clear();
        self.sync_fifo_csr();
        bytes
    }

    fn busy(&mut self) {
        self.busy_reads = BUSY_READS;
    }

    /// Control register INIT: restart the computation for the selected algorithm
    fn init(&mut self) {
        self.csr = [0; HASH_CSR_COUNT];
        self.fifo.clear();
        self.key.clear();
        self.inner.clear();
        self.hr = [0; HASH_HR_COUNT];
        self.dinis = true;
        self.digest_ready = false;
        self.busy_reads = 0;

        if let Some(algo) = self.algo() {
            self.store_state(&HashState::new(algo));
            let phase = if self.cr.matches_all(CR::MODE::Hmac) {
                HmacPhase::KeyInner
            } else {
                HmacPhase::Message
            };
            self.set_phase(algo, phase);
        }
    }

    fn on_write_data(&mut self, val: u32) {
        let Some(algo) = self.algo() else {
            return;
        };

        if self.cr.matches_all(CR::MODE::Hmac) && self.phase(algo) != HmacPhase::Message {
            self.key.extend_from_slice(&self.word_bytes(val));
            return;
        }

        self.dinis = false;
        let block_words = algo.block_size() / 4;
        if self.fifo.len() == block_words {
            let block: Vec<u8> = self.fifo.iter().flat_map(|w| self.word_bytes(*w)).collect();
            let mut state = self.state(algo);
            state.compress(&block);
            self.store_state(&state);
            self.set_processed_len(self.processed_len() + block.len() as u64);
            self.fifo.clear();
            self.dinis = true;
            self.busy();
        }
        self.fifo.push(val);
        self.sync_fifo_csr();
    }

    /// Key collected in a key phase, trimmed and reduced to at most one block
    fn block_key(&mut self, algo: HashAlgo) -> Vec<u8> {
        let mut key = core::mem::take(&mut self.key);
        if self.nblw != 0 {
            let drop = 4 - (self.nblw as usize / 8);
            key.truncate(key.len().saturating_sub(drop));
        }
        if key.len() > algo.block_size() {
            key = digest(algo, &key);
        }
        key.resize(algo.block_size(), 0);
        key
    }

    /// Stream control DCAL: close the current pass
    fn on_calculate(&mut self) {
        let Some(algo) = self.algo() else {
            return;
        };
        let hmac = self.cr.matches_all(CR::MODE::Hmac);

        match (hmac, self.phase(algo)) {
            (true, HmacPhase::KeyInner) => {
                let ipad: Vec<u8> = self.block_key(algo).iter().map(|b| b ^ 0x36).collect();
                let mut state = HashState::new(algo);
                state.compress(&ipad);
                self.store_state(&state);
                self.set_processed_len(ipad.len() as u64);
                self.set_phase(algo, HmacPhase::Message);
            }
            (true, HmacPhase::KeyOuter) => {
                let mut outer: Vec<u8> = self.block_key(algo).iter().map(|b| b ^ 0x5c).collect();
                outer.extend_from_slice(&self.inner);
                let result = digest(algo, &outer);
                self.inner.clear();
                self.publish(&result);
                self.set_phase(algo, HmacPhase::Message);
            }
            (_, HmacPhase::Message) => {
                let result = self.finish_message(algo);
                if hmac {
                    self.inner = result;
                    self.set_phase(algo, HmacPhase::KeyOuter);
                } else {
                    self.publish(&result);
                }
            }
            (false, _) => {}
        }

        self.dinis = true;
        self.busy();
    }

    fn finish_message(&mut self, algo: HashAlgo) -> Vec<u8> {
        let mut tail = self.drain_fifo_bytes();
        let mut state = self.state(algo);
        let mut processed = self.processed_len();
        if tail.len() == algo.block_size() {
            state.compress(&tail);
            processed += tail.len() as u64;
            tail.clear();
        }
        state.finalize(&tail, processed + tail.len() as u64)
    }

    fn publish(&mut self, result: &[u8]) {
        self.hr = [0; HASH_HR_COUNT];
        for (reg, chunk) in self.hr.iter_mut().zip(result.chunks(4)) {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            *reg = u32::from_be_bytes(word);
        }
        self.digest_ready = true;
    }

    fn read_status(&mut self) -> u32 {
        let busy = self.stuck_busy || self.busy_reads > 0;
        self.busy_reads = self.busy_reads.saturating_sub(1);

        let mut sr = LocalRegisterCopy::<u32, SR::Register>::new(0);
        sr.modify(SR::NBWP.val(self.fifo.len().min(31) as u32));
        if self.dinis {
            sr.modify(SR::DINIS::SET);
        }
        if busy {
            sr.modify(SR::BUSY::SET);
        } else if self.digest_ready {
            sr.modify(SR::DCIS::SET);
        }
        sr.get()
    }

    fn csr_index(addr: RvAddr) -> Option<usize> {
        let idx = addr.checked_sub(HASH_CSR_BASE)? as usize / 4;
        (idx < HASH_CSR_COUNT).then_some(idx)
    }

    fn hr_index(addr: RvAddr) -> Option<usize> {
        let idx = addr.checked_sub(HASH_HR_BASE)? as usize / 4;
        (idx < HASH_HR_COUNT).then_some(idx)
    }

    fn on_write_csr(&mut self, idx: usize, val: u32) {
        self.csr[idx] = val;
        if idx == CSR_FIFO_COUNT || idx == CSR_FIFO_HEAD {
            let count = self.csr[CSR_FIFO_COUNT] as usize;
            self.fifo.clear();
            if count > 0 {
                self.fifo.push(self.csr[CSR_FIFO_HEAD]);
                self.fifo.resize(count, 0);
            }
        }
    }
}

impl Bus for HashPeriph {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        if size != RvSize::Word || addr % 4 != 0 {
            return Err(BusError::LoadAddrMisaligned);
        }
        match addr {
            HASH_CR => Ok(self.cr.get()),
            HASH_DIN => Ok(0),
            HASH_STR => Ok(self.nblw),
            HASH_IMR => Ok(self.imr),
            HASH_SR => Ok(self.read_status()),
            HASH_VERR => Ok(self.version),
            _ => {
                if let Some(idx) = Self::csr_index(addr) {
                    Ok(self.csr[idx])
                } else if let Some(idx) = Self::hr_index(addr) {
                    Ok(self.hr[idx])
                } else {
                    Err(BusError::LoadAccessFault)
                }
            }
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        if size != RvSize::Word || addr % 4 != 0 {
            return Err(BusError::StoreAddrMisaligned);
        }
        match addr {
            HASH_CR => {
                let init = LocalRegisterCopy::<u32, CR::Register>::new(val).is_set(CR::INIT);
                self.cr.set(val & !CR::INIT::SET.value);
                if init {
                    self.init();
                }
            }
            HASH_DIN => self.on_write_data(val),
            HASH_STR => {
                let reg = LocalRegisterCopy::<u32, STR::Register>::new(val);
                self.nblw = reg.read(STR::NBLW);
                if reg.is_set(STR::DCAL) {
                    self.on_calculate();
                }
            }
            HASH_IMR => self.imr = val,
            _ => match Self::csr_index(addr) {
                Some(idx) => self.on_write_csr(idx, val),
                None => return Err(BusError::StoreAccessFault),
            },
        }
        Ok(())
    }
}
