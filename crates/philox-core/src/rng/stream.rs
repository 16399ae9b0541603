//! Word-at-a-time access to a Philox stream.

use rand::{RngCore, SeedableRng};

use super::philox::{Block, PhiloxEngine, RESULT_ELEMENT_COUNT};
use super::state::PhiloxState;

/// Buffered Philox stream.
///
/// Wraps a [`PhiloxEngine`] and hands out one word at a time from the
/// current block. Also usable anywhere a `rand` generator is expected.
#[derive(Debug, Clone)]
pub struct PhiloxStream {
    engine: PhiloxEngine,
    /// Buffer for generated values (we generate 4 at a time)
    buffer: Block,
    /// Index into buffer
    buffer_idx: usize,
}

impl PhiloxStream {
    /// Create new stream with seed and offset.
    pub fn new(seed: i64, offset: u64) -> Self {
        Self::from_engine(PhiloxEngine::new(seed, offset))
    }

    /// Create from an existing engine.
    pub fn from_engine(engine: PhiloxEngine) -> Self {
        Self {
            engine,
            buffer: [0; RESULT_ELEMENT_COUNT],
            buffer_idx: RESULT_ELEMENT_COUNT, // Force generation on first call
        }
    }

    /// Create from a checkpoint.
    pub fn from_state(state: PhiloxState) -> Self {
        Self::from_engine(PhiloxEngine::from_state(state))
    }

    /// Underlying engine, positioned after the buffered block.
    pub fn engine(&self) -> &PhiloxEngine {
        &self.engine
    }

    /// Consume the stream and return its engine. Buffered words are dropped.
    pub fn into_engine(self) -> PhiloxEngine {
        self.engine
    }

    /// Get current state (for checkpointing).
    ///
    /// Words still buffered from the current block are not part of the state;
    /// a stream restored from it resumes at the next block boundary.
    pub fn state(&self) -> PhiloxState {
        self.engine.state()
    }

    /// Number of words left in the current block.
    pub fn buffered(&self) -> usize {
        RESULT_ELEMENT_COUNT - self.buffer_idx
    }

    /// Drop any buffered words and skip `count` whole blocks.
    pub fn skip_blocks(&mut self, count: u64) {
        self.buffer_idx = RESULT_ELEMENT_COUNT;
        self.engine.skip_ahead(count);
    }

    /// Generate next u32 value.
    pub fn next_word(&mut self) -> u32 {
        if self.buffer_idx >= RESULT_ELEMENT_COUNT {
            self.buffer = self.engine.next_block();
            self.buffer_idx = 0;
        }
        let val = self.buffer[self.buffer_idx];
        self.buffer_idx += 1;
        val
    }

    /// Generate next u64 value (first word is the high half).
    pub fn next_dword(&mut self) -> u64 {
        let hi = self.next_word() as u64;
        let lo = self.next_word() as u64;
        (hi << 32) | lo
    }

    /// Generate next uniform f32 in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Use the upper 24 bits for f32 mantissa precision
        (self.next_word() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Generate next uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // Use upper 53 bits for f64 mantissa precision
        (self.next_dword() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

impl RngCore for PhiloxStream {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        self.next_dword()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PhiloxStream {
    /// Little-endian seed (bytes 0..8) followed by little-endian offset (bytes 8..16).
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let (seed_bytes, offset_bytes) = seed.split_at(8);
        let mut s = [0u8; 8];
        let mut o = [0u8; 8];
        s.copy_from_slice(seed_bytes);
        o.copy_from_slice(offset_bytes);
        Self::new(i64::from_le_bytes(s), u64::from_le_bytes(o))
    }
}
