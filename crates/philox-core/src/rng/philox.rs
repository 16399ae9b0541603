//! Philox4x32-10 counter-based PRNG.
//!
//! Philox was introduced in "Parallel Random Numbers: As Easy as 1, 2, 3"
//! by Salmon et al. (2011).
//!
//! Key properties:
//! - Counter-based: state is a 128-bit counter and a 64-bit key
//! - Statistically excellent: passes all BigCrush tests
//! - Integer-only: no floating point, so output is bit-identical everywhere
//! - Seekable: skipping `n` blocks is a single 128-bit addition

use super::state::PhiloxState;

/// Four 32-bit output words produced by one generation call.
pub type Block = [u32; 4];

/// 128-bit counter stored as four little-endian 32-bit words.
pub type Counter = [u32; 4];

/// 64-bit key stored as two 32-bit words (low word first).
pub type Key = [u32; 2];

/// Multiplier applied to counter word 0.
pub const PHILOX_M4X32_0: u32 = 0xD2511F53;
/// Multiplier applied to counter word 2.
pub const PHILOX_M4X32_1: u32 = 0xCD9E8D57;
/// Round-key increment for key word 0 (golden ratio).
pub const PHILOX_W32_0: u32 = 0x9E3779B9;
/// Round-key increment for key word 1 (sqrt(3) - 1).
pub const PHILOX_W32_1: u32 = 0xBB67AE85;

/// Number of mixing rounds per block.
pub const PHILOX_ROUNDS: usize = 10;

/// Number of 32-bit words returned per block.
pub const RESULT_ELEMENT_COUNT: usize = 4;

/// Estimated cost of generating a single element, in cycles.
pub const ELEMENT_COST: usize = 10;

/// Philox4x32-10 engine.
///
/// Construction places the seed in the key and the offset in the upper 64
/// bits of the counter, so every offset owns a run of 2^64 blocks.
///
/// The engine has no internal locking. Share it across threads through
/// [`crate::GuardedPhilox`] or hand each worker its own copy positioned on a
/// disjoint counter range.
///
/// Skipping is positional only: to resume a stream in another process, persist
/// [`PhiloxEngine::state`] and rebuild with [`PhiloxEngine::from_state`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhiloxEngine {
    counter: Counter,
    key: Key,
}

impl PhiloxEngine {
    /// Create an engine from a seed and a starting offset.
    pub fn new(seed: i64, offset: u64) -> Self {
        let seed = seed as u64;
        Self {
            counter: [0, 0, offset as u32, (offset >> 32) as u32],
            key: [seed as u32, (seed >> 32) as u32],
        }
    }

    /// Create an engine positioned at an arbitrary counter.
    pub fn from_parts(counter: Counter, key: Key) -> Self {
        Self { counter, key }
    }

    /// Restore an engine from a checkpoint.
    pub fn from_state(state: PhiloxState) -> Self {
        Self::from_parts(state.counter, state.key)
    }

    /// Current counter words.
    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    /// Key words. Never changes after construction.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Get current state (for checkpointing).
    pub fn state(&self) -> PhiloxState {
        PhiloxState {
            counter: self.counter,
            key: self.key,
        }
    }

    /// Current counter as a 128-bit integer.
    pub fn position(&self) -> u128 {
        self.counter
            .iter()
            .rev()
            .fold(0u128, |acc, &word| (acc << 32) | word as u128)
    }

    /// Generate the next block of four words and advance the counter by one.
    #[inline]
    pub fn next_block(&mut self) -> Block {
        let block = compute_block(&self.counter, &self.key);
        self.skip_one();
        block
    }

    /// Endless iterator over successive blocks.
    pub fn blocks(&mut self) -> impl Iterator<Item = Block> + '_ {
        std::iter::repeat_with(move || self.next_block())
    }

    /// Skip `count` blocks (advance the counter without generating output).
    ///
    /// Equivalent to `count` calls to [`PhiloxEngine::next_block`]. The counter
    /// wraps silently past 2^128.
    pub fn skip_ahead(&mut self, count: u64) {
        let count_lo = count as u32;
        let count_hi = (count >> 32) as u32;

        let (c0, carry0) = self.counter[0].overflowing_add(count_lo);
        self.counter[0] = c0;

        // At most one of the two additions can overflow.
        let (c1, carry1) = self.counter[1].overflowing_add(count_hi);
        let (c1, carry1b) = c1.overflowing_add(carry0 as u32);
        self.counter[1] = c1;

        if carry1 || carry1b {
            self.counter[2] = self.counter[2].wrapping_add(1);
            if self.counter[2] == 0 {
                self.counter[3] = self.counter[3].wrapping_add(1);
            }
        }
    }

    #[inline]
    fn skip_one(&mut self) {
        self.counter[0] = self.counter[0].wrapping_add(1);
        if self.counter[0] == 0 {
            self.counter[1] = self.counter[1].wrapping_add(1);
            if self.counter[1] == 0 {
                self.counter[2] = self.counter[2].wrapping_add(1);
                if self.counter[2] == 0 {
                    self.counter[3] = self.counter[3].wrapping_add(1);
                }
            }
        }
    }
}

/// Compute the block for a given counter and key.
///
/// Pure function: the key is raised on a local copy between rounds and
/// neither argument is modified.
#[inline]
pub fn compute_block(counter: &Counter, key: &Key) -> Block {
    let mut ctr = *counter;
    let mut key = *key;

    for round in 0..PHILOX_ROUNDS {
        ctr = philox_round(&ctr, &key);
        if round + 1 < PHILOX_ROUNDS {
            raise_key(&mut key);
        }
    }

    ctr
}

/// Single round of Philox mixing.
#[inline]
fn philox_round(ctr: &Counter, key: &Key) -> Counter {
    let (lo0, hi0) = mul_hi_lo(PHILOX_M4X32_0, ctr[0]);
    let (lo1, hi1) = mul_hi_lo(PHILOX_M4X32_1, ctr[2]);

    [hi1 ^ ctr[1] ^ key[0], lo1, hi0 ^ ctr[3] ^ key[1], lo0]
}

#[inline]
fn raise_key(key: &mut Key) {
    key[0] = key[0].wrapping_add(PHILOX_W32_0);
    key[1] = key[1].wrapping_add(PHILOX_W32_1);
}

/// Low and high halves of the 64-bit product.
#[inline]
fn mul_hi_lo(a: u32, b: u32) -> (u32, u32) {
    let product = a as u64 * b as u64;
    (product as u32, (product >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_zero_golden_blocks() {
        let mut engine = PhiloxEngine::new(0, 0);

        assert_eq!(
            engine.next_block(),
            [0x6627e8d5, 0xe169c58d, 0xbc57ac4c, 0x9b00dbd8]
        );
        assert_eq!(
            engine.next_block(),
            [0xf8e4cca4, 0x5cb200db, 0xb1a574eb, 0x097eff67]
        );
        assert_eq!(engine.counter(), &[2, 0, 0, 0]);
    }

    #[test]
    fn test_known_answer_all_ones() {
        let block = compute_block(&[u32::MAX; 4], &[u32::MAX; 2]);
        assert_eq!(block, [0x408f276d, 0x41c83b0e, 0xa20bc7c6, 0x6d5451fd]);
    }

    #[test]
    fn test_known_answer_pi_digits() {
        let block = compute_block(
            &[0x243f6a88, 0x85a308d3, 0x13198a2e, 0x03707344],
            &[0xa4093822, 0x299f31d0],
        );
        assert_eq!(block, [0xd16cfe09, 0x94fdcceb, 0x5001e420, 0x24126ea1]);
    }

    #[test]
    fn test_construction_layout() {
        let engine = PhiloxEngine::new(0x1122_3344_5566_7788, 0x99AA_BBCC_DDEE_FF00);

        assert_eq!(engine.key(), &[0x5566_7788, 0x1122_3344]);
        assert_eq!(engine.counter(), &[0, 0, 0xDDEE_FF00, 0x99AA_BBCC]);
    }

    #[test]
    fn test_negative_seed_uses_twos_complement_bits() {
        let engine = PhiloxEngine::new(-1, 7);

        assert_eq!(engine.key(), &[u32::MAX, u32::MAX]);
        assert_eq!(engine.counter(), &[0, 0, 7, 0]);

        let mut engine = engine;
        assert_eq!(
            engine.next_block(),
            [0xda207bb2, 0xf2f9310e, 0x36608b17, 0xc35b3354]
        );
    }

    #[test]
    fn test_key_untouched_by_generation() {
        let mut engine = PhiloxEngine::new(42, 3);
        let key = *engine.key();

        for _ in 0..100 {
            engine.next_block();
        }
        assert_eq!(engine.key(), &key);
        assert_eq!(engine.counter(), &[100, 0, 3, 0]);
    }

    #[test]
    fn test_next_block_ripples_carry() {
        let mut engine = PhiloxEngine::from_parts([u32::MAX, u32::MAX, u32::MAX, 0], [1, 2]);
        engine.next_block();
        assert_eq!(engine.counter(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_counter_wraps_at_128_bits() {
        let mut engine = PhiloxEngine::from_parts([u32::MAX; 4], [0, 0]);
        engine.next_block();
        assert_eq!(engine.counter(), &[0; 4]);

        let mut engine = PhiloxEngine::from_parts([u32::MAX; 4], [0, 0]);
        engine.skip_ahead(1);
        assert_eq!(engine.counter(), &[0; 4]);
    }

    #[test]
    fn test_skip_low_word_carry() {
        let mut engine = PhiloxEngine::from_parts([u32::MAX - 1, 0, 0, 0], [0, 0]);
        engine.skip_ahead(3);
        assert_eq!(engine.counter(), &[1, 1, 0, 0]);
    }

    #[test]
    fn test_skip_carry_into_high_half() {
        let mut engine = PhiloxEngine::from_parts([u32::MAX, u32::MAX, u32::MAX, 5], [0, 0]);
        engine.skip_ahead(1);
        assert_eq!(engine.counter(), &[0, 0, 0, 6]);

        // Low carry combined with a full high word
        let mut engine = PhiloxEngine::from_parts([1, 0, 9, 0], [0, 0]);
        engine.skip_ahead(u64::MAX);
        assert_eq!(engine.counter(), &[0, 0, 10, 0]);
    }

    #[test]
    fn test_skip_matches_stepping() {
        let mut stepped = PhiloxEngine::from_parts([u32::MAX - 8, u32::MAX, 3, 0], [7, 11]);
        let mut skipped = stepped;

        for _ in 0..17 {
            stepped.next_block();
        }
        skipped.skip_ahead(17);

        assert_eq!(stepped, skipped);
        assert_eq!(stepped.next_block(), skipped.next_block());
    }

    #[test]
    fn test_position() {
        let engine = PhiloxEngine::from_parts([1, 2, 3, 4], [0, 0]);
        assert_eq!(
            engine.position(),
            1u128 | 2u128 << 32 | 3u128 << 64 | 4u128 << 96
        );
    }

    #[test]
    fn test_blocks_iterator() {
        let mut a = PhiloxEngine::new(9, 0);
        let mut b = a;

        let collected: Vec<Block> = a.blocks().take(5).collect();
        for block in collected {
            assert_eq!(block, b.next_block());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_state_round_trip() {
        let mut engine = PhiloxEngine::new(1234, 56);
        engine.skip_ahead(1000);

        let mut restored = PhiloxEngine::from_state(engine.state());
        assert_eq!(restored.next_block(), engine.next_block());
    }
}
