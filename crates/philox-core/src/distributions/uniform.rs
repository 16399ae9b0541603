//! Uniform distributions.

use half::f16;

use super::{uint16_to_half, uint32_to_float, uint64_to_double, BlockDistribution};
use crate::rng::Block;
use crate::{PhiloxError, Result};

/// Uniform f32 in [0, 1), one sample per word.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformF32;

impl BlockDistribution for UniformF32 {
    type Output = f32;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [f32]) {
        for (o, &word) in out.iter_mut().zip(block) {
            *o = uint32_to_float(word);
        }
    }
}

/// Uniform f64 in [0, 1), one sample per pair of words.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformF64;

impl BlockDistribution for UniformF64 {
    type Output = f64;
    const RESULT_ELEMENT_COUNT: usize = 2;

    fn transform(&self, block: &Block, out: &mut [f64]) {
        for (o, pair) in out.iter_mut().zip(block.chunks_exact(2)) {
            *o = uint64_to_double(pair[0], pair[1]);
        }
    }
}

/// Uniform f16 in [0, 1), one sample per word (low 16 bits).
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformF16;

impl BlockDistribution for UniformF16 {
    type Output = f16;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [f16]) {
        for (o, &word) in out.iter_mut().zip(block) {
            *o = uint16_to_half(word as u16);
        }
    }
}

/// Uniform f32 in [low, high).
///
/// Results that round up to `high` are pulled back to the largest f32 below it.
#[derive(Debug, Clone, Copy)]
pub struct UniformRange {
    low: f32,
    span: f32,
    max: f32,
}

impl UniformRange {
    /// Create a range distribution. Bounds must be finite with `low < high`,
    /// and `high - low` must not overflow.
    pub fn new(low: f32, high: f32) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(PhiloxError::InvalidParameter(format!(
                "uniform range requires finite low < high, got [{}, {})",
                low, high
            )));
        }
        let span = high - low;
        if !span.is_finite() {
            return Err(PhiloxError::InvalidParameter(format!(
                "uniform range [{}, {}) is wider than f32::MAX",
                low, high
            )));
        }
        Ok(Self {
            low,
            span,
            max: next_below(high),
        })
    }
}

/// Largest f32 strictly below a finite `x`.
fn next_below(x: f32) -> f32 {
    let bits = x.to_bits();
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

impl BlockDistribution for UniformRange {
    type Output = f32;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [f32]) {
        for (o, &word) in out.iter_mut().zip(block) {
            *o = (self.low + uint32_to_float(word) * self.span).min(self.max);
        }
    }
}

/// Uniform integer in [low, high).
///
/// Reduces each word modulo the range, so ranges that do not divide 2^32
/// carry a small bias toward lower values.
#[derive(Debug, Clone, Copy)]
pub struct UniformInt {
    low: i64,
    range: u64,
}

impl UniformInt {
    /// Largest supported range (one word of entropy per sample).
    pub const MAX_RANGE: u64 = 1 << 32;

    /// Create an integer distribution over [low, high).
    pub fn new(low: i64, high: i64) -> Result<Self> {
        let range = high as i128 - low as i128;
        if range <= 0 || range > Self::MAX_RANGE as i128 {
            return Err(PhiloxError::InvalidParameter(format!(
                "integer range [{}, {}) must contain between 1 and 2^32 values",
                low, high
            )));
        }
        Ok(Self {
            low,
            range: range as u64,
        })
    }
}

impl BlockDistribution for UniformInt {
    type Output = i64;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [i64]) {
        for (o, &word) in out.iter_mut().zip(block) {
            *o = self.low + (word as u64 % self.range) as i64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PhiloxEngine;

    #[test]
    fn test_uniform_f32_range() {
        let mut engine = PhiloxEngine::new(12345, 0);
        let mut out = [0.0f32; 4];

        for _ in 0..1000 {
            UniformF32.transform(&engine.next_block(), &mut out);
            for u in out {
                assert!((0.0..1.0).contains(&u), "Uniform should be in [0, 1), got {}", u);
            }
        }
    }

    #[test]
    fn test_uniform_f64_uses_word_pairs() {
        let block = [0x0008_0000, 0, 0, 0];
        let mut out = [1.0f64; 2];
        UniformF64.transform(&block, &mut out);
        assert_eq!(out, [0.5, 0.0]);
    }

    #[test]
    fn test_uniform_f16_uses_low_bits() {
        let block = [0xFFFF_0200, 0, 0x0000_0100, 0x3FF];
        let mut out = [f16::ONE; 4];
        UniformF16.transform(&block, &mut out);

        assert_eq!(out[0].to_f32(), 0.5);
        assert_eq!(out[1], f16::ZERO);
        assert_eq!(out[2].to_f32(), 0.25);
        assert!(out[3].to_f32() < 1.0);
    }

    #[test]
    fn test_partial_group() {
        let block = [0x0040_0000, 0x0040_0000, 0, 0];
        let mut out = [7.0f32; 1];
        UniformF32.transform(&block, &mut out);
        assert_eq!(out, [0.5]);
    }

    #[test]
    fn test_uniform_range() {
        let dist = UniformRange::new(2.0, 5.0).unwrap();
        let mut engine = PhiloxEngine::new(1, 0);

        for _ in 0..1000 {
            let x = dist.sample(&mut engine);
            assert!((2.0..5.0).contains(&x), "got {}", x);
        }

        assert!(UniformRange::new(1.0, 1.0).is_err());
        assert!(UniformRange::new(f32::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_uniform_range_one_ulp_stays_below_high() {
        let high = f32::from_bits(1.0f32.to_bits() + 1);
        let dist = UniformRange::new(1.0, high).unwrap();
        let mut engine = PhiloxEngine::new(0, 0);

        for _ in 0..1000 {
            assert_eq!(dist.sample(&mut engine), 1.0);
        }
    }

    #[test]
    fn test_uniform_range_upper_bound_at_zero() {
        let dist = UniformRange::new(-1e-30, 0.0).unwrap();
        let mut engine = PhiloxEngine::new(4, 0);

        for _ in 0..1000 {
            let x = dist.sample(&mut engine);
            assert!((-1e-30..0.0).contains(&x), "got {}", x);
        }
    }

    #[test]
    fn test_uniform_range_rejects_overflowing_span() {
        assert!(UniformRange::new(-3e38, 3e38).is_err());
        assert!(UniformRange::new(f32::MIN, f32::MAX).is_err());
        assert!(UniformRange::new(-1e38, 1e38).is_ok());
    }

    #[test]
    fn test_next_below() {
        assert_eq!(next_below(1.0), 1.0 - f32::EPSILON / 2.0);
        assert_eq!(next_below(-1.0), -(1.0 + f32::EPSILON));
        assert!(next_below(0.0) < 0.0);
        assert!(next_below(f32::MIN_POSITIVE) < f32::MIN_POSITIVE);
    }

    #[test]
    fn test_uniform_int_covers_range() {
        let dist = UniformInt::new(-3, 3).unwrap();
        let mut engine = PhiloxEngine::new(77, 0);
        let mut seen = [false; 6];
        let mut out = [0i64; 4];

        for _ in 0..200 {
            dist.transform(&engine.next_block(), &mut out);
            for x in out {
                assert!((-3..3).contains(&x));
                seen[(x + 3) as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_int_full_word_range() {
        let dist = UniformInt::new(0, 1 << 32).unwrap();
        let mut out = [0i64; 4];
        dist.transform(&[u32::MAX, 0, 1, 2], &mut out);
        assert_eq!(out, [u32::MAX as i64, 0, 1, 2]);

        assert!(UniformInt::new(0, (1 << 32) + 1).is_err());
        assert!(UniformInt::new(i64::MIN, i64::MAX).is_err());
        assert!(UniformInt::new(4, 3).is_err());
    }
}
