//! Independent engines on disjoint counter ranges.

use tracing::debug;

use crate::rng::PhiloxEngine;
use crate::{PhiloxError, Result};

/// Build `count` engines sharing `seed`, with offsets `base_offset..base_offset + count`.
///
/// The offset fills the upper 64 bits of the counter, so each engine can
/// generate 2^64 blocks before reaching the next engine's first block.
pub fn split_streams(seed: i64, base_offset: u64, count: usize) -> Result<Vec<PhiloxEngine>> {
    let last = base_offset
        .checked_add((count as u64).saturating_sub(1))
        .ok_or_else(|| {
            PhiloxError::InvalidParameter(format!(
                "{} streams starting at offset {} overflow the 64-bit offset space",
                count, base_offset
            ))
        })?;

    debug!(
        "Splitting seed {} into {} streams at offsets {}..={}",
        seed, count, base_offset, last
    );

    Ok((0..count as u64)
        .map(|i| PhiloxEngine::new(seed, base_offset + i))
        .collect())
}
