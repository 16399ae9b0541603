//! Deterministic, optionally parallel buffer fills.
//!
//! Output element `i` always comes from block `i / D::RESULT_ELEMENT_COUNT`
//! past the engine's position, whatever the shard size or thread count.
//! Each shard works on its own copy of the engine, skipped to the shard's
//! first block, so no state is shared between workers.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::FillConfig;
use crate::distributions::BlockDistribution;
use crate::rng::{PhiloxEngine, ELEMENT_COST, RESULT_ELEMENT_COUNT};
use crate::Result;

/// Fill `out` with samples from `dist` using the default [`FillConfig`].
///
/// Advances `engine` past every block consumed, including the partially used
/// last block.
pub fn fill_random<D: BlockDistribution>(
    engine: &mut PhiloxEngine,
    dist: &D,
    out: &mut [D::Output],
) {
    fill_shards(engine, dist, out, &FillConfig::default());
}

/// Fill `out` with samples from `dist`, partitioned according to `config`.
pub fn fill_random_with<D: BlockDistribution>(
    engine: &mut PhiloxEngine,
    dist: &D,
    out: &mut [D::Output],
    config: &FillConfig,
) -> Result<()> {
    config.validate()?;
    fill_shards(engine, dist, out, config);
    Ok(())
}

/// Number of blocks needed for `len` samples of `D`.
pub fn blocks_for<D: BlockDistribution>(len: usize) -> u64 {
    len.div_ceil(D::RESULT_ELEMENT_COUNT) as u64
}

fn fill_shards<D: BlockDistribution>(
    engine: &mut PhiloxEngine,
    dist: &D,
    out: &mut [D::Output],
    config: &FillConfig,
) {
    let group = D::RESULT_ELEMENT_COUNT;
    let blocks = blocks_for::<D>(out.len());
    let shard_len = config.blocks_per_shard.saturating_mul(group);
    let work = (blocks as usize).saturating_mul(RESULT_ELEMENT_COUNT * ELEMENT_COST);
    let base = *engine;

    if work >= config.parallel_threshold && out.len() > shard_len {
        debug!(
            "Parallel fill: {} samples, {} blocks, {} per shard",
            out.len(),
            blocks,
            config.blocks_per_shard
        );
        let blocks_per_shard = config.blocks_per_shard as u64;
        out.par_chunks_mut(shard_len)
            .enumerate()
            .for_each(|(shard, chunk)| {
                let mut local = base;
                local.skip_ahead(shard as u64 * blocks_per_shard);
                fill_sequential(&mut local, dist, chunk, group);
            });
    } else {
        trace!("Sequential fill: {} samples, {} blocks", out.len(), blocks);
        let mut local = base;
        fill_sequential(&mut local, dist, out, group);
    }

    engine.skip_ahead(blocks);
}

#[inline]
fn fill_sequential<D: BlockDistribution>(
    engine: &mut PhiloxEngine,
    dist: &D,
    out: &mut [D::Output],
    group: usize,
) {
    for chunk in out.chunks_mut(group) {
        dist.transform(&engine.next_block(), chunk);
    }
}
