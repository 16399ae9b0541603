//! Mutex-guarded generator for handing out sample reservations.

use parking_lot::Mutex;
use tracing::trace;

use crate::config::GeneratorConfig;
use crate::rng::{PhiloxEngine, PhiloxState, RESULT_ELEMENT_COUNT};

/// Shared Philox generator.
///
/// Each reservation returns a private engine positioned at the current
/// counter and advances the shared counter past the reserved blocks, so
/// reservations never overlap. Callers generate from their private engine
/// without holding the lock.
#[derive(Debug)]
pub struct GuardedPhilox {
    engine: Mutex<PhiloxEngine>,
}

impl GuardedPhilox {
    /// Create a guarded generator from a seed and offset.
    pub fn new(seed: i64, offset: u64) -> Self {
        Self::from_engine(PhiloxEngine::new(seed, offset))
    }

    /// Wrap an existing engine.
    pub fn from_engine(engine: PhiloxEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::from_engine(config.engine())
    }

    /// Reserve `blocks` 128-bit blocks.
    pub fn reserve_samples128(&self, blocks: u64) -> PhiloxEngine {
        let mut engine = self.engine.lock();
        let reserved = *engine;
        engine.skip_ahead(blocks);
        trace!("Reserved {} blocks at {:?}", blocks, reserved.counter());
        reserved
    }

    /// Reserve enough blocks for `samples` 32-bit samples.
    pub fn reserve_samples32(&self, samples: u64) -> PhiloxEngine {
        self.reserve_samples128(samples.div_ceil(RESULT_ELEMENT_COUNT as u64))
    }

    /// Current position of the shared engine.
    pub fn snapshot(&self) -> PhiloxState {
        self.engine.lock().state()
    }
}
