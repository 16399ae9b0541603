//! The Philox counter-based generator.
//!
//! The generator is stateless apart from its position:
//! - The state is a 128-bit counter and a 64-bit key
//! - Seeking to any position is O(1) (the state is just a counter)
//! - Reproducible (same counter and key = same output, on every platform)

mod philox;
mod state;
mod stream;

pub use philox::{
    compute_block, Block, Counter, Key, PhiloxEngine, ELEMENT_COST, PHILOX_M4X32_0,
    PHILOX_M4X32_1, PHILOX_ROUNDS, PHILOX_W32_0, PHILOX_W32_1, RESULT_ELEMENT_COUNT,
};
pub use state::PhiloxState;
pub use stream::PhiloxStream;
