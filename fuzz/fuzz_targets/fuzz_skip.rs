//! Fuzz target for Philox counter arithmetic.
//!
//! Drives an engine with random step and skip sequences and checks its
//! position against a plain 128-bit model.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use philox_core::rng::{compute_block, PhiloxEngine};

/// Operations that move the stream.
#[derive(Debug, Arbitrary)]
enum StreamOp {
    /// Generate one block.
    Next,
    /// Skip ahead by a block count.
    Skip(u64),
}

/// Fuzz input: starting counter, key and operation sequence.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    counter: [u32; 4],
    key: [u32; 2],
    ops: Vec<StreamOp>,
}

fn counter_from_u128(value: u128) -> [u32; 4] {
    [
        value as u32,
        (value >> 32) as u32,
        (value >> 64) as u32,
        (value >> 96) as u32,
    ]
}

fuzz_target!(|input: FuzzInput| {
    if input.ops.len() > 500 {
        return;
    }

    let mut engine = PhiloxEngine::from_parts(input.counter, input.key);
    let mut model = engine.position();

    for op in &input.ops {
        match op {
            StreamOp::Next => {
                let expected = compute_block(&counter_from_u128(model), &input.key);
                assert_eq!(engine.next_block(), expected);
                model = model.wrapping_add(1);
            }
            StreamOp::Skip(n) => {
                engine.skip_ahead(*n);
                model = model.wrapping_add(*n as u128);
            }
        }

        assert_eq!(engine.position(), model, "counter diverged after {:?}", op);
        assert_eq!(engine.key(), &input.key, "key changed after {:?}", op);
    }
});
