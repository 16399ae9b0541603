//! Counter-based deterministic random generation built on Philox4x32-10.
//!
//! This crate provides the Philox engine used by random operator kernels,
//! along with the pieces those kernels build on top of it.
//!
//! # Features
//!
//! - **Philox engine**: 128-bit counter, 64-bit key, 4 words per call, O(1) skip-ahead
//! - **Checkpointing**: POD state that can be serialized and restored bit-exactly
//! - **Distributions**: uniform (f16/f32/f64/ranges/ints), normal and exponential transforms
//! - **Sharded fills**: parallel fills that produce the same output as a sequential fill
//! - **Parallel streams**: guarded sample reservation and disjoint-offset engines
//!
//! # Example
//!
//! ```
//! use philox_core::prelude::*;
//!
//! let mut engine = PhiloxEngine::new(0, 0);
//! assert_eq!(engine.next_block(), [0x6627e8d5, 0xe169c58d, 0xbc57ac4c, 0x9b00dbd8]);
//!
//! // Jump ahead without generating the skipped blocks
//! engine.skip_ahead(1 << 32);
//! assert_eq!(engine.counter(), &[1, 1, 0, 0]);
//!
//! // Fill a buffer with uniform floats
//! let mut out = vec![0.0f32; 1024];
//! fill_random(&mut engine, &UniformF32, &mut out);
//! assert!(out.iter().all(|u| (0.0..1.0).contains(u)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod distributions;
pub mod fill;
pub mod guarded;
pub mod rng;
pub mod streams;

/// Error types for Philox generation.
#[derive(Debug, thiserror::Error)]
pub enum PhiloxError {
    /// Invalid parameter error.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Serialized engine state could not be decoded.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
    /// IO error while reading or writing configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Philox operations.
pub type Result<T> = std::result::Result<T, PhiloxError>;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{FillConfig, GeneratorConfig};
    pub use crate::distributions::{
        generate, BlockDistribution, DistributionKind, Exponential, Normal, Samples,
        StandardNormalF32, StandardNormalF64, UniformF16, UniformF32, UniformF64, UniformInt,
        UniformRange,
    };
    pub use crate::fill::{fill_random, fill_random_with};
    pub use crate::guarded::GuardedPhilox;
    pub use crate::rng::{compute_block, Block, PhiloxEngine, PhiloxState, PhiloxStream};
    pub use crate::streams::split_streams;
    pub use crate::{PhiloxError, Result};
}

// Re-exports
pub use guarded::GuardedPhilox;
pub use rng::{Block, PhiloxEngine, PhiloxState, PhiloxStream};
