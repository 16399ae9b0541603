//! Transforms from Philox blocks to typed samples.
//!
//! Every distribution consumes exactly one engine block per group of
//! [`BlockDistribution::RESULT_ELEMENT_COUNT`] outputs. Output element `i`
//! of a fill therefore always comes from block `i / RESULT_ELEMENT_COUNT`,
//! which is what lets [`crate::fill`] shard work without changing results.
//!
//! - **Uniform**: `f16`/`f32`/`f64` in [0, 1), scaled ranges, bounded integers
//! - **Normal**: Box-Muller standard normals and scaled normals
//! - **Exponential**: inverse-CDF exponential variates

mod normal;
mod uniform;

pub use normal::{
    box_muller_f32, box_muller_f64, Exponential, Normal, StandardNormalF32, StandardNormalF64,
};
pub use uniform::{UniformF16, UniformF32, UniformF64, UniformInt, UniformRange};

use std::fmt;
use std::str::FromStr;

use half::f16;
use serde::{Deserialize, Serialize};

use crate::config::FillConfig;
use crate::fill::fill_random_with;
use crate::rng::{Block, PhiloxEngine};
use crate::{PhiloxError, Result};

/// A distribution that turns one Philox block into a fixed number of samples.
pub trait BlockDistribution: Sync {
    /// Sample type.
    type Output: Copy + Default + Send;

    /// Number of samples produced from one block.
    const RESULT_ELEMENT_COUNT: usize;

    /// Write up to `RESULT_ELEMENT_COUNT` samples derived from `block` into `out`.
    ///
    /// When `out` is shorter than a full group, the leading samples are written
    /// and the rest of the block is discarded.
    fn transform(&self, block: &Block, out: &mut [Self::Output]);

    /// Draw a single sample, consuming a whole block.
    fn sample(&self, engine: &mut PhiloxEngine) -> Self::Output {
        let mut out = [Self::Output::default(); 1];
        self.transform(&engine.next_block(), &mut out);
        out[0]
    }
}

/// Convert a 32-bit word to a uniform f32 in [0, 1).
///
/// Places the low 23 bits in the mantissa of a float in [1, 2) and
/// subtracts one, so the conversion is exact.
#[inline]
pub fn uint32_to_float(x: u32) -> f32 {
    const EXPONENT: u32 = 127 << 23;
    f32::from_bits(EXPONENT | (x & 0x7f_ffff)) - 1.0
}

/// Convert two 32-bit words to a uniform f64 in [0, 1).
///
/// Uses the low 20 bits of `hi` and all of `lo` as the 52-bit mantissa.
#[inline]
pub fn uint64_to_double(hi: u32, lo: u32) -> f64 {
    const EXPONENT: u64 = 1023 << 52;
    let mantissa = ((hi as u64 & 0xf_ffff) << 32) | lo as u64;
    f64::from_bits(EXPONENT | mantissa) - 1.0
}

/// Convert a 16-bit value to a uniform f16 in [0, 1).
#[inline]
pub fn uint16_to_half(x: u16) -> f16 {
    const EXPONENT: u16 = 15 << 10;
    let one_to_two = f16::from_bits(EXPONENT | (x & 0x3ff));
    // Exact in f32: both operands and the difference fit in 11 bits of mantissa.
    f16::from_f32(one_to_two.to_f32() - 1.0)
}

/// Named distribution, used by configuration files and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DistributionKind {
    /// Uniform f32 in [0, 1).
    #[default]
    UniformF32,
    /// Uniform f64 in [0, 1).
    UniformF64,
    /// Uniform f16 in [0, 1).
    UniformF16,
    /// Uniform f32 in [low, high).
    UniformRange {
        /// Inclusive lower bound.
        low: f32,
        /// Exclusive upper bound.
        high: f32,
    },
    /// Uniform integer in [low, high).
    UniformInt {
        /// Inclusive lower bound.
        low: i64,
        /// Exclusive upper bound.
        high: i64,
    },
    /// Standard normal f32.
    NormalF32,
    /// Standard normal f64.
    NormalF64,
    /// Normal f32 with mean and standard deviation.
    Normal {
        /// Mean.
        mean: f32,
        /// Standard deviation.
        std_dev: f32,
    },
    /// Exponential f32 with rate lambda.
    Exponential {
        /// Rate parameter.
        lambda: f32,
    },
}

impl DistributionKind {
    /// Number of samples each block produces for this distribution.
    pub fn samples_per_block(&self) -> usize {
        match self {
            Self::UniformF64 | Self::NormalF64 => 2,
            _ => 4,
        }
    }

    /// Check parameters without generating anything.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::UniformRange { low, high } => UniformRange::new(low, high).map(|_| ()),
            Self::UniformInt { low, high } => UniformInt::new(low, high).map(|_| ()),
            Self::Normal { mean, std_dev } => Normal::new(mean, std_dev).map(|_| ()),
            Self::Exponential { lambda } => Exponential::new(lambda).map(|_| ()),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniformF32 => write!(f, "uniform-f32"),
            Self::UniformF64 => write!(f, "uniform-f64"),
            Self::UniformF16 => write!(f, "uniform-f16"),
            Self::UniformRange { low, high } => write!(f, "uniform-range:{},{}", low, high),
            Self::UniformInt { low, high } => write!(f, "uniform-int:{},{}", low, high),
            Self::NormalF32 => write!(f, "normal-f32"),
            Self::NormalF64 => write!(f, "normal-f64"),
            Self::Normal { mean, std_dev } => write!(f, "normal:{},{}", mean, std_dev),
            Self::Exponential { lambda } => write!(f, "exponential:{}", lambda),
        }
    }
}

impl FromStr for DistributionKind {
    type Err = PhiloxError;

    /// Parse `name` or `name:p1,p2`, e.g. `uniform-int:0,10` or `exponential:1.5`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        let (name, params) = match s.split_once(':') {
            Some((name, params)) => (name, params.split(',').map(str::trim).collect::<Vec<_>>()),
            None => (s.as_str(), Vec::new()),
        };

        let kind = match (name, params.as_slice()) {
            ("uniform-f32" | "uniform" | "float", []) => Self::UniformF32,
            ("uniform-f64" | "double", []) => Self::UniformF64,
            ("uniform-f16" | "half", []) => Self::UniformF16,
            ("normal-f32" | "normal", []) => Self::NormalF32,
            ("normal-f64", []) => Self::NormalF64,
            ("uniform-range", [low, high]) => Self::UniformRange {
                low: parse_param(low)?,
                high: parse_param(high)?,
            },
            ("uniform-int", [low, high]) => Self::UniformInt {
                low: parse_param(low)?,
                high: parse_param(high)?,
            },
            ("normal", [mean, std_dev]) => Self::Normal {
                mean: parse_param(mean)?,
                std_dev: parse_param(std_dev)?,
            },
            ("exponential", [lambda]) => Self::Exponential {
                lambda: parse_param(lambda)?,
            },
            _ => {
                return Err(PhiloxError::InvalidParameter(format!(
                    "Unknown distribution '{}'. Valid options: uniform-f32, uniform-f64, \
                     uniform-f16, normal-f32, normal-f64, uniform-range:LOW,HIGH, \
                     uniform-int:LOW,HIGH, normal:MEAN,STD, exponential:LAMBDA",
                    s
                )))
            }
        };

        kind.validate()?;
        Ok(kind)
    }
}

fn parse_param<T: FromStr>(value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        PhiloxError::InvalidParameter(format!("invalid distribution parameter '{}'", value))
    })
}

/// Typed samples produced by [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Samples {
    /// Half-precision samples.
    F16(Vec<f16>),
    /// Single-precision samples.
    F32(Vec<f32>),
    /// Double-precision samples.
    F64(Vec<f64>),
    /// Integer samples.
    I64(Vec<i64>),
}

impl Samples {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::F16(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::I64(v) => v.len(),
        }
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render each sample as text.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Self::F16(v) => v.iter().map(|x| x.to_f32().to_string()).collect(),
            Self::F32(v) => v.iter().map(|x| x.to_string()).collect(),
            Self::F64(v) => v.iter().map(|x| x.to_string()).collect(),
            Self::I64(v) => v.iter().map(|x| x.to_string()).collect(),
        }
    }
}

/// Generate `count` samples of `kind`, advancing `engine` past the consumed blocks.
pub fn generate(
    engine: &mut PhiloxEngine,
    kind: &DistributionKind,
    count: usize,
    config: &FillConfig,
) -> Result<Samples> {
    fn run<D: BlockDistribution>(
        engine: &mut PhiloxEngine,
        dist: &D,
        count: usize,
        config: &FillConfig,
    ) -> Result<Vec<D::Output>> {
        let mut out = vec![D::Output::default(); count];
        fill_random_with(engine, dist, &mut out, config)?;
        Ok(out)
    }

    let samples = match *kind {
        DistributionKind::UniformF32 => Samples::F32(run(engine, &UniformF32, count, config)?),
        DistributionKind::UniformF64 => Samples::F64(run(engine, &UniformF64, count, config)?),
        DistributionKind::UniformF16 => Samples::F16(run(engine, &UniformF16, count, config)?),
        DistributionKind::UniformRange { low, high } => {
            Samples::F32(run(engine, &UniformRange::new(low, high)?, count, config)?)
        }
        DistributionKind::UniformInt { low, high } => {
            Samples::I64(run(engine, &UniformInt::new(low, high)?, count, config)?)
        }
        DistributionKind::NormalF32 => {
            Samples::F32(run(engine, &StandardNormalF32, count, config)?)
        }
        DistributionKind::NormalF64 => {
            Samples::F64(run(engine, &StandardNormalF64, count, config)?)
        }
        DistributionKind::Normal { mean, std_dev } => {
            Samples::F32(run(engine, &Normal::new(mean, std_dev)?, count, config)?)
        }
        DistributionKind::Exponential { lambda } => {
            Samples::F32(run(engine, &Exponential::new(lambda)?, count, config)?)
        }
    };

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint32_to_float_bounds() {
        assert_eq!(uint32_to_float(0), 0.0);
        assert_eq!(uint32_to_float(0x0080_0000), 0.0); // only low 23 bits count
        assert_eq!(uint32_to_float(0x0040_0000), 0.5);
        assert!(uint32_to_float(u32::MAX) < 1.0);
    }

    #[test]
    fn test_uint64_to_double_bounds() {
        assert_eq!(uint64_to_double(0, 0), 0.0);
        assert_eq!(uint64_to_double(0x0008_0000, 0), 0.5);
        assert!(uint64_to_double(u32::MAX, u32::MAX) < 1.0);
    }

    #[test]
    fn test_uint16_to_half_bounds() {
        assert_eq!(uint16_to_half(0), f16::ZERO);
        assert_eq!(uint16_to_half(0x200).to_f32(), 0.5);
        assert!(uint16_to_half(u16::MAX).to_f32() < 1.0);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("uniform-f32".parse::<DistributionKind>().unwrap(), DistributionKind::UniformF32);
        assert_eq!("half".parse::<DistributionKind>().unwrap(), DistributionKind::UniformF16);
        assert_eq!("Normal-F64".parse::<DistributionKind>().unwrap(), DistributionKind::NormalF64);
        assert_eq!(
            "uniform-int:0, 10".parse::<DistributionKind>().unwrap(),
            DistributionKind::UniformInt { low: 0, high: 10 }
        );
        assert_eq!(
            "normal:1.5,2".parse::<DistributionKind>().unwrap(),
            DistributionKind::Normal { mean: 1.5, std_dev: 2.0 }
        );
        assert!("gamma".parse::<DistributionKind>().is_err());
        assert!("uniform-int:5,5".parse::<DistributionKind>().is_err());
        assert!("exponential:abc".parse::<DistributionKind>().is_err());
    }

    #[test]
    fn test_kind_display_round_trip() {
        let kinds = [
            DistributionKind::UniformF64,
            DistributionKind::UniformRange { low: -1.0, high: 2.5 },
            DistributionKind::Exponential { lambda: 0.5 },
        ];
        for kind in kinds {
            assert_eq!(kind.to_string().parse::<DistributionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_generate_matches_direct_transform() {
        let mut engine = PhiloxEngine::new(3, 0);
        let mut reference = engine;

        let samples =
            generate(&mut engine, &DistributionKind::UniformF32, 6, &FillConfig::default())
                .unwrap();
        let Samples::F32(values) = samples else {
            panic!("expected f32 samples");
        };

        let first = reference.next_block();
        let second = reference.next_block();
        assert_eq!(values[..4], first.map(uint32_to_float));
        assert_eq!(values[4..], [uint32_to_float(second[0]), uint32_to_float(second[1])]);
        assert_eq!(engine, reference);
    }

    #[test]
    fn test_generate_rejects_invalid_parameters() {
        let mut engine = PhiloxEngine::new(3, 0);
        let kind = DistributionKind::Normal { mean: 0.0, std_dev: -1.0 };
        assert!(generate(&mut engine, &kind, 4, &FillConfig::default()).is_err());
        assert_eq!(engine, PhiloxEngine::new(3, 0));
    }

    #[test]
    fn test_samples_render() {
        let samples = Samples::I64(vec![1, -2]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.to_strings(), vec!["1", "-2"]);
        assert_eq!(serde_json::to_string(&samples).unwrap(), "[1,-2]");
    }
}
