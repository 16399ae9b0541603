//! Normal and exponential distributions.

use std::f32::consts::PI as PI_F32;
use std::f64::consts::PI as PI_F64;

use super::{uint32_to_float, uint64_to_double, BlockDistribution};
use crate::rng::Block;
use crate::{PhiloxError, Result};

/// Smallest uniform fed to a logarithm; avoids log(0).
const EPSILON_F32: f32 = 1.0e-7;
const EPSILON_F64: f64 = 1.0e-7;

/// Box-Muller transform of two words into two independent standard normals.
#[inline]
pub fn box_muller_f32(x0: u32, x1: u32) -> (f32, f32) {
    let u1 = uint32_to_float(x0).max(EPSILON_F32);
    let v1 = 2.0 * PI_F32 * uint32_to_float(x1);
    let r = (-2.0 * u1.ln()).sqrt();
    (v1.sin() * r, v1.cos() * r)
}

/// Box-Muller transform of four words (two doubles) into two standard normals.
#[inline]
pub fn box_muller_f64(x0: u32, x1: u32, x2: u32, x3: u32) -> (f64, f64) {
    let u1 = uint64_to_double(x0, x1).max(EPSILON_F64);
    let v1 = 2.0 * PI_F64 * uint64_to_double(x2, x3);
    let r = (-2.0 * u1.ln()).sqrt();
    (v1.sin() * r, v1.cos() * r)
}

/// Standard normal f32, four samples per block.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormalF32;

impl BlockDistribution for StandardNormalF32 {
    type Output = f32;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [f32]) {
        let (z0, z1) = box_muller_f32(block[0], block[1]);
        let (z2, z3) = box_muller_f32(block[2], block[3]);
        let samples = [z0, z1, z2, z3];
        let n = out.len().min(samples.len());
        out[..n].copy_from_slice(&samples[..n]);
    }
}

/// Standard normal f64, two samples per block.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormalF64;

impl BlockDistribution for StandardNormalF64 {
    type Output = f64;
    const RESULT_ELEMENT_COUNT: usize = 2;

    fn transform(&self, block: &Block, out: &mut [f64]) {
        let (z0, z1) = box_muller_f64(block[0], block[1], block[2], block[3]);
        let samples = [z0, z1];
        let n = out.len().min(samples.len());
        out[..n].copy_from_slice(&samples[..n]);
    }
}

/// Normal f32 with mean and standard deviation.
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    mean: f32,
    std_dev: f32,
}

impl Normal {
    /// Create a normal distribution. `std_dev` must be finite and positive.
    pub fn new(mean: f32, std_dev: f32) -> Result<Self> {
        if !mean.is_finite() || !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(PhiloxError::InvalidParameter(format!(
                "normal requires finite mean and std_dev > 0, got mean={} std_dev={}",
                mean, std_dev
            )));
        }
        Ok(Self { mean, std_dev })
    }
}

impl BlockDistribution for Normal {
    type Output = f32;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [f32]) {
        StandardNormalF32.transform(block, out);
        for z in out.iter_mut() {
            *z = self.mean + *z * self.std_dev;
        }
    }
}

/// Exponential f32 with rate lambda.
#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    lambda: f32,
}

impl Exponential {
    /// Create an exponential distribution. `lambda` must be finite and positive.
    pub fn new(lambda: f32) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(PhiloxError::InvalidParameter(format!(
                "exponential requires lambda > 0, got {}",
                lambda
            )));
        }
        Ok(Self { lambda })
    }
}

impl BlockDistribution for Exponential {
    type Output = f32;
    const RESULT_ELEMENT_COUNT: usize = 4;

    fn transform(&self, block: &Block, out: &mut [f32]) {
        for (o, &word) in out.iter_mut().zip(block) {
            let u = uint32_to_float(word).max(EPSILON_F32);
            *o = -u.ln() / self.lambda;
        }
    }
}
