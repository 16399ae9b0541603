//! Plain-old-data checkpoint of an engine position.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::philox::{Counter, Key};
use crate::{PhiloxError, Result};

/// Philox4x32-10 state (24 bytes).
///
/// Holds everything needed to resume a stream: rebuilding an engine from a
/// state continues exactly where the original left off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct PhiloxState {
    /// 128-bit counter (4 x 32-bit, least significant word first)
    pub counter: Counter,
    /// 64-bit key (2 x 32-bit, low word first)
    pub key: Key,
}

// SAFETY: PhiloxState is #[repr(C)] with only u32 arrays and no padding
unsafe impl Zeroable for PhiloxState {}
unsafe impl Pod for PhiloxState {}

impl PhiloxState {
    /// Size of the raw byte representation.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// View the state as raw bytes in native byte order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Read a state from raw bytes in native byte order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bytemuck::try_pod_read_unaligned(bytes).map_err(|e| {
            PhiloxError::InvalidState(format!(
                "expected {} bytes, got {} ({})",
                Self::SIZE,
                bytes.len(),
                e
            ))
        })
    }
}
