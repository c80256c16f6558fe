//! Error types for volume and configuration construction.
//!
//! Meshing itself cannot fail. These errors are raised only when input is
//! wrapped into the validated [`VoxelVolume`](crate::volume::VoxelVolume)
//! and [`MeshConfig`](crate::core::MeshConfig) types.

use thiserror::Error;

/// Errors raised while building mesher inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MesherError {
    /// Interior size is zero or the padded size exceeds one 64-bit column.
    #[error("invalid chunk size {cs}: padded size must be between 3 and 64")]
    InvalidChunkSize {
        /// Requested interior edge length.
        cs: usize,
    },

    /// Voxel buffer does not hold exactly CS_P³ bytes.
    #[error("voxel buffer has {actual} bytes, expected {expected}")]
    VolumeLength {
        /// CS_P³ for the requested chunk size.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Dense input does not fit inside a chunk interior.
    #[error("dense dimensions {dims:?} do not fit a chunk interior")]
    DenseDims {
        /// Supplied `[width, height, depth]`.
        dims: [usize; 3],
    },

    /// Light level does not fit the 4-bit vertex field.
    #[error("light level {0} out of range (0-15)")]
    LightOutOfRange(u8),
}
