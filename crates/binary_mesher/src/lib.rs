//! Binary greedy meshing with per-vertex ambient occlusion.
//!
//! This crate turns a padded cubic voxel volume (up to 64³, one material
//! byte per voxel) into a stream of packed 32-bit vertices. Columns of
//! voxels are held as `u64` bitsets so culling and merging process a whole
//! column per instruction.
//!
//! # Example
//!
//! ```
//! use binary_mesher::{mesh_volume, MeshConfig, VoxelVolume};
//!
//! let mut volume = VoxelVolume::default();
//! volume.set(32, 32, 32, 1); // Single voxel at center
//!
//! let mesh = mesh_volume(&volume, &MeshConfig::default());
//! assert_eq!(mesh.triangle_count(), 12); // Cube = 6 faces × 2 triangles
//! assert!(mesh.vertices.iter().all(|v| v.ao() == 3));
//! ```

pub mod ao;
pub mod bitplane;
pub mod bits;
pub mod convert;
pub mod core;
pub mod cull;
pub mod error;
pub mod merge;
pub mod mesh;
pub mod vertex;
pub mod volume;

// Re-export primary types
pub use crate::core::{
    MaterialId,
    MeshConfig,
    // Constants
    CS_P, CS, CS_P2, CS_P3, MAX_PADDED_SIZE,
    MATERIAL_EMPTY,
    FACE_POS_Y, FACE_NEG_Y, FACE_POS_X, FACE_NEG_X, FACE_POS_Z, FACE_NEG_Z,
    FACE_COUNT, FACE_NORMALS,
    LIGHT_DEFAULT, LIGHT_MAX,
};
pub use crate::error::MesherError;
pub use crate::vertex::{PackedVertex, VertexFields};
pub use crate::volume::VoxelVolume;

// Re-export main entry points
pub use crate::mesh::{mesh_volume, mesh_volume_with_stats, MeshOutput, MeshStats};
pub use crate::convert::dense_to_volume;
