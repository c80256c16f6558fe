//! Padded voxel volume.
//!
//! The volume is the only input to the mesher. It holds one material byte
//! per voxel, including a one-voxel ghost shell carrying the solidity of
//! neighbouring chunks. The shell is read for culling and ambient occlusion
//! but never owns an emitted face.

use crate::core::{axis_to_xyz, MaterialId, CS, MATERIAL_EMPTY, MAX_PADDED_SIZE};
use crate::error::MesherError;

/// Cubic grid of `CS_P³` material bytes, `CS_P = CS + 2`.
///
/// Memory layout is (y, x, z)-major:
/// `voxels[z + x * CS_P + y * CS_P * CS_P]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelVolume {
    cs_p: usize,
    voxels: Vec<MaterialId>,
}

impl VoxelVolume {
    /// Create an empty volume with interior edge length `cs`.
    pub fn new(cs: usize) -> Result<Self, MesherError> {
        let cs_p = padded_size(cs)?;
        Ok(Self {
            cs_p,
            voxels: vec![MATERIAL_EMPTY; cs_p * cs_p * cs_p],
        })
    }

    /// Wrap an existing buffer of `(cs + 2)³` bytes.
    pub fn from_voxels(cs: usize, voxels: Vec<MaterialId>) -> Result<Self, MesherError> {
        let cs_p = padded_size(cs)?;
        let expected = cs_p * cs_p * cs_p;
        if voxels.len() != expected {
            return Err(MesherError::VolumeLength {
                expected,
                actual: voxels.len(),
            });
        }
        Ok(Self { cs_p, voxels })
    }

    /// Interior edge length.
    #[inline]
    pub fn cs(&self) -> usize {
        self.cs_p - 2
    }

    /// Edge length including the ghost shell.
    #[inline]
    pub fn padded_size(&self) -> usize {
        self.cs_p
    }

    /// Flat index of a padded coordinate.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < self.cs_p && y < self.cs_p && z < self.cs_p,
            "Coordinates out of bounds"
        );
        z + x * self.cs_p + y * self.cs_p * self.cs_p
    }

    /// Material at a padded coordinate.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> MaterialId {
        self.voxels[self.index(x, y, z)]
    }

    /// Set the material at a padded coordinate. Shell voxels may be set to
    /// describe neighbouring chunks.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, material: MaterialId) {
        let idx = self.index(x, y, z);
        self.voxels[idx] = material;
    }

    /// Clear a voxel (make it empty).
    #[inline]
    pub fn clear(&mut self, x: usize, y: usize, z: usize) {
        self.set(x, y, z, MATERIAL_EMPTY);
    }

    /// Check if a voxel is solid.
    #[inline]
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.get(x, y, z) != MATERIAL_EMPTY
    }

    /// Material addressed in the plane coordinates of a column axis.
    #[inline]
    pub fn axis_voxel(&self, axis: usize, right: usize, forward: usize, up: usize) -> MaterialId {
        let (x, y, z) = axis_to_xyz(axis, right, forward, up);
        self.get(x, y, z)
    }

    /// Solidity addressed in the plane coordinates of a column axis.
    #[inline]
    pub fn axis_solid(&self, axis: usize, right: usize, forward: usize, up: usize) -> bool {
        self.axis_voxel(axis, right, forward, up) != MATERIAL_EMPTY
    }

    /// Count solid voxels, shell included.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v != MATERIAL_EMPTY).count()
    }

    /// Check if the volume holds no solid voxel at all.
    pub fn is_empty(&self) -> bool {
        self.voxels.iter().all(|&v| v == MATERIAL_EMPTY)
    }

    /// Raw voxel bytes in (y, x, z)-major order.
    pub fn as_slice(&self) -> &[MaterialId] {
        &self.voxels
    }

    /// Consume the volume and return its buffer.
    pub fn into_voxels(self) -> Vec<MaterialId> {
        self.voxels
    }
}

impl Default for VoxelVolume {
    /// Empty 62³ chunk.
    fn default() -> Self {
        let cs_p = CS + 2;
        Self {
            cs_p,
            voxels: vec![MATERIAL_EMPTY; cs_p * cs_p * cs_p],
        }
    }
}

fn padded_size(cs: usize) -> Result<usize, MesherError> {
    if cs == 0 || cs + 2 > MAX_PADDED_SIZE {
        return Err(MesherError::InvalidChunkSize { cs });
    }
    Ok(cs + 2)
}
