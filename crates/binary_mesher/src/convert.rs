//! Input conversion to the padded volume format.
//!
//! Tools and importers usually produce tightly packed grids without a ghost
//! shell. These helpers place such a grid inside the interior of a fresh
//! [`VoxelVolume`], leaving the shell empty as if the chunk had no neighbors.

use crate::core::{MaterialId, CS, MATERIAL_EMPTY};
use crate::error::MesherError;
use crate::volume::VoxelVolume;

/// Convert a dense voxel array to a padded volume.
///
/// Input is material ID per voxel (0 = empty), stored in X-major order:
/// `voxels[x + y * width + z * width * height]`
///
/// The volume's interior size is the largest of the three dimensions, so a
/// non-cubic grid leaves empty interior space on its shorter axes.
///
/// # Arguments
/// * `voxels` - Material ID per voxel (0 = empty)
/// * `dims` - Dimensions [width, height, depth]
///
/// # Example
/// ```
/// use binary_mesher::dense_to_volume;
///
/// let mut voxels = vec![0u8; 4 * 4 * 4];
/// voxels[0] = 1; // Set voxel at (0, 0, 0)
///
/// let volume = dense_to_volume(&voxels, [4, 4, 4]).unwrap();
/// assert!(volume.is_solid(1, 1, 1)); // +1 offset for padding
/// assert_eq!(volume.cs(), 4);
/// ```
pub fn dense_to_volume(voxels: &[MaterialId], dims: [usize; 3]) -> Result<VoxelVolume, MesherError> {
    let [dx, dy, dz] = dims;
    let cs = dx.max(dy).max(dz);
    if dims.contains(&0) || cs > CS {
        return Err(MesherError::DenseDims { dims });
    }

    let expected = dx * dy * dz;
    if voxels.len() != expected {
        return Err(MesherError::VolumeLength {
            expected,
            actual: voxels.len(),
        });
    }

    let mut volume = VoxelVolume::new(cs)?;
    for z in 0..dz {
        for y in 0..dy {
            let row = &voxels[(y + z * dy) * dx..][..dx];
            for (x, &material) in row.iter().enumerate() {
                if material != MATERIAL_EMPTY {
                    // +1 offset for padding
                    volume.set(x + 1, y + 1, z + 1, material);
                }
            }
        }
    }

    Ok(volume)
}
