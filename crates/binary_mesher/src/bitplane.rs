//! Column bitsets along each axis.
//!
//! Projects the volume into three sets of 64-bit columns, one bit per voxel.
//! The same solidity fact is stored three times, once per axis, so that
//! neighbour tests along any axis become shifts within a single word.

use crate::volume::VoxelVolume;

/// Solidity columns for all three axes.
///
/// `cols[axis * CS_P² + forward * CS_P + right]` holds bit `up` set iff the
/// voxel at `axis_to_xyz(axis, right, forward, up)` is solid.
#[derive(Clone, Debug)]
pub struct AxisColumns {
    cs_p: usize,
    cols: Vec<u64>,
}

impl AxisColumns {
    /// Build the columns in one pass over the volume.
    ///
    /// - axis 0: bit y of column (right = x, forward = z)
    /// - axis 1: bit x of column (right = z, forward = y)
    /// - axis 2: bit z of column (right = y, forward = x)
    pub fn build(volume: &VoxelVolume) -> Self {
        let cs_p = volume.padded_size();
        let cs_p2 = cs_p * cs_p;
        let mut cols = vec![0u64; 3 * cs_p2];

        // Walk in memory order (y, x, z) so the volume is read linearly
        let mut voxels = volume.as_slice().iter();
        for y in 0..cs_p {
            for x in 0..cs_p {
                let mut z_bits = 0u64;
                for z in 0..cs_p {
                    let solid = voxels.next().is_some_and(|&v| v != 0);
                    if solid {
                        cols[x + z * cs_p] |= 1u64 << y;
                        cols[cs_p2 + z + y * cs_p] |= 1u64 << x;
                        z_bits |= 1u64 << z;
                    }
                }
                cols[2 * cs_p2 + y + x * cs_p] = z_bits;
            }
        }

        Self { cs_p, cols }
    }

    /// Padded edge length the columns were built for.
    #[inline]
    pub fn padded_size(&self) -> usize {
        self.cs_p
    }

    /// Column word for an axis at plane position (right, forward).
    #[inline]
    pub fn get(&self, axis: usize, right: usize, forward: usize) -> u64 {
        self.cols[axis * self.cs_p * self.cs_p + forward * self.cs_p + right]
    }

    /// All columns of one axis, indexed `forward * CS_P + right`.
    #[inline]
    pub fn axis(&self, axis: usize) -> &[u64] {
        let cs_p2 = self.cs_p * self.cs_p;
        &self.cols[axis * cs_p2..(axis + 1) * cs_p2]
    }
}
