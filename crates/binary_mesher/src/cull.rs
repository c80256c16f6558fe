//! Bitwise face culling.
//!
//! A face is visible if the voxel is solid AND the neighbor in that direction
//! is empty. Neighbors along a column are one shift away, so every column is
//! culled in two bitwise operations per face direction.

use crate::bitplane::AxisColumns;
use crate::core::FACE_COUNT;

/// Face masks for all 6 directions after culling.
///
/// `masks[face * CS_P² + forward * CS_P + right]` has bit `up` set where the
/// voxel is solid and its neighbor on the face side is empty.
#[derive(Clone, Debug)]
pub struct FaceMasks {
    cs_p: usize,
    masks: Vec<u64>,
}

impl FaceMasks {
    /// Create empty face masks for a padded edge length.
    pub fn new(cs_p: usize) -> Self {
        Self {
            cs_p,
            masks: vec![0u64; FACE_COUNT * cs_p * cs_p],
        }
    }

    /// Padded edge length.
    #[inline]
    pub fn padded_size(&self) -> usize {
        self.cs_p
    }

    /// Get the face mask for a column.
    #[inline]
    pub fn get(&self, face: usize, right: usize, forward: usize) -> u64 {
        self.masks[face * self.cs_p * self.cs_p + forward * self.cs_p + right]
    }

    /// Set the face mask for a column.
    #[inline]
    pub fn set(&mut self, face: usize, right: usize, forward: usize, mask: u64) {
        let idx = face * self.cs_p * self.cs_p + forward * self.cs_p + right;
        self.masks[idx] = mask;
    }

    /// Count every set face bit, shell columns included.
    pub fn total_faces(&self) -> usize {
        self.masks.iter().map(|m| m.count_ones() as usize).sum()
    }

    /// Bits of a column that belong to interior voxels.
    #[inline]
    pub fn interior_bits(&self) -> u64 {
        ((1u64 << (self.cs_p - 1)) - 1) & !1
    }

    /// Count faces owned by interior voxels, i.e. faces the mesher emits.
    pub fn interior_faces(&self) -> usize {
        count_visible_faces(self).iter().sum()
    }
}

/// Derive the face masks of every axis from its columns.
///
/// - positive face: `col & !(col >> 1)` with the top bit forced out, since the
///   last voxel of a column has no neighbor to compare against
/// - negative face: `col & !(col << 1)` with bit 0 forced out
pub fn cull_faces(columns: &AxisColumns) -> FaceMasks {
    let cs_p = columns.padded_size();
    let top_bit = 1u64 << (cs_p - 1);
    let mut masks = FaceMasks::new(cs_p);

    for axis in 0..3 {
        for (i, &col) in columns.axis(axis).iter().enumerate() {
            if col == 0 {
                continue;
            }
            let (right, forward) = (i % cs_p, i / cs_p);
            masks.set(axis * 2, right, forward, col & !((col >> 1) | top_bit));
            masks.set(axis * 2 + 1, right, forward, col & !((col << 1) | 1));
        }
    }

    masks
}

/// Count visible faces owned by interior voxels, per face direction.
/// Useful for statistics and debugging.
pub fn count_visible_faces(masks: &FaceMasks) -> [usize; FACE_COUNT] {
    let cs_p = masks.padded_size();
    let interior = masks.interior_bits();
    let mut counts = [0usize; FACE_COUNT];
    for (face, count) in counts.iter_mut().enumerate() {
        for forward in 1..cs_p - 1 {
            for right in 1..cs_p - 1 {
                *count += (masks.get(face, right, forward) & interior).count_ones() as usize;
            }
        }
    }
    counts
}
