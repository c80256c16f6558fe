//! Per-corner ambient occlusion.
//!
//! A face is shaded by the 8 voxels surrounding it in the layer one step
//! along its normal: 4 edge neighbors and 4 corner neighbors. Each quad
//! corner combines two edge samples and the corner sample between them.
//!
//! ```text
//!          forward - 1        forward + 1
//!   right - 1  [LF]    [L]    [LB]
//!   right      [F]   (face)   [B]
//!   right + 1  [RF]    [R]    [RB]
//! ```

use crate::volume::VoxelVolume;

/// Probe offsets `(right, forward)` in pattern bit order.
pub const AO_DIRS: [(isize, isize); 8] = [
    (0, -1),  // F
    (0, 1),   // B
    (-1, 0),  // L
    (1, 0),   // R
    (-1, -1), // LF
    (-1, 1),  // LB
    (1, -1),  // RF
    (1, 1),   // RB
];

const F: u8 = 1 << 0;
const B: u8 = 1 << 1;
const L: u8 = 1 << 2;
const R: u8 = 1 << 3;
const LF: u8 = 1 << 4;
const LB: u8 = 1 << 5;
const RF: u8 = 1 << 6;
const RB: u8 = 1 << 7;

/// Solidity of the 8 in-plane neighbors of a face, one bit per [`AO_DIRS`] entry.
///
/// Two faces with equal patterns have equal AO at every corner, which is
/// what makes them mergeable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AoPattern(pub u8);

impl AoPattern {
    /// Sample the neighbors of plane position (right, forward) in layer `layer`.
    ///
    /// The position must be at least one voxel away from the plane edges.
    #[inline]
    pub fn sample(volume: &VoxelVolume, axis: usize, right: usize, forward: usize, layer: usize) -> Self {
        let mut pattern = 0u8;
        for (i, &(dr, df)) in AO_DIRS.iter().enumerate() {
            let r = right.wrapping_add_signed(dr);
            let f = forward.wrapping_add_signed(df);
            if volume.axis_solid(axis, r, f, layer) {
                pattern |= 1 << i;
            }
        }
        Self(pattern)
    }

    #[inline]
    fn has(self, dir: u8) -> u8 {
        u8::from(self.0 & dir != 0)
    }

    /// AO level of each quad corner.
    pub fn corners(self) -> CornerAo {
        CornerAo {
            left_front: vertex_ao(self.has(L), self.has(F), self.has(LF)),
            left_back: vertex_ao(self.has(L), self.has(B), self.has(LB)),
            right_back: vertex_ao(self.has(R), self.has(B), self.has(RB)),
            right_front: vertex_ao(self.has(R), self.has(F), self.has(RF)),
        }
    }
}

/// AO level of one corner from its two edge samples and its corner sample.
///
/// 3 = unoccluded, 0 = fully occluded. Two solid edges fully occlude the
/// corner whatever the corner sample says.
#[inline]
pub fn vertex_ao(side1: u8, side2: u8, corner: u8) -> u8 {
    if side1 != 0 && side2 != 0 {
        return 0;
    }
    3 - (side1 + side2 + corner)
}

/// AO levels of the four corners of a face or merged quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerAo {
    pub left_front: u8,
    pub left_back: u8,
    pub right_back: u8,
    pub right_front: u8,
}

impl CornerAo {
    /// Whether the quad should be split along the left-back/right-front
    /// diagonal instead of the default left-front/right-back one, so the
    /// shared edge runs along the brighter diagonal.
    #[inline]
    pub fn needs_flip(&self) -> bool {
        self.left_back + self.right_front > self.right_back + self.left_front
    }
}

/// Direction a run is being extended in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeStep {
    /// One step toward `forward + 1`.
    Forward,
    /// One step toward `right + 1`.
    Right,
}

impl MergeStep {
    #[inline]
    fn offset(self) -> (usize, usize) {
        match self {
            MergeStep::Forward => (0, 1),
            MergeStep::Right => (1, 0),
        }
    }
}

/// Whether the face at (right, forward, up) can merge with its neighbor one
/// `step` away: both voxels must hold the same material and both faces must
/// see the same AO pattern in `layer`.
#[inline]
pub fn can_merge(
    volume: &VoxelVolume,
    axis: usize,
    right: usize,
    forward: usize,
    up: usize,
    layer: usize,
    step: MergeStep,
) -> bool {
    let (dr, df) = step.offset();
    let (next_right, next_forward) = (right + dr, forward + df);

    volume.axis_voxel(axis, right, forward, up) == volume.axis_voxel(axis, next_right, next_forward, up)
        && AoPattern::sample(volume, axis, right, forward, layer)
            == AoPattern::sample(volume, axis, next_right, next_forward, layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_ao_levels() {
        assert_eq!(vertex_ao(0, 0, 0), 3);
        assert_eq!(vertex_ao(1, 0, 0), 2);
        assert_eq!(vertex_ao(0, 0, 1), 2);
        assert_eq!(vertex_ao(1, 0, 1), 1);
        assert_eq!(vertex_ao(1, 1, 0), 0);
        assert_eq!(vertex_ao(1, 1, 1), 0);
    }

    #[test]
    fn open_face_is_unoccluded() {
        let mut volume = VoxelVolume::new(8).unwrap();
        volume.set(4, 4, 4, 1);

        // +Y face of (4, 4, 4): axis 0, probe layer y = 5
        let pattern = AoPattern::sample(&volume, 0, 4, 4, 5);
        assert_eq!(pattern, AoPattern(0));
        assert_eq!(
            pattern.corners(),
            CornerAo { left_front: 3, left_back: 3, right_back: 3, right_front: 3 }
        );
    }

    #[test]
    fn edge_neighbor_darkens_two_corners() {
        let mut volume = VoxelVolume::new(8).unwrap();
        volume.set(4, 4, 4, 1);
        // Above and one step toward -x (the "left" side on axis 0)
        volume.set(3, 5, 4, 1);

        let corners = AoPattern::sample(&volume, 0, 4, 4, 5).corners();
        assert_eq!(corners.left_front, 2);
        assert_eq!(corners.left_back, 2);
        assert_eq!(corners.right_back, 3);
        assert_eq!(corners.right_front, 3);
    }

    #[test]
    fn corner_neighbor_darkens_one_corner() {
        let mut volume = VoxelVolume::new(8).unwrap();
        volume.set(4, 4, 4, 1);
        // Above, +x and +z: right-back on axis 0
        volume.set(5, 5, 5, 1);

        let pattern = AoPattern::sample(&volume, 0, 4, 4, 5);
        assert_eq!(pattern, AoPattern(RB));
        let corners = pattern.corners();
        assert_eq!(corners.right_back, 2);
        assert_eq!(corners.left_front, 3);
        assert!(corners.needs_flip());
    }

    #[test]
    fn flip_follows_darker_diagonal() {
        let corners = CornerAo { left_front: 2, left_back: 3, right_back: 3, right_front: 3 };
        assert!(corners.needs_flip());

        let corners = CornerAo { left_front: 3, left_back: 2, right_back: 3, right_front: 3 };
        assert!(!corners.needs_flip());
    }

    #[test]
    fn merge_requires_same_material() {
        let mut volume = VoxelVolume::new(8).unwrap();
        volume.set(4, 4, 4, 1);
        volume.set(5, 4, 4, 2);
        volume.set(4, 4, 5, 1);

        assert!(!can_merge(&volume, 0, 4, 4, 4, 5, MergeStep::Right));
        assert!(can_merge(&volume, 0, 4, 4, 4, 5, MergeStep::Forward));
    }

    #[test]
    fn merge_requires_same_pattern() {
        let mut volume = VoxelVolume::new(8).unwrap();
        volume.set(4, 4, 4, 1);
        volume.set(5, 4, 4, 1);
        assert!(can_merge(&volume, 0, 4, 4, 4, 5, MergeStep::Right));

        // Only seen by the right-hand face
        volume.set(6, 5, 4, 1);
        assert!(!can_merge(&volume, 0, 4, 4, 4, 5, MergeStep::Right));
    }
}
