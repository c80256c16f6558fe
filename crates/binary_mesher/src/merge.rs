//! Greedy merge of visible faces into rectangles.
//!
//! Each face direction is processed as a stack of planes, one per bit
//! position of its columns. Plane positions are swept `forward` (outer) then
//! `right` (inner), and all 64 planes advance together: every column word
//! carries one bit per plane, so a single AND finds every face that could
//! grow at once.
//!
//! A rectangle first grows forward, one row per sweep step. When a face
//! cannot grow forward any more it tries to grow right into the next column,
//! which is only legal when that column carries a forward run of the same
//! height. A face that can do neither closes its rectangle and emits it.
//!
//! Faces merge only when both voxels hold the same material and both faces
//! see the same 8-neighbor AO pattern, so every emitted quad has uniform AO
//! along its interior and exact AO at its corners.

use crate::ao::{can_merge, AoPattern, MergeStep};
use crate::bits::SetBits;
use crate::core::{face_axis, face_is_positive, MeshConfig};
use crate::cull::FaceMasks;
use crate::vertex::{emit_quad, PackedVertex, QuadBounds};
use crate::volume::VoxelVolume;

/// Run counters of the rectangle being grown at each cell.
///
/// `forward[right * CS_P + bit]` is how many rows the rectangle ending at
/// that cell has absorbed, `right[bit]` how many columns the rectangle
/// currently walking right has absorbed in this row.
#[derive(Clone, Debug)]
pub struct MergeRuns {
    cs_p: usize,
    forward: Vec<u8>,
    right: Vec<u8>,
}

impl MergeRuns {
    pub fn new(cs_p: usize) -> Self {
        Self {
            cs_p,
            forward: vec![0; cs_p * cs_p],
            right: vec![0; cs_p],
        }
    }

    #[inline]
    fn forward(&self, right: usize, bit: usize) -> u8 {
        self.forward[right * self.cs_p + bit]
    }

    #[inline]
    fn forward_mut(&mut self, right: usize, bit: usize) -> &mut u8 {
        &mut self.forward[right * self.cs_p + bit]
    }

    /// Start a new row. Rightward runs never span rows.
    #[inline]
    fn next_row(&mut self) {
        self.right.fill(0);
    }
}

/// Greedy merge one face direction and append its quads to `out`.
///
/// Returns the number of quads emitted.
pub fn greedy_merge_face(
    face: usize,
    volume: &VoxelVolume,
    masks: &FaceMasks,
    config: &MeshConfig,
    out: &mut Vec<PackedVertex>,
) -> usize {
    let cs_p = volume.padded_size();
    debug_assert_eq!(cs_p, masks.padded_size());
    let cs = cs_p - 2;
    let axis = face_axis(face);
    let positive = face_is_positive(face);

    let mut runs = MergeRuns::new(cs_p);
    let mut quads = 0usize;

    for forward in 1..cs_p - 1 {
        let mut bits_walking_right = 0u64;
        runs.next_row();

        for right in 1..cs_p - 1 {
            let bits_here = masks.get(face, right, forward);
            // The last interior row and column have no neighbor to merge into
            let bits_forward = if forward >= cs { 0 } else { masks.get(face, right, forward + 1) };
            let bits_right = if right >= cs { 0 } else { masks.get(face, right + 1, forward) };

            let mut bits_merging_forward = bits_here & bits_forward & !bits_walking_right;
            let bits_merging_right = bits_here & bits_right;

            for bit in SetBits::new(bits_merging_forward) {
                if is_shell(bit, cs_p) {
                    continue;
                }
                let layer = probe_layer(bit, positive);
                if can_merge(volume, axis, right, forward, bit, layer, MergeStep::Forward) {
                    *runs.forward_mut(right, bit) += 1;
                } else {
                    bits_merging_forward &= !(1u64 << bit);
                }
            }

            for bit in SetBits::new(bits_here & !bits_merging_forward) {
                if is_shell(bit, cs_p) {
                    continue;
                }
                let layer = probe_layer(bit, positive);

                if bits_merging_right & (1u64 << bit) != 0
                    && runs.forward(right, bit) == runs.forward(right + 1, bit)
                    && can_merge(volume, axis, right, forward, bit, layer, MergeStep::Right)
                {
                    bits_walking_right |= 1u64 << bit;
                    runs.right[bit] += 1;
                    *runs.forward_mut(right, bit) = 0;
                    continue;
                }
                bits_walking_right &= !(1u64 << bit);

                let bounds = QuadBounds {
                    left: right - runs.right[bit] as usize,
                    right: right + 1,
                    front: forward - runs.forward(right, bit) as usize,
                    back: forward + 1,
                    up: if positive { bit + 1 } else { bit },
                };
                let material = volume.axis_voxel(axis, right, forward, bit);
                let ao = AoPattern::sample(volume, axis, right, forward, layer).corners();

                *runs.forward_mut(right, bit) = 0;
                runs.right[bit] = 0;

                emit_quad(out, face, &bounds, material, config.light, &ao);
                quads += 1;
            }
        }
    }

    quads
}

/// Bits 0 and CS_P - 1 belong to shell voxels, which never own a face.
#[inline]
fn is_shell(bit: usize, cs_p: usize) -> bool {
    bit == 0 || bit == cs_p - 1
}

/// Layer one step along the face normal, where the AO probes are read.
#[inline]
fn probe_layer(bit: usize, positive: bool) -> usize {
    if positive {
        bit + 1
    } else {
        bit - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitplane::AxisColumns;
    use crate::core::{FACE_COUNT, FACE_NEG_Y, FACE_POS_X, FACE_POS_Y};
    use crate::cull::cull_faces;

    fn merge(volume: &VoxelVolume, face: usize) -> Vec<PackedVertex> {
        let masks = cull_faces(&AxisColumns::build(volume));
        let mut out = Vec::new();
        let quads = greedy_merge_face(face, volume, &masks, &MeshConfig::default(), &mut out);
        assert_eq!(out.len(), quads * 6);
        out
    }

    /// Min and max corner of a quad's 6 vertices.
    fn extent(quad: &[PackedVertex]) -> ([u32; 3], [u32; 3]) {
        let mut min = [u32::MAX; 3];
        let mut max = [0u32; 3];
        for v in quad {
            let p = v.position();
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        (min, max)
    }

    #[test]
    fn single_voxel_single_quad() {
        let mut volume = VoxelVolume::default();
        volume.set(32, 32, 32, 1);

        let out = merge(&volume, FACE_POS_Y);
        assert_eq!(out.len(), 6);
        assert_eq!(extent(&out), ([32, 33, 32], [33, 33, 33]));
    }

    #[test]
    fn negative_face_sits_on_lower_plane() {
        let mut volume = VoxelVolume::default();
        volume.set(32, 32, 32, 1);

        let out = merge(&volume, FACE_NEG_Y);
        assert_eq!(extent(&out), ([32, 32, 32], [33, 32, 33]));
    }

    #[test]
    fn slab_10x10_merges_to_one_quad() {
        let mut volume = VoxelVolume::default();
        for x in 20..30 {
            for z in 20..30 {
                volume.set(x, 20, z, 1);
            }
        }

        let out = merge(&volume, FACE_POS_Y);
        assert_eq!(out.len(), 6, "10x10 slab should merge to 1 quad");
        assert_eq!(extent(&out), ([20, 21, 20], [30, 21, 30]));
    }

    #[test]
    fn two_materials_two_quads() {
        let mut volume = VoxelVolume::default();
        volume.set(32, 32, 32, 1);
        volume.set(33, 32, 32, 2);

        let out = merge(&volume, FACE_POS_Y);
        assert_eq!(out.len(), 12);
        let materials: Vec<u8> = out.chunks_exact(6).map(|q| q[0].unpack().material).collect();
        assert!(materials.contains(&1) && materials.contains(&2));
    }

    #[test]
    fn row_merges_rightward() {
        let mut volume = VoxelVolume::default();
        // Along x, which is "right" for Y faces
        for x in 20..25 {
            volume.set(x, 32, 32, 1);
        }

        let out = merge(&volume, FACE_POS_Y);
        assert_eq!(out.len(), 6);
        assert_eq!(extent(&out), ([20, 33, 32], [25, 33, 33]));
    }

    #[test]
    fn column_merges_forward() {
        let mut volume = VoxelVolume::default();
        // Along z, which is "forward" for Y faces
        for z in 20..25 {
            volume.set(32, 32, z, 1);
        }

        let out = merge(&volume, FACE_POS_Y);
        assert_eq!(out.len(), 6);
        assert_eq!(extent(&out), ([32, 33, 20], [33, 33, 25]));
    }

    #[test]
    fn unequal_heights_do_not_merge_right() {
        let mut volume = VoxelVolume::default();
        // Two rows deep at x = 10, only the second row at x = 11
        volume.set(10, 5, 10, 1);
        volume.set(10, 5, 11, 1);
        volume.set(11, 5, 11, 1);

        let out = merge(&volume, FACE_POS_Y);
        let areas: Vec<u32> = out
            .chunks_exact(6)
            .map(|q| {
                let (min, max) = extent(q);
                (max[0] - min[0]) * (max[2] - min[2])
            })
            .collect();
        assert_eq!(areas.iter().sum::<u32>(), 3);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn shell_faces_are_never_emitted() {
        let mut volume = VoxelVolume::new(8).unwrap();
        // Solid shell layer below the chunk
        for x in 0..10 {
            for z in 0..10 {
                volume.set(x, 0, z, 1);
            }
        }

        for face in 0..FACE_COUNT {
            assert!(merge(&volume, face).is_empty(), "face {face} emitted a shell quad");
        }
    }

    #[test]
    fn shell_neighbor_occludes_boundary_face() {
        let mut volume = VoxelVolume::new(8).unwrap();
        volume.set(1, 1, 1, 1);

        // Without a neighbor chunk the corner voxel is fully open
        let out = merge(&volume, FACE_POS_Y);
        assert!(out.iter().all(|v| v.ao() == 3));

        // A shell voxel diagonally above darkens one corner
        volume.set(0, 2, 0, 1);
        let out = merge(&volume, FACE_POS_Y);
        assert_eq!(out.iter().filter(|v| v.ao() == 2).count(), 1);
    }

    #[test]
    fn light_is_passed_through() {
        let mut volume = VoxelVolume::new(4).unwrap();
        volume.set(2, 2, 2, 1);
        let masks = cull_faces(&AxisColumns::build(&volume));

        let mut out = Vec::new();
        greedy_merge_face(FACE_POS_X, &volume, &masks, &MeshConfig::with_light(6).unwrap(), &mut out);
        assert!(out.iter().all(|v| v.unpack().light == 6));
    }
}
