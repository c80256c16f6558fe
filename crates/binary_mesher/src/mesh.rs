//! Main meshing pipeline.
//!
//! Orchestrates the complete meshing process:
//! 1. Column projection (one bitset per column per axis)
//! 2. Face culling (determine visible faces)
//! 3. Greedy merge with AO-aware eligibility, packing vertices as quads close

use log::{debug, trace};
use web_time::Instant;

use crate::bitplane::AxisColumns;
use crate::core::{MeshConfig, FACE_COUNT};
use crate::cull::{count_visible_faces, cull_faces};
use crate::merge::greedy_merge_face;
use crate::vertex::PackedVertex;
use crate::volume::VoxelVolume;

/// Vertices per emitted quad (two triangles, not indexed).
pub const VERTICES_PER_QUAD: usize = 6;

/// Packed vertex stream ready for a GPU vertex buffer.
///
/// Quads are stored as 6 consecutive vertices. Order carries no spatial
/// meaning.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct MeshOutput {
    pub vertices: Vec<PackedVertex>,
}

impl MeshOutput {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    /// Check if the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over quads as 6-vertex slices.
    pub fn quads(&self) -> impl Iterator<Item = &[PackedVertex]> {
        self.vertices.chunks_exact(VERTICES_PER_QUAD)
    }

    /// Vertices as raw words.
    pub fn as_words(&self) -> &[u32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertices as bytes, for direct buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Consume the mesh and return the raw words.
    pub fn into_words(self) -> Vec<u32> {
        self.vertices.into_iter().map(|v| v.0).collect()
    }
}

/// Mesh a padded volume into packed vertices.
///
/// This is the main entry point. The call is self-contained: all scratch
/// storage is local and released on return, so independent volumes can be
/// meshed on different threads.
///
/// A volume without visible faces produces an empty mesh.
///
/// # Example
/// ```
/// use binary_mesher::{mesh_volume, MeshConfig, VoxelVolume};
///
/// let mut volume = VoxelVolume::new(8).unwrap();
/// volume.set(4, 4, 4, 1);
///
/// let mesh = mesh_volume(&volume, &MeshConfig::default());
/// assert_eq!(mesh.vertex_count(), 36);
/// ```
pub fn mesh_volume(volume: &VoxelVolume, config: &MeshConfig) -> MeshOutput {
    mesh_volume_with_stats(volume, config).0
}

/// Statistics about a mesh result.
#[derive(Debug, Clone, Default)]
pub struct MeshStats {
    /// Faces owned by interior voxels before merging
    pub visible_faces: usize,
    /// Total number of quads generated
    pub quad_count: usize,
    /// Quads per face direction
    pub quads_per_face: [usize; FACE_COUNT],
    /// Visible faces per face direction
    pub faces_per_face: [usize; FACE_COUNT],
    /// Total vertices
    pub vertex_count: usize,
    /// Merge efficiency (1.0 = perfect merging, 0.0 = no merging)
    pub merge_efficiency: f32,
    /// Wall time spent meshing (milliseconds)
    pub elapsed_ms: f64,
}

/// Mesh a volume and return statistics along with the mesh.
pub fn mesh_volume_with_stats(volume: &VoxelVolume, config: &MeshConfig) -> (MeshOutput, MeshStats) {
    let start = Instant::now();

    // Early exit for empty volumes
    if volume.is_empty() {
        trace!("mesh: empty volume, nothing to do");
        return (MeshOutput::default(), MeshStats::default());
    }

    let columns = AxisColumns::build(volume);
    let masks = cull_faces(&columns);
    let faces_per_face = count_visible_faces(&masks);
    let visible_faces: usize = faces_per_face.iter().sum();

    let mut vertices = Vec::with_capacity(visible_faces * VERTICES_PER_QUAD / 4);
    let mut quads_per_face = [0usize; FACE_COUNT];
    for (face, quads) in quads_per_face.iter_mut().enumerate() {
        *quads = greedy_merge_face(face, volume, &masks, config, &mut vertices);
        trace!("mesh: face {face}: {} faces -> {quads} quads", faces_per_face[face]);
    }

    let quad_count: usize = quads_per_face.iter().sum();
    let merge_efficiency = if visible_faces > 0 {
        1.0 - (quad_count as f32 / visible_faces as f32)
    } else {
        0.0
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    debug!(
        "mesh: cs={} faces={visible_faces} quads={quad_count} vertices={} in {elapsed_ms:.3}ms",
        volume.cs(),
        vertices.len()
    );

    let stats = MeshStats {
        visible_faces,
        quad_count,
        quads_per_face,
        faces_per_face,
        vertex_count: vertices.len(),
        merge_efficiency,
        elapsed_ms,
    };

    (MeshOutput { vertices }, stats)
}
