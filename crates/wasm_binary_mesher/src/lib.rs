//! WASM bindings for the binary mesher.
//!
//! Provides JavaScript-accessible functions for voxel meshing. Vertices are
//! returned as packed `u32` words, ready to be copied into a vertex buffer.

use binary_mesher::{
    dense_to_volume, mesh_volume, mesh_volume_with_stats, MeshConfig, MeshOutput, MesherError,
    VoxelVolume, FACE_COUNT,
};
use wasm_bindgen::prelude::*;

/// Mesh result returned to JavaScript.
#[wasm_bindgen]
pub struct MeshResult {
    vertices: Vec<u32>,
}

#[wasm_bindgen]
impl MeshResult {
    /// Get packed vertices (one `u32` per vertex, 6 per quad).
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<u32> {
        self.vertices.clone()
    }

    /// Get packed vertices as little-endian bytes.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices).to_vec()
    }

    /// Number of vertices in the mesh.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads in the mesh.
    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    /// Number of triangles in the mesh.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether the mesh is empty (no geometry).
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl From<MeshOutput> for MeshResult {
    fn from(output: MeshOutput) -> Self {
        Self {
            vertices: output.into_words(),
        }
    }
}

/// Mesh statistics for debugging.
#[wasm_bindgen]
pub struct MeshStats {
    visible_faces: usize,
    quad_count: usize,
    vertex_count: usize,
    merge_efficiency: f32,
    elapsed_ms: f64,
    quads_per_face: [usize; FACE_COUNT],
}

#[wasm_bindgen]
impl MeshStats {
    #[wasm_bindgen(getter)]
    pub fn visible_faces(&self) -> usize {
        self.visible_faces
    }

    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[wasm_bindgen(getter)]
    pub fn merge_efficiency(&self) -> f32 {
        self.merge_efficiency
    }

    #[wasm_bindgen(getter)]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Get per-direction quad counts as [+Y, -Y, +X, -X, +Z, -Z].
    #[wasm_bindgen(getter)]
    pub fn quads_per_face(&self) -> Vec<usize> {
        self.quads_per_face.to_vec()
    }
}

impl From<binary_mesher::MeshStats> for MeshStats {
    fn from(stats: binary_mesher::MeshStats) -> Self {
        Self {
            visible_faces: stats.visible_faces,
            quad_count: stats.quad_count,
            vertex_count: stats.vertex_count,
            merge_efficiency: stats.merge_efficiency,
            elapsed_ms: stats.elapsed_ms,
            quads_per_face: stats.quads_per_face,
        }
    }
}

fn to_js(err: MesherError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn padded_inputs(voxels: &[u8], cs: u32, light: u8) -> Result<(VoxelVolume, MeshConfig), MesherError> {
    let config = MeshConfig::with_light(light)?;
    let volume = VoxelVolume::from_voxels(cs as usize, voxels.to_vec())?;
    Ok((volume, config))
}

fn mesh_padded(voxels: &[u8], cs: u32, light: u8) -> Result<MeshOutput, MesherError> {
    let (volume, config) = padded_inputs(voxels, cs, light)?;
    Ok(mesh_volume(&volume, &config))
}

fn mesh_dense(voxels: &[u8], dims: [usize; 3], light: u8) -> Result<MeshOutput, MesherError> {
    let config = MeshConfig::with_light(light)?;
    let volume = dense_to_volume(voxels, dims)?;
    Ok(mesh_volume(&volume, &config))
}

/// Mesh a padded voxel volume.
///
/// # Arguments
/// * `voxels` - `(cs + 2)³` material IDs (0 = empty) in (y, x, z)-major
///   order, including the one-voxel shell of neighbor data
/// * `cs` - Interior edge length (1-62)
/// * `light` - Light level written to every vertex (0-15)
///
/// # Example (JavaScript)
/// ```javascript
/// const voxels = new Uint8Array(64 * 64 * 64);
/// voxels[32 + 32 * 64 + 32 * 64 * 64] = 1;
/// const result = mesh_padded_volume(voxels, 62, 15);
/// console.log(result.quad_count); // 6
/// ```
#[wasm_bindgen]
pub fn mesh_padded_volume(voxels: &[u8], cs: u32, light: u8) -> Result<MeshResult, JsValue> {
    mesh_padded(voxels, cs, light).map(MeshResult::from).map_err(to_js)
}

/// Mesh a dense voxel grid without a shell.
///
/// # Arguments
/// * `voxels` - Flat array of material IDs (0 = empty), X-major order
/// * `width`, `height`, `depth` - Grid dimensions (each at most 62)
/// * `light` - Light level written to every vertex (0-15)
#[wasm_bindgen]
pub fn mesh_dense_voxels(
    voxels: &[u8],
    width: u32,
    height: u32,
    depth: u32,
    light: u8,
) -> Result<MeshResult, JsValue> {
    let dims = [width as usize, height as usize, depth as usize];
    mesh_dense(voxels, dims, light).map(MeshResult::from).map_err(to_js)
}

/// Mesh a padded volume and return `[MeshResult, MeshStats]`.
#[wasm_bindgen]
pub fn mesh_padded_volume_with_stats(voxels: &[u8], cs: u32, light: u8) -> Result<js_sys::Array, JsValue> {
    let (volume, config) = padded_inputs(voxels, cs, light).map_err(to_js)?;
    let (output, stats) = mesh_volume_with_stats(&volume, &config);

    let mesh_result: MeshResult = output.into();
    let mesh_stats: MeshStats = stats.into();

    let result = js_sys::Array::new();
    result.push(&JsValue::from(mesh_result));
    result.push(&JsValue::from(mesh_stats));
    Ok(result)
}

// Logging support

thread_local! {
    static LOG_ENABLED: std::cell::Cell<bool> = std::cell::Cell::new(false);
}

/// Forwards mesher log records to the browser console while enabled.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        LOG_ENABLED.with(|enabled| enabled.get())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            web_sys::console::log_1(&message.into());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Enable or disable console logging.
#[wasm_bindgen]
pub fn set_log_enabled(enabled: bool) {
    // Fails only if a logger is already installed, which is fine
    let _ = log::set_logger(&LOGGER);
    LOG_ENABLED.with(|flag| flag.set(enabled));
    log::set_max_level(if enabled {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off
    });
}

/// Get the version of the mesher library.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_single_voxel(cs: usize) -> Vec<u8> {
        let cs_p = cs + 2;
        let mut voxels = vec![0u8; cs_p * cs_p * cs_p];
        let c = cs_p / 2;
        voxels[c + c * cs_p + c * cs_p * cs_p] = 1;
        voxels
    }

    #[test]
    fn padded_single_voxel_is_a_cube() {
        let output = mesh_padded(&padded_single_voxel(62), 62, 15).unwrap();
        let result = MeshResult::from(output);

        assert_eq!(result.vertex_count(), 36);
        assert_eq!(result.quad_count(), 6);
        assert_eq!(result.triangle_count(), 12);
        assert_eq!(result.bytes().len(), 36 * 4);
    }

    #[test]
    fn padded_rejects_bad_input() {
        assert_eq!(
            mesh_padded(&[0; 10], 2, 15).unwrap_err(),
            MesherError::VolumeLength { expected: 64, actual: 10 }
        );
        assert_eq!(
            mesh_padded(&padded_single_voxel(4), 4, 16).unwrap_err(),
            MesherError::LightOutOfRange(16)
        );
        assert_eq!(mesh_padded(&[], 63, 15).unwrap_err(), MesherError::InvalidChunkSize { cs: 63 });
    }

    #[test]
    fn dense_slab_merges() {
        let voxels = vec![2u8; 8 * 8];
        let output = mesh_dense(&voxels, [8, 1, 8], 9).unwrap();
        let result = MeshResult::from(output);

        assert_eq!(result.quad_count(), 6);
        // Light occupies bits 23-26
        assert!(result.vertices().iter().all(|v| (v >> 23) & 0xF == 9));
    }

    #[test]
    fn dense_empty_grid() {
        let output = mesh_dense(&[0; 27], [3, 3, 3], 15).unwrap();
        assert!(MeshResult::from(output).is_empty());
    }

    #[test]
    fn stats_conversion_keeps_counts() {
        let (volume, config) = padded_inputs(&padded_single_voxel(6), 6, 15).unwrap();
        let (_, stats) = mesh_volume_with_stats(&volume, &config);
        let stats = MeshStats::from(stats);

        assert_eq!(stats.visible_faces(), 6);
        assert_eq!(stats.quad_count(), 6);
        assert_eq!(stats.vertex_count(), 36);
        assert_eq!(stats.quads_per_face(), vec![1; 6]);
    }

    #[test]
    fn version_matches_manifest() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }
}
