//! Core type definitions for the binary mesher.

use crate::error::MesherError;

/// Material identifier. One byte per voxel in the input volume.
pub type MaterialId = u8;

/// Reserved material value for empty voxels.
pub const MATERIAL_EMPTY: MaterialId = 0;

/// Largest supported padded edge length.
/// Each column is a single `u64`, one bit per voxel.
pub const MAX_PADDED_SIZE: usize = 64;

/// Default chunk size with 1-voxel padding (64).
pub const CS_P: usize = 64;
/// Default usable chunk size (62).
pub const CS: usize = CS_P - 2;
/// Slice size of the default chunk (CS_P × CS_P = 4096).
pub const CS_P2: usize = CS_P * CS_P;
/// Total voxels of the default chunk (CS_P³ = 262144).
pub const CS_P3: usize = CS_P * CS_P * CS_P;

/// Face direction indices.
///
/// `face / 2` is the column axis, even faces point toward increasing
/// coordinates along that axis.
pub const FACE_POS_Y: usize = 0;
pub const FACE_NEG_Y: usize = 1;
pub const FACE_POS_X: usize = 2;
pub const FACE_NEG_X: usize = 3;
pub const FACE_POS_Z: usize = 4;
pub const FACE_NEG_Z: usize = 5;

/// Number of face directions.
pub const FACE_COUNT: usize = 6;

/// Integer normals for each face id, for consumers decoding the packed face field.
pub const FACE_NORMALS: [[i8; 3]; FACE_COUNT] = [
    [0, 1, 0],  // +Y
    [0, -1, 0], // -Y
    [1, 0, 0],  // +X
    [-1, 0, 0], // -X
    [0, 0, 1],  // +Z
    [0, 0, -1], // -Z
];

/// Light value written when no lighting is supplied (fully lit).
pub const LIGHT_DEFAULT: u8 = 15;
/// Largest light value that fits the 4-bit light field.
pub const LIGHT_MAX: u8 = 0xF;

/// Column axis of a face (0 = Y columns, 1 = X columns, 2 = Z columns).
#[inline]
pub const fn face_axis(face: usize) -> usize {
    face / 2
}

/// Whether a face points toward increasing coordinates.
#[inline]
pub const fn face_is_positive(face: usize) -> bool {
    face % 2 == 0
}

/// Map plane coordinates of an axis back to volume `(x, y, z)`.
///
/// `up` is the position along the column (the bit index), `right` and
/// `forward` index the column itself.
///
/// | axis | x       | y       | z       |
/// |------|---------|---------|---------|
/// | 0    | right   | up      | forward |
/// | 1    | up      | forward | right   |
/// | 2    | forward | right   | up      |
#[inline]
pub const fn axis_to_xyz(axis: usize, right: usize, forward: usize, up: usize) -> (usize, usize, usize) {
    match axis {
        0 => (right, up, forward),
        1 => (up, forward, right),
        _ => (forward, right, up),
    }
}

/// Meshing configuration.
///
/// Light is not computed by the mesher. The value is written unchanged into
/// every vertex so a lighting pass upstream can supply it per chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshConfig {
    /// Light level written to every vertex (0-15).
    pub light: u8,
}

impl MeshConfig {
    /// Create a config with an explicit light level.
    pub fn with_light(light: u8) -> Result<Self, MesherError> {
        if light > LIGHT_MAX {
            return Err(MesherError::LightOutOfRange(light));
        }
        Ok(Self { light })
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { light: LIGHT_DEFAULT }
    }
}
