//! Packed vertex encoding and quad emission.
//!
//! Every vertex is a single `u32`, ready to be uploaded as-is:
//!
//! | bits  | field                                   |
//! |-------|-----------------------------------------|
//! | 0-5   | x - 1                                   |
//! | 6-11  | y - 1                                   |
//! | 12-17 | z - 1                                   |
//! | 18-22 | material (low 5 bits)                   |
//! | 23-26 | light                                   |
//! | 27-29 | face id                                 |
//! | 30-31 | ambient occlusion (0 = dark, 3 = open)  |
//!
//! Coordinates are padded-volume corner positions in `[1, CS_P - 1]`,
//! stored with the shell offset removed so they fit 6 bits.

use bytemuck::{Pod, Zeroable};

use crate::ao::CornerAo;
use crate::core::{axis_to_xyz, face_axis, MaterialId, FACE_COUNT};

/// One packed vertex.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PackedVertex(pub u32);

/// Unpacked vertex fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexFields {
    /// Corner x in padded coordinates (1-64).
    pub x: u32,
    /// Corner y in padded coordinates (1-64).
    pub y: u32,
    /// Corner z in padded coordinates (1-64).
    pub z: u32,
    /// Material id (0-31).
    pub material: MaterialId,
    /// Light level (0-15).
    pub light: u8,
    /// Face id (0-5).
    pub face: u8,
    /// Ambient occlusion level (0-3).
    pub ao: u8,
}

impl PackedVertex {
    /// Pack vertex fields. Out-of-range fields are truncated to their bit width.
    #[inline]
    pub fn pack(fields: VertexFields) -> Self {
        debug_assert!(
            (1..=64).contains(&fields.x) && (1..=64).contains(&fields.y) && (1..=64).contains(&fields.z),
            "Vertex coordinates out of range"
        );
        debug_assert!(fields.light <= 0xF && fields.face <= 7 && fields.ao <= 3);

        let word = ((fields.ao as u32 & 0x3) << 30)
            | ((fields.face as u32 & 0x7) << 27)
            | ((fields.light as u32 & 0xF) << 23)
            | ((fields.material as u32 & 0x1F) << 18)
            | ((fields.z.wrapping_sub(1) & 0x3F) << 12)
            | ((fields.y.wrapping_sub(1) & 0x3F) << 6)
            | (fields.x.wrapping_sub(1) & 0x3F);
        Self(word)
    }

    /// Unpack all fields.
    #[inline]
    pub fn unpack(self) -> VertexFields {
        let w = self.0;
        VertexFields {
            x: (w & 0x3F) + 1,
            y: ((w >> 6) & 0x3F) + 1,
            z: ((w >> 12) & 0x3F) + 1,
            material: ((w >> 18) & 0x1F) as MaterialId,
            light: ((w >> 23) & 0xF) as u8,
            face: ((w >> 27) & 0x7) as u8,
            ao: ((w >> 30) & 0x3) as u8,
        }
    }

    /// Corner position in padded coordinates.
    #[inline]
    pub fn position(self) -> [u32; 3] {
        let f = self.unpack();
        [f.x, f.y, f.z]
    }

    #[inline]
    pub fn face(self) -> usize {
        ((self.0 >> 27) & 0x7) as usize
    }

    #[inline]
    pub fn ao(self) -> u8 {
        ((self.0 >> 30) & 0x3) as u8
    }
}

/// A corner of a quad in plane terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    LeftFront,
    LeftBack,
    RightBack,
    RightFront,
}

/// Corner order per face id.
///
/// Opposite faces walk the corners in reverse so that both keep an outward
/// winding under back-face culling. The plane-to-volume axis mapping is
/// shared by the two faces of an axis (see [`axis_to_xyz`]).
pub const FACE_CORNERS: [[Corner; 4]; FACE_COUNT] = {
    use Corner::*;
    const POSITIVE: [Corner; 4] = [LeftFront, LeftBack, RightBack, RightFront];
    const NEGATIVE: [Corner; 4] = [LeftBack, LeftFront, RightFront, RightBack];
    [POSITIVE, NEGATIVE, POSITIVE, NEGATIVE, POSITIVE, NEGATIVE]
};

/// Extent of a merged quad in plane coordinates of its axis.
///
/// `left..right` and `front..back` are half-open ranges of padded
/// coordinates, `up` is the plane the quad lies in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadBounds {
    pub left: usize,
    pub right: usize,
    pub front: usize,
    pub back: usize,
    pub up: usize,
}

impl QuadBounds {
    #[inline]
    fn corner(&self, corner: Corner, ao: &CornerAo) -> (usize, usize, u8) {
        match corner {
            Corner::LeftFront => (self.left, self.front, ao.left_front),
            Corner::LeftBack => (self.left, self.back, ao.left_back),
            Corner::RightBack => (self.right, self.back, ao.right_back),
            Corner::RightFront => (self.right, self.front, ao.right_front),
        }
    }

    /// Number of unit faces covered.
    #[inline]
    pub fn area(&self) -> usize {
        (self.right - self.left) * (self.back - self.front)
    }
}

/// Append one quad as two triangles (6 vertices).
///
/// The quad is split along whichever diagonal keeps AO interpolation free of
/// visible seams (see [`CornerAo::needs_flip`]).
pub fn emit_quad(
    out: &mut Vec<PackedVertex>,
    face: usize,
    bounds: &QuadBounds,
    material: MaterialId,
    light: u8,
    ao: &CornerAo,
) {
    let axis = face_axis(face);
    let [v1, v2, v3, v4] = FACE_CORNERS[face].map(|corner| {
        let (right, forward, ao) = bounds.corner(corner, ao);
        let (x, y, z) = axis_to_xyz(axis, right, forward, bounds.up);
        PackedVertex::pack(VertexFields {
            x: x as u32,
            y: y as u32,
            z: z as u32,
            material,
            light,
            face: face as u8,
            ao,
        })
    });

    if ao.needs_flip() {
        out.extend_from_slice(&[v1, v2, v4, v4, v2, v3]);
    } else {
        out.extend_from_slice(&[v1, v2, v3, v3, v4, v1]);
    }
}
