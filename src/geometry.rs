//! Static cube mesh shared by every lighting model.
//!
//! Faces do not share vertices so each corner carries the flat normal of its
//! face. Triangles wind counter-clockwise when seen from outside the cube.

use glam::Vec3;

pub const VERTEX_COUNT: usize = 24;
pub const INDEX_COUNT: usize = 36;

/// One cube face: its outward normal and the slice of the index buffer that
/// draws it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub name: &'static str,
    pub normal: [f32; 3],
    pub first_vertex: u16,
}

impl Face {
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// The six indices of this face's two triangles.
    pub fn indices(&self) -> &'static [u16] {
        let start = self.first_vertex as usize / 4 * 6;
        &CUBE_INDICES[start..start + 6]
    }
}

pub const FACES: [Face; 6] = [
    Face {
        name: "front",
        normal: [0.0, 0.0, 1.0],
        first_vertex: 0,
    },
    Face {
        name: "back",
        normal: [0.0, 0.0, -1.0],
        first_vertex: 4,
    },
    Face {
        name: "top",
        normal: [0.0, 1.0, 0.0],
        first_vertex: 8,
    },
    Face {
        name: "bottom",
        normal: [0.0, -1.0, 0.0],
        first_vertex: 12,
    },
    Face {
        name: "right",
        normal: [1.0, 0.0, 0.0],
        first_vertex: 16,
    },
    Face {
        name: "left",
        normal: [-1.0, 0.0, 0.0],
        first_vertex: 20,
    },
];

#[rustfmt::skip]
pub const CUBE_POSITIONS: [[f32; 3]; VERTEX_COUNT] = [
    // front
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    // back
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
    // top
    [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    // bottom
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    // right
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    // left
    [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0],
];

#[rustfmt::skip]
pub const CUBE_NORMALS: [[f32; 3]; VERTEX_COUNT] = [
    [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u16; INDEX_COUNT] = [
    0, 1, 2, 0, 2, 3, // front
    4, 6, 5, 4, 7, 6, // back
    8, 10, 9, 8, 11, 10, // top
    12, 13, 14, 12, 14, 15, // bottom
    16, 17, 18, 16, 18, 19, // right
    20, 22, 21, 20, 23, 22, // left
];

pub fn position(index: u16) -> Vec3 {
    Vec3::from_array(CUBE_POSITIONS[index as usize])
}

pub fn normal(index: u16) -> Vec3 {
    Vec3::from_array(CUBE_NORMALS[index as usize])
}
