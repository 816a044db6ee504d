//! Procedural mesh tables for the demo
//!
//! Two hand-authored meshes: a unit cube with flat-shaded faces and a unit
//! icosahedron with smooth normals. Both are plain [`MeshDefinition`]s; the
//! mesh registry turns them into shared resources.

use field_engine::mesh::{MeshDefinition, Vertex};

/// Material both meshes are drawn with
pub const OBJECT_MATERIAL: &str = "ObjectMaterial";

/// Registry name of the cube mesh
pub const CUBE_MESH: &str = "Cube";

/// Registry name of the icosahedron mesh
pub const ICOSAHEDRON_MESH: &str = "Icosahedron";

/// Icosahedron vertex constant
pub const ICO_X: f32 = 0.525_731_1;

/// Icosahedron vertex constant
pub const ICO_Z: f32 = 0.850_650_8;

const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

const CUBE_CORNER_COLORS: [[f32; 3]; 8] = [
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Corners of each face, counter-clockwise seen from outside, with the face normal
const CUBE_FACES: [([usize; 4], [f32; 3]); 6] = [
    ([0, 1, 2, 3], [0.0, 0.0, 1.0]),
    ([1, 5, 6, 2], [1.0, 0.0, 0.0]),
    ([5, 4, 7, 6], [0.0, 0.0, -1.0]),
    ([4, 0, 3, 7], [-1.0, 0.0, 0.0]),
    ([3, 2, 6, 7], [0.0, 1.0, 0.0]),
    ([1, 0, 4, 5], [0.0, -1.0, 0.0]),
];

const FACE_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

const ICO_VERTICES: [[f32; 3]; 12] = [
    [-ICO_X, 0.0, ICO_Z],
    [ICO_X, 0.0, ICO_Z],
    [-ICO_X, 0.0, -ICO_Z],
    [ICO_X, 0.0, -ICO_Z],
    [0.0, ICO_Z, ICO_X],
    [0.0, ICO_Z, -ICO_X],
    [0.0, -ICO_Z, ICO_X],
    [0.0, -ICO_Z, -ICO_X],
    [ICO_Z, ICO_X, 0.0],
    [-ICO_Z, ICO_X, 0.0],
    [ICO_Z, -ICO_X, 0.0],
    [-ICO_Z, -ICO_X, 0.0],
];

const ICO_COLORS: [[f32; 3]; 12] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.6, 0.4, 0.2],
    [1.0, 0.2, 0.8],
    [1.0, 0.4, 0.0],
    [0.0, 0.6, 0.0],
    [0.6, 0.6, 0.6],
];

const ICO_FACES: [[u32; 3]; 20] = [
    [1, 4, 0],
    [4, 9, 0],
    [4, 5, 9],
    [8, 5, 4],
    [1, 8, 4],
    [1, 10, 8],
    [10, 3, 8],
    [8, 3, 5],
    [3, 2, 5],
    [3, 7, 2],
    [3, 10, 7],
    [10, 6, 7],
    [6, 11, 7],
    [6, 0, 11],
    [6, 1, 0],
    [10, 1, 6],
    [11, 0, 9],
    [2, 11, 9],
    [5, 2, 9],
    [11, 2, 7],
];

/// Unit cube: 4 unshared vertices per face so each face keeps a flat normal
///
/// Vertex colours come from the corner palette, so a corner has the same
/// colour on all three faces that meet there.
pub fn cube() -> MeshDefinition {
    let mut builder = MeshDefinition::builder(OBJECT_MATERIAL);
    for (face, (corners, normal)) in CUBE_FACES.iter().enumerate() {
        for (&corner, &tex_coord) in corners.iter().zip(&FACE_TEX_COORDS) {
            builder = builder.vertex(Vertex::new(
                CUBE_CORNERS[corner],
                *normal,
                tex_coord,
                Vertex::rgb(CUBE_CORNER_COLORS[corner]),
            ));
        }
        let base = face as u32 * 4;
        // Split as (0, 1, 3) and (1, 2, 3)
        builder = builder.quad(base, base + 1, base + 2, base + 3);
    }
    builder.build()
}

/// Unit icosahedron with per-vertex normals equal to positions
pub fn icosahedron() -> MeshDefinition {
    let vertices = ICO_VERTICES
        .iter()
        .zip(&ICO_COLORS)
        .map(|(&position, &color)| Vertex::new(position, position, [0.0, 0.0], Vertex::rgb(color)))
        .collect();
    MeshDefinition::new(OBJECT_MATERIAL, vertices, ICO_FACES.to_vec())
}
