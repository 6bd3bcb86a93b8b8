//! Mesh data model
//!
//! A mesh is an ordered vertex sequence plus faces indexing into it, carrying
//! the per-frame transform state mutated by the animation step. Faces use
//! 1-based indices, matching the OBJ convention they are usually loaded from.

use super::math::{Vec2, Vec3};
use super::types::Color;

/// One triangular face: three 1-based indices into the mesh's vertex
/// sequence, an optional per-vertex UV triple, and a base color.
///
/// Index validity is a load-time invariant: `Mesh::validate` rejects any
/// index that does not resolve after the 1-based adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub uvs: Option<[Vec2; 3]>,
    pub color: Color,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize, color: Color) -> Self {
        Self { a, b, c, uvs: None, color }
    }

    pub fn with_uvs(a: usize, b: usize, c: usize, uvs: [Vec2; 3], color: Color) -> Self {
        Self { a, b, c, uvs: Some(uvs), color }
    }
}

/// Error raised when mesh data fails load-time validation.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MeshError::FaceIndexOutOfRange { face, index, vertex_count } => write!(
                f,
                "Face {} references vertex {} (mesh has {} vertices, indices are 1-based)",
                face, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Triangle mesh with mutable transform state.
///
/// The transform fields are mutated once per frame by the animation step
/// before the pipeline reads them; rotation is in radians per axis.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub translation: Vec3,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
        }
    }

    /// Check that every face index resolves to a vertex. Out-of-range
    /// indices are a data error to be reported at load time, never a
    /// runtime panic in the pipeline.
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.vertices.len();
        for (i, face) in self.faces.iter().enumerate() {
            for index in [face.a, face.b, face.c] {
                if index < 1 || index > count {
                    return Err(MeshError::FaceIndexOutOfRange {
                        face: i,
                        index,
                        vertex_count: count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Built-in unit cube: 8 vertices at ±0.5 on each axis, 12 triangular
    /// faces covering the 6 sides, each face carrying UVs spanning the full
    /// texture.
    pub fn cube() -> Self {
        let vertices = vec![
            Vec3::new(-0.5, -0.5, -0.5), // 1
            Vec3::new(-0.5, 0.5, -0.5),  // 2
            Vec3::new(0.5, 0.5, -0.5),   // 3
            Vec3::new(0.5, -0.5, -0.5),  // 4
            Vec3::new(0.5, 0.5, 0.5),    // 5
            Vec3::new(0.5, -0.5, 0.5),   // 6
            Vec3::new(-0.5, 0.5, 0.5),   // 7
            Vec3::new(-0.5, -0.5, 0.5),  // 8
        ];

        let uv_a = [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let uv_b = [Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let white = Color::WHITE;

        let quads = [
            (1, 2, 3, 4), // front
            (4, 3, 5, 6), // right
            (6, 5, 7, 8), // back
            (8, 7, 2, 1), // left
            (2, 7, 5, 3), // top
            (6, 8, 1, 4), // bottom
        ];

        let mut faces = Vec::with_capacity(12);
        for (a, b, c, d) in quads {
            faces.push(Face::with_uvs(a, b, c, uv_a, white));
            faces.push(Face::with_uvs(a, c, d, uv_b, white));
        }

        Self::new(vertices, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_topology() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_cube_vertices_on_half_unit() {
        for v in Mesh::cube().vertices {
            for coord in [v.x, v.y, v.z] {
                assert!(coord == 0.5 || coord == -0.5);
            }
        }
    }

    #[test]
    fn test_default_transform_state() {
        let cube = Mesh::cube();
        assert_eq!(cube.rotation, Vec3::ZERO);
        assert_eq!(cube.scale, Vec3::ONE);
        assert_eq!(cube.translation, Vec3::ZERO);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::ONE],
            vec![Face::new(1, 2, 3, Color::WHITE)],
        );
        let err = mesh.validate().unwrap_err();
        assert_eq!(
            err,
            MeshError::FaceIndexOutOfRange { face: 0, index: 3, vertex_count: 2 }
        );
    }

    #[test]
    fn test_validate_rejects_zero_index() {
        let mesh = Mesh::new(vec![Vec3::ZERO], vec![Face::new(0, 1, 1, Color::WHITE)]);
        assert!(mesh.validate().is_err());
    }
}
