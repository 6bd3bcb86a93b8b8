//! Per-frame transform, visibility, and ordering pipeline
//!
//! Walks the mesh once per frame: builds the world matrix, transforms each
//! face, culls and shades it, projects it to screen space, and returns the
//! surviving triangles sorted back-to-front for the painter's algorithm.

use super::camera::Camera;
use super::math::{
    mat4_mul_vec4, mat4_world, Mat4, Vec2, Vec3, Vec4,
};
use super::mesh::Mesh;
use super::types::{Color, Light, RenderFlags};

/// Screen-space triangle ready for rasterization. Rebuilt from scratch every
/// frame and owned by that frame's render list; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
    pub uvs: [Vec2; 3],
    pub color: Color,
    pub avg_depth: f32,
}

/// Explicit scene state threaded through the pipeline each frame, instead of
/// process-wide globals. The frame loop mutates `mesh` (animation) and
/// `flags` (key toggles) between calls.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub mesh: Mesh,
    pub camera: Camera,
    pub light: Light,
    pub projection: Mat4,
    pub flags: RenderFlags,
}

impl RenderContext {
    pub fn new(
        mesh: Mesh,
        camera: Camera,
        light: Light,
        projection: Mat4,
        flags: RenderFlags,
    ) -> Self {
        Self { mesh, camera, light, projection, flags }
    }

    /// Transform, cull, shade, project, and depth-sort the mesh into a fresh
    /// render list for this frame.
    ///
    /// Face indices are trusted here; `Mesh::validate` must have accepted the
    /// mesh at load time.
    pub fn build_render_list(&self, viewport_w: f32, viewport_h: f32) -> Vec<Triangle> {
        let world = mat4_world(self.mesh.scale, self.mesh.rotation, self.mesh.translation);
        let mut triangles: Vec<Triangle> = Vec::with_capacity(self.mesh.faces.len());

        'faces: for face in &self.mesh.faces {
            // 1-based face indices into the vertex sequence
            let world_verts = [
                transform_vertex(&world, self.mesh.vertices[face.a - 1]),
                transform_vertex(&world, self.mesh.vertices[face.b - 1]),
                transform_vertex(&world, self.mesh.vertices[face.c - 1]),
            ];

            // Face normal from the world-space winding, shared by the cull
            // test and the flat-shading intensity.
            let edge1 = (world_verts[1] - world_verts[0]).normalize();
            let edge2 = (world_verts[2] - world_verts[0]).normalize();
            let normal = edge1.cross(edge2).normalize();

            if self.flags.backface_cull {
                let camera_ray = self.camera.position - world_verts[0];
                if camera_ray.dot(normal) < 0.0 {
                    continue;
                }
            }

            let intensity = -normal.dot(self.light.direction);
            let color = face.color.shade(intensity);

            // Depth for ordering is the pre-projection camera-space z,
            // averaged over the face.
            let avg_depth = (world_verts[0].z + world_verts[1].z + world_verts[2].z) / 3.0;

            let mut points = [Vec2::ZERO; 3];
            for (i, &v) in world_verts.iter().enumerate() {
                let p = mat4_mul_vec4(&self.projection, Vec4::from_vec3(v));
                if p.w == 0.0 {
                    // Perspective divide would blow up; drop the whole
                    // triangle rather than feed infinities downstream.
                    continue 'faces;
                }

                let ndc_x = p.x / p.w;
                let ndc_y = p.y / p.w;

                // Scale to the viewport, flip y (screen y grows downward),
                // recenter.
                points[i] = Vec2::new(
                    ndc_x * (viewport_w / 2.0) + viewport_w / 2.0,
                    -ndc_y * (viewport_h / 2.0) + viewport_h / 2.0,
                );
            }

            triangles.push(Triangle {
                points,
                uvs: face.uvs.unwrap_or([Vec2::ZERO; 3]),
                color,
                avg_depth,
            });
        }

        // Painter's algorithm: farthest first, nearer triangles overdraw.
        triangles.sort_by(|a, b| {
            b.avg_depth
                .partial_cmp(&a.avg_depth)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        triangles
    }
}

fn transform_vertex(world: &Mat4, v: Vec3) -> Vec3 {
    mat4_mul_vec4(world, Vec4::from_vec3(v)).to_vec3()
}
