//! Software 3D rendering pipeline
//!
//! Transforms a triangle mesh through model/world matrices, projects it with
//! a perspective camera, culls back-facing geometry, depth-sorts the
//! survivors (painter's algorithm), and rasterizes into a packed-ARGB
//! framebuffer.
//!
//! Features:
//! - Affine texture mapping (screen-space linear, no perspective correction)
//! - Flat shading from a single directional light
//! - Painter's algorithm ordering (no z-buffer)
//! - Independent wireframe / fill / texture / vertex-marker passes
//!
//! # Module Organization
//!
//! - `math` - Vec2/Vec3/Vec4, Mat4 builders, barycentric weights
//! - `types` - Color, Texture, Light, RenderFlags
//! - `camera` - Camera position for the culling ray
//! - `mesh` - Mesh, Face, built-in cube, load-time validation
//! - `pipeline` - RenderContext: per-frame transform/cull/shade/sort
//! - `render` - Framebuffer and all rasterization primitives

#![allow(dead_code)]

pub mod camera;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod render;
pub mod types;

pub use camera::Camera;
pub use math::{
    barycentric, mat4_identity, mat4_mul, mat4_mul_vec4, mat4_perspective, mat4_rotation_x,
    mat4_rotation_y, mat4_rotation_z, mat4_scale, mat4_translation, mat4_world, Mat4, Vec2, Vec3,
    Vec4,
};
pub use mesh::{Face, Mesh, MeshError};
pub use pipeline::{RenderContext, Triangle};
pub use render::{render_triangles, Framebuffer};
pub use types::{Color, Light, RenderFlags, Texture, Toggle};
