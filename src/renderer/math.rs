//! Vector and matrix math for the 3D pipeline
//!
//! Plain `f32` value types and free matrix-builder functions. Everything here
//! is a pure function; the per-frame pipeline composes these.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 2D vector (screen points, texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x - other.x, y: self.y - other.y }
    }
}

/// 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Zero-length vectors come back unchanged instead of dividing by zero.
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return self;
        }
        Vec3 { x: self.x / l, y: self.y / l, z: self.z / l }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Homogeneous 4D vector, used between the projection multiply and the
/// perspective divide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: 1.0 }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3 { x: self.x, y: self.y, z: self.z }
    }
}

// =============================================================================
// 4x4 matrix operations
// =============================================================================

/// 4x4 transformation matrix, row-major (`m[row][col]`)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub fn mat4_identity() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Per-axis scale matrix
pub fn mat4_scale(sx: f32, sy: f32, sz: f32) -> Mat4 {
    let mut m = mat4_identity();
    m[0][0] = sx;
    m[1][1] = sy;
    m[2][2] = sz;
    m
}

/// Translation matrix
pub fn mat4_translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
    let mut m = mat4_identity();
    m[0][3] = tx;
    m[1][3] = ty;
    m[2][3] = tz;
    m
}

/// Rotation about the X axis (radians, right-handed)
pub fn mat4_rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = mat4_identity();
    m[1][1] = c;
    m[1][2] = -s;
    m[2][1] = s;
    m[2][2] = c;
    m
}

/// Rotation about the Y axis (radians, right-handed)
pub fn mat4_rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = mat4_identity();
    m[0][0] = c;
    m[0][2] = s;
    m[2][0] = -s;
    m[2][2] = c;
    m
}

/// Rotation about the Z axis (radians, right-handed)
pub fn mat4_rotation_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = mat4_identity();
    m[0][0] = c;
    m[0][1] = -s;
    m[1][0] = s;
    m[1][1] = c;
    m
}

/// Perspective projection matrix.
///
/// `fov` is the vertical field of view in radians, `aspect` is height/width.
/// After `mat4_mul_vec4` and a divide by the resulting `w`, x and y are in
/// normalized device coordinates and z is depth-mapped into [0, 1].
pub fn mat4_perspective(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let mut m = [[0.0; 4]; 4];
    m[0][0] = aspect * (1.0 / (fov / 2.0).tan());
    m[1][1] = 1.0 / (fov / 2.0).tan();
    m[2][2] = zfar / (zfar - znear);
    m[2][3] = (-zfar * znear) / (zfar - znear);
    m[3][2] = 1.0;
    m
}

/// Multiply two 4x4 matrices
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transform a homogeneous vector by a 4x4 matrix
pub fn mat4_mul_vec4(m: &Mat4, v: Vec4) -> Vec4 {
    Vec4 {
        x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
        y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
        z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
        w: m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
    }
}

/// Build the world matrix as T * Rz * Ry * Rx * S.
///
/// Scale applies first, then rotation about x, y, z in that order, then
/// translation. The composition order is a fixed contract of the pipeline.
pub fn mat4_world(scale: Vec3, rotation: Vec3, translation: Vec3) -> Mat4 {
    let s = mat4_scale(scale.x, scale.y, scale.z);
    let rx = mat4_rotation_x(rotation.x);
    let ry = mat4_rotation_y(rotation.y);
    let rz = mat4_rotation_z(rotation.z);
    let t = mat4_translation(translation.x, translation.y, translation.z);

    let mut world = mat4_mul(&rx, &s);
    world = mat4_mul(&ry, &world);
    world = mat4_mul(&rz, &world);
    mat4_mul(&t, &world)
}

/// Barycentric weights of point `p` in triangle (a, b, c), by signed area
/// ratios. Returns `None` for a degenerate (zero-area) triangle. When `p`
/// coincides with a vertex the weights are exactly {1, 0, 0} permuted.
pub fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<Vec3> {
    let d = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if d == 0.0 {
        return None;
    }

    let alpha = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / d;
    let beta = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / d;
    let gamma = 1.0 - alpha - beta;

    Some(Vec3::new(alpha, beta, gamma))
}
