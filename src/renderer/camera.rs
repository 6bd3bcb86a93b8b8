//! Camera for 3D rendering

use super::math::Vec3;

/// Camera state. The pipeline projects world-space geometry directly, so the
/// camera contributes only its position, used for the backface-culling ray.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self { position: Vec3::ZERO }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
