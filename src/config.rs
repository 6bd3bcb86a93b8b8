//! Demo configuration
//!
//! Optional RON file controlling resolution, projection, assets, and the
//! starting render flags. Missing file means defaults; a file that exists
//! but fails to parse is a startup error.

use crate::renderer::{RenderFlags, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Framebuffer resolution; the window scales this to fit.
    pub width: usize,
    pub height: usize,

    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,

    /// OBJ mesh to load; the built-in cube when absent.
    pub mesh: Option<PathBuf>,
    /// Texture image to load; a checkerboard when absent.
    pub texture: Option<PathBuf>,

    /// Distance the mesh is pushed away from the camera each frame.
    pub mesh_distance: f32,
    /// Rotation added per frame, radians per axis.
    pub spin: Vec3,
    pub light_direction: Vec3,

    /// Grid overlay spacing in pixels; 0 disables the grid.
    pub grid_gap: usize,

    pub flags: RenderFlags,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 60.0,
            znear: 0.1,
            zfar: 100.0,
            mesh: None,
            texture: None,
            mesh_distance: 5.0,
            spin: Vec3::new(0.01, 0.01, 0.01),
            light_direction: Vec3::new(0.0, 0.0, 1.0),
            grid_gap: 10,
            flags: RenderFlags::default(),
        }
    }
}

impl DemoConfig {
    /// Read the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }
}
