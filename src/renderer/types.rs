//! Core types for the renderer
//!
//! Packed ARGB color, textures, the directional light, and the render-mode
//! flag set toggled from the keyboard.

use super::math::Vec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// Packed ARGB color
// =============================================================================

/// Packed 32-bit ARGB color, alpha in the most significant byte.
///
/// The same layout is used for framebuffer pixels, texture texels, and face
/// base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF000000);
    pub const WHITE: Color = Color(0xFFFFFFFF);
    pub const RED: Color = Color(0xFFFF0000);
    pub const GREEN: Color = Color(0xFF00FF00);
    pub const BLUE: Color = Color(0xFF0000FF);
    pub const YELLOW: Color = Color(0xFFFFFF00);
    pub const GRAY: Color = Color(0xFF333333);

    #[inline]
    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Scale the R, G, B channels by a light intensity, leaving alpha alone.
    /// Intensity is clamped to [0, 1] so channels can neither overflow nor
    /// wrap.
    #[inline]
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Color::from_argb(
            self.a(),
            (self.r() as f32 * i) as u8,
            (self.g() as f32 * i) as u8,
            (self.b() as f32 * i) as u8,
        )
    }
}

// =============================================================================
// Texture
// =============================================================================

/// Immutable square texture of packed ARGB texels, supplied at startup and
/// never written afterwards.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Load a texture from an image file (PNG/JPEG/BMP). Texels with zero
    /// alpha decode to fully transparent ARGB.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels: Vec<u32> = rgba
            .pixels()
            .map(|p| Color::from_argb(p[3], p[0], p[1], p[2]).0)
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    /// Built-in checkerboard test texture (8x8 texel cells).
    pub fn checkerboard(size: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / 8) + (y / 8)) % 2 == 0;
                pixels.push(if checker { color1.0 } else { color2.0 });
            }
        }
        Self { width: size, height: size, pixels }
    }

    /// Texel at (x, y). Out-of-range coordinates read as opaque black rather
    /// than panicking; the rasterizer clamps before calling.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            Color(self.pixels[y * self.width + x])
        } else {
            Color::BLACK
        }
    }
}

// =============================================================================
// Light
// =============================================================================

/// Single directional light, constant for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub direction: Vec3,
}

impl Light {
    /// Direction is normalized on construction.
    pub fn new(direction: Vec3) -> Self {
        Self { direction: direction.normalize() }
    }
}

// =============================================================================
// Render flags
// =============================================================================

/// Independent render-mode switches. Any combination may be active; the
/// rasterizer composes them in a fixed draw order (vertices, fill, texture,
/// wireframe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderFlags {
    pub backface_cull: bool,
    pub wireframe: bool,
    pub fill: bool,
    pub vertices: bool,
    pub textured: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            backface_cull: true,
            wireframe: true,
            fill: true,
            vertices: false,
            textured: false,
        }
    }
}

/// One toggleable flag, for mapping key codes to flag flips without a growing
/// branch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    BackfaceCull,
    Wireframe,
    Fill,
    Vertices,
    Textured,
}

impl Toggle {
    pub fn label(self) -> &'static str {
        match self {
            Toggle::BackfaceCull => "backface culling",
            Toggle::Wireframe => "wireframe",
            Toggle::Fill => "fill",
            Toggle::Vertices => "vertex markers",
            Toggle::Textured => "texturing",
        }
    }
}

impl RenderFlags {
    /// Flip one flag, returning its new state.
    pub fn toggle(&mut self, which: Toggle) -> bool {
        let flag = match which {
            Toggle::BackfaceCull => &mut self.backface_cull,
            Toggle::Wireframe => &mut self.wireframe,
            Toggle::Fill => &mut self.fill,
            Toggle::Vertices => &mut self.vertices,
            Toggle::Textured => &mut self.textured,
        };
        *flag = !*flag;
        *flag
    }
}
