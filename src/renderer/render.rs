//! Framebuffer and rasterization
//!
//! All drawing funnels through bounds-checked pixel writes; out-of-range
//! coordinates are dropped silently. Filled and textured triangles share the
//! same scanline decomposition: sort by y, split at the middle vertex into a
//! flat-bottom and a flat-top half, interpolate span boundaries per row.

use super::math::{barycentric, Vec2};
use super::pipeline::Triangle;
use super::types::{Color, RenderFlags, Texture};

/// Color of the wireframe outline pass.
const OUTLINE_COLOR: Color = Color::GREEN;

/// Color of the vertex-marker pass.
const MARKER_COLOR: Color = Color::YELLOW;

/// Packed-ARGB pixel buffer, sized once at startup to the display
/// resolution, cleared and repopulated every frame.
pub struct Framebuffer {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK.0; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    /// Bounds-checked pixel write.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color.0;
        }
    }

    /// Pixel read for inspection; out-of-range reads as None.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(Color(self.pixels[y as usize * self.width + x as usize]))
        } else {
            None
        }
    }

    /// Reference grid overlay: a pixel wherever x or y is a multiple of
    /// `gap`.
    pub fn draw_grid(&mut self, color: Color, gap: usize) {
        if gap == 0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if x % gap == 0 || y % gap == 0 {
                    self.pixels[y * self.width + x] = color.0;
                }
            }
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for i in 0..w {
            for j in 0..h {
                self.set_pixel(x + i, y + j, color);
            }
        }
    }

    /// DDA line: step count is the longest axis delta, coordinates are
    /// interpolated and rounded per step.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let delta_x = x1 - x0;
        let delta_y = y1 - y0;

        let side_length = delta_x.abs().max(delta_y.abs());
        if side_length == 0 {
            self.set_pixel(x0, y0, color);
            return;
        }

        let x_inc = delta_x as f32 / side_length as f32;
        let y_inc = delta_y as f32 / side_length as f32;

        let mut current_x = x0 as f32;
        let mut current_y = y0 as f32;
        for _ in 0..=side_length {
            self.set_pixel(current_x.round() as i32, current_y.round() as i32, color);
            current_x += x_inc;
            current_y += y_inc;
        }
    }

    /// Wireframe outline: three lines.
    pub fn draw_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        let (x0, y0) = round_point(p0);
        let (x1, y1) = round_point(p1);
        let (x2, y2) = round_point(p2);
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Flat-filled triangle via scanline decomposition. Degenerate triangles
    /// (zero area, including coincident points) draw nothing.
    pub fn draw_filled_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        let mut pts = [round_point(p0), round_point(p1), round_point(p2)];
        pts.sort_by_key(|&(x, y)| (y, x));
        let [(x0, y0), (x1, y1), (x2, y2)] = pts;

        if is_degenerate(x0, y0, x1, y1, x2, y2) {
            return;
        }

        // Flat-bottom half: rows from the top vertex to the middle vertex,
        // bounded by edges p0-p1 and p0-p2.
        if y1 > y0 {
            for y in self.clip_rows(y0, y1) {
                let xa = edge_x(x0, y0, x1, y1, y);
                let xb = edge_x(x0, y0, x2, y2, y);
                self.fill_span(xa, xb, y, color);
            }
        }

        // Flat-top half: rows from the middle vertex to the bottom vertex,
        // bounded by edges p1-p2 and p0-p2.
        if y2 > y1 {
            for y in self.clip_rows(y1, y2) {
                let xa = edge_x(x1, y1, x2, y2, y);
                let xb = edge_x(x0, y0, x2, y2, y);
                self.fill_span(xa, xb, y, color);
            }
        }
    }

    /// Affine-textured triangle: same scanline decomposition as the flat
    /// fill, but every pixel interpolates UV by barycentric weights against
    /// the original (un-split) triangle and samples the texture
    /// nearest-neighbor. A pixel on a vertex samples that vertex's UV
    /// exactly.
    pub fn draw_textured_triangle(
        &mut self,
        points: [Vec2; 3],
        uvs: [Vec2; 3],
        texture: &Texture,
    ) {
        if texture.width == 0 || texture.height == 0 {
            return;
        }

        // UVs travel with their vertices through the y-sort.
        let mut verts = [
            (round_point(points[0]), uvs[0]),
            (round_point(points[1]), uvs[1]),
            (round_point(points[2]), uvs[2]),
        ];
        verts.sort_by_key(|&((x, y), _)| (y, x));
        let [((x0, y0), uv0), ((x1, y1), uv1), ((x2, y2), uv2)] = verts;

        if is_degenerate(x0, y0, x1, y1, x2, y2) {
            return;
        }

        let a = Vec2::new(x0 as f32, y0 as f32);
        let b = Vec2::new(x1 as f32, y1 as f32);
        let c = Vec2::new(x2 as f32, y2 as f32);

        if y1 > y0 {
            for y in self.clip_rows(y0, y1) {
                let xa = edge_x(x0, y0, x1, y1, y);
                let xb = edge_x(x0, y0, x2, y2, y);
                self.texel_span(xa, xb, y, (a, b, c), (uv0, uv1, uv2), texture);
            }
        }

        if y2 > y1 {
            for y in self.clip_rows(y1, y2) {
                let xa = edge_x(x1, y1, x2, y2, y);
                let xb = edge_x(x0, y0, x2, y2, y);
                self.texel_span(xa, xb, y, (a, b, c), (uv0, uv1, uv2), texture);
            }
        }
    }

    /// Inclusive scanline range clamped to the framebuffer; empty when the
    /// triangle half lies fully off screen.
    fn clip_rows(&self, top: i32, bottom: i32) -> std::ops::RangeInclusive<i32> {
        top.max(0)..=bottom.min(self.height as i32 - 1)
    }

    fn fill_span(&mut self, xa: i32, xb: i32, y: i32, color: Color) {
        let lo = xa.min(xb).max(0);
        let hi = xa.max(xb).min(self.width as i32 - 1);
        for x in lo..=hi {
            self.set_pixel(x, y, color);
        }
    }

    fn texel_span(
        &mut self,
        xa: i32,
        xb: i32,
        y: i32,
        (a, b, c): (Vec2, Vec2, Vec2),
        (uv0, uv1, uv2): (Vec2, Vec2, Vec2),
        texture: &Texture,
    ) {
        let lo = xa.min(xb).max(0);
        let hi = xa.max(xb).min(self.width as i32 - 1);
        for x in lo..=hi {
            let p = Vec2::new(x as f32, y as f32);
            let weights = match barycentric(p, a, b, c) {
                Some(w) => w,
                None => return,
            };

            let u = weights.x * uv0.x + weights.y * uv1.x + weights.z * uv2.x;
            let v = weights.x * uv0.y + weights.y * uv1.y + weights.z * uv2.y;

            // Nearest-neighbor sample, texel coordinates clamped to the
            // texture's valid range.
            let tx = ((u * texture.width as f32) as i32).clamp(0, texture.width as i32 - 1);
            let ty = ((v * texture.height as f32) as i32).clamp(0, texture.height as i32 - 1);

            self.set_pixel(x, y, texture.texel(tx as usize, ty as usize));
        }
    }
}

/// Screen coordinates entering the rasterizer are clamped to this range so
/// edge deltas and DDA step counts stay within integer range even for
/// triangles projected with a near-zero w.
const COORD_LIMIT: f32 = 16384.0;

#[inline]
fn round_point(p: Vec2) -> (i32, i32) {
    (
        p.x.clamp(-COORD_LIMIT, COORD_LIMIT).round() as i32,
        p.y.clamp(-COORD_LIMIT, COORD_LIMIT).round() as i32,
    )
}

/// Zero signed area after rounding: collinear or coincident points.
fn is_degenerate(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
    (x1 - x0) as i64 * (y2 - y0) as i64 == (x2 - x0) as i64 * (y1 - y0) as i64
}

/// Interpolated x along the edge (x0,y0)-(x1,y1) at scanline y. Callers
/// guarantee y1 != y0.
#[inline]
fn edge_x(x0: i32, y0: i32, x1: i32, y1: i32, y: i32) -> i32 {
    (x0 as f32 + (y - y0) as f32 * (x1 - x0) as f32 / (y1 - y0) as f32).round() as i32
}

/// Rasterize a frame's sorted render list. Per triangle the passes compose
/// in a fixed order so the outline stays visible over any fill:
/// vertex markers, flat fill, textured fill, wireframe.
pub fn render_triangles(
    fb: &mut Framebuffer,
    triangles: &[Triangle],
    texture: &Texture,
    flags: &RenderFlags,
) {
    for tri in triangles {
        let [p0, p1, p2] = tri.points;

        if flags.vertices {
            for p in tri.points {
                let (x, y) = round_point(p);
                fb.draw_rect(x - 1, y - 1, 3, 3, MARKER_COLOR);
            }
        }

        if flags.fill {
            fb.draw_filled_triangle(p0, p1, p2, tri.color);
        }

        if flags.textured {
            fb.draw_textured_triangle(tri.points, tri.uvs, texture);
        }

        if flags.wireframe {
            fb.draw_triangle(p0, p1, p2, OUTLINE_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_set(fb: &Framebuffer, background: Color) -> usize {
        fb.pixels.iter().filter(|&&p| p != background.0).count()
    }

    #[test]
    fn test_set_pixel_bounds_checked() {
        let mut fb = Framebuffer::new(4, 4);
        fb.clear(Color::BLACK);
        fb.set_pixel(-1, 0, Color::WHITE);
        fb.set_pixel(0, -1, Color::WHITE);
        fb.set_pixel(4, 0, Color::WHITE);
        fb.set_pixel(0, 4, Color::WHITE);
        assert_eq!(count_set(&fb, Color::BLACK), 0);

        fb.set_pixel(3, 3, Color::WHITE);
        assert_eq!(fb.pixel(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Color::RED);
        assert!(fb.pixels.iter().all(|&p| p == Color::RED.0));
    }

    #[test]
    fn test_grid_pattern() {
        let mut fb = Framebuffer::new(32, 32);
        fb.clear(Color::BLACK);
        fb.draw_grid(Color::GRAY, 10);
        assert_eq!(fb.pixel(0, 0), Some(Color::GRAY));
        assert_eq!(fb.pixel(10, 5), Some(Color::GRAY));
        assert_eq!(fb.pixel(5, 20), Some(Color::GRAY));
        assert_eq!(fb.pixel(7, 13), Some(Color::BLACK));
    }

    #[test]
    fn test_grid_zero_gap_is_noop() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Color::BLACK);
        fb.draw_grid(Color::GRAY, 0);
        assert_eq!(count_set(&fb, Color::BLACK), 0);
    }

    #[test]
    fn test_line_endpoints_drawn() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Color::BLACK);
        fb.draw_line(2, 3, 9, 7, Color::WHITE);
        assert_eq!(fb.pixel(2, 3), Some(Color::WHITE));
        assert_eq!(fb.pixel(9, 7), Some(Color::WHITE));
    }

    #[test]
    fn test_zero_length_line_is_one_pixel() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Color::BLACK);
        fb.draw_line(4, 4, 4, 4, Color::WHITE);
        assert_eq!(count_set(&fb, Color::BLACK), 1);
        assert_eq!(fb.pixel(4, 4), Some(Color::WHITE));
    }

    #[test]
    fn test_horizontal_line_stays_on_row() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Color::BLACK);
        fb.draw_line(1, 5, 10, 5, Color::WHITE);
        for x in 1..=10 {
            assert_eq!(fb.pixel(x, 5), Some(Color::WHITE));
        }
        assert_eq!(count_set(&fb, Color::BLACK), 10);
    }

    #[test]
    fn test_filled_triangle_stays_in_bounding_box() {
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);
        let (p0, p1, p2) = (
            Vec2::new(10.0, 5.0),
            Vec2::new(30.0, 25.0),
            Vec2::new(5.0, 28.0),
        );
        fb.draw_filled_triangle(p0, p1, p2, Color::WHITE);

        let mut any = false;
        for y in 0..64 {
            for x in 0..64 {
                if fb.pixel(x, y) == Some(Color::WHITE) {
                    any = true;
                    assert!((5..=30).contains(&x) && (5..=28).contains(&y));
                }
            }
        }
        assert!(any);
    }

    #[test]
    fn test_filled_triangle_covers_centroid() {
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);
        fb.draw_filled_triangle(
            Vec2::new(10.0, 10.0),
            Vec2::new(40.0, 12.0),
            Vec2::new(20.0, 40.0),
            Color::WHITE,
        );
        assert_eq!(fb.pixel(23, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Color::BLACK);
        fb.draw_filled_triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 5.0),
            Color::WHITE,
        );
        assert_eq!(count_set(&fb, Color::BLACK), 0);
    }

    #[test]
    fn test_textured_triangle_vertex_samples_vertex_uv() {
        let mut fb = Framebuffer::new(32, 32);
        fb.clear(Color::BLACK);

        // 4x4 texture with a unique color per texel.
        let mut tex = Texture::checkerboard(4, Color::BLACK, Color::BLACK);
        for i in 0..16u32 {
            tex.pixels[i as usize] = Color::from_argb(0xFF, i as u8 * 16, 0, 0).0;
        }

        let points = [Vec2::new(2.0, 2.0), Vec2::new(10.0, 2.0), Vec2::new(2.0, 10.0)];
        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        fb.draw_textured_triangle(points, uvs, &tex);

        // Vertex pixels must sample their own UV: (0,0) -> texel (0,0),
        // (1,0) -> clamped texel (3,0), (0,1) -> clamped texel (0,3).
        assert_eq!(fb.pixel(2, 2), Some(tex.texel(0, 0)));
        assert_eq!(fb.pixel(10, 2), Some(tex.texel(3, 0)));
        assert_eq!(fb.pixel(2, 10), Some(tex.texel(0, 3)));
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Color::BLACK);
        fb.draw_rect(2, 3, 3, 2, Color::WHITE);
        assert_eq!(count_set(&fb, Color::BLACK), 6);
        assert_eq!(fb.pixel(4, 4), Some(Color::WHITE));
        assert_eq!(fb.pixel(5, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_render_pass_order_outline_wins() {
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);

        let tri = Triangle {
            points: [Vec2::new(5.0, 5.0), Vec2::new(40.0, 5.0), Vec2::new(5.0, 40.0)],
            uvs: [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            color: Color::from_argb(0xFF, 90, 90, 90),
            avg_depth: 1.0,
        };
        let tex = Texture::checkerboard(8, Color::RED, Color::BLUE);
        let flags = RenderFlags {
            backface_cull: true,
            wireframe: true,
            fill: true,
            vertices: true,
            textured: true,
        };
        render_triangles(&mut fb, &[tri], &tex, &flags);

        // The outline pass runs last, so triangle corners end up outline
        // colored even with every other pass enabled.
        assert_eq!(fb.pixel(5, 5), Some(OUTLINE_COLOR));
        assert_eq!(fb.pixel(40, 5), Some(OUTLINE_COLOR));
        // Interior pixels come from the textured pass, which runs after the
        // flat fill.
        let interior = fb.pixel(15, 15).unwrap();
        assert!(interior == Color::RED || interior == Color::BLUE);
    }
}
