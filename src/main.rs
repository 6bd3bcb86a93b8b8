//! POLYDUST: a retro software 3D renderer
//!
//! No GPU anywhere: meshes are transformed, projected, depth-sorted, and
//! rasterized on the CPU into a packed-ARGB framebuffer, which macroquad
//! only blits to the window. Wireframe, flat fill, affine texturing, and
//! vertex markers are independent toggles; painter's algorithm handles
//! overdraw.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod obj;
mod renderer;

use config::DemoConfig;
use macroquad::prelude::*;
use obj::ObjImporter;
use renderer::{
    mat4_perspective, render_triangles, Camera, Color as RasterColor, Framebuffer, Light, Mesh,
    RenderContext, Texture as RasterTexture, Toggle,
};
use std::path::Path;

/// Digit keys flip render flags; extending this table is the whole story of
/// adding a toggle.
const KEY_TOGGLES: [(KeyCode, Toggle); 5] = [
    (KeyCode::Key1, Toggle::BackfaceCull),
    (KeyCode::Key2, Toggle::Wireframe),
    (KeyCode::Key3, Toggle::Fill),
    (KeyCode::Key4, Toggle::Vertices),
    (KeyCode::Key5, Toggle::Textured),
];

fn window_conf() -> Conf {
    Conf {
        window_title: format!("POLYDUST v{}", VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let cfg = match DemoConfig::load_or_default(Path::new("polydust.ron")) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load polydust.ron: {}", e);
            std::process::exit(1);
        }
    };

    let mut mesh = match &cfg.mesh {
        Some(path) => match ObjImporter::load_from_file(path) {
            Ok(mesh) => {
                println!(
                    "Loaded {} ({} vertices, {} faces)",
                    path.display(),
                    mesh.vertices.len(),
                    mesh.faces.len()
                );
                mesh
            }
            Err(e) => {
                eprintln!("Failed to load mesh {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Mesh::cube(),
    };
    if let Err(e) = mesh.validate() {
        eprintln!("Invalid mesh data: {}", e);
        std::process::exit(1);
    }
    mesh.translation.z = cfg.mesh_distance;

    let texture = match &cfg.texture {
        Some(path) => match RasterTexture::from_file(path) {
            Ok(tex) => {
                println!("Loaded texture {} ({}x{})", path.display(), tex.width, tex.height);
                tex
            }
            Err(e) => {
                eprintln!("Failed to load texture: {}", e);
                std::process::exit(1);
            }
        },
        None => RasterTexture::checkerboard(64, RasterColor(0xFFC0C0C0), RasterColor(0xFF404040)),
    };

    let mut fb = Framebuffer::new(cfg.width, cfg.height);
    let projection = mat4_perspective(
        cfg.fov_degrees.to_radians(),
        cfg.height as f32 / cfg.width as f32,
        cfg.znear,
        cfg.zfar,
    );
    let mut ctx = RenderContext::new(
        mesh,
        Camera::new(),
        Light::new(cfg.light_direction),
        projection,
        cfg.flags,
    );

    println!("=== POLYDUST ===");
    println!("1-5 toggle culling/wireframe/fill/vertices/texture, ESC quits");

    let mut running = true;
    while running {
        // --- input ---
        if is_key_pressed(KeyCode::Escape) {
            running = false;
        }
        for (key, toggle) in KEY_TOGGLES {
            if is_key_pressed(key) {
                let on = ctx.flags.toggle(toggle);
                println!("{}: {}", toggle.label(), if on { "on" } else { "off" });
            }
        }

        // --- update ---
        ctx.mesh.rotation = ctx.mesh.rotation + cfg.spin;
        let triangles = ctx.build_render_list(fb.width as f32, fb.height as f32);

        // --- render ---
        fb.clear(RasterColor::BLACK);
        fb.draw_grid(RasterColor::GRAY, cfg.grid_gap);
        render_triangles(&mut fb, &triangles, &texture, &ctx.flags);

        present(&fb);
        next_frame().await;
    }
}

/// Blit the ARGB framebuffer to the window, scaled to fit.
fn present(fb: &Framebuffer) {
    let mut bytes = Vec::with_capacity(fb.pixels.len() * 4);
    for &pixel in &fb.pixels {
        let c = RasterColor(pixel);
        bytes.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
    }

    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &bytes);
    texture.set_filter(FilterMode::Nearest);
    draw_texture_ex(
        &texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(screen_width(), screen_height())),
            ..Default::default()
        },
    );
}
