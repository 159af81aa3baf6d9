//! Play Renderer
//!
//! Draws the play mode with macroquad: every drawable as a flat-shaded
//! primitive seen through the derived camera, then the HUD line on top.

use macroquad::camera::{set_camera, set_default_camera, Camera3D};
use macroquad::color::{Color, BLACK, WHITE};
use macroquad::math::{vec2, Vec3};
use macroquad::models::{draw_mesh, draw_sphere, Mesh, Vertex};
use macroquad::text::{draw_text, measure_text};
use macroquad::window::{clear_background, screen_height, screen_width};

use super::runtime::PlayMode;
use super::transform::Transform;
use crate::scene::{MeshDesc, MeshShape};

const BACKGROUND: Color = Color::new(0.05, 0.09, 0.16, 1.0);
const HUD_FONT_SIZE: f32 = 28.0;
const HUD_MARGIN: f32 = 16.0;
const HUD_SHADOW_OFFSET: f32 = 2.0;
const BANNER_FONT_SIZE: f32 = 56.0;

/// Per-face brightness: -X, +X, -Y, +Y, -Z, +Z
const FACE_SHADE: [f32; 6] = [0.7, 0.7, 0.85, 0.85, 0.55, 1.0];

/// Corner indices of each face. Corner `i` sits at +extent on X if bit 0 is
/// set, on Y if bit 1 is set, on Z if bit 2 is set.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 4, 6, 2],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
    [0, 2, 3, 1],
    [4, 5, 7, 6],
];

/// Draw one frame. `final_score` is set once the session has ended.
pub fn draw_play_mode(play: &PlayMode, final_score: Option<u32>) {
    clear_background(BACKGROUND);

    set_camera(&camera_3d(&play.camera_transform(), play.fovy()));
    let world = play.world();
    for (entity, drawable) in world.drawables.iter() {
        let (Some(transform), Some(mesh)) = (world.transforms.get(entity), play.meshes().get(drawable.mesh)) else {
            continue;
        };
        draw_shape(transform, mesh);
    }

    set_default_camera();
    draw_hud(&play.hud_line());
    if let Some(score) = final_score {
        draw_banner(&final_banner(score));
    }
}

pub fn final_banner(score: u32) -> String {
    format!("Time's up! Final score: {}", score)
}

/// Camera looking down its local -Z with local +Y as up.
pub fn camera_3d(camera: &Transform, fovy: f32) -> Camera3D {
    let forward = camera.local_to_world_dir(Vec3::NEG_Z);
    let up = camera.local_to_world_dir(Vec3::Y);
    Camera3D {
        position: camera.position,
        target: camera.position + forward,
        up,
        fovy,
        ..Default::default()
    }
}

fn draw_shape(transform: &Transform, mesh: &MeshDesc) {
    let color = Color::from_rgba(mesh.color[0], mesh.color[1], mesh.color[2], mesh.color[3]);
    let half = Vec3::from_array(mesh.extent) * transform.scale;

    match mesh.shape {
        MeshShape::Cube => draw_mesh(&box_mesh(transform, half, color)),
        MeshShape::Plane => draw_mesh(&plane_mesh(transform, half, color)),
        MeshShape::Sphere => draw_sphere(transform.position, half.max_element(), None, color),
    }
}

/// World-space corners of an oriented box.
pub fn box_corners(transform: &Transform, half: Vec3) -> [Vec3; 8] {
    std::array::from_fn(|i| {
        let local = Vec3::new(
            if i & 1 != 0 { half.x } else { -half.x },
            if i & 2 != 0 { half.y } else { -half.y },
            if i & 4 != 0 { half.z } else { -half.z },
        );
        transform.position + transform.rotation * local
    })
}

fn box_mesh(transform: &Transform, half: Vec3, color: Color) -> Mesh {
    let corners = box_corners(transform, half);
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, shade) in BOX_FACES.iter().zip(FACE_SHADE) {
        let base = vertices.len() as u16;
        let shaded = shade_color(color, shade);
        for &corner in face {
            let p = corners[corner];
            vertices.push(Vertex::new(p.x, p.y, p.z, 0.0, 0.0, shaded));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices, texture: None }
}

/// Flat quad in the transform's local XY plane.
fn plane_mesh(transform: &Transform, half: Vec3, color: Color) -> Mesh {
    let flat = Vec3::new(half.x, half.y, 0.0);
    let corners = box_corners(transform, flat);
    let vertices = [0, 1, 3, 2]
        .iter()
        .map(|&i| {
            let p = corners[i];
            Vertex::new(p.x, p.y, p.z, 0.0, 0.0, color)
        })
        .collect();
    Mesh { vertices, indices: vec![0, 1, 2, 0, 2, 3], texture: None }
}

fn shade_color(color: Color, shade: f32) -> Color {
    Color::new(color.r * shade, color.g * shade, color.b * shade, color.a)
}

/// Lower-left HUD line with a drop shadow.
fn draw_hud(line: &str) {
    let baseline = vec2(HUD_MARGIN, screen_height() - HUD_MARGIN);
    draw_shadowed(line, baseline.x, baseline.y, HUD_FONT_SIZE);
}

/// Centered end-of-session text.
fn draw_banner(text: &str) {
    let size = measure_text(text, None, BANNER_FONT_SIZE as u16, 1.0);
    let x = (screen_width() - size.width) * 0.5;
    let y = (screen_height() + size.height) * 0.5;
    draw_shadowed(text, x, y, BANNER_FONT_SIZE);
}

fn draw_shadowed(text: &str, x: f32, y: f32, font_size: f32) {
    draw_text(text, x, y, font_size, BLACK);
    draw_text(text, x - HUD_SHADOW_OFFSET, y - HUD_SHADOW_OFFSET, font_size, WHITE);
}
