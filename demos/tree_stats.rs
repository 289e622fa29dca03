//! # Tree Stats Demo
//!
//! Builds every primitive, places a small forest in a scene, flies an
//! arcball camera around it and picks the object under the screen center.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example tree_stats
//! ```

use anyhow::{Context, Result};
use terra::gfx::camera::{CameraKey, CameraManager, InputSource, MouseButton};
use terra::gfx::geometry::TRUNK_COLOR;
use terra::noise::{PerlinNoise, SimplexNoise};
use terra::prelude::*;

const FOREST_SEED: u64 = 2024;
const FOREST_SIZE: u64 = 9;

/// Scripted mouse that drags to the right while the primary button is down.
struct ScriptedMouse {
    frame: u32,
}

impl InputSource for ScriptedMouse {
    fn mouse_position(&self) -> Vector2 {
        Vector2::new(400.0 + self.frame as f32 * 12.0, 300.0)
    }

    fn scroll_offset(&self) -> f32 {
        self.frame as f32 * -0.5
    }

    fn is_key_down(&self, _key: CameraKey) -> bool {
        false
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        button == MouseButton::Primary
    }
}

fn log_mesh(name: &str, mesh: &Mesh) {
    let (min, max) = mesh.bounds().unwrap_or((Vector3::ZERO, Vector3::ZERO));
    log::info!(
        "{:<10} {:>6} vertices {:>6} triangles  bounds {} .. {}",
        name,
        mesh.vertex_count(),
        mesh.triangle_count(),
        min,
        max
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let white = Vector4::splat(1.0);
    let sphere = build_sphere_mesh(white, 1.0, 4).context("building sphere")?;
    let (branch, branch_position) = build_cylinder_mesh(
        Vector3::ZERO,
        Vector3::new(0.0, 2.0, 0.0),
        TRUNK_COLOR,
        CylinderSettings::default(),
    )
    .context("building cylinder")?;
    let cube = build_cube_mesh(white);
    let crate_box = build_box_mesh();

    log_mesh("sphere", &sphere);
    log_mesh("cylinder", &branch);
    log_mesh("cube", &cube);
    log_mesh("box", &crate_box);

    let heights = PerlinNoise::new(FOREST_SEED);
    let mut scene = Scene::new();
    scene.add_object(branch, branch_position, Vector3::ZERO, Vector3::ONE);

    let mut trees = Vec::new();
    for i in 0..FOREST_SIZE {
        let seed = FOREST_SEED + i;
        let tree = build_tree_mesh(seed).with_context(|| format!("building tree {seed}"))?;
        if i == 0 {
            log_mesh("tree", &tree);
        }

        let (x, z) = ((i % 3) as f32 * 3.0 - 3.0, (i / 3) as f32 * 3.0 - 3.0);
        let ground = heights
            .octave_perlin(x as f64, 0.0, z as f64, 4, 0.5, 0.1, 1.0)
            .context("sampling ground height")? as f32;
        trees.push(scene.add_object(
            tree,
            Vector3::new(x, ground, z),
            Vector3::ZERO,
            Vector3::ONE,
        ));
    }

    let clouds = SimplexNoise::new(64.0, 0.5, FOREST_SEED).context("building simplex noise")?;
    let cover: f64 = (0..16)
        .map(|i| clouds.noise_2d(i as f64 * 4.0, 0.0))
        .sum::<f64>()
        / 16.0;
    log::info!(
        "Scene: {} objects, light at {}, mean cloud cover {:.3} over {} octaves",
        scene.len(),
        scene.light_position,
        cover,
        clouds.octave_count()
    );

    let mut manager = CameraManager::new(ArcballCamera::new(Vector3::ZERO, CameraSettings::default()));
    for frame in 0..10 {
        manager.update(&ScriptedMouse { frame });
    }
    let camera = &manager.camera;
    log::info!(
        "Camera at {} rotation {} distance {:.2}",
        camera.position(),
        camera.rotation(),
        camera.distance()
    );

    let picker = MousePicker::new(Projection::new(70.0, 4.0 / 3.0, 0.01, 1000.0))
        .context("inverting projection")?;
    let ray = picker
        .compute_ray(Vector2::new(400.0, 300.0), Vector2::new(800.0, 600.0), camera)
        .context("casting pick ray")?;
    match ObjectPicker::new().pick(&ray, &scene) {
        Some(hit) => log::info!(
            "Picked {} at {:.3} ({}), tree: {}",
            hit.object,
            hit.distance,
            hit.point,
            trees.contains(&hit.object)
        ),
        None => log::info!("Nothing under the cursor"),
    }

    Ok(())
}
