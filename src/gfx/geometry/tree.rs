//! # Procedural Tree
//!
//! Low-poly trees made of a displaced icosahedron for the foliage and a
//! tapered four-sided trunk reaching from the ground to the foliage
//! centroid. A tree is a pure function of its seed: the same seed always
//! yields a bit-identical mesh.
//!
//! ## Usage
//!
//! ```rust
//! use terra::gfx::geometry::build_tree_mesh;
//!
//! let tree = build_tree_mesh(42).unwrap();
//! assert_eq!(tree.triangle_count(), 28);
//! assert_eq!(tree, build_tree_mesh(42).unwrap());
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{GeometryError, Result};
use crate::gfx::scene::Mesh;
use crate::math::{Triangle, Vector3, Vector4};
use crate::noise::PerlinNoise;

use super::icosahedron::{triangles_from, Icosahedron};

pub const FOLIAGE_COLOR: Vector4 = Vector4::new(0.2, 0.6, 0.2, 1.0);
pub const TRUNK_COLOR: Vector4 = Vector4::new(0.4, 0.26, 0.13, 1.0);

/// Base corners of the trunk in XZ, walked so that consecutive pairs form
/// outward facing sides.
const TRUNK_CORNERS: [(f32, f32); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSettings {
    pub foliage_radius: f32,
    /// Per-axis bound of the uniform foliage vertex jitter.
    pub foliage_jitter: f32,
    pub min_height: f32,
    pub height_variation: f32,
    pub trunk_radius_min: f32,
    pub trunk_radius_max: f32,
    /// Top-to-base width ratio of the trunk.
    pub trunk_taper: f32,
    pub trunk_jitter: f32,
    /// Largest radial displacement the noise adds to a foliage vertex.
    pub noise_swell: f32,
    pub noise_frequency: f64,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            foliage_radius: 0.5,
            foliage_jitter: 0.08,
            min_height: 1.0,
            height_variation: 0.5,
            trunk_radius_min: 0.06,
            trunk_radius_max: 0.1,
            trunk_taper: 0.6,
            trunk_jitter: 0.015,
            noise_swell: 0.12,
            noise_frequency: 1.7,
        }
    }
}

impl TreeSettings {
    fn validate(&self) -> Result<()> {
        let non_negative = [
            ("foliage_jitter", self.foliage_jitter),
            ("min_height", self.min_height),
            ("height_variation", self.height_variation),
            ("trunk_jitter", self.trunk_jitter),
            ("noise_swell", self.noise_swell),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(GeometryError::invalid(
                    name,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }

        if !(self.trunk_radius_min > 0.0 && self.trunk_radius_min < self.trunk_radius_max) {
            return Err(GeometryError::invalid(
                "trunk_radius",
                format!(
                    "need 0 < min < max, got [{}, {})",
                    self.trunk_radius_min, self.trunk_radius_max
                ),
            ));
        }
        if !(self.trunk_taper > 0.0 && self.trunk_taper.is_finite()) {
            return Err(GeometryError::invalid(
                "trunk_taper",
                format!("must be positive, got {}", self.trunk_taper),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    settings: TreeSettings,
}

impl TreeBuilder {
    pub fn new(settings: TreeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TreeSettings {
        &self.settings
    }

    /// Builds the tree for `seed`. Foliage vertices come first, trunk
    /// vertices last; no vertex is shared between triangles.
    pub fn build(&self, seed: u64) -> Result<Mesh> {
        self.settings.validate()?;
        let s = &self.settings;

        let mut rng = Pcg32::seed_from_u64(seed);
        let noise = PerlinNoise::new(seed);

        let foliage = self.foliage_vertices(&mut rng, &noise)?;
        let centroid = foliage.iter().fold(Vector3::ZERO, |sum, &v| sum + v) / 12.0;

        let radius = rng.random_range(s.trunk_radius_min..s.trunk_radius_max);
        let top_radius = radius * s.trunk_taper;

        let mut base = [Vector3::ZERO; 4];
        let mut top = [Vector3::ZERO; 4];
        for (i, &(cx, cz)) in TRUNK_CORNERS.iter().enumerate() {
            base[i] = Vector3::new(cx * radius, 0.0, cz * radius);
            top[i] = centroid + Vector3::new(cx * top_radius, 0.0, cz * top_radius);
        }
        for corner in base.iter_mut().chain(top.iter_mut()) {
            corner.x += rng.random_range(-s.trunk_jitter..=s.trunk_jitter);
            corner.z += rng.random_range(-s.trunk_jitter..=s.trunk_jitter);
        }

        let mut trunk = Vec::with_capacity(8);
        for i in 0..4 {
            let j = (i + 1) % 4;
            trunk.push(Triangle::new(base[i], base[j], top[j]));
            trunk.push(Triangle::new(base[i], top[j], top[i]));
        }

        let mesh = Mesh::from_triangles(&triangles_from(&foliage), FOLIAGE_COLOR)
            .merge(Mesh::from_triangles(&trunk, TRUNK_COLOR))?;

        log::debug!(
            "Built tree {}: trunk radius {:.3}, foliage centroid {}, {} triangles",
            seed,
            radius,
            centroid,
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    fn foliage_vertices(&self, rng: &mut Pcg32, noise: &PerlinNoise) -> Result<[Vector3; 12]> {
        let s = &self.settings;
        let mut vertices = *Icosahedron::new(s.foliage_radius)?.vertices();
        let height = s.min_height + rng.random::<f32>() * s.height_variation;

        for vertex in vertices.iter_mut() {
            let direction = vertex.normalize()?;
            let swell = noise.perlin(
                vertex.x as f64,
                vertex.y as f64,
                vertex.z as f64,
                s.noise_frequency,
            ) as f32;

            let jitter = Vector3::new(
                rng.random_range(-s.foliage_jitter..=s.foliage_jitter),
                rng.random_range(-s.foliage_jitter..=s.foliage_jitter),
                rng.random_range(-s.foliage_jitter..=s.foliage_jitter),
            );

            *vertex += jitter + direction * (swell * s.noise_swell);
            vertex.y += height;
        }
        Ok(vertices)
    }
}

/// Tree for `seed` with [`TreeSettings::default`].
pub fn build_tree_mesh(seed: u64) -> Result<Mesh> {
    TreeBuilder::default().build(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &Mesh) -> Vec<[u32; 3]> {
        mesh.vertices()
            .iter()
            .map(|v| v.position.to_array().map(f32::to_bits))
            .collect()
    }

    #[test]
    fn test_tree_counts() {
        let tree = build_tree_mesh(7).unwrap();
        assert_eq!(tree.triangle_count(), 28);
        assert_eq!(tree.vertex_count(), 84);
        let expected: Vec<u32> = (0..84).collect();
        assert_eq!(tree.indices(), expected.as_slice());
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = build_tree_mesh(1234).unwrap();
        let b = build_tree_mesh(1234).unwrap();
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = build_tree_mesh(1).unwrap();
        let b = build_tree_mesh(2).unwrap();
        assert_ne!(positions(&a), positions(&b));
    }

    #[test]
    fn test_colors_split_foliage_and_trunk() {
        let tree = build_tree_mesh(99).unwrap();
        let (foliage, trunk) = tree.vertices().split_at(60);
        assert!(foliage.iter().all(|v| v.color() == Some(FOLIAGE_COLOR)));
        assert!(trunk.iter().all(|v| v.color() == Some(TRUNK_COLOR)));
    }

    #[test]
    fn test_trunk_starts_on_ground() {
        let settings = TreeSettings::default();
        for seed in 0..16 {
            let tree = build_tree_mesh(seed).unwrap();
            let trunk = &tree.vertices()[60..];
            let lowest = trunk
                .iter()
                .map(|v| v.position.y)
                .fold(f32::INFINITY, f32::min);
            assert_eq!(lowest, 0.0);

            let highest = trunk
                .iter()
                .map(|v| v.position.y)
                .fold(f32::NEG_INFINITY, f32::max);
            assert!(highest >= settings.min_height - settings.foliage_jitter - settings.noise_swell);
        }
    }

    #[test]
    fn test_trunk_faces_point_outward() {
        for seed in 0..16 {
            let tree = build_tree_mesh(seed).unwrap();
            let top_center = {
                let foliage = &tree.vertices()[..60];
                // Every icosahedron vertex appears in exactly five faces.
                foliage.iter().fold(Vector3::ZERO, |sum, v| sum + v.position) / 60.0
            };
            for [a, _, _] in tree.triangles().skip(20) {
                let t = a.position.y / top_center.y;
                let axis = top_center * t;
                let outward = Vector3::new(a.position.x - axis.x, 0.0, a.position.z - axis.z);
                assert!(a.normal.dot(outward) > 0.0, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_foliage_stays_near_centroid() {
        let settings = TreeSettings::default();
        let tree = build_tree_mesh(5).unwrap();
        let foliage = &tree.vertices()[..60];
        let centroid = foliage.iter().fold(Vector3::ZERO, |sum, v| sum + v.position) / 60.0;
        let reach = settings.foliage_radius
            + 4.0 * settings.foliage_jitter
            + 2.0 * settings.noise_swell;
        for v in foliage {
            assert!(v.position.distance(centroid) < reach);
        }
    }

    #[test]
    fn test_foliage_is_lifted_as_one_cluster() {
        let settings = TreeSettings::default();
        let limit =
            2.0 * (settings.foliage_radius + settings.foliage_jitter + settings.noise_swell);
        for seed in 0..32 {
            let tree = build_tree_mesh(seed).unwrap();
            let heights: Vec<f32> = tree.vertices()[..60].iter().map(|v| v.position.y).collect();
            let lowest = heights.iter().copied().fold(f32::INFINITY, f32::min);
            let highest = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            assert!(highest - lowest <= limit, "seed {seed}: {}", highest - lowest);
            assert!(lowest >= settings.min_height - limit / 2.0, "seed {seed}");
        }
    }

    #[test]
    fn test_rejects_bad_settings() {
        let settings = TreeSettings {
            trunk_radius_min: 0.2,
            trunk_radius_max: 0.1,
            ..Default::default()
        };
        assert!(TreeBuilder::new(settings).build(0).is_err());

        let settings = TreeSettings {
            foliage_radius: 0.0,
            ..Default::default()
        };
        assert!(TreeBuilder::new(settings).build(0).is_err());
    }
}
