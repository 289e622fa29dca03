use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::{GeometryError, Result};

/// Largest magnitude [`PerlinNoise::perlin`] ever returns.
pub const PERLIN_LIMIT: f64 = 0.999_999_999;

/// Seeded improved Perlin noise (Ken Perlin, 2002).
///
/// Every instance owns its permutation table, so two generators never share
/// state and the same seed always produces the same field.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    seed: u64,
    permutation: [u8; 512],
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut base: Vec<u8> = (0..=255).collect();
        base.shuffle(&mut rng);

        let mut permutation = [0u8; 512];
        for (i, value) in permutation.iter_mut().enumerate() {
            *value = base[i & 255];
        }

        Self { seed, permutation }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The doubled permutation table; `permutation()[i] == permutation()[i + 256]`.
    pub fn permutation(&self) -> &[u8; 512] {
        &self.permutation
    }

    /// Noise value at `(x, y, z) * frequency`, strictly inside `(-1, 1)`.
    pub fn perlin(&self, x: f64, y: f64, z: f64, frequency: f64) -> f64 {
        let (x, y, z) = (x * frequency, y * frequency, z * frequency);

        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let zi = (zf as i64 & 255) as usize;

        let (x, y, z) = (x - xf, y - yf, z - zf);
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let p = |index: usize| self.permutation[index] as usize;
        let a = p(xi) + yi;
        let aa = p(a) + zi;
        let ab = p(a + 1) + zi;
        let b = p(xi + 1) + yi;
        let ba = p(b) + zi;
        let bb = p(b + 1) + zi;

        let value = lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p(aa), x, y, z), grad(p(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p(ab), x, y - 1.0, z),
                    grad(p(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p(aa + 1), x, y, z - 1.0),
                    grad(p(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p(ab + 1), x, y - 1.0, z - 1.0),
                    grad(p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        );

        if value.abs() >= 1.0 {
            PERLIN_LIMIT.copysign(value)
        } else {
            value
        }
    }

    /// Fractal sum of `octaves` Perlin layers. Each layer doubles the
    /// frequency and scales the amplitude by `persistence`; the sum is
    /// normalized by the total amplitude.
    #[allow(clippy::too_many_arguments)]
    pub fn octave_perlin(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: u32,
        persistence: f64,
        frequency: f64,
        amplitude: f64,
    ) -> Result<f64> {
        if octaves == 0 {
            return Err(GeometryError::invalid("octaves", "must be at least 1"));
        }

        let mut total = 0.0;
        let mut max_value = 0.0;
        let mut frequency = frequency;
        let mut amplitude = amplitude;

        for _ in 0..octaves {
            total += self.perlin(x, y, z, frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value == 0.0 || !max_value.is_finite() {
            return Err(GeometryError::invalid(
                "amplitude",
                format!("total amplitude {max_value} cannot normalize the sum"),
            ));
        }

        Ok(total / max_value)
    }
}

/// `6t^5 - 15t^4 + 10t^3`
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of 12 edge directions picked by the low 4 hash bits.
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_is_doubled_shuffle() {
        let noise = PerlinNoise::new(7);
        let table = noise.permutation();
        for i in 0..256 {
            assert_eq!(table[i], table[i + 256]);
        }
        let mut seen = [false; 256];
        for &value in &table[..256] {
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = PerlinNoise::new(1234);
        let b = PerlinNoise::new(1234);
        assert_eq!(a.permutation(), b.permutation());
        for i in 0..100 {
            let t = i as f64 * 0.173;
            assert_eq!(a.perlin(t, t * 0.5, -t, 1.3), b.perlin(t, t * 0.5, -t, 1.3));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PerlinNoise::new(1);
        let b = PerlinNoise::new(2);
        assert_ne!(a.permutation(), b.permutation());
    }

    #[test]
    fn test_output_strictly_inside_unit_range() {
        let noise = PerlinNoise::new(99);
        for i in 0..2000 {
            let t = i as f64 * 0.0137;
            let value = noise.perlin(t * 3.1, -t * 1.7, t * 0.9, 2.0);
            assert!(value > -1.0 && value < 1.0, "{value}");
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = PerlinNoise::new(5);
        assert_eq!(noise.perlin(1.0, 2.0, 3.0, 1.0), 0.0);
        assert_eq!(noise.perlin(-4.0, 0.0, 17.0, 1.0), 0.0);
    }

    #[test]
    fn test_continuous_in_z() {
        let noise = PerlinNoise::new(11);
        for i in 0..200 {
            let z = i as f64 * 0.05;
            let here = noise.perlin(0.3, 0.7, z, 1.0);
            let next = noise.perlin(0.3, 0.7, z + 1e-4, 1.0);
            assert!((here - next).abs() < 1e-2);
        }
    }

    #[test]
    fn test_octave_perlin_is_normalized() {
        let noise = PerlinNoise::new(3);
        for i in 0..200 {
            let t = i as f64 * 0.041;
            let value = noise.octave_perlin(t, t, t, 5, 0.5, 1.0, 1.0).unwrap();
            assert!(value > -1.0 && value < 1.0);
        }
    }

    #[test]
    fn test_octave_perlin_single_octave_matches_perlin() {
        let noise = PerlinNoise::new(8);
        let single = noise.octave_perlin(0.4, 1.2, 2.5, 1, 0.5, 2.0, 3.0).unwrap();
        assert!((single - noise.perlin(0.4, 1.2, 2.5, 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_octave_perlin_rejects_bad_parameters() {
        let noise = PerlinNoise::new(0);
        assert!(noise.octave_perlin(0.0, 0.0, 0.0, 0, 0.5, 1.0, 1.0).is_err());
        assert!(noise.octave_perlin(0.0, 0.0, 0.0, 3, 0.5, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_grad_directions() {
        assert_eq!(grad(0, 1.0, 2.0, 3.0), 3.0);
        assert_eq!(grad(3, 1.0, 2.0, 3.0), -3.0);
        assert_eq!(grad(12, 1.0, 2.0, 3.0), 3.0);
        assert_eq!(grad(15, 1.0, 2.0, 3.0), -5.0);
    }
}
