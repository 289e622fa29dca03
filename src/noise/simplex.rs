use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{GeometryError, Result};

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// One layer of Stefan Gustavson's simplex noise with its own seeded
/// permutation.
#[derive(Debug, Clone)]
pub struct SimplexNoiseOctave {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl SimplexNoiseOctave {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut base: Vec<u8> = (0..=255).collect();
        base.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = base[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }

        Self { perm, perm_mod12 }
    }

    #[inline]
    fn p(&self, index: usize) -> usize {
        self.perm[index] as usize
    }

    #[inline]
    fn gradient(&self, index: usize) -> &[f64; 3] {
        &GRAD3[self.perm_mod12[index] as usize]
    }

    pub fn noise_2d(&self, xin: f64, yin: f64) -> f64 {
        let f2 = 0.5 * (3.0_f64.sqrt() - 1.0);
        let g2 = (3.0 - 3.0_f64.sqrt()) / 6.0;

        // Skew into simplex cell space.
        let s = (xin + yin) * f2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let t = (i + j) * g2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let g0 = self.gradient(ii + self.p(jj));
        let g1 = self.gradient(ii + i1 + self.p(jj + j1));
        let g2v = self.gradient(ii + 1 + self.p(jj + 1));

        let corner = |g: &[f64; 3], x: f64, y: f64| {
            let t = 0.5 - x * x - y * y;
            if t < 0.0 {
                0.0
            } else {
                let t2 = t * t;
                t2 * t2 * (g[0] * x + g[1] * y)
            }
        };

        70.0 * (corner(g0, x0, y0) + corner(g1, x1, y1) + corner(g2v, x2, y2))
    }

    pub fn noise_3d(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        const F3: f64 = 1.0 / 3.0;
        const G3: f64 = 1.0 / 6.0;

        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        // Which of the six tetrahedra we are in.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;
        let g0 = self.gradient(ii + self.p(jj + self.p(kk)));
        let g1 = self.gradient(ii + i1 + self.p(jj + j1 + self.p(kk + k1)));
        let g2 = self.gradient(ii + i2 + self.p(jj + j2 + self.p(kk + k2)));
        let g3 = self.gradient(ii + 1 + self.p(jj + 1 + self.p(kk + 1)));

        let corner = |g: &[f64; 3], x: f64, y: f64, z: f64| {
            let t = 0.6 - x * x - y * y - z * z;
            if t < 0.0 {
                0.0
            } else {
                let t2 = t * t;
                t2 * t2 * (g[0] * x + g[1] * y + g[2] * z)
            }
        };

        32.0 * (corner(g0, x0, y0, z0)
            + corner(g1, x1, y1, z1)
            + corner(g2, x2, y2, z2)
            + corner(g3, x3, y3, z3))
    }
}

/// Multi-octave simplex noise.
///
/// The octave count is `ceil(log2(largest_feature))`. Octave `i` samples at
/// `coord / 2^i` with amplitude `persistence^(n - i)`, so the coarsest
/// layers carry the most weight when `persistence < 1`.
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    octaves: Vec<SimplexNoiseOctave>,
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
    largest_feature: f64,
    persistence: f64,
    seed: u64,
}

impl SimplexNoise {
    pub fn new(largest_feature: f64, persistence: f64, seed: u64) -> Result<Self> {
        if !largest_feature.is_finite() || largest_feature <= 1.0 {
            return Err(GeometryError::invalid(
                "largest_feature",
                format!("must be a finite value above 1, got {largest_feature}"),
            ));
        }
        if !persistence.is_finite() {
            return Err(GeometryError::invalid(
                "persistence",
                format!("must be finite, got {persistence}"),
            ));
        }

        let count = largest_feature.log2().ceil() as usize;
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut octaves = Vec::with_capacity(count);
        let mut frequencies = Vec::with_capacity(count);
        let mut amplitudes = Vec::with_capacity(count);
        for i in 0..count {
            octaves.push(SimplexNoiseOctave::new(rng.random::<u64>()));
            frequencies.push(2f64.powi(i as i32));
            amplitudes.push(persistence.powi((count - i) as i32));
        }

        log::trace!(
            "Simplex noise seed {} with {} octaves (largest feature {})",
            seed,
            count,
            largest_feature
        );

        Ok(Self {
            octaves,
            frequencies,
            amplitudes,
            largest_feature,
            persistence,
            seed,
        })
    }

    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }

    pub fn largest_feature(&self) -> f64 {
        self.largest_feature
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self.layers()
            .map(|(octave, frequency, amplitude)| {
                octave.noise_2d(x / frequency, y / frequency) * amplitude
            })
            .sum()
    }

    pub fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.layers()
            .map(|(octave, frequency, amplitude)| {
                octave.noise_3d(x / frequency, y / frequency, z / frequency) * amplitude
            })
            .sum()
    }

    fn layers(&self) -> impl Iterator<Item = (&SimplexNoiseOctave, f64, f64)> {
        self.octaves
            .iter()
            .zip(self.frequencies.iter().copied())
            .zip(self.amplitudes.iter().copied())
            .map(|((octave, frequency), amplitude)| (octave, frequency, amplitude))
    }
}
