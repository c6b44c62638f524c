//! Coherent noise field sampled once per grid cell per frame.
//!
//! The field is three dimensional: two spatial axes plus frame time, so a
//! fixed cell keeps drifting as frames elapse.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::config::{
    MAX_ENTROPY, MAX_HUE, NOISE_FALLOFF, NOISE_OCTAVES, NOISE_SCALE, NOISE_TIME_SCALE,
    OFFSET_SCALE, ROTATION_SCALE,
};

/// Fractal Perlin noise normalized to `[0, 1]`
pub struct NoiseField {
    noise: Fbm<Perlin>,
    seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        let noise = Fbm::<Perlin>::new(seed)
            .set_octaves(NOISE_OCTAVES)
            .set_frequency(1.0)
            .set_lacunarity(2.0)
            .set_persistence(NOISE_FALLOFF);

        Self { noise, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw field value at an arbitrary point
    pub fn get(&self, x: f64, y: f64, z: f64) -> f64 {
        let raw = self.noise.get([x, y, z]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Field value for the cell at canvas position `(x, y)` on a given frame
    pub fn sample(&self, x: f64, y: f64, frame: u64) -> f64 {
        self.get(x * NOISE_SCALE, y * NOISE_SCALE, frame as f64 * NOISE_TIME_SCALE)
    }
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Offset shared by both translation axes and the rotation.
/// Collapses to zero at zero entropy whatever the noise value.
pub fn offset(noise: f64, entropy: f64) -> f64 {
    let reach = entropy * OFFSET_SCALE;
    map_range(noise, 0.0, 1.0, -reach, reach)
}

/// Rotation in radians; grows with both offset and entropy
pub fn rotation(offset: f64, entropy: f64) -> f64 {
    offset * ROTATION_SCALE * entropy
}

/// Hue in degrees, linear in entropy
pub fn hue(entropy: f64) -> f64 {
    map_range(entropy, 0.0, MAX_ENTROPY, 0.0, MAX_HUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_in_unit_range() {
        let field = NoiseField::new(7);
        for frame in [1u64, 60, 600, 6000] {
            for i in 0..40 {
                for j in 0..40 {
                    let n = field.sample(i as f64 * 30.0, j as f64 * 30.0, frame);
                    assert!((0.0..=1.0).contains(&n), "sample out of range: {}", n);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..20 {
            let x = i as f64 * 17.0;
            assert_eq!(a.sample(x, x * 0.5, i), b.sample(x, x * 0.5, i));
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_field_is_smooth() {
        let field = NoiseField::new(3);
        let mut max_step = 0.0f64;
        let mut prev = field.get(0.0, 0.37, 0.11);
        for i in 1..1000 {
            let t = i as f64 * 0.001;
            let next = field.get(t, 0.37, 0.11);
            max_step = max_step.max((next - prev).abs());
            prev = next;
        }
        assert!(max_step < 0.05, "adjacent samples jump by {}", max_step);
    }

    #[test]
    fn test_field_varies() {
        let field = NoiseField::new(11);
        let first = field.sample(0.0, 0.0, 1);
        let differs = (0..50).any(|i| (field.sample(i as f64 * 30.0, 45.0, 1) - first).abs() > 1e-3);
        assert!(differs, "noise field is flat");
    }

    #[test]
    fn test_offset_zero_at_zero_entropy() {
        for n in [0.0, 0.1, 0.5, 0.9, 1.0] {
            assert_eq!(offset(n, 0.0), 0.0);
            assert_eq!(rotation(offset(n, 0.0), 0.0), 0.0);
        }
    }

    #[test]
    fn test_offset_spans_entropy_range() {
        assert_eq!(offset(0.0, 2.0), -20.0);
        assert_eq!(offset(0.5, 2.0), 0.0);
        assert_eq!(offset(1.0, 2.0), 20.0);
        assert_eq!(offset(1.0, MAX_ENTROPY), 50.0);
    }

    #[test]
    fn test_rotation_couples_offset_and_entropy() {
        assert!((rotation(50.0, 5.0) - 2.5).abs() < 1e-12);
        assert!((rotation(-20.0, 2.0) + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_hue_linear_in_entropy() {
        assert_eq!(hue(0.0), 0.0);
        assert_eq!(hue(MAX_ENTROPY), 360.0);
        assert_eq!(hue(2.5), 180.0);

        let mut prev = hue(0.0);
        for i in 1..=50 {
            let h = hue(i as f64 * 0.1);
            assert!(h > prev);
            prev = h;
        }
    }
}
