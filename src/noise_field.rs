//! Smooth scalar field over (x, y, time) that drives particle headings.
//!
//! Four octaves of Perlin noise with halving amplitude, remapped from the
//! generator's signed output into `[0, 1)`.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

pub struct NoiseField {
    noise: Fbm<Perlin>,
}

impl NoiseField {
    pub const OCTAVES: usize = 4;
    pub const FALLOFF: f64 = 0.5;
    // Fixed seed keeps the field stable for the whole session
    pub const SEED: u32 = 0;

    pub fn new() -> Self {
        Self::with_seed(Self::SEED)
    }

    pub fn with_seed(seed: u32) -> Self {
        let noise = Fbm::<Perlin>::new(seed)
            .set_octaves(Self::OCTAVES)
            .set_persistence(Self::FALLOFF);
        NoiseField { noise }
    }

    /// Sample the field. Always in `[0, 1)`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let raw = self.noise.get([x, y, z]);
        let value = (raw + 1.0) * 0.5;
        if value.is_nan() {
            return 0.0;
        }
        value.max(0.0).min(1.0 - f64::EPSILON)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        NoiseField::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_unit_interval() {
        let field = NoiseField::new();
        for i in 0..2000 {
            let x = i as f64 * 0.731;
            let y = i as f64 * -1.37;
            let v = field.sample(x, y, i as f64 * 0.003);
            assert!(v >= 0.0 && v < 1.0, "sample {} out of range", v);
        }
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let a = NoiseField::new();
        let b = NoiseField::new();
        assert_eq!(a.sample(1.25, 3.5, 0.3), b.sample(1.25, 3.5, 0.3));
    }

    #[test]
    fn small_steps_give_small_changes() {
        let field = NoiseField::new();
        let mut x = 0.1;
        let mut prev = field.sample(x, 0.4, 0.0);
        for _ in 0..500 {
            x += 0.0016;
            let next = field.sample(x, 0.4, 0.0);
            assert!((next - prev).abs() < 0.05);
            prev = next;
        }
    }
}
