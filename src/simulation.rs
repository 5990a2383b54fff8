//! The particle pool and the shared state every particle reads while it
//! steps: noise time, global speed multiplier and stroke thickness.

use crate::config::FlowConfig;
use crate::noise_field::NoiseField;
use crate::obstacle::Obstacle;
use crate::particle::{Particle, Segment};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds { width, height }
    }

    /// Whether `point` lies in the canvas grown by `margin` on every side.
    pub fn contains(&self, point: Vector2<f64>, margin: f64) -> bool {
        point[0] >= -margin
            && point[0] <= self.width + margin
            && point[1] >= -margin
            && point[1] <= self.height + margin
    }
}

/// Read-only view handed to each particle for one tick.
pub struct StepContext<'a> {
    pub config: &'a FlowConfig,
    pub obstacles: &'a [Obstacle],
    pub noise: &'a NoiseField,
    pub bounds: Bounds,
    pub time: f64,
    pub speed_multiplier: f64,
    pub thickness: f64,
}

pub struct FlowSimulation {
    config: FlowConfig,
    bounds: Bounds,
    obstacles: Vec<Obstacle>,
    noise: NoiseField,
    particles: Vec<Particle>,
    segments: Vec<Segment>,
    time: f64,
    speed_multiplier: f64,
    thickness: f64,
    rng: StdRng,
}

impl FlowSimulation {
    pub fn new(config: FlowConfig, bounds: Bounds, obstacles: Vec<Obstacle>) -> Self {
        Self::with_rng(config, bounds, obstacles, StdRng::from_entropy())
    }

    pub fn with_rng(config: FlowConfig, bounds: Bounds, obstacles: Vec<Obstacle>, rng: StdRng) -> Self {
        let speed_multiplier = config.base_speed;
        let thickness = config.thickness.max(config.min_thickness);
        let mut simulation = FlowSimulation {
            config,
            bounds,
            obstacles,
            noise: NoiseField::new(),
            particles: Vec::new(),
            segments: Vec::new(),
            time: 0.0,
            speed_multiplier,
            thickness,
            rng,
        };
        simulation.spawn_particles();
        simulation
    }

    /// Throw away every particle and spawn a fresh pool against the new
    /// canvas size and obstacle set. Tunables and noise time carry over.
    pub fn reinitialize(&mut self, bounds: Bounds, obstacles: Vec<Obstacle>) {
        self.bounds = bounds;
        self.obstacles = obstacles;
        self.spawn_particles();
    }

    fn spawn_particles(&mut self) {
        let ctx = StepContext {
            config: &self.config,
            obstacles: &self.obstacles,
            noise: &self.noise,
            bounds: self.bounds,
            time: self.time,
            speed_multiplier: self.speed_multiplier,
            thickness: self.thickness,
        };
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.reserve(ctx.config.particle_count);
        for _ in 0..ctx.config.particle_count {
            self.particles.push(Particle::spawn(&ctx, rng));
        }
        self.segments.clear();
        self.segments.reserve(ctx.config.particle_count);
    }

    /// Advance the field one frame and step every particle. The returned
    /// segments are in pool order and only valid until the next tick.
    pub fn tick(&mut self) -> &[Segment] {
        self.time += self.config.time_step;
        self.segments.clear();

        let ctx = StepContext {
            config: &self.config,
            obstacles: &self.obstacles,
            noise: &self.noise,
            bounds: self.bounds,
            time: self.time,
            speed_multiplier: self.speed_multiplier,
            thickness: self.thickness,
        };
        let rng = &mut self.rng;
        for particle in self.particles.iter_mut() {
            if let Some(segment) = particle.step(&ctx, rng) {
                self.segments.push(segment);
            }
        }
        &self.segments
    }

    /// Scale the global multiplier and every live particle's speed by
    /// `factor`. Non-positive or non-finite factors are ignored.
    pub fn set_speed_multiplier(&mut self, factor: f64) -> f64 {
        if !(factor.is_finite() && factor > 0.0) {
            return self.speed_multiplier;
        }
        self.speed_multiplier *= factor;
        for particle in self.particles.iter_mut() {
            particle.speed *= factor;
        }
        self.speed_multiplier
    }

    pub fn increase_speed(&mut self) -> f64 {
        self.set_speed_multiplier(self.config.speed_step_up)
    }

    pub fn decrease_speed(&mut self) -> f64 {
        self.set_speed_multiplier(self.config.speed_step_down)
    }

    pub fn adjust_thickness(&mut self, delta: f64) -> f64 {
        self.thickness = (self.thickness + delta).max(self.config.min_thickness);
        self.thickness
    }

    pub fn increase_thickness(&mut self) -> f64 {
        self.adjust_thickness(self.config.thickness_step)
    }

    pub fn decrease_thickness(&mut self) -> f64 {
        self.adjust_thickness(-self.config.thickness_step)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    // Segments produced by the last tick
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTES;

    fn obstacles() -> Vec<Obstacle> {
        vec![
            Obstacle::new([200.0, 200.0], 60.0, PALETTES[0]),
            Obstacle::new([420.0, 300.0], 70.0, PALETTES[5]),
            Obstacle::new([650.0, 150.0], 55.0, PALETTES[8]),
            Obstacle::new([700.0, 500.0], 65.0, PALETTES[2]),
        ]
    }

    fn simulation(particle_count: usize, obstacles: Vec<Obstacle>) -> FlowSimulation {
        let config = FlowConfig {
            particle_count,
            ..FlowConfig::default()
        };
        FlowSimulation::with_rng(
            config,
            Bounds::new(800.0, 600.0),
            obstacles,
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn bounds_contains_respects_margin() {
        let bounds = Bounds::new(100.0, 50.0);
        assert!(bounds.contains([-20.0, 70.0], 20.0));
        assert!(!bounds.contains([-20.5, 10.0], 20.0));
        assert!(!bounds.contains([10.0, 70.5], 20.0));
    }

    #[test]
    fn pool_has_fixed_size() {
        let mut sim = simulation(300, obstacles());
        assert_eq!(sim.particles().len(), 300);
        for _ in 0..100 {
            let drawn = sim.tick().len();
            assert!(drawn <= 300);
            assert_eq!(sim.segments().len(), drawn);
        }
        assert_eq!(sim.particles().len(), 300);
    }

    #[test]
    fn time_advances_each_tick() {
        let mut sim = simulation(10, Vec::new());
        let mut last = sim.time();
        for _ in 0..20 {
            sim.tick();
            assert!(sim.time() > last);
            last = sim.time();
        }
        assert!((sim.time() - 20.0 * 0.003).abs() < 1e-12);
    }

    #[test]
    fn particles_stay_valid_over_many_ticks() {
        let mut sim = simulation(400, obstacles());
        for _ in 0..600 {
            let margin = sim.config().exit_margin;
            let bounds = sim.bounds();
            for segment in sim.tick() {
                assert!(bounds.contains(segment.to, margin));
                assert_eq!(segment.thickness, 5.0);
            }
            for p in sim.particles() {
                assert!(p.speed > 0.0);
                assert!(p.pos[0].is_finite() && p.pos[1].is_finite());
            }
        }
    }

    #[test]
    fn empty_obstacle_set_is_fine() {
        let mut sim = simulation(200, Vec::new());
        for _ in 0..200 {
            sim.tick();
        }
        assert!(sim.particles().iter().all(|p| p.speed > 0.0));
    }

    #[test]
    fn speed_round_trip_restores_particle_speeds() {
        let mut sim = simulation(100, obstacles());
        sim.tick();
        let before: Vec<f64> = sim.particles().iter().map(|p| p.speed).collect();
        sim.set_speed_multiplier(1.2);
        sim.set_speed_multiplier(1.0 / 1.2);
        for (p, speed) in sim.particles().iter().zip(before.iter()) {
            assert!((p.speed - speed).abs() < 1e-9);
        }
        assert!((sim.speed_multiplier() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn speed_steps_scale_live_particles() {
        let mut sim = simulation(50, Vec::new());
        let before: Vec<f64> = sim.particles().iter().map(|p| p.speed).collect();
        assert!((sim.increase_speed() - 4.8).abs() < 1e-9);
        for (p, speed) in sim.particles().iter().zip(before.iter()) {
            assert!((p.speed - speed * 1.2).abs() < 1e-9);
        }
        assert!((sim.decrease_speed() - 3.84).abs() < 1e-9);
    }

    #[test]
    fn bad_speed_factor_is_ignored() {
        let mut sim = simulation(10, Vec::new());
        sim.set_speed_multiplier(0.0);
        sim.set_speed_multiplier(-2.0);
        sim.set_speed_multiplier(f64::NAN);
        assert_eq!(sim.speed_multiplier(), 4.0);
        assert!(sim.particles().iter().all(|p| p.speed > 0.0));
    }

    #[test]
    fn thickness_has_a_floor() {
        let mut sim = simulation(1, Vec::new());
        assert_eq!(sim.increase_thickness(), 5.5);
        for _ in 0..20 {
            sim.decrease_thickness();
        }
        assert_eq!(sim.thickness(), 0.5);
        assert_eq!(sim.adjust_thickness(-3.0), 0.5);
        assert_eq!(sim.adjust_thickness(1.0), 1.5);
    }

    #[test]
    fn new_particles_use_current_multiplier() {
        let mut sim = simulation(100, Vec::new());
        sim.increase_speed();
        sim.reinitialize(Bounds::new(400.0, 300.0), obstacles());
        let m = sim.speed_multiplier();
        for p in sim.particles() {
            assert!(p.speed >= 0.7 * m && p.speed <= 1.5 * m);
        }
        assert_eq!(sim.obstacles().len(), 4);
        assert_eq!(sim.bounds(), Bounds::new(400.0, 300.0));
    }
}
