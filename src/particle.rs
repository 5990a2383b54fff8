// Flow particle: follows the noise field, bends around nearby obstacles and
// respawns at the top-right band once it drifts off the canvas.

use crate::color::Color;
use crate::config::FlowConfig;
use crate::obstacle;
use crate::simulation::StepContext;
use rand::Rng;
use std::f64::consts::PI;
use vecmath::{vec2_add, vec2_dot, vec2_normalized, vec2_scale, vec2_sub, Vector2};

// Used when no obstacle is near, picked by thresholding the noise sample
pub const FALLBACK_COLORS: [Color; 3] = [
    Color::rgba(12, 122, 142, 110),
    Color::rgba(243, 117, 180, 160),
    Color::rgba(253, 186, 59, 170),
];

/// A line from where a particle started a step to where it ended it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub color: Color,
    pub thickness: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub prev: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub speed: f64,
}

impl Particle {
    // Full turns of heading covered by the [0, 1) noise range
    const HEADING_TURNS: f64 = 4.0;
    const SPAWN_DIRECTION: Vector2<f64> = [-1.0, 0.0];
    const MIN_TANGENT_PULL: f64 = 0.7;
    const PUSH_OUT_EXTRA: f64 = 0.5;

    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, speed: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            prev: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            speed,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(ctx: &StepContext, rng: &mut R) -> Particle {
        let mut particle = Particle::new(0.0, 0.0, 0.0, 0.0, 1.0);
        particle.reset(ctx, rng);
        particle
    }

    /// Move to a fresh spawn point in the top-right band, away from the
    /// obstacles when possible, and draw a new speed.
    pub fn reset<R: Rng + ?Sized>(&mut self, ctx: &StepContext, rng: &mut R) {
        let config = ctx.config;
        let mut candidate = spawn_candidate(ctx, rng);
        let mut attempts = 1;
        // After spawn_attempts the last candidate is kept wherever it landed
        while attempts < config.spawn_attempts && near_any_obstacle(ctx, candidate) {
            candidate = spawn_candidate(ctx, rng);
            attempts += 1;
        }

        self.pos = candidate;
        self.prev = candidate;
        self.speed = uniform(rng, FlowConfig::MIN_SPAWN_SPEED, FlowConfig::MAX_SPAWN_SPEED)
            * ctx.speed_multiplier;
        self.vel = vec2_scale(Self::SPAWN_DIRECTION, self.speed);
    }

    /// Noise sample at the current position and the heading it encodes,
    /// scaled to this particle's speed.
    pub fn base_velocity(&self, ctx: &StepContext) -> (f64, Vector2<f64>) {
        let scale = ctx.config.flow_scale;
        let n = ctx
            .noise
            .sample(self.pos[0] * scale, self.pos[1] * scale, ctx.time);
        let angle = n * 2.0 * PI * Self::HEADING_TURNS;
        (n, [angle.cos() * self.speed, angle.sin() * self.speed])
    }

    /// Advance one tick. Returns the segment to draw, or `None` when the
    /// particle left the canvas and was respawned instead.
    pub fn step<R: Rng + ?Sized>(&mut self, ctx: &StepContext, rng: &mut R) -> Option<Segment> {
        let config = ctx.config;
        self.prev = self.pos;

        let (n, base_vel) = self.base_velocity(ctx);
        let mut vel = base_vel;

        let nearest = obstacle::nearest(ctx.obstacles, self.pos, config.search_factor)
            .map(|(idx, d2)| (&ctx.obstacles[idx], d2.sqrt()));

        if let Some((obstacle, d)) = nearest {
            let outer = obstacle.radius * config.radius_factor;
            let inner = obstacle.radius * config.inner_factor;

            if d < outer {
                let radial = radial_direction(vec2_sub(self.pos, obstacle.pos), d);
                let mut tangent = [-radial[1], radial[0]];
                if vec2_dot(tangent, base_vel) < 0.0 {
                    tangent = vec2_scale(tangent, -1.0);
                }

                let weight = steering_weight(d, inner, outer);
                let heading = slerp(vec2_normalized(base_vel), tangent, weight);
                vel = vec2_scale(heading, self.speed);

                if d < inner {
                    let push = vec2_scale(radial, inner - d + Self::PUSH_OUT_EXTRA);
                    self.pos = vec2_add(self.pos, push);
                }
            }
        }

        // Never reverse against the last step, it flickers on wheel edges
        if vec2_dot(vel, self.vel) < 0.0 {
            vel = vec2_scale(vel, -1.0);
        }

        self.pos = vec2_add(self.pos, vel);
        self.vel = vel;

        if !ctx.bounds.contains(self.pos, config.exit_margin) {
            self.reset(ctx, rng);
            return None;
        }

        let color = match nearest {
            Some((obstacle, _)) => {
                let choices = obstacle.palette.flow_choices();
                let idx = (n * choices.len() as f64).floor() as usize % choices.len();
                choices[idx].with_alpha(self.alpha(ctx.speed_multiplier))
            }
            None => fallback_color(n),
        };

        Some(Segment {
            from: self.prev,
            to: self.pos,
            color,
            thickness: ctx.thickness,
        })
    }

    // Faster particles draw more opaque
    fn alpha(&self, speed_multiplier: f64) -> u8 {
        let low = FlowConfig::MIN_SPAWN_SPEED * speed_multiplier;
        let high = FlowConfig::MAX_SPAWN_SPEED * speed_multiplier;
        let t = (self.speed - low) / (high - low);
        let alpha = FlowConfig::MIN_ALPHA + t * (FlowConfig::MAX_ALPHA - FlowConfig::MIN_ALPHA);
        alpha.round().max(0.0).min(255.0) as u8
    }
}

/// Pull toward the tangent at distance `d` from an obstacle center:
/// 0.7 on the outer ring rising linearly to 1.0 at the inner ring.
pub fn steering_weight(d: f64, inner: f64, outer: f64) -> f64 {
    let t = ((outer - d) / (outer - inner)).max(0.0).min(1.0);
    Particle::MIN_TANGENT_PULL + (1.0 - Particle::MIN_TANGENT_PULL) * t
}

pub fn fallback_color(n: f64) -> Color {
    if n < 0.33 {
        FALLBACK_COLORS[0]
    } else if n < 0.66 {
        FALLBACK_COLORS[1]
    } else {
        FALLBACK_COLORS[2]
    }
}

// Spherical interpolation between two unit vectors
fn slerp(a: Vector2<f64>, b: Vector2<f64>, w: f64) -> Vector2<f64> {
    let cos_theta = vec2_dot(a, b).max(-1.0).min(1.0);
    let theta = cos_theta.acos();
    let sin_theta = theta.sin();
    if sin_theta.abs() < 1e-9 {
        return vec2_normalized(vec2_add(vec2_scale(a, 1.0 - w), vec2_scale(b, w)));
    }
    let wa = ((1.0 - w) * theta).sin() / sin_theta;
    let wb = (w * theta).sin() / sin_theta;
    vec2_add(vec2_scale(a, wa), vec2_scale(b, wb))
}

fn radial_direction(offset: Vector2<f64>, d: f64) -> Vector2<f64> {
    if d > f64::EPSILON {
        vec2_scale(offset, 1.0 / d)
    } else {
        // Dead center, any outward direction will do
        [0.0, -1.0]
    }
}

fn spawn_candidate<R: Rng + ?Sized>(ctx: &StepContext, rng: &mut R) -> Vector2<f64> {
    let margin = ctx.config.spawn_margin;
    let bounds = ctx.bounds;
    [
        bounds.width - uniform(rng, margin, bounds.width * 0.3),
        uniform(rng, -margin, bounds.height * 0.7),
    ]
}

fn near_any_obstacle(ctx: &StepContext, point: Vector2<f64>) -> bool {
    ctx.obstacles
        .iter()
        .any(|o| o.is_point_inside(point, ctx.config.spawn_clearance))
}

// Collapses to `low` on an empty range instead of panicking
fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}
