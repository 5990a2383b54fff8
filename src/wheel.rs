// Decorative wheels laid out on a tilted hex grid. Each wheel spins a few
// patterned rings and doubles as an obstacle for the flow particles.

use crate::obstacle::Obstacle;
use crate::palette::Palette;
use rand::Rng;

extern crate nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatternStyle {
    Dots,
    Rays,
    Solid,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatternLayer {
    pub radius: f64,
    pub dot_size: f64,
    pub count: u32,
    // Degrees
    pub angle: f64,
    pub speed: f64,
    pub style: PatternStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wheel {
    pub pos: [f64; 2],
    pub radius: f64,
    pub palette: Palette,
    pub has_tail: bool,
    pub pulse_phase: f64,
    pub pulse_speed: f64,
    pub pulse_amp: f64,
    pub layers: [PatternLayer; 3],
    pub inner: PatternLayer,
}

impl Wheel {
    pub const GRID_TILT_DEG: f64 = -12.0;
    pub const TAIL_CHANCE: f64 = 0.4;
    pub const DOTS_CHANCE: f64 = 0.75;

    pub fn new<R: Rng + ?Sized>(pos: [f64; 2], radius: f64, palette: Palette, rng: &mut R) -> Self {
        let r = radius;
        let layers = [
            PatternLayer {
                radius: r * 0.9,
                dot_size: r * rng.gen_range(0.1, 0.14),
                count: 30,
                angle: rng.gen_range(0.0, 360.0),
                speed: rng.gen_range(0.4, 0.8),
                style: dot_heavy_style(rng),
            },
            PatternLayer {
                radius: r * 0.75,
                dot_size: r * 0.12,
                count: 20,
                angle: rng.gen_range(0.0, 360.0),
                speed: rng.gen_range(-0.6, -0.3),
                style: dot_heavy_style(rng),
            },
            PatternLayer {
                radius: r * 0.55,
                dot_size: r * 0.10,
                count: 18,
                angle: rng.gen_range(0.0, 360.0),
                speed: rng.gen_range(0.2, 0.5),
                style: dot_heavy_style(rng),
            },
        ];
        let inner_style = match rng.gen_range(0, 3) {
            0 => PatternStyle::Solid,
            1 => PatternStyle::Dots,
            _ => PatternStyle::Rays,
        };
        let inner = PatternLayer {
            radius: r * 0.35,
            dot_size: r * 0.08,
            count: 30,
            angle: rng.gen_range(0.0, 360.0),
            speed: rng.gen_range(-0.7, 0.7),
            style: inner_style,
        };

        Wheel {
            pos,
            radius,
            palette,
            has_tail: rng.gen_bool(Self::TAIL_CHANCE),
            pulse_phase: rng.gen_range(0.0, 360.0),
            pulse_speed: rng.gen_range(0.1, 1.0),
            pulse_amp: rng.gen_range(0.05, 0.15),
            layers,
            inner,
        }
    }

    // Spin the rings and advance the pulse, one animation frame
    pub fn update(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.angle += layer.speed;
        }
        if self.inner.style != PatternStyle::Solid {
            self.inner.angle += self.inner.speed;
        }
        self.pulse_phase += self.pulse_speed;
    }

    pub fn pulse_scale(&self) -> f64 {
        1.0 + self.pulse_phase.to_radians().sin() * self.pulse_amp
    }

    // The particles steer around the resting radius, not the pulsing one
    pub fn obstacle(&self) -> Obstacle {
        Obstacle::new(self.pos, self.radius, self.palette)
    }
}

fn dot_heavy_style<R: Rng + ?Sized>(rng: &mut R) -> PatternStyle {
    if rng.gen_bool(Wheel::DOTS_CHANCE) {
        PatternStyle::Dots
    } else {
        PatternStyle::Rays
    }
}

/// Lay wheels over a hex grid that overhangs the canvas by one base radius
/// on every side, tilted about the canvas center.
pub fn create_wheels<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Vec<Wheel> {
    let base_r = width.min(height) / 10.0;
    if !(base_r > 0.0) {
        return Vec::new();
    }
    let spacing_x = base_r * 2.0;
    let spacing_y = base_r * 3f64.sqrt();

    let (start_x, start_y) = (-base_r, -base_r);
    let (end_x, end_y) = (width + base_r, height + base_r);
    let cols = ((end_x - start_x) / spacing_x).ceil() as usize + 1;
    let rows = ((end_y - start_y) / spacing_y).ceil() as usize + 1;

    let center = glm::vec2(width / 2.0, height / 2.0);
    let tilt = Wheel::GRID_TILT_DEG.to_radians();

    let mut wheels = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        let row_offset = if j % 2 == 0 { 0.0 } else { spacing_x / 2.0 };
        for i in 0..cols {
            let x = start_x + i as f64 * spacing_x + row_offset;
            let y = start_y + j as f64 * spacing_y;
            let r = (base_r * rng.gen_range(0.75, 0.9)).min(base_r);

            let rotated = center + glm::rotate_vec2(&(glm::vec2(x, y) - center), tilt);
            let palette = Palette::pick(rng);
            wheels.push(Wheel::new([rotated.x, rotated.y], r, palette, rng));
        }
    }
    wheels
}

pub fn obstacles(wheels: &[Wheel]) -> Vec<Obstacle> {
    wheels.iter().map(Wheel::obstacle).collect()
}
