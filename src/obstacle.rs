// Circular obstacle the flow particles steer around. One per wheel,
// rebuilt whenever the wheel layout is regenerated.

use crate::palette::Palette;

extern crate nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub pos: [f64; 2],
    pub radius: f64,
    pub palette: Palette,
}

impl Obstacle {
    pub fn new(pos: [f64; 2], radius: f64, palette: Palette) -> Self {
        Obstacle {
            pos,
            radius,
            palette,
        }
    }

    // Used by respawning to keep new particles off the wheels
    pub fn is_point_inside(&self, point: [f64; 2], radius_scale: f64) -> bool {
        let delta = glm::vec2(point[0] - self.pos[0], point[1] - self.pos[1]);
        glm::length(&delta) < self.radius * radius_scale
    }

    // Canvas coordinates of each side of the box centered on the obstacle,
    // half size radius * radius_scale
    pub fn get_rect(&self, radius_scale: f64) -> (f64, f64, f64, f64) {
        let half = self.radius * radius_scale;
        let left = self.pos[0] - half;
        let top = self.pos[1] - half;
        let right = self.pos[0] + half;
        let bottom = self.pos[1] + half;
        (left, top, right, bottom)
    }

    pub fn rect_contains(&self, point: [f64; 2], radius_scale: f64) -> bool {
        let (left, top, right, bottom) = self.get_rect(radius_scale);
        point[0] >= left && point[0] <= right && point[1] >= top && point[1] <= bottom
    }

    pub fn distance_squared(&self, point: [f64; 2]) -> f64 {
        vecmath::vec2_square_len(vecmath::vec2_sub(point, self.pos))
    }
}

/// Index of the obstacle whose box (center ± radius * search_scale) holds
/// `point` and whose center is closest to it, with that squared distance.
pub fn nearest(obstacles: &[Obstacle], point: [f64; 2], search_scale: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, obstacle) in obstacles.iter().enumerate() {
        if !obstacle.rect_contains(point, search_scale) {
            continue;
        }
        let d2 = obstacle.distance_squared(point);
        match best {
            Some((_, best_d2)) if best_d2 <= d2 => {}
            _ => best = Some((i, d2)),
        }
    }
    best
}
