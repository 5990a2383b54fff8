// Tunables for the flow field and the particle pool. The defaults give the
// intended look at a 1000 particle pool.

use crate::color::Color;

#[derive(Clone, Debug)]
pub struct FlowConfig {
    pub particle_count: usize,
    // Starting value of the global speed multiplier
    pub base_speed: f64,
    // Scale applied to positions before sampling the noise field
    pub flow_scale: f64,
    pub thickness: f64,
    pub min_thickness: f64,
    pub thickness_step: f64,
    pub speed_step_up: f64,
    pub speed_step_down: f64,
    // How far the noise field's time coordinate moves per tick
    pub time_step: f64,
    // Outer influence ring = radius * radius_factor
    pub radius_factor: f64,
    // Inner (push-out) ring = radius * inner_factor
    pub inner_factor: f64,
    // Half size of the bounding box used by the nearest obstacle search
    pub search_factor: f64,
    // Respawns avoid points within radius * spawn_clearance of any obstacle
    pub spawn_clearance: f64,
    pub spawn_attempts: u32,
    pub spawn_margin: f64,
    pub exit_margin: f64,
    pub trail_fade: u8,
    pub background: Color,
}

impl FlowConfig {
    pub const MIN_SPAWN_SPEED: f64 = 0.7;
    pub const MAX_SPAWN_SPEED: f64 = 1.5;
    pub const MIN_ALPHA: f64 = 90.0;
    pub const MAX_ALPHA: f64 = 190.0;
}

impl Default for FlowConfig {
    fn default() -> Self {
        FlowConfig {
            particle_count: 1000,
            base_speed: 4.0,
            flow_scale: 0.0016,
            thickness: 5.0,
            min_thickness: 0.5,
            thickness_step: 0.5,
            speed_step_up: 1.2,
            speed_step_down: 0.8,
            time_step: 0.003,
            radius_factor: 2.0,
            inner_factor: 0.95,
            search_factor: 1.6,
            spawn_clearance: 1.4,
            spawn_attempts: 20,
            spawn_margin: 10.0,
            exit_margin: 20.0,
            trail_fade: 18,
            background: Color::rgb(4, 87, 131),
        }
    }
}
