// Keyboard bindings and the text shown on the control panel overlay.

use crate::simulation::FlowSimulation;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Faster,
    Slower,
    Thicker,
    Thinner,
}

impl Control {
    // Matches KeyboardEvent.key
    pub fn from_key(key: &str) -> Option<Control> {
        match key {
            "ArrowUp" => Some(Control::Faster),
            "ArrowDown" => Some(Control::Slower),
            "ArrowRight" => Some(Control::Thicker),
            "ArrowLeft" => Some(Control::Thinner),
            _ => None,
        }
    }

    /// Apply to the simulation, returns the line to log.
    pub fn apply(self, simulation: &mut FlowSimulation) -> String {
        match self {
            Control::Faster => format!("Speed: {:.2}", simulation.increase_speed()),
            Control::Slower => format!("Speed: {:.2}", simulation.decrease_speed()),
            Control::Thicker => format!("Thickness: {:.2}", simulation.increase_thickness()),
            Control::Thinner => format!("Thickness: {:.2}", simulation.decrease_thickness()),
        }
    }
}

pub fn panel_lines(speed: f64, thickness: f64) -> [String; 4] {
    [
        "Controls:".to_owned(),
        "\u{2191} / \u{2193}  \u{2013} Speed  + / -".to_owned(),
        "\u{2190} / \u{2192}  \u{2013} Thickness  - / +".to_owned(),
        format!("Speed: {:.2}   Thick: {:.1}", speed, thickness),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlowConfig;
    use crate::simulation::Bounds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulation() -> FlowSimulation {
        let config = FlowConfig {
            particle_count: 20,
            ..FlowConfig::default()
        };
        FlowSimulation::with_rng(config, Bounds::new(640.0, 480.0), Vec::new(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn arrow_keys_map_to_controls() {
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::Faster));
        assert_eq!(Control::from_key("ArrowDown"), Some(Control::Slower));
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::Thicker));
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::Thinner));
        assert_eq!(Control::from_key("a"), None);
    }

    #[test]
    fn apply_reports_new_values() {
        let mut sim = simulation();
        assert_eq!(Control::Faster.apply(&mut sim), "Speed: 4.80");
        assert_eq!(Control::Slower.apply(&mut sim), "Speed: 3.84");
        assert_eq!(Control::Thicker.apply(&mut sim), "Thickness: 5.50");
        assert_eq!(Control::Thinner.apply(&mut sim), "Thickness: 5.00");
    }

    #[test]
    fn panel_shows_current_values() {
        let lines = panel_lines(4.0, 5.0);
        assert_eq!(lines[0], "Controls:");
        assert_eq!(lines[3], "Speed: 4.00   Thick: 5.0");
    }
}
