mod utils;

pub mod color;
pub mod config;
pub mod controls;
pub mod noise_field;
pub mod obstacle;
pub mod palette;
pub mod particle;
pub mod renderer;
pub mod simulation;
pub mod wheel;

use config::FlowConfig;
use controls::Control;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::Renderer;
use simulation::{Bounds, FlowSimulation};
use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlCanvasElement};
use wheel::Wheel;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Wheels, flow particles and the control panel drawn onto one canvas.
// The page calls update() then render() once per animation frame and
// forwards keydown and resize events.
#[wasm_bindgen]
pub struct FlowCanvas {
    canvas: HtmlCanvasElement,
    renderer: Renderer,
    simulation: FlowSimulation,
    wheels: Vec<Wheel>,
    animate_wheels: bool,
    rng: StdRng,
}

#[wasm_bindgen]
impl FlowCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<FlowCanvas, JsValue> {
        FlowCanvas::with_config(canvas, FlowConfig::default())
    }

    pub fn with_particle_count(canvas: HtmlCanvasElement, particle_count: u32) -> Result<FlowCanvas, JsValue> {
        let config = FlowConfig {
            particle_count: particle_count as usize,
            ..FlowConfig::default()
        };
        FlowCanvas::with_config(canvas, config)
    }

    pub fn update(&mut self) {
        let _timer = Timer::new("FlowCanvas::update()");
        if self.animate_wheels {
            for wheel in &mut self.wheels {
                wheel.update();
            }
        }
        self.simulation.tick();
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let _timer = Timer::new("FlowCanvas::render()");
        let config = self.simulation.config();
        self.renderer.fade(config.background, config.trail_fade);
        {
            let _timer = Timer::new("draw wheels");
            self.renderer.render_wheels(&self.wheels)?;
        }
        {
            let _timer = Timer::new("draw segments");
            self.renderer.render_segments(self.simulation.segments());
        }
        self.renderer
            .render_control_panel(self.simulation.speed_multiplier(), self.simulation.thickness())
    }

    // Canvas size changed: rebuild the wheel layout and the whole particle pool
    pub fn resize(&mut self, width: u32, height: u32) {
        let _timer = Timer::new("FlowCanvas::resize");
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.renderer.resize(width as f64, height as f64);
        self.renderer.clear_screen(self.simulation.config().background);

        let bounds = Bounds::new(width as f64, height as f64);
        self.wheels = wheel::create_wheels(bounds.width, bounds.height, &mut self.rng);
        self.simulation
            .reinitialize(bounds, wheel::obstacles(&self.wheels));
    }

    // Takes KeyboardEvent.key, returns whether the key was bound
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.apply(control);
                true
            }
            None => false,
        }
    }

    pub fn increase_speed(&mut self) {
        self.apply(Control::Faster);
    }

    pub fn decrease_speed(&mut self) {
        self.apply(Control::Slower);
    }

    pub fn increase_thickness(&mut self) {
        self.apply(Control::Thicker);
    }

    pub fn decrease_thickness(&mut self) {
        self.apply(Control::Thinner);
    }

    pub fn set_animate_wheels(&mut self, animate: bool) {
        self.animate_wheels = animate;
    }

    pub fn speed(&self) -> f64 {
        self.simulation.speed_multiplier()
    }

    pub fn thickness(&self) -> f64 {
        self.simulation.thickness()
    }

    pub fn particle_count(&self) -> u32 {
        self.simulation.particles().len() as u32
    }

    pub fn wheel_count(&self) -> u32 {
        self.wheels.len() as u32
    }
}

impl FlowCanvas {
    fn with_config(canvas: HtmlCanvasElement, config: FlowConfig) -> Result<FlowCanvas, JsValue> {
        let renderer = Renderer::new(&canvas)?;
        renderer.clear_screen(config.background);

        let mut rng = StdRng::from_entropy();
        let bounds = Bounds::new(renderer.width, renderer.height);
        let wheels = wheel::create_wheels(bounds.width, bounds.height, &mut rng);
        let simulation = FlowSimulation::new(config, bounds, wheel::obstacles(&wheels));

        Ok(FlowCanvas {
            canvas,
            renderer,
            simulation,
            wheels,
            animate_wheels: true,
            rng,
        })
    }

    fn apply(&mut self, control: Control) {
        let message = control.apply(&mut self.simulation);
        console::log_1(&message.into());
    }
}
