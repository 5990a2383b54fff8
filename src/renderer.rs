// Renderer struct that handles canvas 2d calls: the trail wash, the wheels,
// the particle segments and the control panel overlay.

use crate::color::Color;
use crate::controls;
use crate::particle::Segment;
use crate::wheel::{PatternLayer, PatternStyle, Wheel};
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
    pub width: f64,
    pub height: f64,
}

impl Renderer {
    const PANEL_WIDTH: f64 = 230.0;
    const PANEL_HEIGHT: f64 = 80.0;
    const PANEL_MARGIN: f64 = 12.0;
    const PANEL_FILL: Color = Color::rgba(0, 0, 0, 160);

    // Grabs the 2d context from the canvas on the DOM
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        context.set_line_cap("round");

        Ok(Renderer {
            context,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        // Resizing a canvas resets its drawing state
        self.context.set_line_cap("round");
    }

    pub fn clear_screen(&self, background: Color) {
        self.context.set_fill_style_str(&background.to_css());
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
    }

    // Washes the last frame toward the background so segments leave trails
    pub fn fade(&self, background: Color, alpha: u8) {
        self.clear_screen(background.with_alpha(alpha));
    }

    pub fn render_segments(&self, segments: &[Segment]) {
        let ctx = &self.context;
        for segment in segments {
            ctx.set_stroke_style_str(&segment.color.to_css());
            ctx.set_line_width(segment.thickness);
            ctx.begin_path();
            ctx.move_to(segment.from[0], segment.from[1]);
            ctx.line_to(segment.to[0], segment.to[1]);
            ctx.stroke();
        }
    }

    pub fn render_wheels(&self, wheels: &[Wheel]) -> Result<(), JsValue> {
        for wheel in wheels {
            self.render_wheel(wheel)?;
        }
        Ok(())
    }

    fn render_wheel(&self, wheel: &Wheel) -> Result<(), JsValue> {
        let ctx = &self.context;
        let r = wheel.radius;
        let palette = &wheel.palette;
        let dot_colors = [palette.dots1, palette.dots2, palette.dots3];

        ctx.save();
        ctx.translate(wheel.pos[0], wheel.pos[1])?;
        let s = wheel.pulse_scale();
        ctx.scale(s, s)?;

        self.fill_circle(r, palette.outer)?;
        self.fill_circle(r * 0.95, palette.ring1)?;
        self.render_layer(wheel, &wheel.layers[0], dot_colors[0])?;

        self.fill_circle(r * 0.775, palette.ring2)?;
        self.render_layer(wheel, &wheel.layers[1], dot_colors[1])?;
        self.render_layer(wheel, &wheel.layers[2], dot_colors[2])?;

        self.fill_circle(r * 0.475, palette.ring3)?;

        ctx.save();
        ctx.rotate(wheel.inner.angle.to_radians())?;
        match wheel.inner.style {
            PatternStyle::Solid => self.fill_circle(r * 0.3, palette.inner)?,
            PatternStyle::Dots => {
                self.dot_ring(&wheel.inner, palette.dots3)?;
                self.fill_circle(r * 0.25, palette.inner)?;
            }
            PatternStyle::Rays => {
                self.rays(&wheel.inner, wheel.radius, palette.rays);
                self.fill_circle(r * 0.25, palette.inner)?;
            }
        }
        self.fill_circle(r * 0.16, palette.center)?;
        self.fill_circle(r * 0.06, Color::BLACK)?;
        ctx.restore();

        if wheel.has_tail {
            ctx.set_stroke_style_str(&palette.tail.to_css());
            ctx.set_line_width(r * 0.08);
            ctx.begin_path();
            ctx.move_to(0.0, 0.0);
            ctx.quadratic_curve_to(r * 0.7, -r * 0.5, r * 1.2, -r * 0.1);
            ctx.stroke();
        }

        ctx.restore();
        Ok(())
    }

    fn render_layer(&self, wheel: &Wheel, layer: &PatternLayer, dot_color: Color) -> Result<(), JsValue> {
        self.context.save();
        self.context.rotate(layer.angle.to_radians())?;
        match layer.style {
            PatternStyle::Dots => self.dot_ring(layer, dot_color)?,
            PatternStyle::Rays => self.rays(layer, wheel.radius, wheel.palette.rays),
            PatternStyle::Solid => {}
        }
        self.context.restore();
        Ok(())
    }

    fn dot_ring(&self, layer: &PatternLayer, color: Color) -> Result<(), JsValue> {
        self.context.set_fill_style_str(&color.to_css());
        for i in 0..layer.count {
            let a = (2.0 * PI / layer.count as f64) * i as f64;
            self.context.begin_path();
            self.context.arc(
                a.cos() * layer.radius,
                a.sin() * layer.radius,
                layer.dot_size / 2.0,
                0.0,
                2.0 * PI,
            )?;
            self.context.fill();
        }
        Ok(())
    }

    fn rays(&self, layer: &PatternLayer, wheel_radius: f64, color: Color) {
        let ctx = &self.context;
        ctx.set_stroke_style_str(&color.to_css());
        ctx.set_line_width(wheel_radius * 0.05);
        ctx.begin_path();
        for i in 0..layer.count {
            let a = (2.0 * PI / layer.count as f64) * i as f64;
            ctx.move_to(a.cos() * layer.radius * 0.4, a.sin() * layer.radius * 0.4);
            ctx.line_to(a.cos() * layer.radius, a.sin() * layer.radius);
        }
        ctx.stroke();
    }

    fn fill_circle(&self, radius: f64, color: Color) -> Result<(), JsValue> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        self.context.arc(0.0, 0.0, radius, 0.0, 2.0 * PI)?;
        self.context.fill();
        Ok(())
    }

    pub fn render_control_panel(&self, speed: f64, thickness: f64) -> Result<(), JsValue> {
        let ctx = &self.context;
        let x = Self::PANEL_MARGIN;
        let y = self.height - Self::PANEL_HEIGHT - Self::PANEL_MARGIN;

        ctx.save();
        ctx.set_fill_style_str(&Self::PANEL_FILL.to_css());
        ctx.fill_rect(x, y, Self::PANEL_WIDTH, Self::PANEL_HEIGHT);

        ctx.set_fill_style_str(&Color::WHITE.to_css());
        ctx.set_font("11px sans-serif");
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");

        let line_x = x + 10.0;
        let mut line_y = y + 8.0;
        // Gap after each line, the heading sits a little apart
        let gaps = [16.0, 14.0, 18.0, 0.0];
        for (line, gap) in controls::panel_lines(speed, thickness).iter().zip(gaps.iter()) {
            ctx.fill_text(line, line_x, line_y)?;
            line_y += gap;
        }
        ctx.restore();
        Ok(())
    }
}
