//! Canvas 2D implementation of the render scene contract.
//!
//! Draws the record collections onto an HTML canvas: lines first, points
//! over them, glyphs on top. The view box is mapped onto the surface with
//! a centered uniform scale, so record coordinates and font sizes stay in
//! world units.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::collections::{LineRecord, PointRecord, TextRecord};
use super::scene::{Frame, RenderScene, ViewBox};

/// Point radius in world units at size 1.0.
const POINT_RADIUS: f32 = 0.5;
/// Line width in world units.
const LINE_WIDTH: f64 = 0.15;

/// Format a packed 0xRRGGBBAA color as a CSS rgba() string.
fn css_rgba(color: u32) -> String {
	let r = (color >> 24) & 0xff;
	let g = (color >> 16) & 0xff;
	let b = (color >> 8) & 0xff;
	let a = (color & 0xff) as f64 / 255.0;
	format!("rgba({}, {}, {}, {})", r, g, b, a)
}

/// Renders record collections onto an HTML canvas.
pub struct CanvasScene {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	clear_color: [f32; 4],
	view: ViewBox,
	disposed: bool,
}

impl CanvasScene {
	/// Wrap a canvas element; `None` when no 2D context is available.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		Some(Self {
			canvas,
			ctx,
			clear_color: [0.0, 0.0, 0.0, 1.0],
			view: ViewBox::centered(1.0),
			disposed: false,
		})
	}

	/// Translation and uniform scale mapping the view box onto the canvas.
	fn transform(&self) -> (f64, f64, f64) {
		let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
		let k = (w / self.view.width() as f64).min(h / self.view.height() as f64);
		let cx = (self.view.left + self.view.right) as f64 / 2.0;
		let cy = (self.view.top + self.view.bottom) as f64 / 2.0;
		(w / 2.0 - cx * k, h / 2.0 - cy * k, k)
	}

	fn draw_line(&self, line: &LineRecord) {
		self.ctx.set_stroke_style_str(&css_rgba(line.color));
		self.ctx.set_line_width(LINE_WIDTH);
		self.ctx.begin_path();
		self.ctx.move_to(line.from[0] as f64, line.from[1] as f64);
		self.ctx.line_to(line.to[0] as f64, line.to[1] as f64);
		self.ctx.stroke();
	}

	fn draw_point(&self, point: &PointRecord) {
		self.ctx.set_fill_style_str(&css_rgba(point.color));
		self.ctx.begin_path();
		let _ = self.ctx.arc(
			point.position[0] as f64,
			point.position[1] as f64,
			(point.size * POINT_RADIUS) as f64,
			0.0,
			PI * 2.0,
		);
		self.ctx.fill();
	}

	fn draw_glyph(&self, glyph: &TextRecord) {
		self.ctx.set_fill_style_str(&css_rgba(glyph.color));
		self.ctx.set_font(&format!("{}px sans-serif", glyph.font_size));
		let _ = self.ctx.fill_text(&glyph.text, glyph.x as f64, glyph.y as f64);
	}
}

impl RenderScene for CanvasScene {
	fn set_clear_color(&mut self, rgba: [f32; 4]) {
		self.clear_color = rgba;
	}

	fn set_view_box(&mut self, view: ViewBox) {
		self.view = view;
	}

	fn render_frame(&mut self, frame: Frame<'_>) {
		if self.disposed {
			return;
		}
		let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
		let [r, g, b, a] = self.clear_color;
		self.ctx.set_fill_style_str(&format!(
			"rgba({}, {}, {}, {})",
			(r * 255.0) as u8,
			(g * 255.0) as u8,
			(b * 255.0) as u8,
			a
		));
		self.ctx.fill_rect(0.0, 0.0, w, h);

		let (tx, ty, k) = self.transform();
		self.ctx.save();
		let _ = self.ctx.translate(tx, ty);
		let _ = self.ctx.scale(k, k);

		for line in frame.lines.iter() {
			self.draw_line(line);
		}
		for point in frame.points.iter() {
			self.draw_point(point);
		}
		for glyph in frame.text.iter() {
			self.draw_glyph(glyph);
		}

		self.ctx.restore();
	}

	fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;
		let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn packed_colors_format_as_css() {
		assert_eq!(css_rgba(0xff000080), "rgba(255, 0, 0, 0.5019607843137255)");
		assert_eq!(css_rgba(0xffffffff), "rgba(255, 255, 255, 1)");
	}
}
