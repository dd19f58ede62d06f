//! A [`Surface`] that rasterizes onto a ratatui canvas.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};

use crate::color::Rgba;
use crate::render::{RectF, Surface};

/// 2D affine transform, mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    pub fn rotate(&mut self, degrees: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// One horizontal run of a filled shape, in the shape's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
}

/// Scan a rounded rectangle into horizontal spans `step` apart.
///
/// Radii are percentages of the half width / half height. Degenerate rectangles
/// produce no spans.
pub fn rounded_rect_spans(rect: RectF, x_radius: f64, y_radius: f64, step: f64) -> Vec<Span> {
    if rect.width <= 0.0 || rect.height <= 0.0 || step <= 0.0 {
        return Vec::new();
    }

    let rx = rect.width / 2.0 * x_radius.clamp(0.0, 100.0) / 100.0;
    let ry = rect.height / 2.0 * y_radius.clamp(0.0, 100.0) / 100.0;
    let inset = |y: f64| -> f64 {
        let from_edge = (y - rect.y).min(rect.y + rect.height - y);
        if ry <= 0.0 || from_edge >= ry {
            return 0.0;
        }
        let t = (ry - from_edge) / ry;
        rx * (1.0 - (1.0 - t * t).max(0.0).sqrt())
    };

    let rows = (rect.height / step).ceil().max(1.0) as usize;
    let pitch = rect.height / rows as f64;
    (0..rows)
        .map(|row| {
            let y = rect.y + pitch * (row as f64 + 0.5);
            let inset = inset(y);
            Span {
                y,
                x_start: rect.x + inset,
                x_end: rect.x + rect.width - inset,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Stroke {
    from: (f64, f64),
    to: (f64, f64),
    color: Rgba,
}

/// Paints a spinner frame onto a ratatui [`Canvas`].
///
/// Terminals have no alpha channel, so every fill is composited over `background`
/// when it is recorded. Coordinates are widget units with y pointing down; one unit
/// spans `1 / resolution` of a unit on screen, so fills are scanned at that pitch.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    side: f64,
    resolution: f64,
    background: Rgba,
    antialiasing: bool,
    transform: Affine,
    saved: Vec<Affine>,
    strokes: Vec<Stroke>,
}

impl CanvasSurface {
    pub fn new(background: Rgba, resolution: f64) -> Self {
        Self {
            side: 0.0,
            resolution: if resolution > 0.0 { resolution } else { 1.0 },
            background,
            antialiasing: false,
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            strokes: Vec::new(),
        }
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Colors recorded so far, already blended over the background.
    pub fn colors(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.strokes.iter().map(|s| s.color)
    }

    fn marker(&self) -> Marker {
        if self.antialiasing {
            Marker::Braille
        } else {
            Marker::HalfBlock
        }
    }
}

impl Surface for CanvasSurface {
    fn fill_transparent(&mut self, rect: RectF) {
        self.side = rect.width.max(rect.height).max(0.0);
        self.strokes.clear();
        self.transform = Affine::IDENTITY;
        self.saved.clear();
    }

    fn set_antialiasing(&mut self, enabled: bool) {
        self.antialiasing = enabled;
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.transform.rotate(degrees);
    }

    fn fill_rounded_rect(&mut self, rect: RectF, x_radius: f64, y_radius: f64, color: Rgba) {
        let color = color.over(self.background);
        let step = 1.0 / self.resolution;
        for span in rounded_rect_spans(rect, x_radius, y_radius, step) {
            self.strokes.push(Stroke {
                from: self.transform.map(span.x_start, span.y),
                to: self.transform.map(span.x_end, span.y),
                color,
            });
        }
    }
}

impl Widget for &CanvasSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let side = self.side;
        Canvas::default()
            .marker(self.marker())
            .background_color(self.background.into())
            .x_bounds([0.0, side])
            .y_bounds([0.0, side])
            .paint(|ctx| {
                for stroke in &self.strokes {
                    // Canvas y grows upwards.
                    ctx.draw(&CanvasLine::new(
                        stroke.from.0,
                        side - stroke.from.1,
                        stroke.to.0,
                        side - stroke.to.1,
                        stroke.color.into(),
                    ));
                }
            })
            .render(area, buf);
    }
}
