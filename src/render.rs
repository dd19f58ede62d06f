//! Frame renderer: per-line placement and fade, and the draw calls that paint them.

use crate::color::Rgba;
use crate::config::SpinnerConfig;

/// An axis-aligned rectangle in widget units (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `side` anchored at the origin.
    pub fn square(side: f64) -> Self {
        Self::new(0.0, 0.0, side, side)
    }
}

/// Drawing primitives the renderer needs from its host toolkit.
///
/// Transforms compose like a painter's: each call applies in the coordinate system
/// left by the previous ones, and `save`/`restore` push and pop the whole transform.
pub trait Surface {
    /// Reset `rect` to fully transparent.
    fn fill_transparent(&mut self, rect: RectF);

    fn set_antialiasing(&mut self, enabled: bool);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate clockwise (in a y-down system) by `degrees`.
    fn rotate(&mut self, degrees: f64);

    /// Fill `rect` with `color`, corners rounded by `x_radius`/`y_radius` percent of
    /// the rectangle's half width/height.
    fn fill_rounded_rect(&mut self, rect: RectF, x_radius: f64, y_radius: f64, color: Rgba);
}

/// Placement and color of one line of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpec {
    pub index: usize,
    /// Rotation from the reference axis, in degrees.
    pub angle: f64,
    /// Steps behind the lead line.
    pub distance: usize,
    pub color: Rgba,
}

/// Number of steps `current` trails behind `primary` going around `total_lines`.
///
/// Always in `[0, total_lines)` for in-range inputs.
pub fn line_distance(current: usize, primary: usize, total_lines: usize) -> usize {
    if total_lines == 0 {
        return 0;
    }
    (primary % total_lines + total_lines - current % total_lines) % total_lines
}

/// Distance past which trailing lines sit at the minimum opacity.
pub fn fade_threshold(total_lines: usize, trail_fade_percentage: f64) -> f64 {
    (total_lines.saturating_sub(1) as f64 * trail_fade_percentage / 100.0).ceil()
}

/// Alpha of a line `distance` steps behind the lead.
///
/// The lead line keeps `base_alpha` untouched. Trailing lines fade linearly towards
/// `minimum_trail_opacity / 100` over `threshold + 1` steps, then stay on that floor.
pub fn line_alpha(
    distance: usize,
    total_lines: usize,
    trail_fade_percentage: f64,
    minimum_trail_opacity: f64,
    base_alpha: f64,
) -> f64 {
    if distance == 0 {
        return base_alpha;
    }

    let min_alpha = minimum_trail_opacity / 100.0;
    let threshold = fade_threshold(total_lines, trail_fade_percentage);
    let alpha = if distance as f64 > threshold {
        min_alpha
    } else {
        let gradient = (base_alpha - min_alpha) / (threshold + 1.0);
        base_alpha - gradient * distance as f64
    };
    alpha.clamp(0.0, 1.0)
}

/// Color of a line `distance` steps behind the lead.
pub fn line_color(
    distance: usize,
    total_lines: usize,
    trail_fade_percentage: f64,
    minimum_trail_opacity: f64,
    color: Rgba,
) -> Rgba {
    if distance == 0 {
        return color;
    }
    color.with_alpha_f(line_alpha(
        distance,
        total_lines,
        trail_fade_percentage,
        minimum_trail_opacity,
        color.alpha_f(),
    ))
}

/// Compute every line of the frame whose lead line is `lead`.
pub fn frame_lines(config: &SpinnerConfig, lead: usize) -> Vec<LineSpec> {
    let total = config.number_of_lines();
    let lead = if lead >= total { 0 } else { lead };

    (0..total)
        .map(|index| {
            let distance = line_distance(index, lead, total);
            LineSpec {
                index,
                angle: 360.0 * index as f64 / total as f64,
                distance,
                color: line_color(
                    distance,
                    total,
                    config.trail_fade_percentage(),
                    config.minimum_trail_opacity(),
                    config.color(),
                ),
            }
        })
        .collect()
}

/// Paint one frame onto `surface`, which covers a square of side `config.side()`.
pub fn paint_frame<S: Surface + ?Sized>(surface: &mut S, config: &SpinnerConfig, lead: usize) {
    let center = config.inner_radius() + config.line_length();
    surface.fill_transparent(RectF::square(config.side()));
    surface.set_antialiasing(true);

    for line in frame_lines(config, lead) {
        surface.save();
        surface.translate(center, center);
        surface.rotate(line.angle);
        surface.translate(config.inner_radius(), 0.0);
        surface.fill_rounded_rect(
            RectF::new(
                0.0,
                -config.line_width() / 2.0,
                config.line_length(),
                config.line_width(),
            ),
            config.roundness(),
            config.roundness(),
            line.color,
        );
        surface.restore();
    }
}
