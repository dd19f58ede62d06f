//! Tunable spinner parameters and the values derived from them.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::color::Rgba;
use crate::error::SpinnerError;

/// Shortest interval a timer is armed with. Faster cadences are clamped.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Longest interval a timer is armed with, so deadlines stay representable.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Derived value a setter invalidated.
///
/// The owner of the configuration is expected to recompute the named value
/// right after the setter returns.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Nothing derived depends on the field.
    Nothing,
    /// The bounding box (`side`) changed.
    Geometry,
    /// The tick interval changed and the rotation counter must restart at 0.
    Cadence,
}

/// All tunable parameters of a spinner.
///
/// Setters never reject a value. `roundness` is clamped to `[0, 100]`; every other
/// field is stored as given, so out-of-range geometry simply renders oddly. A cadence
/// that cannot drive a timer is caught by [`SpinnerConfig::tick_interval`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    color: Rgba,
    #[serde(deserialize_with = "deserialize_roundness")]
    roundness: f64,
    minimum_trail_opacity: f64,
    trail_fade_percentage: f64,
    revolutions_per_second: f64,
    number_of_lines: usize,
    line_length: f64,
    line_width: f64,
    inner_radius: f64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            color: Rgba::new(0, 0, 0, 1),
            roundness: 100.0,
            minimum_trail_opacity: std::f64::consts::PI,
            trail_fade_percentage: 80.0,
            revolutions_per_second: std::f64::consts::FRAC_PI_2,
            number_of_lines: 20,
            line_length: 10.0,
            line_width: 2.0,
            inner_radius: 10.0,
        }
    }
}

impl SpinnerConfig {
    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn roundness(&self) -> f64 {
        self.roundness
    }

    pub fn minimum_trail_opacity(&self) -> f64 {
        self.minimum_trail_opacity
    }

    pub fn trail_fade_percentage(&self) -> f64 {
        self.trail_fade_percentage
    }

    pub fn revolutions_per_second(&self) -> f64 {
        self.revolutions_per_second
    }

    pub fn number_of_lines(&self) -> usize {
        self.number_of_lines
    }

    pub fn line_length(&self) -> f64 {
        self.line_length
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn set_color(&mut self, color: Rgba) -> Recompute {
        self.color = color;
        Recompute::Nothing
    }

    /// Store the corner rounding, silently clipped to `[0, 100]`.
    pub fn set_roundness(&mut self, roundness: f64) -> Recompute {
        self.roundness = clamp_roundness(roundness);
        Recompute::Nothing
    }

    pub fn set_minimum_trail_opacity(&mut self, minimum_trail_opacity: f64) -> Recompute {
        self.minimum_trail_opacity = minimum_trail_opacity;
        Recompute::Nothing
    }

    pub fn set_trail_fade_percentage(&mut self, trail: f64) -> Recompute {
        self.trail_fade_percentage = trail;
        Recompute::Nothing
    }

    pub fn set_revolutions_per_second(&mut self, revolutions_per_second: f64) -> Recompute {
        self.revolutions_per_second = revolutions_per_second;
        Recompute::Cadence
    }

    pub fn set_number_of_lines(&mut self, lines: usize) -> Recompute {
        self.number_of_lines = lines;
        Recompute::Cadence
    }

    pub fn set_line_length(&mut self, length: f64) -> Recompute {
        self.line_length = length;
        Recompute::Geometry
    }

    pub fn set_line_width(&mut self, width: f64) -> Recompute {
        self.line_width = width;
        Recompute::Geometry
    }

    pub fn set_inner_radius(&mut self, radius: f64) -> Recompute {
        self.inner_radius = radius;
        Recompute::Geometry
    }

    /// Side length of the square the spinner occupies: `2 * (inner_radius + line_length)`.
    pub fn side(&self) -> f64 {
        2.0 * (self.inner_radius + self.line_length)
    }

    /// Interval between two ticks: `1000ms / (number_of_lines * revolutions_per_second)`.
    ///
    /// Fails when the product is not a positive finite number, since no timer can be
    /// armed with the resulting interval.
    pub fn tick_interval(&self) -> Result<Duration, SpinnerError> {
        let ticks_per_second = self.number_of_lines as f64 * self.revolutions_per_second;
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(SpinnerError::InvalidCadence {
                number_of_lines: self.number_of_lines,
                revolutions_per_second: self.revolutions_per_second,
            });
        }

        // `as` saturates, so absurdly slow cadences end up at u64::MAX nanoseconds.
        let interval = Duration::from_nanos((1e9 / ticks_per_second).round() as u64);
        Ok(interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL))
    }
}

fn clamp_roundness(roundness: f64) -> f64 {
    if roundness.is_nan() {
        0.0
    } else {
        roundness.clamp(0.0, 100.0)
    }
}

/// Settings files go through the same clamp as [`SpinnerConfig::set_roundness`].
fn deserialize_roundness<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_roundness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpinnerConfig::default();
        assert_eq!(config.color(), Rgba::new(0, 0, 0, 1));
        assert_eq!(config.roundness(), 100.0);
        assert_eq!(config.minimum_trail_opacity(), std::f64::consts::PI);
        assert_eq!(config.trail_fade_percentage(), 80.0);
        assert_eq!(config.revolutions_per_second(), std::f64::consts::FRAC_PI_2);
        assert_eq!(config.number_of_lines(), 20);
        assert_eq!(config.line_length(), 10.0);
        assert_eq!(config.line_width(), 2.0);
        assert_eq!(config.inner_radius(), 10.0);
    }

    #[test]
    fn test_roundness_clamps() {
        let mut config = SpinnerConfig::default();
        let _ = config.set_roundness(-5.0);
        assert_eq!(config.roundness(), 0.0);
        let _ = config.set_roundness(150.0);
        assert_eq!(config.roundness(), 100.0);
        let _ = config.set_roundness(70.0);
        assert_eq!(config.roundness(), 70.0);
    }

    #[test]
    fn test_setters_report_recompute() {
        let mut config = SpinnerConfig::default();
        assert_eq!(config.set_color(Rgba::rgb(1, 2, 3)), Recompute::Nothing);
        assert_eq!(config.set_trail_fade_percentage(50.0), Recompute::Nothing);
        assert_eq!(config.set_minimum_trail_opacity(10.0), Recompute::Nothing);
        assert_eq!(config.set_line_length(12.0), Recompute::Geometry);
        assert_eq!(config.set_line_width(3.0), Recompute::Geometry);
        assert_eq!(config.set_inner_radius(8.0), Recompute::Geometry);
        assert_eq!(config.set_number_of_lines(8), Recompute::Cadence);
        assert_eq!(config.set_revolutions_per_second(2.0), Recompute::Cadence);
    }

    #[test]
    fn test_permissive_setters_store_as_given() {
        let mut config = SpinnerConfig::default();
        let _ = config.set_line_length(-4.0);
        let _ = config.set_trail_fade_percentage(250.0);
        assert_eq!(config.line_length(), -4.0);
        assert_eq!(config.trail_fade_percentage(), 250.0);
    }

    #[test]
    fn test_side() {
        let mut config = SpinnerConfig::default();
        assert_eq!(config.side(), 40.0);
        let _ = config.set_inner_radius(10.0);
        let _ = config.set_line_length(15.0);
        assert_eq!(config.side(), 50.0);
    }

    #[test]
    fn test_tick_interval() {
        let mut config = SpinnerConfig::default();
        let _ = config.set_number_of_lines(20);
        let _ = config.set_revolutions_per_second(1.0);
        assert_eq!(config.tick_interval().unwrap(), Duration::from_millis(50));
    }

    #[test]
    fn test_tick_interval_rejects_zero_cadence() {
        let mut config = SpinnerConfig::default();
        let _ = config.set_number_of_lines(0);
        assert!(matches!(
            config.tick_interval(),
            Err(SpinnerError::InvalidCadence { number_of_lines: 0, .. })
        ));

        let _ = config.set_number_of_lines(12);
        let _ = config.set_revolutions_per_second(-1.0);
        assert!(config.tick_interval().is_err());

        let _ = config.set_revolutions_per_second(f64::NAN);
        assert!(config.tick_interval().is_err());
    }

    #[test]
    fn test_tick_interval_clamps_to_minimum() {
        let mut config = SpinnerConfig::default();
        let _ = config.set_number_of_lines(1000);
        let _ = config.set_revolutions_per_second(1000.0);
        assert_eq!(config.tick_interval().unwrap(), MIN_TICK_INTERVAL);
    }

    #[test]
    fn test_tick_interval_clamps_to_maximum() {
        let mut config = SpinnerConfig::default();
        let _ = config.set_number_of_lines(1);
        let _ = config.set_revolutions_per_second(1e-300);
        assert_eq!(config.tick_interval().unwrap(), MAX_TICK_INTERVAL);
    }

    #[test]
    fn test_deserialize_clamps_roundness() {
        let config: SpinnerConfig = serde_yaml::from_str("roundness: 150\n").unwrap();
        assert_eq!(config.roundness(), 100.0);
        let config: SpinnerConfig = serde_yaml::from_str("roundness: -3.5\n").unwrap();
        assert_eq!(config.roundness(), 0.0);
        let config: SpinnerConfig = serde_yaml::from_str("roundness: 55.5\n").unwrap();
        assert_eq!(config.roundness(), 55.5);
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: SpinnerConfig =
            serde_yaml::from_str("number_of_lines: 12\ncolor: '#510447'\n").unwrap();
        assert_eq!(config.number_of_lines(), 12);
        assert_eq!(config.color(), Rgba::rgb(0x51, 0x04, 0x47));
        assert_eq!(config.line_length(), 10.0);
    }
}
