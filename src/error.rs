//! Error types for the spinner core.

/// Errors raised by the spinner core.
///
/// Every other parameter is clamped or tolerated, so the only failures are a
/// cadence that cannot drive a timer and a color string that cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpinnerError {
    /// `number_of_lines * revolutions_per_second` is zero, negative or not finite.
    #[error(
        "Invalid spinner cadence: {number_of_lines} lines at {revolutions_per_second} rev/s \
         does not yield a positive tick interval"
    )]
    InvalidCadence {
        number_of_lines: usize,
        revolutions_per_second: f64,
    },

    /// A color literal that is not `#rrggbb` or `#rrggbbaa`.
    #[error("Invalid color: {0} (expected #rrggbb or #rrggbbaa)")]
    InvalidColor(String),
}
