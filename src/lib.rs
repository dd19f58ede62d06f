//! An animated "busy" indicator: radial lines rotating around a center, each faded
//! by its distance from the current lead line.
//!
//! - [`config`] holds the tunable parameters and the values derived from them
//! - [`clock`] is the periodic timer and rotation counter
//! - [`render`] computes each line's placement and fade and issues draw calls
//! - [`widget`] ties them to a [`widget::Host`] behind the public API
//! - [`terminal`] provides ratatui-based collaborators for the demo binary

pub mod app;
pub mod cli;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod logger;
pub mod render;
pub mod settings;
pub mod terminal;
pub mod widget;

pub use clock::{AnimationClock, ClockState, Timer};
pub use color::Rgba;
pub use config::{Recompute, SpinnerConfig};
pub use error::SpinnerError;
pub use render::{LineSpec, RectF, Surface};
pub use widget::{Host, SpinnerOptions, WaitingSpinner};
