//! The spinner widget: configuration, clock and host wiring behind one API.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::clock::AnimationClock;
use crate::color::Rgba;
use crate::config::{MIN_TICK_INTERVAL, SpinnerConfig};
use crate::error::SpinnerError;
use crate::render::{Surface, paint_frame};

/// The container a spinner is embedded in, plus the spinner's own window handle.
///
/// All calls happen on the UI thread that owns the widget.
pub trait Host {
    /// Width and height of the parent container, `None` if the widget has no parent.
    fn parent_size(&self) -> Option<(f64, f64)>;

    /// Enable or disable user input on the parent container.
    fn set_parent_enabled(&mut self, enabled: bool);

    /// Fix the widget to a `side x side` square.
    fn set_fixed_size(&mut self, side: f64);

    /// Move the widget's top-left corner, in parent coordinates.
    fn move_to(&mut self, x: f64, y: f64);

    fn show(&mut self);

    fn hide(&mut self);

    /// Queue a repaint; the host later calls [`WaitingSpinner::paint`].
    fn request_redraw(&mut self);
}

/// Construction-time behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerOptions {
    /// Re-center over the parent on `start()` and before every paint.
    pub center_on_parent: bool,
    /// Disable the parent while spinning, re-enable it on `stop()`.
    pub disable_parent_when_spinning: bool,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            center_on_parent: true,
            disable_parent_when_spinning: true,
        }
    }
}

/// An indeterminate busy indicator drawn as rotating, fading radial lines.
pub struct WaitingSpinner<H: Host> {
    host: H,
    options: SpinnerOptions,
    config: SpinnerConfig,
    clock: AnimationClock,
}

impl<H: Host> WaitingSpinner<H> {
    /// Create a hidden, stopped spinner with default configuration.
    pub fn new(host: H, options: SpinnerOptions) -> Self {
        Self::with_config(host, options, SpinnerConfig::default())
    }

    /// Create a hidden, stopped spinner with `config`.
    pub fn with_config(host: H, options: SpinnerOptions, config: SpinnerConfig) -> Self {
        let interval = config.tick_interval().unwrap_or(MIN_TICK_INTERVAL);
        let mut spinner = Self {
            host,
            options,
            config,
            clock: AnimationClock::new(interval),
        };
        spinner.update_size();
        spinner.host.hide();
        spinner
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn options(&self) -> SpinnerOptions {
        self.options
    }

    pub fn config(&self) -> &SpinnerConfig {
        &self.config
    }

    pub fn is_spinning(&self) -> bool {
        self.clock.is_spinning()
    }

    pub fn timer_active(&self) -> bool {
        self.clock.timer_active()
    }

    pub fn current_counter(&self) -> usize {
        self.clock.counter()
    }

    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Start spinning. See [`WaitingSpinner::start_at`].
    pub fn start(&mut self) -> Result<(), SpinnerError> {
        self.start_at(Instant::now())
    }

    /// Start spinning with `now` as the timer's epoch.
    ///
    /// Refuses to arm the timer when the cadence is invalid. When already spinning the
    /// counter and timer are left alone, but the widget is still re-centered and shown.
    pub fn start_at(&mut self, now: Instant) -> Result<(), SpinnerError> {
        let interval = self.config.tick_interval().inspect_err(|e| {
            warn!(error = %e, "refusing to start spinner");
        })?;

        self.update_position();
        if self.clock.start(interval, now) {
            debug!(?interval, lines = self.config.number_of_lines(), "spinner started");
        }
        self.host.show();

        if self.options.disable_parent_when_spinning && self.host.parent_size().is_some() {
            self.host.set_parent_enabled(false);
        }
        Ok(())
    }

    /// Stop spinning and hide. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.clock.stop() {
            debug!("spinner stopped");
        }
        self.host.hide();

        if self.options.disable_parent_when_spinning && self.host.parent_size().is_some() {
            self.host.set_parent_enabled(true);
        }
    }

    /// Handle the timer if a tick is due at `now`. Returns whether a tick ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.clock.poll(now, self.config.number_of_lines()) {
            self.host.request_redraw();
            true
        } else {
            false
        }
    }

    /// How long the event loop may wait before calling [`WaitingSpinner::poll`].
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_tick(now)
    }

    /// Paint the current frame. `surface` covers the widget's `side x side` square.
    pub fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.update_position();
        let lead = self.clock.lead_line(self.config.number_of_lines());
        paint_frame(surface, &self.config, lead);
    }

    pub fn set_color(&mut self, color: Rgba) {
        let _ = self.config.set_color(color);
    }

    pub fn set_roundness(&mut self, roundness: f64) {
        let _ = self.config.set_roundness(roundness);
    }

    pub fn set_minimum_trail_opacity(&mut self, minimum_trail_opacity: f64) {
        let _ = self.config.set_minimum_trail_opacity(minimum_trail_opacity);
    }

    pub fn set_trail_fade_percentage(&mut self, trail: f64) {
        let _ = self.config.set_trail_fade_percentage(trail);
    }

    /// Store the speed, restart the counter and re-arm the timer.
    ///
    /// The value is always stored. If the spinner is running and the new cadence is
    /// invalid, the spinner is stopped and the error returned.
    pub fn set_revolutions_per_second(
        &mut self,
        revolutions_per_second: f64,
    ) -> Result<(), SpinnerError> {
        self.set_revolutions_per_second_at(revolutions_per_second, Instant::now())
    }

    /// [`WaitingSpinner::set_revolutions_per_second`] with `now` as the new period's start.
    pub fn set_revolutions_per_second_at(
        &mut self,
        revolutions_per_second: f64,
        now: Instant,
    ) -> Result<(), SpinnerError> {
        let _ = self.config.set_revolutions_per_second(revolutions_per_second);
        self.update_timer(now)
    }

    /// Store the line count, restart the counter and re-arm the timer.
    ///
    /// Same failure behavior as [`WaitingSpinner::set_revolutions_per_second`].
    pub fn set_number_of_lines(&mut self, lines: usize) -> Result<(), SpinnerError> {
        self.set_number_of_lines_at(lines, Instant::now())
    }

    /// [`WaitingSpinner::set_number_of_lines`] with `now` as the new period's start.
    pub fn set_number_of_lines_at(
        &mut self,
        lines: usize,
        now: Instant,
    ) -> Result<(), SpinnerError> {
        let _ = self.config.set_number_of_lines(lines);
        self.update_timer(now)
    }

    pub fn set_line_length(&mut self, length: f64) {
        let _ = self.config.set_line_length(length);
        self.update_size();
    }

    pub fn set_line_width(&mut self, width: f64) {
        let _ = self.config.set_line_width(width);
        self.update_size();
    }

    pub fn set_inner_radius(&mut self, radius: f64) {
        let _ = self.config.set_inner_radius(radius);
        self.update_size();
    }

    fn update_size(&mut self) {
        self.host.set_fixed_size(self.config.side());
    }

    /// Restart the counter and apply the cadence's interval, re-arming from `now`.
    fn update_timer(&mut self, now: Instant) -> Result<(), SpinnerError> {
        self.clock.reset_counter();
        match self.config.tick_interval() {
            Ok(interval) => {
                self.clock.set_interval(interval, now);
                if self.clock.timer_active() {
                    debug!(?interval, "spinner timer re-armed");
                }
                Ok(())
            }
            Err(e) if self.clock.timer_active() => {
                warn!(error = %e, "stopping spinner");
                self.stop();
                Err(e)
            }
            Err(e) => {
                debug!(error = %e, "cadence not startable until fixed");
                Ok(())
            }
        }
    }

    fn update_position(&mut self) {
        if !self.options.center_on_parent {
            return;
        }
        if let Some((width, height)) = self.host.parent_size() {
            let side = self.config.side();
            self.host.move_to(width / 2.0 - side / 2.0, height / 2.0 - side / 2.0);
        }
    }
}
