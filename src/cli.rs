//! Command-line arguments for the demo binary.

use clap::Parser;
use std::path::PathBuf;

use crate::color::Rgba;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "waiting-spinner",
    version,
    about = "Show an animated busy indicator in the terminal"
)]
pub struct Cli {
    /// Settings file (defaults to $XDG_CONFIG_HOME/waiting-spinner/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of radial lines
    #[arg(long)]
    pub lines: Option<usize>,

    /// Revolutions per second
    #[arg(long, value_name = "REV_PER_SEC")]
    pub speed: Option<f64>,

    /// Lead line color, #rrggbb or #rrggbbaa
    #[arg(long)]
    pub color: Option<Rgba>,

    /// Corner rounding of each line, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub roundness: Option<f64>,

    /// Opacity floor of the trail, in percent
    #[arg(long, value_name = "PERCENT")]
    pub min_opacity: Option<f64>,

    /// Share of the circle the trail fades over, in percent
    #[arg(long, value_name = "PERCENT")]
    pub trail: Option<f64>,

    #[arg(long)]
    pub line_length: Option<f64>,

    #[arg(long)]
    pub line_width: Option<f64>,

    #[arg(long)]
    pub inner_radius: Option<f64>,

    /// Color translucent lines are blended over
    #[arg(long)]
    pub background: Option<Rgba>,

    /// Terminal dots per spinner unit
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Keep the spinner where it is instead of centering it
    #[arg(long)]
    pub no_center: bool,

    /// Leave the surrounding pane enabled while spinning
    #[arg(long)]
    pub keep_parent_enabled: bool,

    /// Write logs to this file (the terminal itself is taken by the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective settings as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Layer the command-line overrides on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        let spinner = &mut settings.spinner;
        if let Some(lines) = self.lines {
            let _ = spinner.set_number_of_lines(lines);
        }
        if let Some(speed) = self.speed {
            let _ = spinner.set_revolutions_per_second(speed);
        }
        if let Some(color) = self.color {
            let _ = spinner.set_color(color);
        }
        if let Some(roundness) = self.roundness {
            let _ = spinner.set_roundness(roundness);
        }
        if let Some(min_opacity) = self.min_opacity {
            let _ = spinner.set_minimum_trail_opacity(min_opacity);
        }
        if let Some(trail) = self.trail {
            let _ = spinner.set_trail_fade_percentage(trail);
        }
        if let Some(length) = self.line_length {
            let _ = spinner.set_line_length(length);
        }
        if let Some(width) = self.line_width {
            let _ = spinner.set_line_width(width);
        }
        if let Some(radius) = self.inner_radius {
            let _ = spinner.set_inner_radius(radius);
        }

        if let Some(background) = self.background {
            settings.background = background;
        }
        if let Some(zoom) = self.zoom {
            settings.zoom = zoom;
        }
        if self.no_center {
            settings.options.center_on_parent = false;
        }
        if self.keep_parent_enabled {
            settings.options.disable_parent_when_spinning = false;
        }
    }
}
