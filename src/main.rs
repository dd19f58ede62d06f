use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use waiting_spinner::cli::Cli;
use waiting_spinner::settings::{self, Settings};
use waiting_spinner::{app, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logger::init(cli.log_file.as_deref())?;

    let path = match &cli.config {
        Some(path) => path.clone(),
        None => settings::default_path()?,
    };
    let mut settings = Settings::load(&path)?;
    cli.apply(&mut settings);
    debug!(?path, ?settings, "settings loaded");

    if cli.print_config {
        let yaml = serde_yaml::to_string(&settings).context("Failed to serialize settings")?;
        print!("{yaml}");
        return Ok(());
    }

    app::run(settings)
}
