mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cherry_pick::app_dirs;
use cherry_pick::logging::{self, LOG_FILE_NAME, LogConfig};
use cherry_pick::panel::theme;
use cli::{CliArgs, Command, parse_cli, print_report};
use settings::ResolvedConfig;
use tracing::Level;
use workflow::Workflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let Some(command) = cli.command.clone() else {
		if !cli.print_config {
			eprintln!("no command given; run `cherry-pick --help` for usage");
		}
		return Ok(());
	};

	logging::init(&log_config(&cli, &command, &resolved)?)?;

	let report = Workflow::new(resolved).run(&command)?;
	print_report(&report, cli.output)
}

/// Verbosity flags beat the configured level. The picker owns the terminal,
/// so it logs to the data directory unless a file is configured.
fn log_config(cli: &CliArgs, command: &Command, config: &ResolvedConfig) -> Result<LogConfig> {
	let level = if cli.verbose > 0 {
		LogConfig::from_verbosity(cli.verbose).level
	} else {
		config.log_level().unwrap_or(Level::WARN)
	};

	let file = match (&config.log_file, command) {
		(Some(file), _) => Some(file.clone()),
		(None, Command::Pick { .. }) => Some(app_dirs::get_data_dir()?.join(LOG_FILE_NAME)),
		(None, _) => None,
	};

	Ok(LogConfig::default().with_level(level).with_log_file(file))
}
