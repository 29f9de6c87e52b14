use std::path::PathBuf;
use std::time::Duration;

use cherry_pick::Theme;
use cherry_pick::panel::theme;
use tracing::Level;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_THEME: &str = "slate";

/// Where candidate posts come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSourceConfig {
	/// A JSON array of posts on disk.
	Fixture(PathBuf),
	/// A site's REST root.
	Site { url: String, timeout: Duration },
	Unset,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub source: PostSourceConfig,
	pub timeout_secs: u64,
	pub rest_post_types: Vec<String>,
	pub theme_name: String,
	pub title: String,
	pub log_level: Option<String>,
	pub log_file: Option<PathBuf>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// The configured theme. Names are checked during validation.
	pub fn theme(&self) -> Theme {
		theme::by_name(&self.theme_name).unwrap_or_default()
	}

	/// The configured log level, if one was given and is valid.
	pub fn log_level(&self) -> Option<Level> {
		self.log_level
			.as_deref()
			.and_then(|level| cherry_pick::logging::parse_level(level).ok())
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
