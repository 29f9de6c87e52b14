use std::env;
use std::path::PathBuf;

use anyhow::{Error, Result};
use cherry_pick::panel::PANEL_TITLE;
use cherry_pick::rewrite::DEFAULT_REST_POST_TYPES;
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{
	ConfigSources, DEFAULT_THEME, DEFAULT_TIMEOUT_SECS, PostSourceConfig, ResolvedConfig,
	SettingSource,
};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	site: SiteSection,
	rest: RestSection,
	ui: UiSection,
	log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SiteSection {
	url: Option<String>,
	fixture: Option<PathBuf>,
	timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RestSection {
	post_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	theme: Option<String>,
	title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogSection {
	level: Option<String>,
	file: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		override_with(&mut self.site.url, &cli.site);
		override_with(&mut self.site.fixture, &cli.fixture);
		override_with(&mut self.site.timeout_secs, &cli.timeout);
		override_with(&mut self.rest.post_types, &cli.post_types);
		override_with(&mut self.ui.theme, &cli.theme);
		override_with(&mut self.ui.title, &cli.title);
		override_with(&mut self.log.level, &cli.log_level);
		override_with(&mut self.log.file, &cli.log_file);
	}

	/// Fill defaults and validate.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			site_url: detect_source(
				cli.site.is_some(),
				self.site.url.is_some(),
				"CHERRY_PICK__SITE__URL",
				"--site",
				"site.url",
			),
			timeout: detect_source(
				cli.timeout.is_some(),
				self.site.timeout_secs.is_some(),
				"CHERRY_PICK__SITE__TIMEOUT_SECS",
				"--timeout",
				"site.timeout_secs",
			),
			post_types: detect_source(
				cli.post_types.is_some(),
				self.rest.post_types.is_some(),
				"CHERRY_PICK__REST__POST_TYPES",
				"--post-types",
				"rest.post_types",
			),
			theme: detect_source(
				cli.theme.is_some(),
				self.ui.theme.is_some(),
				"CHERRY_PICK__UI__THEME",
				"--theme",
				"ui.theme",
			),
			log_level: detect_source(
				cli.log_level.is_some(),
				self.log.level.is_some(),
				"CHERRY_PICK__LOG__LEVEL",
				"--log-level",
				"log.level",
			),
		};

		let timeout_secs = self.site.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		let source = match (self.site.fixture, self.site.url) {
			(Some(path), _) => PostSourceConfig::Fixture(path),
			(None, Some(url)) => PostSourceConfig::Site {
				url: url.trim().to_string(),
				timeout: std::time::Duration::from_secs(timeout_secs),
			},
			(None, None) => PostSourceConfig::Unset,
		};

		let rest_post_types = self
			.rest
			.post_types
			.map(|types| {
				types
					.into_iter()
					.map(|value| value.trim().to_string())
					.filter(|value| !value.is_empty())
					.collect()
			})
			.unwrap_or_else(|| DEFAULT_REST_POST_TYPES.map(String::from).to_vec());

		let config = ResolvedConfig {
			source,
			timeout_secs,
			rest_post_types,
			theme_name: self
				.ui
				.theme
				.map(|name| name.trim().to_ascii_lowercase())
				.unwrap_or_else(|| DEFAULT_THEME.to_string()),
			title: self
				.ui
				.title
				.filter(|title| !title.trim().is_empty())
				.unwrap_or_else(|| PANEL_TITLE.to_string()),
			log_level: self.log.level,
			log_file: self.log.file,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn override_with<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
	if let Some(value) = value {
		*slot = Some(value.clone());
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
