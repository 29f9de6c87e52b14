use cherry_pick::logging::parse_level;
use cherry_pick::panel::theme;
use reqwest::Url;

use super::{ConfigError, ConfigSources, PostSourceConfig, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.timeout_secs == 0 {
		return Err(ConfigError::invalid(
			"site.timeout_secs",
			config.timeout_secs.to_string(),
			sources.source_for_timeout(),
			"must be greater than zero",
		));
	}

	if let PostSourceConfig::Site { url, .. } = &config.source
		&& let Err(err) = Url::parse(url)
	{
		return Err(ConfigError::invalid(
			"site.url",
			url.clone(),
			sources.source_for_site_url(),
			format!("not an absolute URL ({err})"),
		));
	}

	if config.rest_post_types.is_empty() {
		return Err(ConfigError::invalid(
			"rest.post_types",
			"[]",
			sources.source_for_post_types(),
			"must name at least one post type",
		));
	}

	if theme::by_name(&config.theme_name).is_none() {
		return Err(ConfigError::invalid(
			"ui.theme",
			config.theme_name.clone(),
			sources.source_for_theme(),
			format!("expected one of {}", theme::names().join(", ")),
		));
	}

	if let Some(level) = &config.log_level
		&& let Err(err) = parse_level(level)
	{
		return Err(ConfigError::invalid(
			"log.level",
			level.clone(),
			sources.source_for_log_level(),
			err.to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::super::SettingSource;
	use super::*;

	fn baseline() -> ResolvedConfig {
		ResolvedConfig {
			source: PostSourceConfig::Unset,
			timeout_secs: 30,
			rest_post_types: vec!["post".into()],
			theme_name: "slate".into(),
			title: "Pick Posts".into(),
			log_level: None,
			log_file: None,
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&baseline(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_timeout() {
		let config = ResolvedConfig {
			timeout_secs: 0,
			..baseline()
		};
		let sources = ConfigSources {
			timeout: Some(SettingSource::CliFlag("--timeout")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "site.timeout_secs");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_relative_site_urls() {
		let config = ResolvedConfig {
			source: PostSourceConfig::Site {
				url: "example.org/wp-json".into(),
				timeout: Duration::from_secs(30),
			},
			..baseline()
		};
		let sources = ConfigSources {
			site_url: Some(SettingSource::Environment("CHERRY_PICK__SITE__URL")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "site.url");
		assert!(err.to_string().contains("environment variable"));
	}

	#[test]
	fn validation_rejects_unknown_themes_and_levels() {
		let config = ResolvedConfig {
			theme_name: "neon".into(),
			..baseline()
		};
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "ui.theme");
		assert!(err.to_string().contains("slate"));

		let config = ResolvedConfig {
			log_level: Some("loud".into()),
			..baseline()
		};
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "log.level");
	}
}
