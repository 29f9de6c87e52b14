use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::RawConfig;
use crate::cli::CliArgs;
use crate::settings::PostSourceConfig;

#[test]
fn cli_overrides_take_precedence() {
	let cli = CliArgs::parse_from([
		"cherry-pick",
		"--site",
		"https://example.org/wp-json",
		"--fixture",
		"posts.json",
		"--timeout",
		"9",
		"--post-types",
		"book",
		"--theme",
		"light",
		"--title",
		"Picks",
		"--log-level",
		"debug",
		"--log-file",
		"picker.log",
	]);

	let mut config = RawConfig::default();
	config.site.url = Some("https://other.example/wp-json".into());
	config.ui.title = Some("From file".into());
	config.apply_cli_overrides(&cli);

	assert_eq!(config.site.url, cli.site);
	assert_eq!(config.site.fixture, cli.fixture);
	assert_eq!(config.site.timeout_secs, Some(9));
	assert_eq!(config.rest.post_types, cli.post_types);
	assert_eq!(config.ui.theme, cli.theme);
	assert_eq!(config.ui.title, Some("Picks".into()));
	assert_eq!(config.log.level, cli.log_level);
	assert_eq!(config.log.file, Some(PathBuf::from("picker.log")));
}

#[test]
fn absent_values_fall_back_to_defaults() {
	let cli = CliArgs::parse_from(["cherry-pick"]);
	let config = RawConfig::default().resolve(&cli).unwrap();

	assert_eq!(config.source, PostSourceConfig::Unset);
	assert_eq!(config.rest_post_types, vec!["post", "page"]);
	assert_eq!(config.theme_name, "slate");
	assert_eq!(config.title, "Pick Posts");
	assert_eq!(config.timeout_secs, 30);
}

#[test]
fn fixtures_win_over_sites() {
	let cli = CliArgs::parse_from(["cherry-pick"]);
	let mut raw = RawConfig::default();
	raw.site.url = Some("https://example.org/wp-json".into());
	raw.site.fixture = Some(PathBuf::from("posts.json"));

	let config = raw.resolve(&cli).unwrap();
	assert_eq!(
		config.source,
		PostSourceConfig::Fixture(PathBuf::from("posts.json"))
	);
}

#[test]
fn sites_carry_the_configured_timeout() {
	let cli = CliArgs::parse_from(["cherry-pick", "--timeout", "12"]);
	let mut raw = RawConfig::default();
	raw.site.url = Some("https://example.org/wp-json".into());
	raw.apply_cli_overrides(&cli);

	let config = raw.resolve(&cli).unwrap();
	assert_eq!(
		config.source,
		PostSourceConfig::Site {
			url: "https://example.org/wp-json".into(),
			timeout: Duration::from_secs(12),
		}
	);
}

#[test]
fn blank_post_types_are_rejected() {
	let cli = CliArgs::parse_from(["cherry-pick", "--post-types", " , "]);
	let mut raw = RawConfig::default();
	raw.apply_cli_overrides(&cli);

	let message = raw.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("rest.post_types"));
	assert!(message.contains("CLI flag `--post-types`"));
}

#[test]
fn theme_names_are_normalised() {
	let cli = CliArgs::parse_from(["cherry-pick", "--theme", " Light "]);
	let mut raw = RawConfig::default();
	raw.apply_cli_overrides(&cli);
	assert_eq!(raw.resolve(&cli).unwrap().theme_name, "light");
}
