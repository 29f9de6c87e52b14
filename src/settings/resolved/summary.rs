use super::{PostSourceConfig, ResolvedConfig};

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	match &config.source {
		PostSourceConfig::Fixture(path) => println!("  Posts: fixture {}", path.display()),
		PostSourceConfig::Site { url, timeout } => {
			println!("  Posts: {url} (timeout {}s)", timeout.as_secs());
		}
		PostSourceConfig::Unset => println!("  Posts: (no site or fixture configured)"),
	}
	println!(
		"  REST post types: {}",
		config.rest_post_types.join(", ")
	);
	println!("  UI theme: {}", config.theme_name);
	println!("  Panel title: {}", config.title);
	println!(
		"  Log level: {}",
		config.log_level.as_deref().unwrap_or("(from verbosity)")
	);
	if let Some(file) = &config.log_file {
		println!("  Log file: {}", file.display());
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	#[test]
	fn summary_prints_without_panic() {
		let config = ResolvedConfig {
			source: PostSourceConfig::Fixture(PathBuf::from("posts.json")),
			timeout_secs: 30,
			rest_post_types: vec!["post".into(), "page".into()],
			theme_name: "light".into(),
			title: "Pick Posts".into(),
			log_level: Some("debug".into()),
			log_file: Some(PathBuf::from("picker.log")),
		};

		print_summary(&config);
	}
}
