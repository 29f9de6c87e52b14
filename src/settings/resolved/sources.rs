use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, when it was set at all.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) site_url: Option<SettingSource>,
	pub(crate) timeout: Option<SettingSource>,
	pub(crate) post_types: Option<SettingSource>,
	pub(crate) theme: Option<SettingSource>,
	pub(crate) log_level: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_site_url(&self) -> SettingSource {
		self.site_url
			.clone()
			.unwrap_or(SettingSource::ConfigKey("site.url"))
	}

	pub(crate) fn source_for_timeout(&self) -> SettingSource {
		self.timeout
			.clone()
			.unwrap_or(SettingSource::ConfigKey("site.timeout_secs"))
	}

	pub(crate) fn source_for_post_types(&self) -> SettingSource {
		self.post_types
			.clone()
			.unwrap_or(SettingSource::ConfigKey("rest.post_types"))
	}

	pub(crate) fn source_for_theme(&self) -> SettingSource {
		self.theme
			.clone()
			.unwrap_or(SettingSource::ConfigKey("ui.theme"))
	}

	pub(crate) fn source_for_log_level(&self) -> SettingSource {
		self.log_level
			.clone()
			.unwrap_or(SettingSource::ConfigKey("log.level"))
	}
}
