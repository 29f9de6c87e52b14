use ratatui::style::{Color, Modifier, Style};

/// Styles used by the picker panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub header: Style,
	pub notice: Style,
	pub prompt: Style,
	pub token: Style,
	pub token_focus: Style,
	pub row_highlight: Style,
	pub empty: Style,
}

pub const SLATE: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(226, 232, 240))
		.add_modifier(Modifier::BOLD),
	notice: Style::new().fg(Color::Rgb(250, 204, 21)),
	prompt: Style::new().fg(Color::Rgb(56, 189, 248)),
	token: Style::new()
		.fg(Color::Rgb(15, 23, 42))
		.bg(Color::Rgb(148, 163, 184)),
	token_focus: Style::new()
		.fg(Color::Rgb(15, 23, 42))
		.bg(Color::Rgb(56, 189, 248))
		.add_modifier(Modifier::BOLD),
	row_highlight: Style::new()
		.bg(Color::Rgb(51, 65, 85))
		.fg(Color::Rgb(226, 232, 240)),
	empty: Style::new().fg(Color::Rgb(100, 116, 139)),
};

pub const LIGHT: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(15, 23, 42))
		.add_modifier(Modifier::BOLD),
	notice: Style::new().fg(Color::Rgb(146, 64, 14)),
	prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
	token: Style::new()
		.fg(Color::Rgb(15, 23, 42))
		.bg(Color::Rgb(226, 232, 240)),
	token_focus: Style::new()
		.fg(Color::Rgb(255, 255, 255))
		.bg(Color::Rgb(0, 102, 153))
		.add_modifier(Modifier::BOLD),
	row_highlight: Style::new()
		.bg(Color::Rgb(200, 200, 200))
		.fg(Color::Rgb(120, 120, 0)),
	empty: Style::new().fg(Color::Rgb(100, 100, 100)),
};

const THEMES: [(&str, Theme); 2] = [("slate", SLATE), ("light", LIGHT)];

impl Default for Theme {
	fn default() -> Self {
		SLATE
	}
}

/// Names of the bundled themes.
#[must_use]
pub fn names() -> Vec<&'static str> {
	THEMES.iter().map(|(name, _)| *name).collect()
}

/// Look a theme up by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let normalized = name.trim().to_ascii_lowercase();
	THEMES
		.iter()
		.find(|(candidate, _)| *candidate == normalized)
		.map(|(_, theme)| *theme)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_ignores_case_and_whitespace() {
		assert_eq!(by_name(" Light "), Some(LIGHT));
		assert_eq!(by_name("slate"), Some(SLATE));
		assert_eq!(by_name("solarized"), None);
	}
}
