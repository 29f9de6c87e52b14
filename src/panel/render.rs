use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as Border, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::{INPUT_LABEL, ORDER_NOTICE, PickerPanel};

const NOTICE_HEIGHT: u16 = 2;

impl PickerPanel {
	/// Draw the panel into the whole frame. Nothing is drawn while the panel
	/// is hidden.
	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area();
		frame.render_widget(Clear, area);
		if !self.is_visible() {
			return;
		}

		let border = Border::default()
			.borders(Borders::ALL)
			.title(Span::styled(format!(" {} ", self.title()), self.theme.header));
		let inner = border.inner(area);
		frame.render_widget(border, area);

		let tokens = self.selected_tokens();
		let token_lines = token_line_count(&tokens, inner.width);

		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(NOTICE_HEIGHT),
				Constraint::Length(1),
				Constraint::Length(token_lines),
				Constraint::Min(1),
			])
			.split(inner);

		let notice = Paragraph::new(ORDER_NOTICE)
			.style(self.theme.notice)
			.wrap(Wrap { trim: true });
		frame.render_widget(notice, layout[0]);

		self.render_input(frame, layout[1]);
		self.render_tokens(frame, layout[2], &tokens);
		self.render_suggestions(frame, layout[3]);
	}

	fn render_input(&self, frame: &mut Frame, area: Rect) {
		let mut line = Line::from(vec![
			Span::styled(format!("{INPUT_LABEL} > "), self.theme.prompt),
			Span::raw(self.input().to_string()),
		]);
		if self.is_loading() {
			let spinner = Throbber::default()
				.style(self.theme.empty)
				.throbber_style(self.theme.empty);
			line.spans.push(Span::raw(" "));
			line.spans.push(spinner.to_symbol_span(&self.throbber_state));
		}
		frame.render_widget(Paragraph::new(line), area);
	}

	fn render_tokens(&self, frame: &mut Frame, area: Rect, tokens: &[String]) {
		if tokens.is_empty() {
			let empty = Paragraph::new("No posts selected").style(self.theme.empty);
			frame.render_widget(empty, area);
			return;
		}

		let mut spans = Vec::with_capacity(tokens.len() * 2);
		for (index, token) in tokens.iter().enumerate() {
			let style = if self.focused() == Some(index) {
				self.theme.token_focus
			} else {
				self.theme.token
			};
			spans.push(Span::styled(format!(" {token} "), style));
			spans.push(Span::raw(" "));
		}
		let paragraph = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false });
		frame.render_widget(paragraph, area);
	}

	fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
		let suggestions = self.visible_suggestions();
		if suggestions.is_empty() {
			let label = if self.is_loading() {
				"Loading suggestions"
			} else {
				"No suggestions"
			};
			frame.render_widget(Paragraph::new(label).style(self.theme.empty), area);
			return;
		}

		let items: Vec<ListItem> = suggestions.into_iter().map(ListItem::new).collect();
		let list = List::new(items)
			.highlight_style(self.theme.row_highlight)
			.highlight_symbol("> ");
		let mut state = ListState::default().with_selected(Some(self.highlighted()));
		frame.render_stateful_widget(list, area, &mut state);
	}
}

/// Rows needed to show every token chip at `width`, at least one.
fn token_line_count(tokens: &[String], width: u16) -> u16 {
	let width = usize::from(width.max(1));
	let mut lines = 1;
	let mut used = 0;
	for token in tokens {
		let chip = token.width() + 3;
		if used > 0 && used + chip > width {
			lines += 1;
			used = 0;
		}
		used += chip;
	}
	u16::try_from(lines).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokens_wrap_onto_extra_lines() {
		let tokens = vec!["a".repeat(10), "b".repeat(10), "c".repeat(10)];
		assert_eq!(token_line_count(&[], 40), 1);
		assert_eq!(token_line_count(&tokens, 40), 1);
		assert_eq!(token_line_count(&tokens, 20), 3);
	}
}
