use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::{PickOutcome, PickerPanel};
use crate::post::extract_post_id;

impl PickerPanel {
	/// Apply a key press. Returns an outcome once the user accepts or cancels.
	pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickOutcome> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);

		match key.code {
			KeyCode::Esc => return Some(self.outcome(false)),
			KeyCode::Char('s') if ctrl => return Some(self.outcome(true)),
			KeyCode::Enter => self.add_highlighted(),
			KeyCode::Up => self.move_highlight(-1),
			KeyCode::Down => self.move_highlight(1),
			KeyCode::Left if alt => self.move_focused(-1),
			KeyCode::Right if alt => self.move_focused(1),
			KeyCode::Left => self.move_focus(-1),
			KeyCode::Right => self.move_focus(1),
			KeyCode::Delete => self.remove_focused(),
			KeyCode::Backspace => {
				if self.input.pop().is_none() {
					self.remove_last();
				}
				self.highlighted = 0;
			}
			KeyCode::Char(ch) if !ctrl => {
				self.input.push(ch);
				self.focused = None;
				self.highlighted = 0;
			}
			_ => {}
		}
		None
	}

	/// Add the highlighted suggestion, or the typed text when nothing is
	/// suggested. Typed text that is not a valid token, or names a post that
	/// is already selected, is dropped.
	pub fn add_highlighted(&mut self) {
		let token = self
			.visible_suggestions()
			.into_iter()
			.nth(self.highlighted)
			.or_else(|| {
				let typed = self.input.trim();
				(!typed.is_empty()).then(|| typed.to_string())
			});
		let Some(token) = token else {
			return;
		};

		self.input.clear();
		self.highlighted = 0;
		let mut ids = self.query().selected_ids().to_vec();
		match extract_post_id(&token) {
			Some(id) if !ids.contains(&id) => {
				ids.push(id);
				self.set_selection(ids);
			}
			Some(id) => debug!(id, "post already selected"),
			None => debug!(%token, "ignoring text that is not a post token"),
		}
	}

	pub fn remove_focused(&mut self) {
		let Some(id) = self.focused.and_then(|index| self.resolved_ids().get(index).copied()) else {
			return;
		};
		self.remove_id(id);
	}

	pub fn remove_last(&mut self) {
		if let Some(id) = self.resolved_ids().last().copied() {
			self.focused = None;
			self.remove_id(id);
		}
	}

	/// Swap the focused token with its neighbour. Selected posts without a
	/// token keep their place in the selection.
	pub fn move_focused(&mut self, delta: isize) {
		let Some(index) = self.focused else {
			return;
		};
		let resolved = self.resolved_ids();
		let Some(target) = index.checked_add_signed(delta) else {
			return;
		};
		let (Some(&moved), Some(&neighbour)) = (resolved.get(index), resolved.get(target)) else {
			return;
		};

		let mut ids = self.query().selected_ids().to_vec();
		let position = |id: u64| ids.iter().position(|candidate| *candidate == id);
		let (Some(from), Some(to)) = (position(moved), position(neighbour)) else {
			return;
		};
		ids.swap(from, to);
		self.focused = Some(target);
		self.set_selection(ids);
	}

	fn remove_id(&mut self, id: u64) {
		let mut ids = self.query().selected_ids().to_vec();
		ids.retain(|selected| *selected != id);
		self.set_selection(ids);
	}

	fn move_focus(&mut self, delta: isize) {
		let count = self.selected_tokens().len();
		if count == 0 {
			self.focused = None;
			return;
		}
		self.focused = match (self.focused, delta.is_negative()) {
			(None, true) => Some(count - 1),
			(None, false) => None,
			(Some(0), true) => Some(0),
			(Some(index), true) => Some(index - 1),
			(Some(index), false) if index + 1 >= count => None,
			(Some(index), false) => Some(index + 1),
		};
	}

	fn move_highlight(&mut self, delta: isize) {
		let count = self.visible_suggestions().len();
		if count == 0 {
			self.highlighted = 0;
			return;
		}
		self.highlighted = self
			.highlighted
			.saturating_add_signed(delta)
			.min(count - 1);
	}
}
