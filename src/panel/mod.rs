//! Terminal picker panel for the query loop block.
//!
//! [`PickerPanel`] binds the selection state machine to a token input: the
//! selected posts are shown as display tokens, suggestions come from the
//! [`SuggestionFetcher`], and every edit is fed back through the selection
//! machine. Key edits work on the selected identifiers, so a selected post
//! whose record cannot be resolved is kept rather than lost.

mod actions;
mod matching;
mod render;
mod runtime;
pub mod theme;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use throbber_widgets_tui::ThrobberState;
use tracing::debug;

use crate::fetch::{PostSource, SelectedLookup, SuggestionFetcher};
use crate::post::{CandidatePost, format_label};
use crate::query::{Block, QueryAttributes};
use crate::selection::SelectionMachine;

pub use theme::Theme;

/// Panel heading.
pub const PANEL_TITLE: &str = "Pick Posts";

/// Label of the token input.
pub const INPUT_LABEL: &str = "Search";

/// Warning shown above the token input.
pub const ORDER_NOTICE: &str =
	"Posts are displayed in the order you select. Sorting and sticky post settings are ignored.";

/// How the user left the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PickOutcome {
	pub accepted: bool,
	pub block: Block,
}

/// Picker state for one block instance.
pub struct PickerPanel {
	block: Block,
	machine: SelectionMachine,
	suggestions: SuggestionFetcher,
	selected: SelectedLookup,
	known: HashMap<u64, CandidatePost>,
	known_post_type: String,
	input: String,
	highlighted: usize,
	focused: Option<usize>,
	title: String,
	pub(crate) theme: Theme,
	pub(crate) throbber_state: ThrobberState,
}

impl PickerPanel {
	pub fn new(block: Block, source: Arc<dyn PostSource>) -> Self {
		let machine = SelectionMachine::new(&block.attrs.query);
		let known_post_type = block.attrs.query.post_type().to_string();
		let mut panel = Self {
			block,
			machine,
			suggestions: SuggestionFetcher::new(Arc::clone(&source)),
			selected: SelectedLookup::new(source),
			known: HashMap::new(),
			known_post_type,
			input: String::new(),
			highlighted: 0,
			focused: None,
			title: PANEL_TITLE.to_string(),
			theme: Theme::default(),
			throbber_state: ThrobberState::default(),
		};
		panel.refresh();
		panel
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	#[must_use]
	pub fn block(&self) -> &Block {
		&self.block
	}

	#[must_use]
	pub fn query(&self) -> &QueryAttributes {
		&self.block.attrs.query
	}

	#[must_use]
	pub fn title(&self) -> &str {
		&self.title
	}

	#[must_use]
	pub fn input(&self) -> &str {
		&self.input
	}

	/// The panel only exists for query loop blocks that pick their own posts.
	#[must_use]
	pub fn is_visible(&self) -> bool {
		self.block.is_query_loop() && !self.query().inherits()
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.suggestions.is_loading() || self.selected.is_loading()
	}

	/// Replace the block's `query` after an edit made outside the panel.
	pub fn set_query(&mut self, query: QueryAttributes) {
		self.block.attrs.query = query;
		self.refresh();
	}

	/// Reconcile the configuration and resync both lookups.
	fn refresh(&mut self) {
		if let Some(change) = self.machine.reconcile(&mut self.block.attrs.query) {
			debug!(?change, "selection reconciled");
		}

		let post_type = self.block.attrs.query.post_type();
		if post_type != self.known_post_type {
			self.known_post_type = post_type.to_string();
			self.known.clear();
		}

		let query = &self.block.attrs.query;
		self.suggestions.sync(query);
		self.selected.sync(query);
		self.clamp_cursors();
	}

	/// Commit finished lookups. Returns whether anything visible changed.
	pub fn pump(&mut self) -> bool {
		let changed = self.suggestions.pump() | self.selected.pump();
		if changed {
			self.absorb_lookups();
		}
		changed
	}

	/// Block until both lookups settle or `timeout` elapses.
	pub fn wait_for_lookups(&mut self, timeout: Duration) {
		self.suggestions.wait(timeout);
		self.selected.wait(timeout);
		self.absorb_lookups();
	}

	fn absorb_lookups(&mut self) {
		let post_type = self.known_post_type.clone();
		for post in self
			.suggestions
			.candidates()
			.iter()
			.chain(self.selected.records())
		{
			if post.post_type.is_empty() || post.post_type == post_type {
				self.known.insert(post.id, post.clone());
			}
		}
		self.clamp_cursors();
	}

	/// Tokens of the selected posts that could be resolved, in order.
	#[must_use]
	pub fn selected_tokens(&self) -> Vec<String> {
		self.query()
			.selected_ids()
			.iter()
			.filter_map(|id| self.known.get(id))
			.map(format_label)
			.collect()
	}

	/// Selected identifiers that have a token, in order. Token positions
	/// index into this list.
	fn resolved_ids(&self) -> Vec<u64> {
		self.query()
			.selected_ids()
			.iter()
			.copied()
			.filter(|id| self.known.contains_key(id))
			.collect()
	}

	/// Tokens of candidates that are not selected yet.
	#[must_use]
	pub fn suggestion_tokens(&self) -> Vec<String> {
		let selected = self.query().selected_ids();
		self.suggestions
			.candidates()
			.iter()
			.filter(|post| !selected.contains(&post.id))
			.map(format_label)
			.collect()
	}

	/// Suggestions narrowed by the current input, best match first.
	#[must_use]
	pub fn visible_suggestions(&self) -> Vec<String> {
		let mut tokens = self.suggestion_tokens();
		let order = matching::rank(&self.input, &tokens);
		order
			.into_iter()
			.map(|index| std::mem::take(&mut tokens[index]))
			.collect()
	}

	#[must_use]
	pub fn highlighted(&self) -> usize {
		self.highlighted
	}

	#[must_use]
	pub fn focused(&self) -> Option<usize> {
		self.focused
	}

	/// Replace the token list and run the selection transition.
	pub fn set_tokens(&mut self, tokens: Vec<String>) {
		let state = self
			.machine
			.apply_tokens(&mut self.block.attrs.query, &tokens);
		debug!(?state, "token list changed");
		self.refresh();
	}

	fn set_selection(&mut self, ids: Vec<u64>) {
		let state = self.machine.set_ids(&mut self.block.attrs.query, ids);
		debug!(?state, "selection edited");
		self.refresh();
	}

	fn clamp_cursors(&mut self) {
		let suggestions = self.visible_suggestions().len();
		if self.highlighted >= suggestions {
			self.highlighted = suggestions.saturating_sub(1);
		}
		let tokens = self.selected_tokens().len();
		self.focused = self.focused.filter(|index| *index < tokens);
	}

	pub(crate) fn outcome(&self, accepted: bool) -> PickOutcome {
		PickOutcome {
			accepted,
			block: self.block.clone(),
		}
	}
}
