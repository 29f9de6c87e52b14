use std::sync::Arc;
use std::time::Duration;

use super::fingerprint::Fingerprint;
use super::params::CandidateRequest;
use super::runtime::FetchRuntime;
use super::source::PostSource;
use crate::post::CandidatePost;
use crate::query::QueryAttributes;

/// Keeps the picker's candidate list in step with the block's ancillary
/// filters.
pub struct SuggestionFetcher {
	runtime: FetchRuntime,
}

impl SuggestionFetcher {
	pub fn new(source: Arc<dyn PostSource>) -> Self {
		Self {
			runtime: FetchRuntime::new(source),
		}
	}

	/// Re-issue the lookup when the filter fingerprint changed.
	///
	/// Blocks that inherit the page query get no suggestions at all.
	pub fn sync(&mut self, query: &QueryAttributes) -> bool {
		if query.inherits() {
			self.runtime.reset();
			return false;
		}
		self.runtime.issue(
			Fingerprint::of(query),
			vec![CandidateRequest::suggestions(query)],
		)
	}

	pub fn pump(&mut self) -> bool {
		self.runtime.pump()
	}

	pub fn wait(&mut self, timeout: Duration) -> bool {
		self.runtime.wait(timeout)
	}

	#[must_use]
	pub fn candidates(&self) -> &[CandidatePost] {
		self.runtime.posts()
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.runtime.is_in_flight()
	}
}

/// Resolves the currently selected identifiers to full post records.
pub struct SelectedLookup {
	runtime: FetchRuntime,
}

impl SelectedLookup {
	pub fn new(source: Arc<dyn PostSource>) -> Self {
		Self {
			runtime: FetchRuntime::new(source),
		}
	}

	/// Look up the selection when it changed; an empty selection or an
	/// inheriting block resolves to nothing.
	pub fn sync(&mut self, query: &QueryAttributes) -> bool {
		let ids = query.selected_ids();
		if query.inherits() || ids.is_empty() {
			self.runtime.reset();
			return false;
		}
		let post_type = query.post_type();
		self.runtime.issue(
			Fingerprint::of_selection(post_type, ids),
			CandidateRequest::selected_batches(post_type, ids),
		)
	}

	pub fn pump(&mut self) -> bool {
		self.runtime.pump()
	}

	pub fn wait(&mut self, timeout: Duration) -> bool {
		self.runtime.wait(timeout)
	}

	#[must_use]
	pub fn records(&self) -> &[CandidatePost] {
		self.runtime.posts()
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.runtime.is_in_flight()
	}
}
