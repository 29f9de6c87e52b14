//! Candidate posts returned by the collection endpoint and the display tokens
//! the picker shows for them.

mod token;

use serde::{Deserialize, Serialize};

pub use token::{extract_post_id, format_label};

/// Label used when a post has neither a rendered nor a raw title.
pub const UNTITLED: &str = "(Untitled)";

/// Status of a publicly visible post.
pub const PUBLISH: &str = "publish";

/// Every status an editor may preview: published, draft, pending, private
/// and scheduled.
pub const VISIBLE_STATUSES: [&str; 5] = [PUBLISH, "draft", "pending", "private", "future"];

/// Title object of a post in edit context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTitle {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rendered: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub raw: Option<String>,
}

/// A post offered as a pick candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePost {
	pub id: u64,
	#[serde(rename = "type", default)]
	pub post_type: String,
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub title: PostTitle,
}

impl CandidatePost {
	pub fn new(id: u64, post_type: impl Into<String>, status: impl Into<String>) -> Self {
		Self {
			id,
			post_type: post_type.into(),
			status: status.into(),
			title: PostTitle::default(),
		}
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title.rendered = Some(title.into());
		self
	}

	/// Rendered title, then raw title, then [`UNTITLED`]. Empty titles count
	/// as missing.
	#[must_use]
	pub fn display_title(&self) -> &str {
		[&self.title.rendered, &self.title.raw]
			.into_iter()
			.flatten()
			.map(String::as_str)
			.find(|title| !title.is_empty())
			.unwrap_or(UNTITLED)
	}

	#[must_use]
	pub fn is_published(&self) -> bool {
		self.status == PUBLISH
	}
}
