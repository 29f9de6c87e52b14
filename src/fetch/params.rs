use reqwest::Url;

use super::error::FetchError;
use crate::post::VISIBLE_STATUSES;
use crate::query::{ORDER_BY_INCLUDE, QueryAttributes};

/// Page size of every candidate lookup.
pub const POSTS_PER_PAGE: usize = 100;

/// Namespace of the core collection endpoints.
const REST_NAMESPACE: &str = "/wp/v2";

/// Placeholder root used to render site-relative paths.
const RELATIVE_ROOT: &str = "http://localhost";

/// Collection route segment for a post type.
#[must_use]
pub fn rest_base(post_type: &str) -> &str {
	match post_type {
		"post" => "posts",
		"page" => "pages",
		other => other,
	}
}

/// Request parameter name for a taxonomy filter.
fn taxonomy_param(taxonomy: &str) -> &str {
	match taxonomy {
		"category" => "categories",
		"post_tag" => "tags",
		other => other,
	}
}

fn join_ids(ids: &[u64]) -> String {
	ids.iter()
		.map(u64::to_string)
		.collect::<Vec<_>>()
		.join(",")
}

/// A list read against a post type's collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRequest {
	post_type: String,
	params: Vec<(String, String)>,
}

impl CandidateRequest {
	/// Suggestions narrowed by the block's ancillary filters.
	#[must_use]
	pub fn suggestions(query: &QueryAttributes) -> Self {
		let mut request = Self::base(query.post_type());
		request.push("orderby", "date");
		request.push("order", "desc");
		request.push("status", VISIBLE_STATUSES.join(","));
		request.push("context", "edit");

		if let Some(parents) = query.parents.as_deref().filter(|ids| !ids.is_empty()) {
			request.push("parent", join_ids(parents));
		}
		if let Some(search) = query.search.as_deref().filter(|text| !text.is_empty()) {
			request.push("search", search);
		}
		if let Some(author) = query.author.as_deref().filter(|text| !text.is_empty()) {
			request.push("author", author);
		}
		for (taxonomy, terms) in query.tax_query.iter().flatten() {
			if !terms.is_empty() {
				request.push(taxonomy_param(taxonomy), join_ids(terms));
			}
		}
		request
	}

	/// The selected posts themselves, in selection order, split into pages of
	/// at most [`POSTS_PER_PAGE`] identifiers so no selection is truncated.
	#[must_use]
	pub fn selected_batches(post_type: &str, ids: &[u64]) -> Vec<Self> {
		ids.chunks(POSTS_PER_PAGE)
			.map(|batch| Self::selected(post_type, batch))
			.collect()
	}

	/// One page of selected posts, in selection order.
	#[must_use]
	pub fn selected(post_type: &str, ids: &[u64]) -> Self {
		let mut request = Self::base(post_type);
		request.push("include", join_ids(ids));
		request.push("orderby", ORDER_BY_INCLUDE);
		request.push("status", VISIBLE_STATUSES.join(","));
		request.push("context", "edit");
		request
	}

	fn base(post_type: &str) -> Self {
		let mut request = Self {
			post_type: post_type.to_string(),
			params: Vec::new(),
		};
		request.push("per_page", POSTS_PER_PAGE.to_string());
		request
	}

	fn push(&mut self, key: &str, value: impl Into<String>) {
		self.params.push((key.to_string(), value.into()));
	}

	#[must_use]
	pub fn post_type(&self) -> &str {
		&self.post_type
	}

	/// Collection route, e.g. `/wp/v2/posts`.
	#[must_use]
	pub fn route(&self) -> String {
		format!("{REST_NAMESPACE}/{}", rest_base(&self.post_type))
	}

	#[must_use]
	pub fn params(&self) -> &[(String, String)] {
		&self.params
	}

	#[must_use]
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params
			.iter()
			.find(|(name, _)| name == key)
			.map(|(_, value)| value.as_str())
	}

	/// Absolute URL of the request under a site's REST root, e.g.
	/// `https://example.org/wp-json`.
	pub fn url(&self, rest_root: &str) -> Result<Url, FetchError> {
		let route = format!("{}{}", rest_root.trim_end_matches('/'), self.route());
		Url::parse_with_params(&route, &self.params)
			.map_err(|err| FetchError::InvalidUrl(format!("{route}: {err}")))
	}

	/// Route with the parameters appended as a query string.
	pub fn path(&self) -> Result<String, FetchError> {
		let url = self.url(RELATIVE_ROOT)?;
		Ok(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
	}
}
