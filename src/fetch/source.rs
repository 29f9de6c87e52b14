use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use super::error::FetchError;
use super::params::{CandidateRequest, POSTS_PER_PAGE};
use crate::post::CandidatePost;
use crate::query::{ORDER_BY_INCLUDE, coerce_id_list};

/// Default HTTP timeout for collection reads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport that answers candidate lookups.
pub trait PostSource: Send + Sync {
	fn fetch(&self, request: &CandidateRequest) -> Result<Vec<CandidatePost>, FetchError>;
}

/// Reads candidates from a site's REST root over HTTP.
pub struct HttpPostSource {
	client: Client,
	base_url: String,
}

impl HttpPostSource {
	/// `base_url` is the REST root, e.g. `https://example.org/wp-json`.
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
		let base_url = base_url.into();
		let client = Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|err| FetchError::Transport {
				url: base_url.clone(),
				message: err.to_string(),
			})?;
		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	/// Absolute URL of `request`.
	pub fn url_for(&self, request: &CandidateRequest) -> Result<Url, FetchError> {
		request.url(&self.base_url)
	}
}

impl PostSource for HttpPostSource {
	fn fetch(&self, request: &CandidateRequest) -> Result<Vec<CandidatePost>, FetchError> {
		let url = self.url_for(request)?;
		let url_text = url.to_string();
		debug!(url = %url_text, "fetching candidate posts");

		let response = self
			.client
			.get(url)
			.header(ACCEPT, "application/json")
			.send()
			.map_err(|err| FetchError::Transport {
				url: url_text.clone(),
				message: err.to_string(),
			})?;

		if !response.status().is_success() {
			let status = response.status().as_u16();
			let message = response
				.text()
				.unwrap_or_else(|_| "unknown error".to_string());
			return Err(FetchError::Status {
				url: url_text,
				status,
				message,
			});
		}

		response
			.json::<Vec<CandidatePost>>()
			.map_err(|err| FetchError::Decode(err.to_string()))
	}
}

/// Serves candidates from an in-memory list in the order they were given.
///
/// Requests are narrowed by post type, status, search text and an ordered
/// `include` list. `orderby` and `order` are ignored apart from the
/// `include` ordering, so a fixture should list its posts newest first.
/// Posts carry no author, parent or term data, so those filters are not
/// applied either.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
	posts: Vec<CandidatePost>,
}

impl FixtureSource {
	#[must_use]
	pub fn new(posts: Vec<CandidatePost>) -> Self {
		Self { posts }
	}

	/// Load a JSON array of posts.
	pub fn from_path(path: &Path) -> Result<Self, FetchError> {
		let fixture_error = |message: String| FetchError::Fixture {
			path: path.display().to_string(),
			message,
		};
		let contents = fs::read_to_string(path).map_err(|err| fixture_error(err.to_string()))?;
		let posts =
			serde_json::from_str(&contents).map_err(|err| fixture_error(err.to_string()))?;
		Ok(Self::new(posts))
	}
}

impl PostSource for FixtureSource {
	fn fetch(&self, request: &CandidateRequest) -> Result<Vec<CandidatePost>, FetchError> {
		let statuses: Option<Vec<&str>> = request
			.param("status")
			.map(|list| list.split(',').collect());
		let search = request.param("search").map(str::to_lowercase);
		let limit = request
			.param("per_page")
			.and_then(|value| value.parse().ok())
			.unwrap_or(POSTS_PER_PAGE);

		let matches = |post: &&CandidatePost| {
			post.post_type == request.post_type()
				&& statuses
					.as_ref()
					.is_none_or(|allowed| allowed.contains(&post.status.as_str()))
				&& search
					.as_ref()
					.is_none_or(|needle| post.display_title().to_lowercase().contains(needle))
		};

		let include = request
			.param("include")
			.map(|list| coerce_id_list(&list.into()));
		let posts: Vec<CandidatePost> = match include {
			Some(ids) if request.param("orderby") == Some(ORDER_BY_INCLUDE) => ids
				.iter()
				.filter_map(|id| self.posts.iter().find(|post| post.id == *id))
				.filter(matches)
				.cloned()
				.collect(),
			Some(ids) => self
				.posts
				.iter()
				.filter(|post| ids.contains(&post.id))
				.filter(matches)
				.cloned()
				.collect(),
			None => self.posts.iter().filter(matches).cloned().collect(),
		};

		Ok(posts.into_iter().take(limit).collect())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use serde_json::json;

	use super::*;
	use crate::query::QueryAttributes;

	fn fixture() -> FixtureSource {
		FixtureSource::new(vec![
			CandidatePost::new(5, "post", "publish").with_title("Launch notes"),
			CandidatePost::new(4, "post", "draft").with_title("Roadmap"),
			CandidatePost::new(3, "page", "publish").with_title("About"),
			CandidatePost::new(2, "post", "trash").with_title("Old"),
			CandidatePost::new(1, "post", "publish").with_title("Hello world"),
		])
	}

	fn ids(posts: &[CandidatePost]) -> Vec<u64> {
		posts.iter().map(|post| post.id).collect()
	}

	#[test]
	fn suggestions_respect_type_status_and_search() {
		let source = fixture();
		let all = source
			.fetch(&CandidateRequest::suggestions(&QueryAttributes::default()))
			.unwrap();
		assert_eq!(ids(&all), vec![5, 4, 1]);

		let query: QueryAttributes = serde_json::from_value(json!({ "search": "ROAD" })).unwrap();
		let searched = source.fetch(&CandidateRequest::suggestions(&query)).unwrap();
		assert_eq!(ids(&searched), vec![4]);
	}

	#[test]
	fn suggestions_keep_fixture_order() {
		let source = FixtureSource::new(vec![
			CandidatePost::new(1, "post", "publish"),
			CandidatePost::new(9, "post", "publish"),
			CandidatePost::new(4, "post", "publish"),
		]);
		let posts = source
			.fetch(&CandidateRequest::suggestions(&QueryAttributes::default()))
			.unwrap();
		assert_eq!(ids(&posts), vec![1, 9, 4]);
	}

	#[test]
	fn selected_lookups_keep_selection_order() {
		let posts = fixture()
			.fetch(&CandidateRequest::selected("post", &[1, 5, 4, 3]))
			.unwrap();
		assert_eq!(ids(&posts), vec![1, 5, 4]);
	}

	#[test]
	fn fixtures_load_from_json_files() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"[{{"id": 8, "type": "post", "status": "publish", "title": {{"rendered": "Eight"}}}}]"#
		)
		.unwrap();
		let source = FixtureSource::from_path(file.path()).unwrap();
		let posts = source
			.fetch(&CandidateRequest::suggestions(&QueryAttributes::default()))
			.unwrap();
		assert_eq!(ids(&posts), vec![8]);
	}

	#[test]
	fn broken_fixtures_report_their_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "not json").unwrap();
		let err = FixtureSource::from_path(file.path()).unwrap_err();
		assert!(matches!(err, FetchError::Fixture { .. }));
	}

	#[test]
	fn http_urls_join_the_rest_root_and_route() {
		let source = HttpPostSource::new("https://example.org/wp-json/", DEFAULT_TIMEOUT).unwrap();
		let url = source
			.url_for(&CandidateRequest::selected("page", &[2, 7]))
			.unwrap();
		assert_eq!(url.path(), "/wp-json/wp/v2/pages");
		assert!(url.query().unwrap().contains("include=2%2C7"));
	}
}
