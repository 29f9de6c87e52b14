use thiserror::Error;

/// Failures of a candidate lookup.
///
/// None of these reach the picker; a failed lookup commits an empty list.
#[derive(Debug, Error)]
pub enum FetchError {
	/// The request could not be sent or the connection failed.
	#[error("request to {url} failed: {message}")]
	Transport { url: String, message: String },

	/// The endpoint answered with a non-success status.
	#[error("{url} answered {status}: {message}")]
	Status {
		url: String,
		status: u16,
		message: String,
	},

	/// The response body was not a list of posts.
	#[error("could not decode posts: {0}")]
	Decode(String),

	/// The site URL could not be combined with the collection route.
	#[error("invalid collection url {0}")]
	InvalidUrl(String),

	/// A fixture file could not be read.
	#[error("failed to read fixture {path}: {message}")]
	Fixture { path: String, message: String },
}
