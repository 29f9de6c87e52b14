use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Restriction key of the list-query engine.
pub const POST_IN: &str = "post__in";
/// Sort key of the list-query engine.
pub const ORDERBY: &str = "orderby";
/// Sort value that preserves the sequence given in [`POST_IN`].
pub const ORDERBY_POST_IN: &str = "post__in";
/// Visibility key of the list-query engine.
pub const POST_STATUS: &str = "post_status";

/// Variables handed to the host's list-query engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryVars(Map<String, Value>);

impl QueryVars {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		self.0.insert(key.into(), value)
	}

	#[must_use]
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	#[must_use]
	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}

	/// Restricted identifiers, when a restriction is set.
	#[must_use]
	pub fn post_in(&self) -> Option<Vec<u64>> {
		self.0
			.get(POST_IN)?
			.as_array()
			.map(|items| items.iter().filter_map(Value::as_u64).collect())
	}

	/// Restrict results to `ids` and keep their order.
	pub(super) fn restrict_to(&mut self, ids: &[u64]) {
		self.0.insert(POST_IN.to_string(), Value::from(ids.to_vec()));
		self.0
			.insert(ORDERBY.to_string(), Value::from(ORDERBY_POST_IN));
	}

	pub(super) fn set_statuses(&mut self, statuses: &[&str]) {
		self.0.insert(POST_STATUS.to_string(), Value::from(statuses.to_vec()));
	}
}

impl From<Map<String, Value>> for QueryVars {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}
