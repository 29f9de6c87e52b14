use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Capability required before the read path admits unpublished posts.
///
/// This is the generic "edit posts" capability, not one scoped to the post
/// type being read.
pub const EDIT_POSTS: &str = "edit_posts";

/// Answers capability questions about the current caller.
pub trait CapabilityCheck {
	fn current_user_can(&self, capability: &str) -> bool;
}

/// A fixed capability set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<String>);

impl Capabilities {
	/// An anonymous caller.
	#[must_use]
	pub fn none() -> Self {
		Self::default()
	}

	/// A caller able to edit posts.
	#[must_use]
	pub fn editor() -> Self {
		Self::none().with(EDIT_POSTS)
	}

	#[must_use]
	pub fn with(mut self, capability: impl Into<String>) -> Self {
		self.0.insert(capability.into());
		self
	}
}

impl CapabilityCheck for Capabilities {
	fn current_user_can(&self, capability: &str) -> bool {
		self.0.contains(capability)
	}
}

/// Parameters of a collection read request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestRequest {
	params: Map<String, Value>,
}

impl RestRequest {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.params.insert(key.into(), value.into());
		self
	}

	/// Build a request from `key=value` pairs.
	///
	/// Keys ending in `[]` accumulate into an array, so both `include=5,2` and
	/// `include[]=5&include[]=2` describe the same list.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut params = Map::new();
		for (key, value) in pairs {
			let value = Value::String(value.into());
			match key.as_ref().strip_suffix("[]") {
				Some(name) => {
					let entry = params
						.entry(name.to_string())
						.or_insert_with(|| Value::Array(Vec::new()));
					match entry {
						Value::Array(items) => items.push(value),
						other => *other = Value::Array(vec![other.take(), value]),
					}
				}
				None => {
					params.insert(key.as_ref().to_string(), value);
				}
			}
		}
		Self { params }
	}

	#[must_use]
	pub fn param(&self, key: &str) -> Option<&Value> {
		self.params.get(key)
	}

	#[must_use]
	pub fn param_str(&self, key: &str) -> Option<&str> {
		self.params.get(key).and_then(Value::as_str)
	}
}
