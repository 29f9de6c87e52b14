//! Configuration model for the query loop block.
//!
//! [`QueryAttributes`] mirrors the block's `query` attribute. Only the fields
//! this crate reasons about are typed; everything else is carried through in
//! [`QueryAttributes::extra`] so a block configuration survives an edit
//! untouched apart from the selection override.

mod coerce;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use coerce::{absint, coerce_id_list, coerce_ids};

/// Block name of the query loop block the picker attaches to.
pub const QUERY_LOOP_BLOCK: &str = "core/query";

/// Post type assumed when the block does not name one.
pub const DEFAULT_POST_TYPE: &str = "post";

/// Ordering mode meaning "preserve the sequence in `include`".
pub const ORDER_BY_INCLUDE: &str = "include";

/// Taxonomy name to term identifiers.
pub type TaxQuery = BTreeMap<String, Vec<u64>>;

/// The block's `query` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAttributes {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_type: Option<String>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "coerce::lenient_ids"
	)]
	pub include: Option<Vec<u64>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub order_by: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub inherit: Option<bool>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "coerce::lenient_ids"
	)]
	pub parents: Option<Vec<u64>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "coerce::string_or_number"
	)]
	pub author: Option<String>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "coerce::lenient_tax_query"
	)]
	pub tax_query: Option<TaxQuery>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl QueryAttributes {
	/// Post type the block lists, falling back to [`DEFAULT_POST_TYPE`].
	#[must_use]
	pub fn post_type(&self) -> &str {
		self.post_type.as_deref().unwrap_or(DEFAULT_POST_TYPE)
	}

	/// Whether the block follows the page's default query.
	#[must_use]
	pub fn inherits(&self) -> bool {
		self.inherit.unwrap_or(false)
	}

	/// Explicitly selected identifiers, empty when there is no override.
	#[must_use]
	pub fn selected_ids(&self) -> &[u64] {
		self.include.as_deref().unwrap_or_default()
	}

	/// Whether the ordering mode is the explicit-order directive.
	#[must_use]
	pub fn orders_by_include(&self) -> bool {
		self.order_by.as_deref() == Some(ORDER_BY_INCLUDE)
	}

	/// The ancillary filters only: the override and any ordering directive
	/// are stripped.
	#[must_use]
	pub fn ancillary_filters(&self) -> Self {
		Self {
			include: None,
			order_by: None,
			..self.clone()
		}
	}
}

/// Attributes of a query loop block instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockAttributes {
	#[serde(default)]
	pub query: QueryAttributes,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A parsed block as stored in post content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
	pub block_name: String,
	#[serde(default)]
	pub attrs: BlockAttributes,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Block {
	/// Whether the picker attaches to this block.
	#[must_use]
	pub fn is_query_loop(&self) -> bool {
		self.block_name == QUERY_LOOP_BLOCK
	}
}
