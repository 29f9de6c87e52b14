use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::TaxQuery;

/// Coerce a single JSON value into a non-negative post identifier.
///
/// Integers keep their magnitude, floats are truncated, and strings must hold
/// an optionally signed integer. Anything else is not an identifier.
#[must_use]
pub fn absint(value: &Value) -> Option<u64> {
	match value {
		Value::Number(number) => number
			.as_u64()
			.or_else(|| number.as_i64().map(i64::unsigned_abs))
			.or_else(|| {
				number
					.as_f64()
					.filter(|float| float.is_finite())
					.map(|float| float.trunc().abs() as u64)
			}),
		Value::String(text) => parse_signed(text.trim()),
		_ => None,
	}
}

fn parse_signed(text: &str) -> Option<u64> {
	let digits = text
		.strip_prefix('-')
		.or_else(|| text.strip_prefix('+'))
		.unwrap_or(text);
	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	digits.parse().ok()
}

/// Coerce a block attribute override into identifiers.
///
/// Only arrays carry an override on the block path; any other shape yields
/// `None` and non-numeric entries are dropped.
#[must_use]
pub fn coerce_ids(value: &Value) -> Option<Vec<u64>> {
	match value {
		Value::Array(items) => Some(items.iter().filter_map(absint).collect()),
		_ => None,
	}
}

/// Coerce a request parameter into identifiers.
///
/// Wire parameters arrive either as arrays or as comma/space separated lists,
/// and a lone scalar is treated as a one-element list.
#[must_use]
pub fn coerce_id_list(value: &Value) -> Vec<u64> {
	match value {
		Value::Array(items) => items.iter().filter_map(absint).collect(),
		Value::String(text) => text
			.split(|ch: char| ch == ',' || ch.is_whitespace())
			.filter(|part| !part.is_empty())
			.filter_map(parse_signed)
			.collect(),
		other => absint(other).into_iter().collect(),
	}
}

/// Lenient deserializer for identifier lists such as `include` and `parents`.
pub(super) fn lenient_ids<'de, D>(deserializer: D) -> Result<Option<Vec<u64>>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(coerce_ids))
}

/// Lenient deserializer for `taxQuery`.
///
/// Term lists go through [`coerce_ids`]; a taxonomy whose terms are not a
/// list is dropped, and anything but an object is no filter at all.
pub(super) fn lenient_tax_query<'de, D>(deserializer: D) -> Result<Option<TaxQuery>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::Object(taxonomies)) => Some(
			taxonomies
				.into_iter()
				.filter_map(|(taxonomy, terms)| Some((taxonomy, coerce_ids(&terms)?)))
				.collect(),
		),
		_ => None,
	})
}

/// Accept authors stored either as strings or as bare numbers.
pub(super) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::String(text)) => Some(text),
		Some(Value::Number(number)) => Some(number.to_string()),
		_ => None,
	})
}
