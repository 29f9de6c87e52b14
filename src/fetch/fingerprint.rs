use crate::query::QueryAttributes;

/// Compute a stable 64-bit hash for the provided value.
///
/// FNV-1a keeps the output deterministic across processes and platforms.
#[must_use]
pub fn stable_hash64(value: &str) -> u64 {
	const FNV_OFFSET: u64 = 0xcbf29ce484222325;
	const FNV_PRIME: u64 = 0x00000100000001b3;

	let mut hash = FNV_OFFSET;
	for byte in value.as_bytes() {
		hash ^= u64::from(*byte);
		hash = hash.wrapping_mul(FNV_PRIME);
	}
	hash
}

/// Key deciding whether the suggestion list must be fetched again.
///
/// Derived from the serialized ancillary filters, so editing the selection or
/// its ordering mode never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
	#[must_use]
	pub fn of(query: &QueryAttributes) -> Self {
		let serialized = serde_json::to_string(&query.ancillary_filters()).unwrap_or_default();
		Self(stable_hash64(&serialized))
	}

	/// Key of a selected-post lookup.
	#[must_use]
	pub fn of_selection(post_type: &str, ids: &[u64]) -> Self {
		let ids = ids
			.iter()
			.map(u64::to_string)
			.collect::<Vec<_>>()
			.join(",");
		Self(stable_hash64(&format!("{post_type}:{ids}")))
	}

	#[must_use]
	pub fn value(self) -> u64 {
		self.0
	}
}
