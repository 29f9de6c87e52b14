use frizbee::{Config as Options, match_list};

/// Candidate lists above this size enable the typo-bounded prefilter.
const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// Builds fuzzy matching options for the provided query and dataset size.
fn config_for_query(query: &str, dataset_len: usize) -> Options {
	let mut config = Options {
		prefilter: false,
		..Options::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0..=1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		_ => 3,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
		config.prefilter = true;
		config.max_typos = Some(allowed_typos);
	} else {
		config.max_typos = None;
	}
	config.sort = false;

	config
}

/// Indices of `tokens` matching `query`, best match first.
///
/// An empty query keeps every token in its original order.
pub(crate) fn rank(query: &str, tokens: &[String]) -> Vec<usize> {
	let trimmed = query.trim();
	if trimmed.is_empty() {
		return (0..tokens.len()).collect();
	}

	let haystacks: Vec<&str> = tokens.iter().map(String::as_str).collect();
	let config = config_for_query(trimmed, haystacks.len());
	let mut scored: Vec<(usize, u16)> = match_list(trimmed, &haystacks, &config)
		.into_iter()
		.filter(|entry| entry.score > 0)
		.map(|entry| (entry.index as usize, entry.score))
		.collect();
	scored.sort_by(|(left_index, left), (right_index, right)| {
		right.cmp(left).then(left_index.cmp(right_index))
	});
	scored.into_iter().map(|(index, _)| index).collect()
}
