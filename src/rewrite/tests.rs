use proptest::prelude::*;
use serde_json::json;

use super::*;

fn selection(ids: &[u64]) -> QueryAttributes {
	QueryAttributes {
		include: Some(ids.to_vec()),
		order_by: Some(ORDER_BY_INCLUDE.into()),
		..QueryAttributes::default()
	}
}

fn base_vars() -> QueryVars {
	let map = json!({
		"post_type": "post",
		"posts_per_page": 10,
		"orderby": "date",
		"order": "DESC"
	});
	serde_json::from_value(map).unwrap()
}

fn ordered_request(include: &str) -> RestRequest {
	RestRequest::new()
		.with_param("include", include)
		.with_param("orderby", "include")
}

#[test]
fn block_query_is_restricted_in_selection_order() {
	let vars = rewrite_block_query(base_vars(), &selection(&[5, 2, 9]));
	assert_eq!(vars.post_in(), Some(vec![5, 2, 9]));
	assert_eq!(vars.get(ORDERBY), Some(&json!(ORDERBY_POST_IN)));
	assert_eq!(vars.get(POST_STATUS), None);
	assert_eq!(vars.get("posts_per_page"), Some(&json!(10)));
}

#[test]
fn block_query_without_selection_is_untouched() {
	assert_eq!(
		rewrite_block_query(base_vars(), &QueryAttributes::default()),
		base_vars()
	);
	assert_eq!(rewrite_block_query(base_vars(), &selection(&[])), base_vars());
}

#[test]
fn anonymous_callers_cannot_trigger_the_override() {
	let args = rewrite_rest_query(base_vars(), &ordered_request("5,2,9"), &Capabilities::none());
	assert_eq!(args, base_vars());
}

#[test]
fn editors_get_the_override_and_unpublished_statuses() {
	let args = rewrite_rest_query(
		base_vars(),
		&ordered_request("5,2,9"),
		&Capabilities::editor(),
	);
	assert_eq!(args.post_in(), Some(vec![5, 2, 9]));
	assert_eq!(args.get(ORDERBY), Some(&json!(ORDERBY_POST_IN)));
	assert_eq!(
		args.get(POST_STATUS),
		Some(&json!(["publish", "draft", "pending", "private", "future"]))
	);
}

#[test]
fn include_without_ordered_directive_is_ignored() {
	let request = RestRequest::new()
		.with_param("include", "5,2,9")
		.with_param("orderby", "date");
	let args = rewrite_rest_query(base_vars(), &request, &Capabilities::editor());
	assert_eq!(args, base_vars());

	let request = RestRequest::new().with_param("include", "5,2,9");
	let args = rewrite_rest_query(base_vars(), &request, &Capabilities::editor());
	assert_eq!(args, base_vars());
}

#[test]
fn malformed_include_lists_are_a_no_op() {
	for include in [json!(""), json!("abc"), json!([]), json!(null)] {
		let request = RestRequest::new()
			.with_param("include", include)
			.with_param("orderby", "include");
		let args = rewrite_rest_query(base_vars(), &request, &Capabilities::editor());
		assert_eq!(args, base_vars());
	}
}

#[test]
fn filter_only_runs_for_registered_post_types() {
	let filter = RestQueryFilter::default();
	let request = ordered_request("3");
	let editor = Capabilities::editor();

	let untouched = filter.apply("product", base_vars(), &request, &editor);
	assert_eq!(untouched, base_vars());

	let rewritten = filter.apply("page", base_vars(), &request, &editor);
	assert_eq!(rewritten.post_in(), Some(vec![3]));
}

proptest! {
	#[test]
	fn restriction_matches_selection_exactly(
		ids in prop::collection::hash_set(any::<u64>(), 1..32)
			.prop_map(|set| set.into_iter().collect::<Vec<_>>())
	) {
		let vars = rewrite_block_query(base_vars(), &selection(&ids));
		prop_assert_eq!(vars.post_in(), Some(ids));
		prop_assert_eq!(vars.get(ORDERBY), Some(&json!(ORDERBY_POST_IN)));
	}

	#[test]
	fn rewriting_is_idempotent(ids in prop::collection::vec(any::<u64>(), 0..16)) {
		let context = selection(&ids);
		let once = rewrite_block_query(base_vars(), &context);
		let twice = rewrite_block_query(once.clone(), &context);
		prop_assert_eq!(once, twice);

		let request = ordered_request(
			&ids.iter().map(u64::to_string).collect::<Vec<_>>().join(","),
		);
		let editor = Capabilities::editor();
		let once = rewrite_rest_query(base_vars(), &request, &editor);
		let twice = rewrite_rest_query(once.clone(), &request, &editor);
		prop_assert_eq!(once, twice);
	}
}
