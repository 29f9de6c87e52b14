//! Rewriting of list queries so they honour an explicit, ordered selection.
//!
//! Two entry points apply the same restriction:
//!
//! * [`rewrite_block_query`] runs on the in-page render path. It never widens
//!   post visibility, so only public content can ever be listed there.
//! * [`RestQueryFilter::apply`] runs on the external read path. It only takes
//!   effect when the request asks for `orderby=include` and the caller can
//!   edit posts, and then it also admits unpublished statuses so editors can
//!   preview a pick list that contains drafts.

mod request;
mod vars;

use tracing::debug;

use crate::post::VISIBLE_STATUSES;
use crate::query::{ORDER_BY_INCLUDE, QueryAttributes, coerce_id_list};

pub use request::{Capabilities, CapabilityCheck, EDIT_POSTS, RestRequest};
pub use vars::{ORDERBY, ORDERBY_POST_IN, POST_IN, POST_STATUS, QueryVars};

/// Post types whose read path is filtered when nothing else is configured.
pub const DEFAULT_REST_POST_TYPES: [&str; 2] = ["post", "page"];

/// Restrict `vars` to the identifiers selected on the block, in order.
///
/// `context` is the block's `query` attribute. Without a non-empty override
/// the variables are returned unchanged.
#[must_use]
pub fn rewrite_block_query(mut vars: QueryVars, context: &QueryAttributes) -> QueryVars {
	let ids = context.selected_ids();
	if ids.is_empty() {
		return vars;
	}

	debug!(count = ids.len(), "restricting block query to picked posts");
	vars.restrict_to(ids);
	vars
}

/// Read-path filter installed for a set of post types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestQueryFilter {
	post_types: Vec<String>,
}

impl Default for RestQueryFilter {
	fn default() -> Self {
		Self::for_post_types(DEFAULT_REST_POST_TYPES)
	}
}

impl RestQueryFilter {
	pub fn for_post_types<I, S>(post_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			post_types: post_types.into_iter().map(Into::into).collect(),
		}
	}

	#[must_use]
	pub fn post_types(&self) -> &[String] {
		&self.post_types
	}

	/// Whether the filter is installed for `post_type`.
	#[must_use]
	pub fn applies_to(&self, post_type: &str) -> bool {
		self.post_types.iter().any(|candidate| candidate == post_type)
	}

	/// Filter the query arguments of a collection read for `post_type`.
	#[must_use]
	pub fn apply(
		&self,
		post_type: &str,
		args: QueryVars,
		request: &RestRequest,
		caller: &dyn CapabilityCheck,
	) -> QueryVars {
		if !self.applies_to(post_type) {
			return args;
		}
		rewrite_rest_query(args, request, caller)
	}
}

/// Apply the override to a read request's query arguments.
///
/// Callers without the edit capability, requests that do not ask for
/// `orderby=include`, and empty `include` lists all fall through untouched.
#[must_use]
pub fn rewrite_rest_query(
	mut args: QueryVars,
	request: &RestRequest,
	caller: &dyn CapabilityCheck,
) -> QueryVars {
	let Some(include) = request.param("include") else {
		return args;
	};
	if request.param_str("orderby") != Some(ORDER_BY_INCLUDE) {
		return args;
	}

	let ids = coerce_id_list(include);
	if ids.is_empty() {
		return args;
	}

	if !caller.current_user_can(EDIT_POSTS) {
		debug!("ignoring ordered include from a caller without {EDIT_POSTS}");
		return args;
	}

	debug!(count = ids.len(), "restricting read query to picked posts");
	args.restrict_to(&ids);
	args.set_statuses(&VISIBLE_STATUSES);
	args
}

#[cfg(test)]
mod tests;
