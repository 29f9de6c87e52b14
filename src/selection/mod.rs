//! The ordered-selection state machine.
//!
//! The machine owns every write to the override part of a block's `query`
//! attribute: the `include` identifiers and the `orderBy` ordering mode. Its
//! invariant is that `orderBy` is `"include"` exactly when `include` holds at
//! least one identifier, and that an empty selection is encoded by the
//! absence of both keys rather than by empty values. The override never
//! repeats an identifier.

use std::collections::HashSet;

use tracing::debug;

use crate::post::extract_post_id;
use crate::query::{ORDER_BY_INCLUDE, QueryAttributes};

/// Observable state of a block's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
	/// No override; the ancillary filters decide membership and order.
	NoSelection,
	/// Results are exactly these identifiers, in this order.
	ExplicitOrder(Vec<u64>),
}

impl SelectionState {
	#[must_use]
	pub fn of(query: &QueryAttributes) -> Self {
		match query.include.as_deref() {
			Some(ids) if !ids.is_empty() => Self::ExplicitOrder(ids.to_vec()),
			_ => Self::NoSelection,
		}
	}
}

/// What a reconciliation pass changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
	/// The post type changed and the old selection was dropped.
	PostTypeChanged { from: String, to: String },
	/// The ordering mode was forced back to `"include"`.
	Healed,
	/// A stale ordering mode or empty `include` was removed.
	Normalized,
}

/// Drives selection transitions for one block instance.
#[derive(Debug, Clone)]
pub struct SelectionMachine {
	previous_post_type: String,
}

impl SelectionMachine {
	/// Start from whatever the persisted configuration encodes.
	#[must_use]
	pub fn new(query: &QueryAttributes) -> Self {
		Self {
			previous_post_type: query.post_type().to_string(),
		}
	}

	/// Replace the selection with the identifiers recovered from `tokens`.
	///
	/// Tokens without a trailing `(ID: <digits>)` are dropped, as are repeats
	/// of an identifier already taken from an earlier token.
	pub fn apply_tokens<S>(&mut self, query: &mut QueryAttributes, tokens: &[S]) -> SelectionState
	where
		S: AsRef<str>,
	{
		let ids: Vec<u64> = tokens
			.iter()
			.filter_map(|token| extract_post_id(token.as_ref()))
			.collect();
		self.set_ids(query, ids)
	}

	/// Replace the selection with `ids`, in order, keeping the first
	/// occurrence of each identifier.
	pub fn set_ids(&mut self, query: &mut QueryAttributes, mut ids: Vec<u64>) -> SelectionState {
		let mut seen = HashSet::with_capacity(ids.len());
		ids.retain(|id| seen.insert(*id));
		if ids.is_empty() {
			debug!("selection cleared");
			clear(query);
		} else {
			debug!(count = ids.len(), "selection updated");
			query.include = Some(ids);
			query.order_by = Some(ORDER_BY_INCLUDE.to_string());
		}
		SelectionState::of(query)
	}

	/// Bring `query` back in line after an external change.
	///
	/// A post type change drops any selection. An active selection forces
	/// the explicit ordering mode, and a leftover ordering mode or empty
	/// `include` without a selection is removed.
	pub fn reconcile(&mut self, query: &mut QueryAttributes) -> Option<Reconciliation> {
		let post_type = query.post_type();
		if post_type != self.previous_post_type {
			let from = std::mem::replace(&mut self.previous_post_type, post_type.to_string());
			if !query.selected_ids().is_empty() {
				debug!(%from, to = %self.previous_post_type, "post type changed; dropping selection");
				clear(query);
				return Some(Reconciliation::PostTypeChanged {
					from,
					to: self.previous_post_type.clone(),
				});
			}
		}

		if !query.selected_ids().is_empty() {
			if !query.orders_by_include() {
				debug!("forcing explicit ordering for an active selection");
				query.order_by = Some(ORDER_BY_INCLUDE.to_string());
				return Some(Reconciliation::Healed);
			}
			return None;
		}

		if query.include.is_some() || query.orders_by_include() {
			query.include = None;
			if query.orders_by_include() {
				query.order_by = None;
			}
			return Some(Reconciliation::Normalized);
		}
		None
	}
}

/// Remove the override entirely so the ancillary filters regain control.
fn clear(query: &mut QueryAttributes) {
	query.include = None;
	query.order_by = None;
}
