//! Hand-picked, ordered post selection for the query loop block.
//!
//! The crate is split along the flow of a pick: [`query`] models the block
//! configuration, [`selection`] keeps its override keys consistent,
//! [`fetch`] looks up candidate posts in the background, [`panel`] is the
//! terminal picker on top of them, and [`rewrite`] turns a stored selection
//! into restricted list queries on both read paths.

pub mod app_dirs;
pub mod fetch;
pub mod logging;
pub mod panel;
pub mod post;
pub mod query;
pub mod rewrite;
pub mod selection;

pub use fetch::{FetchError, FixtureSource, HttpPostSource, PostSource, SuggestionFetcher};
pub use panel::{PickOutcome, PickerPanel, Theme};
pub use post::{CandidatePost, extract_post_id, format_label};
pub use query::{Block, BlockAttributes, QueryAttributes};
pub use rewrite::{
	Capabilities, CapabilityCheck, QueryVars, RestQueryFilter, RestRequest, rewrite_block_query,
	rewrite_rest_query,
};
pub use selection::{SelectionMachine, SelectionState};
