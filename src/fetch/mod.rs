//! Asynchronous lookup of pick candidates.
//!
//! Lookups run on a background worker thread; [`FetchRuntime`] tags each one
//! with a generation id and commits only the newest answer. On top of it,
//! [`SuggestionFetcher`] follows the block's ancillary filters and
//! [`SelectedLookup`] resolves the current selection to post records.

mod error;
mod fingerprint;
mod params;
mod runtime;
mod source;
mod suggestions;
mod worker;

pub use error::FetchError;
pub use fingerprint::{Fingerprint, stable_hash64};
pub use params::{CandidateRequest, POSTS_PER_PAGE, rest_base};
pub use runtime::FetchRuntime;
pub use source::{DEFAULT_TIMEOUT, FixtureSource, HttpPostSource, PostSource};
pub use suggestions::{SelectedLookup, SuggestionFetcher};
