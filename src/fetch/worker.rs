use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::trace;

use super::error::FetchError;
use super::params::CandidateRequest;
use super::source::PostSource;
use crate::post::CandidatePost;

/// Commands understood by the background fetch worker.
#[derive(Debug)]
pub(crate) enum FetchCommand {
	/// Look up candidates for the requests and concatenate the pages.
	Fetch {
		/// Generation that lets the UI correlate the answer with its request.
		id: u64,
		requests: Vec<CandidateRequest>,
	},
	/// Stop the background worker thread.
	Shutdown,
}

/// Answer to a [`FetchCommand::Fetch`].
#[derive(Debug)]
pub(crate) struct FetchResult {
	pub(crate) id: u64,
	pub(crate) outcome: Result<Vec<CandidatePost>, FetchError>,
}

/// Launch a worker thread that serves lookups from `source`.
pub(crate) fn spawn(
	source: Arc<dyn PostSource>,
) -> (Sender<FetchCommand>, Receiver<FetchResult>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();
	let latest_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_id);

	thread::spawn(move || worker_loop(source.as_ref(), command_rx, result_tx, &thread_latest));

	(command_tx, result_rx, latest_id)
}

fn worker_loop(
	source: &dyn PostSource,
	command_rx: Receiver<FetchCommand>,
	result_tx: Sender<FetchResult>,
	latest_id: &AtomicU64,
) {
	while let Ok(command) = command_rx.recv() {
		match command {
			FetchCommand::Fetch { id, requests } => {
				if is_superseded(id, latest_id) {
					trace!(id, "skipping superseded lookup");
					continue;
				}
				let outcome = fetch_all(source, &requests);
				if result_tx.send(FetchResult { id, outcome }).is_err() {
					break;
				}
			}
			FetchCommand::Shutdown => break,
		}
	}
}

/// Run every page in order. The first failure fails the whole lookup.
fn fetch_all(
	source: &dyn PostSource,
	requests: &[CandidateRequest],
) -> Result<Vec<CandidatePost>, FetchError> {
	let mut posts = Vec::new();
	for request in requests {
		posts.extend(source.fetch(request)?);
	}
	Ok(posts)
}

fn is_superseded(id: u64, latest_id: &AtomicU64) -> bool {
	latest_id.load(AtomicOrdering::Acquire) != id
}
