use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::fingerprint::Fingerprint;
use super::params::CandidateRequest;
use super::source::PostSource;
use super::worker::{self, FetchCommand, FetchResult};
use crate::post::CandidatePost;

/// UI-side handle of a background fetch worker.
///
/// Every issued lookup gets a fresh generation id. Only the answer carrying
/// the latest id is committed; anything older is dropped, so a slow response
/// for outdated filters can never overwrite a newer list.
pub struct FetchRuntime {
	tx: Sender<FetchCommand>,
	rx: Receiver<FetchResult>,
	latest_id: Arc<AtomicU64>,
	next_id: u64,
	current: Option<(u64, Fingerprint)>,
	in_flight: bool,
	posts: Vec<CandidatePost>,
}

impl FetchRuntime {
	pub fn new(source: Arc<dyn PostSource>) -> Self {
		let (tx, rx, latest_id) = worker::spawn(source);
		Self {
			tx,
			rx,
			latest_id,
			next_id: 0,
			current: None,
			in_flight: false,
			posts: Vec::new(),
		}
	}

	fn next_generation(&mut self) -> u64 {
		self.next_id = self.next_id.saturating_add(1);
		self.latest_id.store(self.next_id, AtomicOrdering::Release);
		self.next_id
	}

	/// Issue a lookup unless the committed or pending one has the same key.
	///
	/// `requests` are pages of one lookup; their answers are concatenated.
	/// Returns whether a new lookup was sent.
	pub fn issue(&mut self, key: Fingerprint, requests: Vec<CandidateRequest>) -> bool {
		if self.current_key() == Some(key) {
			return false;
		}

		let id = self.next_generation();
		debug!(
			id,
			key = key.value(),
			pages = requests.len(),
			route = %requests.first().map(CandidateRequest::route).unwrap_or_default(),
			"issuing candidate lookup"
		);
		self.current = Some((id, key));
		if self.tx.send(FetchCommand::Fetch { id, requests }).is_err() {
			warn!(id, "candidate worker is gone; showing no suggestions");
			self.in_flight = false;
			self.posts.clear();
			return false;
		}
		self.in_flight = true;
		true
	}

	/// Forget the current list and orphan any pending lookup.
	pub fn reset(&mut self) {
		self.next_generation();
		self.current = None;
		self.in_flight = false;
		self.posts.clear();
	}

	#[must_use]
	pub fn current_key(&self) -> Option<Fingerprint> {
		self.current.map(|(_, key)| key)
	}

	#[must_use]
	pub fn matches_latest(&self, result_id: u64) -> bool {
		self.current.is_some_and(|(id, _)| id == result_id)
	}

	#[must_use]
	pub fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	#[must_use]
	pub fn posts(&self) -> &[CandidatePost] {
		&self.posts
	}

	/// Drain finished lookups. Returns whether the committed list changed.
	pub fn pump(&mut self) -> bool {
		let mut changed = false;
		loop {
			match self.rx.try_recv() {
				Ok(result) => changed |= self.accept(result),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
		changed
	}

	/// Block until the pending lookup commits or `timeout` elapses.
	///
	/// Returns whether nothing is left in flight.
	pub fn wait(&mut self, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		while self.in_flight {
			let remaining = deadline.saturating_duration_since(Instant::now());
			if remaining.is_zero() {
				break;
			}
			match self.rx.recv_timeout(remaining) {
				Ok(result) => {
					self.accept(result);
				}
				Err(_) => break,
			}
		}
		!self.in_flight
	}

	fn accept(&mut self, result: FetchResult) -> bool {
		if !self.matches_latest(result.id) {
			trace!(id = result.id, "discarding stale lookup result");
			return false;
		}

		self.in_flight = false;
		self.posts = match result.outcome {
			Ok(posts) => posts,
			Err(err) => {
				warn!(error = %err, "candidate lookup failed; showing no suggestions");
				Vec::new()
			}
		};
		true
	}

	pub fn shutdown(&self) {
		let _ = self.tx.send(FetchCommand::Shutdown);
	}
}

impl Drop for FetchRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;
	use std::sync::mpsc::{self, Receiver, Sender};

	use super::*;
	use crate::fetch::error::FetchError;
	use crate::query::QueryAttributes;

	/// Answers each lookup with whatever the test hands it next.
	struct GatedSource {
		started: Mutex<Sender<Option<String>>>,
		answers: Mutex<Receiver<Result<Vec<CandidatePost>, FetchError>>>,
	}

	impl PostSource for GatedSource {
		fn fetch(&self, request: &CandidateRequest) -> Result<Vec<CandidatePost>, FetchError> {
			let search = request.param("search").map(str::to_string);
			let _ = self.started.lock().unwrap().send(search);
			self.answers
				.lock()
				.unwrap()
				.recv()
				.unwrap_or_else(|_| Ok(Vec::new()))
		}
	}

	struct Harness {
		runtime: FetchRuntime,
		started: Receiver<Option<String>>,
		answers: Sender<Result<Vec<CandidatePost>, FetchError>>,
	}

	fn harness() -> Harness {
		let (started_tx, started) = mpsc::channel();
		let (answers, answers_rx) = mpsc::channel();
		let source = GatedSource {
			started: Mutex::new(started_tx),
			answers: Mutex::new(answers_rx),
		};
		Harness {
			runtime: FetchRuntime::new(Arc::new(source)),
			started,
			answers,
		}
	}

	fn searching(text: &str) -> (Fingerprint, Vec<CandidateRequest>) {
		let query = QueryAttributes {
			search: Some(text.to_string()),
			..QueryAttributes::default()
		};
		(Fingerprint::of(&query), vec![CandidateRequest::suggestions(&query)])
	}

	fn post(id: u64) -> CandidatePost {
		CandidatePost::new(id, "post", "publish")
	}

	const TIMEOUT: Duration = Duration::from_secs(5);

	#[test]
	fn identical_keys_are_not_fetched_twice() {
		let mut h = harness();
		let (key, request) = searching("a");
		assert!(h.runtime.issue(key, request.clone()));
		assert!(!h.runtime.issue(key, request));
		h.answers.send(Ok(vec![post(1)])).unwrap();
		assert!(h.runtime.wait(TIMEOUT));
		assert_eq!(h.runtime.posts(), &[post(1)]);
	}

	#[test]
	fn stale_answers_never_overwrite_newer_ones() {
		let mut h = harness();
		let (old_key, old_request) = searching("old");
		let (new_key, new_request) = searching("new");

		h.runtime.issue(old_key, old_request);
		assert_eq!(h.started.recv_timeout(TIMEOUT).unwrap(), Some("old".into()));
		h.runtime.issue(new_key, new_request);

		h.answers.send(Ok(vec![post(1)])).unwrap();
		assert_eq!(h.started.recv_timeout(TIMEOUT).unwrap(), Some("new".into()));

		assert!(!h.runtime.pump());
		assert!(h.runtime.posts().is_empty());
		assert!(h.runtime.is_in_flight());

		h.answers.send(Ok(vec![post(2)])).unwrap();
		assert!(h.runtime.wait(TIMEOUT));
		assert_eq!(h.runtime.posts(), &[post(2)]);
		assert_eq!(h.runtime.current_key(), Some(new_key));
	}

	#[test]
	fn failures_degrade_to_an_empty_list() {
		let mut h = harness();
		let (key, request) = searching("a");
		h.runtime.issue(key, request);
		h.answers.send(Ok(vec![post(1)])).unwrap();
		assert!(h.runtime.wait(TIMEOUT));

		let (key, request) = searching("b");
		h.runtime.issue(key, request);
		h.answers
			.send(Err(FetchError::Decode("unexpected body".into())))
			.unwrap();
		assert!(h.runtime.wait(TIMEOUT));
		assert!(h.runtime.posts().is_empty());
	}

	#[test]
	fn reset_orphans_pending_lookups() {
		let mut h = harness();
		let (key, request) = searching("a");
		h.runtime.issue(key, request);
		h.started.recv_timeout(TIMEOUT).unwrap();
		h.runtime.reset();
		h.answers.send(Ok(vec![post(1)])).unwrap();

		std::thread::sleep(Duration::from_millis(50));
		assert!(!h.runtime.pump());
		assert!(h.runtime.posts().is_empty());
		assert!(!h.runtime.is_in_flight());
		assert_eq!(h.runtime.current_key(), None);
	}

	#[test]
	fn a_stopped_worker_does_not_leave_lookups_in_flight() {
		let mut h = harness();
		h.runtime.shutdown();

		let deadline = Instant::now() + TIMEOUT;
		let mut round = 0;
		loop {
			round += 1;
			let (key, requests) = searching(&format!("after shutdown {round}"));
			if !h.runtime.issue(key, requests) {
				break;
			}
			assert!(Instant::now() < deadline, "worker never stopped");
			std::thread::sleep(Duration::from_millis(10));
		}

		assert!(!h.runtime.is_in_flight());
		assert!(h.runtime.posts().is_empty());
		assert!(h.runtime.wait(TIMEOUT));
	}
}
