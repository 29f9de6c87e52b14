//! Structured logging through `tracing` and `tracing-subscriber`.
//!
//! The picker owns the terminal while it runs, so interactive commands route
//! logs into a file instead of stderr. `CHERRY_PICK_LOG` accepts any
//! `EnvFilter` directive and overrides the configured level.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "CHERRY_PICK_LOG";

/// File name used when logs go to the data directory.
pub const LOG_FILE_NAME: &str = "cherry-pick.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
	pub level: Level,
	/// Write to this file instead of stderr.
	pub log_file: Option<PathBuf>,
	pub with_ansi: bool,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			level: Level::WARN,
			log_file: None,
			with_ansi: true,
		}
	}
}

impl LogConfig {
	/// - 0: warn
	/// - 1 (`-v`): info
	/// - 2 (`-vv`): debug
	/// - 3+: trace
	#[must_use]
	pub fn from_verbosity(verbosity: u8) -> Self {
		let level = match verbosity {
			0 => Level::WARN,
			1 => Level::INFO,
			2 => Level::DEBUG,
			_ => Level::TRACE,
		};
		Self {
			level,
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	#[must_use]
	pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
		self.with_ansi = path.is_none();
		self.log_file = path;
		self
	}
}

/// Parse a level name such as `debug` or `WARN`.
pub fn parse_level(value: &str) -> Result<Level> {
	Level::from_str(value.trim()).map_err(|_| {
		anyhow!("unknown log level '{value}' (expected error, warn, info, debug or trace)")
	})
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
	let filter = env_filter(config.level);
	match &config.log_file {
		Some(path) => {
			let writer = SharedFileWriter::open(path)?;
			tracing_subscriber::registry()
				.with(filter)
				.with(
					fmt::layer()
						.with_writer(writer)
						.with_ansi(false)
						.with_target(true),
				)
				.try_init()?;
		}
		None => {
			tracing_subscriber::registry()
				.with(filter)
				.with(
					fmt::layer()
						.with_writer(io::stderr)
						.with_ansi(config.with_ansi)
						.with_target(false)
						.without_time(),
				)
				.try_init()?;
		}
	}
	Ok(())
}

fn env_filter(level: Level) -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
		let level = level.as_str().to_lowercase();
		// Dependencies stay at warn.
		EnvFilter::new(format!("warn,cherry_pick={level}"))
	})
}

#[derive(Clone)]
struct SharedFileWriter {
	file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
	fn open(path: &Path) -> Result<Self> {
		if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
			fs::create_dir_all(parent)
				.with_context(|| format!("failed to create log directory {}", parent.display()))?;
		}
		let file = OpenOptions::new()
			.create(true)
			.append(true)
			.open(path)
			.with_context(|| format!("failed to open log file {}", path.display()))?;
		Ok(Self {
			file: Arc::new(Mutex::new(file)),
		})
	}
}

struct SharedFileGuard {
	file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.file
			.lock()
			.map_err(|_| io::Error::other("log file lock poisoned"))?
			.write(buf)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.file
			.lock()
			.map_err(|_| io::Error::other("log file lock poisoned"))?
			.flush()
	}
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
	type Writer = SharedFileGuard;

	fn make_writer(&'a self) -> Self::Writer {
		SharedFileGuard {
			file: Arc::clone(&self.file),
		}
	}
}
