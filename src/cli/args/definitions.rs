use std::path::PathBuf;

use clap::{ArgAction, Args, ColorChoice, Parser, Subcommand};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `cherry-pick` binary.
#[derive(Parser, Debug)]
#[command(
	name = "cherry-pick",
	version,
	long_version = long_version(),
	about = "Hand-pick and order the posts shown by a query loop block",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "CHERRY_PICK_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "site",
		value_name = "URL",
		global = true,
		help = "REST root of the site to read posts from, e.g. https://example.org/wp-json"
	)]
	pub(crate) site: Option<String>,
	#[arg(
		long = "fixture",
		value_name = "FILE",
		global = true,
		help = "Read candidate posts from a JSON file instead of a site (default: none)"
	)]
	pub(crate) fixture: Option<PathBuf>,
	#[arg(
		long = "timeout",
		value_name = "SECS",
		global = true,
		help = "HTTP timeout in seconds (default: 30)"
	)]
	pub(crate) timeout: Option<u64>,
	#[arg(
		long = "post-types",
		value_delimiter = ',',
		value_name = "TYPE",
		global = true,
		help = "Post types whose read path honours picked posts (default: post,page)"
	)]
	pub(crate) post_types: Option<Vec<String>>,
	#[arg(
		long,
		value_name = "THEME",
		global = true,
		help = "Select a panel theme by name (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		short = 't',
		long,
		value_name = "TITLE",
		global = true,
		help = "Set the panel title (default: Pick Posts)"
	)]
	pub(crate) title: Option<String>,
	#[arg(
		long = "log-level",
		value_name = "LEVEL",
		global = true,
		help = "Log level: error, warn, info, debug or trace (default: warn)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		long = "log-file",
		value_name = "FILE",
		global = true,
		help = "Write logs to this file (default: stderr, or the data directory while picking)"
	)]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		global = true,
		help = "Raise the log level once per occurrence"
	)]
	pub(crate) verbose: u8,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		global = true,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
	/// Open the picker over a block configuration.
	Pick {
		#[command(flatten)]
		block: BlockArgs,
		#[arg(
			short = 'w',
			long = "write",
			help = "Write the accepted block back to FILE instead of printing it"
		)]
		write: bool,
	},
	/// Rewrite list-query variables the way the page renderer does.
	Render {
		#[command(flatten)]
		block: BlockArgs,
		#[arg(
			long = "vars",
			value_name = "FILE",
			help = "JSON object of list-query variables (default: {})"
		)]
		vars: Option<PathBuf>,
	},
	/// Rewrite a collection read the way the REST endpoint does.
	Rest {
		#[arg(
			long = "param",
			value_name = "KEY=VALUE",
			help = "Request parameter; `key[]=value` accumulates a list"
		)]
		params: Vec<String>,
		#[arg(
			long = "args",
			value_name = "FILE",
			help = "JSON object of query arguments (default: {})"
		)]
		args: Option<PathBuf>,
		#[arg(
			long = "post-type",
			value_name = "TYPE",
			default_value = "post",
			help = "Post type of the collection being read"
		)]
		post_type: String,
		#[arg(long = "can-edit", help = "Treat the caller as able to edit posts")]
		can_edit: bool,
	},
	/// Show the candidate lookups a block issues.
	Params(BlockArgs),
	/// Recover post identifiers from display tokens.
	Token {
		#[arg(required = true, value_name = "TOKEN")]
		tokens: Vec<String>,
	},
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockArgs {
	#[arg(
		short = 'b',
		long = "block",
		value_name = "FILE",
		help = "Block JSON: either {\"blockName\", \"attrs\"} or a bare attrs object"
	)]
	pub(crate) block: PathBuf,
}
