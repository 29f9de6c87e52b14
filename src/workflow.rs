use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use cherry_pick::fetch::CandidateRequest;
use cherry_pick::query::QUERY_LOOP_BLOCK;
use cherry_pick::{
	Block, BlockAttributes, Capabilities, FixtureSource, HttpPostSource, PickerPanel, PostSource,
	QueryVars, RestQueryFilter, RestRequest, extract_post_id, rewrite_block_query,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::cli::{BlockArgs, Command, Report};
use crate::settings::{PostSourceConfig, ResolvedConfig};

/// Runs one command against the resolved configuration.
pub(crate) struct Workflow {
	config: ResolvedConfig,
}

impl Workflow {
	pub(crate) fn new(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(&self, command: &Command) -> Result<Report> {
		match command {
			Command::Pick { block, write } => self.pick(block, *write),
			Command::Render { block, vars } => render(block, vars.as_deref()),
			Command::Rest {
				params,
				args,
				post_type,
				can_edit,
			} => self.rest(params, args.as_deref(), post_type, *can_edit),
			Command::Params(block) => params(block),
			Command::Token { tokens } => Ok(Report::Tokens(
				tokens
					.iter()
					.map(|token| (token.clone(), extract_post_id(token)))
					.collect(),
			)),
		}
	}

	fn pick(&self, args: &BlockArgs, write: bool) -> Result<Report> {
		let file = BlockFile::read(&args.block)?;
		let source = self.post_source()?;

		let mut panel = PickerPanel::new(file.block.clone(), source)
			.with_theme(self.config.theme())
			.with_title(self.config.title.clone());
		if !panel.is_visible() {
			bail!(
				"{} is not a {QUERY_LOOP_BLOCK} block with its own query; there is nothing to pick",
				args.block.display()
			);
		}

		let outcome = panel.run()?;
		info!(accepted = outcome.accepted, "picker closed");

		let written = if outcome.accepted && write {
			file.write(&outcome.block)?;
			Some(args.block.clone())
		} else {
			None
		};
		Ok(Report::Pick { outcome, written })
	}

	fn rest(
		&self,
		params: &[String],
		args: Option<&Path>,
		post_type: &str,
		can_edit: bool,
	) -> Result<Report> {
		let pairs = params
			.iter()
			.map(|param| {
				param
					.split_once('=')
					.ok_or_else(|| anyhow!("expected KEY=VALUE, got '{param}'"))
			})
			.collect::<Result<Vec<_>>>()?;
		let request = RestRequest::from_pairs(pairs);
		let args = read_vars(args)?;
		let caller = if can_edit {
			Capabilities::editor()
		} else {
			Capabilities::none()
		};

		let filter = RestQueryFilter::for_post_types(self.config.rest_post_types.iter().cloned());
		Ok(Report::Vars(filter.apply(post_type, args, &request, &caller)))
	}

	fn post_source(&self) -> Result<Arc<dyn PostSource>> {
		match &self.config.source {
			PostSourceConfig::Fixture(path) => Ok(Arc::new(FixtureSource::from_path(path)?)),
			PostSourceConfig::Site { url, timeout } => {
				Ok(Arc::new(HttpPostSource::new(url.clone(), *timeout)?))
			}
			PostSourceConfig::Unset => Err(anyhow!(
				"no post source configured: pass --site URL or --fixture FILE, or set [site] in the config"
			)),
		}
	}
}

fn render(args: &BlockArgs, vars: Option<&Path>) -> Result<Report> {
	let file = BlockFile::read(&args.block)?;
	let vars = read_vars(vars)?;
	Ok(Report::Vars(rewrite_block_query(
		vars,
		&file.block.attrs.query,
	)))
}

/// The lookups the picker issues for a block, suggestions first.
fn params(args: &BlockArgs) -> Result<Report> {
	let file = BlockFile::read(&args.block)?;
	let query = &file.block.attrs.query;
	if query.inherits() {
		return Ok(Report::Requests(Vec::new()));
	}

	let mut requests = vec![CandidateRequest::suggestions(query)];
	requests.extend(CandidateRequest::selected_batches(
		query.post_type(),
		query.selected_ids(),
	));
	Ok(Report::Requests(requests))
}

fn read_vars(path: Option<&Path>) -> Result<QueryVars> {
	let Some(path) = path else {
		return Ok(QueryVars::new());
	};
	let contents =
		fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	let map: Map<String, Value> = serde_json::from_str(&contents)
		.with_context(|| format!("{} is not a JSON object", path.display()))?;
	Ok(QueryVars::from(map))
}

/// A block configuration on disk.
///
/// Files hold either a whole parsed block (`blockName` and `attrs`) or just
/// the attributes object, which is then treated as a query loop block.
struct BlockFile {
	path: PathBuf,
	block: Block,
	bare: bool,
}

impl BlockFile {
	fn read(path: &Path) -> Result<Self> {
		let contents = fs::read_to_string(path)
			.with_context(|| format!("failed to read block file {}", path.display()))?;
		Self::parse(path, &contents)
	}

	fn parse(path: &Path, contents: &str) -> Result<Self> {
		let value: Value = serde_json::from_str(contents)
			.with_context(|| format!("{} is not valid JSON", path.display()))?;
		let bare = value.get("blockName").is_none();
		let block = if bare {
			let attrs: BlockAttributes = serde_json::from_value(value)
				.with_context(|| format!("{} is not a block attributes object", path.display()))?;
			Block {
				block_name: QUERY_LOOP_BLOCK.to_string(),
				attrs,
				extra: Map::new(),
			}
		} else {
			serde_json::from_value(value)
				.with_context(|| format!("{} is not a parsed block", path.display()))?
		};

		Ok(Self {
			path: path.to_path_buf(),
			block,
			bare,
		})
	}

	/// Write `block` back in the shape the file was read in.
	fn write(&self, block: &Block) -> Result<()> {
		let contents = if self.bare {
			serde_json::to_string_pretty(&block.attrs)?
		} else {
			serde_json::to_string_pretty(block)?
		};
		fs::write(&self.path, format!("{contents}\n"))
			.with_context(|| format!("failed to write {}", self.path.display()))
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use serde_json::json;

	use super::*;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			source: PostSourceConfig::Unset,
			timeout_secs: 30,
			rest_post_types: vec!["post".into(), "page".into()],
			theme_name: "slate".into(),
			title: "Pick Posts".into(),
			log_level: None,
			log_file: None,
		}
	}

	fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
		let path = dir.join(name);
		fs::write(&path, value.to_string()).unwrap();
		path
	}

	fn vars(report: Report) -> Map<String, Value> {
		match report {
			Report::Vars(vars) => vars.into_map(),
			other => panic!("expected vars, got {other:?}"),
		}
	}

	#[test]
	fn bare_attributes_are_treated_as_query_loops() {
		let file = BlockFile::parse(
			Path::new("attrs.json"),
			r#"{ "queryId": 1, "query": { "include": [3] } }"#,
		)
		.unwrap();
		assert!(file.bare);
		assert!(file.block.is_query_loop());
		assert_eq!(file.block.attrs.query.include, Some(vec![3]));
	}

	#[test]
	fn written_blocks_keep_their_shape() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_json(dir.path(), "attrs.json", &json!({ "queryId": 1, "query": {} }));
		let file = BlockFile::read(&path).unwrap();

		let mut block = file.block.clone();
		block.attrs.query.include = Some(vec![9]);
		block.attrs.query.order_by = Some("include".into());
		file.write(&block).unwrap();

		let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
		assert_eq!(
			written,
			json!({ "queryId": 1, "query": { "include": [9], "orderBy": "include" } })
		);
	}

	#[test]
	fn render_restricts_to_the_selection() {
		let dir = tempfile::tempdir().unwrap();
		let block = write_json(
			dir.path(),
			"block.json",
			&json!({ "blockName": "core/query", "attrs": { "query": { "include": [5, 2] } } }),
		);
		let vars_path = write_json(dir.path(), "vars.json", &json!({ "posts_per_page": 3 }));

		let report = Workflow::new(config())
			.run(&Command::Render {
				block: BlockArgs { block },
				vars: Some(vars_path),
			})
			.unwrap();
		assert_eq!(
			vars(report),
			json!({ "posts_per_page": 3, "post__in": [5, 2], "orderby": "post__in" })
				.as_object()
				.unwrap()
				.clone()
		);
	}

	#[test]
	fn loosely_typed_filters_do_not_reject_the_block() {
		let dir = tempfile::tempdir().unwrap();
		let block = write_json(
			dir.path(),
			"attrs.json",
			&json!({ "query": { "include": [5, 2], "taxQuery": { "category": ["3"] } } }),
		);

		let report = Workflow::new(config())
			.run(&Command::Params(BlockArgs {
				block: block.clone(),
			}))
			.unwrap();
		match report {
			Report::Requests(requests) => assert_eq!(requests[0].param("categories"), Some("3")),
			other => panic!("unexpected report {other:?}"),
		}

		let report = Workflow::new(config())
			.run(&Command::Render {
				block: BlockArgs { block },
				vars: None,
			})
			.unwrap();
		assert_eq!(vars(report)["post__in"], json!([5, 2]));
	}

	#[test]
	fn rest_honours_configured_post_types() {
		let workflow = Workflow::new(config());
		let command = |post_type: &str| Command::Rest {
			params: vec!["include=4,1".into(), "orderby=include".into()],
			args: None,
			post_type: post_type.into(),
			can_edit: true,
		};

		let restricted = vars(workflow.run(&command("page")).unwrap());
		assert_eq!(restricted["post__in"], json!([4, 1]));
		assert_eq!(
			restricted["post_status"],
			json!(["publish", "draft", "pending", "private", "future"])
		);

		let untouched = vars(workflow.run(&command("book")).unwrap());
		assert!(untouched.is_empty());
	}

	#[test]
	fn rest_rejects_malformed_params() {
		let err = Workflow::new(config())
			.run(&Command::Rest {
				params: vec!["include".into()],
				args: None,
				post_type: "post".into(),
				can_edit: true,
			})
			.unwrap_err();
		assert!(err.to_string().contains("KEY=VALUE"));
	}

	#[test]
	fn params_skip_lookups_for_inheriting_blocks() {
		let dir = tempfile::tempdir().unwrap();
		let inheriting = write_json(dir.path(), "a.json", &json!({ "query": { "inherit": true } }));
		let picking = write_json(
			dir.path(),
			"b.json",
			&json!({ "query": { "postType": "page", "include": [7], "orderBy": "include" } }),
		);

		let workflow = Workflow::new(config());
		match workflow
			.run(&Command::Params(BlockArgs { block: inheriting }))
			.unwrap()
		{
			Report::Requests(requests) => assert!(requests.is_empty()),
			other => panic!("unexpected report {other:?}"),
		}
		match workflow
			.run(&Command::Params(BlockArgs { block: picking }))
			.unwrap()
		{
			Report::Requests(requests) => {
				assert_eq!(requests.len(), 2);
				assert_eq!(requests[0].route(), "/wp/v2/pages");
				assert_eq!(requests[1].param("include"), Some("7"));
			}
			other => panic!("unexpected report {other:?}"),
		}
	}

	#[test]
	fn picking_without_a_source_fails() {
		let dir = tempfile::tempdir().unwrap();
		let block = write_json(dir.path(), "block.json", &json!({ "query": {} }));
		let err = Workflow::new(config())
			.run(&Command::Pick {
				block: BlockArgs { block },
				write: false,
			})
			.unwrap_err();
		assert!(err.to_string().contains("no post source configured"));
	}

	#[test]
	fn site_sources_build_http_clients() {
		let config = ResolvedConfig {
			source: PostSourceConfig::Site {
				url: "https://example.org/wp-json".into(),
				timeout: Duration::from_secs(5),
			},
			..config()
		};
		assert!(Workflow::new(config).post_source().is_ok());
	}
}
