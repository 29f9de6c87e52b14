use std::path::PathBuf;

use anyhow::Result;
use cherry_pick::fetch::CandidateRequest;
use cherry_pick::{PickOutcome, QueryVars};
use serde_json::{Map, Value, json};

use super::OutputFormat;

/// Result of one command, ready to print.
#[derive(Debug)]
pub(crate) enum Report {
	Pick {
		outcome: PickOutcome,
		/// Set when the accepted block was written back to disk.
		written: Option<PathBuf>,
	},
	Vars(QueryVars),
	Requests(Vec<CandidateRequest>),
	Tokens(Vec<(String, Option<u64>)>),
}

pub(crate) fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Plain => println!("{}", format_plain(report)?),
		OutputFormat::Json => println!("{}", format_json(report)?),
	}
	Ok(())
}

pub(crate) fn format_plain(report: &Report) -> Result<String> {
	let text = match report {
		Report::Pick { outcome, .. } if !outcome.accepted => "Pick cancelled".to_string(),
		Report::Pick {
			outcome,
			written: Some(path),
		} => format!(
			"Wrote {} (include: {})",
			path.display(),
			join_ids(outcome.block.attrs.query.selected_ids())
		),
		Report::Pick { outcome, .. } => serde_json::to_string_pretty(&outcome.block)?,
		Report::Vars(vars) if vars.as_map().is_empty() => "(no query variables)".to_string(),
		Report::Vars(vars) => vars
			.as_map()
			.iter()
			.map(|(key, value)| format!("{key} = {value}"))
			.collect::<Vec<_>>()
			.join("\n"),
		Report::Requests(requests) if requests.is_empty() => {
			"(no lookups: the block inherits the page query)".to_string()
		}
		Report::Requests(requests) => requests
			.iter()
			.map(CandidateRequest::path)
			.collect::<Result<Vec<_>, _>>()?
			.join("\n"),
		Report::Tokens(tokens) => tokens
			.iter()
			.map(|(token, id)| match id {
				Some(id) => format!("{id}\t{token}"),
				None => format!("invalid\t{token}"),
			})
			.collect::<Vec<_>>()
			.join("\n"),
	};
	Ok(text)
}

pub(crate) fn format_json(report: &Report) -> Result<String> {
	let payload = match report {
		Report::Pick { outcome, written } => json!({
			"accepted": outcome.accepted,
			"written": written.as_ref().map(|path| path.display().to_string()),
			"block": outcome.block,
		}),
		Report::Vars(vars) => serde_json::to_value(vars)?,
		Report::Requests(requests) => Value::Array(
			requests
				.iter()
				.map(|request| -> Result<Value> {
					let params: Map<String, Value> = request
						.params()
						.iter()
						.map(|(key, value)| (key.clone(), Value::from(value.as_str())))
						.collect();
					Ok(json!({
						"postType": request.post_type(),
						"route": request.route(),
						"path": request.path()?,
						"params": params,
					}))
				})
				.collect::<Result<Vec<_>>>()?,
		),
		Report::Tokens(tokens) => Value::Array(
			tokens
				.iter()
				.map(|(token, id)| json!({ "token": token, "id": id }))
				.collect(),
		),
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

fn join_ids(ids: &[u64]) -> String {
	if ids.is_empty() {
		return "none".to_string();
	}
	ids.iter()
		.map(u64::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}
