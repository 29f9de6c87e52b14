use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use super::{BlockArgs, CliArgs, Command, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn defaults_to_plain_output_without_a_command() {
	let parsed = CliArgs::parse_from(["cherry-pick"]);
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert_eq!(parsed.command, None);
	assert_eq!(parsed.verbose, 0);
}

#[test]
fn global_options_follow_the_subcommand() {
	let parsed = CliArgs::parse_from([
		"cherry-pick",
		"pick",
		"--block",
		"block.json",
		"--write",
		"--fixture",
		"posts.json",
		"-vv",
	]);
	assert_eq!(
		parsed.command,
		Some(Command::Pick {
			block: BlockArgs {
				block: PathBuf::from("block.json"),
			},
			write: true,
		})
	);
	assert_eq!(parsed.fixture, Some(PathBuf::from("posts.json")));
	assert_eq!(parsed.verbose, 2);
}

#[test]
fn rest_collects_repeated_params() {
	let parsed = CliArgs::parse_from([
		"cherry-pick",
		"rest",
		"--param",
		"include=5,2",
		"--param",
		"orderby=include",
		"--can-edit",
		"--output",
		"json",
	]);
	let Some(Command::Rest {
		params,
		post_type,
		can_edit,
		..
	}) = parsed.command
	else {
		panic!("expected the rest command");
	};
	assert_eq!(params, vec!["include=5,2", "orderby=include"]);
	assert_eq!(post_type, "post");
	assert!(can_edit);
	assert_eq!(parsed.output, OutputFormat::Json);
}

#[test]
fn post_types_split_on_commas() {
	let parsed = CliArgs::parse_from(["cherry-pick", "--post-types", "post,book", "token", "x"]);
	assert_eq!(
		parsed.post_types,
		Some(vec!["post".to_string(), "book".to_string()])
	);
}
