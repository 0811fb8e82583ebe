// SPDX-License-Identifier: Apache-2.0

//! Data structures for Outlier's CLI.

use crate::{graphql::GH_API_V4, report::Format, shell::ColorChoice};
use clap::{Parser as _, ValueEnum};
use std::{
	ffi::OsString,
	path::{Path, PathBuf},
	str::FromStr,
};

/// The default environment variable holding the GitHub API token.
pub const DEFAULT_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// The default and largest number of PRs GitHub returns for one query.
pub const MAX_LIMIT: u8 = 100;

/// Spot abnormally slow review and merge cycles in a GitHub repository.
#[derive(Debug, clap::Parser)]
#[command(name = "outlier", about, version, long_about = None)]
pub struct CliConfig {
	/// The repository to analyze.
	#[clap(flatten)]
	target_args: TargetArgs,

	/// Arguments configuring the CLI output.
	#[clap(flatten)]
	output_args: OutputArgs,

	/// Arguments configuring where pull request data comes from.
	#[clap(flatten)]
	source_args: SourceArgs,
}

/// The repository to analyze.
#[derive(Debug, clap::Args)]
struct TargetArgs {
	/// Owner of the repository, e.g. `puppetlabs`.
	#[arg(value_name = "OWNER")]
	owner: String,

	/// Name of the repository, e.g. `go-pe-client`.
	#[arg(value_name = "NAME")]
	name: String,
}

/// Arguments configuring Outlier's output.
#[derive(Debug, Default, clap::Args)]
struct OutputArgs {
	/// What format to use.
	#[arg(
		short = 'f',
		long = "format",
		help_heading = "Output Flags",
		long_help = "What format to use. Can also be set with the `OUTLIER_FORMAT` environment variable"
	)]
	format: Option<Format>,

	/// When to use color.
	#[arg(
		short = 'k',
		long = "color",
		help_heading = "Output Flags",
		long_help = "When to use color. Can also be set with the `OUTLIER_COLOR` environment variable"
	)]
	color: Option<ColorChoice>,
}

/// Arguments configuring where pull request data comes from.
#[derive(Debug, Default, clap::Args)]
struct SourceArgs {
	/// Environment variable holding the GitHub API token.
	#[arg(
		long = "token-var",
		value_name = "VAR",
		help_heading = "Source Flags",
		long_help = "Environment variable holding the GitHub API token [default: GITHUB_TOKEN]. Can also be set with the `OUTLIER_TOKEN_VAR` environment variable"
	)]
	token_var: Option<String>,

	/// URL of the GitHub GraphQL API.
	#[arg(
		long = "api-url",
		value_name = "URL",
		help_heading = "Source Flags",
		long_help = "URL of the GitHub GraphQL API [default: https://api.github.com/graphql]. Can also be set with the `OUTLIER_API_URL` environment variable"
	)]
	api_url: Option<String>,

	/// How many of the most recently merged PRs to analyze.
	#[arg(
		short = 'n',
		long = "limit",
		value_name = "N",
		value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_LIMIT)),
		help_heading = "Source Flags",
		long_help = "How many of the most recently merged PRs to analyze, at most 100 [default: 100]. Can also be set with the `OUTLIER_LIMIT` environment variable"
	)]
	limit: Option<u8>,

	/// Read a saved GraphQL response instead of querying GitHub.
	#[arg(
		long = "response-file",
		value_name = "FILE",
		help_heading = "Source Flags",
		long_help = "Read a saved GraphQL response instead of querying GitHub. No token is needed. Can also be set with the `OUTLIER_RESPONSE_FILE` environment variable"
	)]
	response_file: Option<PathBuf>,
}

impl CliConfig {
	/// Load CLI configuration from the process arguments and environment.
	pub fn load() -> Result<CliConfig, clap::Error> {
		CliConfig::load_from(std::env::args_os())
	}

	/// Load CLI configuration from the given arguments and the environment.
	///
	/// This loads values in increasing order of precedence:
	///
	/// - Environment variables (and a `.env` file), if set
	/// - CLI flags, if set.
	///
	/// Anything still unset falls back to a default in the accessors.
	pub fn load_from<I, T>(args: I) -> Result<CliConfig, clap::Error>
	where
		I: IntoIterator<Item = T>,
		T: Into<OsString> + Clone,
	{
		let cli = CliConfig::try_parse_from(args)?;

		let mut config = CliConfig {
			target_args: cli.target_args,
			output_args: OutputArgs::from_env(),
			source_args: SourceArgs::from_env(),
		};
		config.output_args.update(&cli.output_args);
		config.source_args.update(&cli.source_args);

		Ok(config)
	}

	/// Get the repository owner.
	pub fn owner(&self) -> &str {
		&self.target_args.owner
	}

	/// Get the repository name.
	pub fn name(&self) -> &str {
		&self.target_args.name
	}

	/// Get the configured format.
	pub fn format(&self) -> Format {
		self.output_args.format.unwrap_or_default()
	}

	/// Get the configured color.
	pub fn color(&self) -> ColorChoice {
		self.output_args.color.unwrap_or_default()
	}

	/// Get the name of the environment variable holding the token.
	pub fn token_var(&self) -> &str {
		self.source_args
			.token_var
			.as_deref()
			.unwrap_or(DEFAULT_TOKEN_VAR)
	}

	/// Get the GraphQL API URL.
	pub fn api_url(&self) -> &str {
		self.source_args.api_url.as_deref().unwrap_or(GH_API_V4)
	}

	/// Get the number of PRs to analyze.
	pub fn limit(&self) -> u8 {
		self.source_args.limit.unwrap_or(MAX_LIMIT)
	}

	/// Get the saved response to read, if any.
	pub fn response_file(&self) -> Option<&Path> {
		self.source_args.response_file.as_deref()
	}
}

impl OutputArgs {
	/// Load output config from environment variables.
	fn from_env() -> OutputArgs {
		OutputArgs {
			format: outlier_env_var_value_enum("format"),
			color: outlier_env_var_value_enum("color"),
		}
	}

	/// Overwrite any fields set in `other`.
	fn update(&mut self, other: &OutputArgs) {
		update_field(&mut self.format, &other.format);
		update_field(&mut self.color, &other.color);
	}
}

impl SourceArgs {
	/// Load source config from environment variables.
	fn from_env() -> SourceArgs {
		SourceArgs {
			token_var: outlier_env_var("token_var"),
			api_url: outlier_env_var("api_url"),
			limit: outlier_env_var_parsed("limit"),
			response_file: outlier_env_var("response_file"),
		}
	}

	/// Overwrite any fields set in `other`.
	fn update(&mut self, other: &SourceArgs) {
		update_field(&mut self.token_var, &other.token_var);
		update_field(&mut self.api_url, &other.api_url);
		update_field(&mut self.limit, &other.limit);
		update_field(&mut self.response_file, &other.response_file);
	}
}

fn update_field<T: Clone>(field: &mut Option<T>, other: &Option<T>) {
	if other.is_some() {
		field.clone_from(other);
	}
}

/// Get an Outlier configuration environment variable.
///
/// This is generic in the return type, to automatically handle
/// converting from any type that can be derived from a [`String`].
fn outlier_env_var<O: From<String>>(name: &'static str) -> Option<O> {
	let name = format!("OUTLIER_{}", name.to_uppercase());
	let val = dotenv::var(name).ok()?;
	Some(O::from(val))
}

/// Get an Outlier configuration environment variable and parse it with [`FromStr`].
fn outlier_env_var_parsed<O: FromStr>(name: &'static str) -> Option<O> {
	let s: String = outlier_env_var(name)?;
	parse_env_value(name, &s, |s| s.parse().ok())
}

/// Get an Outlier configuration environment variable and parse it into a [`ValueEnum`] type.
fn outlier_env_var_value_enum<E: ValueEnum>(name: &'static str) -> Option<E> {
	let s: String = outlier_env_var(name)?;
	parse_env_value(name, &s, |s| {
		let ignore_case = true;
		E::from_str(s, ignore_case).ok()
	})
}

/// Parse the value of an environment variable, warning if it's unusable.
fn parse_env_value<O, F>(name: &str, s: &str, parse: F) -> Option<O>
where
	F: FnOnce(&str) -> Option<O>,
{
	let val = parse(s);

	if val.is_none() {
		log::warn!(
			"ignoring unparseable environment variable [name='OUTLIER_{}', value='{}']",
			name.to_uppercase(),
			s
		);
	}

	val
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::{error::ErrorKind, CommandFactory};
	use test_log::test;

	#[test]
	fn command_is_well_formed() {
		CliConfig::command().debug_assert();
	}

	#[test]
	fn owner_and_name_are_positional() {
		let config = CliConfig::load_from(["outlier", "puppetlabs", "go-pe-client"]).unwrap();
		assert_eq!(config.owner(), "puppetlabs");
		assert_eq!(config.name(), "go-pe-client");
	}

	#[test]
	fn missing_positionals_are_rejected() {
		let error = CliConfig::load_from(["outlier"]).unwrap_err();
		assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);

		let error = CliConfig::load_from(["outlier", "puppetlabs"]).unwrap_err();
		assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
	}

	#[test]
	fn extra_positionals_are_rejected() {
		let error = CliConfig::load_from(["outlier", "a", "b", "c"]).unwrap_err();
		assert_eq!(error.kind(), ErrorKind::UnknownArgument);
	}

	#[test]
	fn flags_are_parsed() {
		let config = CliConfig::load_from([
			"outlier",
			"octo",
			"widgets",
			"--format",
			"json",
			"--color",
			"never",
			"--token-var",
			"GH_PAT",
			"--api-url",
			"https://github.example.com/api/graphql",
			"--limit",
			"25",
			"--response-file",
			"saved.json",
		])
		.unwrap();

		assert_eq!(config.format(), Format::Json);
		assert_eq!(config.color(), ColorChoice::Never);
		assert_eq!(config.token_var(), "GH_PAT");
		assert_eq!(config.api_url(), "https://github.example.com/api/graphql");
		assert_eq!(config.limit(), 25);
		assert_eq!(config.response_file(), Some(Path::new("saved.json")));
	}

	#[test]
	fn limit_out_of_range_is_rejected() {
		for limit in ["0", "101", "-3"] {
			let result = CliConfig::load_from(["outlier", "octo", "widgets", "--limit", limit]);
			assert!(result.is_err(), "limit {} was accepted", limit);
		}
	}

	#[test]
	fn update_prefers_set_fields() {
		let mut base = SourceArgs {
			token_var: Some("FROM_ENV".to_owned()),
			limit: Some(50),
			..Default::default()
		};
		let cli = SourceArgs {
			limit: Some(10),
			..Default::default()
		};

		base.update(&cli);

		assert_eq!(base.token_var.as_deref(), Some("FROM_ENV"));
		assert_eq!(base.limit, Some(10));
		assert_eq!(base.api_url, None);
	}

	#[test]
	fn env_values_parse_case_insensitively() {
		let format = parse_env_value("format", "JSON", |s| {
			<Format as ValueEnum>::from_str(s, true).ok()
		});
		assert_eq!(format, Some(Format::Json));

		let limit: Option<u8> = parse_env_value("limit", "42", |s| s.parse().ok());
		assert_eq!(limit, Some(42));
	}

	#[test]
	fn unparseable_env_values_are_ignored() {
		let color = parse_env_value("color", "sometimes", |s| {
			<ColorChoice as ValueEnum>::from_str(s, true).ok()
		});
		assert_eq!(color, None);

		let limit: Option<u8> = parse_env_value("limit", "lots", |s| s.parse().ok());
		assert_eq!(limit, None);
	}
}
