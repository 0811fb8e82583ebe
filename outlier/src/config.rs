// SPDX-License-Identifier: Apache-2.0

//! Validated configuration for a single run.

use crate::{
	cli::{CliConfig, MAX_LIMIT},
	report::Format,
	util::redacted::Redacted,
};
use std::path::PathBuf;
use url::Url;

/// An error arising while validating configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
	#[error("{env_var_name} environment variable must be defined")]
	EnvVarNotSet { env_var_name: String },

	#[error("invalid pull request limit {value}; must be between 1 and 100")]
	InvalidLimit { value: u8 },

	#[error("invalid API URL '{url}'")]
	InvalidApiUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},
}

/// Where merged pull request data comes from.
#[derive(Debug)]
pub enum DataSource {
	/// Query the GitHub GraphQL API.
	Api {
		/// The GraphQL endpoint.
		url: Url,
		/// The token to use for accessing the GitHub APIs.
		token: Redacted<String>,
	},
	/// Read a saved GraphQL response.
	ResponseFile(PathBuf),
}

/// Validated configuration.
#[derive(Debug)]
pub struct Config {
	pub owner: String,
	pub name: String,
	pub format: Format,
	pub limit: u8,
	pub source: DataSource,
}

impl Config {
	/// Validate CLI configuration, looking up the token with `env`.
	///
	/// The token is only required when querying the API, so a missing token
	/// is reported before any request is made.
	pub fn from_cli_with<F>(cli: CliConfig, env: F) -> Result<Config, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let limit = cli.limit();
		if limit == 0 || limit > MAX_LIMIT {
			return Err(ConfigError::InvalidLimit { value: limit });
		}

		let source = match cli.response_file() {
			Some(path) => DataSource::ResponseFile(path.to_owned()),
			None => {
				let url = Url::parse(cli.api_url()).map_err(|source| ConfigError::InvalidApiUrl {
					url: cli.api_url().to_owned(),
					source,
				})?;

				let token_var = cli.token_var();
				let token = env(token_var)
					.filter(|token| !token.is_empty())
					.ok_or_else(|| ConfigError::EnvVarNotSet {
						env_var_name: token_var.to_owned(),
					})?;

				DataSource::Api {
					url,
					token: Redacted::new(token),
				}
			}
		};

		Ok(Config {
			owner: cli.owner().to_owned(),
			name: cli.name().to_owned(),
			format: cli.format(),
			limit,
			source,
		})
	}
}

impl TryFrom<CliConfig> for Config {
	type Error = ConfigError;

	fn try_from(cli: CliConfig) -> Result<Config, ConfigError> {
		Config::from_cli_with(cli, |name| dotenv::var(name).ok())
	}
}
