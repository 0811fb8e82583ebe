// SPDX-License-Identifier: Apache-2.0

use crate::{
	graphql::merged_prs::get_merged_prs,
	source::{PullRequestRecord, PullRequestSource},
	tls::authenticated_agent::AuthenticatedAgent,
};
use anyhow::{Context, Result};

/// Client for the GitHub GraphQL API.
#[derive(Debug)]
pub struct GitHub<'a> {
	agent: AuthenticatedAgent<'a>,
	api_url: &'a str,
}

impl<'a> GitHub<'a> {
	pub fn new(token: &'a str, api_url: &'a str) -> GitHub<'a> {
		GitHub {
			agent: AuthenticatedAgent::new(token),
			api_url,
		}
	}
}

impl PullRequestSource for GitHub<'_> {
	fn merged_pull_requests(
		&self,
		owner: &str,
		name: &str,
		limit: u8,
	) -> Result<Vec<PullRequestRecord>> {
		log::info!(
			"querying merged pull requests [owner='{}', name='{}', last={}]",
			owner,
			name,
			limit
		);

		let prs = get_merged_prs(&self.agent, self.api_url, owner, name, limit).context(
			"unable to query merged pull requests; please ensure the token is a valid GitHub API token",
		)?;

		log::info!("received {} merged pull requests", prs.len());

		Ok(prs)
	}
}
