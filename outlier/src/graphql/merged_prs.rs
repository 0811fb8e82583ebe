// SPDX-License-Identifier: Apache-2.0

use self::merged_pull_requests::{
	MergedPullRequestsRepositoryPullRequestsNodes as RawPull, ResponseData, Variables,
};
use crate::{source::PullRequestRecord, tls::authenticated_agent::AuthenticatedAgent};
use anyhow::{anyhow, Result};
use graphql_client::{GraphQLQuery, QueryBody, Response};
use serde_json::{from_value as from_json_value, to_value as to_json_value};

/// Defines the query being made against the GitHub API.
#[derive(GraphQLQuery)]
#[graphql(
	schema_path = "src/graphql/schemas/types.graphql",
	query_path = "src/graphql/schemas/merged_prs.graphql",
	response_derives = "Debug",
	custom_scalars_module = "crate::graphql::custom_scalars"
)]
pub struct MergedPullRequests;

/// A full response body for the merged pull requests query.
pub type MergedPrsResponse = Response<ResponseData>;

/// Query the GitHub GraphQL API for the last `last` merged PRs of a repo.
pub fn get_merged_prs(
	agent: &AuthenticatedAgent<'_>,
	api_url: &str,
	owner: &str,
	name: &str,
	last: u8,
) -> Result<Vec<PullRequestRecord>> {
	let query = MergedPullRequests::build_query(Variables {
		owner: owner.to_owned(),
		name: name.to_owned(),
		last: i64::from(last),
	});

	let body = make_request(agent, api_url, query)?;

	records_from_response(body)
}

/// Make a request to the GitHub API.
fn make_request(
	agent: &AuthenticatedAgent<'_>,
	api_url: &str,
	query: QueryBody<Variables>,
) -> Result<MergedPrsResponse> {
	let response = {
		let request_json = to_json_value(query)?;
		match agent.post(api_url).send_json(request_json) {
			Ok(response) => response,
			// `ureq` reports 4xx and 5xx statuses as errors.
			Err(ureq::Error::Status(status, response)) => {
				return Err(anyhow!(
					"request to GitHub API returned the following HTTP status: {} {}",
					status,
					response.status_text()
				))
			}
			Err(e) => return Err(e.into()),
		}
	};

	match response.status() {
		200 => {
			let response_json = response.into_json()?;
			let parsed = from_json_value(response_json)?;
			Ok(parsed)
		}
		status => Err(anyhow!(
			"request to GitHub API returned the following HTTP status: {} {}",
			status,
			response.status_text()
		)),
	}
}

/// Extract the merged PRs from a GitHub API response.
pub fn records_from_response(body: MergedPrsResponse) -> Result<Vec<PullRequestRecord>> {
	if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
		let messages = errors
			.iter()
			.map(|error| error.message.as_str())
			.collect::<Vec<_>>()
			.join("; ");
		return Err(anyhow!("GitHub API returned errors: {}", messages));
	}

	let prs = body
		.data
		.ok_or_else(|| anyhow!("missing response data from GitHub"))?
		.repository
		.ok_or_else(|| anyhow!("repository not found on GitHub"))?
		.pull_requests
		.nodes
		.unwrap_or_default();

	Ok(prs.into_iter().flatten().filter_map(process_pr).collect())
}

/// Convert a single RawPull to a PullRequestRecord.
fn process_pr(pr: RawPull) -> Option<PullRequestRecord> {
	let Some(merged_at) = pr.merged_at else {
		log::warn!(
			"skipping pull request without a merge time [number={}]",
			pr.number
		);
		return None;
	};

	let Ok(number) = u64::try_from(pr.number) else {
		log::warn!("skipping pull request with invalid number [number={}]", pr.number);
		return None;
	};

	Some(PullRequestRecord {
		number,
		created_at: pr.created_at,
		merged_at,
	})
}
