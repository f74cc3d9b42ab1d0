//! GitHub GraphQL API transport

use crate::{Error, GitHubClient, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    /// Unwrap the payload.
    ///
    /// GitHub returns partial results alongside field-level errors, so
    /// errors only fail the call when no data came back with them.
    pub(crate) fn into_data(self) -> Result<T> {
        let messages: Vec<String> = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();

        match self.data {
            Some(data) => {
                if !messages.is_empty() {
                    warn!(errors = %messages.join(", "), "GraphQL response carried partial errors");
                }
                Ok(data)
            }
            None if messages.is_empty() => {
                Err(Error::GraphQl("response missing data".to_string()))
            }
            None => Err(Error::GraphQl(messages.join(", "))),
        }
    }
}

impl GitHubClient {
    /// Execute a GraphQL query or mutation
    pub(crate) async fn graphql_query<T: for<'de> Deserialize<'de>>(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<T> {
        let url = &self.config().graphql_url;
        debug!(url = %url, "Sending GraphQL request");

        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .http()
            .post(url)
            .bearer_auth(self.token())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Auth("Invalid GitHub token".to_string()));
        }
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::GraphQl(format!(
                "request failed with status {}: {}",
                status, text
            )));
        }

        let graphql_response: GraphQLResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Failed to parse GraphQL response: {}", e)))?;

        graphql_response.into_data()
    }
}
