//! OpenAlex works source
//!
//! API docs: https://docs.openalex.org/api-entities/works
//! One GET per run, filtered by the researcher's ORCID iD, up to
//! `per-page` results sorted by publication date descending. The feed is
//! treated as untrusted: possibly incomplete, possibly duplicated.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::record::WorkRecord;

#[derive(Debug, Deserialize)]
struct OpenAlexResponse {
    #[serde(default)]
    results: Vec<OpenAlexWork>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexWork {
    title: Option<String>,
    publication_year: Option<i32>,
    publication_date: Option<String>,
    doi: Option<String>,
    cited_by_count: Option<i64>,
    #[serde(rename = "type")]
    work_type: Option<String>,
    primary_location: Option<OpenAlexLocation>,
    #[serde(default)]
    authorships: Vec<OpenAlexAuthorship>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexLocation {
    source: Option<OpenAlexVenue>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexVenue {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexAuthorship {
    author: Option<OpenAlexAuthor>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexAuthor {
    display_name: Option<String>,
}

/// Parse an OpenAlex works response body.
///
/// Pure over the JSON text so it is testable without the network. Missing
/// per-record fields become `None`/empty, never errors.
pub fn parse_works_response(json: &str) -> Result<Vec<WorkRecord>, SyncError> {
    let response: OpenAlexResponse = serde_json::from_str(json)?;

    Ok(response.results.into_iter().map(into_record).collect())
}

fn into_record(work: OpenAlexWork) -> WorkRecord {
    let venue = work
        .primary_location
        .and_then(|l| l.source)
        .and_then(|s| s.display_name);

    let authors = work
        .authorships
        .into_iter()
        .filter_map(|a| a.author.and_then(|a| a.display_name))
        .collect();

    WorkRecord {
        title: work.title.unwrap_or_default(),
        publication_year: work.publication_year,
        publication_date: work.publication_date,
        doi: work.doi,
        cited_by_count: work.cited_by_count,
        venue,
        work_type: work.work_type.unwrap_or_default().to_lowercase(),
        authors,
    }
}

/// Fetch the researcher's works.
///
/// Single request, fixed timeout; any failure (connection, timeout,
/// non-success status, undecodable body) aborts the run before any output
/// is written. There is deliberately no retry: outputs are regenerated in
/// full on the next run.
pub async fn fetch_works(config: &SyncConfig) -> Result<Vec<WorkRecord>, SyncError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("vitae-sync/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let filter = format!("author.orcid:{}", config.orcid);
    let per_page = config.per_page.to_string();
    let url = reqwest::Url::parse_with_params(
        &config.endpoint,
        &[
            ("filter", filter.as_str()),
            ("per-page", per_page.as_str()),
            ("sort", "publication_date:desc"),
        ],
    )
    .map_err(|e| SyncError::Config(format!("bad endpoint URL {}: {}", config.endpoint, e)))?;

    debug!("fetching works from {}", url);
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Api {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    let records = parse_works_response(&body)?;
    info!("fetched {} works for {}", records.len(), config.orcid);

    Ok(records)
}
