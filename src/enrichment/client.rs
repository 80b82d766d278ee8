//! g:Profiler g:GOSt client
//!
//! Blocking JSON POST to the profile endpoint.

use super::{EnrichmentQuery, EnrichmentService, EnrichmentTerm};
use crate::config::Config;
use crate::error::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Request body. Everything but organism, query and sources uses the
/// service defaults.
#[derive(Debug, Serialize)]
struct ProfileRequest<'a> {
    organism: &'a str,
    query: &'a [String],
    sources: &'a [String],
    user_threshold: f64,
    all_results: bool,
    ordered: bool,
    no_evidences: bool,
    combined: bool,
    measure_underrepresentation: bool,
    no_iea: bool,
    domain_scope: &'a str,
    significance_threshold_method: &'a str,
}

impl<'a> ProfileRequest<'a> {
    fn new(query: &'a EnrichmentQuery) -> Self {
        Self {
            organism: &query.organism,
            query: &query.genes,
            sources: &query.sources,
            user_threshold: 0.05,
            all_results: false,
            ordered: false,
            no_evidences: true,
            combined: false,
            measure_underrepresentation: false,
            no_iea: false,
            domain_scope: "annotated",
            significance_threshold_method: "g_SCS",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    result: Vec<EnrichmentTerm>,
}

/// Decode a g:GOSt JSON response body.
pub fn parse_profile_response(body: &str) -> Result<Vec<EnrichmentTerm>> {
    let response: ProfileResponse = serde_json::from_str(body)?;
    Ok(response.result)
}

/// HTTP client for the g:Profiler API
pub struct GProfilerClient {
    client: Client,
    url: String,
}

impl GProfilerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;

        Ok(Self {
            client,
            url: config.gprofiler_url.clone(),
        })
    }
}

impl EnrichmentService for GProfilerClient {
    fn profile(&self, query: &EnrichmentQuery) -> Result<Vec<EnrichmentTerm>> {
        info!(
            organism = %query.organism,
            genes = query.genes.len(),
            sources = ?query.sources,
            "Querying g:Profiler"
        );

        let body = self
            .client
            .post(&self.url)
            .json(&ProfileRequest::new(query))
            .send()?
            .error_for_status()?
            .text()?;

        let terms = parse_profile_response(&body)?;
        debug!(terms = terms.len(), "g:Profiler answered");
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let query = EnrichmentQuery::mouse(vec!["Trem2".to_string(), "Apoe".to_string()]);
        let body = serde_json::to_value(ProfileRequest::new(&query)).unwrap();

        assert_eq!(body["organism"], "mmusculus");
        assert_eq!(body["query"], json!(["Trem2", "Apoe"]));
        assert_eq!(body["sources"], json!(["GO:BP", "GO:MF", "GO:CC", "KEGG", "REAC"]));
        assert_eq!(body["user_threshold"], 0.05);
        assert_eq!(body["no_evidences"], true);
        assert_eq!(body["domain_scope"], "annotated");
    }

    #[test]
    fn test_parse_response() {
        let body = json!({
            "result": [{
                "source": "GO:BP",
                "native": "GO:0006955",
                "name": "immune response",
                "p_value": 1.2e-8,
                "significant": true,
                "description": "Any immune system process that functions in the response to a stimulus.",
                "term_size": 1854,
                "query_size": 40,
                "intersection_size": 15,
                "effective_domain_size": 21012,
                "precision": 0.375,
                "recall": 0.0081,
                "query": "query_1",
                "parents": ["GO:0002376", "GO:0050896"],
                "group_id": 3,
                "source_order": 2201
            }],
            "meta": {"query_metadata": {"organism": "mmusculus"}}
        })
        .to_string();

        let terms = parse_profile_response(&body).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].native, "GO:0006955");
        assert_eq!(terms[0].term_size, 1854);
        assert_eq!(terms[0].parents, vec!["GO:0002376", "GO:0050896"]);
    }

    #[test]
    fn test_parse_response_without_result() {
        let err = parse_profile_response(r#"{"message": "organism not found"}"#).unwrap_err();
        assert!(matches!(err, PipelineError::EnrichmentDecode(_)));
    }

    #[test]
    fn test_unreachable_service_is_an_error() {
        let config = Config {
            gprofiler_url: "http://127.0.0.1:9/api/gost/profile/".to_string(),
            http_timeout_secs: 2,
            ..Config::default()
        };
        let client = GProfilerClient::new(&config).unwrap();
        let query = EnrichmentQuery::mouse(vec!["Trem2".to_string()]);

        assert!(matches!(client.profile(&query), Err(PipelineError::Http(_))));
    }
}
