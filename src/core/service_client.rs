// src/core/service_client.rs
//! France Travail client: client-credentials token exchange followed by the
//! offer search, then the accommodation filter.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{error, info, trace};

use crate::config::JobsConfig;
use crate::error::JobsError;
use crate::offers::{filter_and_format, JobsPayload, RawOffer, SearchQuery, SearchResults};
use crate::utils::log_excerpt;

const GRANT_TYPE: &str = "client_credentials";
const CONTRACT_TYPES: &str = "CDD,SAI";
const RESULT_RANGE: &str = "0-49";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

pub struct FranceTravailClient {
    client: reqwest::Client,
    config: JobsConfig,
}

impl FranceTravailClient {
    pub fn new(config: JobsConfig) -> Result<Self, JobsError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &JobsConfig {
        &self.config
    }

    /// Run token exchange, search and filtering for one request.
    /// The whole sequence is bounded by the pipeline timeout.
    pub async fn fetch_jobs(&self, query: &SearchQuery) -> Result<JobsPayload, JobsError> {
        let deadline = self.config.pipeline_timeout;

        let offers = tokio::time::timeout(deadline, async {
            let token = self.fetch_access_token().await?;
            self.search_offers(&token, query).await
        })
        .await
        .map_err(|_| JobsError::Timeout(deadline))??;

        let payload = filter_and_format(offers, query);
        info!(
            "{} offers with accommodation out of {}",
            payload.stats.with_accommodation, payload.stats.total_found
        );

        Ok(payload)
    }

    /// Exchange the client credentials for a bearer token. Never cached.
    pub async fn fetch_access_token(&self) -> Result<String, JobsError> {
        info!("Authenticating against France Travail");

        let credentials = &self.config.credentials;
        let form = [
            ("grant_type", GRANT_TYPE),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", self.config.scope.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        trace!("Token endpoint status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                "Token request failed with status {}: {}",
                status,
                log_excerpt(&error_text)
            );
            return Err(JobsError::Authentication {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let token = serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or(JobsError::TokenNotReceived)?;

        info!("Access token obtained");
        Ok(token)
    }

    /// Query the offer search endpoint with the fixed contract/range filters.
    pub async fn search_offers(
        &self,
        token: &str,
        query: &SearchQuery,
    ) -> Result<Vec<RawOffer>, JobsError> {
        let mut params = vec![
            ("motsCles", query.keywords.as_str()),
            ("typeContrat", CONTRACT_TYPES),
            ("range", RESULT_RANGE),
        ];
        if let Some(location) = query.location.as_deref() {
            params.push(("commune", location));
        }

        info!(
            "Searching offers (keywords: {:?}, location: {})",
            query.keywords,
            query.display_location()
        );

        let response = self
            .client
            .get(&self.config.search_url)
            .query(&params)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        trace!("Search endpoint status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                "Offer search failed with status {}: {}",
                status,
                log_excerpt(&error_text)
            );
            return Err(JobsError::Search {
                status: status.as_u16(),
            });
        }

        // No matching offer is answered with 204 and no body.
        if status == StatusCode::NO_CONTENT {
            info!("0 offers found");
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            info!("0 offers found");
            return Ok(Vec::new());
        }

        let results: SearchResults = serde_json::from_str(&body).map_err(|e| {
            error!("Unparseable search response: {}", log_excerpt(&body));
            JobsError::InvalidResponse(e.to_string())
        })?;

        let offers = results.into_offers();
        info!("{} offers found", offers.len());
        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> FranceTravailClient {
        let config = JobsConfig::new(Credentials {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
        })
        .with_token_url(format!("{}/token", server.uri()))
        .with_search_url(format!("{}/search", server.uri()));

        FranceTravailClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_token_exchange_sends_client_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client-id"))
            .and(body_string_contains("client_secret=client-secret"))
            .and(body_string_contains("scope=api_offresdemploiv2+o2dsoffre"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-123",
                "token_type": "Bearer",
                "expires_in": 1499
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server).fetch_access_token().await.unwrap();
        assert_eq!(token, "tok-123");
    }

    #[tokio::test]
    async fn test_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_access_token().await.unwrap_err();
        assert!(matches!(err, JobsError::Authentication { status: 401 }));
    }

    #[tokio::test]
    async fn test_token_missing_from_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "scope": "x" })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_access_token().await.unwrap_err();
        assert!(matches!(err, JobsError::TokenNotReceived));
    }

    #[tokio::test]
    async fn test_search_sends_filters_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(header("authorization", "Bearer tok-123"))
            .and(query_param("motsCles", "saisonnier logé"))
            .and(query_param("typeContrat", "CDD,SAI"))
            .and(query_param("range", "0-49"))
            .and(query_param("commune", "74010"))
            .respond_with(ResponseTemplate::new(206).set_body_json(json!({
                "resultats": [
                    { "id": "1", "intitule": "Serveur", "description": "Logement fourni" },
                    { "id": "2", "intitule": "Barman" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = SearchQuery::new(Some("74010".to_string()), None);
        let offers = client_for(&server)
            .search_offers("tok-123", &query)
            .await
            .unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_search_nationwide_has_no_commune() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resultats": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .search_offers("tok-123", &SearchQuery::default())
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(!received[0].url.query_pairs().any(|(k, _)| k == "commune"));
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("motsCles", "rien"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("motsCles", "vide"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let none = SearchQuery::new(None, Some("rien".to_string()));
        assert!(client.search_offers("t", &none).await.unwrap().is_empty());
        let empty = SearchQuery::new(None, Some("vide".to_string()));
        assert!(client.search_offers("t", &empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad range"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_offers("t", &SearchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JobsError::Search { status: 400 }));
        assert_eq!(err.to_string(), "API error: 400");
    }

    #[tokio::test]
    async fn test_fetch_jobs_stops_after_token_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resultats": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_jobs(&SearchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JobsError::Authentication { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_jobs_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "access_token": "tok" }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = client_for(&server)
            .config()
            .clone()
            .with_pipeline_timeout(Duration::from_millis(200));
        let client = FranceTravailClient::new(config).unwrap();

        let err = client.fetch_jobs(&SearchQuery::default()).await.unwrap_err();
        assert!(matches!(err, JobsError::Timeout(_)));
    }
}
