use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::YcConfig;
use crate::error::{YcError, YcResult};
use crate::models::YcCompany;

/// Where YC company records come from
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn fetch_all(&self) -> YcResult<Vec<YcCompany>>;
}

/// Reads the public yc-oss JSON dump
pub struct HttpYcDirectory {
    client: Client,
    url: String,
}

impl HttpYcDirectory {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &YcConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompanySource for HttpYcDirectory {
    async fn fetch_all(&self) -> YcResult<Vec<YcCompany>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| YcError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(YcError::Fetch(format!(
                "YC API returned {}: {}",
                status, text
            )));
        }

        let companies: Vec<YcCompany> = response
            .json()
            .await
            .map_err(|e| YcError::Fetch(format!("invalid YC payload: {}", e)))?;

        debug!(count = companies.len(), url = %self.url, "Fetched YC companies");
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_all_parses_dataset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/companies/all.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Acme", "batch": "W21"},
                {"id": 2, "name": "Globex", "tags": ["AI"]}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpYcDirectory::new(format!("{}/companies/all.json", server.uri()));
        let companies = source.fetch_all().await.unwrap();

        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].batch.as_deref(), Some("W21"));
        assert_eq!(companies[1].tags, vec!["AI"]);
    }

    #[tokio::test]
    async fn test_fetch_all_tolerates_null_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Acme"},
                {"id": 2, "name": null}
            ])))
            .mount(&server)
            .await;

        let companies = HttpYcDirectory::new(server.uri()).fetch_all().await.unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[1].name, "");
    }

    #[tokio::test]
    async fn test_fetch_all_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let source = HttpYcDirectory::new(server.uri());
        let err = source.fetch_all().await.unwrap_err();

        assert!(matches!(err, YcError::Fetch(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_non_array_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"companies": []})))
            .mount(&server)
            .await;

        let err = HttpYcDirectory::new(server.uri()).fetch_all().await.unwrap_err();
        assert!(err.to_string().contains("invalid YC payload"));
    }
}
