use async_trait::async_trait;
use std::time::Duration;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::provider("http", "Request timed out")
            } else {
                DomainError::provider("http", format!("Request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Answers by URL; records the last request body
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        errors: RwLock<HashMap<String, String>>,
        last_body: RwLock<Option<serde_json::Value>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.errors.write().unwrap().insert(url.into(), error.into());
            self
        }

        pub fn last_body(&self) -> Option<serde_json::Value> {
            self.last_body.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            *self.last_body.write().unwrap() = Some(body.clone());

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::provider("mock", error));
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| DomainError::provider("mock", format!("No mock response for {}", url)))
        }
    }
}
