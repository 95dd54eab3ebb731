use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tracing::debug;

use crate::types::{VerificationRequest, Verdict};

/// Everything that can go wrong between submitting a pair and holding a
/// parsed verdict. Callers surface these to the user and stop; there is no
/// retry path.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("verification endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed verdict body: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, req: &VerificationRequest) -> Result<Verdict, VerifyError>;
}

/// HTTP client for the `/verify` endpoint.
#[derive(Debug)]
pub struct VerifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerifyClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, VerifyError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// `<base>/verify` with both texts appended as percent-encoded query
    /// pairs, so the endpoint decodes the original text exactly.
    pub fn request_url(&self, req: &VerificationRequest) -> Result<Url, VerifyError> {
        let mut url = Url::parse(&format!("{}/verify", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("llm_query", &req.llm_query)
            .append_pair("llm_response", &req.llm_response);
        Ok(url)
    }
}

#[async_trait]
impl Verifier for VerifyClient {
    async fn verify(&self, req: &VerificationRequest) -> Result<Verdict, VerifyError> {
        let url = self.request_url(req)?;
        debug!(%url, "submitting verification request");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(VerifyError::Status { status: status.as_u16(), message: body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> VerifyClient {
        VerifyClient::new(base, 5_000).unwrap()
    }

    #[test]
    fn request_url_percent_encodes_reserved_characters() {
        let req = VerificationRequest {
            llm_query: "what is 2+2? & why".into(),
            llm_response: "4 = 100% / sure\nline".into(),
        };
        let url = client("http://localhost:8000").request_url(&req).unwrap();

        assert_eq!(url.path(), "/verify");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0], ("llm_query".to_string(), req.llm_query.clone()));
        assert_eq!(pairs[1], ("llm_response".to_string(), req.llm_response.clone()));
        // the raw query must not leak the unencoded text
        assert!(!url.query().unwrap().contains("2+2?"));
    }

    #[test]
    fn request_url_trims_trailing_slash() {
        let req = VerificationRequest { llm_query: "q".into(), llm_response: "r".into() };
        let url = client("http://localhost:8000/").request_url(&req).unwrap();
        assert_eq!(url.path(), "/verify");
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = VerifyClient::new("not a url", 5_000).unwrap_err();
        assert!(matches!(err, VerifyError::Endpoint(_)));
    }
}
