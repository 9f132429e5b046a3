//! Remote product source.

use async_trait::async_trait;
use catalog_engine::ProductRecord;
use reqwest::Client;

/// Errors from fetching the product list.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid product list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// A decoded product list together with the body it was decoded from.
///
/// The body is what goes into the cache, so fields the catalog ignores
/// (such as `rating`) survive a later offline launch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedProducts {
    pub records: Vec<ProductRecord>,
    pub body: String,
}

impl FetchedProducts {
    /// Decode a JSON product array, keeping the text as is.
    pub fn from_body(body: impl Into<String>) -> Result<Self, SourceError> {
        let body = body.into();
        let records = serde_json::from_str(&body)?;
        Ok(Self { records, body })
    }

    /// Wrap records that did not come from a response body.
    pub fn from_records(records: Vec<ProductRecord>) -> Result<Self, SourceError> {
        let body = serde_json::to_string(&records)?;
        Ok(Self { records, body })
    }
}

/// Something that can produce the product list.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the full product array. A single attempt, no retry.
    async fn fetch_products(&self) -> Result<FetchedProducts, SourceError>;
}

/// Fetches products with a plain HTTP GET returning a JSON array.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: Client,
    url: String,
}

impl HttpProductSource {
    /// Create a source for the given endpoint.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<FetchedProducts, SourceError> {
        tracing::debug!(url = %self.url, "Fetching products");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let fetched = FetchedProducts::from_body(response.text().await?)?;
        tracing::debug!(count = fetched.records.len(), "Fetched products");
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_kept_verbatim() {
        let body =
            r#"[{"id":7,"title":"Mug","price":4.5,"category":"home","rating":{"rate":4.1}}]"#;
        let fetched = FetchedProducts::from_body(body).unwrap();

        assert_eq!(fetched.body, body);
        assert_eq!(fetched.records, vec![ProductRecord::new(7, "Mug", 4.5, "home")]);
    }

    #[test]
    fn non_array_body_is_rejected() {
        let err = FetchedProducts::from_body(r#"{"error":"down"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
