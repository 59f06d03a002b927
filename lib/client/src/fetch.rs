use crate::cache::{CacheEntry, DiskCache, MaxAge};
use crate::error::ClientError;
use std::time::Duration;
use tracing::debug;

/// Media types requested when dereferencing a linked-data IRI.
pub const RDF_ACCEPT: &str = "application/rdf+xml, text/turtle;q=0.9";

const CACHE_NAMESPACE: &str = "graphite";

/// A dereferenced document body plus the content type the server declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub body: String,
    pub content_type: Option<String>,
}

/// HTTP fetcher with the on-disk response cache in front.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::Client,
    cache: DiskCache,
}

impl Fetcher {
    pub fn new(http: reqwest::Client, cache: DiskCache) -> Self {
        Self { http, cache }
    }

    /// Builds the HTTP client shared by the fetcher and the SPARQL clients.
    pub fn build_http_client(
        user_agent: &str,
        timeout: Duration,
    ) -> Result<reqwest::Client, ClientError> {
        Ok(reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?)
    }

    /// Retrieves `url` with RDF content negotiation, honouring `max_age` for
    /// the cache in front.
    ///
    /// A non-2xx response is an error, never an empty document.
    pub async fn fetch(
        &self,
        url: &str,
        max_age: MaxAge,
    ) -> Result<FetchedDocument, ClientError> {
        if let Some(entry) = self.cache.lookup(CACHE_NAMESPACE, url, max_age)? {
            debug!(url, "serving document from cache");
            return Ok(FetchedDocument {
                body: entry.body,
                content_type: entry.content_type,
            });
        }

        debug!(url, "dereferencing");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, RDF_ACCEPT)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Fetch {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        let entry = CacheEntry::new(body, content_type);
        self.cache.store(CACHE_NAMESPACE, url, &entry, max_age)?;
        Ok(FetchedDocument {
            body: entry.body,
            content_type: entry.content_type,
        })
    }
}
