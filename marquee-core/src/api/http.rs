use std::time::Duration;

use async_trait::async_trait;
use marquee_model::{ListResponse, MediaPage};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use super::CatalogApi;
use super::routes;
use crate::error::{CatalogError, CatalogResult};
use crate::query::{ListRequest, QueryStyle};

/// HTTP client for the catalog backend
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: Url,
}

impl HttpCatalogApi {
    /// Create a client rooted at `base_url` whose requests give up after
    /// `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        info!(
            "[CatalogApi] Creating catalog client with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route against the base URL
    pub fn build_url(&self, path: &str) -> CatalogResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn fetch(
        &self,
        path: &str,
        request: &ListRequest,
        style: QueryStyle,
    ) -> CatalogResult<MediaPage> {
        let mut url = self.build_url(path)?;
        url.query_pairs_mut().extend_pairs(request.query_pairs(style));

        debug!("[CatalogApi] GET {}", url);
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let parsed: ListResponse = serde_json::from_str(&body)?;
                Ok(parsed.into_page(request.page, request.page_size))
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!("[CatalogApi] Request failed with status {}", status);
                Err(CatalogError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self, request: &ListRequest) -> CatalogResult<MediaPage> {
        self.fetch(routes::media::LIST, request, QueryStyle::List).await
    }

    async fn search(&self, request: &ListRequest) -> CatalogResult<MediaPage> {
        if !request.is_search() {
            return Err(CatalogError::EmptySearch);
        }
        self.fetch(routes::media::SEARCH, request, QueryStyle::Search)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_keeps_base_path() {
        let api = HttpCatalogApi::new(
            "http://localhost:8080/catalog/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            api.build_url(routes::media::LIST).unwrap().as_str(),
            "http://localhost:8080/catalog/api/media"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpCatalogApi::new("not a url", Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn search_without_query_fails_fast() {
        let api =
            HttpCatalogApi::new("http://127.0.0.1:9", Duration::from_secs(1))
                .unwrap();
        let err = api.search(&ListRequest::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::EmptySearch));
    }
}
