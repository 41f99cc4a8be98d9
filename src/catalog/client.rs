//! HTTP catalog source for the Backstage entity list endpoint.

use super::{entities_from_json, CatalogSource, Entity, EntityFilter};
use crate::error::{ProbegenError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use tracing::debug;

/// Path of the entity list endpoint, relative to the catalog base URL.
pub const ENTITIES_PATH: &str = "api/catalog/entities";

/// Client for `GET <base>/api/catalog/entities?filter=...`.
#[derive(Debug, Clone)]
pub struct BackstageClient {
    http: reqwest::Client,
    base: Url,
    page_size: Option<usize>,
}

impl BackstageClient {
    /// Build a client for `base_url`, optionally sending a bearer token.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        Self::with_builder(base_url, token, reqwest::Client::builder())
    }

    /// Like [`BackstageClient::new`], starting from a caller-tuned builder
    /// (proxy, TLS roots, connect timeout).
    pub fn with_builder(
        base_url: &str,
        token: Option<&str>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|e| {
            ProbegenError::InvalidConfig(format!("invalid catalog URL '{base_url}': {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(ProbegenError::InvalidConfig(format!(
                "catalog URL '{base_url}' cannot be used as a base URL"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ProbegenError::InvalidConfig("catalog token is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = builder
            .default_headers(headers)
            .user_agent(concat!("probegen/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base,
            page_size: None,
        })
    }

    /// Page through results `size` entities at a time. `0` disables paging.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = (size > 0).then_some(size);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL for one request. `page` is `(offset, limit)`.
    pub fn entities_url(
        &self,
        filter: &EntityFilter,
        page: Option<(usize, usize)>,
    ) -> Result<Url> {
        let mut url = self.base.join(ENTITIES_PATH).map_err(|e| {
            ProbegenError::InvalidConfig(format!("cannot build entities URL: {e}"))
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("filter", filter.as_str());
            if let Some((offset, limit)) = page {
                query.append_pair("offset", &offset.to_string());
                query.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Entity>> {
        debug!(url = %url, "requesting catalog entities");
        let res = self.http.get(url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            let message = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    "not authorized, check the catalog token".to_string()
                }
                StatusCode::NOT_FOUND => "entity list endpoint not found".to_string(),
                _ => res.text().await.unwrap_or_default(),
            };
            return Err(ProbegenError::CatalogStatus {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }
        let body = res.bytes().await?;
        entities_from_json(&body)
    }
}

#[async_trait]
impl CatalogSource for BackstageClient {
    fn describe(&self) -> String {
        format!("catalog at {}", self.base)
    }

    async fn list(&self, filter: &EntityFilter) -> Result<Vec<Entity>> {
        let Some(limit) = self.page_size else {
            return self.fetch(self.entities_url(filter, None)?).await;
        };

        let mut entities: Vec<Entity> = Vec::new();
        let mut previous: Option<Vec<Entity>> = None;
        loop {
            let page = self
                .fetch(self.entities_url(filter, Some((entities.len(), limit)))?)
                .await?;

            // More than `limit` back means the catalog ignored paging and sent
            // the whole list.
            if page.len() > limit {
                debug!(
                    returned = page.len(),
                    limit, "catalog ignored paging parameters"
                );
                return Ok(page);
            }
            // The same full page twice means `offset` is ignored.
            if previous.as_ref() == Some(&page) {
                debug!(limit, "catalog repeated a page, stopping");
                break;
            }

            let short = page.len() < limit;
            entities.extend(page.iter().cloned());
            if short {
                break;
            }
            previous = Some(page);
        }
        Ok(entities)
    }
}
