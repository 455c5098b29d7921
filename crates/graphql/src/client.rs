//! HTTP client for the storefront GraphQL API.

use serde::Serialize;
use serde::de::DeserializeOwned;

use storefront_catalog::Product;
use storefront_filters::QuerySnapshot;
use storefront_query::{Cursor, FetchError, FetchPage, ProductFetcher};

use crate::config::GraphQlConfig;
use crate::error::GraphQlError;
use crate::queries::{GraphQlRequest, product_request, products_request};
use crate::wire::{GraphQlResponse, ProductData, ProductsData};

/// [`ProductFetcher`] backed by the commerce backend's `products` query.
#[derive(Debug, Clone)]
pub struct GraphQlProductFetcher {
    client: reqwest::Client,
    config: GraphQlConfig,
}

impl GraphQlProductFetcher {
    pub fn new(config: GraphQlConfig) -> Result<Self, GraphQlError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GraphQlConfig {
        &self.config
    }

    /// Fetch one product page.
    pub async fn fetch_products(
        &self,
        snapshot: &QuerySnapshot,
        page_size: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FetchPage, GraphQlError> {
        let request = products_request(snapshot, page_size, cursor, &self.config.channel);
        let data: ProductsData = self.post(&request).await?;
        data.products.ok_or(GraphQlError::MissingData)?.into_page()
    }

    /// Look up a single product for the detail page. `Ok(None)` when no product
    /// has this slug in the configured channel.
    pub async fn fetch_product_by_slug(&self, slug: &str) -> Result<Option<Product>, GraphQlError> {
        tracing::info!("Fetching product {} from {}", slug, self.config.endpoint);
        let request = product_request(slug, &self.config.channel);
        let data: ProductData = self.post(&request).await?;
        data.product.map(|node| node.into_product()).transpose()
    }

    async fn post<V, T>(&self, request: &GraphQlRequest<V>) -> Result<T, GraphQlError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.config.endpoint.as_str())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GraphQlError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        // Body-read failures stay transport errors; only bad JSON is `Decode`.
        let body: GraphQlResponse<T> = resp.json().await?;
        body.into_data()
    }
}

#[async_trait::async_trait]
impl ProductFetcher for GraphQlProductFetcher {
    async fn fetch(
        &self,
        snapshot: &QuerySnapshot,
        page_size: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FetchPage, FetchError> {
        self.fetch_products(snapshot, page_size, cursor)
            .await
            .map_err(|err| {
                tracing::warn!(endpoint = %self.config.endpoint, "products query failed: {err}");
                FetchError::from(err)
            })
    }
}
