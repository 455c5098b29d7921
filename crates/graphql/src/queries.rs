//! Query documents and request bodies.

use serde::Serialize;

use storefront_filters::{ProductFilterInput, QuerySnapshot};
use storefront_query::Cursor;

/// Fields selected for every product, in listings and detail lookups alike.
const PRODUCT_FIELDS: &str = r#"
    id
    name
    slug
    description
    media { url alt }
    category { name slug }
    attributes {
      attribute { slug name }
      values { slug name }
    }
    isAvailableForPurchase
"#;

/// Variant fields for product cards.
const LISTING_VARIANT_FIELDS: &str = r#"
      id
      name
      sku
      pricing { price { gross { amount currency } } }
"#;

/// Variant fields for the detail page: adds the pre-discount price.
const DETAIL_VARIANT_FIELDS: &str = r#"
      id
      name
      sku
      pricing {
        price { gross { amount currency } }
        priceUndiscounted { gross { amount currency } }
      }
"#;

pub fn products_query() -> String {
    format!(
        r#"query GetProducts($first: Int!, $after: String, $channel: String!, $filter: ProductFilterInput) {{
  products(first: $first, after: $after, channel: $channel, filter: $filter) {{
    edges {{ node {{ {PRODUCT_FIELDS} defaultVariant {{ {LISTING_VARIANT_FIELDS} }} }} }}
    pageInfo {{ hasNextPage endCursor }}
  }}
}}"#
    )
}

pub fn product_by_slug_query() -> String {
    format!(
        r#"query GetProduct($slug: String!, $channel: String!) {{
  product(slug: $slug, channel: $channel) {{
    {PRODUCT_FIELDS}
    defaultVariant {{ {DETAIL_VARIANT_FIELDS} }}
    variants {{ {DETAIL_VARIANT_FIELDS} }}
  }}
}}"#
    )
}

/// `{ "query": ..., "variables": ... }` POST body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V> {
    pub query: String,
    pub variables: V,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductsVariables {
    pub first: u32,
    pub after: Option<String>,
    pub channel: String,
    pub filter: ProductFilterInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductVariables {
    pub slug: String,
    pub channel: String,
}

pub fn products_request(
    snapshot: &QuerySnapshot,
    page_size: u32,
    cursor: Option<&Cursor>,
    channel: &str,
) -> GraphQlRequest<ProductsVariables> {
    GraphQlRequest {
        query: products_query(),
        variables: ProductsVariables {
            first: page_size,
            after: cursor.map(|c| c.as_str().to_string()),
            channel: channel.to_string(),
            filter: snapshot.to_filter_input(),
        },
    }
}

pub fn product_request(slug: &str, channel: &str) -> GraphQlRequest<ProductVariables> {
    GraphQlRequest {
        query: product_by_slug_query(),
        variables: ProductVariables {
            slug: slug.to_string(),
            channel: channel.to_string(),
        },
    }
}
