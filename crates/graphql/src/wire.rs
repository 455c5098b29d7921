//! Response shapes as the backend sends them, and their conversion into
//! catalog types.

use serde::Deserialize;

use storefront_catalog::{
    AttributeValue, Category, Money, Product, ProductAttribute, ProductMedia, ProductVariant,
};
use storefront_core::{ProductId, VariantId};
use storefront_query::{Cursor, FetchPage};

use crate::error::GraphQlError;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// `errors` take precedence over partial `data`.
    pub fn into_data(self) -> Result<T, GraphQlError> {
        if !self.errors.is_empty() {
            return Err(GraphQlError::Graphql(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(GraphQlError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Option<ProductConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct ProductEdge {
    pub node: ProductNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub default_variant: Option<VariantNode>,
    /// Only present in the detail lookup.
    #[serde(default)]
    pub variants: Option<Vec<VariantNode>>,
    #[serde(default)]
    pub media: Option<Vec<MediaNode>>,
    pub category: Option<CategoryNode>,
    #[serde(default)]
    pub attributes: Option<Vec<AttributeNode>>,
    #[serde(default)]
    pub is_available_for_purchase: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct VariantNode {
    pub id: String,
    pub name: String,
    pub sku: Option<String>,
    pub pricing: Option<PricingNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingNode {
    pub price: Option<TaxedMoneyNode>,
    #[serde(default)]
    pub price_undiscounted: Option<TaxedMoneyNode>,
}

#[derive(Debug, Deserialize)]
pub struct TaxedMoneyNode {
    pub gross: MoneyNode,
}

impl TaxedMoneyNode {
    fn into_money(self) -> Result<Money, GraphQlError> {
        Money::from_decimal(self.gross.amount, self.gross.currency).map_err(decode)
    }
}

#[derive(Debug, Deserialize)]
pub struct MoneyNode {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct MediaNode {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct AttributeNode {
    pub attribute: NamedSlug,
    #[serde(default)]
    pub values: Vec<NamedSlug>,
}

#[derive(Debug, Deserialize)]
pub struct NamedSlug {
    pub slug: Option<String>,
    pub name: Option<String>,
}

impl ProductConnection {
    /// `endCursor` is only honoured while `hasNextPage` is true.
    pub fn into_page(self) -> Result<FetchPage, GraphQlError> {
        let items = self
            .edges
            .into_iter()
            .map(|edge| edge.node.into_product())
            .collect::<Result<Vec<_>, _>>()?;
        let next_cursor = if self.page_info.has_next_page {
            self.page_info.end_cursor.map(Cursor::new)
        } else {
            None
        };
        Ok(FetchPage::new(items, next_cursor))
    }
}

impl ProductNode {
    pub fn into_product(self) -> Result<Product, GraphQlError> {
        let id = ProductId::new(self.id).map_err(decode)?;
        let mut product = Product::new(id, self.name, self.slug)
            .with_availability(self.is_available_for_purchase.unwrap_or(true));

        if let Some(description) = self.description.filter(|d| !d.trim().is_empty()) {
            product = product.with_description(description);
        }
        if let Some(variant) = self.default_variant {
            product = product.with_default_variant(variant.into_variant()?);
        }
        for variant in self.variants.unwrap_or_default() {
            product = product.with_variant(variant.into_variant()?);
        }
        for media in self.media.unwrap_or_default() {
            product = product.with_media(ProductMedia {
                url: media.url,
                alt: media.alt.unwrap_or_default(),
            });
        }
        if let Some(category) = self.category {
            product = product.with_category(Category {
                name: category.name,
                slug: category.slug,
            });
        }
        for attribute in self.attributes.unwrap_or_default() {
            if let Some(attribute) = attribute.into_attribute() {
                product = product.with_attribute(attribute);
            }
        }
        Ok(product)
    }
}

impl VariantNode {
    fn into_variant(self) -> Result<ProductVariant, GraphQlError> {
        let (price, undiscounted) = match self.pricing {
            Some(pricing) => (pricing.price, pricing.price_undiscounted),
            None => (None, None),
        };
        Ok(ProductVariant {
            id: VariantId::new(self.id).map_err(decode)?,
            name: self.name,
            sku: self.sku.filter(|sku| !sku.is_empty()),
            price: price.map(TaxedMoneyNode::into_money).transpose()?,
            undiscounted_price: undiscounted.map(TaxedMoneyNode::into_money).transpose()?,
        })
    }
}

impl AttributeNode {
    /// Attributes without a slug cannot be filtered on and are skipped.
    fn into_attribute(self) -> Option<ProductAttribute> {
        let slug = self.attribute.slug?;
        let values = self
            .values
            .into_iter()
            .filter_map(|value| {
                let slug = value.slug?;
                Some(AttributeValue {
                    name: value.name.unwrap_or_else(|| slug.clone()),
                    slug,
                })
            })
            .collect();
        Some(ProductAttribute {
            name: self.attribute.name.unwrap_or_else(|| slug.clone()),
            slug,
            values,
        })
    }
}

fn decode(err: impl std::fmt::Display) -> GraphQlError {
    GraphQlError::Decode(err.to_string())
}
