use serde::{Deserialize, Serialize};

use storefront_core::{ProductId, VariantId};

use crate::money::Money;

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    pub sku: Option<String>,
    /// Display price (gross). Absent when the backend has no price for the channel.
    pub price: Option<Money>,
    /// Price before discounts; only requested by the detail lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undiscounted_price: Option<Money>,
}

impl ProductVariant {
    /// Whether the display price is below the undiscounted price.
    pub fn is_discounted(&self) -> bool {
        match (&self.price, &self.undiscounted_price) {
            (Some(price), Some(before)) => {
                price.currency == before.currency && price.amount_minor < before.amount_minor
            }
            _ => false,
        }
    }
}

/// Product image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMedia {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

/// One value assigned to a product attribute (e.g. `round` for `shape`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub slug: String,
    pub name: String,
}

/// Attribute assignment on a product (e.g. `shape: [round]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub slug: String,
    pub name: String,
    pub values: Vec<AttributeValue>,
}

/// Product as returned by the commerce backend.
///
/// Read-only for the client: the listing core orders and filters references to
/// products but never changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    slug: String,
    description: Option<String>,
    default_variant: Option<ProductVariant>,
    /// All variants, for the detail page's picker. Empty in listings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    variants: Vec<ProductVariant>,
    media: Vec<ProductMedia>,
    category: Option<Category>,
    attributes: Vec<ProductAttribute>,
    available_for_purchase: bool,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            default_variant: None,
            variants: Vec::new(),
            media: Vec::new(),
            category: None,
            attributes: Vec::new(),
            available_for_purchase: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_variant(mut self, variant: ProductVariant) -> Self {
        self.default_variant = Some(variant);
        self
    }

    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_media(mut self, media: ProductMedia) -> Self {
        self.media.push(media);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_attribute(mut self, attribute: ProductAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_availability(mut self, available_for_purchase: bool) -> Self {
        self.available_for_purchase = available_for_purchase;
        self
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.default_variant.as_ref()
    }

    /// Price shown on product cards (the default variant's price).
    pub fn display_price(&self) -> Option<&Money> {
        self.default_variant.as_ref().and_then(|v| v.price.as_ref())
    }

    /// Price before discounts, when the default variant carries one.
    pub fn undiscounted_price(&self) -> Option<&Money> {
        self.default_variant
            .as_ref()
            .and_then(|v| v.undiscounted_price.as_ref())
    }

    pub fn variants(&self) -> &[ProductVariant] {
        &self.variants
    }

    pub fn media(&self) -> &[ProductMedia] {
        &self.media
    }

    /// First image, used as the card thumbnail.
    pub fn thumbnail(&self) -> Option<&ProductMedia> {
        self.media.first()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn attributes(&self) -> &[ProductAttribute] {
        &self.attributes
    }

    /// Whether the product carries `value_slug` for the attribute `attribute_slug`.
    pub fn has_attribute_value(&self, attribute_slug: &str, value_slug: &str) -> bool {
        self.attributes
            .iter()
            .filter(|a| a.slug == attribute_slug)
            .flat_map(|a| a.values.iter())
            .any(|v| v.slug == value_slug)
    }

    pub fn is_available_for_purchase(&self) -> bool {
        self.available_for_purchase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Product {
        Product::new(ProductId::new("UHJvZHVjdDox").unwrap(), "Solitaire Ring", "solitaire-ring")
            .with_default_variant(ProductVariant {
                id: VariantId::new("UHJvZHVjdFZhcmlhbnQ6MQ==").unwrap(),
                name: "Size 5".to_string(),
                sku: Some("RING-5".to_string()),
                price: Some(Money::new(4_500_000, "INR")),
                undiscounted_price: None,
            })
            .with_media(ProductMedia {
                url: "https://cdn.example.com/ring-front.png".to_string(),
                alt: "front".to_string(),
            })
            .with_media(ProductMedia {
                url: "https://cdn.example.com/ring-side.png".to_string(),
                alt: "side".to_string(),
            })
            .with_attribute(ProductAttribute {
                slug: "shape".to_string(),
                name: "Shape".to_string(),
                values: vec![AttributeValue {
                    slug: "round".to_string(),
                    name: "Round".to_string(),
                }],
            })
    }

    #[test]
    fn display_price_comes_from_default_variant() {
        let product = ring();
        assert_eq!(product.display_price(), Some(&Money::new(4_500_000, "INR")));
    }

    #[test]
    fn variants_keep_order_and_report_discounts() {
        let variant = |id: &str, name: &str, price: u64, before: Option<u64>| ProductVariant {
            id: VariantId::new(id).unwrap(),
            name: name.to_string(),
            sku: None,
            price: Some(Money::new(price, "INR")),
            undiscounted_price: before.map(|amount| Money::new(amount, "INR")),
        };
        let product = ring()
            .with_variant(variant("v5", "Size 5", 4_000_000, Some(4_500_000)))
            .with_variant(variant("v6", "Size 6", 4_500_000, Some(4_500_000)))
            .with_variant(variant("v7", "Size 7", 4_600_000, None));

        let names: Vec<&str> = product.variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Size 5", "Size 6", "Size 7"]);
        let discounted: Vec<bool> = product.variants().iter().map(ProductVariant::is_discounted).collect();
        assert_eq!(discounted, vec![true, false, false]);
        assert!(product.undiscounted_price().is_none());
    }

    #[test]
    fn display_price_is_absent_without_variant() {
        let product = Product::new(ProductId::new("p").unwrap(), "Plain", "plain");
        assert!(product.display_price().is_none());
        assert!(product.thumbnail().is_none());
    }

    #[test]
    fn thumbnail_is_first_media_item() {
        let product = ring();
        assert_eq!(product.media().len(), 2);
        assert_eq!(product.thumbnail().unwrap().alt, "front");
    }

    #[test]
    fn has_attribute_value_matches_on_slugs() {
        let product = ring();
        assert!(product.has_attribute_value("shape", "round"));
        assert!(!product.has_attribute_value("shape", "oval"));
        assert!(!product.has_attribute_value("metal", "round"));
    }

    #[test]
    fn product_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(ring()).unwrap();
        assert_eq!(json["slug"], "solitaire-ring");
        assert_eq!(json["default_variant"]["price"]["amount_minor"], 4_500_000);
        assert_eq!(json["available_for_purchase"], true);
    }
}
