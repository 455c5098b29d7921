//! Text output for the terminal.

use std::fmt::Write as _;

use storefront_catalog::{FilterCatalog, Product};

use crate::browse::BrowseReport;

/// One line per product: name, price, slug.
pub fn product_line(product: &Product) -> String {
    let price = product
        .display_price()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    format!("{:<40} {:>14}  {}", product.name(), price, product.slug())
}

pub fn browse_report(report: &BrowseReport) -> String {
    let mut out = String::new();
    for product in &report.products {
        let _ = writeln!(out, "{}", product_line(product));
    }
    let _ = writeln!(
        out,
        "\n{} products, {} page(s){}",
        report.products.len(),
        report.pages_loaded,
        if report.has_more { ", more available" } else { "" }
    );
    if let Some(error) = &report.error {
        let _ = writeln!(out, "error: {}", error.message());
    }
    out
}

pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name());
    let _ = writeln!(out, "  slug:      {}", product.slug());
    if let Some(price) = product.display_price() {
        match product.undiscounted_price() {
            Some(before) if before != price => {
                let _ = writeln!(out, "  price:     {price} (was {before})");
            }
            _ => {
                let _ = writeln!(out, "  price:     {price}");
            }
        }
    }
    if let Some(category) = product.category() {
        let _ = writeln!(out, "  category:  {}", category.name);
    }
    if let Some(sku) = product.default_variant().and_then(|v| v.sku.as_deref()) {
        let _ = writeln!(out, "  sku:       {sku}");
    }
    let _ = writeln!(
        out,
        "  available: {}",
        if product.is_available_for_purchase() { "yes" } else { "no" }
    );
    for attribute in product.attributes() {
        let values: Vec<&str> = attribute.values.iter().map(|v| v.name.as_str()).collect();
        let _ = writeln!(out, "  {}: {}", attribute.name, values.join(", "));
    }
    if !product.variants().is_empty() {
        let _ = writeln!(out, "  variants:");
        for variant in product.variants() {
            let price = variant
                .price
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "    {:<16} {:>14}  {}{}",
                variant.name,
                price,
                variant.sku.as_deref().unwrap_or("-"),
                if variant.is_discounted() { "  on sale" } else { "" }
            );
        }
    }
    if let Some(image) = product.thumbnail() {
        let _ = writeln!(out, "  image:     {}", image.url);
    }
    if let Some(description) = product.description() {
        let _ = writeln!(out, "\n{description}");
    }
    out
}

pub fn filter_catalog(catalog: &FilterCatalog) -> String {
    let mut out = String::new();
    for option in catalog.options() {
        let _ = writeln!(out, "{}", option.attribute_slug);
        for value in &option.values {
            let _ = writeln!(out, "  {:<12} {}", value, FilterCatalog::label(value));
        }
    }
    out
}
