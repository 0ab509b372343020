//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use softo_commerce::catalog::{Product, ProductFilter};
use softo_data::CatalogBrowser;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::column_width;

/// List categories in display order.
pub async fn categories(ctx: &Context) -> Result<()> {
    let client = ctx.catalog()?;
    let spinner = ctx.output.spinner("Loading categories...");
    let result = client.list_categories().await;
    spinner.finish_and_clear();
    let categories = result.context("Failed to load categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    if categories.is_empty() {
        ctx.output.info("No categories");
        return Ok(());
    }

    let lang = ctx.config.storefront.lang;
    let slug_width = column_width("SLUG", categories.iter().map(|c| c.slug.as_str()));
    ctx.output.header("Categories");
    ctx.output.table_row(&["SLUG", "NAME"], &[slug_width, 0]);
    for category in &categories {
        ctx.output
            .table_row(&[category.slug.as_str(), category.name(lang)], &[slug_width, 0]);
    }

    Ok(())
}

/// List products, images first.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let mut filter = match args.category {
        Some(slug) => ProductFilter::category(slug),
        None => ProductFilter::all(),
    };
    if let Some(kind) = args.kind {
        filter = filter.with_kind(kind.into());
    }

    let browser = CatalogBrowser::new(ctx.catalog()?);
    let spinner = ctx.output.spinner("Loading products...");
    let result = browser.select(filter).await;
    spinner.finish_and_clear();
    let products = result
        .context("Product listing was superseded")?
        .context("Failed to load products")?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.info("No products");
        return Ok(());
    }

    print_products(&products, ctx);
    Ok(())
}

fn print_products(products: &[Product], ctx: &Context) {
    let lang = ctx.config.storefront.lang;
    let currency = ctx.config.cart.currency;

    let rows: Vec<[String; 5]> = products
        .iter()
        .map(|p| {
            let price = p.unit_price(currency).display();
            let price = match p.discount_percentage() {
                Some(pct) => format!("{price} (-{pct:.0}%)"),
                None => price,
            };
            [
                p.id.to_string(),
                p.kind.as_str().to_string(),
                p.display_name(lang).to_string(),
                price,
                p.kind.size_options().join(" "),
            ]
        })
        .collect();

    let headers = ["ID", "KIND", "NAME", "PRICE", "SIZES"];
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| column_width(h, rows.iter().map(|r| r[i].as_str())))
        .collect();

    ctx.output.header("Products");
    ctx.output.table_row(&headers, &widths);
    for (row, product) in rows.iter().zip(products) {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
        if let Some(badge) = product.badge_text(lang) {
            ctx.output.kv("badge", badge);
        }
        if !product.has_image() {
            ctx.output.debug(&format!("{} has no image", product.id));
        }
    }

    ctx.output.debug(&format!("{} product(s)", products.len()));
}
