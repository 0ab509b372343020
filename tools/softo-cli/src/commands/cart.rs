//! Cart commands.
//!
//! The cart lives in a file-backed slot, so every invocation hydrates it,
//! applies one mutation and writes it back.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use softo_commerce::cart::{Cart, LineCandidate};
use softo_commerce::catalog::{ProductFilter, Size};
use softo_commerce::CommerceError;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::column_width;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx),
        CartCommand::Add {
            product_id,
            size,
            qty,
            category,
        } => add(&product_id, size, qty, category, ctx).await,
        CartCommand::Inc { key } => step(&key, Step::Inc, ctx),
        CartCommand::Dec { key } => step(&key, Step::Dec, ctx),
        CartCommand::Remove { key } => step(&key, Step::Remove, ctx),
        CartCommand::Clear { yes } => clear(yes, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let store = ctx.cart_store();
    print_cart(store.cart(), ctx);
    Ok(())
}

async fn add(
    product_id: &str,
    size: Option<String>,
    qty: f64,
    category: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let filter = match category {
        Some(slug) => ProductFilter::category(slug),
        None => ProductFilter::all(),
    };

    let client = ctx.catalog()?;
    let spinner = ctx.output.spinner("Looking up product...");
    let result = client.list_products(&filter).await;
    spinner.finish_and_clear();
    let products = result.context("Failed to load products")?;

    let product = products
        .iter()
        .find(|p| p.id.as_str() == product_id)
        .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;

    let candidate = LineCandidate::from_product(
        product,
        size.map(Size::new),
        ctx.config.storefront.lang,
        ctx.config.cart.currency,
    )?;
    let key = candidate.key.clone();

    let mut store = ctx.cart_store();
    store.add(candidate, qty);

    let quantity = store.get(key.as_str()).map(|l| l.quantity).unwrap_or(0);
    let name = product.display_name(ctx.config.storefront.lang);
    ctx.output
        .success(&format!("{} ×{} in cart ({})", name, quantity, key));
    print_cart(store.cart(), ctx);
    Ok(())
}

enum Step {
    Inc,
    Dec,
    Remove,
}

fn step(key: &str, step: Step, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store();
    if store.get(key).is_none() {
        bail!("No cart line with key '{}'. Run `softo cart show` to list keys.", key);
    }

    match step {
        Step::Inc => store.increment(key),
        Step::Dec => store.decrement(key),
        Step::Remove => store.remove(key),
    }

    match store.get(key) {
        Some(line) => ctx.output.success(&format!("{} ×{}", line.name, line.quantity)),
        None => ctx.output.success(&format!("Removed {}", key)),
    }
    print_cart(store.cart(), ctx);
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store();
    if store.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", store.count()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.clear();
    ctx.output.success("Cart cleared");
    print_cart(store.cart(), ctx);
    Ok(())
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items().collect::<Vec<_>>(),
            "count": cart.count(),
            "total": cart.total().to_decimal(),
            "currency": cart.currency().code(),
        }));
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    let rows: Vec<[String; 5]> = cart
        .items()
        .map(|line| {
            [
                line.key.to_string(),
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.display(),
                line.line_total().display(),
            ]
        })
        .collect();

    let headers = ["KEY", "NAME", "QTY", "PRICE", "TOTAL"];
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| column_width(h, rows.iter().map(|r| r[i].as_str())))
        .collect();

    ctx.output.header("Cart");
    ctx.output.table_row(&headers, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }
    ctx.output.kv("items", &cart.count().to_string());
    ctx.output.kv("total", &cart.total().display());
}
