//! Checkout command.

use anyhow::{Context as _, Result};
use serde_json::json;
use softo_commerce::checkout::build_message;
use softo_commerce::cart::LineItem;

use super::CheckoutArgs;
use crate::context::Context;

/// Print the WhatsApp link carrying the current cart.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let checkout = &ctx.config.checkout;
    checkout
        .validate()
        .context("Invalid [checkout] configuration")?;

    let store = ctx.cart_store();
    let items: Vec<&LineItem> = store.items();
    let message = build_message(checkout, &items, store.total());
    let link = checkout.link_for(store.cart());

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "link": link,
            "message": message,
            "count": store.count(),
        }));
        return Ok(());
    }

    if store.is_empty() {
        ctx.output.warn("Cart is empty; the link opens a plain order request");
    }
    if args.message {
        ctx.output.header("Message");
        ctx.output.plain(&message);
        ctx.output.header("Link");
    }
    ctx.output.plain(&link);
    Ok(())
}
