//! Product details.

use anyhow::{bail, Result};
use jsp_render::routes;
use jsp_storefront::pages::ProductPage;
use serde_json::json;

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let location = app.location(&routes::product_href(&args.name))?;
    let mut page = ProductPage::new(&app, location);

    let Some(product) = page.product() else {
        bail!("Product not found: {}", args.name);
    };

    let added = match &args.add {
        Some(raw) => {
            page.set_amount_input(raw);
            Some(page.add_to_cart()?)
        }
        None => None,
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "added": added.as_ref().map(|_| page.amount()),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("category", &product.category);
    ctx.output.kv("manufacturer", &product.manufacturer);
    ctx.output.kv("price", &product.price.display());
    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }

    if let Some(message) = added {
        ctx.output.success(&message);
        ctx.output
            .info(&format!("Cart now holds {} item(s)", app.carts().item_count()));
    }

    Ok(())
}
