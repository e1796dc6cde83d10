//! Cart management.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use jsp_render::routes;
use jsp_storefront::pages::CartPage;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::{CliStorefront, Context};
use crate::output::print_table;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { name, amount } => {
            let product = app.catalog().get(&name)?;
            app.carts()
                .add_to_cart(&product.name, product.price, amount)
                .with_context(|| format!("Failed to add {}", name))?;
            ctx.output
                .success(&format!("{}x {} added to cart!", amount, product.name));
        }
        CartCommand::Set { name, amount } => {
            if app.carts().get().find(&name).is_none() {
                ctx.output.warn(&format!("{} is not in the cart", name));
            }
            app.carts().set_amount(&name, amount)?;
        }
        CartCommand::Remove { name } => {
            CartPage::new(&app, app.location(routes::CART)?).remove(&name)?;
            ctx.output.success(&format!("Removed {}", name));
        }
        CartCommand::Clear { yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left as is");
                    return Ok(());
                }
            }
            app.carts().clear()?;
            ctx.output.success("Cart cleared");
        }
    }
    show(&app, ctx)
}

fn show(app: &CliStorefront, ctx: &Context) -> Result<()> {
    let page = CartPage::new(app, app.location(routes::CART)?);
    let lines = page.lines();
    let total = page.total()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": lines,
            "total": total,
            "count": app.carts().item_count(),
        }));
        return Ok(());
    }

    ctx.output.header("Shopping Cart");
    if lines.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }
    let mut rows = vec![vec![
        "Name".to_string(),
        "Price".to_string(),
        "Amount".to_string(),
        "Subtotal".to_string(),
    ]];
    for line in &lines {
        rows.push(vec![
            line.name.clone(),
            line.price.display(),
            line.amount.to_string(),
            line.subtotal()?.display(),
        ]);
    }
    print_table(&ctx.output, &rows);
    ctx.output.kv("Total", &total.display());
    Ok(())
}
