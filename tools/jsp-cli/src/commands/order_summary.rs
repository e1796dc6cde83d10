//! Show the last order.

use anyhow::Result;
use jsp_render::routes;
use jsp_storefront::pages::OrderSummaryPage;

use crate::context::Context;
use crate::output::print_table;

/// Run the order-summary command.
pub async fn run(ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let page = OrderSummaryPage::new(&app, app.location(routes::ORDER_SUMMARY)?);

    let Some(summary) = page.summary() else {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::Value::Null);
        } else {
            ctx.output.info("No order summary found.");
        }
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    let customer = &summary.customer;
    ctx.output.header("Order Summary");
    ctx.output.kv("Full Name", &customer.full_name);
    ctx.output.kv("Phone Number", &customer.phone_number);
    ctx.output.kv("Email", &customer.email);
    ctx.output.kv("Date of Birth", &customer.dob);
    ctx.output.kv("Address", &customer.address);
    if !customer.notes.is_empty() {
        ctx.output.kv("Notes", &customer.notes);
    }

    ctx.output.header("Items");
    let mut rows = vec![vec![
        "Name".to_string(),
        "Price".to_string(),
        "Amount".to_string(),
        "Subtotal".to_string(),
    ]];
    for line in &summary.items {
        rows.push(vec![
            line.name.clone(),
            line.price.display(),
            line.amount.to_string(),
            line.subtotal()?.display(),
        ]);
    }
    print_table(&ctx.output, &rows);
    ctx.output.kv("Total", &summary.total.display());
    Ok(())
}
