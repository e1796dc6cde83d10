//! Place an order.

use anyhow::{bail, Result};
use dialoguer::Input;
use jsp_render::routes;
use jsp_storefront::pages::{CheckoutPage, OrderSummaryPage};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let mut page = CheckoutPage::new(&app, app.location(routes::CHECKOUT)?);
    if page.lines().is_empty() {
        bail!("Your cart is empty.");
    }

    let fields = [
        ("fullName", "Full name", args.full_name, true),
        ("phoneNumber", "Phone number", args.phone_number, true),
        ("email", "Email", args.email, true),
        ("dob", "Date of birth (YYYY-MM-DD)", args.dob, true),
        ("address", "Address", args.address, true),
        ("notes", "Notes", args.notes, false),
    ];
    for (name, prompt, value, required) in fields {
        let value = match value {
            Some(value) => value,
            None if ctx.output.is_json() => {
                if required {
                    bail!("Missing --{}", flag_name(name));
                }
                String::new()
            }
            None => Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(!required)
                .interact_text()?,
        };
        page.set_field(name, &value);
    }

    let next = page.submit()?;
    ctx.output.success("Order placed");

    let summary = OrderSummaryPage::new(&app, next).summary();
    if let Some(summary) = summary {
        if ctx.output.is_json() {
            ctx.output.json(&summary);
        } else {
            ctx.output.kv("items", &summary.item_count().to_string());
            ctx.output.kv("total", &summary.total.display());
        }
    }
    Ok(())
}

/// `fullName` -> `full-name`.
fn flag_name(field: &str) -> String {
    let mut flag = String::with_capacity(field.len() + 2);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            flag.push('-');
            flag.push(c.to_ascii_lowercase());
        } else {
            flag.push(c);
        }
    }
    flag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_name() {
        assert_eq!(flag_name("fullName"), "full-name");
        assert_eq!(flag_name("phoneNumber"), "phone-number");
        assert_eq!(flag_name("dob"), "dob");
    }
}
