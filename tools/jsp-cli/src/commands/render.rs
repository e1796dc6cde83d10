//! Render a page to HTML.

use anyhow::{bail, Context as _, Result};
use jsp_render::{routes, IconSource};
use jsp_storefront::pages::{
    CartPage, CheckoutPage, HomePage, OrderSummaryPage, ProductPage, SearchPage,
};

use super::RenderArgs;
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let location = app.location(&args.href)?;

    let source = if args.no_icons { None } else { ctx.icon_source() };
    let icons = source.as_ref().map(|s| s as &dyn IconSource);

    let path = location.path().to_string();
    let spinner = ctx.output.spinner(&format!("Rendering {}", path));
    let html = match path.as_str() {
        routes::HOME | "/index.html" => app.render(&HomePage::new(&app)?, icons).await,
        routes::SEARCH => {
            let page = SearchPage::new(&app, app.history(&args.href)?);
            app.render(&page, icons).await
        }
        routes::PRODUCT => app.render(&ProductPage::new(&app, location), icons).await,
        routes::CART => app.render(&CartPage::new(&app, location), icons).await,
        routes::CHECKOUT => app.render(&CheckoutPage::new(&app, location), icons).await,
        routes::ORDER_SUMMARY => {
            app.render(&OrderSummaryPage::new(&app, location), icons)
                .await
        }
        other => {
            spinner.finish_and_clear();
            bail!("Unknown page: {}", other);
        }
    };
    spinner.finish_and_clear();

    match args.output {
        Some(path) => {
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path))?;
            ctx.output.success(&format!("Wrote {}", path));
        }
        None => print!("{}", html),
    }
    Ok(())
}
