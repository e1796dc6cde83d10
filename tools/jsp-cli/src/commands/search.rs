//! Catalog search.

use anyhow::Result;
use jsp_commerce::search::FilterState;
use jsp_render::routes;
use jsp_storefront::pages::SearchPage;
use serde_json::json;

use super::SearchArgs;
use crate::context::Context;
use crate::output::print_table;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;

    let mut state = FilterState::new()
        .with_query(args.query.as_deref().unwrap_or_default())
        .with_page(args.page);
    for category in args.category {
        state = state.with_category(category);
    }
    for manufacturer in args.manufacturer {
        state = state.with_manufacturer(manufacturer);
    }
    for tag in args.tag {
        state = state.with_tag(tag);
    }

    let href = routes::search_href(&state);
    tracing::debug!(%href, "searching");
    let page = SearchPage::new(&app, app.history(&href)?);
    let results = page.results();

    if ctx.output.is_json() {
        let mut value = json!({
            "summary": results.summary(),
            "pagination": results.pagination,
            "items": results.items,
        });
        if args.facets {
            value["facets"] = serde_json::to_value(page.facets())?;
        }
        ctx.output.json(&value);
        return Ok(());
    }

    ctx.output.header(&results.summary());
    if results.is_empty() {
        ctx.output.info("No products on this page");
    } else {
        let mut rows = vec![vec![
            "Name".to_string(),
            "Category".to_string(),
            "Manufacturer".to_string(),
            "Price".to_string(),
        ]];
        rows.extend(results.items.iter().map(|p| {
            vec![
                p.name.clone(),
                p.category.clone(),
                p.manufacturer.clone(),
                p.price.display(),
            ]
        }));
        print_table(&ctx.output, &rows);
    }

    let pagination = results.pagination;
    if pagination.is_paginated() {
        ctx.output.info(&format!(
            "Page {} of {}",
            pagination.page, pagination.total_pages
        ));
    }

    if args.facets {
        for facet in page.facets() {
            ctx.output.header(&facet.title);
            for value in &facet.values {
                let mark = if value.selected { "[x]" } else { "[ ]" };
                ctx.output
                    .list_item(&format!("{} {} ({})", mark, value.value, value.count));
            }
        }
    }

    Ok(())
}
