//! Search page: filter panel, results and pagination.

use std::collections::HashMap;

use jsp_cache::KvStore;
use jsp_commerce::catalog::Product;
use jsp_commerce::search::{
    apply_update, build_facets, search, Dimension, Facet, FilterState, FilterUpdate,
    SearchResults,
};
use jsp_render::html::{find_all, walk_mut, Element, Node};
use jsp_render::templates::ids;
use serde_json::json;

use super::Page;
use crate::app::{page_title, Storefront};
use crate::browser::{History, Location};

/// Attribute on a section's `<summary>` naming the section.
pub const DATA_FILTER_KEY: &str = "data-filter-key";

/// The search page of one tab.
///
/// The filter panel is kept between renders so that sections the user
/// expanded or collapsed stay that way when the filters change.
#[derive(Debug)]
pub struct SearchPage<'a, L, S> {
    app: &'a Storefront<L, S>,
    history: History,
    filters_panel: Vec<Node>,
}

impl<'a, L: KvStore, S: KvStore> SearchPage<'a, L, S> {
    /// Open the search page with `history` positioned at its location.
    pub fn new(app: &'a Storefront<L, S>, history: History) -> Self {
        let mut page = Self {
            app,
            history,
            filters_panel: Vec::new(),
        };
        page.refresh();
        page
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Filter state of the current location.
    pub fn state(&self) -> FilterState {
        self.history.location().filter_state()
    }

    /// The current page of results.
    pub fn results(&self) -> SearchResults<&'a Product> {
        search(self.app.catalog(), &self.state(), self.app.page_size())
    }

    /// Filter panel sections.
    pub fn facets(&self) -> Vec<Facet> {
        build_facets(self.app.catalog(), &self.state())
    }

    /// Flip a value of a dimension.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let update = FilterUpdate::toggle(&self.state(), dimension, value);
        self.apply(update);
    }

    /// Check or uncheck a value of a dimension.
    pub fn select(&mut self, dimension: Dimension, value: &str, selected: bool) {
        self.apply(FilterUpdate::Select {
            dimension,
            value: value.to_string(),
            selected,
        });
    }

    /// Replace the text query.
    pub fn set_query(&mut self, query: &str) {
        self.apply(FilterUpdate::SetQuery(query.to_string()));
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.apply(FilterUpdate::SetPage(page));
    }

    /// Drop the query and all filter values.
    pub fn clear_filters(&mut self) {
        self.apply(FilterUpdate::ClearAll);
    }

    /// Go back in history and re-render. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.refresh();
        }
        moved
    }

    /// Expand or collapse the section with `key`, as a click on its summary
    /// would. Returns false when there is no such section.
    pub fn toggle_section(&mut self, key: &str) -> bool {
        let mut found = false;
        walk_mut(&mut self.filters_panel, &mut |el| {
            if el.tag == "details" && section_key(el) == Some(key) {
                let open = el.has_attr("open");
                if open {
                    el.remove_attr("open");
                } else {
                    el.set_attr("open", "");
                }
                found = true;
            }
        });
        found
    }

    /// Whether the section with `key` is expanded.
    pub fn is_section_open(&self, key: &str) -> Option<bool> {
        snapshot_open_sections(&self.filters_panel).get(key).copied()
    }

    fn apply(&mut self, update: FilterUpdate) {
        let next = apply_update(self.history.location().url(), &update);
        self.history.push(next);
        self.refresh();
    }

    /// Rebuild the filter panel, carrying over each section's open state.
    fn refresh(&mut self) {
        let snapshot = snapshot_open_sections(&self.filters_panel);
        let mut panel = vec![filters_panel(&self.facets())];
        restore_open_sections(&mut panel, &snapshot);
        self.filters_panel = panel;
    }

    fn results_view(&self, results: &SearchResults<&'a Product>) -> Node {
        let ctx = self.app.template_context(self.history.location());
        let cards = results.items.iter().filter_map(|product| {
            let data = json!({ "productName": product.name, "variant": "wide" });
            self.app.templates().render(&ctx, ids::PRODUCT_CARD, Some(&data))
        });
        Element::new("div").class("search-results").children(cards).into()
    }
}

impl<L: KvStore, S: KvStore> Page for SearchPage<'_, L, S> {
    fn location(&self) -> &Location {
        self.history.location()
    }

    fn title(&self) -> String {
        page_title("Search")
    }

    fn view(&self) -> Vec<Node> {
        let state = self.state();
        let results = self.results();

        let clear = Element::new("button")
            .class("clear-filters")
            .attr("type", "button")
            .flag("hidden", !state.is_active())
            .text("Clear all filters");

        let mut content = Element::new("div")
            .class("search-content")
            .child(
                Element::new("p")
                    .class("results-summary")
                    .text(results.summary()),
            )
            .child(self.results_view(&results));
        if let Some(pagination) = pagination_view(&results) {
            content = content.child(pagination);
        }

        let aside = Element::new("aside")
            .class("search-sidebar")
            .children(self.filters_panel.iter().cloned())
            .child(clear);

        vec![aside.into(), content.into()]
    }
}

fn section_key(details: &Element) -> Option<&str> {
    details
        .children
        .iter()
        .filter_map(Node::as_element)
        .find(|child| child.tag == "summary")
        .and_then(|summary| summary.get_attr(DATA_FILTER_KEY))
}

/// Open state of every filter section, by key.
pub fn snapshot_open_sections(nodes: &[Node]) -> HashMap<String, bool> {
    find_all(nodes, |el| el.tag == "details")
        .into_iter()
        .filter_map(|details| {
            section_key(details).map(|key| (key.to_string(), details.has_attr("open")))
        })
        .collect()
}

/// Apply a snapshot taken with [`snapshot_open_sections`]. Sections missing
/// from the snapshot keep their default.
pub fn restore_open_sections(nodes: &mut [Node], snapshot: &HashMap<String, bool>) {
    walk_mut(nodes, &mut |el| {
        if el.tag != "details" {
            return;
        }
        let Some(open) = section_key(el).and_then(|key| snapshot.get(key)).copied() else {
            return;
        };
        if open {
            el.set_attr("open", "");
        } else {
            el.remove_attr("open");
        }
    });
}

fn filters_panel(facets: &[Facet]) -> Node {
    let sections = facets.iter().map(|facet| {
        let selected = facet.selected_count();
        let summary = Element::new("summary")
            .attr(DATA_FILTER_KEY, facet.key.as_str())
            .text(facet.title.as_str())
            .child(
                Element::new("span")
                    .class("filter-count")
                    .flag("hidden", selected == 0)
                    .text(selected.to_string()),
            );
        let options = facet.values.iter().map(|value| {
            Element::new("li")
                .child(
                    Element::new("label")
                        .child(
                            Element::new("input")
                                .attr("type", "checkbox")
                                .attr("name", facet.dimension.param())
                                .attr("value", value.value.as_str())
                                .flag("checked", value.selected),
                        )
                        .text(format!(" {} ", value.value))
                        .child(
                            Element::new("span")
                                .class("facet-count")
                                .text(format!("({})", value.count)),
                        ),
                )
                .into()
        });
        Element::new("details")
            .flag("open", facet.open_by_default)
            .child(summary)
            .child(Element::new("ul").children(options))
            .into()
    });
    Element::new("div").class("filters").children(sections).into()
}

fn pagination_view<T>(results: &SearchResults<T>) -> Option<Node> {
    let p = &results.pagination;
    if !p.is_paginated() {
        return None;
    }
    let button = |class: &str, label: &str, target: i64, enabled: bool| -> Node {
        Element::new("button")
            .class(class)
            .attr("type", "button")
            .attr("data-page", target.to_string())
            .flag("disabled", !enabled)
            .text(label)
            .into()
    };
    let nav = Element::new("nav")
        .class("pagination")
        .child(button("first", "First", 1, p.has_prev))
        .child(button("prev", "Prev", p.page.saturating_sub(1), p.has_prev))
        .child(
            Element::new("span")
                .class("page-info")
                .text(format!("Page {} of {}", p.page, p.total_pages)),
        )
        .child(button("next", "Next", p.page.saturating_add(1), p.has_next))
        .child(button("last", "Last", p.total_pages, p.has_next));
    Some(nav.into())
}
