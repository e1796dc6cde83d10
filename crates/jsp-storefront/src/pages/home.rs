//! Home page.

use jsp_cache::KvStore;
use jsp_render::html::{Element, Node};
use jsp_render::placeholder;
use jsp_render::routes;
use jsp_render::templates::ids;
use serde_json::json;

use super::Page;
use crate::app::{Storefront, SITE_NAME};
use crate::browser::Location;
use crate::StorefrontError;

const REVIEWS: [(&str, &str, &str); 3] = [
    (
        "/assets/reviews/andi.webp",
        "Andi",
        "Fast shipping and the parts were exactly as described. Built my first PC without a hitch.",
    ),
    (
        "/assets/reviews/sari.webp",
        "Sari",
        "Great prices on GPUs and the search filters made it easy to compare options.",
    ),
    (
        "/assets/reviews/budi.webp",
        "Budi",
        "Checkout took a minute. Will definitely order my next upgrade here.",
    ),
];

/// Landing page: hero, categories, recommendations and reviews.
///
/// The content is placeholders filled in by the template registry when the
/// page is rendered.
#[derive(Debug)]
pub struct HomePage {
    location: Location,
}

impl HomePage {
    pub fn new<L: KvStore, S: KvStore>(app: &Storefront<L, S>) -> Result<Self, StorefrontError> {
        Ok(Self {
            location: app.location(routes::HOME)?,
        })
    }
}

impl Page for HomePage {
    fn location(&self) -> &Location {
        &self.location
    }

    fn title(&self) -> String {
        SITE_NAME.to_string()
    }

    fn view(&self) -> Vec<Node> {
        let hero = Element::new("section")
            .class("hero")
            .child(Element::new("h1").text("Build your dream PC"))
            .child(Element::new("p").text("Every part you need, delivered across Indonesia."))
            .child(
                Element::new("a")
                    .class("button")
                    .attr("href", routes::SEARCH)
                    .text("Shop now"),
            );

        let reviews = REVIEWS.iter().map(|(imgsrc, name, message)| {
            let data = json!({ "imgsrc": imgsrc, "name": name, "message": message });
            placeholder(ids::HOME_REVIEW, Some(&data)).into()
        });

        vec![
            hero.into(),
            section("categories", "Shop by Category", placeholder(ids::PRODUCT_CATEGORIES, None)),
            section("recommended", "Recommended for You", placeholder(ids::HOME_RECOMMENDED, None)),
            Element::new("section")
                .class("reviews")
                .child(Element::new("h2").text("What Our Customers Say"))
                .child(Element::new("div").class("review-list").children(reviews))
                .into(),
        ]
    }
}

fn section(class: &str, title: &str, content: Element) -> Node {
    Element::new("section")
        .class(class)
        .child(Element::new("h2").text(title))
        .child(content)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsp_cache::MemoryStore;
    use jsp_commerce::catalog::{Catalog, Product};
    use jsp_commerce::Money;
    use jsp_render::html::{find_all, find_by_class};
    use jsp_render::templates::DATA_TEMPLATE;
    use std::sync::Arc;

    #[test]
    fn test_home_placeholders_render() {
        let products = (0..12)
            .map(|i| Product::new(format!("Part {i}"), "Acme", "CPU", Money::new(1_000)))
            .collect();
        let app = Storefront::new(
            Arc::new(Catalog::new(products).unwrap()),
            MemoryStore::new(),
            MemoryStore::new(),
        )
        .unwrap();
        let page = HomePage::new(&app).unwrap();
        assert_eq!(page.title(), "JSP Store");

        let nodes = app.page_nodes(page.location(), page.view());
        assert!(find_all(&nodes, |el| el.has_attr(DATA_TEMPLATE)).is_empty());
        assert_eq!(find_all(&nodes, |el| el.has_class(ids::HOME_REVIEW)).len(), 3);
        assert_eq!(find_all(&nodes, |el| el.has_class(ids::PRODUCT_CARD)).len(), 10);
        assert!(find_by_class(&nodes, ids::PRODUCT_CATEGORIES).is_some());
        assert!(find_by_class(&nodes, ids::HEADER).is_some());
    }
}
