//! Template registry and placeholder rendering.
//!
//! A template turns optional JSON data into a [`Node`]. Documents declare
//! where templates go with placeholder elements:
//!
//! ```html
//! <div data-template="product-card" data-template-data='{"productName":"Razer Viper V2 Pro"}'></div>
//! ```
//!
//! [`TemplateRegistry::render_placeholders`] swaps each placeholder for its
//! rendered template.

mod builtin;

pub use builtin::{product_card, CATEGORY_IMAGES};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use jsp_commerce::catalog::{Catalog, Product};
use jsp_commerce::sample::pick_random_no_dupe;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::html::{replace_elements, Element, Node};

/// Attribute naming the template of a placeholder.
pub const DATA_TEMPLATE: &str = "data-template";
/// Attribute holding a placeholder's JSON data.
pub const DATA_TEMPLATE_DATA: &str = "data-template-data";

/// Built-in template ids.
pub mod ids {
    pub const HEADER: &str = "header";
    pub const FOOTER: &str = "footer";
    pub const PRODUCT_CATEGORIES: &str = "product-categories";
    pub const PRODUCT_CARD: &str = "product-card";
    pub const HOME_RECOMMENDED: &str = "home-recommended";
    pub const HOME_REVIEW: &str = "home-review";
}

/// A template: context and optional data in, node out. `None` means
/// nothing to render.
pub type TemplateFn = for<'a> fn(&TemplateContext<'a>, Option<&Value>) -> Option<Node>;

/// What templates may read while rendering.
pub struct TemplateContext<'a> {
    /// Product data.
    pub catalog: &'a Catalog,
    /// Current `q` parameter, prefilled in the header search box.
    pub search_query: String,
    /// Units in the cart, shown on the header cart link.
    pub cart_count: u64,
    rng: RefCell<StdRng>,
}

impl<'a> TemplateContext<'a> {
    /// Create a context with an entropy-seeded random source.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            search_query: String::new(),
            cart_count: 0,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Set the header search text (trimmed).
    pub fn with_search_query(mut self, query: &str) -> Self {
        self.search_query = query.trim().to_string();
        self
    }

    /// Set the cart badge count.
    pub fn with_cart_count(mut self, count: u64) -> Self {
        self.cart_count = count;
        self
    }

    /// Use a fixed seed so random picks are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Up to `count` distinct random products.
    pub fn random_products(&self, count: usize) -> Vec<&'a Product> {
        let products: Vec<&'a Product> = self.catalog.iter().collect();
        pick_random_no_dupe(&products, count, &mut *self.rng.borrow_mut())
    }
}

impl fmt::Debug for TemplateContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateContext")
            .field("products", &self.catalog.len())
            .field("search_query", &self.search_query)
            .field("cart_count", &self.cart_count)
            .finish_non_exhaustive()
    }
}

/// Map of template id to template.
#[derive(Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<&'static str, TemplateFn>,
}

impl TemplateRegistry {
    /// A registry with no templates.
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// A registry with the built-in templates.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ids::HEADER, builtin::header);
        registry.register(ids::FOOTER, builtin::footer);
        registry.register(ids::PRODUCT_CATEGORIES, builtin::product_categories);
        registry.register(ids::PRODUCT_CARD, builtin::product_card_template);
        registry.register(ids::HOME_RECOMMENDED, builtin::home_recommended);
        registry.register(ids::HOME_REVIEW, builtin::home_review);
        registry
    }

    /// Add or replace a template.
    pub fn register(&mut self, id: &'static str, template: TemplateFn) {
        self.templates.insert(id, template);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.keys().copied()
    }

    /// Render template `id`.
    ///
    /// Returns `None` for an unknown id or when the template renders nothing.
    /// A rendered element gets the id added as a class.
    pub fn render(&self, ctx: &TemplateContext<'_>, id: &str, data: Option<&Value>) -> Option<Node> {
        let Some(template) = self.templates.get(id) else {
            tracing::debug!(id, "unknown template");
            return None;
        };
        let mut node = template(ctx, data)?;
        if let Node::Element(el) = &mut node {
            el.add_class(id);
        }
        Some(node)
    }

    /// Replace every placeholder element in `nodes` with its rendered
    /// template.
    ///
    /// Unparseable data renders as if there were none. Placeholders whose
    /// template renders nothing stay in place. Returns the number replaced.
    pub fn render_placeholders(&self, ctx: &TemplateContext<'_>, nodes: &mut [Node]) -> usize {
        let replaced = replace_elements(nodes, &mut |el| {
            let id = el.get_attr(DATA_TEMPLATE)?;
            let data = el
                .get_attr(DATA_TEMPLATE_DATA)
                .and_then(|raw| match serde_json::from_str::<Value>(raw) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::debug!(id, error = %e, "placeholder data is not JSON");
                        None
                    }
                });
            self.render(ctx, id, data.as_ref())
        });
        tracing::debug!(replaced, "placeholders rendered");
        replaced
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.templates.keys()).finish()
    }
}

/// A placeholder element for template `id`.
pub fn placeholder(id: &str, data: Option<&Value>) -> Element {
    let el = Element::new("div").attr(DATA_TEMPLATE, id);
    match data {
        Some(value) => el.attr(DATA_TEMPLATE_DATA, value.to_string()),
        None => el,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{find_all, find_by_class, render_nodes};
    use jsp_commerce::money::Money;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new(
            (0..15)
                .map(|i| Product::new(format!("Part {i}"), "Acme", "CPU", Money::new(1000 * i)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_ids() {
        let registry = TemplateRegistry::new();
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(
            ids,
            vec![
                "footer",
                "header",
                "home-recommended",
                "home-review",
                "product-card",
                "product-categories"
            ]
        );
    }

    #[test]
    fn test_unknown_template_renders_nothing() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        assert!(TemplateRegistry::new().render(&ctx, "nope", None).is_none());
    }

    #[test]
    fn test_render_adds_id_class() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let node = TemplateRegistry::new()
            .render(&ctx, ids::PRODUCT_CARD, Some(&json!({"productName": "Part 3"})))
            .unwrap();
        assert!(node.as_element().unwrap().has_class("product-card"));
    }

    #[test]
    fn test_custom_template() {
        fn hello(_: &TemplateContext<'_>, data: Option<&Value>) -> Option<Node> {
            let who = data?.get("who")?.as_str()?.to_string();
            Some(Element::new("p").text(format!("Hello {who}")).into())
        }

        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let mut registry = TemplateRegistry::empty();
        registry.register("hello", hello);

        let node = registry.render(&ctx, "hello", Some(&json!({"who": "Rein"}))).unwrap();
        assert_eq!(node.render(), r#"<p class="hello">Hello Rein</p>"#);
        assert!(registry.render(&ctx, "hello", None).is_none());
    }

    #[test]
    fn test_render_placeholders() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let mut doc = vec![Node::from(
            Element::new("main")
                .child(placeholder(ids::PRODUCT_CARD, Some(&json!({"productName": "Part 1"}))))
                .child(placeholder(ids::PRODUCT_CARD, Some(&json!({"productName": "Missing"}))))
                .child(placeholder("unknown", None)),
        )];

        let replaced = TemplateRegistry::new().render_placeholders(&ctx, &mut doc);

        assert_eq!(replaced, 1);
        assert!(find_by_class(&doc, "product-card").is_some());
        let left = find_all(&doc, |el| el.has_attr(DATA_TEMPLATE));
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn test_placeholder_with_bad_json_renders_without_data() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let mut doc = vec![Node::from(
            Element::new("div")
                .attr(DATA_TEMPLATE, ids::HOME_REVIEW)
                .attr(DATA_TEMPLATE_DATA, "{not json"),
        )];

        assert_eq!(TemplateRegistry::new().render_placeholders(&ctx, &mut doc), 1);
        let html = render_nodes(&doc);
        assert!(html.contains(r#"class="home-review""#));
        assert!(html.contains(r#"<div class="name"></div>"#));
    }

    #[test]
    fn test_random_products_are_distinct() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog).with_seed(3);
        let picked = ctx.random_products(10);
        assert_eq!(picked.len(), 10);
        let mut names: Vec<&str> = picked.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }
}
