//! Shared storefront context.

use std::sync::Arc;

use jsp_cache::{Cache, KvStore};
use jsp_commerce::cart::CartStore;
use jsp_commerce::catalog::Catalog;
use jsp_commerce::events::EventBus;
use jsp_commerce::search::DEFAULT_PAGE_SIZE;
use jsp_render::html::Node;
use jsp_render::templates::ids;
use jsp_render::{
    placeholder, render_icons, Element, HeadContent, IconSource, Shell, TemplateContext,
    TemplateRegistry,
};
use url::Url;

use crate::browser::{History, Location};
use crate::pages::Page;
use crate::StorefrontError;

/// Origin pages are resolved against.
pub const DEFAULT_ORIGIN: &str = "https://jsp.store/";

/// Suffix of every page title.
pub const SITE_NAME: &str = "JSP Store";

const STYLESHEET: &str = "/styles/main.css";

/// Everything the pages of one tab share: catalog, stores, event bus and
/// templates.
///
/// `L` is the local (persistent) store, `S` the session store.
#[derive(Debug)]
pub struct Storefront<L, S> {
    catalog: Arc<Catalog>,
    carts: CartStore<L>,
    session: Cache<S>,
    events: EventBus,
    templates: TemplateRegistry,
    page_size: usize,
    origin: Url,
}

impl<L: KvStore, S: KvStore> Storefront<L, S> {
    /// Create a storefront over the given stores.
    pub fn new(catalog: Arc<Catalog>, local: L, session: S) -> Result<Self, StorefrontError> {
        let events = EventBus::new();
        Ok(Self {
            catalog,
            carts: CartStore::new(local, events.clone()),
            session: Cache::new(session),
            events,
            templates: TemplateRegistry::new(),
            page_size: DEFAULT_PAGE_SIZE,
            origin: Url::parse(DEFAULT_ORIGIN)?,
        })
    }

    /// Set the number of products per search page (at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Replace the template registry.
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Set the origin relative links resolve against.
    pub fn with_origin(mut self, origin: &str) -> Result<Self, StorefrontError> {
        self.origin = Url::parse(origin)?;
        Ok(self)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn carts(&self) -> &CartStore<L> {
        &self.carts
    }

    pub fn session(&self) -> &Cache<S> {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Resolve `href` against the origin.
    pub fn location(&self, href: &str) -> Result<Location, StorefrontError> {
        Location::parse(&self.origin, href)
    }

    /// A fresh history starting at `href`.
    pub fn history(&self, href: &str) -> Result<History, StorefrontError> {
        Ok(History::new(self.location(href)?, self.events.clone()))
    }

    /// Template context for a page at `location`.
    pub fn template_context(&self, location: &Location) -> TemplateContext<'_> {
        TemplateContext::new(&self.catalog)
            .with_search_query(&location.param("q").unwrap_or_default())
            .with_cart_count(self.carts.item_count())
    }

    /// Wrap `main` in header and footer and render every placeholder.
    pub fn page_nodes(&self, location: &Location, main: Vec<Node>) -> Vec<Node> {
        let mut nodes = vec![
            placeholder(ids::HEADER, None).into(),
            Element::new("main").children(main).into(),
            placeholder(ids::FOOTER, None).into(),
        ];
        let ctx = self.template_context(location);
        self.templates.render_placeholders(&ctx, &mut nodes);
        nodes
    }

    /// Render a complete document, substituting brand icons when a source
    /// is given.
    pub async fn render_document(
        &self,
        title: &str,
        mut nodes: Vec<Node>,
        icons: Option<&dyn IconSource>,
    ) -> String {
        if let Some(source) = icons {
            render_icons(source, &mut nodes).await;
        }
        let head = HeadContent::new(title)
            .with_meta("viewport", "width=device-width, initial-scale=1")
            .with_stylesheet(STYLESHEET);
        Shell::new(head).render(&nodes)
    }

    /// Render `page` as a complete document.
    pub async fn render<P: Page + ?Sized>(
        &self,
        page: &P,
        icons: Option<&dyn IconSource>,
    ) -> String {
        let nodes = self.page_nodes(page.location(), page.view());
        self.render_document(&page.title(), nodes, icons).await
    }
}

/// `"{page} - JSP Store"`.
pub fn page_title(page: &str) -> String {
    format!("{} - {}", page, SITE_NAME)
}
