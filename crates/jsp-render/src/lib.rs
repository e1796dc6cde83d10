//! Markup for JSP Store.
//!
//! - [`html`] - node tree rendered to escaped HTML
//! - [`templates`] - template registry and placeholder rendering
//! - [`icons`] - concurrent brand icon fetching and substitution
//! - [`shell`] - document wrapper
//! - [`routes`] - site paths and link builders

mod error;

pub mod html;
pub mod icons;
pub mod routes;
pub mod shell;
pub mod templates;

pub use error::RenderError;
pub use html::{Element, Node};
pub use icons::{
    collect_icon_slugs, fetch_icons, render_icons, substitute_icons, HttpIconSource, IconSource,
    DEFAULT_ICON_BASE_URL,
};
pub use shell::{HeadContent, Shell};
pub use templates::{placeholder, TemplateContext, TemplateRegistry};
