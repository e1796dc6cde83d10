//! Brand icons.
//!
//! Documents mark icons with `<i data-si="slug">`. The SVGs are fetched
//! concurrently, one request per distinct slug, and spliced in as raw markup.
//! A failed fetch only leaves its markers untouched.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::RenderError;
use crate::html::{replace_elements, walk, Node};

/// Attribute carrying an icon slug.
pub const DATA_SI: &str = "data-si";

/// Where simple-icons SVGs are served from.
pub const DEFAULT_ICON_BASE_URL: &str = "https://unpkg.com/simple-icons@v15/icons";

const FORCED_SVG_ATTRS: [(&str, &str); 4] = [
    ("width", "1em"),
    ("height", "1em"),
    ("fill", "currentColor"),
    ("stroke-color", "currentColor"),
];

/// A source of SVG markup by icon slug.
#[async_trait]
pub trait IconSource: Send + Sync {
    /// Fetch the SVG text of `slug`.
    async fn fetch(&self, slug: &str) -> Result<String, RenderError>;
}

/// Fetches `{base_url}/{slug}.svg` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpIconSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIconSource {
    /// Create a source rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of an icon.
    pub fn icon_url(&self, slug: &str) -> String {
        format!("{}/{}.svg", self.base_url, slug)
    }
}

impl Default for HttpIconSource {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE_URL)
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn fetch(&self, slug: &str) -> Result<String, RenderError> {
        let fetch_err = |source| RenderError::Fetch {
            slug: slug.to_string(),
            source,
        };
        let response = self
            .client
            .get(self.icon_url(slug))
            .send()
            .await
            .map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                slug: slug.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(fetch_err)
    }
}

/// Distinct non-empty icon slugs in document order.
pub fn collect_icon_slugs(nodes: &[Node]) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    walk(nodes, &mut |el| {
        if el.tag != "i" {
            return;
        }
        if let Some(slug) = el.get_attr(DATA_SI) {
            if !slug.is_empty() && !slugs.iter().any(|s| s == slug) {
                slugs.push(slug.to_string());
            }
        }
    });
    slugs
}

/// Fetch every slug concurrently. Failures are logged and left out of the
/// result.
pub async fn fetch_icons<S>(source: &S, slugs: &[String]) -> HashMap<String, String>
where
    S: IconSource + ?Sized,
{
    let fetches = slugs.iter().map(|slug| async move {
        let result = source.fetch(slug).await;
        (slug, result)
    });

    let mut icons = HashMap::new();
    for (slug, result) in join_all(fetches).await {
        match result {
            Ok(svg) => {
                icons.insert(slug.clone(), svg);
            }
            Err(e) => tracing::debug!(slug = %slug, error = %e, "icon fetch failed"),
        }
    }
    tracing::debug!(requested = slugs.len(), fetched = icons.len(), "icons fetched");
    icons
}

/// Replace `<i data-si>` markers with their fetched SVG.
///
/// Markers whose slug is missing from `icons`, or whose text has no `<svg>`
/// root, are left as they are. Returns the number replaced.
pub fn substitute_icons(nodes: &mut [Node], icons: &HashMap<String, String>) -> usize {
    replace_elements(nodes, &mut |el| {
        if el.tag != "i" {
            return None;
        }
        let slug = el.get_attr(DATA_SI)?;
        let svg = icons.get(slug)?;
        match prepare_svg(svg) {
            Some(markup) => Some(Node::Raw(markup)),
            None => {
                tracing::debug!(slug, "icon response has no <svg> root");
                None
            }
        }
    })
}

/// Collect, fetch and substitute the icons of a document.
pub async fn render_icons<S>(source: &S, nodes: &mut [Node]) -> usize
where
    S: IconSource + ?Sized,
{
    let slugs = collect_icon_slugs(nodes);
    if slugs.is_empty() {
        return 0;
    }
    let icons = fetch_icons(source, &slugs).await;
    substitute_icons(nodes, &icons)
}

/// Cut `text` down to its root `<svg>` element and force the sizing and
/// colour attributes onto it.
pub fn prepare_svg(text: &str) -> Option<String> {
    let start = find_svg_start(text)?;
    let svg = text[start..].trim_end();
    let tag_end = find_tag_end(svg)?;

    let (inner, self_closing) = match svg[..tag_end].strip_suffix('/') {
        Some(inner) => (inner, true),
        None => (&svg[..tag_end], false),
    };
    let mut attrs = parse_attrs(&inner["<svg".len()..]);
    for (name, value) in FORCED_SVG_ATTRS {
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = Some(value.to_string()),
            None => attrs.push((name.to_string(), Some(value.to_string()))),
        }
    }

    let mut out = String::from("<svg");
    for (name, value) in &attrs {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
    }
    if self_closing {
        out.push('/');
    }
    out.push('>');
    out.push_str(&svg[tag_end + 1..]);
    Some(out)
}

fn find_svg_start(text: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = text[from..].find("<svg") {
        let start = from + offset;
        let next = text[start + 4..].chars().next();
        if matches!(next, Some(c) if c.is_whitespace() || c == '>' || c == '/') {
            return Some(start);
        }
        from = start + 4;
    }
    None
}

/// Index of the `>` closing the start tag at the beginning of `svg`,
/// skipping quoted attribute values.
fn find_tag_end(svg: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in svg.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

fn parse_attrs(mut s: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            break;
        }
        let name_end = s
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(s.len());
        let name = s[..name_end].to_string();
        s = s[name_end..].trim_start();

        let value = match s.strip_prefix('=') {
            Some(rest) => {
                let rest = rest.trim_start();
                let (value, remaining) = match rest.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let body = &rest[1..];
                        let end = body.find(q).unwrap_or(body.len());
                        (&body[..end], body.get(end + 1..).unwrap_or(""))
                    }
                    _ => {
                        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                        (&rest[..end], &rest[end..])
                    }
                };
                s = remaining;
                Some(value.to_string())
            }
            None => None,
        };
        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
    attrs
}
