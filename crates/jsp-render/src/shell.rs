//! Page shell: document, head and body wrapper.

use crate::html::{escape_attr, escape_text, render_nodes, Node};

/// Head content for the shell.
#[derive(Debug, Clone, Default)]
pub struct HeadContent {
    /// Page title.
    pub title: Option<String>,
    /// Meta tags.
    pub meta: Vec<(String, String)>,
    /// Stylesheet hrefs.
    pub stylesheets: Vec<String>,
}

impl HeadContent {
    /// Create new head content with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Add a meta tag.
    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.push((name.to_string(), content.to_string()));
        self
    }

    /// Add a stylesheet link.
    pub fn with_stylesheet(mut self, href: &str) -> Self {
        self.stylesheets.push(href.to_string());
        self
    }

    /// Render head content to HTML.
    pub fn render(&self) -> String {
        let mut html = String::from("<meta charset=\"utf-8\">\n");

        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{}</title>\n", escape_text(title)));
        }

        for (name, content) in &self.meta {
            html.push_str(&format!(
                r#"<meta name="{}" content="{}">"#,
                escape_attr(name),
                escape_attr(content)
            ));
            html.push('\n');
        }

        for href in &self.stylesheets {
            html.push_str(&format!(
                r#"<link rel="stylesheet" href="{}">"#,
                escape_attr(href)
            ));
            html.push('\n');
        }

        html
    }
}

/// Shell wrapping page content in a full document.
#[derive(Debug, Clone)]
pub struct Shell {
    /// Include doctype declaration.
    pub doctype: bool,
    /// Document language.
    pub lang: String,
    /// Head content.
    pub head: HeadContent,
}

impl Shell {
    /// Create a new shell with basic structure.
    pub fn new(head: HeadContent) -> Self {
        Self {
            doctype: true,
            lang: "en".to_string(),
            head,
        }
    }

    /// Set the document language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Render the opening part of the shell (up to the body content).
    pub fn render_opening(&self) -> String {
        let mut html = String::new();

        if self.doctype {
            html.push_str("<!DOCTYPE html>\n");
        }

        html.push_str(&format!("<html lang=\"{}\">\n<head>\n", escape_attr(&self.lang)));
        html.push_str(&self.head.render());
        html.push_str("</head>\n<body>\n");

        html
    }

    /// Render the closing part of the shell (after the body content).
    pub fn render_closing(&self) -> String {
        "\n</body>\n</html>\n".to_string()
    }

    /// Render a full document around `body`.
    pub fn render(&self, body: &[Node]) -> String {
        let mut html = self.render_opening();
        html.push_str(&render_nodes(body));
        html.push_str(&self.render_closing());
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::Element;

    #[test]
    fn test_head_escapes_title() {
        let head = HeadContent::new("Cables & <Adapters> - JSP Store")
            .with_meta("description", "PC \"parts\"")
            .with_stylesheet("/styles/main.css");
        let html = head.render();
        assert!(html.contains("<title>Cables &amp; &lt;Adapters&gt; - JSP Store</title>"));
        assert!(html.contains(r#"content="PC &quot;parts&quot;""#));
        assert!(html.contains(r#"<link rel="stylesheet" href="/styles/main.css">"#));
    }

    #[test]
    fn test_shell_wraps_body() {
        let shell = Shell::new(HeadContent::new("Cart - JSP Store")).with_lang("id");
        let html = shell.render(&[Element::new("main").text("hi").into()]);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"id\">"));
        assert!(html.contains("<body>\n<main>hi</main>\n</body>"));
        assert!(html.ends_with("</html>\n"));
    }
}
