//! HTML node tree.
//!
//! Pages are built as [`Node`] trees and rendered to a string once. Text and
//! attribute values are escaped on render; [`Node::Raw`] is emitted verbatim.

use std::fmt::Write;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// A node in an HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on render.
    Text(String),
    /// Trusted markup, emitted as is.
    Raw(String),
}

impl Node {
    /// Create a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// Create a raw markup node.
    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Render to an HTML string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Append the rendered HTML to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.render_into(out),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Raw(html) => out.push_str(html),
        }
    }

    /// Concatenated text of this node and its descendants. Raw markup is
    /// not included.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => el.children.iter().for_each(|c| collect_text(c, out)),
        Node::Text(text) => out.push_str(text),
        Node::Raw(_) => {}
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Render a list of sibling nodes.
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.render_into(&mut out);
    }
    out
}

/// An element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder-style [`Element::set_attr`].
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a valueless attribute such as `open` or `checked` when `on`.
    pub fn flag(mut self, name: impl Into<String>, on: bool) -> Self {
        let name = name.into();
        if on {
            self.set_attr(name, "");
        } else {
            self.remove_attr(&name);
        }
        self
    }

    /// Builder-style [`Element::add_class`].
    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Append a child.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several children.
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Value of an attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    /// Classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class unless already present.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
    }

    /// Concatenated text of descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.children.iter().for_each(|c| collect_text(c, &mut out));
        out
    }

    /// Render to an HTML string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.render_into(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Visit every element in document order.
pub fn walk<'a>(nodes: &'a [Node], visit: &mut impl FnMut(&'a Element)) {
    for node in nodes {
        if let Node::Element(el) = node {
            visit(el);
            walk(&el.children, visit);
        }
    }
}

/// Visit every element mutably in document order.
pub fn walk_mut(nodes: &mut [Node], visit: &mut impl FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(el) = node {
            visit(el);
            walk_mut(&mut el.children, visit);
        }
    }
}

/// Replace elements in document order.
///
/// `replace` is called for each element; when it returns a node, the element
/// is swapped for it and the replacement is not visited. Otherwise the
/// element's children are visited. Returns the number of replacements.
pub fn replace_elements(
    nodes: &mut [Node],
    replace: &mut impl FnMut(&Element) -> Option<Node>,
) -> usize {
    let mut replaced = 0;
    for node in nodes.iter_mut() {
        let Node::Element(el) = node else { continue };
        match replace(el) {
            Some(new_node) => {
                *node = new_node;
                replaced += 1;
            }
            None => replaced += replace_elements(&mut el.children, replace),
        }
    }
    replaced
}

/// First element matching `pred`, in document order.
pub fn find<'a>(nodes: &'a [Node], pred: impl Fn(&Element) -> bool) -> Option<&'a Element> {
    find_all(nodes, pred).into_iter().next()
}

/// Every element matching `pred`, in document order.
pub fn find_all<'a>(nodes: &'a [Node], pred: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    let mut found = Vec::new();
    walk(nodes, &mut |el| {
        if pred(el) {
            found.push(el);
        }
    });
    found
}

/// First element carrying `class`.
pub fn find_by_class<'a>(nodes: &'a [Node], class: &str) -> Option<&'a Element> {
    find(nodes, |el| el.has_class(class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_escapes() {
        let el = Element::new("a")
            .attr("href", "/product.html?name=A&B")
            .attr("title", "say \"hi\"")
            .text("<b>bold</b> & co");
        assert_eq!(
            el.render(),
            r#"<a href="/product.html?name=A&amp;B" title="say &quot;hi&quot;">&lt;b&gt;bold&lt;/b&gt; &amp; co</a>"#
        );
    }

    #[test]
    fn test_void_and_flag_attributes() {
        let el = Element::new("input")
            .attr("type", "checkbox")
            .flag("checked", true)
            .flag("disabled", false);
        assert_eq!(el.render(), r#"<input type="checkbox" checked>"#);
    }

    #[test]
    fn test_raw_is_not_escaped() {
        let el = Element::new("span").child(Node::raw("<svg></svg>"));
        assert_eq!(el.render(), "<span><svg></svg></span>");
    }

    #[test]
    fn test_classes() {
        let mut el = Element::new("div").class("card");
        el.add_class("product-card");
        el.add_class("card");
        assert_eq!(el.get_attr("class"), Some("card product-card"));
        assert!(el.has_class("product-card"));
        assert!(!el.has_class("product"));
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = Element::new("a").attr("href", "/").attr("id", "x");
        el.set_attr("href", "/cart.html");
        assert_eq!(el.attrs[0], ("href".to_string(), "/cart.html".to_string()));
        assert_eq!(el.attrs.len(), 2);
    }

    #[test]
    fn test_text_content_skips_raw() {
        let node: Node = Element::new("p")
            .text("Hello ")
            .child(Element::new("b").text("world"))
            .child(Node::raw("<i>x</i>"))
            .into();
        assert_eq!(node.text_content(), "Hello world");
    }

    #[test]
    fn test_find_in_document_order() {
        let doc = vec![Node::from(
            Element::new("div")
                .child(Element::new("span").class("a").text("first"))
                .child(Element::new("p").child(Element::new("span").class("a").text("second"))),
        )];
        let found = find_all(&doc, |el| el.has_class("a"));
        assert_eq!(found.len(), 2);
        assert_eq!(find_by_class(&doc, "a").unwrap().text_content(), "first");
        assert!(find_by_class(&doc, "missing").is_none());
    }

    #[test]
    fn test_replace_elements() {
        let mut doc = vec![Node::from(
            Element::new("div")
                .child(Element::new("slot").attr("name", "one"))
                .child(Element::new("section").child(Element::new("slot").attr("name", "two"))),
        )];
        let count = replace_elements(&mut doc, &mut |el| {
            (el.tag == "slot").then(|| Node::text(el.get_attr("name").unwrap_or_default()))
        });
        assert_eq!(count, 2);
        assert_eq!(
            render_nodes(&doc),
            "<div>one<section>two</section></div>"
        );
    }
}
