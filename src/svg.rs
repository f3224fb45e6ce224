//! Vector Scene Builder - Declarative SVG Assembly
//!
//! Shapes are accumulated as an element tree and serialized once, instead of
//! concatenating markup strings inside the composition logic. Serialization
//! is deterministic: attributes render in insertion order.

use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Identifier namespace for gradient and filter definitions.
///
/// Definition ids are suffixed with the request seed so that several
/// generated images embedded in one host document never alias each other's
/// `<defs>` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace(pub u64);

impl Namespace {
    /// Namespaced element id, e.g. `bgGrad42`.
    pub fn id(&self, base: &str) -> String {
        format!("{base}{}", self.0)
    }

    /// `url(#...)` reference to a namespaced definition.
    pub fn url(&self, base: &str) -> String {
        format!("url(#{base}{})", self.0)
    }
}

/// One SVG element: tag, attributes, children, optional text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Element>,
    content: Option<String>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
            content: None,
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl std::fmt::Display) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn write(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (key, value) in &self.attributes {
            let _ = write!(out, r#" {key}="{}""#, escape(value));
        }
        if self.children.is_empty() && self.content.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(content) = &self.content {
            out.push_str(&escape(content));
        }
        for child in &self.children {
            child.write(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Complete scene: canvas size, `<defs>` entries, and drawing layers in
/// back-to-front order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    width: u32,
    height: u32,
    defs: Vec<Element>,
    layers: Vec<Element>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            defs: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Register a gradient or filter definition.
    pub fn define(&mut self, definition: Element) {
        self.defs.push(definition);
    }

    /// Append a drawing layer. Later layers render atop earlier ones.
    pub fn push(&mut self, layer: Element) {
        self.layers.push(layer);
    }

    /// Serialize the scene to SVG markup.
    pub fn to_markup(&self) -> String {
        let root = Element::new("svg")
            .attr("width", self.width)
            .attr("height", self.height)
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .child(Element::new("defs").children(self.defs.iter().cloned()))
            .children(self.layers.iter().cloned());

        let mut out = String::new();
        root.write(&mut out);
        out
    }

    /// Serialize and wrap as an inline `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/svg+xml;base64,{}",
            STANDARD.encode(self.to_markup().as_bytes())
        )
    }
}

/// Escape text for use in XML attribute values and content.
///
/// Species names come straight from the caller and end up in both.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_element_self_closes() {
        let mut out = String::new();
        Element::new("rect").attr("width", 512).write(&mut out);
        assert_eq!(out, r#"<rect width="512"/>"#);
    }

    #[test]
    fn children_and_content_render_in_order() {
        let mut out = String::new();
        Element::new("g")
            .attr("opacity", 0.5)
            .child(Element::new("circle").attr("r", 4))
            .child(Element::new("text").text("Seed: 42"))
            .write(&mut out);
        assert_eq!(
            out,
            r#"<g opacity="0.5"><circle r="4"/><text>Seed: 42</text></g>"#
        );
    }

    #[test]
    fn attribute_values_and_content_are_escaped() {
        let mut out = String::new();
        Element::new("text")
            .attr("data-name", r#"a"<b>"#)
            .text("Tom & Jerry")
            .write(&mut out);
        assert_eq!(
            out,
            r#"<text data-name="a&quot;&lt;b&gt;">Tom &amp; Jerry</text>"#
        );
    }

    #[test]
    fn namespace_suffixes_ids_with_seed() {
        let ns = Namespace(42);
        assert_eq!(ns.id("bgGrad"), "bgGrad42");
        assert_eq!(ns.url("softGlow"), "url(#softGlow42)");
    }

    #[test]
    fn document_wraps_defs_and_layers() {
        let mut doc = Document::new(512, 512);
        doc.define(Element::new("radialGradient").attr("id", "bgGrad1"));
        doc.push(Element::new("rect").attr("fill", "url(#bgGrad1)"));
        let markup = doc.to_markup();
        assert!(markup.starts_with(r#"<svg width="512" height="512""#));
        assert!(markup.contains(r#"<defs><radialGradient id="bgGrad1"/></defs>"#));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn data_url_round_trips() {
        let doc = Document::new(16, 16);
        let url = doc.to_data_url();
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), doc.to_markup());
    }

    #[test]
    fn fractional_coordinates_render_compactly() {
        let mut out = String::new();
        Element::new("ellipse")
            .attr("cx", 512.0 * 0.3)
            .attr("cy", 256.0)
            .write(&mut out);
        assert_eq!(out, r#"<ellipse cx="153.6" cy="256"/>"#);
    }
}
