//! Element-tree view of the registry document.
//!
//! The resolution engine only needs a generic tree of elements, each with a
//! tag name, an ordered attribute bag, and ordered children that are either
//! text or nested elements. This module builds that tree from XML with
//! `quick-xml` and keeps the rest of the crate independent of the parser.
//!
//! Text is kept exactly as written (no trimming): declaration fragments in
//! the registry are whitespace-sensitive and are reconstructed in document
//! order by the loader.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{Error, Result};

/// A parsed registry document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

/// One element: tag name, ordered attributes, ordered children.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A child of an element: nested element or raw text.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Document {
    /// Parse a document from XML text.
    pub fn parse(xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event().map_err(parse_error)? {
                Event::Start(start) => {
                    stack.push(element_from(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| Error::Parse {
                        message: "unbalanced closing tag".to_string(),
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = text.unescape().map_err(parse_error)?;
                        parent.children.push(Node::Text(value.into_owned()));
                    }
                }
                Event::CData(cdata) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                        parent.children.push(Node::Text(value));
                    }
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        root.ok_or_else(|| Error::Parse {
            message: "document has no root element".to_string(),
        })
        .map(|root| Document { root })
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn parse_error(e: impl std::fmt::Display) -> Error {
    Error::Parse {
        message: e.to_string(),
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(parse_error)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(parse_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(Error::Parse {
                message: "document has more than one root element".to_string(),
            });
        }
    }
    Ok(())
}

impl Element {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |child| child.name == name)
    }

    /// First direct child element with the given tag name.
    pub fn first_child_named<'a>(&'a self, name: &'a str) -> Option<&'a Element> {
        self.children_named(name).next()
    }

    /// Concatenated direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = Document::parse(r#"<registry><type name="GLenum" api="gles2"/></registry>"#)
            .unwrap();
        let root = doc.root();
        assert_eq!(root.name, "registry");

        let ty = root.first_child_named("type").unwrap();
        assert_eq!(ty.attribute("name"), Some("GLenum"));
        assert_eq!(ty.attribute("api"), Some("gles2"));
        assert_eq!(ty.attribute("missing"), None);
    }

    #[test]
    fn preserves_text_and_child_order() {
        let doc =
            Document::parse("<type>typedef unsigned int <name>GLenum</name>;</type>").unwrap();
        let root = doc.root();

        assert_eq!(root.children.len(), 3);
        match &root.children[0] {
            Node::Text(text) => assert_eq!(text, "typedef unsigned int "),
            other => panic!("expected text, got {other:?}"),
        }
        match &root.children[1] {
            Node::Element(element) => {
                assert_eq!(element.name, "name");
                assert_eq!(element.text(), "GLenum");
            }
            other => panic!("expected element, got {other:?}"),
        }
        match &root.children[2] {
            Node::Text(text) => assert_eq!(text, ";"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn children_named_filters_by_tag() {
        let doc = Document::parse(
            "<registry><enums/><feature n=\"1\"/><enums/><feature n=\"2\"/></registry>",
        )
        .unwrap();
        let features: Vec<_> = doc.root().children_named("feature").collect();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].attribute("n"), Some("1"));
        assert_eq!(features[1].attribute("n"), Some("2"));
    }

    #[test]
    fn unescapes_entities() {
        let doc = Document::parse("<a k=\"&lt;x&gt;\">&amp;</a>").unwrap();
        assert_eq!(doc.root().attribute("k"), Some("<x>"));
        assert_eq!(doc.root().text(), "&");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Document::parse("<a><b></a>").is_err());
        assert!(Document::parse("   ").is_err());
    }
}
