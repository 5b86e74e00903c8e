//! Parsed, read-only representation of a bookmark export.
//!
//! [`BookmarkDocument::build`] turns raw XML text into an element tree using
//! `quick-xml`'s pull reader. The tree is never mutated after construction:
//! a refresh builds a new document and replaces the old one wholesale.

use std::collections::HashSet;
use std::fmt::Write as _;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::path::NodeQuery;
use crate::types::errors::{DocumentError, QueryError};

/// A child of an element.
///
/// Comments and processing instructions are kept so that the text on either
/// side of them stays two separate text nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// A run of character data. Text and CDATA that touch are one run.
    Text(String),
    Comment(String),
    ProcessingInstruction(String),
}

/// An XML element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Qualified tag name as written in the source, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First direct child element with the given local name.
    pub fn first_child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.local_name() == local_name)
    }

    /// Whether the element has at least one direct text child.
    pub fn has_text(&self) -> bool {
        self.children.iter().any(|node| matches!(node, Node::Text(_)))
    }

    /// Direct text children, one item per text node (`text()` in a path).
    pub fn text_nodes(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|node| match node {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Concatenation of the element's direct text children.
    pub fn text(&self) -> String {
        self.text_nodes().collect()
    }

    /// Pushes `self` and every descendant element with the given local name
    /// onto `out`, in document order.
    fn collect_named<'a>(&'a self, local_name: &str, out: &mut Vec<&'a Element>) {
        if self.local_name() == local_name {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect_named(local_name, out);
        }
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_xml(out),
                Node::Text(text) => out.push_str(&escape(text.as_str())),
                Node::Comment(comment) => {
                    let _ = write!(out, "<!--{}-->", comment);
                }
                Node::ProcessingInstruction(pi) => {
                    let _ = write!(out, "<?{}?>", pi);
                }
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// A fully materialized bookmark export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDocument {
    root: Element,
}

impl BookmarkDocument {
    /// Parses well-formed XML text into a document.
    ///
    /// # Errors
    /// Returns [`DocumentError::Parse`] for anything that is not a single
    /// well-formed root element: syntax errors, mismatched or unclosed tags,
    /// stray text outside the root, or empty input. A parse failure is never
    /// reported as an empty document.
    pub fn build(raw_xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(raw_xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(DocumentError::parse(position, "content after the root element"));
                    }
                    stack.push(open_element(&start, position)?);
                }
                Ok(Event::Empty(start)) => {
                    let element = open_element(&start, position)?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| DocumentError::parse(position, "closing tag without an opening tag"))?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .unescape()
                        .map_err(|e| DocumentError::parse(position, e.to_string()))?;
                    push_text(&mut stack, &text, position)?;
                }
                Ok(Event::CData(cdata)) => {
                    let bytes = cdata.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| DocumentError::parse(position, e.to_string()))?;
                    push_text(&mut stack, text, position)?;
                }
                Ok(Event::Comment(comment)) => {
                    let comment = String::from_utf8_lossy(&comment).into_owned();
                    push_marker(&mut stack, Node::Comment(comment));
                }
                Ok(Event::PI(pi)) => {
                    let pi = String::from_utf8_lossy(&pi).into_owned();
                    push_marker(&mut stack, Node::ProcessingInstruction(pi));
                }
                Ok(Event::Eof) => break,
                // The declaration and doctype carry nothing the engine reads.
                Ok(_) => {}
                Err(e) => {
                    return Err(DocumentError::parse(reader.buffer_position() as u64, e.to_string()));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::parse(
                reader.buffer_position() as u64,
                format!("unclosed element <{}>", open.name),
            ));
        }
        root.map(|root| Self { root })
            .ok_or_else(|| DocumentError::parse(0, "no root element"))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Evaluates a structural query and returns matching elements in
    /// document order.
    pub fn query_nodes(&self, query: &NodeQuery) -> Vec<&Element> {
        self.query_indexed(query)
            .into_iter()
            .map(|(_, element)| element)
            .collect()
    }

    /// Like [`query_nodes`](Self::query_nodes), paired with each match's
    /// zero-based index among all elements of its name (all `bookmark`s or
    /// all `label`s), counted in the same pass.
    pub fn query_indexed(&self, query: &NodeQuery) -> Vec<(usize, &Element)> {
        match query {
            NodeQuery::AllBookmarks => self.named("bookmark").into_iter().enumerate().collect(),
            NodeQuery::AllLabels => self.named("label").into_iter().enumerate().collect(),
            NodeQuery::BookmarksWithAnyLabel(literals) => {
                let wanted: HashSet<&str> = literals.iter().map(|l| l.as_str()).collect();
                self.named("bookmark")
                    .into_iter()
                    .enumerate()
                    .filter(|(_, bookmark)| carries_any_label(bookmark, &wanted))
                    .collect()
            }
        }
    }

    /// Parses `expression` with [`NodeQuery::parse`] and evaluates it.
    ///
    /// # Errors
    /// Returns [`QueryError`] when the expression is outside the supported
    /// grammar or embeds an unsupported label literal.
    pub fn query_path(&self, expression: &str) -> Result<Vec<&Element>, QueryError> {
        let query = NodeQuery::parse(expression)?;
        Ok(self.query_nodes(&query))
    }

    /// Serializes the document back to XML text with an XML declaration.
    ///
    /// Re-parsing the output yields an equal document.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        self.root.write_xml(&mut out);
        out
    }

    fn named(&self, local_name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.root.collect_named(local_name, &mut out);
        out
    }
}

/// `labels/label = any of wanted`, with labels and label as direct children.
fn carries_any_label(bookmark: &Element, wanted: &HashSet<&str>) -> bool {
    bookmark
        .child_elements()
        .filter(|el| el.local_name() == "labels")
        .flat_map(|labels| labels.child_elements())
        .filter(|el| el.local_name() == "label")
        .any(|label| wanted.contains(label.text().as_str()))
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<Element, DocumentError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocumentError::parse(position, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| DocumentError::parse(position, e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: u64,
) -> Result<(), DocumentError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(DocumentError::parse(position, "more than one root element"));
    }
    *root = Some(element);
    Ok(())
}

/// Comments and processing instructions outside the root are dropped.
fn push_marker(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> Result<(), DocumentError> {
    match stack.last_mut() {
        Some(parent) => {
            // Text directly after text or CDATA extends the same node.
            if let Some(Node::Text(prev)) = parent.children.last_mut() {
                prev.push_str(text);
            } else {
                parent.children.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(DocumentError::parse(position, "text outside the root element")),
    }
}
