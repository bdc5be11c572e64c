//! Event-driven XMI reader.
//!
//! Builds the [`Document`] tree from `quick-xml` events with an explicit stack
//! of open frames. Element and attribute names are matched by local name, so
//! `xmi:id` and `id` are both accepted, with the `xmi:` form preferred when a
//! tag carries both. Elements outside the recognized shape are skipped
//! together with their whole subtree.

use log::trace;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    charset,
    document::{Attribute, Document, Generalization, Literal, ModelNode, PackageElement},
    error::{ParseError, Result},
};

/// Decode and read an XMI document into its element tree.
///
/// # Errors
///
/// Returns [`ParseError::UnknownCharset`] for an unsupported declared charset,
/// [`ParseError::Xml`] for malformed XML, [`ParseError::UnexpectedRoot`] if the
/// root element is not `XMI`, and [`ParseError::UnexpectedEof`] for an empty or
/// truncated document.
pub fn read_document(bytes: &[u8]) -> Result<Document> {
    let text = charset::decode(bytes)?;

    let mut reader = Reader::from_str(&text);
    reader.config_mut().trim_text(true);

    let mut builder = TreeBuilder::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|err| ParseError::xml(reader.error_position() as u64, err.to_string()))?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(ref e) => builder.open(e, position)?,
            Event::Empty(ref e) => {
                // Self-closing element - handle as start + end
                builder.open(e, position)?;
                builder.close();
            }
            Event::End(_) => builder.close(),
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

/// An element currently open in the reader.
#[derive(Debug)]
enum Frame {
    Root,
    Model(ModelNode),
    Element(PackageElement),
    Attribute(Attribute),
    /// An element, and its subtree, that does not contribute to the tree.
    Skip,
}

#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    document: Document,
    root_seen: bool,
}

impl TreeBuilder {
    fn open(&mut self, e: &BytesStart<'_>, position: u64) -> Result<()> {
        let local = local_name(e, position)?;
        let attrs = Attrs::parse(e, position)?;

        let frame = match self.stack.last_mut() {
            None if self.root_seen => Frame::Skip,
            None => {
                if local != "XMI" {
                    return Err(ParseError::UnexpectedRoot(local));
                }
                self.root_seen = true;
                Frame::Root
            }
            Some(Frame::Root) if local == "Model" => Frame::Model(ModelNode {
                kind: attrs.xmi("type").unwrap_or_default().to_string(),
                name: attrs.plain("name").unwrap_or_default().to_string(),
                packages: Vec::new(),
            }),
            Some(Frame::Model(_)) if local == "packagedElement" => {
                Frame::Element(package_element(&attrs))
            }
            Some(Frame::Element(parent)) => match local.as_str() {
                "packagedElement" => Frame::Element(package_element(&attrs)),
                "ownedAttribute" => Frame::Attribute(attribute(&attrs)),
                "generalization" => {
                    parent.generalizations.push(Generalization {
                        kind: attrs.xmi("type").unwrap_or_default().to_string(),
                        general: attrs.plain("general").unwrap_or_default().to_string(),
                    });
                    Frame::Skip
                }
                "ownedLiteral" => {
                    parent.literals.push(Literal {
                        id: attrs.xmi("id").unwrap_or_default().to_string(),
                        name: attrs.plain("name").unwrap_or_default().to_string(),
                    });
                    Frame::Skip
                }
                _ => Frame::Skip,
            },
            Some(Frame::Attribute(attribute)) => {
                match local.as_str() {
                    "type" => {
                        if let Some(idref) = attrs.xmi("idref") {
                            attribute.type_ref = idref.to_string();
                        }
                    }
                    "lowerValue" => {
                        attribute.lower = attrs.plain("value").unwrap_or_default().to_string();
                    }
                    "upperValue" => {
                        attribute.upper = attrs.plain("value").unwrap_or_default().to_string();
                    }
                    _ => {}
                }
                Frame::Skip
            }
            Some(_) => Frame::Skip,
        };

        trace!(element = local, depth = self.stack.len(); "Opened element");
        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match (frame, self.stack.last_mut()) {
            (Frame::Model(model), Some(Frame::Root)) => self.document.models.push(model),
            (Frame::Element(element), Some(Frame::Model(model))) => model.packages.push(element),
            (Frame::Element(element), Some(Frame::Element(parent))) => {
                parent.elements.push(element)
            }
            (Frame::Attribute(attribute), Some(Frame::Element(parent))) => {
                parent.attributes.push(attribute)
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<Document> {
        if !self.root_seen || !self.stack.is_empty() {
            return Err(ParseError::UnexpectedEof);
        }
        Ok(self.document)
    }
}

fn package_element(attrs: &Attrs) -> PackageElement {
    PackageElement {
        id: attrs.xmi("id").unwrap_or_default().to_string(),
        name: attrs.plain("name").unwrap_or_default().to_string(),
        kind: attrs.xmi("type").unwrap_or_default().to_string(),
        is_abstract: attrs.plain("isAbstract").is_some_and(parse_bool),
        ..PackageElement::default()
    }
}

fn attribute(attrs: &Attrs) -> Attribute {
    // UML-style exports reference the type through a plain `type` attribute next
    // to `xmi:type`; a nested `<type xmi:idref=".."/>` overrides it.
    let type_ref = if attrs.prefixed("xmi", "type").is_some() {
        attrs.plain("type").unwrap_or_default()
    } else {
        ""
    };

    Attribute {
        name: attrs.plain("name").unwrap_or_default().to_string(),
        kind: attrs.xmi("type").unwrap_or_default().to_string(),
        type_ref: type_ref.to_string(),
        lower: String::new(),
        upper: String::new(),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "true" | "True" | "TRUE" | "t" | "T" | "1")
}

fn local_name(e: &BytesStart<'_>, position: u64) -> Result<String> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|err| ParseError::xml(position, format!("Invalid tag name: {err}")))
}

/// Attributes of one element as `(prefix, local name, value)` triples.
#[derive(Debug, Default)]
struct Attrs(Vec<(String, String, String)>);

impl Attrs {
    fn parse(e: &BytesStart<'_>, position: u64) -> Result<Self> {
        let mut attrs = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| ParseError::xml(position, format!("Attribute error: {err}")))?;
            let prefix = attr
                .key
                .prefix()
                .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
                .unwrap_or_default();
            let local = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| ParseError::xml(position, format!("Attribute value error: {err}")))?
                .into_owned();
            attrs.push((prefix, local, value));
        }
        Ok(Self(attrs))
    }

    fn prefixed(&self, prefix: &str, local: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, l, _)| p == prefix && l == local)
            .map(|(_, _, value)| value.as_str())
    }

    fn plain(&self, local: &str) -> Option<&str> {
        self.prefixed("", local)
    }

    /// Looks up `xmi:<local>`, falling back to the unprefixed attribute.
    fn xmi(&self, local: &str) -> Option<&str> {
        self.prefixed("xmi", local).or_else(|| self.plain(local))
    }
}
