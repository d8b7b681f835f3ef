//! Control document construction
//!
//! Every request to the receiver is a `YAMAHA_AV` root carrying a `cmd`
//! attribute and a single `Main_Zone` child:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?><YAMAHA_AV cmd="PUT"><Main_Zone>...</Main_Zone></YAMAHA_AV>
//! ```
//!
//! Documents are serialized compactly, without indentation, and always with
//! the XML declaration.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{ApiError, Result};

pub(crate) const ROOT: &str = "YAMAHA_AV";
pub(crate) const ZONE: &str = "Main_Zone";

/// Request method carried in the root `cmd` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Put,
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Put => "PUT",
            Method::Get => "GET",
        }
    }
}

/// A finished control document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    method: Method,
    root: Element,
}

impl Document {
    fn new(method: Method, zone_child: Element) -> Self {
        let mut root = Element::new(ROOT);
        root.attributes
            .insert("cmd".to_string(), method.as_str().to_string());
        root.children
            .push(XMLNode::Element(node(ZONE, vec![zone_child])));
        Self { method, root }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The `YAMAHA_AV` element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize with declaration and UTF-8 encoding, no pretty printing
    pub fn to_xml(&self) -> Result<String> {
        let config = EmitterConfig::new()
            .perform_indent(false)
            .write_document_declaration(true);

        let mut out = Vec::new();
        self.root
            .write_with_config(&mut out, config)
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        String::from_utf8(out).map_err(|e| ApiError::Encode(e.to_string()))
    }
}

fn leaf(name: &str, text: impl Into<String>) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.into()));
    element
}

fn node(name: &str, children: Vec<Element>) -> Element {
    let mut element = Element::new(name);
    element
        .children
        .extend(children.into_iter().map(XMLNode::Element));
    element
}

/// Switch the main zone on or to standby
pub fn power(on: bool) -> Document {
    let state = if on { "On" } else { "Standby" };
    Document::new(
        Method::Put,
        node("Power_Control", vec![leaf("Power", state)]),
    )
}

/// Select an input by name, e.g. `HDMI1` or `NET RADIO`
pub fn input(name: &str) -> Document {
    Document::new(Method::Put, node("Input", vec![leaf("Input_Sel", name)]))
}

/// Set the master volume in tenths of a dB (`-400` is -40.0 dB)
pub fn volume(level: i64) -> Document {
    let lvl = node(
        "Lvl",
        vec![
            leaf("Val", level.to_string()),
            leaf("Exp", "1"),
            leaf("Unit", "dB"),
        ],
    );
    Document::new(Method::Put, node("Volume", vec![lvl]))
}

pub fn mute(on: bool) -> Document {
    let state = if on { "On" } else { "Off" };
    Document::new(Method::Put, node("Volume", vec![leaf("Mute", state)]))
}

/// Ask for the whole basic status block of the main zone
pub fn state_query() -> Document {
    Document::new(Method::Get, leaf("Basic_Status", "GetParam"))
}
