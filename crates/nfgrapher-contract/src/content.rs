//! Content-type metadata for node ports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of signal carried by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Audio,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Audio => "audio",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named port and the content it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    pub name: &'static str,
    pub content: ContentType,
}

impl Port {
    pub const fn audio(name: &'static str) -> Self {
        Self {
            name,
            content: ContentType::Audio,
        }
    }
}

/// Static port declarations of a node kind, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMap(&'static [Port]);

impl PortMap {
    pub const EMPTY: PortMap = PortMap(&[]);

    pub const fn new(ports: &'static [Port]) -> Self {
        Self(ports)
    }

    pub fn get(&self, name: &str) -> Option<ContentType> {
        self.0
            .iter()
            .find(|port| port.name == name)
            .map(|port| port.content)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Port> {
        self.0.iter()
    }
}
