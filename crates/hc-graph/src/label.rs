//! Node labels.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Bus,
    Source,
    Sink,
    Converter,
    Storage,
}

/// Identifying tuple attached to every node.
///
/// Analyzers classify nodes by `tags`, never by name patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Label {
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            belongs_to: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn bus(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Bus)
    }

    pub fn source(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Source)
    }

    pub fn sink(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Sink)
    }

    pub fn converter(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Converter)
    }

    pub fn storage(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Storage)
    }

    pub fn belongs_to(mut self, owner: impl Into<String>) -> Self {
        self.belongs_to = Some(owner.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
