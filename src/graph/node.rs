//! Node model for the simplification engine
//!
//! Nodes carry a stable string id and an attribute map. Attributes may
//! change externally but are read-only to this engine; they feed the
//! similarity grouping of the reducer.

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeMap, AttributeValue};
use super::element::{GraphElement, Position};
use super::types::{AttributeName, NodeId};

/// A graph node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Attributes associated with this node
    pub attributes: AttributeMap,

    /// Layout position, assigned by the external layout driver
    pub position: Option<Position>,
}

impl Node {
    /// Create a new node without attributes
    pub fn new(id: impl Into<NodeId>) -> Self {
        Node {
            id: id.into(),
            attributes: AttributeMap::new(),
            position: None,
        }
    }

    /// Create a new node with attributes
    pub fn with_attributes(id: impl Into<NodeId>, attributes: AttributeMap) -> Self {
        Node {
            id: id.into(),
            attributes,
            position: None,
        }
    }

    /// Builder-style attribute insertion, used heavily by tests and
    /// controllers assembling fixtures
    pub fn attr(
        mut self,
        name: impl Into<AttributeName>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &AttributeName) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Check if an attribute exists
    pub fn has_attribute(&self, name: &AttributeName) -> bool {
        self.attributes.contains_key(name)
    }

    /// Get number of attributes
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

impl GraphElement for Node {
    fn element_id(&self) -> &str {
        self.id.as_str()
    }

    fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    fn size(&self) -> usize {
        1
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
