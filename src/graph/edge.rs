//! Edge model with explicit `{current, original}` endpoint pairs
//!
//! When a community absorbs a node, every edge touching it is
//! redirected at the community so the renderer draws a single link.
//! The true endpoint is kept alongside the redirected one, so removal
//! restores it exactly instead of relying on an in-place swap.

use serde::{Deserialize, Serialize};

use super::types::{CommunityId, EdgeId, NodeId, NodeRef};

/// One leg of an edge.
///
/// `current` is what the renderer sees; `original` is the node this
/// leg pointed at before any community absorbed it. `original` is
/// fixed at construction and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    current: NodeRef,
    original: NodeId,
}

impl Endpoint {
    /// Create an endpoint pointing at a plain node
    pub fn node(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Endpoint {
            current: NodeRef::Node(id.clone()),
            original: id,
        }
    }

    /// The endpoint as currently drawn
    pub fn current(&self) -> &NodeRef {
        &self.current
    }

    /// The true endpoint, invariant under redirection
    pub fn original(&self) -> &NodeId {
        &self.original
    }

    /// Whether this leg currently points at a community
    pub fn is_redirected(&self) -> bool {
        matches!(self.current, NodeRef::Community(_))
    }

    /// Point this leg at a community, keeping the original untouched
    pub fn redirect(&mut self, community: CommunityId) {
        self.current = NodeRef::Community(community);
    }

    /// Point this leg back at its original node
    pub fn restore(&mut self) {
        self.current = NodeRef::Node(self.original.clone());
    }
}

/// A directed edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source leg (edge goes FROM here)
    pub from: Endpoint,

    /// Target leg (edge goes TO here)
    pub to: Endpoint,
}

impl Edge {
    /// Create a new directed edge between two plain nodes
    pub fn new(
        id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> Self {
        Edge {
            id: id.into(),
            from: Endpoint::node(from),
            to: Endpoint::node(to),
        }
    }

    /// Check if this edge originally starts from a specific node
    pub fn starts_from(&self, node: &NodeId) -> bool {
        self.from.original() == node
    }

    /// Check if this edge originally ends at a specific node
    pub fn ends_at(&self, node: &NodeId) -> bool {
        self.to.original() == node
    }

    /// Check if this edge originally touches a specific node at all
    pub fn touches(&self, node: &NodeId) -> bool {
        self.starts_from(node) || self.ends_at(node)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new("e1", "a", "b");
        assert_eq!(edge.id, EdgeId::new("e1"));
        assert_eq!(edge.from.current(), &NodeRef::Node(NodeId::new("a")));
        assert_eq!(edge.to.current(), &NodeRef::Node(NodeId::new("b")));
        assert!(!edge.from.is_redirected());
    }

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new("e2", "x", "y");
        assert!(edge.starts_from(&NodeId::new("x")));
        assert!(edge.ends_at(&NodeId::new("y")));
        assert!(!edge.starts_from(&NodeId::new("y")));
        assert!(edge.touches(&NodeId::new("x")));
        assert!(!edge.touches(&NodeId::new("z")));
    }

    #[test]
    fn test_redirect_and_restore() {
        let mut edge = Edge::new("e3", "a", "b");
        let community = CommunityId::new("community_0");

        edge.to.redirect(community.clone());
        assert!(edge.to.is_redirected());
        assert_eq!(edge.to.current().as_community(), Some(&community));
        // The true endpoint survives redirection
        assert_eq!(edge.to.original(), &NodeId::new("b"));
        // Direction predicates keep answering for the original endpoints
        assert!(edge.ends_at(&NodeId::new("b")));

        edge.to.restore();
        assert_eq!(edge.to.current(), &NodeRef::Node(NodeId::new("b")));
        assert!(!edge.to.is_redirected());
    }

    #[test]
    fn test_double_redirect_keeps_original() {
        let mut edge = Edge::new("e4", "a", "b");
        edge.from.redirect(CommunityId::new("c1"));
        edge.from.redirect(CommunityId::new("c2"));
        assert_eq!(edge.from.original(), &NodeId::new("a"));

        edge.from.restore();
        assert_eq!(edge.from.current(), &NodeRef::Node(NodeId::new("a")));
    }

    #[test]
    fn test_edge_equality_by_id() {
        let edge1 = Edge::new("e5", "a", "b");
        let mut edge2 = Edge::new("e5", "a", "b");
        edge2.to.redirect(CommunityId::new("c"));

        assert_eq!(edge1, edge2); // Same id
        assert_ne!(edge1, Edge::new("e6", "a", "b"));
    }
}
