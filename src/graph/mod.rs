//! Shared graph data model
//!
//! This module implements the in-memory model the simplification
//! engine operates on:
//! - Nodes with string ids and attribute maps
//! - Directed edges whose endpoints carry an explicit
//!   `{current, original}` pair so community redirection is reversible
//! - The `GraphElement` capability consumed by rendering collaborators

pub mod attribute;
pub mod edge;
pub mod element;
pub mod node;
pub mod types;

// Re-export main types
pub use attribute::{AttributeMap, AttributeValue};
pub use edge::{Edge, Endpoint};
pub use element::{GraphElement, Position};
pub use node::Node;
pub use types::{AttributeName, CommunityId, EdgeId, NodeId, NodeRef};
