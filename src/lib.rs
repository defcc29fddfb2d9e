//! Interactive graph simplification engine
//!
//! Two independent components, composed by an external graph
//! controller:
//!
//! - [`community::Community`] — a mutable aggregate that owns a subset
//!   of nodes and tracks, for every edge touching that subset, whether
//!   the edge is internal, inbound or outbound to the cluster. It
//!   exposes collapse/expand state and dissolves back into the exact
//!   nodes and edges it absorbed.
//! - [`reducer::bucket_nodes`] — a pure partitioner that reduces an
//!   arbitrarily large node set to at most K similarity-coherent
//!   buckets, so a renderer never draws more than a fixed number of
//!   visual groups.
//!
//! The engine is purely in-memory graph bookkeeping: no rendering, no
//! layout physics, no I/O. Rendering and layout collaborators consume
//! the [`graph::GraphElement`] contract and the dissolve snapshots this
//! core produces.
//!
//! # Example
//!
//! ```rust
//! use graph_simplify::community::{
//!     Community, CommunityController, ControllerCapabilities, DissolveInfo,
//!     EdgeClass, IdGenerator, SequentialIds,
//! };
//! use graph_simplify::graph::{Edge, NodeId};
//! use graph_simplify::layout::LayoutScale;
//!
//! struct Controller;
//!
//! impl CommunityController for Controller {
//!     fn capabilities(&self) -> ControllerCapabilities {
//!         ControllerCapabilities::all()
//!     }
//!     fn dissolve_community(&mut self, _info: DissolveInfo) {}
//!     fn check_node_limit(&mut self, _community: &Community) {}
//! }
//!
//! let mut controller = Controller;
//! let mut ids = SequentialIds::default();
//! let mut community = Community::new(
//!     ids.next_community_id(),
//!     &controller,
//!     [NodeId::new("a"), NodeId::new("b")],
//!     LayoutScale::default(),
//! )
//! .unwrap();
//!
//! // a -> x leaves the cluster
//! let class = community
//!     .insert_outbound_edge(Edge::new("e1", "a", "x"))
//!     .unwrap();
//! assert_eq!(class, EdgeClass::Outbound);
//!
//! // once x joins, the same edge becomes internal
//! community
//!     .insert_node(NodeId::new("x"), &mut controller)
//!     .unwrap();
//! let class = community
//!     .insert_inbound_edge(Edge::new("e1", "a", "x"))
//!     .unwrap();
//! assert_eq!(class, EdgeClass::Internal);
//! ```

#![warn(clippy::all)]

pub mod community;
pub mod graph;
pub mod layout;
pub mod reducer;

// Re-export main types for convenience
pub use community::{
    Community, CommunityController, CommunityError, CommunityResult,
    ControllerCapabilities, DissolveInfo, EdgeClass, IdGenerator, SequentialIds,
    UuidIds,
};
pub use graph::{
    AttributeMap, AttributeName, AttributeValue, CommunityId, Edge, EdgeId,
    Endpoint, GraphElement, Node, NodeId, NodeRef, Position,
};
pub use layout::{LayoutDriver, LayoutScale, PausedLayout};
pub use reducer::{bucket_nodes, ReducerError, ReducerResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
