//! Community aggregation: the stateful half of the engine
//!
//! A community stands in for a cluster of collapsed nodes. It keeps
//! every touching edge classified as internal, inbound or outbound
//! under mutation, and can dissolve back into the exact nodes and
//! edges it absorbed.

pub mod community;
pub mod controller;
pub mod ids;

// Re-export main types
pub use community::{
    Community, CommunityError, CommunityResult, DissolveInfo, EdgeClass,
};
pub use controller::{CommunityController, ControllerCapabilities};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
