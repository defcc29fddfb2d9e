//! Renderer-facing capability shared by nodes and communities

use serde::{Deserialize, Serialize};

/// Layout position of a drawable element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }
}

/// Capability consumed by rendering and layout collaborators.
///
/// Both plain nodes and communities are drawable: a node occupies one
/// visual slot, a community as many as it has members.
pub trait GraphElement {
    /// Stable identifier of this element
    fn element_id(&self) -> &str;

    /// Current layout position, if one has been assigned
    fn position(&self) -> Option<&Position>;

    /// Number of original nodes this element stands in for
    fn size(&self) -> usize;
}
