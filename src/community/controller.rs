//! Controller seam between communities and the owning graph controller
//!
//! A community never owns its controller; the operations that need one
//! take it as a parameter. All cross-references stay id-based, so
//! there is no community ↔ controller ownership cycle.

use super::community::{Community, DissolveInfo};

/// Capabilities a controller reports to `Community::new`.
///
/// Mirrors the original constructor contract: a community refuses to
/// bind to a controller that cannot flatten it back
/// (`dissolve_community`) or react to growth (`check_node_limit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerCapabilities {
    pub dissolve_community: bool,
    pub check_node_limit: bool,
}

impl ControllerCapabilities {
    /// Capabilities of a fully implemented controller
    pub fn all() -> Self {
        ControllerCapabilities {
            dissolve_community: true,
            check_node_limit: true,
        }
    }

    /// Name of the first missing capability, if any
    pub(crate) fn missing(&self) -> Option<&'static str> {
        if !self.dissolve_community {
            Some("dissolve_community")
        } else if !self.check_node_limit {
            Some("check_node_limit")
        } else {
            None
        }
    }
}

/// The graph controller, as seen by a community.
///
/// Implemented externally: a real controller re-runs the reducer after
/// growth, flattens dissolved communities back into its node/edge
/// stores, and drives the edge-insertion calls that keep the
/// community's classification correct.
pub trait CommunityController {
    /// What this controller implements. Checked once, at community
    /// construction.
    fn capabilities(&self) -> ControllerCapabilities;

    /// Flatten a dissolved community back into plain nodes and edges.
    /// The snapshot carries restored original endpoints.
    fn dissolve_community(&mut self, info: DissolveInfo);

    /// Called after a member joins, so the controller can re-bucket or
    /// split a community that grew past its display limit.
    fn check_node_limit(&mut self, community: &Community);
}
