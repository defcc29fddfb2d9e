//! Community aggregate: a cluster of collapsed nodes with live edge
//! classification
//!
//! A community owns a member set and tracks every edge touching it in
//! a single store, each entry carrying one classification tag
//! (internal / inbound / outbound). Reclassification flips the tag
//! atomically, so an edge is never in two classes and never in none.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::controller::CommunityController;
use crate::graph::{CommunityId, Edge, EdgeId, GraphElement, NodeId, Position};
use crate::layout::LayoutScale;

/// Errors raised by community operations
///
/// All of these are contract violations by the controller, not
/// transient conditions; they propagate immediately.
#[derive(Error, Debug, PartialEq)]
pub enum CommunityError {
    #[error("controller is missing required capability `{0}`")]
    InvalidController(&'static str),

    #[error("operation on dissolved community {0}")]
    UseAfterDissolve(CommunityId),

    #[error("edge {0} is not tracked by this community")]
    UnknownEdge(EdgeId),

    #[error("node {0} is not a member of this community")]
    UnknownMember(NodeId),

    #[error("node {0} still has tracked edges; remove them first")]
    MemberStillConnected(NodeId),
}

pub type CommunityResult<T> = Result<T, CommunityError>;

/// Classification of a tracked edge relative to the member set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeClass {
    /// Both endpoints are members
    Internal,
    /// Only the `to` endpoint is a member
    Inbound,
    /// Only the `from` endpoint is a member
    Outbound,
}

/// A tracked edge plus its current classification tag
#[derive(Debug, Clone)]
struct TrackedEdge {
    edge: Edge,
    class: EdgeClass,
}

/// Read-only snapshot handed to the controller on dissolve.
///
/// Edge copies carry restored original endpoints, so the controller
/// can splice them back into its stores without undoing redirection
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DissolveInfo {
    pub community: CommunityId,
    pub members: Vec<NodeId>,
    pub internal_edges: Vec<Edge>,
    pub inbound_edges: Vec<Edge>,
    pub outbound_edges: Vec<Edge>,
}

/// A mutable aggregate standing in for a cluster of collapsed nodes
#[derive(Debug)]
pub struct Community {
    id: CommunityId,

    /// Member node ids
    members: FxHashSet<NodeId>,

    /// Single edge store; iteration order is insertion order
    edges: IndexMap<EdgeId, TrackedEdge>,

    /// Edges whose outbound leg originates at a given member (their
    /// true original `from`), covering Outbound and Internal entries.
    /// Kept solely for O(1) bulk removal when that member leaves.
    outbound_index: FxHashMap<NodeId, FxHashSet<EdgeId>>,

    internal_count: usize,
    inbound_count: usize,
    outbound_count: usize,

    /// Always equals `members.len()`
    size: usize,

    expanded: bool,
    dissolved: bool,

    position: Option<Position>,
    layout: LayoutScale,
}

impl Community {
    /// Create a community seeded with zero or more members.
    ///
    /// Fails with [`CommunityError::InvalidController`] if the
    /// controller does not report both required capabilities.
    pub fn new<C>(
        id: CommunityId,
        controller: &C,
        initial_nodes: impl IntoIterator<Item = NodeId>,
        layout: LayoutScale,
    ) -> CommunityResult<Self>
    where
        C: CommunityController + ?Sized,
    {
        if let Some(capability) = controller.capabilities().missing() {
            return Err(CommunityError::InvalidController(capability));
        }

        let members: FxHashSet<NodeId> = initial_nodes.into_iter().collect();
        let size = members.len();
        debug!(community = %id, size, "created community");

        Ok(Community {
            id,
            members,
            edges: IndexMap::new(),
            outbound_index: FxHashMap::default(),
            internal_count: 0,
            inbound_count: 0,
            outbound_count: 0,
            size,
            expanded: false,
            dissolved: false,
            position: None,
            layout,
        })
    }

    fn ensure_live(&self) -> CommunityResult<()> {
        if self.dissolved {
            Err(CommunityError::UseAfterDissolve(self.id.clone()))
        } else {
            Ok(())
        }
    }

    pub fn id(&self) -> &CommunityId {
        &self.id
    }

    /// Number of members; equals the size used for layout scaling
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.members.contains(node)
    }

    /// Iterate member ids (unordered)
    pub fn members(&self) -> impl Iterator<Item = &NodeId> {
        self.members.iter()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_dissolved(&self) -> bool {
        self.dissolved
    }

    pub fn internal_count(&self) -> usize {
        self.internal_count
    }

    pub fn inbound_count(&self) -> usize {
        self.inbound_count
    }

    pub fn outbound_count(&self) -> usize {
        self.outbound_count
    }

    /// Current classification of an edge, if tracked
    pub fn edge_class(&self, id: &EdgeId) -> Option<EdgeClass> {
        self.edges.get(id).map(|tracked| tracked.class)
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    /// Link distance for members of this community when expanded
    pub fn layout_distance(&self) -> f64 {
        self.layout.distance * (self.size as f64).sqrt()
    }

    /// Member charge for this community when expanded
    pub fn layout_charge(&self) -> f64 {
        self.layout.charge * (self.size as f64).sqrt()
    }

    /// Add a member.
    ///
    /// Does not reclassify edges; the controller follows up with the
    /// edge-insertion operations for every edge now touching the
    /// community, then gets a `check_node_limit` callback to react to
    /// the growth.
    pub fn insert_node(
        &mut self,
        node: NodeId,
        controller: &mut dyn CommunityController,
    ) -> CommunityResult<()> {
        self.ensure_live()?;
        if self.members.insert(node.clone()) {
            self.size += 1;
            debug!(community = %self.id, node = %node, size = self.size, "node joined community");
        }
        controller.check_node_limit(self);
        Ok(())
    }

    /// Remove a member.
    ///
    /// The caller must strip the member's edges first (see
    /// [`Community::remove_outbound_edges_from_node`] and the inbound
    /// removal operation); a still-connected member is a contract
    /// violation.
    pub fn remove_node(&mut self, node: &NodeId) -> CommunityResult<()> {
        self.ensure_live()?;
        if !self.members.contains(node) {
            return Err(CommunityError::UnknownMember(node.clone()));
        }

        let has_outbound = self
            .outbound_index
            .get(node)
            .is_some_and(|ids| !ids.is_empty());
        let has_inbound = self.edges.values().any(|tracked| {
            tracked.edge.ends_at(node)
                && matches!(tracked.class, EdgeClass::Inbound | EdgeClass::Internal)
        });
        if has_outbound || has_inbound {
            return Err(CommunityError::MemberStillConnected(node.clone()));
        }

        self.members.remove(node);
        self.outbound_index.remove(node);
        self.size -= 1;
        debug!(community = %self.id, node = %node, size = self.size, "node left community");
        Ok(())
    }

    /// Record that this edge's `to` endpoint is now a member.
    ///
    /// If the edge is already tracked as outbound (its source became a
    /// member earlier), it is promoted to internal. Either way the
    /// `to` leg is redirected at this community, with its original
    /// preserved.
    pub fn insert_inbound_edge(&mut self, mut edge: Edge) -> CommunityResult<EdgeClass> {
        self.ensure_live()?;
        let id = edge.id.clone();

        if let Some(tracked) = self.edges.get_mut(&id) {
            match tracked.class {
                EdgeClass::Outbound => {
                    tracked.edge.to.redirect(self.id.clone());
                    tracked.class = EdgeClass::Internal;
                    self.outbound_count -= 1;
                    self.internal_count += 1;
                    debug!(community = %self.id, edge = %id, "outbound edge became internal");
                    Ok(EdgeClass::Internal)
                }
                // Inbound leg already recorded
                class => Ok(class),
            }
        } else {
            edge.to.redirect(self.id.clone());
            self.edges.insert(
                id.clone(),
                TrackedEdge {
                    edge,
                    class: EdgeClass::Inbound,
                },
            );
            self.inbound_count += 1;
            debug!(community = %self.id, edge = %id, "edge classified inbound");
            Ok(EdgeClass::Inbound)
        }
    }

    /// Record that this edge's `from` endpoint is now a member.
    ///
    /// Symmetric to [`Community::insert_inbound_edge`]: an edge already
    /// tracked as inbound is promoted to internal. The outbound index
    /// picks up the edge under its true original `from`.
    pub fn insert_outbound_edge(&mut self, mut edge: Edge) -> CommunityResult<EdgeClass> {
        self.ensure_live()?;
        let id = edge.id.clone();

        if let Some(tracked) = self.edges.get_mut(&id) {
            match tracked.class {
                EdgeClass::Inbound => {
                    tracked.edge.from.redirect(self.id.clone());
                    tracked.class = EdgeClass::Internal;
                    let source = tracked.edge.from.original().clone();
                    self.inbound_count -= 1;
                    self.internal_count += 1;
                    self.outbound_index.entry(source).or_default().insert(id.clone());
                    debug!(community = %self.id, edge = %id, "inbound edge became internal");
                    Ok(EdgeClass::Internal)
                }
                // Outbound leg already recorded
                class => Ok(class),
            }
        } else {
            edge.from.redirect(self.id.clone());
            let source = edge.from.original().clone();
            self.edges.insert(
                id.clone(),
                TrackedEdge {
                    edge,
                    class: EdgeClass::Outbound,
                },
            );
            self.outbound_count += 1;
            self.outbound_index.entry(source).or_default().insert(id);
            Ok(EdgeClass::Outbound)
        }
    }

    /// Remove the inbound leg of a tracked edge.
    ///
    /// An internal edge is demoted back to outbound; a plain inbound
    /// edge leaves the community entirely. The removed leg's original
    /// endpoint is restored. Returns the edge as the controller should
    /// now see it.
    pub fn remove_inbound_edge(&mut self, id: &EdgeId) -> CommunityResult<Edge> {
        self.ensure_live()?;
        let class = self
            .edges
            .get(id)
            .map(|tracked| tracked.class)
            .ok_or_else(|| CommunityError::UnknownEdge(id.clone()))?;

        match class {
            EdgeClass::Inbound => {
                let mut tracked = self
                    .edges
                    .shift_remove(id)
                    .expect("edge classification checked above");
                tracked.edge.to.restore();
                self.inbound_count -= 1;
                debug!(community = %self.id, edge = %id, "inbound edge removed");
                Ok(tracked.edge)
            }
            EdgeClass::Internal => {
                // checked above, entry exists
                let tracked = self
                    .edges
                    .get_mut(id)
                    .expect("edge classification checked above");
                tracked.edge.to.restore();
                tracked.class = EdgeClass::Outbound;
                self.internal_count -= 1;
                self.outbound_count += 1;
                debug!(community = %self.id, edge = %id, "internal edge demoted to outbound");
                Ok(tracked.edge.clone())
            }
            EdgeClass::Outbound => Err(CommunityError::UnknownEdge(id.clone())),
        }
    }

    /// Remove the outbound leg of a tracked edge.
    ///
    /// Mirror image of [`Community::remove_inbound_edge`]: internal
    /// demotes to inbound, plain outbound leaves entirely. The
    /// outbound index is kept in step.
    pub fn remove_outbound_edge(&mut self, id: &EdgeId) -> CommunityResult<Edge> {
        self.ensure_live()?;
        let class = self
            .edges
            .get(id)
            .map(|tracked| tracked.class)
            .ok_or_else(|| CommunityError::UnknownEdge(id.clone()))?;

        match class {
            EdgeClass::Outbound => {
                let mut tracked = self
                    .edges
                    .shift_remove(id)
                    .expect("edge classification checked above");
                tracked.edge.from.restore();
                self.outbound_count -= 1;
                self.unindex_outbound(&tracked.edge);
                debug!(community = %self.id, edge = %id, "outbound edge removed");
                Ok(tracked.edge)
            }
            EdgeClass::Internal => {
                let source = {
                    let tracked = self
                        .edges
                        .get_mut(id)
                        .expect("edge classification checked above");
                    tracked.edge.from.restore();
                    tracked.class = EdgeClass::Inbound;
                    tracked.edge.from.original().clone()
                };
                self.internal_count -= 1;
                self.inbound_count += 1;
                self.remove_from_index(&source, id);
                debug!(community = %self.id, edge = %id, "internal edge demoted to inbound");
                Ok(self
                    .edges
                    .get(id)
                    .map(|tracked| tracked.edge.clone())
                    .expect("edge still tracked"))
            }
            EdgeClass::Inbound => Err(CommunityError::UnknownEdge(id.clone())),
        }
    }

    /// Bulk-remove every tracked outbound leg whose true `from` is the
    /// given node, using the outbound index. Internal edges demote to
    /// inbound, plain outbound edges leave the store. Returns the
    /// affected edges in tracking order.
    pub fn remove_outbound_edges_from_node(
        &mut self,
        node: &NodeId,
    ) -> CommunityResult<Vec<Edge>> {
        self.ensure_live()?;
        let Some(ids) = self.outbound_index.remove(node) else {
            return Ok(Vec::new());
        };

        // Process in edge-store order so the result is deterministic
        let ordered: Vec<EdgeId> = self
            .edges
            .keys()
            .filter(|id| ids.contains(*id))
            .cloned()
            .collect();

        let mut removed = Vec::with_capacity(ordered.len());
        for id in ordered {
            let class = self
                .edges
                .get(&id)
                .map(|tracked| tracked.class)
                .expect("indexed edge is tracked");
            match class {
                EdgeClass::Outbound => {
                    let mut tracked = self
                        .edges
                        .shift_remove(&id)
                        .expect("indexed edge is tracked");
                    tracked.edge.from.restore();
                    self.outbound_count -= 1;
                    removed.push(tracked.edge);
                }
                EdgeClass::Internal => {
                    let tracked = self
                        .edges
                        .get_mut(&id)
                        .expect("indexed edge is tracked");
                    tracked.edge.from.restore();
                    tracked.class = EdgeClass::Inbound;
                    self.internal_count -= 1;
                    self.inbound_count += 1;
                    removed.push(tracked.edge.clone());
                }
                // The index only ever holds outbound legs
                EdgeClass::Inbound => {}
            }
        }
        debug!(
            community = %self.id,
            node = %node,
            count = removed.len(),
            "bulk-removed outbound edges"
        );
        Ok(removed)
    }

    /// Collapse: render this community as a single visual element
    pub fn collapse(&mut self) -> CommunityResult<()> {
        self.ensure_live()?;
        self.expanded = false;
        Ok(())
    }

    /// Expand: render members individually, laid out with the
    /// sqrt-scaled parameters from [`Community::layout_distance`] and
    /// [`Community::layout_charge`]
    pub fn expand(&mut self) -> CommunityResult<()> {
        self.ensure_live()?;
        self.expanded = true;
        Ok(())
    }

    /// Read-only snapshot of the current membership and edges, with
    /// original endpoints restored in the copies. Does not mutate.
    pub fn dissolve_info(&self) -> CommunityResult<DissolveInfo> {
        self.ensure_live()?;

        let mut members: Vec<NodeId> = self.members.iter().cloned().collect();
        members.sort();

        let mut internal_edges = Vec::new();
        let mut inbound_edges = Vec::new();
        let mut outbound_edges = Vec::new();
        for tracked in self.edges.values() {
            let mut edge = tracked.edge.clone();
            edge.from.restore();
            edge.to.restore();
            match tracked.class {
                EdgeClass::Internal => internal_edges.push(edge),
                EdgeClass::Inbound => inbound_edges.push(edge),
                EdgeClass::Outbound => outbound_edges.push(edge),
            }
        }

        Ok(DissolveInfo {
            community: self.id.clone(),
            members,
            internal_edges,
            inbound_edges,
            outbound_edges,
        })
    }

    /// Flatten this community back into plain nodes and edges.
    ///
    /// Hands the snapshot to the controller and marks the community
    /// terminal; every later operation fails with `UseAfterDissolve`.
    pub fn dissolve(
        &mut self,
        controller: &mut dyn CommunityController,
    ) -> CommunityResult<()> {
        let info = self.dissolve_info()?;
        self.dissolved = true;
        debug!(community = %self.id, members = info.members.len(), "dissolving community");
        controller.dissolve_community(info);
        Ok(())
    }

    fn unindex_outbound(&mut self, edge: &Edge) {
        let source = edge.from.original().clone();
        self.remove_from_index(&source, &edge.id);
    }

    fn remove_from_index(&mut self, source: &NodeId, id: &EdgeId) {
        if let Some(ids) = self.outbound_index.get_mut(source) {
            ids.remove(id);
            if ids.is_empty() {
                self.outbound_index.remove(source);
            }
        }
    }
}

impl GraphElement for Community {
    fn element_id(&self) -> &str {
        self.id.as_str()
    }

    fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::controller::ControllerCapabilities;

    struct TestController {
        caps: ControllerCapabilities,
        dissolved: Vec<DissolveInfo>,
        limit_checks: usize,
    }

    impl TestController {
        fn new() -> Self {
            TestController {
                caps: ControllerCapabilities::all(),
                dissolved: Vec::new(),
                limit_checks: 0,
            }
        }

        fn with_caps(caps: ControllerCapabilities) -> Self {
            TestController {
                caps,
                dissolved: Vec::new(),
                limit_checks: 0,
            }
        }
    }

    impl CommunityController for TestController {
        fn capabilities(&self) -> ControllerCapabilities {
            self.caps
        }

        fn dissolve_community(&mut self, info: DissolveInfo) {
            self.dissolved.push(info);
        }

        fn check_node_limit(&mut self, _community: &Community) {
            self.limit_checks += 1;
        }
    }

    fn community(controller: &TestController, members: &[&str]) -> Community {
        Community::new(
            CommunityId::new("community_0"),
            controller,
            members.iter().map(|m| NodeId::new(*m)),
            LayoutScale::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_constructor_requires_capabilities() {
        let partial = TestController::with_caps(ControllerCapabilities {
            dissolve_community: false,
            check_node_limit: true,
        });
        let err = Community::new(
            CommunityId::new("c"),
            &partial,
            std::iter::empty(),
            LayoutScale::default(),
        )
        .unwrap_err();
        assert_eq!(err, CommunityError::InvalidController("dissolve_community"));

        let partial = TestController::with_caps(ControllerCapabilities {
            dissolve_community: true,
            check_node_limit: false,
        });
        let err = Community::new(
            CommunityId::new("c"),
            &partial,
            std::iter::empty(),
            LayoutScale::default(),
        )
        .unwrap_err();
        assert_eq!(err, CommunityError::InvalidController("check_node_limit"));
    }

    #[test]
    fn test_initial_members_set_size() {
        let controller = TestController::new();
        let community = community(&controller, &["a", "b", "c"]);
        assert_eq!(community.size(), 3);
        assert!(community.contains(&NodeId::new("b")));
        assert!(!community.is_expanded());
    }

    #[test]
    fn test_insert_node_triggers_limit_check() {
        let mut controller = TestController::new();
        let mut community = community(&controller, &["a"]);

        community
            .insert_node(NodeId::new("b"), &mut controller)
            .unwrap();
        assert_eq!(community.size(), 2);
        assert_eq!(controller.limit_checks, 1);

        // Re-inserting an existing member does not grow the community
        community
            .insert_node(NodeId::new("b"), &mut controller)
            .unwrap();
        assert_eq!(community.size(), 2);
    }

    #[test]
    fn test_inbound_then_outbound_becomes_internal() {
        let controller = TestController::new();
        let mut community = community(&controller, &["a", "b"]);

        // external -> a
        let class = community
            .insert_inbound_edge(Edge::new("e1", "x", "a"))
            .unwrap();
        assert_eq!(class, EdgeClass::Inbound);
        assert_eq!(community.inbound_count(), 1);

        // x joins later: its outbound leg promotes the edge
        let class = community
            .insert_outbound_edge(Edge::new("e1", "x", "a"))
            .unwrap();
        assert_eq!(class, EdgeClass::Internal);
        assert_eq!(community.inbound_count(), 0);
        assert_eq!(community.internal_count(), 1);
    }

    #[test]
    fn test_remove_unknown_edge() {
        let controller = TestController::new();
        let mut community = community(&controller, &["a"]);
        let err = community.remove_inbound_edge(&EdgeId::new("nope")).unwrap_err();
        assert_eq!(err, CommunityError::UnknownEdge(EdgeId::new("nope")));
    }

    #[test]
    fn test_remove_wrong_leg_is_unknown() {
        let controller = TestController::new();
        let mut community = community(&controller, &["a"]);
        community
            .insert_outbound_edge(Edge::new("e1", "a", "x"))
            .unwrap();
        // e1 has no inbound leg to remove
        let err = community.remove_inbound_edge(&EdgeId::new("e1")).unwrap_err();
        assert_eq!(err, CommunityError::UnknownEdge(EdgeId::new("e1")));
    }

    #[test]
    fn test_remove_node_requires_disconnection() {
        let controller = TestController::new();
        let mut community = community(&controller, &["a", "b"]);
        community
            .insert_outbound_edge(Edge::new("e1", "a", "x"))
            .unwrap();

        let err = community.remove_node(&NodeId::new("a")).unwrap_err();
        assert_eq!(err, CommunityError::MemberStillConnected(NodeId::new("a")));

        community
            .remove_outbound_edges_from_node(&NodeId::new("a"))
            .unwrap();
        community.remove_node(&NodeId::new("a")).unwrap();
        assert_eq!(community.size(), 1);

        let err = community.remove_node(&NodeId::new("a")).unwrap_err();
        assert_eq!(err, CommunityError::UnknownMember(NodeId::new("a")));
    }

    #[test]
    fn test_collapse_expand_cycle() {
        let controller = TestController::new();
        let mut community = community(&controller, &["a", "b", "c", "d"]);

        community.expand().unwrap();
        assert!(community.is_expanded());
        community.collapse().unwrap();
        assert!(!community.is_expanded());

        // sqrt(4) = 2
        assert_eq!(community.layout_distance(), 160.0);
        assert_eq!(community.layout_charge(), -480.0);
    }

    #[test]
    fn test_dissolve_is_terminal() {
        let mut controller = TestController::new();
        let mut community = community(&controller, &["a"]);
        community.dissolve(&mut controller).unwrap();
        assert!(community.is_dissolved());
        assert_eq!(controller.dissolved.len(), 1);

        let err = community.expand().unwrap_err();
        assert_eq!(
            err,
            CommunityError::UseAfterDissolve(CommunityId::new("community_0"))
        );
        assert!(community.dissolve_info().is_err());
        assert!(community
            .insert_inbound_edge(Edge::new("e", "x", "a"))
            .is_err());
    }
}
