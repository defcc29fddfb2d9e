//! Injected community id generation
//!
//! Ids come from a generator chosen by the controller instead of ad-hoc
//! randomness, so tests get stable ids and collisions cannot happen
//! within a generator.

use uuid::Uuid;

use crate::graph::CommunityId;

/// Source of fresh community ids
pub trait IdGenerator {
    fn next_community_id(&mut self) -> CommunityId;
}

/// Monotonic, prefixed ids: `community_0`, `community_1`, …
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        SequentialIds::new("community")
    }
}

impl IdGenerator for SequentialIds {
    fn next_community_id(&mut self) -> CommunityId {
        let id = CommunityId::new(format!("{}_{}", self.prefix, self.counter));
        self.counter += 1;
        id
    }
}

/// UUID v4 ids, for controllers that merge communities from several
/// sources and need global uniqueness
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_community_id(&mut self) -> CommunityId {
        CommunityId::new(format!("community_{}", Uuid::new_v4()))
    }
}
