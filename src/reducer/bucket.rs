//! Bounded node bucketing
//!
//! Partitions an oversized node set into at most `bucket_count`
//! similarity-coherent groups so a renderer never draws more than a
//! fixed number of visual units. Pure and deterministic for a given
//! input order; inputs are never mutated.

use std::cmp::Reverse;

use thiserror::Error;
use tracing::trace;

use super::similarity::{group_by_attributes, group_by_priority};
use crate::graph::{AttributeName, Edge, Node};

/// Errors raised by the reducer: mandatory collections were not given
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReducerError {
    #[error("nodes have to be given")]
    MissingNodes,

    #[error("edges have to be given")]
    MissingEdges,
}

pub type ReducerResult<T> = Result<T, ReducerError>;

/// Partition `nodes` into at most `bucket_count` non-empty buckets.
///
/// - With `nodes.len() <= bucket_count`, every node gets its own
///   bucket; no separation is fabricated beyond input size.
/// - Otherwise nodes are grouped by similarity (hierarchically along
///   `priority`, or by deep attribute equality when `priority` is
///   empty) and the groups are placed largest-first into the currently
///   smallest bucket. Mutually dissimilar nodes spread round-robin;
///   identical runs stay together whenever they fit.
///
/// The edge collection is accepted for interface symmetry with callers
/// that also pass edges; grouping does not consult it.
pub fn bucket_nodes(
    nodes: Option<&[Node]>,
    edges: Option<&[Edge]>,
    bucket_count: usize,
    priority: &[AttributeName],
) -> ReducerResult<Vec<Vec<Node>>> {
    let nodes = nodes.ok_or(ReducerError::MissingNodes)?;
    let edges = edges.ok_or(ReducerError::MissingEdges)?;
    trace!(
        nodes = nodes.len(),
        edges = edges.len(),
        bucket_count,
        priority = priority.len(),
        "bucketing nodes"
    );

    if bucket_count == 0 {
        return Ok(Vec::new());
    }
    if nodes.len() <= bucket_count {
        return Ok(nodes.iter().map(|node| vec![node.clone()]).collect());
    }

    let refs: Vec<&Node> = nodes.iter().collect();
    let groups = if priority.is_empty() {
        group_by_attributes(refs)
    } else {
        group_by_priority(refs, priority)
    };
    Ok(pack(groups, bucket_count))
}

/// Place similarity groups into at most `bucket_count` buckets,
/// largest group first, each into the currently smallest bucket
/// (lowest index on ties). Equal-sized groups keep their discovery
/// order, which round-robins runs of singletons.
fn pack(groups: Vec<Vec<&Node>>, bucket_count: usize) -> Vec<Vec<Node>> {
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by_key(|&i| Reverse(groups[i].len()));

    let mut buckets: Vec<Vec<Node>> = vec![Vec::new(); bucket_count.min(groups.len())];
    for group_index in order {
        let target = buckets
            .iter()
            .enumerate()
            .min_by_key(|(_, bucket)| bucket.len())
            .map(|(i, _)| i)
            .expect("at least one bucket");
        buckets[target].extend(groups[group_index].iter().map(|node| (*node).clone()));
    }
    buckets
}
