//! Node reduction: the pure, algorithmic half of the engine

pub mod bucket;
mod similarity;

pub use bucket::{bucket_nodes, ReducerError, ReducerResult};
