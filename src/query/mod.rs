//! Query execution over a built index

pub mod retrieve;

pub use retrieve::{Searcher, sorted_intersect};
