//! High-level entry points that run a complete scoring job.

pub mod score_pairs;
