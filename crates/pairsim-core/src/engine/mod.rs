//! # Engine Module
//!
//! The parallel scoring engine: everything between "work items are loaded" and
//! "every score is merged into the dataset".
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters and their validation
//! - **Partitioning** ([`partition`]) - Contiguous split of the work items into one chunk per worker
//! - **Workers** ([`worker`]) - The per-chunk scoring routine shared by every worker
//! - **Coordination** ([`coordinator`]) - Thread setup, the distribution barrier, and result collection
//! - **Merging** ([`merge`]) - Keyed, rounded write-back of results into the dataset
//! - **Timing** ([`timing`]) - Phase durations reported alongside a run
//! - **Progress Monitoring** ([`progress`]) - Event callbacks for user feedback
//! - **Error Handling** ([`error`]) - Engine-level error type with phase attribution

pub mod config;
pub mod coordinator;
pub mod error;
pub mod merge;
pub mod partition;
pub mod progress;
pub mod timing;
pub mod worker;
