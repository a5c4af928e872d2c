//! # PairSim Core Library
//!
//! Scores large collections of molecule pairs by splitting the work across a
//! fixed number of parallel workers and merging the keyed results back into
//! the pair-definition dataset.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Plain data models (`Entity`, `WorkItem`,
//!   `AnnotatedDataset`), the collaborator traits used to load and persist them, and
//!   the `Scorer` interface with a fingerprint-based Tanimoto implementation.
//!
//! - **[`engine`]: The Logic Core.** Partitioning, the worker routine, the
//!   coordinator that runs the distribute/compute/collect cycle across threads, the
//!   keyed merge, and phase timing.
//!
//! - **[`workflows`]: The Public API.** A single blocking entry point that runs a
//!   whole batch job from loading to persistence.

pub mod core;
pub mod engine;
pub mod workflows;
