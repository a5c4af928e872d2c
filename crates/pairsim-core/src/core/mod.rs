//! # Core Module
//!
//! Stateless building blocks of a scoring run.
//!
//! - **Data Model** ([`models`]) - Entities, work items, result records, and the
//!   annotated dataset
//! - **Collaborators** ([`io`]) - Interfaces for loading entities and pair definitions
//!   and for persisting results, with file-backed implementations
//! - **Similarity** ([`scoring`]) - The [`scoring::Scorer`] interface and the
//!   fingerprint-based Tanimoto scorer

pub mod io;
pub mod models;
pub mod scoring;
