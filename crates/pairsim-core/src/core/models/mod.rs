//! # Core Models Module
//!
//! Plain data structures describing one scoring run.
//!
//! - [`entity`] - Immutable molecule representations keyed by SMILES
//! - [`work_item`] - Pairwise work items, chunks, result records, and the registry
//!   that resolves pair definitions against loaded entities
//! - [`dataset`] - The pair-definition dataset that receives the computed scores

pub mod dataset;
pub mod entity;
pub mod work_item;
