//! Input and output collaborators of a scoring run.
//!
//! The [`traits`] module defines the narrow interfaces the engine consumes;
//! [`csv_store`] and [`json_pairs`] are the file-backed implementations used
//! by the command-line tool.

pub mod csv_store;
pub mod error;
pub mod json_pairs;
pub mod traits;
