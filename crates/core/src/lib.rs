//! Domain types and rules for the irrigation inspection manager.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, the
//! input validation helpers shared by the database and HTTP layers, and the
//! inspection lifecycle rules.

pub mod error;
pub mod inspection;
pub mod types;
pub mod validation;
