//! Prelude module for cidoc_date crate.
//!
//! Re-exports the derive macros used across modules.

pub use derive_more::Display;
