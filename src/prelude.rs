//! Prelude module for date_codec crate.
//!
//! Re-exports the derive macros the crate's types use.

pub use derive_more::Display;
