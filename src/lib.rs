//! dynaform: a dynamic form engine
//!
//! Field descriptors are composed into named form definitions, rendered as
//! live forms validated by a schema built at runtime, and submitted instances
//! are appended to a local JSON log. Free-text answers can be scored for
//! sentiment through a companion HTTP function, also hosted by this crate.

// Module declarations
pub mod builder;
pub mod config;
pub mod file_storage;
pub mod generate;
mod models;
pub mod renderer;
pub mod schema;
pub mod sentiment;

// Server module (companion HTTP functions)
pub mod server;

// Re-export models for use at the crate root
pub use models::*;
