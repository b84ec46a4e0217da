//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `signals` - Signal ingestion (add, with sentence splitting)
//! - `topics` - Topic overview, statistics, and insight listing
//! - `meta` - Cross-topic meta profile for a subject
//! - `render` - Text renderings (path, concept trail, synthesis, article)
//! - `maintenance` - Backup and reset commands

pub mod maintenance;
pub mod meta;
pub mod render;
pub mod signals;
pub mod topics;

// Re-export command functions for main.rs
pub use maintenance::*;
pub use meta::*;
pub use render::*;
pub use signals::*;
pub use topics::*;
