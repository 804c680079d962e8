//! # Raymap Tools
//!
//! Command-line helpers around [`raymap_core`]:
//! - Create blank maps with a spawn
//! - Inspect and validate containers
//! - Paint tiles and move the spawn from scripts
//! - List the tile catalog

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod edit;
pub mod error;
pub mod inspect;
pub mod validate;

pub use config::ToolsConfig;
pub use error::{ToolsError, ToolsResult};
