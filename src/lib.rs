//! Bidirectional conversion between YAML theme settings and an HTML
//! settings page.
//!
//! The two pipelines share one in-memory model: [`convert::build_target`]
//! merges YAML sources and renders them through the template set, while
//! [`convert::import_target`] tidies an existing page and classifies its
//! controls back into the same structure.

pub mod classify;
pub mod cli;
pub mod convert;
pub mod dom;
pub mod error;
pub mod merge;
pub mod render;
pub mod settings;
pub mod tidy;

pub use error::{Error, Result};
