//! carta-core: Shared types and error handling for the Carta exporter.
//!
//! This crate provides the foundational pieces used across all Carta
//! components:
//! - Graph data types (Node, Relationship, property values)
//! - The error taxonomy every graph failure is classified into
//! - Process-wide constants such as the temporary-id property name

pub mod error;
pub mod types;

pub use error::CartaError;
pub use types::{Node, Properties, Relationship, Value, TEMP_ID_PROPERTY};
