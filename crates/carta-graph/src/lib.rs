//! carta-graph: Neo4j access layer for the Carta exporter.
//!
//! This crate is the single point through which the exporter touches the
//! graph. Queries are composed from backtick-quoted identifiers and bound
//! named parameters, executed through the [`AccessLayer`] seam, and every
//! underlying failure is re-raised as a [`carta_core::CartaError`] with a
//! stable code.

pub mod access;
pub mod client;
pub mod utils;

pub use access::{AccessLayer, RowAccess};
pub use client::{GraphClient, GraphConfig};
