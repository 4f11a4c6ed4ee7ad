//! Graph data types shared across the Carta workspace.
//!
//! Nodes and relationships are engine-owned entities: the structs here
//! are per-call snapshots keyed by the engine-assigned numeric id, never
//! cached or kept in sync across calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property name used to correlate relationship endpoints when
/// engine-native ids are not the chosen join key.
pub const TEMP_ID_PROPERTY: &str = "temp_id";

/// A scalar property value.
///
/// `List` exists for bound parameters carrying id lists; stored node and
/// relationship properties are scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Property map: match criteria and values to set, keyed by property
/// name. BTreeMap keeps iteration order deterministic, so composed query
/// text is stable for a given map.
pub type Properties = BTreeMap<String, Value>;

/// A node snapshot, identified by its engine-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl Node {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A relationship snapshot between two nodes, identified by its
/// engine-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: i64,
    pub rel_type: String,
    pub start_id: i64,
    pub end_id: i64,
    pub properties: Properties,
}

impl Relationship {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
