//! The executor seam between graph utilities and the engine.
//!
//! The access layer owns the session/transaction context and is passed in
//! by the caller on every utility call; nothing here retains it. The
//! handle-mutation methods (`add_label`, `set_node_property`,
//! `set_relationship_property`) mirror the engine-native entity surface:
//! a remote handle cannot mutate without its session, so the session-side
//! trait carries those operations and updates the local snapshot.

use async_trait::async_trait;

use carta_core::{CartaError, Node, Properties, Relationship, Value};

/// Typed column extraction from one result row.
pub trait RowAccess {
    /// The node under the given column, if present and node-shaped.
    fn node(&self, column: &str) -> Option<Node>;

    /// The relationship under the given column, if present.
    fn relationship(&self, column: &str) -> Option<Relationship>;

    /// The string under the given column, if present.
    fn string(&self, column: &str) -> Option<String>;
}

/// Abstract query executor over the graph engine.
///
/// Implementations decide connectivity, cancellation, and timeout; the
/// utilities issue exactly one query per call and never retry.
#[async_trait]
pub trait AccessLayer: Send + Sync {
    type Row: RowAccess + Send;

    /// Execute a query with bound named parameters and collect its rows.
    async fn execute_query(
        &self,
        text: &str,
        params: &Properties,
    ) -> Result<Vec<Self::Row>, CartaError>;

    /// Acquire a fresh node handle from the engine.
    async fn create_node(&self) -> Result<Node, CartaError>;

    /// Apply a label to an existing node.
    async fn add_label(&self, node: &mut Node, label: &str) -> Result<(), CartaError>;

    /// Set one property on an existing node.
    async fn set_node_property(
        &self,
        node: &mut Node,
        key: &str,
        value: Value,
    ) -> Result<(), CartaError>;

    /// Set one property on an existing relationship.
    async fn set_relationship_property(
        &self,
        relationship: &mut Relationship,
        key: &str,
        value: Value,
    ) -> Result<(), CartaError>;

    /// Diagnostic sink. Never alters control flow.
    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static));
}
