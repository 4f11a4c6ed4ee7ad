//! Stateless graph lookup/create utilities.
//!
//! Each function composes one parameterized Cypher query, issues it
//! through the caller's [`AccessLayer`], and re-raises any underlying
//! failure as a [`CartaError::Query`] with a fixed per-utility code.
//! Identifiers (labels, relationship types, property keys) are embedded
//! as backtick-quoted text; property values are always bound parameters,
//! never interpolated. A missing match is `Ok(None)`, never an error.

use std::collections::HashMap;

use carta_core::{CartaError, Node, Properties, Relationship, Value, TEMP_ID_PROPERTY};

use crate::access::{AccessLayer, RowAccess};

const CODE_GET_NODE: &str = "UTILS_GET_NODE";
const CODE_SORT_NODES: &str = "UTILS_SORT_NODES";
const CODE_CREATE_NODE: &str = "UTILS_CREATE_NODE";
const CODE_GET_RELATIONSHIP: &str = "UTILS_GET_RELATIONSHIP";
const CODE_CREATE_RELATIONSHIP: &str = "UTILS_CREATE_RELATIONSHIP";

/// Format a label set as a Cypher pattern fragment.
///
/// Empty set yields the empty string (unconstrained pattern); otherwise a
/// colon-prefixed, colon-joined list with each label independently
/// backtick-quoted, e.g. `["A", "B"]` -> `` :`A`:`B` ``.
pub fn format_labels(labels: &[String]) -> String {
    let quoted: Vec<String> = labels.iter().map(|l| format!("`{l}`")).collect();

    if quoted.is_empty() {
        String::new()
    } else {
        format!(":{}", quoted.join(":"))
    }
}

/// Format a property map as a WHERE clause over the given alias.
///
/// Empty map yields a single space (no constraint); otherwise
/// `" WHERE "` + `AND`-joined `alias.key=$key` terms, one per property in
/// map iteration order. Each `$key` is bound from the same map at
/// execution time.
pub fn format_where(properties: &Properties, alias: &str) -> String {
    let terms: Vec<String> = properties
        .keys()
        .map(|key| format!("{alias}.{key}=${key}"))
        .collect();

    if terms.is_empty() {
        " ".to_string()
    } else {
        format!(" WHERE {}", terms.join(" AND "))
    }
}

/// Find a node by labels and property equality.
///
/// Returns the first matching node, or `None` when nothing matches.
pub async fn get_node<A: AccessLayer>(
    access: &A,
    labels: &[String],
    properties: &Properties,
) -> Result<Option<Node>, CartaError> {
    let request = format!(
        "MATCH (o{}){} RETURN o as node",
        format_labels(labels),
        format_where(properties, "o"),
    );

    match access.execute_query(&request, properties).await {
        Ok(rows) => Ok(rows.first().and_then(|row| row.node("node"))),
        Err(e) => {
            access.error(&format!("Failed to get the node. Request : {request}"), &e);
            Err(CartaError::query(
                "Failed to get the node.",
                Some(Box::new(e)),
                CODE_GET_NODE,
            ))
        }
    }
}

/// Group the nodes behind the given engine ids by their first label.
///
/// One query matches all ids; rows are collapsed with DISTINCT at the
/// engine and grouped here in first-seen order. An empty id list yields
/// an empty map, not an error.
pub async fn sort_nodes_by_label<A: AccessLayer>(
    access: &A,
    ids: &[i64],
) -> Result<HashMap<String, Vec<Node>>, CartaError> {
    let request =
        "MATCH (o) WHERE ID(o) IN $idList RETURN DISTINCT o as node, LABELS(o)[0] as label";

    let mut params = Properties::new();
    params.insert(
        "idList".to_string(),
        Value::List(ids.iter().copied().map(Value::Int).collect()),
    );

    match access.execute_query(request, &params).await {
        Ok(rows) => {
            let mut grouped: HashMap<String, Vec<Node>> = HashMap::new();
            for row in rows {
                if let (Some(label), Some(node)) = (row.string("label"), row.node("node")) {
                    grouped.entry(label).or_default().push(node);
                }
            }
            Ok(grouped)
        }
        Err(e) => {
            access.error(&format!("Failed to build the node map. Request : {request}"), &e);
            Err(CartaError::query(
                "Failed to build the node map.",
                Some(Box::new(e)),
                CODE_SORT_NODES,
            ))
        }
    }
}

/// Create a node with the given labels and properties.
///
/// Acquires a fresh handle, then applies every label and property in
/// turn. Partial mutation before a failure is not rolled back here; that
/// is the enclosing transaction's responsibility.
pub async fn create_node<A: AccessLayer>(
    access: &A,
    labels: &[String],
    properties: &Properties,
) -> Result<Node, CartaError> {
    match create_node_inner(access, labels, properties).await {
        Ok(node) => Ok(node),
        Err(e) => {
            access.error("Failed to create the node.", &e);
            Err(CartaError::query(
                "Failed to create the node.",
                Some(Box::new(e)),
                CODE_CREATE_NODE,
            ))
        }
    }
}

async fn create_node_inner<A: AccessLayer>(
    access: &A,
    labels: &[String],
    properties: &Properties,
) -> Result<Node, CartaError> {
    let mut node = access.create_node().await?;
    for label in labels {
        access.add_label(&mut node, label).await?;
    }
    for (key, value) in properties {
        access.set_node_property(&mut node, key, value.clone()).await?;
    }
    Ok(node)
}

/// Find a relationship of the given type between two endpoints matched by
/// their temporary-id property.
pub async fn get_relationship<A: AccessLayer>(
    access: &A,
    rel_type: &str,
    start: i64,
    end: i64,
) -> Result<Option<Relationship>, CartaError> {
    let request = format!(
        "MATCH (a)-[r:`{rel_type}`]-(b) \
         WHERE a.{TEMP_ID_PROPERTY}=$start AND b.{TEMP_ID_PROPERTY}=$end \
         RETURN r as relationship"
    );

    let mut params = Properties::new();
    params.insert("start".to_string(), Value::Int(start));
    params.insert("end".to_string(), Value::Int(end));

    match access.execute_query(&request, &params).await {
        Ok(rows) => Ok(rows.first().and_then(|row| row.relationship("relationship"))),
        Err(e) => {
            access.error(&format!("Failed to get the relationship. Request : {request}"), &e);
            Err(CartaError::query(
                "Failed to get the relationship.",
                Some(Box::new(e)),
                CODE_GET_RELATIONSHIP,
            ))
        }
    }
}

/// Merge a relationship of the given type between two endpoints matched
/// by their temporary-id property, then apply the given properties.
///
/// The merge is expected to always yield exactly one row; zero rows means
/// the endpoints could not be resolved and is a hard failure, never an
/// empty optional.
pub async fn create_relationship<A: AccessLayer>(
    access: &A,
    rel_type: &str,
    start: i64,
    end: i64,
    properties: &Properties,
) -> Result<Relationship, CartaError> {
    let request = format!(
        "MATCH (a), (b) \
         WHERE a.{TEMP_ID_PROPERTY}=$start AND b.{TEMP_ID_PROPERTY}=$end \
         MERGE (a)-[r:`{rel_type}`]-(b) \
         RETURN r as relationship"
    );

    let mut params = Properties::new();
    params.insert("start".to_string(), Value::Int(start));
    params.insert("end".to_string(), Value::Int(end));

    let rows = match access.execute_query(&request, &params).await {
        Ok(rows) => rows,
        Err(e) => {
            access.error(&format!("Failed to create the relationship. Request : {request}"), &e);
            return Err(CartaError::query(
                "Failed to create the relationship.",
                Some(Box::new(e)),
                CODE_CREATE_RELATIONSHIP,
            ));
        }
    };

    let Some(mut relationship) = rows.first().and_then(|row| row.relationship("relationship"))
    else {
        let e = CartaError::query_with_text(
            "Failed to create the relationship. No row returned.",
            &request,
            None,
            CODE_CREATE_RELATIONSHIP,
        );
        access.error(e.message(), &e);
        return Err(e);
    };

    for (key, value) in properties {
        if let Err(e) = access
            .set_relationship_property(&mut relationship, key, value.clone())
            .await
        {
            access.error("Failed to create the relationship.", &e);
            return Err(CartaError::query(
                "Failed to create the relationship.",
                Some(Box::new(e)),
                CODE_CREATE_RELATIONSHIP,
            ));
        }
    }

    Ok(relationship)
}
