//! Neo4j connection management and the Bolt-backed access layer.

use async_trait::async_trait;
use neo4rs::{BoltList, BoltType, ConfigBuilder, Graph};

use carta_core::{CartaError, Node, Properties, Relationship, Value};

use crate::access::{AccessLayer, RowAccess};
use crate::utils::format_labels;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "carta-dev".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

/// Thread-safe Neo4j client with connection pooling.
///
/// Implements [`AccessLayer`] over Bolt. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, CartaError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| {
                CartaError::engine("Invalid connection configuration.", Some(Box::new(e)), "CONNECT")
            })?;

        let graph = Graph::connect(neo_config).await.map_err(|e| {
            CartaError::engine("Failed to connect to the graph engine.", Some(Box::new(e)), "CONNECT")
        })?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    fn build_query(text: &str, params: &Properties) -> neo4rs::Query {
        let mut query = neo4rs::query(text);
        for (key, value) in params {
            query = query.param(key, bolt_value(value));
        }
        query
    }

    /// Run a write query without collecting rows.
    async fn run(&self, text: &str, params: &Properties, code: &str) -> Result<(), CartaError> {
        let message = format!("Failed to run the query. Query : {text}");
        self.graph
            .run(Self::build_query(text, params))
            .await
            .map_err(|e| CartaError::engine(&message, Some(Box::new(e)), code))
    }
}

#[async_trait]
impl AccessLayer for GraphClient {
    type Row = BoltRow;

    async fn execute_query(
        &self,
        text: &str,
        params: &Properties,
    ) -> Result<Vec<BoltRow>, CartaError> {
        let message = format!("Failed to execute the query. Query : {text}");
        let wrap = |e: neo4rs::Error| CartaError::engine(&message, Some(Box::new(e)), "EXECUTE");

        let mut stream = self
            .graph
            .execute(Self::build_query(text, params))
            .await
            .map_err(wrap)?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(wrap)? {
            rows.push(BoltRow(row));
        }
        Ok(rows)
    }

    async fn create_node(&self) -> Result<Node, CartaError> {
        let rows = self
            .execute_query("CREATE (n) RETURN n as node", &Properties::new())
            .await?;
        rows.first().and_then(|row| row.node("node")).ok_or_else(|| {
            CartaError::engine("Failed to create the node handle.", None, "CREATE_NODE")
        })
    }

    async fn add_label(&self, node: &mut Node, label: &str) -> Result<(), CartaError> {
        let text = format!(
            "MATCH (n) WHERE ID(n) = $id SET n{}",
            format_labels(&[label.to_string()])
        );
        let mut params = Properties::new();
        params.insert("id".to_string(), Value::Int(node.id));

        self.run(&text, &params, "ADD_LABEL").await?;
        node.labels.push(label.to_string());
        Ok(())
    }

    async fn set_node_property(
        &self,
        node: &mut Node,
        key: &str,
        value: Value,
    ) -> Result<(), CartaError> {
        let text = format!("MATCH (n) WHERE ID(n) = $id SET n.`{key}` = $value");
        let mut params = Properties::new();
        params.insert("id".to_string(), Value::Int(node.id));
        params.insert("value".to_string(), value.clone());

        self.run(&text, &params, "SET_PROPERTY").await?;
        node.properties.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_relationship_property(
        &self,
        relationship: &mut Relationship,
        key: &str,
        value: Value,
    ) -> Result<(), CartaError> {
        let text = format!("MATCH ()-[r]-() WHERE ID(r) = $id SET r.`{key}` = $value");
        let mut params = Properties::new();
        params.insert("id".to_string(), Value::Int(relationship.id));
        params.insert("value".to_string(), value.clone());

        self.run(&text, &params, "SET_PROPERTY").await?;
        relationship.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        tracing::error!(cause = %cause, "{message}");
    }
}

/// One result row from a Bolt query.
pub struct BoltRow(neo4rs::Row);

impl RowAccess for BoltRow {
    fn node(&self, column: &str) -> Option<Node> {
        self.0.get::<neo4rs::Node>(column).ok().map(|n| decode_node(&n))
    }

    fn relationship(&self, column: &str) -> Option<Relationship> {
        self.0
            .get::<neo4rs::Relation>(column)
            .ok()
            .map(|r| decode_relation(&r))
    }

    fn string(&self, column: &str) -> Option<String> {
        self.0.get::<String>(column).ok()
    }
}

fn decode_node(node: &neo4rs::Node) -> Node {
    let mut properties = Properties::new();
    for key in node.keys() {
        // Bolt does not expose property types up front; probe in a fixed
        // order and skip anything non-scalar.
        let value = node
            .get::<bool>(key)
            .map(Value::Bool)
            .or_else(|_| node.get::<i64>(key).map(Value::Int))
            .or_else(|_| node.get::<f64>(key).map(Value::Float))
            .or_else(|_| node.get::<String>(key).map(Value::String));
        if let Ok(value) = value {
            properties.insert(key.to_string(), value);
        }
    }

    Node {
        id: node.id(),
        labels: node.labels().iter().map(|l| l.to_string()).collect(),
        properties,
    }
}

fn decode_relation(relation: &neo4rs::Relation) -> Relationship {
    let mut properties = Properties::new();
    for key in relation.keys() {
        let value = relation
            .get::<bool>(key)
            .map(Value::Bool)
            .or_else(|_| relation.get::<i64>(key).map(Value::Int))
            .or_else(|_| relation.get::<f64>(key).map(Value::Float))
            .or_else(|_| relation.get::<String>(key).map(Value::String));
        if let Ok(value) = value {
            properties.insert(key.to_string(), value);
        }
    }

    Relationship {
        id: relation.id(),
        rel_type: relation.typ().to_string(),
        start_id: relation.start_node_id(),
        end_id: relation.end_node_id(),
        properties,
    }
}

fn bolt_value(value: &Value) -> BoltType {
    match value {
        Value::String(s) => BoltType::from(s.as_str()),
        Value::Int(i) => BoltType::from(*i),
        Value::Float(f) => BoltType::from(*f),
        Value::Bool(b) => BoltType::from(*b),
        Value::List(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(bolt_value(item));
            }
            BoltType::List(list)
        }
    }
}
