//! Loosely typed reader for SPDX 3 JSON-LD documents.
//!
//! Documents are loaded as a flat list of graph nodes without interpreting
//! them against the model, so malformed documents still load far enough for
//! the validator to report what is wrong with them.

use crate::error::{DptError, ParseErrorKind, Result};
use serde_json::{Map, Value};

/// A parsed JSON-LD document: its `@context` and the nodes of its `@graph`.
#[derive(Debug, Clone)]
pub struct GraphDocument {
    context: Value,
    nodes: Vec<GraphNode>,
}

impl GraphDocument {
    /// The raw `@context` value (`Null` when absent)
    #[must_use]
    pub const fn context(&self) -> &Value {
        &self.context
    }

    /// Context IRIs, whether `@context` is a single string or an array
    #[must_use]
    pub fn context_urls(&self) -> Vec<&str> {
        match &self.context {
            Value::String(s) => vec![s.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Nodes whose type is `node_type`
    pub fn nodes_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a GraphNode> {
        self.nodes
            .iter()
            .filter(move |n| n.node_type() == Some(node_type))
    }

    /// Find a node by its `spdxId` or `@id`
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&GraphNode> {
        self.nodes
            .iter()
            .find(|n| n.spdx_id() == Some(id) || n.node_id() == Some(id))
    }
}

/// One node of the `@graph`.
#[derive(Debug, Clone)]
pub struct GraphNode {
    index: usize,
    properties: Map<String, Value>,
}

impl GraphNode {
    /// Position of this node in the `@graph` array
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// The node type from `type` or `@type`
    #[must_use]
    pub fn node_type(&self) -> Option<&str> {
        self.str_prop("type").or_else(|| self.str_prop("@type"))
    }

    #[must_use]
    pub fn spdx_id(&self) -> Option<&str> {
        self.str_prop("spdxId")
    }

    /// The node's `@id`, used by blank nodes such as `CreationInfo`
    #[must_use]
    pub fn node_id(&self) -> Option<&str> {
        self.str_prop("@id")
    }

    /// The id other nodes refer to this node by
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.spdx_id().or_else(|| self.node_id())
    }

    /// A human readable label for messages: the identifier, or the index
    #[must_use]
    pub fn label(&self) -> String {
        match (self.identifier(), self.node_type()) {
            (Some(id), _) => id.to_string(),
            (None, Some(t)) => format!("{t} at @graph[{}]", self.index),
            (None, None) => format!("@graph[{}]", self.index),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    #[must_use]
    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// String values of a property that may be a single value or an array.
    ///
    /// Inline objects contribute their `spdxId` or `@id`.
    #[must_use]
    pub fn references(&self, key: &str) -> Vec<&str> {
        fn reference(value: &Value) -> Option<&str> {
            match value {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj
                    .get("spdxId")
                    .or_else(|| obj.get("@id"))
                    .and_then(Value::as_str),
                _ => None,
            }
        }

        match self.properties.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(reference).collect(),
            Some(other) => reference(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Inline objects held by a property, such as `verifiedUsing`
    #[must_use]
    pub fn objects(&self, key: &str) -> Vec<&Map<String, Value>> {
        match self.properties.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
            Some(Value::Object(obj)) => vec![obj],
            _ => Vec::new(),
        }
    }
}

/// Parse a JSON-LD document from a string.
///
/// Fails when the input is not JSON, is not an object, or has no `@graph`
/// array. Individual graph entries that are not objects are skipped with a
/// warning.
pub fn parse_document(content: &str) -> Result<GraphDocument> {
    let value: Value = serde_json::from_str(content)?;
    from_value(value)
}

fn from_value(value: Value) -> Result<GraphDocument> {
    let Value::Object(mut root) = value else {
        return Err(DptError::parse(
            "JSON-LD document",
            ParseErrorKind::InvalidJson("expected a JSON object at the top level".to_string()),
        ));
    };

    let context = root.remove("@context").unwrap_or(Value::Null);
    let graph = match root.remove("@graph") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(DptError::parse(
                "JSON-LD document",
                ParseErrorKind::InvalidJson("@graph must be an array".to_string()),
            ))
        }
        None => return Err(DptError::missing_field("@graph", "JSON-LD document")),
    };

    let mut nodes = Vec::with_capacity(graph.len());
    for (index, item) in graph.into_iter().enumerate() {
        match item {
            Value::Object(properties) => nodes.push(GraphNode { index, properties }),
            other => tracing::warn!("Skipping @graph[{index}]: expected an object, found {other}"),
        }
    }

    tracing::debug!("Loaded {} graph nodes", nodes.len());
    Ok(GraphDocument { context, nodes })
}
