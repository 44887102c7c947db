//! Kind dispatch and whole-graph typing.

use std::fmt;

use nfgrapher_score::{Edge, Graph, LoadingPolicy, Node, Script};

use crate::content::PortMap;
use crate::error::ContractError;
use crate::nodes::{NodeKind, TypedNode};
use crate::options::ContractOptions;
use crate::schema::NodeSchema;

impl NodeKind {
    /// Fully qualified kind identifier, e.g. `com.nativeformat.plugin.waa.gain`.
    pub fn kind(self) -> &'static str {
        self.schema().kind
    }

    /// Short name, e.g. `gain`.
    pub fn name(self) -> &'static str {
        self.schema().name
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl TypedNode {
    pub fn from_node(node: &Node) -> Result<Self, ContractError> {
        Self::from_node_with(node, &ContractOptions::default())
    }

    pub fn schema(&self) -> &'static NodeSchema {
        self.node_kind().schema()
    }

    pub fn kind(&self) -> &'static str {
        self.schema().kind
    }

    pub fn name(&self) -> &'static str {
        self.schema().name
    }

    pub fn inputs(&self) -> PortMap {
        self.schema().inputs
    }

    pub fn outputs(&self) -> PortMap {
        self.schema().outputs
    }
}

impl TryFrom<&Node> for TypedNode {
    type Error = ContractError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        Self::from_node(node)
    }
}

/// Types each node of `graph` independently, in declaration order.
///
/// The yielded nodes borrow from `graph` only; `options` is copied.
pub fn type_nodes<'a>(
    graph: &'a Graph,
    options: &ContractOptions,
) -> impl Iterator<Item = (&'a Node, Result<TypedNode, ContractError>)> + 'a {
    let options = *options;
    graph
        .nodes()
        .iter()
        .map(move |node| (node, TypedNode::from_node_with(node, &options)))
}

/// A graph whose nodes of known kinds have been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedGraph {
    pub id: String,
    pub loading_policy: LoadingPolicy,
    pub nodes: Vec<TypedNode>,
    /// Ids of nodes whose kind has no contract.
    pub untyped: Vec<String>,
    pub edges: Vec<Edge>,
    pub scripts: Vec<Script>,
}

impl TypedGraph {
    /// Types every node with a known kind, stopping at the first contract failure.
    pub fn from_graph(graph: &Graph, options: &ContractOptions) -> Result<Self, ContractError> {
        let mut nodes = Vec::with_capacity(graph.nodes().len());
        let mut untyped = Vec::new();
        for (node, typed) in type_nodes(graph, options) {
            match typed {
                Ok(typed) => nodes.push(typed),
                Err(ContractError::UnknownKind { kind }) => {
                    tracing::debug!(node = %node.id, %kind, "no contract for node kind");
                    untyped.push(node.id.clone());
                }
                Err(err) => return Err(err),
            }
        }
        tracing::trace!(
            graph = %graph.id,
            typed = nodes.len(),
            untyped = untyped.len(),
            "typed graph"
        );
        Ok(Self {
            id: graph.id.clone(),
            loading_policy: graph.loading_policy.unwrap_or_default(),
            nodes,
            untyped,
            edges: graph.edges().to_vec(),
            scripts: graph.scripts().to_vec(),
        })
    }

    pub fn node(&self, id: &str) -> Option<&TypedNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }
}
