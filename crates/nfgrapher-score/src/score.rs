use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::load::ScoreError;
use crate::version::Version;

/// Free-form configuration attached to a node, keyed by field name.
pub type ConfigMap = BTreeMap<String, Value>;

/// Loosely typed arguments of an automation [`Command`].
pub type CommandArgs = BTreeMap<String, Value>;

/// Automation command lists keyed by parameter name.
pub type ParamMap = BTreeMap<String, Vec<Command>>;

/// Top-level score document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Routing graph described by the score.
    pub graph: Graph,
    /// Version of the score format the document was written against.
    pub version: String,
}

impl Score {
    /// Wraps a graph in a score stamped with [`Version::CURRENT`].
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            version: Version::CURRENT.to_string(),
        }
    }

    /// Parses the `version` string.
    pub fn parsed_version(&self) -> Result<Version, ScoreError> {
        self.version.parse()
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Controls when a graph or node is considered ready for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadingPolicy {
    #[default]
    AllContentPlaythrough,
    SomeContentPlaythrough,
}

/// Collection of nodes, edges and scripts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_policy: Option<LoadingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<Script>>,
}

impl Graph {
    /// Creates an empty graph with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Nodes in declaration order; empty when the document omits them.
    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_deref().unwrap_or_default()
    }

    pub fn edges(&self) -> &[Edge] {
        self.edges.as_deref().unwrap_or_default()
    }

    pub fn scripts(&self) -> &[Script] {
        self.scripts.as_deref().unwrap_or_default()
    }

    /// Looks up a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes().iter().find(|node| node.id == id)
    }
}

/// Untyped node. `kind` selects the contract used to interpret `config` and `params`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_policy: Option<LoadingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigMap>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Parses a standalone node document.
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the raw config value stored under `key`.
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.as_ref().and_then(|config| config.get(key))
    }

    /// Returns the command list declared for the parameter `name`.
    pub fn param_commands(&self, name: &str) -> Option<&[Command]> {
        self.params
            .as_ref()
            .and_then(|params| params.get(name))
            .map(Vec::as_slice)
    }
}

/// Connection between two nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<String>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_port: None,
            target_port: None,
        }
    }

    pub fn with_ports(mut self, source_port: impl Into<String>, target_port: impl Into<String>) -> Self {
        self.source_port = Some(source_port.into());
        self.target_port = Some(target_port.into());
        self
    }
}

/// Untyped automation instruction attached to a named parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<CommandArgs>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: CommandArgs) -> Self {
        Self {
            name: name.into(),
            args: Some(args),
        }
    }

    /// Returns the argument stored under `key`.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.as_ref().and_then(|args| args.get(key))
    }
}

/// Opaque script attached to a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub code: String,
}
