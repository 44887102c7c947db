//! Edges between typed nodes, checked against their port declarations.

use nfgrapher_score::Edge;
use uuid::Uuid;

use crate::error::ContractError;
use crate::nodes::TypedNode;

impl TypedNode {
    /// Connects this node's output to `target` without naming ports.
    pub fn connect_to_target(&self, target: &TypedNode) -> Result<Edge, ContractError> {
        self.check_endpoints(target)?;
        Ok(Edge::new(Uuid::new_v4().to_string(), self.id(), target.id()))
    }

    /// Connects `source` to this node.
    pub fn connect_to_source(&self, source: &TypedNode) -> Result<Edge, ContractError> {
        source.connect_to_target(self)
    }

    /// Connects a named output of this node to a named input of `target`.
    pub fn connect_ports(
        &self,
        target: &TypedNode,
        source_port: &str,
        target_port: &str,
    ) -> Result<Edge, ContractError> {
        self.check_endpoints(target)?;
        let source_type = self
            .outputs()
            .get(source_port)
            .ok_or_else(|| ContractError::UnknownPort {
                node: self.id().to_string(),
                port: source_port.to_string(),
                direction: "output",
            })?;
        let target_type = target
            .inputs()
            .get(target_port)
            .ok_or_else(|| ContractError::UnknownPort {
                node: target.id().to_string(),
                port: target_port.to_string(),
                direction: "input",
            })?;
        if source_type != target_type {
            return Err(ContractError::IncompatiblePorts {
                source_type,
                target_type,
            });
        }
        Ok(
            Edge::new(Uuid::new_v4().to_string(), self.id(), target.id())
                .with_ports(source_port, target_port),
        )
    }

    fn check_endpoints(&self, target: &TypedNode) -> Result<(), ContractError> {
        if self.outputs().is_empty() {
            return Err(ContractError::NotASource {
                node: self.id().to_string(),
            });
        }
        if target.inputs().is_empty() {
            return Err(ContractError::NotATarget {
                node: target.id().to_string(),
            });
        }
        if self.id() == target.id() {
            return Err(ContractError::SelfConnection {
                node: self.id().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::nodes::{CompressorNode, FileNode, GainNode, SineNode};

    #[test]
    fn sources_connect_to_processors() {
        let file = TypedNode::from(FileNode::new("file"));
        let gain = TypedNode::from(GainNode::new("gain"));
        let edge = file.connect_to_target(&gain).unwrap();
        assert_eq!(edge.source, "file");
        assert_eq!(edge.target, "gain");
        assert_eq!(edge.source_port, None);
        assert!(Uuid::parse_str(&edge.id).is_ok());

        let reverse = gain.connect_to_source(&file).unwrap();
        assert_eq!(reverse.source, "file");
        assert_ne!(reverse.id, edge.id);
    }

    #[test]
    fn generators_cannot_be_targets() {
        let gain = TypedNode::from(GainNode::new("gain"));
        let sine = TypedNode::from(SineNode::new("sine"));
        assert_eq!(
            gain.connect_to_target(&sine),
            Err(ContractError::NotATarget {
                node: "sine".to_string()
            })
        );
        assert_eq!(
            gain.connect_to_target(&gain),
            Err(ContractError::SelfConnection {
                node: "gain".to_string()
            })
        );
    }

    #[test]
    fn named_ports_must_exist() {
        let sine = TypedNode::from(SineNode::new("sine"));
        let compressor = TypedNode::from(CompressorNode::new("comp"));
        let edge = sine.connect_ports(&compressor, "audio", "sidechain").unwrap();
        assert_eq!(edge.target_port.as_deref(), Some("sidechain"));
        assert_eq!(
            sine.connect_ports(&compressor, "audio", "midi"),
            Err(ContractError::UnknownPort {
                node: "comp".to_string(),
                port: "midi".to_string(),
                direction: "input",
            })
        );
        assert_eq!(
            sine.connect_ports(&compressor, "left", "audio").unwrap_err().to_string(),
            "node=sine does not have an output named left"
        );
    }
}
