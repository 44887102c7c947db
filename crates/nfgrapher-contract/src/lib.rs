//! Typed contracts over generic score nodes.
//!
//! Every known node kind has a struct in [`nodes`] that validates a generic
//! [`Node`](nfgrapher_score::Node): the kind must match, required config fields must be
//! present, enum literals must belong to their closed set and every automation command
//! must carry its arguments. [`TypedNode`] is the closed sum over all kinds.
//!
//! Automation is modelled by [`AudioParamInfo`], which can be replayed onto any engine
//! parameter implementing [`AudioParamTarget`] with [`add_commands`].
//!
//! ```
//! use nfgrapher_contract::{GainNode, TypedNode};
//! use nfgrapher_score::Node;
//!
//! let node = Node::new("gain-1", GainNode::KIND);
//! let typed = TypedNode::from_node(&node).unwrap();
//! assert_eq!(typed.name(), "gain");
//! ```

pub mod automation;
pub mod content;
mod edge;
pub mod enums;
pub mod error;
mod json;
pub mod nodes;
pub mod options;
pub mod param;
mod registry;
pub mod schema;

pub use automation::AutomationTimeline;
pub use content::{ContentType, Port, PortMap};
pub use enums::{ContractEnum, DetectionMode, FilterType, KneeMode};
pub use error::ContractError;
pub use nodes::{
    CompanderNode, CompressorNode, DelayNode, Eq3bandNode, ExpanderNode, FileNode, FilterNode,
    GainNode, LoopNode, NodeKind, NoiseNode, SilenceNode, SineNode, StretchNode, TypedNode,
};
pub use options::{ContractOptions, UnknownParamPolicy};
pub use param::{
    add_commands, nanos_to_seconds, AudioParamBuilder, AudioParamInfo, AudioParamTarget,
    AutomationCommand, CommandKind, ExponentialRampToValueAtTime, LinearRampToValueAtTime,
    ParamInfo, SetTargetAtTime, SetValueAtTime, SetValueCurveAtTime, NANOS_PER_SECOND,
};
pub use registry::{type_nodes, TypedGraph};
pub use schema::{ConfigField, ConfigSpec, FieldType, NodeReader, NodeSchema, ParamSpec};

/// Parses `data` as a score and checks that every typed node survives a trip through its
/// generic form.
#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_type_score(data: &[u8]) {
    let Ok(score) = nfgrapher_score::parse_score(data) else {
        return;
    };
    for (_, typed) in type_nodes(&score.graph, &ContractOptions::default()) {
        if let Ok(typed) = typed {
            let generic = typed.to_node();
            let retyped = TypedNode::from_node(&generic).expect("projected node retypes");
            assert_eq!(typed, retyped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_thread_safe() {
        assert_send_sync::<TypedNode>();
        assert_send_sync::<TypedGraph>();
        assert_send_sync::<AudioParamInfo>();
        assert_send_sync::<ContractError>();
    }

    #[test]
    fn fuzz_harness_accepts_typed_scores() {
        fuzz_type_score(
            br#"{
                "version": "1.2.12",
                "graph": {
                    "id": "g",
                    "nodes": [
                        { "id": "c", "kind": "com.nativeformat.plugin.compressor.compressor",
                          "config": { "kneeMode": "soft", "cutoffs": [200, 1000] } }
                    ]
                }
            }"#,
        );
        fuzz_type_score(b"not json");
    }
}
