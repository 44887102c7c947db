use thiserror::Error;

use crate::content::ContentType;

/// Reasons a typed contract could not be built from a generic node.
///
/// Every variant aborts construction of the node in question; nothing is partially built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("cannot initialize {contract} from Node kind = {actual}")]
    KindMismatch {
        contract: &'static str,
        expected: &'static str,
        actual: String,
    },
    #[error("no value provided for \"{field}\" in {contract}")]
    MissingRequiredField {
        contract: &'static str,
        field: &'static str,
    },
    #[error("{given} is not a valid value for {contract}::{enum_name}. Must be one of: {}", .allowed.join(", "))]
    InvalidEnumValue {
        contract: &'static str,
        field: &'static str,
        enum_name: &'static str,
        given: String,
        allowed: &'static [&'static str],
    },
    #[error("value for \"{field}\" in {contract} must be {expected}")]
    InvalidFieldValue {
        contract: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    #[error("invalid arguments for {command} command: requires a value for \"{argument}\"")]
    MissingCommandArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("{command} is not a recognized command name")]
    UnrecognizedCommand { command: String },
    #[error("{contract} does not declare a parameter named \"{param}\"")]
    UnknownParam {
        contract: &'static str,
        param: String,
    },
    #[error("no contract is registered for node kind {kind}")]
    UnknownKind { kind: String },
    #[error("node={node} cannot be a source")]
    NotASource { node: String },
    #[error("node={node} cannot be a target")]
    NotATarget { node: String },
    #[error("cannot connect node={node} to itself")]
    SelfConnection { node: String },
    #[error("node={node} does not have an {direction} named {port}")]
    UnknownPort {
        node: String,
        port: String,
        direction: &'static str,
    },
    #[error("incompatible types for edge with source={source_type} target={target_type}")]
    IncompatiblePorts {
        source_type: ContentType,
        target_type: ContentType,
    },
}
