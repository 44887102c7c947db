//! Data-driven node contract descriptions and the generic reader that enforces them.
//!
//! Each contract declares a static [`NodeSchema`]. [`NodeReader`] interprets that schema
//! against a generic [`Node`]: it checks the kind, resolves config fields (applying
//! defaults before any parsing) and builds automation parameters. The per-kind structs
//! in [`crate::nodes`] are thin projections over the reader.

use std::collections::BTreeSet;

use nfgrapher_score::{LoadingPolicy, Node, Value};

use crate::content::PortMap;
use crate::enums::{ContractEnum, DetectionMode, FilterType, KneeMode};
use crate::error::ContractError;
use crate::json;
use crate::options::{ContractOptions, UnknownParamPolicy};
use crate::param::AudioParamInfo;

/// Shape of a config field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    /// Whole number; time fields are integer nanoseconds.
    Integer,
    NumberList,
    Enum {
        name: &'static str,
        literals: &'static [&'static str],
    },
}

impl FieldType {
    pub fn describe(self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Number => "a number",
            FieldType::Integer => "an integer",
            FieldType::NumberList => "a list of numbers",
            FieldType::Enum { .. } => "a string literal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSpec {
    pub key: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub default: f64,
}

/// Static description of one node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSchema {
    /// Contract type name used in error messages, e.g. `CompressorNode`.
    pub contract: &'static str,
    pub kind: &'static str,
    pub name: &'static str,
    pub inputs: PortMap,
    pub outputs: PortMap,
    pub config: &'static [ConfigSpec],
    pub params: &'static [ParamSpec],
}

impl NodeSchema {
    pub fn config_spec(&self, key: &str) -> Option<&ConfigSpec> {
        self.config.iter().find(|spec| spec.key == key)
    }

    pub fn param_spec(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.config
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.key)
    }
}

/// Why a present config value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    WrongType,
    NotInSet(String),
}

/// A Rust type that a config field can be read into.
pub trait ConfigField: Sized {
    const FIELD_TYPE: FieldType;

    fn parse(value: &Value) -> Result<Self, FieldError>;

    fn to_value(&self) -> Value;
}

impl ConfigField for String {
    const FIELD_TYPE: FieldType = FieldType::String;

    fn parse(value: &Value) -> Result<Self, FieldError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or(FieldError::WrongType)
    }

    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl ConfigField for f64 {
    const FIELD_TYPE: FieldType = FieldType::Number;

    fn parse(value: &Value) -> Result<Self, FieldError> {
        json::as_number(value).ok_or(FieldError::WrongType)
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ConfigField for i64 {
    const FIELD_TYPE: FieldType = FieldType::Integer;

    fn parse(value: &Value) -> Result<Self, FieldError> {
        json::as_integer(value).ok_or(FieldError::WrongType)
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ConfigField for Vec<f64> {
    const FIELD_TYPE: FieldType = FieldType::NumberList;

    fn parse(value: &Value) -> Result<Self, FieldError> {
        json::as_number_list(value).ok_or(FieldError::WrongType)
    }

    fn to_value(&self) -> Value {
        json::number_list(self)
    }
}

macro_rules! enum_config_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ConfigField for $ty {
                const FIELD_TYPE: FieldType = FieldType::Enum {
                    name: <$ty as ContractEnum>::NAME,
                    literals: <$ty as ContractEnum>::LITERALS,
                };

                fn parse(value: &Value) -> Result<Self, FieldError> {
                    let literal = value.as_str().ok_or(FieldError::WrongType)?;
                    <$ty>::from_literal(literal)
                        .ok_or_else(|| FieldError::NotInSet(literal.to_string()))
                }

                fn to_value(&self) -> Value {
                    Value::from(self.literal())
                }
            }
        )+
    };
}

enum_config_field!(DetectionMode, KneeMode, FilterType);

/// Validating view of a generic node through a [`NodeSchema`].
pub struct NodeReader<'a> {
    schema: &'static NodeSchema,
    node: &'a Node,
}

impl<'a> NodeReader<'a> {
    /// Checks the node's kind and undeclared params against `schema`.
    pub fn new(
        schema: &'static NodeSchema,
        node: &'a Node,
        options: &ContractOptions,
    ) -> Result<Self, ContractError> {
        if node.kind != schema.kind {
            return Err(ContractError::KindMismatch {
                contract: schema.contract,
                expected: schema.kind,
                actual: node.kind.clone(),
            });
        }

        if let Some(params) = &node.params {
            for name in params.keys() {
                if schema.param_spec(name).is_some() {
                    continue;
                }
                match options.unknown_params {
                    UnknownParamPolicy::Ignore => {
                        tracing::debug!(
                            node = %node.id,
                            contract = schema.contract,
                            param = %name,
                            "ignoring undeclared param"
                        );
                    }
                    UnknownParamPolicy::Reject => {
                        return Err(ContractError::UnknownParam {
                            contract: schema.contract,
                            param: name.clone(),
                        });
                    }
                }
            }
        }

        if let Some(config) = &node.config {
            let declared: BTreeSet<&str> = schema.config.iter().map(|spec| spec.key).collect();
            for key in config.keys().filter(|key| !declared.contains(key.as_str())) {
                tracing::debug!(
                    node = %node.id,
                    contract = schema.contract,
                    key = %key,
                    "ignoring undeclared config key"
                );
            }
        }

        Ok(Self { schema, node })
    }

    pub fn schema(&self) -> &'static NodeSchema {
        self.schema
    }

    pub fn id(&self) -> String {
        self.node.id.clone()
    }

    pub fn loading_policy(&self) -> LoadingPolicy {
        self.node.loading_policy.unwrap_or_default()
    }

    pub fn required<T: ConfigField>(&self, key: &'static str) -> Result<T, ContractError> {
        match self.node.config_value(key) {
            Some(value) => self.parse(key, value),
            None => Err(ContractError::MissingRequiredField {
                contract: self.schema.contract,
                field: key,
            }),
        }
    }

    pub fn optional<T: ConfigField>(&self, key: &'static str, default: T) -> Result<T, ContractError> {
        match self.node.config_value(key) {
            Some(value) => self.parse(key, value),
            None => Ok(default),
        }
    }

    pub fn param(&self, key: &'static str, default: f64) -> Result<AudioParamInfo, ContractError> {
        match self.node.param_commands(key) {
            Some(commands) => AudioParamInfo::from_commands(default, commands),
            None => Ok(AudioParamInfo::new(default)),
        }
    }

    fn parse<T: ConfigField>(&self, key: &'static str, value: &Value) -> Result<T, ContractError> {
        T::parse(value).map_err(|err| match (err, T::FIELD_TYPE) {
            (FieldError::NotInSet(given), FieldType::Enum { name, literals }) => {
                ContractError::InvalidEnumValue {
                    contract: self.schema.contract,
                    field: key,
                    enum_name: name,
                    given,
                    allowed: literals,
                }
            }
            (_, field_type) => ContractError::InvalidFieldValue {
                contract: self.schema.contract,
                field: key,
                expected: field_type.describe(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::content::Port;

    static TEST_SCHEMA: NodeSchema = NodeSchema {
        contract: "TestNode",
        kind: "com.example.test",
        name: "test",
        inputs: PortMap::EMPTY,
        outputs: PortMap::new(&[Port::audio("audio")]),
        config: &[
            ConfigSpec {
                key: "path",
                field_type: FieldType::String,
                required: true,
            },
            ConfigSpec {
                key: "mode",
                field_type: <KneeMode as ConfigField>::FIELD_TYPE,
                required: false,
            },
        ],
        params: &[ParamSpec {
            key: "level",
            default: 0.5,
        }],
    };

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn kind_must_match() {
        let n = node(json!({ "id": "n", "kind": "com.example.other" }));
        let err = NodeReader::new(&TEST_SCHEMA, &n, &ContractOptions::default())
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "cannot initialize TestNode from Node kind = com.example.other");
    }

    #[test]
    fn defaults_apply_only_when_absent() {
        let n = node(json!({ "id": "n", "kind": "com.example.test", "config": { "path": "a" } }));
        let reader = NodeReader::new(&TEST_SCHEMA, &n, &ContractOptions::default()).unwrap();
        assert_eq!(reader.required::<String>("path").unwrap(), "a");
        assert_eq!(reader.optional("mode", KneeMode::Hard).unwrap(), KneeMode::Hard);
        assert_eq!(reader.param("level", 0.5).unwrap(), AudioParamInfo::new(0.5));
        assert_eq!(reader.loading_policy(), LoadingPolicy::AllContentPlaythrough);
    }

    #[test]
    fn wrong_types_are_reported_with_expectation() {
        let n = node(json!({ "id": "n", "kind": "com.example.test", "config": { "path": 3, "mode": 1 } }));
        let reader = NodeReader::new(&TEST_SCHEMA, &n, &ContractOptions::default()).unwrap();
        assert_eq!(
            reader.required::<String>("path"),
            Err(ContractError::InvalidFieldValue {
                contract: "TestNode",
                field: "path",
                expected: "a string",
            })
        );
        assert_eq!(
            reader.optional("mode", KneeMode::Hard),
            Err(ContractError::InvalidFieldValue {
                contract: "TestNode",
                field: "mode",
                expected: "a string literal",
            })
        );
    }

    #[test]
    fn strict_policy_rejects_undeclared_params() {
        let n = node(json!({
            "id": "n",
            "kind": "com.example.test",
            "params": { "volume": [] }
        }));
        assert!(NodeReader::new(&TEST_SCHEMA, &n, &ContractOptions::default()).is_ok());
        assert_eq!(
            NodeReader::new(&TEST_SCHEMA, &n, &ContractOptions::strict()).err(),
            Some(ContractError::UnknownParam {
                contract: "TestNode",
                param: "volume".to_string(),
            })
        );
    }

    #[test]
    fn schema_lookups() {
        assert_eq!(TEST_SCHEMA.required_fields().collect::<Vec<_>>(), vec!["path"]);
        assert_eq!(TEST_SCHEMA.param_spec("level").map(|spec| spec.default), Some(0.5));
        assert!(TEST_SCHEMA.config_spec("missing").is_none());
    }
}
