use serde::{Deserialize, Serialize};

/// What to do with `params` entries a contract does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownParamPolicy {
    /// Skip them. Lets older readers accept scores written for newer node versions.
    #[default]
    Ignore,
    /// Fail construction with [`ContractError::UnknownParam`](crate::ContractError::UnknownParam).
    Reject,
}

/// Knobs for contract construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractOptions {
    pub unknown_params: UnknownParamPolicy,
}

impl ContractOptions {
    pub fn strict() -> Self {
        Self {
            unknown_params: UnknownParamPolicy::Reject,
        }
    }
}
