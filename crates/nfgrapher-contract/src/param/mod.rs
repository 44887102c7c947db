//! Typed automation parameters.

pub mod command;
pub mod replay;

use nfgrapher_score::Command;

pub use command::{
    ArgReader, AutomationCommand, CommandKind, ExponentialRampToValueAtTime,
    LinearRampToValueAtTime, SetTargetAtTime, SetValueAtTime, SetValueCurveAtTime,
};
pub use replay::{add_commands, nanos_to_seconds, AudioParamTarget, NANOS_PER_SECOND};

use crate::error::ContractError;

/// A parameter with an initial value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInfo<T> {
    initial_value: T,
}

impl<T> ParamInfo<T> {
    pub fn new(initial_value: T) -> Self {
        Self { initial_value }
    }

    pub fn initial_value(&self) -> &T {
        &self.initial_value
    }
}

/// A numeric parameter whose value changes over time through automation commands.
///
/// Commands are bucketed by kind. Within a bucket they keep the order in which they were
/// declared; no time ordering or overlap checks are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioParamInfo {
    param: ParamInfo<f64>,
    set_value_at_time: Vec<SetValueAtTime>,
    linear_ramp_to_value_at_time: Vec<LinearRampToValueAtTime>,
    exponential_ramp_to_value_at_time: Vec<ExponentialRampToValueAtTime>,
    set_target_at_time: Vec<SetTargetAtTime>,
    set_value_curve_at_time: Vec<SetValueCurveAtTime>,
}

impl AudioParamInfo {
    /// A parameter holding `initial_value` with no automation.
    pub fn new(initial_value: f64) -> Self {
        Self {
            param: ParamInfo::new(initial_value),
            set_value_at_time: Vec::new(),
            linear_ramp_to_value_at_time: Vec::new(),
            exponential_ramp_to_value_at_time: Vec::new(),
            set_target_at_time: Vec::new(),
            set_value_curve_at_time: Vec::new(),
        }
    }

    /// Validates every generic command and files it into the bucket matching its name.
    pub fn from_commands(initial_value: f64, commands: &[Command]) -> Result<Self, ContractError> {
        let mut param = Self::new(initial_value);
        for command in commands {
            let kind = CommandKind::from_name(&command.name).ok_or_else(|| {
                ContractError::UnrecognizedCommand {
                    command: command.name.clone(),
                }
            })?;
            match kind {
                CommandKind::SetValueAtTime => param
                    .set_value_at_time
                    .push(SetValueAtTime::from_command(command)?),
                CommandKind::LinearRampToValueAtTime => param
                    .linear_ramp_to_value_at_time
                    .push(LinearRampToValueAtTime::from_command(command)?),
                CommandKind::ExponentialRampToValueAtTime => param
                    .exponential_ramp_to_value_at_time
                    .push(ExponentialRampToValueAtTime::from_command(command)?),
                CommandKind::SetTargetAtTime => param
                    .set_target_at_time
                    .push(SetTargetAtTime::from_command(command)?),
                CommandKind::SetValueCurveAtTime => param
                    .set_value_curve_at_time
                    .push(SetValueCurveAtTime::from_command(command)?),
            }
        }
        Ok(param)
    }

    pub fn builder(initial_value: f64) -> AudioParamBuilder {
        AudioParamBuilder {
            param: Self::new(initial_value),
        }
    }

    pub fn initial_value(&self) -> f64 {
        *self.param.initial_value()
    }

    pub fn set_value_at_time_commands(&self) -> &[SetValueAtTime] {
        &self.set_value_at_time
    }

    pub fn linear_ramp_to_value_at_time_commands(&self) -> &[LinearRampToValueAtTime] {
        &self.linear_ramp_to_value_at_time
    }

    pub fn exponential_ramp_to_value_at_time_commands(&self) -> &[ExponentialRampToValueAtTime] {
        &self.exponential_ramp_to_value_at_time
    }

    pub fn set_target_at_time_commands(&self) -> &[SetTargetAtTime] {
        &self.set_target_at_time
    }

    pub fn set_value_curve_at_time_commands(&self) -> &[SetValueCurveAtTime] {
        &self.set_value_curve_at_time
    }

    pub fn command_count(&self) -> usize {
        self.set_value_at_time.len()
            + self.linear_ramp_to_value_at_time.len()
            + self.exponential_ramp_to_value_at_time.len()
            + self.set_target_at_time.len()
            + self.set_value_curve_at_time.len()
    }

    pub fn has_commands(&self) -> bool {
        self.command_count() > 0
    }

    /// Generic commands in replay order (see [`add_commands`]).
    pub fn to_commands(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.command_count());
        commands.extend(self.set_value_at_time.iter().map(AutomationCommand::to_command));
        commands.extend(self.set_target_at_time.iter().map(AutomationCommand::to_command));
        commands.extend(
            self.set_value_curve_at_time
                .iter()
                .map(AutomationCommand::to_command),
        );
        commands.extend(
            self.linear_ramp_to_value_at_time
                .iter()
                .map(AutomationCommand::to_command),
        );
        commands.extend(
            self.exponential_ramp_to_value_at_time
                .iter()
                .map(AutomationCommand::to_command),
        );
        commands
    }
}

/// Programmatic construction of an [`AudioParamInfo`].
#[derive(Debug, Clone)]
pub struct AudioParamBuilder {
    param: AudioParamInfo,
}

impl AudioParamBuilder {
    pub fn set_value_at_time(mut self, value: f64, start_time: i64) -> Self {
        self.param
            .set_value_at_time
            .push(SetValueAtTime { value, start_time });
        self
    }

    pub fn linear_ramp_to_value_at_time(mut self, value: f64, end_time: i64) -> Self {
        self.param
            .linear_ramp_to_value_at_time
            .push(LinearRampToValueAtTime { value, end_time });
        self
    }

    pub fn exponential_ramp_to_value_at_time(mut self, value: f64, end_time: i64) -> Self {
        self.param
            .exponential_ramp_to_value_at_time
            .push(ExponentialRampToValueAtTime { value, end_time });
        self
    }

    pub fn set_target_at_time(mut self, target: f64, start_time: i64, time_constant: f64) -> Self {
        self.param.set_target_at_time.push(SetTargetAtTime {
            target,
            start_time,
            time_constant,
        });
        self
    }

    pub fn set_value_curve_at_time(
        mut self,
        values: impl Into<Vec<f64>>,
        start_time: i64,
        duration: i64,
    ) -> Self {
        self.param.set_value_curve_at_time.push(SetValueCurveAtTime {
            values: values.into(),
            start_time,
            duration,
        });
        self
    }

    pub fn build(self) -> AudioParamInfo {
        self.param
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn commands(value: serde_json::Value) -> Vec<Command> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn plain_param_has_no_commands() {
        let info = ParamInfo::new(0.25_f64);
        assert_eq!(*info.initial_value(), 0.25);

        let audio = AudioParamInfo::new(1.0);
        assert_eq!(audio.initial_value(), 1.0);
        assert!(!audio.has_commands());
    }

    #[test]
    fn commands_are_bucketed_in_declaration_order() {
        let list = commands(json!([
            { "name": "setValueAtTime", "args": { "value": 1.0, "startTime": 300 } },
            { "name": "linearRampToValueAtTime", "args": { "value": 2.0, "endTime": 400 } },
            { "name": "setValueAtTime", "args": { "value": 3.0, "startTime": 100 } },
            { "name": "setTargetAtTime", "args": { "target": 0.5, "startTime": 0, "timeConstant": 0.1 } }
        ]));
        let param = AudioParamInfo::from_commands(0.0, &list).unwrap();
        assert_eq!(
            param.set_value_at_time_commands(),
            &[
                SetValueAtTime {
                    value: 1.0,
                    start_time: 300
                },
                SetValueAtTime {
                    value: 3.0,
                    start_time: 100
                },
            ]
        );
        assert_eq!(param.linear_ramp_to_value_at_time_commands().len(), 1);
        assert_eq!(param.set_target_at_time_commands().len(), 1);
        assert!(param.exponential_ramp_to_value_at_time_commands().is_empty());
        assert_eq!(param.command_count(), 4);
    }

    #[test]
    fn unknown_command_names_fail() {
        let list = commands(json!([{ "name": "jumpToValue", "args": {} }]));
        assert_eq!(
            AudioParamInfo::from_commands(0.0, &list),
            Err(ContractError::UnrecognizedCommand {
                command: "jumpToValue".to_string()
            })
        );
    }

    #[test]
    fn missing_argument_aborts_construction() {
        let list = commands(json!([
            { "name": "setValueAtTime", "args": { "value": 24, "startTime": 0 } },
            { "name": "exponentialRampToValueAtTime", "args": { "value": 0, "BAD_KEY": 15e9 } }
        ]));
        let err = AudioParamInfo::from_commands(0.0, &list).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid arguments for exponentialRampToValueAtTime command: requires a value for \"endTime\""
        );
    }

    #[test]
    fn builder_output_reparses_identically() {
        let param = AudioParamInfo::builder(1.0)
            .set_value_at_time(0.5, 0)
            .linear_ramp_to_value_at_time(1.0, 1_000)
            .exponential_ramp_to_value_at_time(0.01, 2_000)
            .set_target_at_time(0.2, 3_000, 0.5)
            .set_value_curve_at_time(vec![0.0, 1.0], 4_000, 1_000)
            .build();
        let generic = param.to_commands();
        let names: Vec<&str> = generic.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "setValueAtTime",
                "setTargetAtTime",
                "setValueCurveAtTime",
                "linearRampToValueAtTime",
                "exponentialRampToValueAtTime",
            ]
        );
        assert_eq!(AudioParamInfo::from_commands(1.0, &generic), Ok(param));
    }
}
