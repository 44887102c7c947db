//! Automation command vocabulary.
//!
//! Every command carries a fixed set of required arguments. Times are integer
//! nanoseconds; values are plain numbers.

use std::fmt;

use nfgrapher_score::{Command, CommandArgs, Value};

use crate::error::ContractError;
use crate::json;

/// The five automation command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SetValueAtTime,
    LinearRampToValueAtTime,
    ExponentialRampToValueAtTime,
    SetTargetAtTime,
    SetValueCurveAtTime,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::SetValueAtTime,
        CommandKind::LinearRampToValueAtTime,
        CommandKind::ExponentialRampToValueAtTime,
        CommandKind::SetTargetAtTime,
        CommandKind::SetValueCurveAtTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::SetValueAtTime => SetValueAtTime::NAME,
            CommandKind::LinearRampToValueAtTime => LinearRampToValueAtTime::NAME,
            CommandKind::ExponentialRampToValueAtTime => ExponentialRampToValueAtTime::NAME,
            CommandKind::SetTargetAtTime => SetTargetAtTime::NAME,
            CommandKind::SetValueCurveAtTime => SetValueCurveAtTime::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads required arguments out of a command's argument bag.
pub struct ArgReader<'a> {
    command: &'static str,
    args: Option<&'a CommandArgs>,
}

impl<'a> ArgReader<'a> {
    pub fn new(command: &'static str, args: Option<&'a CommandArgs>) -> Self {
        Self { command, args }
    }

    fn extract<T>(
        &self,
        argument: &'static str,
        coerce: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, ContractError> {
        self.args
            .and_then(|args| args.get(argument))
            .and_then(coerce)
            .ok_or(ContractError::MissingCommandArgument {
                command: self.command,
                argument,
            })
    }

    pub fn number(&self, argument: &'static str) -> Result<f64, ContractError> {
        self.extract(argument, json::as_number)
    }

    /// Integer nanoseconds.
    pub fn time(&self, argument: &'static str) -> Result<i64, ContractError> {
        self.extract(argument, json::as_integer)
    }

    pub fn numbers(&self, argument: &'static str) -> Result<Vec<f64>, ContractError> {
        self.extract(argument, json::as_number_list)
    }
}

/// A typed automation command that can be read from, and written back to, a generic [`Command`].
pub trait AutomationCommand: Sized {
    const NAME: &'static str;

    fn from_args(args: &ArgReader<'_>) -> Result<Self, ContractError>;

    fn to_args(&self) -> CommandArgs;

    fn from_command(command: &Command) -> Result<Self, ContractError> {
        Self::from_args(&ArgReader::new(Self::NAME, command.args.as_ref()))
    }

    fn to_command(&self) -> Command {
        Command::new(Self::NAME, self.to_args())
    }
}

/// The parameter takes `value` at `start_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetValueAtTime {
    pub value: f64,
    pub start_time: i64,
}

impl AutomationCommand for SetValueAtTime {
    const NAME: &'static str = "setValueAtTime";

    fn from_args(args: &ArgReader<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            value: args.number("value")?,
            start_time: args.time("startTime")?,
        })
    }

    fn to_args(&self) -> CommandArgs {
        CommandArgs::from([
            ("value".to_string(), Value::from(self.value)),
            ("startTime".to_string(), Value::from(self.start_time)),
        ])
    }
}

/// Linear ramp from the previous event, reaching `value` at `end_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRampToValueAtTime {
    pub value: f64,
    pub end_time: i64,
}

impl AutomationCommand for LinearRampToValueAtTime {
    const NAME: &'static str = "linearRampToValueAtTime";

    fn from_args(args: &ArgReader<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            value: args.number("value")?,
            end_time: args.time("endTime")?,
        })
    }

    fn to_args(&self) -> CommandArgs {
        CommandArgs::from([
            ("value".to_string(), Value::from(self.value)),
            ("endTime".to_string(), Value::from(self.end_time)),
        ])
    }
}

/// Exponential ramp from the previous event, reaching `value` at `end_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialRampToValueAtTime {
    pub value: f64,
    pub end_time: i64,
}

impl AutomationCommand for ExponentialRampToValueAtTime {
    const NAME: &'static str = "exponentialRampToValueAtTime";

    fn from_args(args: &ArgReader<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            value: args.number("value")?,
            end_time: args.time("endTime")?,
        })
    }

    fn to_args(&self) -> CommandArgs {
        CommandArgs::from([
            ("value".to_string(), Value::from(self.value)),
            ("endTime".to_string(), Value::from(self.end_time)),
        ])
    }
}

/// Exponential approach toward `target` from `start_time`, decaying with `time_constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetTargetAtTime {
    pub target: f64,
    pub start_time: i64,
    pub time_constant: f64,
}

impl AutomationCommand for SetTargetAtTime {
    const NAME: &'static str = "setTargetAtTime";

    fn from_args(args: &ArgReader<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            target: args.number("target")?,
            start_time: args.time("startTime")?,
            time_constant: args.number("timeConstant")?,
        })
    }

    fn to_args(&self) -> CommandArgs {
        CommandArgs::from([
            ("target".to_string(), Value::from(self.target)),
            ("startTime".to_string(), Value::from(self.start_time)),
            ("timeConstant".to_string(), Value::from(self.time_constant)),
        ])
    }
}

/// Plays back `values` over `[start_time, start_time + duration)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetValueCurveAtTime {
    pub values: Vec<f64>,
    pub start_time: i64,
    pub duration: i64,
}

impl AutomationCommand for SetValueCurveAtTime {
    const NAME: &'static str = "setValueCurveAtTime";

    fn from_args(args: &ArgReader<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            values: args.numbers("values")?,
            start_time: args.time("startTime")?,
            duration: args.time("duration")?,
        })
    }

    fn to_args(&self) -> CommandArgs {
        CommandArgs::from([
            ("values".to_string(), json::number_list(&self.values)),
            ("startTime".to_string(), Value::from(self.start_time)),
            ("duration".to_string(), Value::from(self.duration)),
        ])
    }
}
