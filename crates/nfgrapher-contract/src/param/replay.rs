//! Replaying typed commands onto a live parameter owned by a rendering engine.

use super::AudioParamInfo;

pub const NANOS_PER_SECOND: f64 = 1.0e9;

#[inline]
pub fn nanos_to_seconds(nanos: i64) -> f64 {
    nanos as f64 / NANOS_PER_SECOND
}

/// A live, engine-side parameter that accepts automation events. Times are in seconds.
pub trait AudioParamTarget {
    fn set_value_at_time(&mut self, value: f32, start_time: f64);
    fn set_target_at_time(&mut self, target: f32, start_time: f64, time_constant: f32);
    fn set_value_curve_at_time(&mut self, values: &[f32], start_time: f64, duration: f64);
    fn linear_ramp_to_value_at_time(&mut self, value: f32, end_time: f64);
    fn exponential_ramp_to_value_at_time(&mut self, value: f32, end_time: f64);
}

/// Replays every command of `info` onto `target`.
///
/// Buckets are replayed in a fixed order: set-at-time, set-target, value-curve, linear
/// ramp, exponential ramp. Engines rely on this order, so it must not change.
pub fn add_commands<P: AudioParamTarget + ?Sized>(target: &mut P, info: &AudioParamInfo) {
    for command in info.set_value_at_time_commands() {
        target.set_value_at_time(command.value as f32, nanos_to_seconds(command.start_time));
    }
    for command in info.set_target_at_time_commands() {
        target.set_target_at_time(
            command.target as f32,
            nanos_to_seconds(command.start_time),
            command.time_constant as f32,
        );
    }
    for command in info.set_value_curve_at_time_commands() {
        let values: Vec<f32> = command.values.iter().map(|v| *v as f32).collect();
        target.set_value_curve_at_time(
            &values,
            nanos_to_seconds(command.start_time),
            nanos_to_seconds(command.duration),
        );
    }
    for command in info.linear_ramp_to_value_at_time_commands() {
        target.linear_ramp_to_value_at_time(command.value as f32, nanos_to_seconds(command.end_time));
    }
    for command in info.exponential_ramp_to_value_at_time_commands() {
        target.exponential_ramp_to_value_at_time(
            command.value as f32,
            nanos_to_seconds(command.end_time),
        );
    }
}
