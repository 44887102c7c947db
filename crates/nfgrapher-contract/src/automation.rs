//! Reference evaluation of automation events.
//!
//! [`AutomationTimeline`] is a minimal [`AudioParamTarget`] that records replayed events
//! and answers "what is the value at time t". Rendering engines ship their own
//! implementation; this one follows the Web Audio `AudioParam` rules and is used to check
//! that replayed commands produce the expected trajectory.

use crate::param::AudioParamTarget;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Set {
        time: f64,
        value: f64,
    },
    LinearRamp {
        time: f64,
        value: f64,
    },
    ExponentialRamp {
        time: f64,
        value: f64,
    },
    Target {
        time: f64,
        target: f64,
        time_constant: f64,
    },
    Curve {
        time: f64,
        duration: f64,
        values: Vec<f64>,
    },
}

impl Event {
    fn time(&self) -> f64 {
        match self {
            Event::Set { time, .. }
            | Event::LinearRamp { time, .. }
            | Event::ExponentialRamp { time, .. }
            | Event::Target { time, .. }
            | Event::Curve { time, .. } => *time,
        }
    }
}

/// Exponential approach toward a target that is active until the next event.
#[derive(Debug, Clone, Copy)]
struct Approach {
    start: f64,
    from: f64,
    target: f64,
    time_constant: f64,
}

impl Approach {
    fn value_at(&self, time: f64) -> f64 {
        if self.time_constant <= 0.0 {
            return self.target;
        }
        let elapsed = (time - self.start).max(0.0);
        self.target + (self.from - self.target) * (-elapsed / self.time_constant).exp()
    }
}

/// Time-ordered automation events over an initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomationTimeline {
    initial_value: f64,
    events: Vec<Event>,
}

impl AutomationTimeline {
    pub fn new(initial_value: f32) -> Self {
        Self {
            initial_value: f64::from(initial_value),
            events: Vec::new(),
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    fn insert(&mut self, event: Event) {
        // Events at the same time keep insertion order.
        let index = self
            .events
            .partition_point(|existing| existing.time() <= event.time());
        self.events.insert(index, event);
    }

    /// Value of the parameter at `time` seconds.
    pub fn value_for_time(&self, time: f64) -> f32 {
        let mut value = self.initial_value;
        let mut last_time = 0.0;
        let mut approach: Option<Approach> = None;

        for event in &self.events {
            let settled = |approach: &Option<Approach>, value: f64, at: f64| {
                approach.map_or(value, |approach| approach.value_at(at))
            };
            match event {
                Event::Set { time: at, value: v } => {
                    if *at > time {
                        break;
                    }
                    value = *v;
                    last_time = *at;
                    approach = None;
                }
                Event::LinearRamp { time: end, value: v } => {
                    let from = settled(&approach, value, last_time);
                    if *end > time {
                        if time < last_time {
                            break;
                        }
                        let span = end - last_time;
                        let frac = if span > 0.0 { (time - last_time) / span } else { 1.0 };
                        return (from + (v - from) * frac) as f32;
                    }
                    value = *v;
                    last_time = *end;
                    approach = None;
                }
                Event::ExponentialRamp { time: end, value: v } => {
                    let from = settled(&approach, value, last_time);
                    if *end > time {
                        if time < last_time {
                            break;
                        }
                        // Ramps across zero or between opposite signs hold the start value.
                        if from == 0.0 || from * v <= 0.0 {
                            return from as f32;
                        }
                        let span = end - last_time;
                        let frac = if span > 0.0 { (time - last_time) / span } else { 1.0 };
                        return (from * (v / from).powf(frac)) as f32;
                    }
                    value = *v;
                    last_time = *end;
                    approach = None;
                }
                Event::Target {
                    time: at,
                    target,
                    time_constant,
                } => {
                    if *at > time {
                        break;
                    }
                    value = settled(&approach, value, *at);
                    last_time = *at;
                    approach = Some(Approach {
                        start: *at,
                        from: value,
                        target: *target,
                        time_constant: *time_constant,
                    });
                }
                Event::Curve {
                    time: at,
                    duration,
                    values,
                } => {
                    if *at > time {
                        break;
                    }
                    approach = None;
                    let Some(last) = values.last() else {
                        continue;
                    };
                    let end = at + duration;
                    if time < end && *duration > 0.0 {
                        return curve_value(values, (time - at) / duration) as f32;
                    }
                    value = *last;
                    last_time = end;
                }
            }
        }

        approach.map_or(value, |approach| approach.value_at(time)) as f32
    }
}

fn curve_value(values: &[f64], position: f64) -> f64 {
    if values.len() == 1 {
        return values[0];
    }
    let scaled = position * (values.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(values.len() - 2);
    let frac = scaled - index as f64;
    values[index] + (values[index + 1] - values[index]) * frac
}

impl AudioParamTarget for AutomationTimeline {
    fn set_value_at_time(&mut self, value: f32, start_time: f64) {
        self.insert(Event::Set {
            time: start_time,
            value: f64::from(value),
        });
    }

    fn set_target_at_time(&mut self, target: f32, start_time: f64, time_constant: f32) {
        self.insert(Event::Target {
            time: start_time,
            target: f64::from(target),
            time_constant: f64::from(time_constant),
        });
    }

    fn set_value_curve_at_time(&mut self, values: &[f32], start_time: f64, duration: f64) {
        self.insert(Event::Curve {
            time: start_time,
            duration,
            values: values.iter().map(|v| f64::from(*v)).collect(),
        });
    }

    fn linear_ramp_to_value_at_time(&mut self, value: f32, end_time: f64) {
        self.insert(Event::LinearRamp {
            time: end_time,
            value: f64::from(value),
        });
    }

    fn exponential_ramp_to_value_at_time(&mut self, value: f32, end_time: f64) {
        self.insert(Event::ExponentialRamp {
            time: end_time,
            value: f64::from(value),
        });
    }
}
