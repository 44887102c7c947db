//! Coercions from loosely typed JSON values.

use serde_json::Value;

pub(crate) fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Integers may be written as `1000` or `1E9`; fractional values are rejected.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    if let Some(int) = value.as_i64() {
        return Some(int);
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

pub(crate) fn as_number_list(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(as_number).collect()
}

pub(crate) fn number_list(values: &[f64]) -> Value {
    Value::Array(values.iter().map(|v| Value::from(*v)).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_accept_integral_floats() {
        assert_eq!(as_integer(&json!(1000)), Some(1000));
        assert_eq!(as_integer(&json!(1e9)), Some(1_000_000_000));
        assert_eq!(as_integer(&json!(-1)), Some(-1));
        assert_eq!(as_integer(&json!(1.5)), None);
        assert_eq!(as_integer(&json!("1000")), None);
    }

    #[test]
    fn integers_reject_floats_outside_i64() {
        assert_eq!(as_integer(&json!(9.223372036854776e18)), None);
        assert_eq!(as_integer(&json!(-9.223372036854776e18)), Some(i64::MIN));
        assert_eq!(as_integer(&json!(9.3e18)), None);
    }

    #[test]
    fn number_lists_require_every_element_numeric() {
        assert_eq!(as_number_list(&json!([200.0, 1000])), Some(vec![200.0, 1000.0]));
        assert_eq!(as_number_list(&json!([])), Some(vec![]));
        assert_eq!(as_number_list(&json!([1, "2"])), None);
        assert_eq!(as_number_list(&json!(1)), None);
    }
}
