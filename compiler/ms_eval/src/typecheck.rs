//! Type-annotation checks at declaration, parameter and return boundaries.
//!
//! A check either accepts the value (possibly narrowing its representation
//! to the declared tag) or fails with a `TypeMismatch` naming the expected
//! annotation.

use crate::errors::{type_mismatch, EvalResult};
use crate::value::{TypeTag, Value};

/// Check `value` against `expected`, returning the value as stored under
/// that annotation.
///
/// Integer annotations accept integral floats because arithmetic is carried
/// out in `Float64`.
pub fn check_type(value: Value, expected: TypeTag) -> EvalResult {
    match expected {
        TypeTag::String => match value {
            Value::String(_) => Ok(value),
            other => Err(type_mismatch(expected, other.type_name())),
        },
        TypeTag::Char => narrow_char(value, expected),
        TypeTag::Int32 => {
            narrow_integer(&value, i64::from(i32::MIN), i64::from(i32::MAX), expected)
        }
        TypeTag::Int64 => narrow_integer(&value, i64::MIN, i64::MAX, expected),
        TypeTag::Float32 => widen_float(&value, expected).map(narrow_f32),
        TypeTag::Float64 => widen_float(&value, expected).map(Value::Float64),
    }
}

/// A `Char`, or a `String` holding exactly one character.
fn narrow_char(value: Value, expected: TypeTag) -> EvalResult {
    match value {
        Value::Char(_) => Ok(value),
        Value::String(ref s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(type_mismatch(
                    expected,
                    format!("String of length {}", s.chars().count()),
                )),
            }
        }
        other => Err(type_mismatch(expected, other.type_name())),
    }
}

fn narrow_integer(value: &Value, min: i64, max: i64, expected: TypeTag) -> EvalResult {
    let n = match value {
        Value::Integer(n) => *n,
        Value::Float32(_) | Value::Float64(_) => {
            let Some(f) = value.as_number() else {
                return Err(type_mismatch(expected, value.type_name()));
            };
            integral(f)
                .ok_or_else(|| type_mismatch(expected, format!("{} {f}", value.type_name())))?
        }
        other => return Err(type_mismatch(expected, other.type_name())),
    };
    if (min..=max).contains(&n) {
        Ok(Value::Integer(n))
    } else {
        Err(type_mismatch(expected, format!("Integer {n} (out of range)")))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "the value is checked to be integral and within i64 range first"
)]
fn integral(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then(|| f as i64)
}

fn widen_float(value: &Value, expected: TypeTag) -> EvalResult<f64> {
    value
        .as_number()
        .ok_or_else(|| type_mismatch(expected, value.type_name()))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Float32 annotations store single precision"
)]
fn narrow_f32(f: f64) -> Value {
    Value::Float32(f as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalError;
    use pretty_assertions::assert_eq;

    fn ok(value: Value, tag: TypeTag) -> Value {
        check_type(value, tag).unwrap_or_else(|e| panic!("unexpected error: {e}"))
    }

    #[test]
    fn string_accepts_only_strings() {
        assert_eq!(ok(Value::string("a"), TypeTag::String), Value::string("a"));
        assert!(matches!(
            check_type(Value::int(1), TypeTag::String),
            Err(EvalError::TypeMismatch { ref expected, ref found })
                if expected == "String" && found == "Integer"
        ));
    }

    #[test]
    fn char_accepts_single_characters() {
        assert_eq!(ok(Value::Char('a'), TypeTag::Char), Value::Char('a'));
        assert_eq!(ok(Value::string("z"), TypeTag::Char), Value::Char('z'));
        assert!(matches!(
            check_type(Value::string("ab"), TypeTag::Char),
            Err(EvalError::TypeMismatch { ref expected, ref found })
                if expected == "Char" && found == "String of length 2"
        ));
        assert!(check_type(Value::int(97), TypeTag::Char).is_err());
        assert!(check_type(Value::Char('a'), TypeTag::String).is_err());
    }

    #[test]
    fn integer_annotations_narrow_integral_floats() {
        assert_eq!(ok(Value::float(14.0), TypeTag::Int32), Value::int(14));
        assert_eq!(ok(Value::int(-3), TypeTag::Int64), Value::int(-3));
        assert!(check_type(Value::float(2.5), TypeTag::Int32).is_err());
        assert!(check_type(Value::Boolean(true), TypeTag::Int64).is_err());
    }

    #[test]
    fn int32_range_is_enforced() {
        assert!(check_type(Value::int(i64::from(i32::MAX) + 1), TypeTag::Int32).is_err());
        assert_eq!(
            ok(Value::int(i64::from(i32::MAX) + 1), TypeTag::Int64),
            Value::int(2_147_483_648)
        );
    }

    #[test]
    fn float_annotations_accept_any_number() {
        assert_eq!(ok(Value::int(2), TypeTag::Float64), Value::float(2.0));
        assert_eq!(ok(Value::float(0.5), TypeTag::Float32), Value::Float32(0.5));
        assert!(check_type(Value::string("1.0"), TypeTag::Float64).is_err());
    }
}
