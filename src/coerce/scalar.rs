//! Scalar coercion for attribute fields.

use chrono::NaiveDate;

use super::data::Scalar;
use super::instance::Value;
use crate::schema::ValueType;

/// ISO-8601 calendar date, e.g. `2024-02-29`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Coerce a scalar into the given attribute type.
///
/// On failure the scalar is handed back so the caller can report it.
pub(crate) fn coerce_scalar(value_type: ValueType, scalar: Scalar) -> Result<Value, Scalar> {
    let coerced = match value_type {
        ValueType::String => {
            return Ok(Value::String(match scalar {
                Scalar::Str(s) => s,
                other => other.to_string(),
            }));
        }
        ValueType::Short => integer(&scalar).map(Value::Short),
        ValueType::Integer => integer(&scalar).map(Value::Integer),
        ValueType::Long => integer(&scalar).map(Value::Long),
        ValueType::Double => float(&scalar).map(Value::Double),
        ValueType::Float => float(&scalar).and_then(narrow).map(Value::Float),
        ValueType::Boolean => boolean(&scalar).map(Value::Boolean),
        ValueType::Date => date(&scalar).map(Value::Date),
        ValueType::Any => return Ok(Value::Any(scalar)),
    };
    coerced.ok_or(scalar)
}

fn integer<T: TryFrom<i64>>(scalar: &Scalar) -> Option<T> {
    let wide = match scalar {
        Scalar::Int(i) => *i,
        Scalar::Str(s) => s.trim().parse::<i64>().ok()?,
        Scalar::Bool(_) | Scalar::Float(_) => return None,
    };
    T::try_from(wide).ok()
}

fn float(scalar: &Scalar) -> Option<f64> {
    let x = match scalar {
        Scalar::Int(i) => *i as f64,
        Scalar::Float(x) => *x,
        Scalar::Str(s) => s.trim().parse::<f64>().ok()?,
        Scalar::Bool(_) => return None,
    };
    x.is_finite().then_some(x)
}

/// Narrow to `f32`, refusing values that overflow or underflow to zero.
fn narrow(x: f64) -> Option<f32> {
    let narrowed = x as f32;
    let representable = narrowed.is_finite() && (narrowed != 0.0 || x == 0.0);
    representable.then_some(narrowed)
}

fn boolean(scalar: &Scalar) -> Option<bool> {
    match scalar {
        Scalar::Bool(b) => Some(*b),
        Scalar::Str(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Scalar::Str(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn date(scalar: &Scalar) -> Option<NaiveDate> {
    let Scalar::Str(s) = scalar else {
        return None;
    };
    let s = s.trim();
    // chrono tolerates unpadded fields, the calendar-date form does not
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
