//! Shape verification helpers for JSON server responses.
//!
//! Every helper fails with [`CatmaidError::Validation`]. Property and array
//! helpers prefix inner failures with the property name or element index, so
//! the final message reads as a path to the offending value:
//!
//! ```text
//! error parsing "mirrors": error parsing element 0: missing property "tile_width"
//! ```

use serde_json::{Map, Value};

use crate::error::{CatmaidError, Result};

/// Longest excerpt of an offending value quoted in error messages.
const MAX_EXCERPT_LEN: usize = 64;

fn excerpt(value: &Value) -> String {
    let mut text = value.to_string();
    if text.len() > MAX_EXCERPT_LEN {
        let mut end = MAX_EXCERPT_LEN;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("...");
    }
    text
}

fn mismatch(expected: &str, value: &Value) -> CatmaidError {
    CatmaidError::Validation(format!("expected {}, received {}", expected, excerpt(value)))
}

fn nest(context: String, err: CatmaidError) -> CatmaidError {
    match err {
        CatmaidError::Validation(msg) => {
            CatmaidError::Validation(format!("error parsing {}: {}", context, msg))
        }
        other => other,
    }
}

/// Requires `value` to be a JSON object.
pub fn verify_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch("JSON object", value))
}

/// Looks up a required property and parses it with `parse`.
pub fn verify_object_property<'a, T>(
    obj: &'a Map<String, Value>,
    name: &str,
    parse: impl FnOnce(&'a Value) -> Result<T>,
) -> Result<T> {
    let value = obj
        .get(name)
        .ok_or_else(|| CatmaidError::Validation(format!("missing property {:?}", name)))?;
    parse(value).map_err(|e| nest(format!("{:?}", name), e))
}

/// Requires an integral number.
///
/// Floats with no fractional part are accepted since JSON does not
/// distinguish the two.
pub fn verify_int(value: &Value) -> Result<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(mismatch("integer", value)),
    }
}

/// Requires a non-negative integer that fits in 32 bits.
pub fn verify_u32(value: &Value) -> Result<u32> {
    let n = verify_int(value)?;
    u32::try_from(n).map_err(|_| mismatch("non-negative 32-bit integer", value))
}

/// Requires any JSON number.
pub fn verify_float(value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| mismatch("number", value))
}

/// Requires a JSON string.
pub fn verify_string(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch("string", value))
}

/// Requires an array and parses every element with `parse`.
pub fn parse_array<'a, T>(
    value: &'a Value,
    mut parse: impl FnMut(&'a Value) -> Result<T>,
) -> Result<Vec<T>> {
    let items = value.as_array().ok_or_else(|| mismatch("array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse(item).map_err(|e| nest(format!("element {}", index), e)))
        .collect()
}

/// Parses a nested `{"x": .., "y": .., "z": ..}` object into an `(x, y, z)` triple.
pub fn parse_xyz<'a, T>(
    value: &'a Value,
    mut parse: impl FnMut(&'a Value) -> Result<T>,
) -> Result<[T; 3]> {
    let obj = verify_object(value)?;
    let x = verify_object_property(obj, "x", &mut parse)?;
    let y = verify_object_property(obj, "y", &mut parse)?;
    let z = verify_object_property(obj, "z", &mut parse)?;
    Ok([x, y, z])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_object_rejects_array() {
        let err = verify_object(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            CatmaidError::Validation("expected JSON object, received [1,2]".to_string())
        );
    }

    #[test]
    fn test_verify_int_accepts_integral_float() {
        assert_eq!(verify_int(&json!(5)).unwrap(), 5);
        assert_eq!(verify_int(&json!(5.0)).unwrap(), 5);
        assert!(verify_int(&json!(5.5)).is_err());
        assert!(verify_int(&json!("5")).is_err());
    }

    #[test]
    fn test_verify_u32_rejects_negative() {
        assert_eq!(verify_u32(&json!(256)).unwrap(), 256);
        assert!(verify_u32(&json!(-1)).is_err());
    }

    #[test]
    fn test_verify_float_accepts_integers() {
        assert_eq!(verify_float(&json!(4)).unwrap(), 4.0);
        assert_eq!(verify_float(&json!(3.5)).unwrap(), 3.5);
        assert!(verify_float(&json!(null)).is_err());
    }

    #[test]
    fn test_missing_property_is_named() {
        let value = json!({"title": "a"});
        let obj = verify_object(&value).unwrap();
        let err = verify_object_property(obj, "id", verify_int).unwrap_err();
        assert_eq!(err.to_string(), "missing property \"id\"");
    }

    #[test]
    fn test_nested_errors_carry_path() {
        let value = json!({"items": [{"n": 1}, {"n": "two"}]});
        let obj = verify_object(&value).unwrap();
        let err = verify_object_property(obj, "items", |items| {
            parse_array(items, |item| {
                verify_object_property(verify_object(item)?, "n", verify_int)
            })
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "error parsing \"items\": error parsing element 1: error parsing \"n\": expected integer, received \"two\""
        );
    }

    #[test]
    fn test_parse_xyz() {
        let triple = parse_xyz(&json!({"x": 1, "y": 2, "z": 3, "w": 9}), verify_int).unwrap();
        assert_eq!(triple, [1, 2, 3]);

        let err = parse_xyz(&json!({"x": 1, "y": 2}), verify_int).unwrap_err();
        assert!(err.to_string().contains("\"z\""));
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "a".repeat(200);
        let err = verify_int(&json!(long)).unwrap_err();
        assert!(err.to_string().ends_with("..."));
        assert!(err.to_string().len() < 120);
    }
}
