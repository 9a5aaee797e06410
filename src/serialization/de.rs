use std::collections::HashMap;
use std::sync::Arc;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde_json::{Number, Value as JsonValue};
use crate::Result;
use crate::data::{GenericRow, Row, Value};
use crate::error::Error;
use crate::types::{DataType, Fields};
use crate::{date_utils, datetime_utils};

/// Parses `text` and converts it to `data_type`. Without `coerce_scalars` every
/// JSON kind must match the declared type exactly.
pub(crate) fn decode_json(text: &str, data_type: &DataType, coerce_scalars: bool) -> Result<Value> {
    Error::check_field_names(data_type)?;
    let json: JsonValue = serde_json::from_str(text)?;
    json_value_to_value(json, data_type, coerce_scalars)
}

fn json_value_to_value(value: JsonValue, data_type: &DataType, coerce: bool) -> Result<Value> {
    match value {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(v) => match data_type {
            DataType::Boolean => Ok(Value::Boolean(v)),
            DataType::Int if coerce => Ok(Value::Int(v as i32)),
            DataType::Long if coerce => Ok(Value::Long(v as i64)),
            DataType::Float if coerce => Ok(Value::Float(if v { 1f32 } else { 0f32 })),
            DataType::Double if coerce => Ok(Value::Double(if v { 1f64 } else { 0f64 })),
            DataType::String if coerce => Ok(Value::string(v.to_string())),
            _ => Err(Error::type_mismatch(data_type, "bool")),
        },
        JsonValue::Number(v) => number_to_value(&v, data_type, coerce),
        JsonValue::String(s) => string_to_value(s, data_type, coerce),
        JsonValue::Array(values) => match data_type {
            DataType::Array(element_type) => {
                let mut array = Vec::with_capacity(values.len());
                for v in values {
                    array.push(json_value_to_value(v, element_type, coerce)?);
                }
                Ok(Value::array(array))
            },
            DataType::String if coerce => Ok(Value::string(serde_json::to_string(&values)?)),
            _ => Err(Error::type_mismatch(data_type, "array")),
        },
        JsonValue::Object(map) => match data_type {
            DataType::Struct(fields) => {
                let field_types = field_types(fields);
                let mut row = GenericRow::new_with_size(fields.len());
                for (name, value) in map {
                    if let Some((i, field_type)) = field_types.get(name.as_str()) {
                        row.update(*i, json_value_to_value(value, field_type, coerce)?);
                    }
                }
                Ok(Value::Struct(Arc::new(row)))
            },
            DataType::String if coerce => Ok(Value::string(serde_json::to_string(&map)?)),
            _ => Err(Error::type_mismatch(data_type, "object")),
        },
    }
}

fn field_types(fields: &Fields) -> HashMap<&str, (usize, &DataType)> {
    fields.iter().enumerate().map(|(i, f)| (f.name.as_str(), (i, &f.data_type))).collect()
}

fn number_to_value(v: &Number, data_type: &DataType, coerce: bool) -> Result<Value> {
    let invalid = || Error::invalid_value(data_type, v);
    match data_type {
        DataType::Int => match v.as_i64().and_then(|n| i32::try_from(n).ok()) {
            Some(n) => Ok(Value::Int(n)),
            None if coerce => integral_f64(v).and_then(|n| i32::try_from(n).ok()).map(Value::Int).ok_or_else(invalid),
            None => Err(invalid()),
        },
        DataType::Long => match v.as_i64() {
            Some(n) => Ok(Value::Long(n)),
            None if coerce => integral_f64(v).map(Value::Long).ok_or_else(invalid),
            None => Err(invalid()),
        },
        DataType::Float => v.as_f64().map(|n| Value::Float(n as f32)).ok_or_else(invalid),
        DataType::Double => v.as_f64().map(Value::Double).ok_or_else(invalid),
        DataType::Boolean if coerce => v.as_f64().map(|n| Value::Boolean(n != 0.0)).ok_or_else(invalid),
        DataType::String if coerce => Ok(Value::string(v.to_string())),
        _ => Err(Error::type_mismatch(data_type, "number")),
    }
}

// 3.0 is accepted where an integer is expected, 3.5 is not.
fn integral_f64(v: &Number) -> Option<i64> {
    let n = v.as_f64()?;
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

fn string_to_value(s: String, data_type: &DataType, coerce: bool) -> Result<Value> {
    let parsed = match data_type {
        DataType::String => return Ok(Value::string(s)),
        DataType::Date => date_utils::parse_date(&s).map(Value::Int),
        DataType::Timestamp => datetime_utils::parse_timestamp_micros(&s).map(Value::Long),
        DataType::Binary => BASE64_STANDARD.decode(s.as_bytes()).ok().map(Value::binary),
        DataType::Int if coerce => s.trim().parse().ok().map(Value::Int),
        DataType::Long if coerce => s.trim().parse().ok().map(Value::Long),
        DataType::Float if coerce => s.trim().parse().ok().map(Value::Float),
        DataType::Double if coerce => s.trim().parse().ok().map(Value::Double),
        DataType::Boolean if coerce => s.trim().parse().ok().map(Value::Boolean),
        _ => return Err(Error::type_mismatch(data_type, "string")),
    };
    parsed.ok_or_else(|| Error::invalid_value(data_type, format!("'{s}'")))
}
