use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::Serializer;
use serde::ser::Error as _;
use crate::Result;
use crate::data::Value;
use crate::error::Error;
use crate::types::DataType;
use crate::{date_utils, datetime_utils};

/// Serializes a value the way its `DataType` describes it.
pub(crate) struct ValueWriter<'a> {
    value: &'a Value,
    data_type: &'a DataType,
    write_null: bool,
}

impl<'a> ValueWriter<'a> {
    pub(crate) fn new(value: &'a Value, data_type: &'a DataType, write_null: bool) -> ValueWriter<'a> {
        ValueWriter { value, data_type, write_null }
    }
}

impl serde::ser::Serialize for ValueWriter<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        use serde::ser::{SerializeMap, SerializeSeq};
        match (self.data_type, self.value) {
            (_, Value::Null) => serializer.serialize_unit(),
            (DataType::Int, Value::Int(v)) => serializer.serialize_i32(*v),
            (DataType::Long, Value::Long(v)) => serializer.serialize_i64(*v),
            (DataType::Float, Value::Float(v)) if v.is_finite() => serializer.serialize_f32(*v),
            (DataType::Double, Value::Double(v)) if v.is_finite() => serializer.serialize_f64(*v),
            (DataType::String, Value::String(v)) => serializer.serialize_str(v),
            (DataType::Boolean, Value::Boolean(v)) => serializer.serialize_bool(*v),
            (DataType::Date, Value::Int(days)) => match date_utils::format_date(*days) {
                Some(date) => serializer.serialize_str(&date),
                None => Err(S::Error::custom(format!("date out of range: {days}"))),
            },
            (DataType::Timestamp, Value::Long(micros)) => match datetime_utils::format_timestamp_micros(*micros) {
                Some(datetime) => serializer.serialize_str(&datetime),
                None => Err(S::Error::custom(format!("timestamp out of range: {micros}"))),
            },
            (DataType::Binary, Value::Binary(bytes)) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes.as_slice())),
            (DataType::Struct(fields), Value::Struct(row)) => {
                if row.len() != fields.len() {
                    return Err(S::Error::custom(format!("field length mismatch: {} values for {}", row.len(), self.data_type)));
                }
                let mut compound = serializer.serialize_map(None)?;
                for (i, field) in fields.iter().enumerate() {
                    let value = row.get(i);
                    if value.is_null() && !self.write_null {
                        continue;
                    }
                    compound.serialize_entry(&field.name, &ValueWriter::new(value, &field.data_type, self.write_null))?;
                }
                compound.end()
            },
            (DataType::Array(element_type), Value::Array(values)) => {
                let mut compound = serializer.serialize_seq(Some(values.len()))?;
                for v in values.iter() {
                    compound.serialize_element(&ValueWriter::new(v, element_type, self.write_null))?;
                }
                compound.end()
            },
            (data_type, value) => Err(S::Error::custom(format!("{} value {} does not fit {} type", value.kind(), value, data_type))),
        }
    }
}

pub(crate) fn encode_json(value: &Value, data_type: &DataType, pretty: bool, write_null: bool) -> Result<String> {
    Error::check_field_names(data_type)?;
    let writer = ValueWriter::new(value, data_type, write_null);
    let text = if pretty {
        serde_json::to_string_pretty(&writer)?
    } else {
        serde_json::to_string(&writer)?
    };
    Ok(text)
}
