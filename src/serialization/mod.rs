//! Conversion of values to and from JSON text at the database boundary.
//!
//! A [`DbObjectSerializer`] answers whether a value of some [`DataType`] can be
//! stored under a [`StorageType`] hint and then performs the conversion. Two
//! implementations exist: [`ContractJsonSerializer`] (the default) and
//! [`JsonTextSerializer`]. The process-wide choice between them lives in
//! [`JsonObjectSerializer`].

mod ser;
mod de;
mod contract;
mod json_text;
pub mod registry;

use std::fmt::Debug;
use std::sync::Arc;
use crate::Result;
use crate::data::Value;
use crate::error::Error;
use crate::storage_type::StorageType;
use crate::types::DataType;

pub use contract::ContractJsonSerializer;
pub use json_text::{JsonOptions, JsonTextSerializer};
pub use registry::{JsonObjectSerializer, SerializerRegistry};

use de::decode_json;

/// Called with the target type, the encoded input and the failure when
/// decoding fails; the returned value replaces the error.
pub type SerializeErrorHook = Arc<dyn Fn(&DataType, Option<&str>, &Error) -> Value + Send + Sync>;

pub trait DbObjectSerializer: Debug + Send + Sync {
    /// Whether values of `data_type` can be converted for the `storage_type` hint.
    fn can_serialize(&self, data_type: &DataType, storage_type: StorageType) -> bool {
        let _ = data_type;
        storage_type == StorageType::Object
    }

    /// Encodes `value`. A null value encodes to `None`, never to a `null` literal.
    fn serialize_object(&self, data_type: &DataType, value: &Value) -> Result<Option<String>>;

    /// Decodes `encoded` into a value of `data_type`. An empty string decodes as `{}`,
    /// which gives a row of nulls for struct types; other types reject it like any
    /// other JSON object.
    fn deserialize_object(&self, data_type: &DataType, encoded: Option<&str>) -> Result<Value>;

    fn can_deserialize(&self, source_type: &DataType, target_type: &DataType) -> bool {
        source_type == target_type
    }

    /// The storage type actually used for `data_type` when `storage_type` was requested.
    fn serialized_storage_type(&self, data_type: &DataType, storage_type: StorageType) -> StorageType {
        let _ = data_type;
        storage_type
    }
}

const EMPTY_OBJECT: &str = "{}";

fn decode_text(encoded: &str, data_type: &DataType, coerce_scalars: bool) -> Result<Value> {
    if !encoded.is_empty() {
        return decode_json(encoded, data_type, coerce_scalars);
    }
    Error::check_field_names(data_type)?;
    match data_type.empty_value() {
        Some(value) => Ok(value),
        None => decode_json(EMPTY_OBJECT, data_type, coerce_scalars),
    }
}

fn recover<F>(hook: Option<&SerializeErrorHook>, data_type: &DataType, encoded: Option<&str>, decode: F) -> Result<Value>
where
    F: FnOnce() -> Result<Value>,
{
    match decode() {
        Ok(value) => Ok(value),
        Err(e) => match hook {
            Some(hook) => Ok(hook(data_type, encoded, &e)),
            None => Err(e),
        },
    }
}
