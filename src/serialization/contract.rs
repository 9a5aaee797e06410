use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use crate::Result;
use crate::data::Value;
use crate::error::Error;
use crate::serialization::ser::encode_json;
use crate::serialization::{decode_text, recover, DbObjectSerializer, SerializeErrorHook};
use crate::types::DataType;

/// Walks the `DataType` contract strictly: every JSON value must have exactly
/// the kind its declared type calls for, and struct members are always written,
/// nulls included.
///
/// This is the serializer a fresh [`SerializerRegistry`](super::SerializerRegistry)
/// starts with.
#[derive(Clone, Default)]
pub struct ContractJsonSerializer {
    on_serialize_error: Option<SerializeErrorHook>,
}

impl ContractJsonSerializer {
    pub fn new() -> Self {
        Self { on_serialize_error: None }
    }

    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&DataType, Option<&str>, &Error) -> Value + Send + Sync + 'static,
    {
        self.on_serialize_error = Some(Arc::new(hook));
        self
    }

    pub fn set_on_serialize_error(&mut self, hook: Option<SerializeErrorHook>) {
        self.on_serialize_error = hook;
    }

    pub fn on_serialize_error(&self) -> Option<&SerializeErrorHook> {
        self.on_serialize_error.as_ref()
    }
}

impl Debug for ContractJsonSerializer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractJsonSerializer")
            .field("on_serialize_error", &self.on_serialize_error.is_some())
            .finish()
    }
}

impl DbObjectSerializer for ContractJsonSerializer {
    fn serialize_object(&self, data_type: &DataType, value: &Value) -> Result<Option<String>> {
        if value.is_null() {
            return Ok(None);
        }
        encode_json(value, data_type, false, true).map(Some)
    }

    fn deserialize_object(&self, data_type: &DataType, encoded: Option<&str>) -> Result<Value> {
        recover(self.on_serialize_error.as_ref(), data_type, encoded, || {
            let encoded = encoded.ok_or(Error::ArgumentNull("encoded"))?;
            decode_text(encoded, data_type, false)
        })
    }
}
