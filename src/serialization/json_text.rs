use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::data::Value;
use crate::error::Error;
use crate::serialization::ser::encode_json;
use crate::serialization::{decode_text, recover, DbObjectSerializer, SerializeErrorHook};
use crate::storage_type::StorageType;
use crate::types::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Indent the output.
    pub pretty: bool,
    /// Write null struct members instead of omitting them.
    pub write_null: bool,
    /// Accept scalar cross-conversions on decode, e.g. `"42"` for an int.
    pub coerce_scalars: bool,
    /// Store values requested as [`StorageType::Object`] as [`StorageType::Json`].
    pub prefer_json_storage: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self { pretty: false, write_null: true, coerce_scalars: false, prefer_json_storage: false }
    }
}

impl JsonOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_null(mut self, write_null: bool) -> Self {
        self.write_null = write_null;
        self
    }

    pub fn coerce_scalars(mut self, coerce_scalars: bool) -> Self {
        self.coerce_scalars = coerce_scalars;
        self
    }

    pub fn prefer_json_storage(mut self, prefer_json_storage: bool) -> Self {
        self.prefer_json_storage = prefer_json_storage;
        self
    }
}

/// JSON text serializer driven by a fixed set of [`JsonOptions`]. The options
/// cannot change once the serializer is built; build a new one instead.
#[derive(Clone, Default)]
pub struct JsonTextSerializer {
    options: JsonOptions,
    on_serialize_error: Option<SerializeErrorHook>,
}

impl JsonTextSerializer {
    pub fn new(options: JsonOptions) -> Self {
        Self { options, on_serialize_error: None }
    }

    pub fn options(&self) -> &JsonOptions {
        &self.options
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

impl Debug for JsonTextSerializer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonTextSerializer")
            .field("options", &self.options)
            .field("on_serialize_error", &self.on_serialize_error.is_some())
            .finish()
    }
}

impl DbObjectSerializer for JsonTextSerializer {
    fn can_serialize(&self, _data_type: &DataType, storage_type: StorageType) -> bool {
        matches!(storage_type, StorageType::Object | StorageType::Json)
    }

    fn serialize_object(&self, data_type: &DataType, value: &Value) -> Result<Option<String>> {
        if value.is_null() {
            return Ok(None);
        }
        encode_json(value, data_type, self.options.pretty, self.options.write_null).map(Some)
    }

    fn deserialize_object(&self, data_type: &DataType, encoded: Option<&str>) -> Result<Value> {
        let Some(text) = encoded else {
            return Ok(Value::Null);
        };
        recover(self.on_serialize_error.as_ref(), data_type, encoded, || {
            decode_text(text, data_type, self.options.coerce_scalars)
        })
    }

    fn serialized_storage_type(&self, _data_type: &DataType, storage_type: StorageType) -> StorageType {
        if self.options.prefer_json_storage && storage_type == StorageType::Object {
            StorageType::Json
        } else {
            storage_type
        }
    }
}
