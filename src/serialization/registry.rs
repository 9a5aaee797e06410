use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use log::info;
use crate::Result;
use crate::data::Value;
use crate::serialization::{ContractJsonSerializer, DbObjectSerializer, JsonOptions, JsonTextSerializer};
use crate::storage_type::StorageType;
use crate::types::DataType;

#[derive(Debug, Clone)]
struct Binding {
    default: Arc<dyn DbObjectSerializer>,
    overridden: Option<Arc<dyn DbObjectSerializer>>,
}

impl Binding {
    fn effective(&self) -> &Arc<dyn DbObjectSerializer> {
        self.overridden.as_ref().unwrap_or(&self.default)
    }
}

/// A default serializer plus an optional override that, when set, receives
/// every call instead.
///
/// The binding is replaced as a whole. Each call clones the effective
/// serializer out of the lock and runs without holding it, so a concurrent
/// swap never affects a call already in progress.
#[derive(Debug)]
pub struct SerializerRegistry {
    binding: RwLock<Binding>,
}

impl SerializerRegistry {
    pub fn new(default: Arc<dyn DbObjectSerializer>) -> Self {
        Self { binding: RwLock::new(Binding { default, overridden: None }) }
    }

    fn read(&self) -> Binding {
        // Writers only assign whole fields, so a poisoned lock still holds a usable binding.
        self.binding.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The serializer calls currently go to: the override if set, else the default.
    pub fn serializer(&self) -> Arc<dyn DbObjectSerializer> {
        self.binding.read().unwrap_or_else(PoisonError::into_inner).effective().clone()
    }

    pub fn default_serializer(&self) -> Arc<dyn DbObjectSerializer> {
        self.read().default
    }

    pub fn override_serializer(&self) -> Option<Arc<dyn DbObjectSerializer>> {
        self.read().overridden
    }

    /// Replaces the default. An override that is set stays in effect.
    pub fn replace_default(&self, serializer: Arc<dyn DbObjectSerializer>) {
        info!("replacing default serializer with {:?}", serializer);
        self.binding.write().unwrap_or_else(PoisonError::into_inner).default = serializer;
    }

    /// Sets the override, or clears it with `None`.
    pub fn set_override(&self, serializer: Option<Arc<dyn DbObjectSerializer>>) {
        match &serializer {
            Some(serializer) => info!("overriding serializer with {:?}", serializer),
            None => info!("clearing serializer override"),
        }
        self.binding.write().unwrap_or_else(PoisonError::into_inner).overridden = serializer;
    }

    pub fn clear_override(&self) {
        self.set_override(None);
    }

    /// Makes a [`JsonTextSerializer`] the default, with default options when none are given.
    pub fn use_json_text_serializer(&self, options: Option<JsonOptions>) {
        self.replace_default(Arc::new(JsonTextSerializer::new(options.unwrap_or_default())));
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::new(Arc::new(ContractJsonSerializer::new()))
    }
}

impl DbObjectSerializer for SerializerRegistry {
    fn can_serialize(&self, data_type: &DataType, storage_type: StorageType) -> bool {
        self.serializer().can_serialize(data_type, storage_type)
    }

    fn serialize_object(&self, data_type: &DataType, value: &Value) -> Result<Option<String>> {
        self.serializer().serialize_object(data_type, value)
    }

    fn deserialize_object(&self, data_type: &DataType, encoded: Option<&str>) -> Result<Value> {
        self.serializer().deserialize_object(data_type, encoded)
    }

    fn can_deserialize(&self, source_type: &DataType, target_type: &DataType) -> bool {
        self.serializer().can_deserialize(source_type, target_type)
    }

    fn serialized_storage_type(&self, data_type: &DataType, storage_type: StorageType) -> StorageType {
        self.serializer().serialized_storage_type(data_type, storage_type)
    }
}

static GLOBAL_REGISTRY: LazyLock<SerializerRegistry> = LazyLock::new(SerializerRegistry::default);

/// The process-wide serializer. Callers that hold it as a `DbObjectSerializer`
/// cannot tell whether the default or an override handles their calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectSerializer;

impl JsonObjectSerializer {
    pub fn registry() -> &'static SerializerRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn serializer() -> Arc<dyn DbObjectSerializer> {
        GLOBAL_REGISTRY.serializer()
    }

    pub fn default_serializer() -> Arc<dyn DbObjectSerializer> {
        GLOBAL_REGISTRY.default_serializer()
    }

    pub fn override_serializer() -> Option<Arc<dyn DbObjectSerializer>> {
        GLOBAL_REGISTRY.override_serializer()
    }

    pub fn replace_default(serializer: Arc<dyn DbObjectSerializer>) {
        GLOBAL_REGISTRY.replace_default(serializer)
    }

    pub fn set_override(serializer: Option<Arc<dyn DbObjectSerializer>>) {
        GLOBAL_REGISTRY.set_override(serializer)
    }

    pub fn use_json_text_serializer(options: Option<JsonOptions>) {
        GLOBAL_REGISTRY.use_json_text_serializer(options)
    }
}

impl DbObjectSerializer for JsonObjectSerializer {
    fn can_serialize(&self, data_type: &DataType, storage_type: StorageType) -> bool {
        GLOBAL_REGISTRY.can_serialize(data_type, storage_type)
    }

    fn serialize_object(&self, data_type: &DataType, value: &Value) -> Result<Option<String>> {
        GLOBAL_REGISTRY.serialize_object(data_type, value)
    }

    fn deserialize_object(&self, data_type: &DataType, encoded: Option<&str>) -> Result<Value> {
        GLOBAL_REGISTRY.deserialize_object(data_type, encoded)
    }

    fn can_deserialize(&self, source_type: &DataType, target_type: &DataType) -> bool {
        GLOBAL_REGISTRY.can_deserialize(source_type, target_type)
    }

    fn serialized_storage_type(&self, data_type: &DataType, storage_type: StorageType) -> StorageType {
        GLOBAL_REGISTRY.serialized_storage_type(data_type, storage_type)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use super::*;
    use crate::types::Field;

    fn data_type() -> DataType {
        DataType::struct_type(vec![Field::new("text", DataType::String)])
    }

    fn same(a: &Arc<dyn DbObjectSerializer>, b: &Arc<dyn DbObjectSerializer>) -> bool {
        Arc::ptr_eq(a, b)
    }

    #[test]
    fn test_default_is_contract_serializer() {
        let registry = SerializerRegistry::default();
        assert!(registry.override_serializer().is_none());
        assert!(format!("{:?}", registry.serializer()).starts_with("ContractJsonSerializer"));
        assert!(registry.can_serialize(&data_type(), StorageType::Object));
        assert!(!registry.can_serialize(&data_type(), StorageType::Int));
    }

    #[test]
    fn test_override_takes_every_call() {
        let registry = SerializerRegistry::default();
        let json_text: Arc<dyn DbObjectSerializer> = Arc::new(JsonTextSerializer::new(
            JsonOptions::default().write_null(false).prefer_json_storage(true).coerce_scalars(true),
        ));
        registry.set_override(Some(json_text.clone()));
        assert!(same(&registry.serializer(), &json_text));

        let value = Value::row(vec![Value::Null]);
        assert_eq!(registry.serialize_object(&data_type(), &value).unwrap(), json_text.serialize_object(&data_type(), &value).unwrap());
        assert_eq!(registry.serialize_object(&data_type(), &value).unwrap().as_deref(), Some("{}"));
        assert_eq!(registry.deserialize_object(&data_type(), None).unwrap(), Value::Null);
        assert_eq!(registry.deserialize_object(&DataType::Int, Some("\"5\"")).unwrap(), Value::int(5));
        assert!(registry.can_serialize(&data_type(), StorageType::Json));
        assert_eq!(registry.serialized_storage_type(&data_type(), StorageType::Object), StorageType::Json);

        registry.clear_override();
        assert_eq!(registry.serialize_object(&data_type(), &value).unwrap().as_deref(), Some(r#"{"text":null}"#));
        assert!(registry.deserialize_object(&data_type(), None).is_err());
        assert!(!registry.can_serialize(&data_type(), StorageType::Json));
        assert_eq!(registry.serialized_storage_type(&data_type(), StorageType::Object), StorageType::Object);
    }

    #[test]
    fn test_replace_default_keeps_override() {
        let registry = SerializerRegistry::default();
        let overridden: Arc<dyn DbObjectSerializer> = Arc::new(ContractJsonSerializer::new());
        registry.set_override(Some(overridden.clone()));
        registry.use_json_text_serializer(None);
        assert!(same(&registry.serializer(), &overridden));
        assert!(format!("{:?}", registry.default_serializer()).starts_with("JsonTextSerializer"));

        registry.set_override(None);
        assert!(same(&registry.serializer(), &registry.default_serializer()));
    }

    #[test]
    fn test_hooks_follow_the_serializer() {
        let registry = SerializerRegistry::new(Arc::new(ContractJsonSerializer::new().with_error_hook(|_, _, _| Value::string("default"))));
        assert_eq!(registry.deserialize_object(&DataType::Int, Some("?")).unwrap(), Value::string("default"));

        registry.set_override(Some(Arc::new(JsonTextSerializer::default())));
        assert!(registry.deserialize_object(&DataType::Int, Some("?")).is_err());

        registry.set_override(Some(Arc::new(JsonTextSerializer::default().with_error_hook(|_, _, _| Value::string("override")))));
        assert_eq!(registry.deserialize_object(&DataType::Int, Some("?")).unwrap(), Value::string("override"));
    }

    #[test]
    fn test_concurrent_swaps() {
        let registry = Arc::new(SerializerRegistry::default());
        let value = Value::row(vec![Value::Null]);
        let readers: Vec<_> = (0..4).map(|_| {
            let registry = registry.clone();
            let value = value.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let encoded = registry.serialize_object(&data_type(), &value).unwrap();
                    // Either serializer, never a mix.
                    assert!(matches!(encoded.as_deref(), Some(r#"{"text":null}"#) | Some("{}")));
                }
            })
        }).collect();
        for i in 0..500 {
            if i % 2 == 0 {
                registry.set_override(Some(Arc::new(JsonTextSerializer::new(JsonOptions::default().write_null(false)))));
            } else {
                registry.clear_override();
            }
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
