use std::sync::Arc;
use sqlcodec::data::Value;
use sqlcodec::parser::parse_data_type;
use sqlcodec::serialization::{ContractJsonSerializer, JsonOptions, JsonTextSerializer};
use sqlcodec::{DbObjectSerializer, Error, JsonObjectSerializer, StorageType};

// The process-wide registry is shared by every test in this binary, so all
// checks against it live in one test.
#[test]
fn test_global_registry() {
    let data_type = parse_data_type("struct<text:string, n:int>").unwrap();
    let facade: &dyn DbObjectSerializer = &JsonObjectSerializer;

    // Lazily created default.
    assert!(JsonObjectSerializer::override_serializer().is_none());
    assert!(format!("{:?}", JsonObjectSerializer::serializer()).starts_with("ContractJsonSerializer"));
    assert!(facade.can_serialize(&data_type, StorageType::Object));
    assert!(!facade.can_serialize(&data_type, StorageType::Int));
    assert_eq!(facade.serialize_object(&data_type, &Value::Null).unwrap(), None);
    assert_eq!(facade.deserialize_object(&data_type, Some("")).unwrap(), Value::row(vec![Value::Null, Value::Null]));
    assert!(matches!(facade.deserialize_object(&data_type, Some("not valid json")), Err(Error::Json(_))));
    let before = facade.serialize_object(&data_type, &Value::row(vec![Value::string("foo"), Value::Null])).unwrap();
    assert_eq!(before.as_deref(), Some(r#"{"text":"foo","n":null}"#));

    // Override: every call goes to the override.
    let overridden = JsonTextSerializer::new(JsonOptions::default().write_null(false).prefer_json_storage(true))
        .with_error_hook(|_, _, _| Value::string("recovered"));
    let overridden: Arc<dyn DbObjectSerializer> = Arc::new(overridden);
    JsonObjectSerializer::set_override(Some(overridden.clone()));
    let value = Value::row(vec![Value::string("foo"), Value::Null]);
    assert_eq!(facade.serialize_object(&data_type, &value).unwrap(), overridden.serialize_object(&data_type, &value).unwrap());
    assert_eq!(facade.deserialize_object(&data_type, Some("not valid json")).unwrap(), Value::string("recovered"));
    assert_eq!(facade.deserialize_object(&data_type, None).unwrap(), Value::Null);
    assert!(facade.can_serialize(&data_type, StorageType::Json));
    assert_eq!(facade.serialized_storage_type(&data_type, StorageType::Object), StorageType::Json);
    assert!(facade.can_deserialize(&data_type, &data_type));

    // Replacing the default leaves the override in charge.
    JsonObjectSerializer::replace_default(Arc::new(ContractJsonSerializer::new().with_error_hook(|_, _, _| Value::int(0))));
    assert!(Arc::ptr_eq(&JsonObjectSerializer::serializer(), &overridden));

    // Clearing the override reverts to the (new) default.
    JsonObjectSerializer::set_override(None);
    assert_eq!(facade.serialize_object(&data_type, &value).unwrap(), before);
    assert_eq!(facade.deserialize_object(&data_type, Some("not valid json")).unwrap(), Value::int(0));
    assert_eq!(facade.serialized_storage_type(&data_type, StorageType::Object), StorageType::Object);

    JsonObjectSerializer::use_json_text_serializer(Some(JsonOptions::default().coerce_scalars(true)));
    assert!(format!("{:?}", JsonObjectSerializer::default_serializer()).starts_with("JsonTextSerializer"));
    assert_eq!(facade.deserialize_object(&parse_data_type("int").unwrap(), Some("\"12\"")).unwrap(), Value::int(12));
}
