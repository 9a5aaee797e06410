use thiserror::Error;
use crate::storage_type::StorageType;
use crate::types::DataType;

#[derive(Error, Debug)]
pub enum Error {
    #[error("value cannot be null: {0}")]
    ArgumentNull(&'static str),

    #[error("{name}: unrecognized SQL type name '{value}'")]
    ArgumentOutOfRange { name: &'static str, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot convert json {found} to {expected}")]
    TypeMismatch { expected: DataType, found: &'static str },

    #[error("invalid {data_type} value: {value}")]
    InvalidValue { data_type: DataType, value: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("field '{name}' appears more than once in {data_type}")]
    DuplicateField { data_type: DataType, name: String },

    #[error("{data_type} cannot be stored as {storage_type}")]
    NotSerializable { data_type: DataType, storage_type: StorageType },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid_value(data_type: &DataType, value: impl ToString) -> Self {
        Error::InvalidValue { data_type: data_type.clone(), value: value.to_string() }
    }

    /// Fails when two fields of one struct share a name, anywhere inside `data_type`.
    pub(crate) fn check_field_names(data_type: &DataType) -> Result<(), Error> {
        match data_type.duplicate_field_name() {
            Some(name) => Err(Error::DuplicateField { data_type: data_type.clone(), name: name.to_string() }),
            None => Ok(()),
        }
    }

    pub(crate) fn type_mismatch(expected: &DataType, found: &'static str) -> Self {
        Error::TypeMismatch { expected: expected.clone(), found }
    }
}
