use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use itertools::Itertools;
use crate::data::{GenericRow, Value};

#[derive(Clone, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub enum DataType {
    Null,
    Int,
    Long,
    Float,
    Double,
    String,
    Boolean,
    /// Days since 1970-01-01, carried as `Value::Int`.
    Date,
    /// Microseconds since the Unix epoch (UTC), carried as `Value::Long`.
    Timestamp,
    Binary,
    Struct(Fields),
    Array(Box<DataType>),
}

impl DataType {
    pub fn struct_type(fields: Vec<Field>) -> DataType {
        DataType::Struct(Fields(fields))
    }

    pub fn array_type(element_type: DataType) -> DataType {
        DataType::Array(Box::new(element_type))
    }

    /// The row a decoder produces for an empty JSON object. Only struct types have one.
    pub fn empty_value(&self) -> Option<Value> {
        match self {
            DataType::Struct(fields) => Some(Value::Struct(Arc::new(GenericRow::new_with_size(fields.len())))),
            _ => None,
        }
    }

    /// First field name that appears twice in the same struct, searching nested types too.
    pub fn duplicate_field_name(&self) -> Option<&str> {
        match self {
            DataType::Struct(fields) => fields
                .duplicate_name()
                .or_else(|| fields.iter().find_map(|field| field.data_type.duplicate_field_name())),
            DataType::Array(element_type) => element_type.duplicate_field_name(),
            _ => None,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Null => write!(f, "null"),
            DataType::Int => write!(f, "int"),
            DataType::Long => write!(f, "bigint"),
            DataType::Float => write!(f, "float"),
            DataType::Double => write!(f, "double"),
            DataType::String => write!(f, "string"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Binary => write!(f, "binary"),
            DataType::Struct(fields) => write!(f, "struct<{}>", fields.iter().map(|field| format!("{}:{}", quote_identifier(&field.name), field.data_type)).join(",")),
            DataType::Array(element_type) => write!(f, "array<{}>", element_type),
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Field {
        Field { name: name.into(), data_type, }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub struct Fields(pub Vec<Field>);

impl Fields {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.0.iter()
    }

    pub fn duplicate_name(&self) -> Option<&str> {
        self.0.iter().map(|field| field.name.as_str()).duplicates().next()
    }
}

/// Backtick-quotes names the type parser would not read back bare.
fn quote_identifier(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let plain = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{}`", name.replace('`', "``")))
    }
}
