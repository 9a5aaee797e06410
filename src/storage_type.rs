//! Storage kinds of database columns and parameters, and the lookup from SQL
//! type names to them.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Opaque object hint: let the active serializer pick the encoding.
    Object,
    BigInt,
    Binary,
    Bit,
    Char,
    Date,
    DateTime,
    DateTime2,
    DateTimeOffset,
    Decimal,
    Float,
    Image,
    Int,
    Money,
    NChar,
    NText,
    NVarChar,
    Real,
    SmallDateTime,
    SmallInt,
    SmallMoney,
    Structured,
    Text,
    Time,
    Timestamp,
    TinyInt,
    Udt,
    UniqueIdentifier,
    VarBinary,
    VarChar,
    Variant,
    Xml,
    Json,
    Vector,
}

// Several names collapse onto one storage type (numeric -> decimal,
// smalldatetime -> datetime, rowversion -> timestamp, filestream -> varbinary).
static TYPE_NAMES: LazyLock<HashMap<&'static str, StorageType>> = LazyLock::new(|| {
    HashMap::from([
        ("bigint", StorageType::BigInt),
        ("binary", StorageType::Binary),
        ("bit", StorageType::Bit),
        ("char", StorageType::Char),
        ("date", StorageType::Date),
        ("datetime", StorageType::DateTime),
        ("datetime2", StorageType::DateTime2),
        ("datetimeoffset", StorageType::DateTimeOffset),
        ("decimal", StorageType::Decimal),
        ("filestream", StorageType::VarBinary),
        ("float", StorageType::Float),
        ("image", StorageType::Image),
        ("int", StorageType::Int),
        ("money", StorageType::Money),
        ("nchar", StorageType::NChar),
        ("ntext", StorageType::NText),
        ("numeric", StorageType::Decimal),
        ("nvarchar", StorageType::NVarChar),
        ("real", StorageType::Real),
        ("rowversion", StorageType::Timestamp),
        ("smalldatetime", StorageType::DateTime),
        ("smallint", StorageType::SmallInt),
        ("smallmoney", StorageType::SmallMoney),
        ("sql_variant", StorageType::Variant),
        ("text", StorageType::Text),
        ("time", StorageType::Time),
        ("timestamp", StorageType::Timestamp),
        ("tinyint", StorageType::TinyInt),
        ("uniqueidentifier", StorageType::UniqueIdentifier),
        ("varbinary", StorageType::VarBinary),
        ("varchar", StorageType::VarChar),
        ("xml", StorageType::Xml),
        ("json", StorageType::Json),
        ("vector", StorageType::Vector),
    ])
});

impl StorageType {
    /// Looks up a SQL type name, ignoring case.
    pub fn try_resolve(name: &str) -> Option<StorageType> {
        if let Some(storage_type) = TYPE_NAMES.get(name) {
            return Some(*storage_type);
        }
        TYPE_NAMES.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Like [`StorageType::try_resolve`], but a missing name is
    /// [`Error::ArgumentNull`] and an unknown one [`Error::ArgumentOutOfRange`].
    pub fn resolve(name: Option<&str>) -> Result<StorageType> {
        let name = name.ok_or(Error::ArgumentNull("sql_type"))?;
        StorageType::try_resolve(name).ok_or_else(|| Error::ArgumentOutOfRange {
            name: "sql_type",
            value: name.to_string(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageType::Object => "object",
            StorageType::BigInt => "bigint",
            StorageType::Binary => "binary",
            StorageType::Bit => "bit",
            StorageType::Char => "char",
            StorageType::Date => "date",
            StorageType::DateTime => "datetime",
            StorageType::DateTime2 => "datetime2",
            StorageType::DateTimeOffset => "datetimeoffset",
            StorageType::Decimal => "decimal",
            StorageType::Float => "float",
            StorageType::Image => "image",
            StorageType::Int => "int",
            StorageType::Money => "money",
            StorageType::NChar => "nchar",
            StorageType::NText => "ntext",
            StorageType::NVarChar => "nvarchar",
            StorageType::Real => "real",
            StorageType::SmallDateTime => "smalldatetime",
            StorageType::SmallInt => "smallint",
            StorageType::SmallMoney => "smallmoney",
            StorageType::Structured => "structured",
            StorageType::Text => "text",
            StorageType::Time => "time",
            StorageType::Timestamp => "timestamp",
            StorageType::TinyInt => "tinyint",
            StorageType::Udt => "udt",
            StorageType::UniqueIdentifier => "uniqueidentifier",
            StorageType::VarBinary => "varbinary",
            StorageType::VarChar => "varchar",
            StorageType::Variant => "sql_variant",
            StorageType::Xml => "xml",
            StorageType::Json => "json",
            StorageType::Vector => "vector",
        }
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StorageType::resolve(Some(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_case() {
        assert_eq!(StorageType::resolve(Some("VARCHAR")).unwrap(), StorageType::VarChar);
        assert_eq!(StorageType::resolve(Some("varchar")).unwrap(), StorageType::VarChar);
        assert_eq!(StorageType::resolve(Some("DateTimeOffset")).unwrap(), StorageType::DateTimeOffset);
        assert_eq!("Json".parse::<StorageType>().unwrap(), StorageType::Json);
    }

    #[test]
    fn test_resolve_unknown_name() {
        match StorageType::resolve(Some("not-a-real-type")) {
            Err(Error::ArgumentOutOfRange { name, value }) => {
                assert_eq!(name, "sql_type");
                assert_eq!(value, "not-a-real-type");
            },
            other => panic!("unexpected {:?}", other),
        }
        let err = StorageType::resolve(Some("varchar2")).unwrap_err();
        assert!(err.to_string().contains("'varchar2'"));
    }

    #[test]
    fn test_resolve_missing_name() {
        assert!(matches!(StorageType::resolve(None), Err(Error::ArgumentNull("sql_type"))));
    }

    #[test]
    fn test_many_names_one_type() {
        assert_eq!(StorageType::try_resolve("numeric"), Some(StorageType::Decimal));
        assert_eq!(StorageType::try_resolve("decimal"), Some(StorageType::Decimal));
        assert_eq!(StorageType::try_resolve("SmallDateTime"), Some(StorageType::DateTime));
        assert_eq!(StorageType::try_resolve("rowversion"), Some(StorageType::Timestamp));
        assert_eq!(StorageType::try_resolve("filestream"), Some(StorageType::VarBinary));
        assert_eq!(StorageType::try_resolve("sql_variant"), Some(StorageType::Variant));
        assert_eq!(StorageType::try_resolve("VECTOR"), Some(StorageType::Vector));
    }

    #[test]
    fn test_try_resolve_never_fails() {
        for name in ["", " ", "INT ", "object", "structured", "ｉｎｔ", "\u{0}", "nvarchar(max)"] {
            assert_eq!(StorageType::try_resolve(name), None, "{name:?}");
        }
        assert_eq!(StorageType::try_resolve("iNt"), Some(StorageType::Int));
    }

    #[test]
    fn test_display_round_trips_table_names() {
        for name in ["bigint", "varchar", "xml", "json", "datetime2", "sql_variant"] {
            let storage_type = StorageType::try_resolve(name).unwrap();
            assert_eq!(storage_type.to_string(), name);
        }
    }
}
