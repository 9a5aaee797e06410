pub mod common;
pub mod error;
pub mod types;
pub mod data;
pub mod storage_type;
pub mod parser;
pub mod serialization;
pub mod config;
pub mod application;

pub use common::*;
pub use error::Error;
pub use storage_type::StorageType;
pub use serialization::{DbObjectSerializer, JsonObjectSerializer};
