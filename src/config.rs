use std::fs;
use std::path::Path;
use std::sync::Arc;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::serialization::{ContractJsonSerializer, DbObjectSerializer, JsonOptions, JsonTextSerializer, SerializerRegistry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "codec", rename_all = "snake_case")]
pub enum SerializerConfig {
    Contract,
    JsonText(JsonOptions),
}

impl SerializerConfig {
    pub fn build(&self) -> Arc<dyn DbObjectSerializer> {
        match self {
            SerializerConfig::Contract => Arc::new(ContractJsonSerializer::new()),
            SerializerConfig::JsonText(options) => Arc::new(JsonTextSerializer::new(options.clone())),
        }
    }
}

/// Which serializers a registry should use. Leaving `default` out keeps the
/// registry's current default; leaving `override` out clears any override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializationConfig {
    #[serde(default)]
    pub default: Option<SerializerConfig>,
    #[serde(default, rename = "override")]
    pub override_serializer: Option<SerializerConfig>,
}

impl SerializationConfig {
    pub fn apply(&self, registry: &SerializerRegistry) {
        if let Some(default) = &self.default {
            debug!("applying default serializer config {:?}", default);
            registry.replace_default(default.build());
        }
        registry.set_override(self.override_serializer.as_ref().map(SerializerConfig::build));
    }
}

pub fn parse_config(config_path: impl AsRef<Path>) -> Result<SerializationConfig> {
    let config_str = fs::read_to_string(config_path)?;
    let config: SerializationConfig = serde_yaml::from_str(config_str.as_str())?;
    Ok(config)
}
