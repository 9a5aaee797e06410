use std::path::PathBuf;
use clap::{Parser, Subcommand};
use log::info;
use crate::Result;
use crate::config;
use crate::error::Error;
use crate::parser::parse_data_type;
use crate::serialization::{DbObjectSerializer, JsonObjectSerializer};
use crate::storage_type::StorageType;

#[derive(Parser, Debug)]
#[command(name = "sqlcodec", version, about = "Inspect how values are encoded for database columns")]
pub struct Cli {
    /// YAML file choosing the default and override serializers.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve a SQL type name to its storage type.
    Resolve { name: String },
    /// Decode JSON text as a value of the given type.
    Decode {
        #[arg(short = 't', long = "type")]
        data_type: String,
        text: String,
    },
    /// Decode JSON text, then encode it again for the given storage type.
    Encode {
        #[arg(short = 't', long = "type")]
        data_type: String,
        /// SQL type name; the opaque object hint when left out.
        #[arg(short, long)]
        storage: Option<String>,
        text: String,
    },
}

pub fn run_application(cli: Cli) -> Result<()> {
    if let Some(config_path) = &cli.config {
        info!("config path: {}", config_path.display());
        config::parse_config(config_path)?.apply(JsonObjectSerializer::registry());
    }
    let output = execute(&cli.command, &JsonObjectSerializer)?;
    println!("{}", output);
    Ok(())
}

pub fn execute(command: &Command, serializer: &dyn DbObjectSerializer) -> Result<String> {
    match command {
        Command::Resolve { name } => StorageType::resolve(Some(name.as_str())).map(|storage_type| storage_type.to_string()),
        Command::Decode { data_type, text } => {
            let data_type = parse_data_type(data_type)?;
            serializer.deserialize_object(&data_type, Some(text.as_str())).map(|value| value.to_string())
        },
        Command::Encode { data_type, storage, text } => {
            let data_type = parse_data_type(data_type)?;
            let requested = match storage {
                Some(name) => StorageType::resolve(Some(name.as_str()))?,
                None => StorageType::Object,
            };
            if !serializer.can_serialize(&data_type, requested) {
                return Err(Error::NotSerializable { data_type, storage_type: requested });
            }
            let value = serializer.deserialize_object(&data_type, Some(text.as_str()))?;
            let storage_type = serializer.serialized_storage_type(&data_type, requested);
            let encoded = serializer.serialize_object(&data_type, &value)?;
            Ok(format!("{}\t{}", storage_type, encoded.as_deref().unwrap_or("NULL")))
        },
    }
}
