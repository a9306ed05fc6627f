mod types;

pub use types::{Config, ServerConfig};

use crate::error::{EntigraphError, Result};
use std::fs;

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| {
        EntigraphError::Config(format!("Failed to read config file '{}': {}", path, e))
    })?;

    let config: Config = toml::from_str(&contents)?;

    for entity in &config.entities {
        entity.validate().map_err(EntigraphError::Config)?;
    }

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    for entity in &config.entities {
        entity.validate().map_err(EntigraphError::Config)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string).map_err(|e| {
        EntigraphError::Config(format!("Failed to write config file '{}': {}", path, e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Attribute, Entity, NativeType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[server]
port = 4000
bind = "0.0.0.0"

[[entity]]
name = "Customer"
description = "Customer records"

[[entity.attribute]]
name = "id"
native_type = "int64"

[[entity.attribute]]
name = "name"
native_type = "string"

[[entity.relationship]]
name = "orders"
target = "Order"
cardinality = "many"
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.entities.len(), 1);
        assert_eq!(config.entities[0].attributes.len(), 2);
        assert_eq!(config.entities[0].relationships.len(), 1);
    }

    #[test]
    fn test_load_rejects_invalid_entity() {
        let mut temp_file = NamedTempFile::new().unwrap();
        // lowercase entity name fails validation
        let config_content = r#"
[server]
port = 4000

[[entity]]
name = "customer"

[[entity.attribute]]
name = "id"
native_type = "int64"
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let config = Config {
            server: ServerConfig::default(),
            entities: vec![Entity {
                name: "Customer".to_string(),
                description: Some("Customer records".to_string()),
                attributes: vec![Attribute {
                    name: "id".to_string(),
                    native_type: NativeType::Int64,
                }],
                relationships: vec![],
            }],
        };

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        save_config(&config, path).unwrap();
        let loaded = load_config(path).unwrap();

        assert_eq!(loaded.entities, config.entities);
        assert_eq!(loaded.server.port, config.server.port);
    }
}
