use crate::error::Result;
use crate::metadata::{Entity, MetadataSource};
use serde::{Deserialize, Serialize};

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,

    /// Entity declarations, one `[[entity]]` table each
    #[serde(default, rename = "entity")]
    pub entities: Vec<Entity>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the server to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to bind the server to
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    4000
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

impl MetadataSource for Config {
    fn entities(&self) -> Result<Vec<Entity>> {
        Ok(self.entities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 4000);
        assert_eq!(server.bind, "0.0.0.0");
    }

    #[test]
    fn test_config_is_a_metadata_source() {
        let config: Config = toml::from_str(
            r#"
[server]
port = 4000

[[entity]]
name = "Customer"

[[entity.attribute]]
name = "id"
native_type = "int64"
"#,
        )
        .unwrap();

        let entities = config.entities().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "Customer");
    }
}
