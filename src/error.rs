use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntigraphError {
    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("Resolver construction failed: {0}")]
    ResolverConstruction(String),

    #[error("Data fetch error: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for EntigraphError {
    fn from(err: toml::de::Error) -> Self {
        EntigraphError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for EntigraphError {
    fn from(err: toml::ser::Error) -> Self {
        EntigraphError::Serialization(format!("TOML serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, EntigraphError>;
