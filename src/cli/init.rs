use entigraph::config::{save_config, Config, ServerConfig};
use entigraph::error::Result;
use entigraph::metadata::{Attribute, Cardinality, Entity, NativeType, Relationship};

/// Run the init command to generate an example configuration
pub fn run(output: Option<String>) -> Result<()> {
    let config = example_config();

    match output {
        Some(path) => {
            save_config(&config, &path)?;
            tracing::info!("✅ Wrote example configuration to {}", path);
            tracing::info!("💡 Next: entigraph serve --config {}", path);
        }
        None => {
            let toml_string = toml::to_string_pretty(&config)?;
            println!("{}", toml_string);
        }
    }

    Ok(())
}

fn example_config() -> Config {
    Config {
        server: ServerConfig::default(),
        entities: vec![
            Entity {
                name: "Customer".to_string(),
                description: Some("A customer account".to_string()),
                attributes: vec![
                    Attribute {
                        name: "id".to_string(),
                        native_type: NativeType::Int64,
                    },
                    Attribute {
                        name: "name".to_string(),
                        native_type: NativeType::String,
                    },
                    Attribute {
                        name: "active".to_string(),
                        native_type: NativeType::Boolean,
                    },
                ],
                relationships: vec![Relationship {
                    name: "orders".to_string(),
                    target: "Order".to_string(),
                    cardinality: Cardinality::Many,
                }],
            },
            Entity {
                name: "Order".to_string(),
                description: Some("An order placed by a customer".to_string()),
                attributes: vec![
                    Attribute {
                        name: "id".to_string(),
                        native_type: NativeType::Int64,
                    },
                    Attribute {
                        name: "total".to_string(),
                        native_type: NativeType::Decimal,
                    },
                    Attribute {
                        name: "placed_at".to_string(),
                        native_type: NativeType::Timestamp,
                    },
                ],
                relationships: vec![Relationship {
                    name: "customer".to_string(),
                    target: "Customer".to_string(),
                    cardinality: Cardinality::One,
                }],
            },
        ],
    }
}
