use entigraph::error::{EntigraphError, Result};
use entigraph::schema::{DataContext, SchemaBuilder};

use async_graphql_axum::GraphQL;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

/// Run the serve command to start the GraphQL server
pub async fn run(config_path: String, port: u16, data_path: Option<String>) -> Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);

    let config = entigraph::config::load_config(&config_path)?;

    // Use provided port or default from config
    let server_port = if port != 4000 { port } else { config.server.port };

    let context = match data_path {
        Some(path) => {
            tracing::info!("📦 Loading seed data from {}", path);
            load_data_context(&path)?
        }
        None => DataContext::new(),
    };

    tracing::info!(
        "🔧 Building GraphQL schema for {} entities...",
        config.entities.len()
    );

    let schema = SchemaBuilder::new(config)
        .data_context(context)
        .build()?;

    tracing::info!("✅ Schema built successfully");
    tracing::info!("🚀 GraphQL server running on http://localhost:{}", server_port);
    tracing::info!("📊 Playground: http://localhost:{}/graphql", server_port);
    tracing::info!("💡 Press Ctrl+C to stop the server");

    start_http_server(schema, server_port).await
}

/// Load seed rows from a JSON file mapping entity names to row arrays
fn load_data_context(path: &str) -> Result<DataContext> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| EntigraphError::Config(format!("Failed to read data file '{}': {}", path, e)))?;

    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| EntigraphError::Serialization(format!("Invalid JSON in '{}': {}", path, e)))?;

    let serde_json::Value::Object(map) = json else {
        return Err(EntigraphError::Config(format!(
            "Data file '{}' must be a JSON object mapping entity names to row arrays",
            path
        )));
    };

    let mut context = DataContext::new();

    for (entity, rows) in map {
        let serde_json::Value::Array(rows) = rows else {
            return Err(EntigraphError::Config(format!(
                "Rows for entity '{}' must be a JSON array",
                entity
            )));
        };

        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let value = async_graphql::Value::from_json(row).map_err(|e| {
                EntigraphError::Serialization(format!("Invalid row for '{}': {}", entity, e))
            })?;
            values.push(value);
        }

        context.insert_rows(entity, values);
    }

    Ok(context)
}

async fn start_http_server(schema: async_graphql::dynamic::Schema, port: u16) -> Result<()> {
    let app = Router::new()
        .route(
            "/graphql",
            get(graphql_playground).post_service(GraphQL::new(schema)),
        )
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        EntigraphError::Config(format!(
            "Failed to bind to port {}: {}. Port may be in use.",
            port, e
        ))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| EntigraphError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

async fn graphql_playground() -> axum::response::Html<String> {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

async fn health_check() -> &'static str {
    "OK"
}
