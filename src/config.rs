use serde::{Deserialize, Serialize};

use crate::model::ResourceGraph;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub graph: GraphConfig,
    pub json_api: JsonApiOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// JSON file with resource definitions; the demo graph is used when unset
    pub path: Option<String>,
}

/// Deployment-wide switches for query string handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonApiOptions {
    /// Ignore query string keys no service claims instead of rejecting them
    pub allow_unknown_query_parameters: bool,
    pub default_page_size: Option<usize>,
    pub maximum_page_size: Option<usize>,
    pub maximum_page_number: Option<usize>,
    pub maximum_include_depth: Option<usize>,
    /// Let clients override `omit_null_by_default` through `?omitNull=`
    pub allow_omit_null_override: bool,
    pub omit_null_by_default: bool,
    /// Let clients override `omit_default_by_default` through `?omitDefault=`
    pub allow_omit_default_override: bool,
    pub omit_default_by_default: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for JsonApiOptions {
    fn default() -> Self {
        Self {
            allow_unknown_query_parameters: false,
            default_page_size: Some(10),
            maximum_page_size: None,
            maximum_page_number: None,
            maximum_include_depth: None,
            allow_omit_null_override: false,
            omit_null_by_default: false,
            allow_omit_default_override: false,
            omit_default_by_default: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "JSONAPI_", e.g. JSONAPI_SERVER__PORT
        config = config.add_source(
            config::Environment::with_prefix("JSONAPI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the resource graph from the configured file, or the demo graph
    pub fn load_resource_graph(&self) -> anyhow::Result<ResourceGraph> {
        match &self.graph.path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                Ok(ResourceGraph::from_json(&json)?)
            }
            None => Ok(crate::seed::demo_resource_graph()?),
        }
    }
}
