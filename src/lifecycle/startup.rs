//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the route tree named by the configuration
//! - Compile it into the immutable route table
//! - Release the tree once compiled
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when routes are ready)

use thiserror::Error;

use crate::config::{load_route_tree, ConfigError, ServerConfig};
use crate::routing::{RegistrationError, RouteCompiler, RouteTable};

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("error decoding the server: {0}")]
    Config(#[from] ConfigError),

    #[error("error registering the routes: {0}")]
    Registration(#[from] RegistrationError),
}

/// Load and compile the routes for `config`.
pub fn prepare(config: &ServerConfig, compiler: &RouteCompiler) -> Result<RouteTable, StartupError> {
    let path = &config.routes.file;
    tracing::info!(file = %path.display(), "Loading route tree");

    let tree = load_route_tree(path)?;
    let routes = compiler.compile(&tree)?;
    drop(tree);

    tracing::info!(endpoints = routes.len(), paths = ?routes.paths(), "Routes ready");
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(content: &str) -> ServerConfig {
        let path = std::env::temp_dir().join(format!("json-server-startup-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        let mut config = ServerConfig::default();
        config.routes.file = path;
        config
    }

    #[test]
    fn test_prepare_compiles_routes() {
        let config = config_for(r#"{"/": {"handlers": [{"method": "GET", "status": 200}]}}"#);
        let routes = prepare(&config, &RouteCompiler::new()).unwrap();
        assert_eq!(routes.paths(), vec!["/"]);
        fs::remove_file(&config.routes.file).unwrap();
    }

    #[test]
    fn test_prepare_rejects_malformed_tree() {
        let config = config_for(r#"{"/users/": {"handlers": []}}"#);
        let err = prepare(&config, &RouteCompiler::new()).unwrap_err();
        assert!(matches!(err, StartupError::Registration(RegistrationError::TrailingSlash(_))));
        fs::remove_file(&config.routes.file).unwrap();
    }

    #[test]
    fn test_prepare_missing_file() {
        let mut config = ServerConfig::default();
        config.routes.file = std::env::temp_dir().join("json-server-does-not-exist.json");
        let err = prepare(&config, &RouteCompiler::new()).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::NotFound(_))));
    }
}
