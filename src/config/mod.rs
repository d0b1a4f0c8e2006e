//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! route document (JSON)
//!     → loader.rs (decode)
//!     → RouteTree (handed to the route compiler, then dropped)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All settings fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_route_tree, parse_route_tree, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RoutesConfig, ServerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
