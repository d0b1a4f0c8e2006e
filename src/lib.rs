//! JSON-described mock HTTP server library.
//!
//! A route tree document (paths → per-method canned responses, nested
//! children) is compiled into an immutable table of strictly matched
//! endpoints and served with Axum.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::MockServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteCompiler, RouteTable, RouteTree};
