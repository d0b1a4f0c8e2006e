//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteTree (decoded document)
//!     → compiler.rs (validate segments, compose absolute paths)
//!     → table.rs (one Endpoint per path, method → CannedResponse)
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (path, method)
//!     → RouteTable::dispatch
//!     → Matched response, MethodNotAllowed or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Strict matching: the request path must equal a registered path
//! - Compilation is all-or-nothing
//! - Deterministic: same input always matches same response

pub mod compiler;
pub mod table;
pub mod tree;

pub use compiler::{Registrar, RegistrationError, RouteCompiler};
pub use table::{CannedResponse, Dispatch, Endpoint, RouteTable};
pub use tree::{PathGroup, Route, RouteTree};
