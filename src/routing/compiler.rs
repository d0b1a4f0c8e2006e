//! Route tree compilation.
//!
//! Walks a [`RouteTree`] depth-first, resolves every node's absolute path and
//! installs one strict endpoint per path through a [`Registrar`].
//!
//! # Path composition
//! - A segment is either exactly `/` or carries no trailing `/`
//! - Every segment starts with `/`
//! - Segments carry their own leading `/`; paths are plain concatenation
//! - Children of a root-level base (`""` or `/`) drop the base's `/`, so
//!   `"/"` with child `"/users"` yields `/users`, not `//users`
//! - Children are installed before their parent

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use thiserror::Error;
use tracing::Span;

use crate::routing::table::{CannedResponse, Endpoint, RouteTable};
use crate::routing::tree::{Route, RouteTree};

/// Errors that abort compilation of a route tree.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A non-root segment ends with `/`.
    #[error("path {0} ends with a /")]
    TrailingSlash(String),

    /// A segment does not start with `/`, so no request path could match it.
    #[error("path {0:?} does not start with a /")]
    MissingLeadingSlash(String),

    /// Two nodes resolve to the same absolute path.
    #[error("path {path} is registered more than once")]
    DuplicatePath { path: String },

    /// The method is not a valid HTTP token.
    #[error("invalid method {method:?} at {path}")]
    InvalidMethod { path: String, method: String },

    /// The status is outside 100..=999.
    #[error("invalid status {status} for {method} {path}")]
    InvalidStatus { path: String, method: String, status: u16 },

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid header {name:?} for {method} {path}")]
    InvalidHeader { path: String, method: String, name: String },
}

/// Target the compiler installs endpoints into.
pub trait Registrar {
    /// Install `endpoint` at the absolute `path`.
    fn register(&mut self, path: String, endpoint: Endpoint) -> Result<(), RegistrationError>;
}

/// Compiles route trees, logging inside an explicitly supplied span.
#[derive(Debug, Clone)]
pub struct RouteCompiler {
    span: Span,
}

impl RouteCompiler {
    /// Compiler logging under `routes{app="json-server"}`.
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("routes", app = "json-server"))
    }

    /// Compiler logging under the given span.
    pub fn with_span(span: Span) -> Self {
        Self { span }
    }

    /// Compile a whole tree mounted at the empty base path.
    ///
    /// Endpoints are staged in a fresh table that is only returned when every
    /// node compiled, so a failing tree never yields a partial route set.
    pub fn compile(&self, tree: &RouteTree) -> Result<RouteTable, RegistrationError> {
        let mut table = RouteTable::new();
        self.register("", tree, &mut table)?;
        tracing::info!(parent: &self.span, endpoints = table.len(), "Route tree compiled");
        Ok(table)
    }

    /// Register `tree` under `base` into an arbitrary registrar.
    ///
    /// Unlike [`compile`](Self::compile), a failure may leave endpoints that
    /// were registered before the error in `registrar`.
    pub fn register<R>(&self, base: &str, tree: &RouteTree, registrar: &mut R) -> Result<(), RegistrationError>
    where
        R: Registrar + ?Sized,
    {
        let _guard = self.span.enter();
        register_tree(base, tree, registrar)
    }
}

impl Default for RouteCompiler {
    fn default() -> Self {
        Self::new()
    }
}

fn register_tree<R>(base: &str, tree: &RouteTree, registrar: &mut R) -> Result<(), RegistrationError>
where
    R: Registrar + ?Sized,
{
    if tree.is_empty() {
        return Ok(());
    }
    tracing::debug!(base, "Registering routes");

    for (segment, group) in tree.iter() {
        if segment.len() > 1 && segment.ends_with('/') {
            return Err(RegistrationError::TrailingSlash(segment.to_string()));
        }
        if !segment.starts_with('/') {
            return Err(RegistrationError::MissingLeadingSlash(segment.to_string()));
        }

        let prefix = normalize_base(base, segment);
        let path = format!("{prefix}{segment}");

        if let Some(children) = &group.children {
            register_tree(&path, children, registrar)?;
        }

        let endpoint = build_endpoint(&path, &group.handlers)?;
        tracing::info!(path = %path, methods = ?endpoint.methods(), "Registering path");
        registrar.register(path, endpoint)?;
    }
    Ok(())
}

/// Drop the `/` of a root-level base so segments are not doubled.
fn normalize_base<'a>(base: &'a str, segment: &str) -> &'a str {
    if base.len() >= 2 {
        return base;
    }
    if base == "/" {
        tracing::warn!(
            segment,
            "Base route part of children, removing /. Place the main route in the handlers"
        );
    } else {
        tracing::debug!(segment, "Mounting segment at the server root");
    }
    base.strip_prefix('/').unwrap_or(base)
}

fn build_endpoint(path: &str, routes: &[Route]) -> Result<Endpoint, RegistrationError> {
    let mut endpoint = Endpoint::new();
    for route in routes {
        let method = Method::from_bytes(route.method.as_bytes()).map_err(|_| {
            RegistrationError::InvalidMethod {
                path: path.to_string(),
                method: route.method.clone(),
            }
        })?;
        let response = canned_response(path, route)?;

        if endpoint.insert(method, response).is_some() {
            tracing::warn!(
                path,
                method = %route.method,
                "Duplicate method in group, last definition wins"
            );
        }
    }
    Ok(endpoint)
}

fn canned_response(path: &str, route: &Route) -> Result<CannedResponse, RegistrationError> {
    let status = StatusCode::from_u16(route.status).map_err(|_| RegistrationError::InvalidStatus {
        path: path.to_string(),
        method: route.method.clone(),
        status: route.status,
    })?;

    let mut headers = HeaderMap::with_capacity(route.headers.len());
    for (name, value) in &route.headers {
        let invalid = || RegistrationError::InvalidHeader {
            path: path.to_string(),
            method: route.method.clone(),
            name: name.clone(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(name, value);
    }

    Ok(CannedResponse {
        status,
        headers,
        body: Bytes::copy_from_slice(route.body()),
    })
}
