//! Compiled route table and strict dispatch.
//!
//! # Responsibilities
//! - Hold one endpoint per absolute path
//! - Resolve a request (path, method) to a canned response, 405 or 404
//!
//! # Design Decisions
//! - Immutable after compilation (shared via Arc, no locks)
//! - Exact path equality only, no prefix or sub-path matching
//! - O(1) path lookup, O(1) method lookup

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};

use crate::routing::compiler::{Registrar, RegistrationError};

/// A fully validated response, ready to be written for every matching request.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Method dispatch table for one absolute path.
#[derive(Debug, Clone, Default)]
pub struct Endpoint {
    methods: HashMap<Method, CannedResponse>,
}

impl Endpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a response for `method`, returning the one it replaced.
    pub fn insert(&mut self, method: Method, response: CannedResponse) -> Option<CannedResponse> {
        self.methods.insert(method, response)
    }

    pub fn get(&self, method: &Method) -> Option<&CannedResponse> {
        self.methods.get(method)
    }

    /// Supported methods, sorted for stable log output.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.methods.keys().map(Method::as_str).collect();
        methods.sort_unstable();
        methods
    }
}

/// Outcome of looking up a request in the table.
#[derive(Debug)]
pub enum Dispatch<'a> {
    /// Path and method both registered.
    Matched(&'a CannedResponse),
    /// Path registered, method not.
    MethodNotAllowed,
    /// Path not registered.
    NotFound,
}

/// Every registered endpoint, keyed by absolute path.
#[derive(Debug, Default)]
pub struct RouteTable {
    endpoints: HashMap<String, Endpoint>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a request against the table.
    pub fn dispatch(&self, path: &str, method: &Method) -> Dispatch<'_> {
        match self.endpoints.get(path) {
            None => Dispatch::NotFound,
            Some(endpoint) => match endpoint.get(method) {
                Some(response) => Dispatch::Matched(response),
                None => Dispatch::MethodNotAllowed,
            },
        }
    }

    pub fn endpoint(&self, path: &str) -> Option<&Endpoint> {
        self.endpoints.get(path)
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Registrar for RouteTable {
    fn register(&mut self, path: String, endpoint: Endpoint) -> Result<(), RegistrationError> {
        if self.endpoints.contains_key(&path) {
            return Err(RegistrationError::DuplicatePath { path });
        }
        self.endpoints.insert(path, endpoint);
        Ok(())
    }
}
