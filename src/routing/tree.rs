//! Route tree data model.
//!
//! The decoded form of a route document: path segments mapped to groups of
//! canned method handlers, each group optionally owning a nested tree.
//! Nothing here validates semantics; the compiler does that.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Mapping from path segment to the group mounted at that segment.
///
/// Keys iterate in sorted order so registration is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RouteTree(BTreeMap<String, PathGroup>);

impl RouteTree {
    /// Iterate over `(segment, group)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathGroup)> {
        self.0.iter().map(|(segment, group)| (segment.as_str(), group))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Handlers and sub-tree attached to one path segment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathGroup {
    /// Canned responses served at this exact path, in document order.
    #[serde(default)]
    pub handlers: Vec<Route>,

    /// Nested segments, resolved relative to this group's path.
    #[serde(default)]
    pub children: Option<RouteTree>,
}

/// One method's canned response definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// HTTP method token, matched exactly (case-sensitive).
    pub method: String,

    /// Status code to answer with.
    pub status: u16,

    /// Headers set on the response before the status is written.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Raw JSON slice of the response payload, kept byte-for-byte.
    /// `None` only when the key is absent; a literal `null` is kept as `null`.
    #[serde(default, deserialize_with = "present_raw")]
    pub response: Option<Box<RawValue>>,
}

fn present_raw<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

impl Route {
    /// Response body bytes; empty when no payload was configured.
    pub fn body(&self) -> &[u8] {
        self.response
            .as_deref()
            .map(|raw| raw.get().as_bytes())
            .unwrap_or_default()
    }
}
