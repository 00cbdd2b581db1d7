//! Dispatch core - the read side of the router.
//!
//! Dispatch gates the request extension, scans the method's compiled chunks
//! in order, identifies the matched alternative through its sentinel group,
//! and extracts coerced parameters. It only reads compiled state, so any
//! number of threads may dispatch against one router concurrently.

use crate::handler::RequestContext;
use crate::route::Route;
use crate::router::chunks::{GroupRole, RouteChunk};
use crate::router::Router;
use http::Method;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of parameters before parameter storage spills to the
/// heap. Patterns rarely carry more than a handful of placeholders, so the
/// common dispatch allocates nothing for storage.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
///
/// Param names are `Arc<str>` rather than `String`: they come from the
/// compiled route table, so attaching one to a match is an O(1) refcount
/// bump instead of a copy. Values are per-request data and own their text.
pub type ParamVec = SmallVec<[(Arc<str>, ParamValue); MAX_INLINE_PARAMS]>;

/// Reserved parameter key holding the stripped extension.
static EXT_KEY: Lazy<Arc<str>> = Lazy::new(|| Arc::from("ext"));

/// One extracted parameter value.
///
/// Captured text that parses as a full base-10 integer coerces to `Int`;
/// everything else stays `Str`. Serializes untagged, so `Int(10)` renders
/// as JSON `10` and `Str("x")` as `"x"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// The integer value, if this is an `Int`
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }

    /// The string value, if this is a `Str`
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Int(_) => None,
            ParamValue::Str(s) => Some(s.as_str()),
        }
    }

    /// Coerce raw captured text: whole-string base-10 parse (sign
    /// accepted), falling back to a string value.
    pub(crate) fn coerce(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => ParamValue::Int(n),
            Err(_) => ParamValue::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

/// Parameters extracted by one dispatch.
///
/// Entries keep extraction order. Lookup is last-write-wins, and the
/// reserved `ext` entry is pushed last, so `get("ext")` always reports the
/// stripped extension even when a route declares a placeholder of the same
/// name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(ParamVec);

impl Params {
    /// Empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: Arc<str>, value: ParamValue) {
        self.0.push((name, value));
    }

    /// Look up a parameter by name (last write wins)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Look up an integer parameter by name
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    /// Look up a string parameter by name
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// The stripped extension recorded under the reserved `ext` key
    #[must_use]
    pub fn ext(&self) -> &str {
        self.get("ext").and_then(ParamValue::as_str).unwrap_or("")
    }

    /// Number of entries, the `ext` entry included
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in extraction order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}

/// Result of successfully dispatching a request path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (shared, cheap to clone)
    pub route: Arc<Route>,
    /// Extracted parameters, the reserved `ext` entry included
    pub params: Params,
}

impl RouteMatch {
    /// Look up a parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// The stripped extension of the dispatched path
    #[must_use]
    pub fn ext(&self) -> &str {
        self.params.ext()
    }

    /// Build the context handed to this route's handlers.
    #[must_use]
    pub fn into_context(self, path: impl Into<String>) -> RequestContext {
        RequestContext {
            method: self.route.method().clone(),
            path: path.into(),
            route: self.route,
            params: self.params,
        }
    }
}

/// Split `path` into (path without extension, extension).
///
/// Only the final segment is inspected, and only a dot with at least one
/// character after it counts: `/a.b/c` carries no extension and neither
/// does `/a.`.
fn split_extension(path: &str) -> (&str, &str) {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let segment = &path[segment_start..];
    match segment.rfind('.') {
        Some(dot) if dot + 1 < segment.len() => {
            (&path[..segment_start + dot], &segment[dot + 1..])
        }
        _ => (path, ""),
    }
}

/// Match one chunk against the stripped path.
///
/// Groups of losing alternation branches never participate in a match, and
/// one branch's groups occupy contiguous capture indexes, so the first
/// participating group is the winning route's sentinel and everything up to
/// the next non-participating index belongs to that route.
fn scan_chunk(chunk: &RouteChunk, path: &str, ext: &str) -> Option<RouteMatch> {
    let caps = chunk.regex.captures(path)?;

    let mut route: Option<&Arc<Route>> = None;
    let mut params = Params::new();

    for (index, role) in chunk.groups.iter().enumerate().skip(1) {
        let Some(capture) = caps.get(index) else {
            if route.is_some() {
                break;
            }
            continue;
        };

        match role {
            GroupRole::Whole => {}
            GroupRole::Sentinel(r) => {
                if route.is_some() {
                    break;
                }
                route = Some(r);
            }
            GroupRole::Param(name) => {
                // Participating but empty captures (a `*`-style constraint
                // matching zero characters) are not reported.
                if route.is_some() && !capture.as_str().is_empty() {
                    params.push(Arc::clone(name), ParamValue::coerce(capture.as_str()));
                }
            }
        }
    }

    let route = route?;
    params.push(Arc::clone(&EXT_KEY), ParamValue::Str(ext.to_string()));

    Some(RouteMatch {
        route: Arc::clone(route),
        params,
    })
}

impl Router {
    /// Dispatch a request path against the compiled chunk tables.
    ///
    /// The extension (the part after the last `.` of the final path
    /// segment) is stripped and checked against the configured whitelist
    /// before any matching happens; a disallowed extension is an ordinary
    /// no-match. Chunks are scanned in registration order, so the earliest
    /// registered route wins any ambiguity. `None` is the normal "not
    /// found" outcome, covering unknown paths, unregistered methods and
    /// rejected extensions alike.
    ///
    /// Requires a prior [`Router::compile`]; routes registered after the
    /// last `compile` are invisible here.
    ///
    /// ```
    /// # use volleyrouter::{HandlerChain, Router};
    /// # use http::Method;
    /// let mut router = Router::new();
    /// router
    ///     .get("article_read", "/articles/:id(int)", HandlerChain::new())
    ///     .unwrap();
    /// router.compile().unwrap();
    ///
    /// let matched = router.dispatch(&Method::GET, "/articles/10").unwrap();
    /// assert_eq!(matched.route.name(), "article_read");
    /// assert_eq!(matched.params.get_int("id"), Some(10));
    /// ```
    #[must_use]
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "dispatch attempt");

        let (stripped, ext) = split_extension(path);
        if !self.valid_extensions.iter().any(|valid| valid == ext) {
            debug!(method = %method, path = %path, ext = %ext, "extension rejected");
            return None;
        }

        let match_start = Instant::now();

        let result = self.chunks_by_method.get(method).and_then(|chunks| {
            chunks
                .iter()
                .enumerate()
                .find_map(|(index, chunk)| scan_chunk(chunk, stripped, ext).map(|m| (index, m)))
        });

        let match_duration = match_start.elapsed();

        match result {
            Some((chunk_index, matched)) => {
                if match_duration > Duration::from_millis(1) {
                    warn!(
                        method = %method,
                        path = %path,
                        route = %matched.route.name(),
                        chunk = chunk_index,
                        duration_us = match_duration.as_micros(),
                        "slow route matching detected"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        route = %matched.route.name(),
                        chunk = chunk_index,
                        params = matched.params.len(),
                        duration_us = match_duration.as_micros(),
                        "route matched"
                    );
                }
                Some(matched)
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "no route matched"
                );
                None
            }
        }
    }
}
