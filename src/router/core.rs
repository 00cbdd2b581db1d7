//! Router core - registration, group scoping, and chunk compilation.
//!
//! The router has a three-stage lifecycle: register routes (single threaded,
//! at startup), call [`Router::compile`] to build the per-method chunk
//! tables, then dispatch against the compiled state from as many threads as
//! needed. Registrations made after `compile` are invisible to dispatch
//! until `compile` runs again.

use super::chunks::{self, RouteChunk};
use crate::error::{CompileError, RegistrationError};
use crate::handler::HandlerChain;
use crate::pattern;
use crate::route::Route;
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// One group scope: the fully composed prefixes every registration inside
/// the scope receives. Frames stack, so nested groups see their ancestors'
/// prefixes already folded in.
#[derive(Debug, Clone, Default)]
struct GroupFrame {
    path_prefix: String,
    name_prefix: String,
}

impl GroupFrame {
    /// Compose a child frame from this one.
    ///
    /// Trailing `/` on the path prefix and trailing `_` on the name prefix
    /// are trimmed so joining with route patterns (which start with `/`)
    /// and route names (joined with `_`) never doubles the separator.
    fn nested(&self, path_prefix: &str, name_prefix: &str) -> GroupFrame {
        let mut path = self.path_prefix.clone();
        path.push_str(path_prefix.trim_end_matches('/'));

        let trimmed = name_prefix.trim_end_matches('_');
        let name = if self.name_prefix.is_empty() {
            trimmed.to_string()
        } else if trimmed.is_empty() {
            self.name_prefix.clone()
        } else {
            format!("{}_{}", self.name_prefix, trimmed)
        };

        GroupFrame {
            path_prefix: path,
            name_prefix: name,
        }
    }

    fn route_name(&self, name: &str) -> String {
        if self.name_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.name_prefix, name)
        }
    }

    fn route_pattern(&self, pattern: &str) -> String {
        format!("{}{}", self.path_prefix, pattern)
    }
}

/// Request-path router with chunked alternation matching.
///
/// Routes are stored by unique name and, per method, in registration order.
/// [`Router::compile`] merges every 15 routes of a method into one anchored
/// alternation regex, so looking up a path costs one regex evaluation per
/// chunk instead of one per route. Registration order is priority order:
/// when two routes could match the same path, the one registered first
/// wins.
///
/// After `compile`, dispatch only reads and the router can be shared across
/// request threads freely.
#[derive(Clone)]
pub struct Router {
    /// Routes by unique name
    routes: HashMap<Arc<str>, Arc<Route>>,
    /// Per-method routes in registration order
    routes_by_method: HashMap<Method, Vec<Arc<Route>>>,
    /// Compiled chunks, rebuilt wholesale by `compile`
    pub(crate) chunks_by_method: HashMap<Method, Vec<RouteChunk>>,
    /// Allowed extension suffixes; only `""` (no extension) by default
    pub(crate) valid_extensions: Vec<String>,
    /// Active group scopes, innermost last
    groups: Vec<GroupFrame>,
}

impl Router {
    /// Create an empty router.
    ///
    /// By default only extensionless requests pass the extension gate; see
    /// [`Router::valid_extensions`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            routes_by_method: HashMap::new(),
            chunks_by_method: HashMap::new(),
            valid_extensions: vec![String::new()],
            groups: Vec::new(),
        }
    }

    /// Register a route.
    ///
    /// `name` must be unique across the whole table and a legal identifier
    /// (`[A-Za-z_][A-Za-z0-9_]*`); it becomes the route's sentinel group in
    /// the compiled chunks. Any active group scope prefixes both the name
    /// and the pattern before validation, so conflicts are reported against
    /// the final composed values.
    ///
    /// The new route takes effect on the next [`Router::compile`].
    pub fn add_route(
        &mut self,
        method: Method,
        name: &str,
        pattern: &str,
        handlers: HandlerChain,
    ) -> Result<Arc<Route>, RegistrationError> {
        let (name, pattern) = match self.groups.last() {
            Some(frame) => (frame.route_name(name), frame.route_pattern(pattern)),
            None => (name.to_string(), pattern.to_string()),
        };

        if !pattern::is_valid_name(&name) {
            return Err(RegistrationError::InvalidName { name });
        }
        if self.routes.contains_key(name.as_str()) {
            return Err(RegistrationError::DuplicateName { name });
        }

        let compiled = pattern::compile(&pattern)?;

        let name: Arc<str> = Arc::from(name.as_str());
        let route = Arc::new(Route::new(
            method.clone(),
            Arc::clone(&name),
            pattern,
            compiled.fragment,
            compiled.template,
            compiled.param_names,
            handlers,
        ));

        debug!(
            method = %method,
            name = %route.name(),
            pattern = %route.pattern(),
            "route registered"
        );

        self.routes.insert(name, Arc::clone(&route));
        self.routes_by_method
            .entry(method)
            .or_default()
            .push(Arc::clone(&route));

        Ok(route)
    }

    /// Register a GET route
    pub fn get(
        &mut self,
        name: &str,
        pattern: &str,
        handlers: HandlerChain,
    ) -> Result<Arc<Route>, RegistrationError> {
        self.add_route(Method::GET, name, pattern, handlers)
    }

    /// Register a POST route
    pub fn post(
        &mut self,
        name: &str,
        pattern: &str,
        handlers: HandlerChain,
    ) -> Result<Arc<Route>, RegistrationError> {
        self.add_route(Method::POST, name, pattern, handlers)
    }

    /// Register a PUT route
    pub fn put(
        &mut self,
        name: &str,
        pattern: &str,
        handlers: HandlerChain,
    ) -> Result<Arc<Route>, RegistrationError> {
        self.add_route(Method::PUT, name, pattern, handlers)
    }

    /// Register a DELETE route
    pub fn delete(
        &mut self,
        name: &str,
        pattern: &str,
        handlers: HandlerChain,
    ) -> Result<Arc<Route>, RegistrationError> {
        self.add_route(Method::DELETE, name, pattern, handlers)
    }

    /// Run `register` with a path prefix and name prefix applied to every
    /// registration it makes.
    ///
    /// Groups nest: an inner group composes with the outer one, and the
    /// enclosing scope is restored when `register` returns, error or not.
    /// A trailing `/` on `path_prefix` and a trailing `_` on `name_prefix`
    /// are trimmed before composing.
    ///
    /// ```
    /// # use volleyrouter::{HandlerChain, Router};
    /// let mut router = Router::new();
    /// router
    ///     .group("/articles", "articles", |r| {
    ///         r.get("read", "/:id(int)", HandlerChain::new())?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// assert!(router.find_route("articles_read").is_some());
    /// ```
    pub fn group<F>(
        &mut self,
        path_prefix: &str,
        name_prefix: &str,
        register: F,
    ) -> Result<(), RegistrationError>
    where
        F: FnOnce(&mut Router) -> Result<(), RegistrationError>,
    {
        let frame = self
            .groups
            .last()
            .cloned()
            .unwrap_or_default()
            .nested(path_prefix, name_prefix);

        debug!(
            path_prefix = %frame.path_prefix,
            name_prefix = %frame.name_prefix,
            depth = self.groups.len() + 1,
            "group entered"
        );

        self.groups.push(frame);
        let result = register(self);
        self.groups.pop();
        result
    }

    /// Replace the set of allowed extension suffixes.
    ///
    /// The list replaces the default entirely: pass `""` as one of the
    /// entries if extensionless requests should keep matching.
    ///
    /// ```
    /// # use volleyrouter::Router;
    /// let mut router = Router::new();
    /// router.valid_extensions(["", "json"]);
    /// ```
    pub fn valid_extensions<I>(&mut self, extensions: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.valid_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Compile every method's routes into chunk tables.
    ///
    /// Previous chunks are discarded and rebuilt from the current route
    /// table, so calling this twice without registering in between yields
    /// equivalent state. Dispatch sees nothing registered after the last
    /// successful `compile`. On error the previously compiled chunks stay
    /// in effect.
    pub fn compile(&mut self) -> Result<(), CompileError> {
        let mut compiled = HashMap::with_capacity(self.routes_by_method.len());
        let mut chunk_total = 0;

        for (method, routes) in &self.routes_by_method {
            let method_chunks = chunks::compile_method(method, routes)?;
            chunk_total += method_chunks.len();
            compiled.insert(method.clone(), method_chunks);
        }

        self.chunks_by_method = compiled;

        info!(
            routes = self.routes.len(),
            methods = self.routes_by_method.len(),
            chunks = chunk_total,
            "route table compiled"
        );

        Ok(())
    }

    /// Look up a route by its unique name
    #[must_use]
    pub fn find_route(&self, name: &str) -> Option<Arc<Route>> {
        self.routes.get(name).cloned()
    }

    /// Generate a URL for the named route.
    ///
    /// Returns an empty string when no route has that name. Placeholders
    /// without a supplied value stay as literal `:name` text; see
    /// [`Route::url`].
    #[must_use]
    pub fn url(&self, name: &str, params: &[(&str, crate::dispatch::ParamValue)]) -> String {
        match self.routes.get(name) {
            Some(route) => route.url(params),
            None => String::new(),
        }
    }

    /// Routes registered for `method`, in registration order
    #[must_use]
    pub fn routes_for(&self, method: &Method) -> &[Arc<Route>] {
        self.routes_by_method
            .get(method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of registered routes
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for verifying what a configured router actually holds.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for (method, routes) in &self.routes_by_method {
            for route in routes {
                println!(
                    "[route] {} {} -> {} ({} handlers)",
                    method,
                    route.pattern(),
                    route.name(),
                    route.handlers().len()
                );
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
