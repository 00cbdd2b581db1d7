use crate::dispatch::ParamValue;
use crate::handler::HandlerChain;
use crate::reverse;
use http::Method;
use std::sync::Arc;

/// One registered route.
///
/// Routes are immutable once created and are handed out as `Arc<Route>`, so
/// a descriptor returned from registration or dispatch stays valid for the
/// life of the router. The name doubles as the route's sentinel group inside
/// compiled chunks, which is why it is restricted to identifier characters
/// and must be unique across the whole table.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    name: Arc<str>,
    /// Raw pattern as registered, group prefixes already applied
    pattern: String,
    /// Regex fragment, one capture group per placeholder, consumed by
    /// chunk assembly
    fragment: String,
    /// Reverse template with bare `:name` tokens
    template: String,
    /// Placeholder names in fragment order
    param_names: Vec<Arc<str>>,
    handlers: HandlerChain,
}

impl Route {
    pub(crate) fn new(
        method: Method,
        name: Arc<str>,
        pattern: String,
        fragment: String,
        template: String,
        param_names: Vec<Arc<str>>,
        handlers: HandlerChain,
    ) -> Self {
        Self {
            method,
            name,
            pattern,
            fragment,
            template,
            param_names,
            handlers,
        }
    }

    /// The HTTP method this route answers
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The route's unique name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern string the route was registered with
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The reverse-generation template (`/articles/:id` for
    /// `/articles/:id(int)`)
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The handler chain registered for this route
    #[must_use]
    pub fn handlers(&self) -> &HandlerChain {
        &self.handlers
    }

    pub(crate) fn fragment(&self) -> &str {
        &self.fragment
    }

    pub(crate) fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Generate a URL for this route from name/value pairs.
    ///
    /// Every `:name` token in the reverse template is replaced by the
    /// matching value's string form. Tokens without a supplied value are
    /// left as literal `:name` text, so callers producing user-visible URLs
    /// should supply every placeholder.
    ///
    /// ```
    /// # use volleyrouter::{HandlerChain, Router};
    /// let mut router = Router::new();
    /// let route = router
    ///     .get("article_read", "/articles/:id(int)", HandlerChain::new())
    ///     .unwrap();
    /// assert_eq!(route.url(&[("id", 7.into())]), "/articles/7");
    /// ```
    #[must_use]
    pub fn url(&self, params: &[(&str, ParamValue)]) -> String {
        reverse::substitute(&self.template, params)
    }
}
