use http::Method;
use std::fmt;

/// Route registration error
///
/// Returned by `Router::add_route` and the method helpers when a route
/// definition is invalid. Registration never silently overwrites existing
/// state; every conflict is reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A route with this name is already registered
    ///
    /// Route names are unique across the whole table because the name doubles
    /// as the capture-group sentinel inside compiled chunks.
    DuplicateName {
        /// The conflicting route name
        name: String,
    },
    /// The same placeholder appears twice in one pattern
    ///
    /// Two parameters with the same name inside a single route would be
    /// ambiguous at extraction time.
    DuplicatePlaceholder {
        /// The repeated placeholder name
        placeholder: String,
        /// The pattern it appeared in
        pattern: String,
    },
    /// Route name is not a legal capture-group identifier
    ///
    /// Names must match `[A-Za-z_][A-Za-z0-9_]*` so they can be embedded as
    /// `(?P<name>...)` sentinels.
    InvalidName {
        /// The rejected route name
        name: String,
    },
    /// The pattern does not compile to a usable matching fragment
    ///
    /// Covers malformed constraint regexes, placeholders that are not legal
    /// identifiers, and constraints that smuggle in extra capture groups.
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// What was wrong with it
        detail: String,
    },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::DuplicateName { name } => {
                write!(
                    f,
                    "route registration error: a route named '{}' is already registered. \
                    Route names must be unique across the whole table.",
                    name
                )
            }
            RegistrationError::DuplicatePlaceholder {
                placeholder,
                pattern,
            } => {
                write!(
                    f,
                    "route registration error: placeholder ':{}' appears more than once \
                    in pattern '{}'.",
                    placeholder, pattern
                )
            }
            RegistrationError::InvalidName { name } => {
                write!(
                    f,
                    "route registration error: '{}' is not a valid route name. \
                    Expected an identifier matching [A-Za-z_][A-Za-z0-9_]*.",
                    name
                )
            }
            RegistrationError::InvalidPattern { pattern, detail } => {
                write!(
                    f,
                    "route registration error: invalid pattern '{}': {}",
                    pattern, detail
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Chunk compilation error
///
/// Returned by `Router::compile` when a merged alternation fails to compile.
/// Per-route fragments are validated at registration, so this is only
/// reachable through regex engine limits on the combined pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub(crate) method: Method,
    pub(crate) chunk: usize,
    pub(crate) detail: String,
}

impl CompileError {
    /// The method whose chunk failed to compile
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Zero-based index of the failing chunk within the method's chunk list
    #[must_use]
    pub fn chunk_index(&self) -> usize {
        self.chunk
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chunk compile error: failed to compile chunk {} for {}: {}",
            self.chunk, self.method, self.detail
        )
    }
}

impl std::error::Error for CompileError {}
