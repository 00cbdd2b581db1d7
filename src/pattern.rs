//! Pattern compiler - turns route definition strings into matching fragments.
//!
//! A pattern like `/articles/:id(int)` compiles into two artifacts:
//!
//! 1. A regex fragment with one unnamed capture group per placeholder
//!    (`/articles/([0-9]+)`), later merged into chunk alternations. Names
//!    travel beside the fragment in group order instead of inside it: the
//!    regex engine rejects duplicate group names even across alternation
//!    branches, so two routes sharing an `:id` could never share a chunk
//!    otherwise.
//! 2. A reverse template with bare `:name` tokens (`/articles/:id`), used
//!    only for URL generation.
//!
//! Text outside placeholders is copied into the fragment verbatim, so it is
//! treated as regex text, not as literal characters. Constraints are either
//! a convenience alias (`int`, `alpha`, `alphanumeric`, `slug`, `mongo`,
//! `md5`) or a raw subpattern.

use crate::error::RegistrationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Matches `:name` and `:name(constraint)` placeholders.
///
/// The constraint body runs up to the first `)`, so constraints cannot nest
/// parenthesized groups. Anything that slips through unbalanced is rejected
/// when the assembled fragment is compiled below.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z0-9_]+)(?:\(([^)]+)\))?").expect("placeholder regex is valid")
});

/// A route pattern compiled into its matching and generation forms.
#[derive(Debug, Clone)]
pub(crate) struct CompiledPattern {
    /// Regex fragment with one unnamed `(...)` group per placeholder, not
    /// anchored
    pub(crate) fragment: String,
    /// Pattern with constraints stripped, `:name` tokens left in place
    pub(crate) template: String,
    /// Placeholder names in the order they appear in the fragment
    pub(crate) param_names: Vec<Arc<str>>,
}

/// Expand a constraint alias to its subpattern, or pass raw constraints
/// through untouched. Aliases only apply when they span the whole
/// constraint, so `:id(int)` expands while `:id(mint)` stays a raw regex.
fn alias_subpattern(constraint: &str) -> &str {
    match constraint {
        "int" => "[0-9]+",
        "alpha" => "[a-z]+",
        "alphanumeric" => "[a-z0-9]+",
        "slug" => "[a-z0-9-]+",
        "mongo" => "[0-9a-fA-F]{24}",
        "md5" => "[0-9a-fA-F]{32}",
        other => other,
    }
}

/// Whether `name` is legal as a route or placeholder identifier.
///
/// Route names are embedded as `(?P<name>...)` sentinel groups, so the rule
/// is the regex engine's group-name rule; placeholder names follow the same
/// rule to stay usable as template tokens and parameter keys.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Compile a raw pattern into a `CompiledPattern`.
///
/// Every placeholder becomes exactly one capture group: constrained
/// placeholders keep their (alias-expanded) constraint, bare ones fall back
/// to `[^/]+`. The assembled fragment is compiled once with the real regex
/// engine so malformed constraints fail at registration instead of inside
/// `Router::compile`.
pub(crate) fn compile(pattern: &str) -> Result<CompiledPattern, RegistrationError> {
    let mut fragment = String::with_capacity(pattern.len() + 16);
    let mut template = String::with_capacity(pattern.len());
    let mut param_names: Vec<Arc<str>> = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(pattern) {
        let (Some(whole), Some(name_match)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        fragment.push_str(&pattern[last..whole.start()]);
        template.push_str(&pattern[last..whole.start()]);
        last = whole.end();

        let name = name_match.as_str();
        if !is_valid_name(name) {
            return Err(RegistrationError::InvalidPattern {
                pattern: pattern.to_string(),
                detail: format!("placeholder ':{}' is not a valid identifier", name),
            });
        }
        if param_names.iter().any(|p| p.as_ref() == name) {
            return Err(RegistrationError::DuplicatePlaceholder {
                placeholder: name.to_string(),
                pattern: pattern.to_string(),
            });
        }

        let subpattern = match caps.get(2) {
            Some(constraint) => alias_subpattern(constraint.as_str()),
            None => "[^/]+",
        };

        fragment.push('(');
        fragment.push_str(subpattern);
        fragment.push(')');

        template.push(':');
        template.push_str(name);

        param_names.push(Arc::from(name));
    }

    fragment.push_str(&pattern[last..]);
    template.push_str(&pattern[last..]);

    let anchored = Regex::new(&format!("^(?:{})$", fragment)).map_err(|err| {
        RegistrationError::InvalidPattern {
            pattern: pattern.to_string(),
            detail: err.to_string(),
        }
    })?;

    // One group per placeholder plus the implicit whole-match group. A raw
    // constraint that sneaks in its own capturing group would shift every
    // index after it once fragments are merged into a chunk.
    if anchored.captures_len() != param_names.len() + 1 {
        return Err(RegistrationError::InvalidPattern {
            pattern: pattern.to_string(),
            detail: format!(
                "pattern compiles to {} capture groups, expected {}; \
                constraints must not introduce their own groups",
                anchored.captures_len() - 1,
                param_names.len()
            ),
        });
    }

    Ok(CompiledPattern {
        fragment,
        template,
        param_names,
    })
}
