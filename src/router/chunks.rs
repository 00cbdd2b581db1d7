//! Chunk assembly - merges route fragments into alternation regexes.
//!
//! Each method's routes are partitioned, in registration order, into
//! batches of [`CHUNK_SIZE`]. A batch compiles into one anchored regex of
//! the form:
//!
//! ```text
//! ^(?:(?P<first>/?)fragment|(?P<second>/?)fragment|...)$
//! ```
//!
//! The `(?P<name>/?)` sentinel group in front of every alternative exists
//! to answer "which alternative matched": alternation reports no branch
//! index, but capture groups of losing branches never participate in the
//! match, so the first participating group names the winner. Fragments have
//! their leading slashes trimmed so the sentinel owns the slash and the
//! combined pattern never doubles it.
//!
//! A miss costs one regex evaluation per chunk, so dispatch scales with
//! `routes / CHUNK_SIZE` rather than the raw route count.

use crate::error::CompileError;
use crate::route::Route;
use http::Method;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Routes merged into one compiled alternation.
pub(crate) const CHUNK_SIZE: usize = 15;

/// What a capture index inside a chunk regex stands for.
///
/// The regex engine rejects duplicate group names even when they sit in
/// different alternation branches, and placeholder names repeat freely
/// between routes (`:id` everywhere). Placeholder groups are therefore
/// emitted unnamed while sentinels stay named (route names are unique),
/// and extraction walks capture indexes instead of names. This table is
/// what makes that walk cheap: index to role, no name lookups.
#[derive(Debug, Clone)]
pub(crate) enum GroupRole {
    /// The implicit whole-match group at index 0
    Whole,
    /// A route's sentinel group; participation marks the matched branch
    Sentinel(Arc<Route>),
    /// A placeholder group belonging to the preceding sentinel's route
    Param(Arc<str>),
}

/// One compiled alternation covering up to [`CHUNK_SIZE`] routes.
#[derive(Debug, Clone)]
pub(crate) struct RouteChunk {
    pub(crate) regex: Regex,
    /// Capture-index-aligned roles; `groups.len() == regex.captures_len()`
    pub(crate) groups: Vec<GroupRole>,
}

impl RouteChunk {
    /// Number of routes merged into this chunk
    pub(crate) fn route_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| matches!(g, GroupRole::Sentinel(_)))
            .count()
    }
}

/// Build the chunk list for one method from its ordered route slice.
///
/// Chunks are rebuilt from scratch on every call; nothing from a previous
/// compilation survives. An empty route slice yields an empty chunk list,
/// which dispatch treats as "no match".
pub(crate) fn compile_method(
    method: &Method,
    routes: &[Arc<Route>],
) -> Result<Vec<RouteChunk>, CompileError> {
    let mut chunks = Vec::with_capacity(routes.len().div_ceil(CHUNK_SIZE));

    for (index, batch) in routes.chunks(CHUNK_SIZE).enumerate() {
        let chunk = compile_batch(batch).map_err(|err| CompileError {
            method: method.clone(),
            chunk: index,
            detail: err.to_string(),
        })?;

        debug!(
            method = %method,
            chunk = index,
            routes = chunk.route_count(),
            pattern_len = chunk.regex.as_str().len(),
            "chunk compiled"
        );

        chunks.push(chunk);
    }

    Ok(chunks)
}

fn compile_batch(batch: &[Arc<Route>]) -> Result<RouteChunk, regex::Error> {
    let mut pattern = String::with_capacity(batch.len() * 24);
    pattern.push_str("^(?:");

    let mut groups = vec![GroupRole::Whole];

    for (i, route) in batch.iter().enumerate() {
        if i > 0 {
            pattern.push('|');
        }
        pattern.push_str("(?P<");
        pattern.push_str(route.name());
        pattern.push_str(">/?)");
        pattern.push_str(route.fragment().trim_start_matches('/'));

        groups.push(GroupRole::Sentinel(Arc::clone(route)));
        for name in route.param_names() {
            groups.push(GroupRole::Param(Arc::clone(name)));
        }
    }

    pattern.push_str(")$");

    let regex = Regex::new(&pattern)?;
    debug_assert_eq!(groups.len(), regex.captures_len());

    Ok(RouteChunk { regex, groups })
}
