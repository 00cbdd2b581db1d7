//! # Router Module
//!
//! The router module owns the route table: registration, group scoping, and
//! compilation of routes into the chunked matching engine.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering routes under unique names, per method, in order
//! - Applying group path/name prefixes to scoped registrations
//! - Compiling each method's routes into anchored alternation chunks
//! - Resolving routes by name for URL generation
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: [`Router::compile`] partitions each method's routes
//!    into batches of 15 and merges every batch into one anchored
//!    alternation regex. Each alternative is prefixed with a named sentinel
//!    group carrying the route's name.
//!
//! 2. **Matching**: for each incoming request, dispatch tests the request
//!    path against the method's chunks in order and reads the sentinel
//!    groups to learn which route matched; see the [`crate::dispatch`]
//!    module.
//!
//! Compilation is an explicit barrier: routes registered afterwards are
//! invisible to dispatch until `compile` runs again.
//!
//! ## Performance
//!
//! Bounding every compiled automaton to 15 alternatives keeps regex
//! construction and evaluation cost roughly flat as tables grow; a full
//! miss costs one evaluation per chunk, so dispatch is O(routes / 15) in
//! the number of registered routes for that method.

pub(crate) mod chunks;
mod core;

pub use core::Router;
