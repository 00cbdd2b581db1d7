//! # Dispatch Module
//!
//! The dispatch module is the read side of the router: it maps an HTTP
//! method and request path to a matched route plus extracted parameters.
//!
//! ## Overview
//!
//! Dispatch is responsible for:
//! - Stripping and gating the request extension against the whitelist
//! - Scanning the method's compiled chunks in registration order
//! - Identifying the matched alternative via its sentinel capture group
//! - Extracting parameters and coercing integer-shaped values
//!
//! ## Result model
//!
//! A successful dispatch yields a [`RouteMatch`]: the route descriptor and
//! a [`Params`] set. Values are [`ParamValue::Int`] when the captured text
//! parses as a whole base-10 integer and [`ParamValue::Str`] otherwise. The
//! reserved `ext` entry always holds the stripped extension, `""` when the
//! path had none.
//!
//! A miss (unknown path, unregistered method, rejected extension) is
//! `None`, a normal outcome rather than an error.

mod core;

pub use core::{ParamValue, ParamVec, Params, RouteMatch, MAX_INLINE_PARAMS};
