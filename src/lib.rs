//! # VolleyRouter
//!
//! **VolleyRouter** is a request-path router for Rust built around a
//! compiled, chunked-regex matching engine: it maps an HTTP method and URL
//! path to a named route, its handler chain, and a typed parameter mapping.
//!
//! ## Overview
//!
//! Routes are defined with `:name` placeholders, optionally constrained by
//! a raw regex or a convenience alias (`int`, `alpha`, `alphanumeric`,
//! `slug`, `mongo`, `md5`). At compile time every 15 routes of a method are
//! merged into one anchored alternation regex, so dispatching a path costs
//! one regex evaluation per chunk instead of one per route. Each
//! alternative is fronted by a named sentinel group carrying the route's
//! name, which is how the matcher learns *which* alternative matched an
//! alternation that reports no branch index.
//!
//! ## Architecture
//!
//! The library is organized into a handful of focused modules:
//!
//! - **[`router`]** - route table, registration, group scoping, and chunk
//!   compilation
//! - **[`dispatch`]** - extension gating, chunk scanning, and parameter
//!   extraction/coercion
//! - **[`route`]** - the immutable route descriptor, including reverse URL
//!   generation
//! - **[`handler`]** - the type-erased handler capability routes carry
//! - **[`error`]** - registration and compilation error types
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use volleyrouter::{HandlerChain, Router};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut router = Router::new();
//!     router.valid_extensions(["", "json"]);
//!
//!     router.get("home", "/", HandlerChain::new())?;
//!     router.group("/articles", "articles", |r| {
//!         r.get("read", "/:id(int)", HandlerChain::new())?;
//!         r.post("create", "", HandlerChain::new())?;
//!         Ok(())
//!     })?;
//!     router.compile()?;
//!
//!     let matched = router
//!         .dispatch(&Method::GET, "/articles/10.json")
//!         .expect("route should match");
//!     assert_eq!(matched.route.name(), "articles_read");
//!     assert_eq!(matched.params.get_int("id"), Some(10));
//!     assert_eq!(matched.ext(), "json");
//!
//!     let url = router.url("articles_read", &[("id", 10.into())]);
//!     assert_eq!(url, "/articles/10");
//!     Ok(())
//! }
//! ```
//!
//! ## Lifecycle and concurrency
//!
//! Registration and [`Router::compile`] are startup activities on `&mut
//! self`. `compile` is an explicit barrier: routes registered after it are
//! invisible to dispatch until it runs again. Once compiled, dispatch takes
//! `&self`, touches no shared mutable state, and returns the match by
//! value, so a router can serve any number of request threads
//! simultaneously (typically behind an `Arc`).

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod route;
pub mod router;

mod pattern;
mod reverse;

pub use dispatch::{ParamValue, Params, RouteMatch};
pub use error::{CompileError, RegistrationError};
pub use handler::{Handler, HandlerChain, HandlerError, HandlerResult, RequestContext};
pub use route::Route;
pub use router::Router;
