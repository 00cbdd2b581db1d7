//! Tests for route registration and the compile lifecycle
//!
//! # Test Coverage
//!
//! - Registration validation: name syntax, duplicate names, placeholder
//!   conflicts, malformed patterns
//! - The compile barrier: dispatch only sees routes from the last
//!   successful `compile`, and recompiling picks up later registrations
//! - Lookup helpers: `find_route`, `routes_for`, `route_count`
//!
//! Dispatch semantics (extraction, extensions, priority) live in
//! `dispatch_tests.rs`; group scoping lives in `group_tests.rs`.

mod common;

use common::handlers::no_handlers;
use common::tracing_setup;
use http::Method;
use volleyrouter::{RegistrationError, Router};

fn compiled_router(routes: &[(&str, &str)]) -> Router {
    tracing_setup::init();
    let mut router = Router::new();
    for (name, pattern) in routes {
        router.get(name, pattern, no_handlers()).unwrap();
    }
    router.compile().unwrap();
    router
}

fn assert_route_match(router: &Router, method: Method, path: &str, expected_name: &str) {
    match router.dispatch(&method, path) {
        Some(found) => {
            println!("✅ {} {} → {}", method, path, found.route.name());
            assert_eq!(
                found.route.name(),
                expected_name,
                "Route mismatch for {} {}: expected '{}', got '{}'",
                method,
                path,
                expected_name,
                found.route.name()
            );
        }
        None => {
            println!("❌ {} {} → no match", method, path);
            assert_eq!(
                expected_name, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
}

#[test]
fn test_register_and_match_literal_route() {
    let router = compiled_router(&[("animals", "/zoo/animals")]);
    assert_route_match(&router, Method::GET, "/zoo/animals", "animals");
}

#[test]
fn test_root_route() {
    let router = compiled_router(&[("home", "/")]);
    assert_route_match(&router, Method::GET, "/", "home");
    assert_route_match(&router, Method::GET, "/anything", "<none>");
}

#[test]
fn test_method_mismatch_does_not_match() {
    let router = compiled_router(&[("animals", "/zoo/animals")]);
    assert_route_match(&router, Method::POST, "/zoo/animals", "<none>");
}

#[test]
fn test_empty_router_compiles_and_matches_nothing() {
    tracing_setup::init();
    let mut router = Router::new();
    router.compile().unwrap();
    assert_route_match(&router, Method::GET, "/", "<none>");
    assert_eq!(router.route_count(), 0);
}

#[test]
fn test_duplicate_name_rejected_across_methods() {
    tracing_setup::init();
    let mut router = Router::new();
    router.get("animals", "/zoo/animals", no_handlers()).unwrap();
    let err = router
        .post("animals", "/zoo/animals", no_handlers())
        .unwrap_err();
    assert_eq!(
        err,
        RegistrationError::DuplicateName {
            name: "animals".to_string()
        }
    );
    assert_eq!(router.route_count(), 1);
}

#[test]
fn test_name_syntax_is_enforced() {
    tracing_setup::init();
    let mut router = Router::new();
    for bad in ["", "9lives", "with space", "dash-ed", "dot.ted"] {
        let err = router.get(bad, "/x", no_handlers()).unwrap_err();
        assert!(
            matches!(err, RegistrationError::InvalidName { .. }),
            "expected InvalidName for '{bad}', got {err:?}"
        );
    }
    router.get("_ok", "/x", no_handlers()).unwrap();
    router.get("ok9", "/y", no_handlers()).unwrap();
}

#[test]
fn test_route_name_equal_to_its_placeholder_allowed() {
    // Route names and placeholder names live in separate namespaces.
    tracing_setup::init();
    let mut router = Router::new();
    router.get("id", "/things/:id(int)", no_handlers()).unwrap();
    router.compile().unwrap();
    assert_route_match(&router, Method::GET, "/things/7", "id");
}

#[test]
fn test_duplicate_placeholder_rejected() {
    tracing_setup::init();
    let mut router = Router::new();
    let err = router
        .get("pair", "/x/:id/:id", no_handlers())
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::DuplicatePlaceholder { .. }
    ));
}

#[test]
fn test_malformed_patterns_rejected() {
    tracing_setup::init();
    let mut router = Router::new();
    // Stray open paren unbalances the compiled fragment.
    let err = router.get("broken", "/x/:v(", no_handlers()).unwrap_err();
    assert!(matches!(err, RegistrationError::InvalidPattern { .. }));

    // ":30" scans as a placeholder but digits cannot start an identifier.
    let err = router
        .get("clock", "/time/12:30", no_handlers())
        .unwrap_err();
    assert!(matches!(err, RegistrationError::InvalidPattern { .. }));
}

#[test]
fn test_failed_registration_leaves_table_untouched() {
    tracing_setup::init();
    let mut router = Router::new();
    router.get("good", "/good", no_handlers()).unwrap();
    router.get("broken", "/x/:v(", no_handlers()).unwrap_err();

    assert_eq!(router.route_count(), 1);
    router.compile().unwrap();
    assert_route_match(&router, Method::GET, "/good", "good");
}

#[test]
fn test_compile_barrier_hides_later_registrations() {
    tracing_setup::init();
    let mut router = Router::new();
    router.get("first", "/first", no_handlers()).unwrap();
    router.compile().unwrap();
    assert_route_match(&router, Method::GET, "/first", "first");

    // Registered but not yet compiled: invisible to dispatch.
    router.get("second", "/second", no_handlers()).unwrap();
    assert_route_match(&router, Method::GET, "/second", "<none>");
    assert!(router.find_route("second").is_some());

    router.compile().unwrap();
    assert_route_match(&router, Method::GET, "/second", "second");
    assert_route_match(&router, Method::GET, "/first", "first");
}

#[test]
fn test_recompile_without_changes_is_stable() {
    let mut router = compiled_router(&[("a", "/a"), ("b", "/b/:id(int)")]);
    router.compile().unwrap();
    router.compile().unwrap();

    assert_route_match(&router, Method::GET, "/a", "a");
    assert_route_match(&router, Method::GET, "/b/7", "b");
    assert_eq!(router.route_count(), 2);
}

#[test]
fn test_find_route_by_name() {
    let router = compiled_router(&[("article_read", "/articles/:id(int)")]);
    let route = router.find_route("article_read").unwrap();
    assert_eq!(route.pattern(), "/articles/:id(int)");
    assert_eq!(route.method(), &Method::GET);
    assert!(router.find_route("missing").is_none());
}

#[test]
fn test_routes_for_keeps_registration_order() {
    tracing_setup::init();
    let mut router = Router::new();
    router.get("one", "/one", no_handlers()).unwrap();
    router.post("created", "/one", no_handlers()).unwrap();
    router.get("two", "/two", no_handlers()).unwrap();
    router.get("three", "/three", no_handlers()).unwrap();

    let get_names: Vec<&str> = router
        .routes_for(&Method::GET)
        .iter()
        .map(|r| r.name())
        .collect();
    assert_eq!(get_names, vec!["one", "two", "three"]);

    let post_names: Vec<&str> = router
        .routes_for(&Method::POST)
        .iter()
        .map(|r| r.name())
        .collect();
    assert_eq!(post_names, vec!["created"]);

    assert!(router.routes_for(&Method::DELETE).is_empty());
    assert_eq!(router.route_count(), 4);
}

#[test]
fn test_all_verb_helpers_register() {
    tracing_setup::init();
    let mut router = Router::new();
    router.get("read", "/things/:id(int)", no_handlers()).unwrap();
    router.post("create", "/things", no_handlers()).unwrap();
    router.put("update", "/things/:id(int)", no_handlers()).unwrap();
    router.delete("remove", "/things/:id(int)", no_handlers()).unwrap();
    router.compile().unwrap();

    assert_route_match(&router, Method::GET, "/things/1", "read");
    assert_route_match(&router, Method::POST, "/things", "create");
    assert_route_match(&router, Method::PUT, "/things/1", "update");
    assert_route_match(&router, Method::DELETE, "/things/1", "remove");
}

#[test]
fn test_dump_routes_smoke() {
    let router = compiled_router(&[("a", "/a"), ("b", "/b")]);
    router.dump_routes();
}

#[test]
fn test_registration_error_display() {
    let err = RegistrationError::DuplicateName {
        name: "dup".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "route registration error: a route named 'dup' is already registered. \
        Route names must be unique across the whole table."
    );

    let err = RegistrationError::InvalidName {
        name: "bad-name".to_string(),
    };
    assert!(err.to_string().contains("bad-name"));
}
