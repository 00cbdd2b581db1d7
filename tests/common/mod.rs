#![allow(dead_code)]

pub mod tracing_setup {
    use std::sync::Once;

    static TRACING_INIT: Once = Once::new();

    /// Installs a fmt subscriber for the whole test binary.
    ///
    /// Honors `RUST_LOG`; defaults to `warn` so passing runs stay quiet.
    pub fn init() {
        TRACING_INIT.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .try_init();
        });
    }
}

pub mod handlers {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use volleyrouter::{Handler, HandlerChain, HandlerResult, RequestContext};

    /// Handler that does nothing and succeeds
    pub fn noop(_ctx: &RequestContext) -> HandlerResult {
        Ok(())
    }

    /// Handler that always fails
    pub fn failing(_ctx: &RequestContext) -> HandlerResult {
        Err("handler refused the request".into())
    }

    /// Empty chain for routes whose handlers are irrelevant to the test
    pub fn no_handlers() -> HandlerChain {
        HandlerChain::new()
    }

    /// Chain with a single succeeding handler
    pub fn noop_chain() -> HandlerChain {
        HandlerChain::new().with(noop)
    }

    /// Handler that counts its invocations
    pub struct CountingHandler {
        pub calls: Arc<AtomicUsize>,
    }

    impl Handler for CountingHandler {
        fn handle(&self, _ctx: &RequestContext) -> HandlerResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Chain with one counting handler, plus the shared counter to assert on
    pub fn counting_chain() -> (HandlerChain, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = HandlerChain::new().with(CountingHandler {
            calls: Arc::clone(&calls),
        });
        (chain, calls)
    }
}
