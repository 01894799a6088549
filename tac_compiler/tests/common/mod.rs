use simple_logger::SimpleLogger;
use std::env;

/// Install a logger when `RUST_LOG` is set, so pipeline
/// tracing can be inspected from a failing test.
///
/// Safe to call from every test, only the first call installs.
pub fn init_logger() {
    if env::var_os("RUST_LOG").is_some() {
        let _ = SimpleLogger::new().env().init();
    }
}
