//! Test logging shared by every integration test binary.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the test subscriber once per process.
///
/// The filter comes from `TEST_LOG`, falling back to `RUST_LOG` and then to
/// `"warn"`. Output goes through the test writer so the harness captures it.
/// With `TEST_LOG_JSON=1` lines are emitted as JSON instead of plain text.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        if std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1") {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
