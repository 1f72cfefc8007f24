pub mod commands;
pub mod config;
pub mod error;
pub mod payload;
pub mod pipeline;
pub mod sink;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::ClientError;
pub use pipeline::{SubmissionHandle, SubmissionPipeline};
pub use state::AppState;

/// Install the global tracing subscriber (respects `RUST_LOG`).
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("destiny_client=info,destiny_store=info,destiny_shared=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
