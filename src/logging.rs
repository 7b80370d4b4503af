use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize structured logging. `LAKESHIFT_LOG` overrides the default
/// `info` level (`trace|debug|info|warn|error`).
pub fn init() {
    let level = std::env::var("LAKESHIFT_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok(); // Ignore err when re-run in tests
}
