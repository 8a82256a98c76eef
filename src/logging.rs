use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file path.
pub const LOG_ENV_VAR: &str = "SCREEN_RUNTIME_LOG";

/// Install a file subscriber if `env_var` names a log path.
///
/// Logging stays off unless asked for, so an embedding UI keeps its output
/// clean. The level comes from `RUST_LOG`, falling back to `default_level`.
/// Each process writes to its own file, `{path}.{timestamp}.{pid}`, so
/// concurrent instances never share one.
///
/// Returns `false` when nothing was installed (variable unset or the file
/// could not be created), leaving the caller free to pick another sink.
pub fn init_tracing(env_var: &str, default_level: &str) -> bool {
    let Some(log_path) = std::env::var_os(env_var) else {
        return false;
    };
    let unique_path = unique_log_path(&log_path.to_string_lossy());

    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: failed to create log file {}: {}", unique_path, e);
            return false;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(file_layer)
        .try_init();
    true
}

/// Stderr subscriber for the demo binary.
pub fn init_stderr_tracing(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
