use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "LVM2_LOG";
/// When set, logs from every crate are shown instead of only this one.
pub const LOG_ALL_ENV: &str = "LVM2_LOG_ALL";

/// Setup logging.
///
/// Only logs of this crate are shown, at the `info` level unless `LVM2_LOG` says otherwise.
/// `debug` forces the `debug` level, which includes every command line sent to the toolkit.
pub fn setup_logging(debug: bool) {
    let log_level = std::env::var(LOG_LEVEL_ENV).ok();
    let show_all_logs = std::env::var(LOG_ALL_ENV).is_ok();

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(log_filter(log_level.as_deref(), show_all_logs, debug)))
        .init();
}

/// Build the filter directive, e.g. `lvm2=info` or `debug`.
fn log_filter(log_level: Option<&str>, show_all_logs: bool, debug: bool) -> String {
    let log_level = match (debug, log_level) {
        (true, _) => "debug",
        (false, Some(level)) => level,
        (false, None) => "info",
    };

    if show_all_logs {
        log_level.to_string()
    } else {
        format!("lvm2={log_level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(None, false, false), "lvm2=info");
        assert_eq!(log_filter(Some("trace"), false, false), "lvm2=trace");
        assert_eq!(log_filter(Some("trace"), false, true), "lvm2=debug");
        assert_eq!(log_filter(Some("warn"), true, false), "warn");
        assert_eq!(log_filter(None, true, true), "debug");
    }
}
