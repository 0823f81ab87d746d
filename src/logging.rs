use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging. With `debug` the default level is `debug` and can be
/// overridden via `RUST_LOG`; otherwise `info` is forced. When `log_file` is
/// given, output goes to that file instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // `RUST_LOG` is only honoured with debug logging on.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file_appender = log_file.and_then(|path| {
        let dir = path.parent()?.to_path_buf();
        let name = path.file_name()?.to_owned();
        Some(tracing_appender::rolling::never(dir, name))
    });

    let _ = match file_appender {
        Some(appender) => builder.with_ansi(false).with_writer(appender).try_init(),
        None => builder.try_init(),
    };
}
