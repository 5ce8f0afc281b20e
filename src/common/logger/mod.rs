use std::{fs, path::Path};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod formatter;
pub mod writer;

pub use formatter::CustomFormatter;
pub use writer::CircularFileWriter;

use crate::configs::{Config, LoggingConfig};

/// Builds the filter directive string from the logging section.
///
/// Noisy dependency targets are pinned to `warn` unless the configured
/// filters say otherwise.
pub fn filter_directives(logging: Option<&LoggingConfig>) -> String {
    let level = logging
        .and_then(|l| l.level.as_deref())
        .unwrap_or("info");
    let filters = logging.and_then(|l| l.filters.as_deref()).unwrap_or("");

    if filters.is_empty() {
        format!("{},symphonia=warn,reqwest=warn,hyper=warn", level)
    } else {
        format!("{},symphonia=warn,reqwest=warn,hyper=warn,{}", level, filters)
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the configured directives. Calling this twice is a
/// no-op for the second call.
pub fn init(config: &Config) {
    let directives = filter_directives(config.logging.as_ref());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let stdout_layer = fmt::layer()
        .event_format(CustomFormatter::new(true))
        .with_ansi(true);

    let file_layer = config
        .logging
        .as_ref()
        .and_then(|l| l.file.as_ref())
        .map(|file_config| {
            if let Some(parent) = Path::new(&file_config.path).parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!("Failed to create log directory: {}", e);
                }
            }
            fmt::layer()
                .with_writer(CircularFileWriter::new(
                    file_config.path.clone(),
                    file_config.max_lines,
                ))
                .event_format(CustomFormatter::new(false))
                .with_ansi(false)
        });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_use_info() {
        assert_eq!(
            filter_directives(None),
            "info,symphonia=warn,reqwest=warn,hyper=warn"
        );
    }

    #[test]
    fn configured_filters_are_appended() {
        let logging = LoggingConfig {
            level: Some("debug".into()),
            filters: Some("prismix::voice=trace".into()),
            file: None,
        };
        assert_eq!(
            filter_directives(Some(&logging)),
            "debug,symphonia=warn,reqwest=warn,hyper=warn,prismix::voice=trace"
        );
    }
}
