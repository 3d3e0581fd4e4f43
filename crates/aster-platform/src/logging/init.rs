use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "aster_platform=debug,wgpu=warn"). When absent, `RUST_LOG` applies,
/// then an info-level default.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Output goes to standard error explicitly; the platform's diagnostic
/// contract, independent of `env_logger` defaults.
pub fn init_logging(config: LogConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.target(env_logger::Target::Stderr);
        builder.init();

        log::debug!("logging initialized");
    });
}
