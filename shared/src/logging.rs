//! Tracing subscriber bootstrap

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Calling this twice
/// returns an error from the second call and leaves the first subscriber in place.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let with_source = config.source_location;

    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(with_source)
            .with_line_number(with_source)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(with_source)
            .with_line_number(with_source)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_file(with_source)
            .with_line_number(with_source)
            .boxed(),
    };

    tracing_subscriber::registry().with(filter).with(layer).try_init()
}
