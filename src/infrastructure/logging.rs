use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter(&config.level));

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?,
    }

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

/// Filter for the configured level, falling back to `info` on a bad directive
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let filter = build_filter("debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        let filter = build_filter("llm_param_lab=notalevel");
        assert_eq!(filter.to_string(), "info");
    }
}
