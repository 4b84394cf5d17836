//! Subscriber setup: formatter, level filter and the optional OTLP layer.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{ServerConfig, logging::LogFormat};

use super::ObservabilityError;

/// Dependencies that are chatty below `warn`. Quietened unless the configured
/// directive names them.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tonic", "tower", "opentelemetry", "sqlx"];

type FormatLayer = Box<dyn Layer<Registry> + Send + Sync>;

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_new(filter_directives(&config.logging.log_level))?;

    let otel = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(otel)
        .with(filter)
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> FormatLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

fn filter_directives(configured: &str) -> String {
    let configured = configured.trim();

    let mut directives = if configured.is_empty() {
        "info".to_owned()
    } else {
        configured.to_owned()
    };

    for target in QUIET_TARGETS {
        let named = configured
            .split(',')
            .any(|directive| directive.trim().starts_with(&format!("{target}=")));

        if !named {
            directives.push_str(&format!(",{target}=warn"));
        }
    }

    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependencies_are_quietened_by_default() {
        assert_eq!(
            filter_directives("debug"),
            "debug,h2=warn,hyper=warn,tonic=warn,tower=warn,opentelemetry=warn,sqlx=warn"
        );
    }

    #[test]
    fn explicitly_named_targets_keep_their_level() {
        let directives = filter_directives("info,sqlx=debug");

        assert!(directives.starts_with("info,sqlx=debug,"), "got {directives}");
        assert!(!directives.contains("sqlx=warn"), "got {directives}");
    }

    #[test]
    fn blank_levels_fall_back_to_info() {
        assert!(filter_directives("  ").starts_with("info,"));
    }

    #[test]
    fn unknown_levels_are_rejected() {
        assert!(EnvFilter::try_new(filter_directives("marketplace_json=loud")).is_err());
    }
}
