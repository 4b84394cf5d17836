//! Per-request span, request id and latency accounting.

mod request_ids;
mod spans;
mod trace_headers;

use std::time::{Duration, Instant};

use salvo::{Depot, FlowCtrl, Handler, Request, Response, async_trait, http::StatusCode};
use tracing::{Instrument as _, error, field::Empty, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::config::observability::ObservabilityConfig;

use super::metrics;

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Hoop that runs each request inside an `http.request` span and records its
/// latency under the matched route.
///
/// Install it on the [`salvo::Service`] rather than the root router so
/// requests that match no route are counted too.
#[derive(Debug, Clone)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
    link_remote_parent: bool,
}

impl RequestLogging {
    pub(crate) fn new(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(config.slow_request_threshold_ms),
            // The propagator is only installed alongside the OTLP exporter.
            link_remote_parent: config.otel_enabled && config.otel_parent_propagation_enabled,
        }
    }
}

#[async_trait]
impl Handler for RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let route = spans::route_label(req.matched_path(), req.uri().path());

        if route == "/metrics" {
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let started = Instant::now();
        let _in_flight = metrics::InFlight::enter();

        let request_id = request_ids::request_id(req);
        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
        request_ids::echo(res, &request_id);

        let method = req.method().as_str().to_owned();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %spans::span_name(&method, &route),
            otel.kind = "server",
            request_id = %request_id,
            method = %method,
            route = %route,
            path = %req.uri().path(),
            remote_addr = %req.remote_addr(),
            status = Empty,
            duration_ms = Empty
        );

        if self.link_remote_parent
            && let Some(parent) = trace_headers::remote_parent(req.headers())
            && let Err(source) = span.set_parent(parent)
        {
            warn!("failed to attach remote parent to request span: {source}");
        }

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let elapsed = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = elapsed.as_millis();

        metrics::observe_request(&method, &route, status, elapsed.as_secs_f64());

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            if status.is_server_error() {
                error!(status = status.as_u16(), duration_ms, "request.failed");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), duration_ms, "request.rejected");
            } else {
                info!(status = status.as_u16(), duration_ms, "request.completed");
            }

            if elapsed > self.slow_request_threshold {
                warn!(
                    duration_ms,
                    threshold_ms = self.slow_request_threshold.as_millis(),
                    "request.slow"
                );
            }
        });
    }
}
