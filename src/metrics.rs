use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// `OBSERVABILITY_ENABLED=false` (or `0`) turns off metrics and OTLP export.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and its upkeep task.
/// Returns `None` when observability is disabled or the recorder fails.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5,
                10.0,
            ],
        )
        .and_then(|b| b.install_recorder());

    let handle = match builder {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus recorder");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    let status_category = match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("http_requests_by_status", "status_category" => status_category).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router served on `METRICS_PORT`.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics

pub fn track_content_created(resource: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("content_created_total", "resource" => resource).increment(1);
}

pub fn track_content_deleted(resource: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("content_deleted_total", "resource" => resource).increment(1);
}

pub fn track_storage_cleanup_failure() {
    if !is_observability_enabled() {
        return;
    }
    counter!("storage_cleanup_failures_total").increment(1);
}

pub fn track_upload(folder: &str, bytes: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("uploads_total", "folder" => folder.to_string()).increment(1);
    histogram!("upload_size_bytes").record(bytes as f64);
}

pub fn track_upload_rejected(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("uploads_rejected_total", "reason" => reason).increment(1);
}

pub fn track_contact_message_received() {
    if !is_observability_enabled() {
        return;
    }
    counter!("contact_messages_received_total").increment(1);
}

pub fn track_application_submitted(grade: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("applications_submitted_total", "grade" => grade).increment(1);
}

pub fn track_admission_status_changed(status: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("admission_status_changes_total", "status" => status).increment(1);
}

pub fn track_admin_login_success(role: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("admin_logins_total", "role" => role, "status" => "success").increment(1);
}

pub fn track_admin_login_failure(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("admin_logins_total", "status" => "failure", "reason" => reason).increment(1);
}

pub fn track_jwt_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total").increment(1);
}
