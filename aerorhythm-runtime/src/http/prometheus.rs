use actix_web::{get, web};
use lazy_static::lazy_static;
use prometheus::core::Collector;
use prometheus::{Encoder, Registry};
use std::sync::Once;

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
    static ref REGISTER_ONCE: Once = Once::new();
}

fn encode(families: &[prometheus::proto::MetricFamily]) -> String {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(families, &mut buffer) {
        tracing::error!("could not encode metrics: {}", e);
    };

    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("metrics could not be parsed with utf8: {}", e);
            String::default()
        }
    }
}

/// Service metrics followed by the default process metrics.
#[get("/metrics")]
async fn get_metrics() -> String {
    let mut res = encode(&REGISTRY.gather());

    res.push_str(&encode(&prometheus::gather()));

    res
}

fn register(metric: Box<dyn Collector>) {
    if let Err(e) = REGISTRY.register(metric) {
        tracing::error!("failed to register metric: {}", e);
    }
}

fn register_metrics() {
    register(Box::new(
        aerorhythm_core::metric::storage_unavailable_count_metric().clone(),
    ));
    register(Box::new(
        aerorhythm_core::metric::constraint_violation_count_metric().clone(),
    ));
    register(Box::new(
        aerorhythm_roster::metric::job_submission_count_metric().clone(),
    ));
    register(Box::new(
        aerorhythm_roster::metric::job_completion_count_metric().clone(),
    ));
    register(Box::new(
        aerorhythm_roster::metric::job_run_duration_metric().clone(),
    ));
    register(Box::new(
        aerorhythm_roster::metric::generated_assignment_count_metric().clone(),
    ));
}

super::register_routes!(app, {
    REGISTER_ONCE.call_once(|| {
        register_metrics();
    });

    app.service(web::scope("/prometheus").service(get_metrics))
});
