//! Prometheus metrics for the message-store integrity sweep
//!
//! Tracks sweep cycles and the number of rows currently violating the
//! loader contract (self-messages, dangling contact references).

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram, IntCounterVec,
    IntGauge,
};
use std::time::Duration;

/// Total number of sweep cycles run (success/error)
static SWEEP_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "integrity_sweep_runs_total",
        "Total number of integrity sweep cycles (success/error)",
        &["status"]
    )
    .expect("failed to register integrity_sweep_runs_total")
});

/// Duration of sweep cycles
static SWEEP_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "integrity_sweep_duration_seconds",
        "Duration of integrity sweep cycles",
        vec![0.01, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("failed to register integrity_sweep_duration_seconds")
});

/// Messages whose sender equals their recipient, as of the last sweep
static SELF_MESSAGES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "integrity_self_messages",
        "Messages whose sender equals their recipient (last sweep)"
    )
    .expect("failed to register integrity_self_messages")
});

/// Messages referencing a missing contact, as of the last sweep
static DANGLING_MESSAGES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "integrity_dangling_messages",
        "Messages referencing a missing contact (last sweep)"
    )
    .expect("failed to register integrity_dangling_messages")
});

/// Record a sweep cycle completion
pub fn record_sweep_run(status: &str) {
    SWEEP_RUNS_TOTAL.with_label_values(&[status]).inc();
}

/// Record sweep cycle duration
pub fn record_sweep_duration(duration: Duration) {
    SWEEP_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Set violation gauges from the last sweep
pub fn set_violations(self_messages: i64, dangling: i64) {
    SELF_MESSAGES.set(self_messages);
    DANGLING_MESSAGES.set(dangling);
}
