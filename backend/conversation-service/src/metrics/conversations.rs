//! Prometheus metrics for the conversation query path

use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter_vec, Histogram, IntCounterVec};

/// Total conversation queries served, split by whether a search term was set
static QUERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "conversation_queries_total",
        "Total conversation list queries served",
        &["filter"]
    )
    .expect("failed to register conversation_queries_total")
});

/// Rows returned per page (0..=50)
static RESULT_ROWS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "conversation_query_result_rows",
        "Conversations returned per page",
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0]
    )
    .expect("failed to register conversation_query_result_rows")
});

/// Record a served query
pub fn record_query(match_all: bool, rows: usize) {
    let filter = if match_all { "match_all" } else { "search" };
    QUERIES_TOTAL.with_label_values(&[filter]).inc();
    RESULT_ROWS.observe(rows as f64);
}
