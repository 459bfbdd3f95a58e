//! Message-store integrity sweep
//!
//! The conversation query silently excludes rows that breach the loader
//! contract (self-messages, dangling contact references) so that one corrupt
//! record never fails a whole page. This job makes those exclusions
//! observable: it periodically counts offending rows, logs when any exist
//! and exports the counts as gauges for operational follow-up.
//!
//! The sweep never deletes or repairs rows; the store is append-only and
//! cleanup is an operator decision.

use crate::metrics::integrity as metrics;
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Check interval for the sweep (runs every 15 minutes)
const CHECK_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Messages whose sender equals their recipient
    pub self_messages: i64,
    /// Messages referencing a contact id that no longer exists
    pub dangling_messages: i64,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.self_messages == 0 && self.dangling_messages == 0
    }
}

pub async fn start_integrity_sweep(db: PgPool) {
    tracing::info!(
        "Starting integrity sweep background job (check_interval={}m)",
        CHECK_INTERVAL.as_secs() / 60
    );

    loop {
        sleep(CHECK_INTERVAL).await;

        let cycle_start = Instant::now();

        match sweep(&db).await {
            Ok(report) => {
                metrics::record_sweep_run("success");
                metrics::record_sweep_duration(cycle_start.elapsed());
                metrics::set_violations(report.self_messages, report.dangling_messages);

                if report.is_clean() {
                    tracing::debug!(
                        duration_ms = cycle_start.elapsed().as_millis(),
                        "integrity sweep clean"
                    );
                } else {
                    tracing::warn!(
                        self_messages = report.self_messages,
                        dangling_messages = report.dangling_messages,
                        "loader contract breach: corrupt messages excluded from conversations"
                    );
                }
            }
            Err(e) => {
                metrics::record_sweep_run("error");
                metrics::record_sweep_duration(cycle_start.elapsed());
                tracing::error!(error = %e, "integrity sweep failed");
            }
        }
    }
}

/// Count contract-breaching rows.
///
/// Dangling references cannot normally occur while the foreign keys stand,
/// but bulk loads may run with constraints dropped for speed; the sweep
/// checks anyway.
pub async fn sweep(db: &PgPool) -> Result<IntegrityReport, sqlx::Error> {
    let (self_messages,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM messages WHERE from_contact_id = to_contact_id",
    )
    .fetch_one(db)
    .await?;

    let (dangling_messages,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM messages m
        LEFT JOIN contacts c1 ON c1.id = m.from_contact_id
        LEFT JOIN contacts c2 ON c2.id = m.to_contact_id
        WHERE c1.id IS NULL OR c2.id IS NULL
        "#,
    )
    .fetch_one(db)
    .await?;

    Ok(IntegrityReport {
        self_messages,
        dangling_messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_report_has_no_violations() {
        let report = IntegrityReport {
            self_messages: 0,
            dangling_messages: 0,
        };
        assert!(report.is_clean());

        let report = IntegrityReport {
            self_messages: 1,
            dangling_messages: 0,
        };
        assert!(!report.is_clean());
    }
}
