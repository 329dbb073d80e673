//! telemetry - 可观测性库

use casedb_errors::{AppError, AppResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use metrics_exporter_prometheus::PrometheusHandle;

/// 存储操作计数器名称
pub const STORAGE_OPERATIONS_TOTAL: &str = "casedb_storage_operations_total";

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> AppResult<PrometheusHandle> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::configuration(format!("Failed to install Prometheus recorder: {}", e)))
}

/// 操作结果标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(&'static str),
}

impl Outcome {
    pub fn of<T>(result: &AppResult<T>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(e) => Outcome::Failure(e.category()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure(category) => category,
        }
    }
}

/// 记录一次存储操作
pub fn record_storage_operation(backend: &'static str, operation: &'static str, outcome: Outcome) {
    metrics::counter!(
        STORAGE_OPERATIONS_TOTAL,
        "backend" => backend,
        "operation" => operation,
        "outcome" => outcome.label()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedb_errors::WriteErrorKind;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_outcome_labels() {
        let ok: AppResult<()> = Ok(());
        assert_eq!(Outcome::of(&ok).label(), "success");

        let err: AppResult<()> = Err(AppError::not_found("case C1"));
        assert_eq!(Outcome::of(&err).label(), "not_found");
    }

    #[test]
    fn test_storage_operations_are_counted() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let saved: AppResult<()> = Ok(());
            record_storage_operation("sqlite", "save_new_case", Outcome::of(&saved));

            let duplicate: AppResult<()> =
                Err(AppError::storage_write(WriteErrorKind::Duplicate, "case C1"));
            record_storage_operation("sqlite", "save_new_case", Outcome::of(&duplicate));
            record_storage_operation("sqlite", "save_new_case", Outcome::of(&duplicate));
        });

        let rendered = handle.render();
        assert!(rendered.contains(
            r#"casedb_storage_operations_total{backend="sqlite",operation="save_new_case",outcome="success"} 1"#
        ));
        assert!(rendered.contains(
            r#"casedb_storage_operations_total{backend="sqlite",operation="save_new_case",outcome="write_error"} 2"#
        ));
    }
}
