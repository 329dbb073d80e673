//! 服务运行时

use casedb_config::AppConfig;
use casedb_errors::AppResult;
use casedb_telemetry::{PrometheusHandle, init_metrics, init_tracing, init_tracing_json};
use tracing::info;

/// 初始化服务运行时：日志与全局 metrics recorder
///
/// 返回的句柄用于导出 Prometheus 文本。每个进程只能调用一次。
pub fn init_runtime(config: &AppConfig) -> AppResult<PrometheusHandle> {
    // 初始化 tracing
    if config.telemetry.json || config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    let metrics = init_metrics()?;

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
    Ok(metrics)
}
