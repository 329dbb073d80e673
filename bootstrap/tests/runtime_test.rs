use casedb_bootstrap::{CaseDbModule, init_runtime};
use casedb_common::Identifier;
use casedb_config::AppConfig;

// 全局 subscriber 和 recorder 只能安装一次，所以这个二进制里只有一个测试
#[tokio::test]
async fn test_runtime_exports_storage_metrics() {
    let config = AppConfig::from_toml_str(
        "[telemetry]\nlog_level = \"debug\"\n[cases_storage]\ndatabase_type = \"embedded\"\naddress = \":memory:\"\n",
    )
    .unwrap();
    let metrics = init_runtime(&config).unwrap();
    assert!(tracing::dispatcher::has_been_set());

    let module = CaseDbModule::from_config(config).await.unwrap();
    module.storage().save_new_case(&Identifier::from("C1")).await.unwrap();

    let rendered = metrics.render();
    assert!(rendered.contains(
        r#"casedb_storage_operations_total{backend="sqlite",operation="save_new_case",outcome="success"} 1"#
    ));
}
