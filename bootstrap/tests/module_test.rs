use std::sync::Arc;

use casedb_adapter_sqlite::SqliteCaseStorage;
use casedb_bootstrap::{CaseDbModule, new_sql_case_storage_service};
use casedb_common::{CaseAction, CaseRecordSpec, CaseStatus, Identifier};
use casedb_config::{AppConfig, DatabaseConfig};
use casedb_errors::{AppError, AppResult};
use casedb_ports::SharedCaseStorage;
use futures::future::BoxFuture;

fn embedded_config(dir: &tempfile::TempDir) -> AppConfig {
    let path = dir.path().join("cases.db");
    AppConfig {
        cases_storage: DatabaseConfig::embedded(path.to_string_lossy()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_module_from_embedded_config() {
    let dir = tempfile::tempdir().unwrap();
    let module = CaseDbModule::from_config(embedded_config(&dir))
        .await
        .expect("Failed to build module");

    let storage = module.storage();
    let c1 = Identifier::from("C1");
    storage.save_new_case(&c1).await.unwrap();

    let mut record = storage.find_case(&c1, &CaseRecordSpec::all()).await.unwrap();
    assert_eq!(record.status, CaseStatus::NewCase);
    record.status = CaseStatus::Closed;
    storage.update_case(&mut record).await.unwrap();

    let action = CaseAction::new(Identifier::from("A1"), c1.clone(), "close", CaseStatus::Closed);
    storage.save_case_context(&action).await.unwrap();

    // 同一模块交出的句柄指向同一个存储
    let other = module.storage();
    let found = other.find_case(&c1, &CaseRecordSpec::all()).await.unwrap();
    assert_eq!(found.status, CaseStatus::Closed);
    let history = other.get_context_for_case(&c1).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id.as_str(), "A1");
}

#[tokio::test]
async fn test_module_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.db");
    let toml = format!(
        "app_name = \"case-worker\"\n[cases_storage]\ndatabase_type = \"embedded\"\naddress = {:?}\nlog_sql = true\n",
        path.to_string_lossy()
    );
    let config = AppConfig::from_toml_str(&toml).unwrap();

    let module = CaseDbModule::from_config(config).await.unwrap();
    assert_eq!(module.config().app_name, "case-worker");
    assert!(module.config().cases_storage.log_sql);

    let all = module.storage().find_all_cases(&CaseRecordSpec::all()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_unreachable_client_server_fails_fast() {
    let mut cases_storage = DatabaseConfig::client_server("postgres://casedb@127.0.0.1:1/cases");
    cases_storage.connect_timeout_secs = 2;
    let config = AppConfig {
        cases_storage,
        ..Default::default()
    };

    let err = new_sql_case_storage_service(&config).await.err().unwrap();
    assert!(matches!(err, AppError::Configuration(_)));
}

#[tokio::test]
async fn test_invalid_client_server_address() {
    let config = AppConfig {
        cases_storage: DatabaseConfig::client_server("not a url"),
        ..Default::default()
    };

    let err = new_sql_case_storage_service(&config).await.err().unwrap();
    assert!(matches!(err, AppError::Configuration(_)));
}

fn in_memory_factory(_: &AppConfig) -> BoxFuture<'static, AppResult<SharedCaseStorage>> {
    Box::pin(async {
        let storage = SqliteCaseStorage::in_memory().await?;
        Ok(Arc::new(storage) as SharedCaseStorage)
    })
}

#[tokio::test]
async fn test_module_with_custom_factory() {
    let module = CaseDbModule::with_factory(AppConfig::default(), in_memory_factory)
        .await
        .unwrap();

    let storage = module.storage();
    storage.save_new_case(&Identifier::from("C1")).await.unwrap();
    let all = storage.find_all_cases(&CaseRecordSpec::all()).await.unwrap();
    assert_eq!(all.len(), 1);
}
