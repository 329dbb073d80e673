use casedb_adapter_sqlite::SqliteCaseStorage;
use casedb_common::{CaseAction, CaseRecordSpec, CaseStatus, Identifier};
use casedb_ports::CaseStorageService;
use metrics_exporter_prometheus::PrometheusBuilder;

fn series(operation: &str, outcome: &str, count: u64) -> String {
    format!(
        "casedb_storage_operations_total{{backend=\"sqlite\",operation=\"{}\",outcome=\"{}\"}} {}",
        operation, outcome, count
    )
}

// 本地 recorder 绑定在当前线程，tokio::test 默认是单线程运行时
#[tokio::test]
async fn test_every_operation_is_counted() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let storage = SqliteCaseStorage::in_memory().await.unwrap();
    let c1 = Identifier::from("C1");

    storage.save_new_case(&c1).await.unwrap();
    assert!(storage.save_new_case(&c1).await.is_err());

    let mut record = storage.find_case(&c1, &CaseRecordSpec::all()).await.unwrap();
    assert!(storage
        .find_case(&Identifier::from("C2"), &CaseRecordSpec::all())
        .await
        .is_err());
    storage.find_all_cases(&CaseRecordSpec::all()).await.unwrap();

    record.status = CaseStatus::Started;
    storage.update_case(&mut record).await.unwrap();

    let action = CaseAction::new(Identifier::from("A1"), c1.clone(), "start", CaseStatus::Started);
    storage.save_case_context(&action).await.unwrap();
    let orphan = CaseAction::new(Identifier::from("A2"), Identifier::from("C9"), "start", CaseStatus::Started);
    assert!(storage.save_case_context(&orphan).await.is_err());

    storage
        .get_case_context(&action.id, &Default::default())
        .await
        .unwrap();
    storage.get_context_for_case(&c1).await.unwrap();

    let rendered = handle.render();
    for expected in [
        series("save_new_case", "success", 1),
        series("save_new_case", "write_error", 1),
        series("find_case", "success", 1),
        series("find_case", "not_found", 1),
        series("find_all_cases", "success", 1),
        series("update_case", "success", 1),
        series("save_case_context", "success", 1),
        series("save_case_context", "write_error", 1),
        series("get_case_context", "success", 1),
        series("get_context_for_case", "success", 1),
    ] {
        assert!(rendered.contains(&expected), "missing {} in\n{}", expected, rendered);
    }
}
