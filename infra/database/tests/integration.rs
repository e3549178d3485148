use camp_database::*;
use serde::Deserialize;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    #[derive(Debug, Deserialize)]
    struct CountRow {
        total: u64,
    }

    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // The same statements again must not error.
    let db2 = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("second bootstrap");
    drop(db2);

    // The bootstrapped tables are usable immediately.
    db.query("CREATE type::thing('bootcamp', 'it1') CONTENT { name: 'Iron Yard' } RETURN NONE")
        .await
        .expect("create query")
        .check()
        .expect("create should succeed");

    let total: Option<CountRow> = db
        .query("SELECT count() AS total FROM bootcamp GROUP ALL")
        .await
        .expect("count query")
        .take(0)
        .expect("count row");
    assert_eq!(total.map(|row| row.total), Some(1));
}
