use camp_database::Database;
use camp_kernel::query::QueryError;
use camp_kernel::query::list::{ListParams, execute_list};
use serde_json::{Value, json};

const ALLOWED: &[&str] = &["name", "website", "averageCost", "housing", "createdAt"];

async fn seeded_db() -> Database {
    let db = Database::builder()
        .url("mem://")
        .session("kernel_test", "list_query")
        .init()
        .await
        .expect("connect to mem://");

    let docs = [
        ("b1", "Devworks", 8000, true, "2026-01-01T00:00:00Z"),
        ("b2", "ModernTech", 9500, false, "2026-01-02T00:00:00Z"),
        ("b3", "Codemasters", 7000, true, "2026-01-03T00:00:00Z"),
        ("b4", "Devcentral", 12000, false, "2026-01-04T00:00:00Z"),
        ("b5", "Ironhorse", 11000, true, "2026-01-05T00:00:00Z"),
    ];

    for (id, name, cost, housing, created) in docs {
        db.query("CREATE type::thing('bootcamp', $id) CONTENT $doc RETURN NONE")
            .bind(("id", id))
            .bind((
                "doc",
                json!({
                    "name": name,
                    "website": format!("https://{}.example.com", name.to_lowercase()),
                    "averageCost": cost,
                    "housing": housing,
                    "createdAt": created,
                }),
            ))
            .await
            .expect("seed query")
            .check()
            .expect("seed should succeed");
    }

    db
}

#[tokio::test]
async fn default_window_pages_through_five_records() {
    let db = seeded_db().await;

    // Page 1: limit defaults to 2, newest first.
    let params = ListParams::parse("", ALLOWED).expect("parse");
    let page1 = execute_list::<Value>(&db, "bootcamp", &params).await.expect("page 1");
    assert_eq!(page1.total, 5);
    assert_eq!(page1.records.len(), 2);
    assert_eq!(page1.records[0]["name"], "Ironhorse");
    assert_eq!(page1.records[1]["name"], "Devcentral");
    assert_eq!(page1.pagination.next.as_ref().map(|d| (d.page, d.limit)), Some((2, 2)));
    assert!(page1.pagination.prev.is_none());

    // Page 3 holds the single remaining record.
    let params = ListParams::parse("page=3", ALLOWED).expect("parse");
    let page3 = execute_list::<Value>(&db, "bootcamp", &params).await.expect("page 3");
    assert_eq!(page3.records.len(), 1);
    assert_eq!(page3.records[0]["name"], "Devworks");
    assert!(page3.pagination.next.is_none());
    assert_eq!(page3.pagination.prev.as_ref().map(|d| (d.page, d.limit)), Some((2, 2)));
}

#[tokio::test]
async fn page_beyond_data_is_empty_not_an_error() {
    let db = seeded_db().await;

    let params = ListParams::parse("page=9&limit=10", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("far page");
    assert!(result.records.is_empty());
    assert_eq!(result.total, 5);
}

#[tokio::test]
async fn select_projects_only_named_fields_plus_id() {
    let db = seeded_db().await;

    let params = ListParams::parse("select=name,website&limit=10", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("select");
    assert_eq!(result.records.len(), 5);

    for record in &result.records {
        let keys: Vec<&str> =
            record.as_object().expect("object row").keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3, "unexpected projection: {keys:?}");
        assert!(keys.contains(&"id") && keys.contains(&"name") && keys.contains(&"website"));
    }
}

#[tokio::test]
async fn sorting_survives_a_projection_that_omits_the_sort_key() {
    let db = seeded_db().await;

    let params =
        ListParams::parse("select=name&sort=-averageCost&limit=3", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("select+sort");

    let names: Vec<&str> =
        result.records.iter().map(|r| r["name"].as_str().expect("name")).collect();
    assert_eq!(names, vec!["Devcentral", "Ironhorse", "ModernTech"]);
    assert!(result.records[0].get("averageCost").is_none());
}

#[tokio::test]
async fn sort_keys_apply_in_order() {
    let db = seeded_db().await;

    let params = ListParams::parse("sort=averageCost&limit=10", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("sorted");
    let costs: Vec<i64> =
        result.records.iter().map(|r| r["averageCost"].as_i64().expect("cost")).collect();
    assert_eq!(costs, vec![7000, 8000, 9500, 11000, 12000]);

    let params = ListParams::parse("sort=-averageCost&limit=1", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("sorted desc");
    assert_eq!(result.records[0]["name"], "Devcentral");
}

#[tokio::test]
async fn filters_and_window_compose() {
    let db = seeded_db().await;

    let params =
        ListParams::parse("averageCost[gte]=9000&housing=false&limit=10", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("filtered");
    assert_eq!(result.total, 2);
    let names: Vec<&str> =
        result.records.iter().map(|r| r["name"].as_str().expect("name")).collect();
    assert!(names.contains(&"ModernTech") && names.contains(&"Devcentral"));

    // The filtered total drives pagination, not the table size.
    let params = ListParams::parse("averageCost[gte]=9000&limit=2", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("filtered window");
    assert_eq!(result.total, 3);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.pagination.next.as_ref().map(|d| d.page), Some(2));
}

#[tokio::test]
async fn in_filter_matches_a_value_set() {
    let db = seeded_db().await;

    let params =
        ListParams::parse("name[in]=Devworks,Ironhorse&limit=10", ALLOWED).expect("parse");
    let result = execute_list::<Value>(&db, "bootcamp", &params).await.expect("in filter");
    assert_eq!(result.total, 2);
}

#[tokio::test]
async fn unknown_filter_field_is_rejected_before_execution() {
    let err = ListParams::parse("secret[gte]=1", ALLOWED).unwrap_err();
    assert!(matches!(err, QueryError::UnknownField { .. }));
}
