use camp_bootcamps::{Bootcamp, BootcampRepository, CreateBootcamp, Location};
use camp_database::Database;
use camp_domain::geo::{GeoPoint, radius_meters_from_miles};

async fn test_db() -> Database {
    Database::builder()
        .url("mem://")
        .session("bootcamps_test", "integration")
        .init()
        .await
        .expect("connect to mem://")
}

fn payload(name: &str) -> CreateBootcamp {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "description": "Full stack development",
        "zipcode": "02118",
        "careers": ["Web Development"],
        "housing": true
    }))
    .expect("payload parses")
}

fn boston() -> Location {
    Location::from_point(GeoPoint::new(-71.0589, 42.3601), None, "02118".to_owned())
}

#[tokio::test]
async fn create_and_get_roundtrip() {
    let repo = BootcampRepository::new(test_db().await);

    let created =
        repo.create(payload("Devworks Bootcamp"), boston(), "user_1").await.expect("create");
    assert_eq!(created.slug, "devworks-bootcamp");
    assert!(created.average_cost.is_none());

    let fetched: Bootcamp =
        repo.get(&created.id).await.expect("get").expect("bootcamp should exist");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Devworks Bootcamp");
    assert_eq!(fetched.user, "user_1");
    assert!(fetched.housing);
    assert!(fetched.average_cost.is_none());
}

#[tokio::test]
async fn get_missing_returns_none() {
    let repo = BootcampRepository::new(test_db().await);
    assert!(repo.get("does-not-exist").await.expect("get").is_none());
}

#[tokio::test]
async fn merge_touches_only_patched_fields() {
    let repo = BootcampRepository::new(test_db().await);
    let created = repo.create(payload("Devworks"), boston(), "user_1").await.expect("create");

    let updated = repo
        .merge(
            &created.id,
            serde_json::json!({ "name": "Devworks East", "slug": "devworks-east" }),
        )
        .await
        .expect("merge");

    assert_eq!(updated.name, "Devworks East");
    assert_eq!(updated.slug, "devworks-east");
    assert_eq!(updated.description, "Full stack development");
    assert!(updated.housing);
}

#[tokio::test]
async fn count_owned_by_supports_the_single_bootcamp_rule() {
    let repo = BootcampRepository::new(test_db().await);
    assert_eq!(repo.count_owned_by("user_1").await.expect("count"), 0);

    repo.create(payload("Devworks"), boston(), "user_1").await.expect("create");
    assert_eq!(repo.count_owned_by("user_1").await.expect("count"), 1);
    assert_eq!(repo.count_owned_by("user_2").await.expect("count"), 0);
}

#[tokio::test]
async fn delete_cascades_to_courses() {
    let db = test_db().await;
    let repo = BootcampRepository::new(db.clone());
    let created = repo.create(payload("Devworks"), boston(), "user_1").await.expect("create");

    db.query("CREATE type::thing('course', 'c1') CONTENT { title: 'Rust 101', tuition: 9000, bootcamp: $b } RETURN NONE")
        .bind(("b", created.id.clone()))
        .await
        .expect("seed course")
        .check()
        .expect("course should persist");

    repo.delete(&created.id).await.expect("delete");

    assert!(repo.get(&created.id).await.expect("get").is_none());
    let leftover: Vec<serde_json::Value> = db
        .query("SELECT * FROM course WHERE bootcamp = $b")
        .bind(("b", created.id.clone()))
        .await
        .expect("course query")
        .take(0)
        .expect("course rows");
    assert!(leftover.is_empty(), "courses should be cascade-deleted");
}

#[tokio::test]
async fn radius_search_filters_by_distance() {
    let repo = BootcampRepository::new(test_db().await);

    let near = Location::from_point(GeoPoint::new(-71.4128, 41.8240), None, "02903".to_owned());
    let far = Location::from_point(GeoPoint::new(-74.0060, 40.7128), None, "10001".to_owned());

    repo.create(payload("Boston Camp"), boston(), "u1").await.expect("create");
    repo.create(payload("Providence Camp"), near, "u2").await.expect("create");
    repo.create(payload("NYC Camp"), far, "u3").await.expect("create");

    let center = GeoPoint::new(-71.0589, 42.3601);
    let hits = repo
        .within_radius(center, radius_meters_from_miles(100.0))
        .await
        .expect("radius query");

    let names: Vec<&str> = hits.iter().map(|b| b.name.as_str()).collect();
    assert!(names.contains(&"Boston Camp"));
    assert!(names.contains(&"Providence Camp"));
    assert!(!names.contains(&"NYC Camp"));
}

#[tokio::test]
async fn set_photo_updates_the_record() {
    let repo = BootcampRepository::new(test_db().await);
    let created = repo.create(payload("Devworks"), boston(), "user_1").await.expect("create");

    repo.set_photo(&created.id, "photo_abc.jpg").await.expect("set photo");

    let fetched = repo.get(&created.id).await.expect("get").expect("exists");
    assert_eq!(fetched.photo.as_deref(), Some("photo_abc.jpg"));
}
