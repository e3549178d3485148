use camp_domain::config::ApiConfig;
use camp_domain::roles::UserRole;

#[test]
fn defaults_are_sane() {
    let cfg = ApiConfig::default();

    assert_eq!(cfg.server.port, 5000);
    assert!(cfg.server.ssl.is_none());
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "camphub");
    assert_eq!(cfg.storage.static_dir.to_str(), Some("public"));
    assert_eq!(cfg.uploads.max_file_size, 1_000_000);
    assert!(cfg.geocoder.api_key.is_none());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg: ApiConfig = serde_json::from_str(
        r#"{
            "server": { "port": 8080 },
            "database": { "url": "ws://127.0.0.1:8000" },
            "uploads": { "max_file_size": 42 }
        }"#,
    )
    .expect("partial config should deserialize");

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "ws://127.0.0.1:8000");
    assert_eq!(cfg.database.database, "core");
    assert_eq!(cfg.uploads.max_file_size, 42);
}

#[test]
fn roles_round_trip_lowercase() {
    let role: UserRole = serde_json::from_str("\"publisher\"").expect("role from json");
    assert_eq!(role, UserRole::Publisher);
    assert!(role.can_publish());
    assert!(!role.is_admin());

    assert_eq!(serde_json::to_string(&UserRole::Admin).expect("role to json"), "\"admin\"");
    assert_eq!(UserRole::Admin.to_string(), "admin");
}
