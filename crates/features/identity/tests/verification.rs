use camp_domain::config::JwtConfig;
use camp_domain::roles::UserRole;
use camp_identity::{Claims, verify_token};
use jsonwebtoken::{EncodingKey, Header, encode};

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_owned(),
        issuer: "camphub".to_owned(),
        ttl_seconds: 3600,
        clock_skew_seconds: 60,
    }
}

fn mint(claims: &Claims, secret: &str) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .expect("token encodes")
}

fn valid_claims(role: UserRole) -> Claims {
    Claims {
        sub: "user_d7K2mPq9XbNc".to_owned(),
        role,
        exp: i64::MAX / 2,
        iss: "camphub".to_owned(),
    }
}

#[test]
fn valid_token_yields_current_user() {
    let cfg = test_config();
    let token = mint(&valid_claims(UserRole::Publisher), &cfg.secret);

    let user = verify_token(&token, &cfg).expect("token verifies");
    assert_eq!(user.id, "user_d7K2mPq9XbNc");
    assert_eq!(user.role, UserRole::Publisher);
}

#[test]
fn wrong_secret_is_rejected() {
    let cfg = test_config();
    let token = mint(&valid_claims(UserRole::Admin), "some-other-secret");

    assert!(verify_token(&token, &cfg).is_err());
}

#[test]
fn expired_token_is_rejected() {
    let cfg = test_config();
    let mut claims = valid_claims(UserRole::User);
    claims.exp = 1_000;
    let token = mint(&claims, &cfg.secret);

    assert!(verify_token(&token, &cfg).is_err());
}

#[test]
fn foreign_issuer_is_rejected() {
    let cfg = test_config();
    let mut claims = valid_claims(UserRole::User);
    claims.iss = "someone-else".to_owned();
    let token = mint(&claims, &cfg.secret);

    assert!(verify_token(&token, &cfg).is_err());
}

#[test]
fn ownership_rules() {
    let cfg = test_config();

    let owner = verify_token(&mint(&valid_claims(UserRole::Publisher), &cfg.secret), &cfg)
        .expect("token verifies");
    assert!(owner.can_modify("user_d7K2mPq9XbNc"));
    assert!(!owner.can_modify("someone_else"));

    let mut admin_claims = valid_claims(UserRole::Admin);
    admin_claims.sub = "admin_1".to_owned();
    let admin = verify_token(&mint(&admin_claims, &cfg.secret), &cfg).expect("token verifies");
    assert!(admin.can_modify("someone_else"));
}
