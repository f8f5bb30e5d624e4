use farmledger::config::jwt::JwtConfig;
use farmledger::modules::auth::model::{Claims, Role};
use farmledger::utils::jwt::{issue_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        admin_token_expiry: 43_200,
        farmer_token_expiry: 604_800,
    }
}

#[test]
fn test_issue_token_success() {
    let jwt_config = get_test_jwt_config();

    let result = issue_token(Uuid::new_v4(), Role::Admin, &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_token_round_trip_admin() {
    let jwt_config = get_test_jwt_config();
    let subject = Uuid::new_v4();

    let token = issue_token(subject, Role::Admin, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, subject.to_string());
    assert_eq!(claims.role, "admin");
}

#[test]
fn test_verify_token_round_trip_farmer() {
    let jwt_config = get_test_jwt_config();
    let subject = Uuid::new_v4();

    let token = issue_token(subject, Role::Farmer, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, subject.to_string());
    assert_eq!(claims.role, "farmer");
}

#[test]
fn test_expiry_window_depends_on_role() {
    let jwt_config = get_test_jwt_config();

    let admin_token = issue_token(Uuid::new_v4(), Role::Admin, &jwt_config).unwrap();
    let farmer_token = issue_token(Uuid::new_v4(), Role::Farmer, &jwt_config).unwrap();

    let admin_claims = verify_token(&admin_token, &jwt_config).unwrap();
    let farmer_claims = verify_token(&farmer_token, &jwt_config).unwrap();

    assert_eq!(
        admin_claims.exp - admin_claims.iat,
        jwt_config.admin_token_expiry as usize
    );
    assert_eq!(
        farmer_claims.exp - farmer_claims.iat,
        jwt_config.farmer_token_expiry as usize
    );
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = issue_token(Uuid::new_v4(), Role::Admin, &jwt_config).unwrap();

    let wrong_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        ..jwt_config
    };

    assert!(verify_token(&token, &wrong_config).is_err());
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
    ];

    for token in malformed_tokens {
        assert!(verify_token(token, &jwt_config).is_err(), "{:?}", token);
    }
}

#[test]
fn test_verify_token_tampered_payload() {
    let jwt_config = get_test_jwt_config();
    let token = issue_token(Uuid::new_v4(), Role::Farmer, &jwt_config).unwrap();

    // Swap out the payload segment while keeping the original signature.
    let other = issue_token(Uuid::new_v4(), Role::Admin, &jwt_config).unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let tampered = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    assert!(verify_token(&tampered, &jwt_config).is_err());
}

#[test]
fn test_verify_token_expired() {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let jwt_config = get_test_jwt_config();
    let now = chrono::Utc::now().timestamp() as usize;
    // Two hours past expiry, well beyond any validation leeway.
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        role: "admin".to_string(),
        exp: now - 7200,
        iat: now - 10_000,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    assert!(verify_token(&token, &jwt_config).is_err());
}

#[test]
fn test_different_subjects_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let id1 = Uuid::new_v4();
    let id2 = Uuid::new_v4();

    let token1 = issue_token(id1, Role::Farmer, &jwt_config).unwrap();
    let token2 = issue_token(id2, Role::Farmer, &jwt_config).unwrap();

    assert_ne!(token1, token2);
    assert_eq!(verify_token(&token1, &jwt_config).unwrap().sub, id1.to_string());
    assert_eq!(verify_token(&token2, &jwt_config).unwrap().sub, id2.to_string());
}
