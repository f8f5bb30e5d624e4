use farmledger::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "pass1";
    let result = hash_password(password);

    assert!(result.is_ok());
    let hash = result.unwrap();
    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_verify_password_correct() {
    let password = "correctpassword";
    let hash = hash_password(password).unwrap();

    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("correctpassword").unwrap();

    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    assert!(verify_password("anything", "not_a_valid_bcrypt_hash").is_err());
}

#[test]
fn test_hash_generates_unique_salts() {
    let password = "samepassword";
    let hash1 = hash_password(password).unwrap();
    let hash2 = hash_password(password).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}

#[test]
fn test_verify_is_case_sensitive() {
    let hash = hash_password("Admin123").unwrap();

    assert!(!verify_password("admin123", &hash).unwrap());
    assert!(!verify_password("ADMIN123", &hash).unwrap());
}
