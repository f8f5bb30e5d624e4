use farmledger::utils::password::hash_password;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestAdmin {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

#[allow(dead_code)]
pub struct TestFarmer {
    pub id: Uuid,
    pub phone: String,
    pub password: String,
}

pub async fn create_test_admin(tx: &mut Transaction<'_, Postgres>, password: &str) -> TestAdmin {
    let username = format!("admin-{}", Uuid::new_v4());
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO admins (username, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(&username)
    .bind(&hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestAdmin {
        id,
        username,
        password: password.to_string(),
    }
}

pub async fn create_test_farmer(tx: &mut Transaction<'_, Postgres>, password: &str) -> TestFarmer {
    let phone = generate_unique_phone();
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO farmers (name, phone, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Test Farmer")
    .bind(&phone)
    .bind(&hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestFarmer {
        id,
        phone,
        password: password.to_string(),
    }
}

/// Insert a work record directly, with the total derived the same way the
/// service derives it.
pub async fn create_test_work(
    tx: &mut Transaction<'_, Postgres>,
    farmer_id: Uuid,
    minutes: f64,
    rate_per60: f64,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO work_records (farmer_id, work_type, minutes, rate_per60, total_amount)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(farmer_id)
    .bind("harvest")
    .bind(minutes)
    .bind(rate_per60)
    .bind(minutes / 60.0 * rate_per60)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub fn generate_unique_phone() -> String {
    format!("phone-{}", Uuid::new_v4())
}
