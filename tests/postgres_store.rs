//! PostgreSQL store tests.
//!
//! These tests require a database connection.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::sync::Arc;

use fintech_bank::{AccountService, AppError, db, store::PgAccountStore};
use rust_decimal_macros::dec;

async fn setup_service() -> AccountService {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = db::create_pool(&database_url, 5)
        .await
        .expect("Failed to connect to DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE TABLE accounts RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    AccountService::new(Arc::new(PgAccountStore::new(pool)))
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_transfer_and_rollback() {
    let service = setup_service().await;

    let alice = service.create("SAVING", "Alice", dec!(150)).await.unwrap();
    let bob = service.create("CURRENT", "Bob", dec!(0)).await.unwrap();

    let after = service
        .transfer(alice.number, bob.number, dec!(100))
        .await
        .unwrap();
    assert_eq!(after.balance, dec!(50));
    assert_eq!(service.get(bob.number).await.unwrap().balance, dec!(100));

    assert_eq!(
        service.transfer(alice.number, bob.number, dec!(51)).await,
        Err(AppError::bad_request("Insufficient balance"))
    );
    assert_eq!(service.get(alice.number).await.unwrap().balance, dec!(50));
    assert_eq!(service.get(bob.number).await.unwrap().balance, dec!(100));

    assert_eq!(
        service.create("SAVING", "Alice", dec!(1)).await,
        Err(AppError::bad_request("Account name already exists"))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_concurrent_deposits() {
    let service = setup_service().await;
    let number = service
        .create("SAVING", "Alice", dec!(0))
        .await
        .unwrap()
        .number;

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.deposit(number, dec!(5)).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(service.get(number).await.unwrap().balance, dec!(100));
}
