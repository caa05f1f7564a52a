/// Integration tests for the database connection pool
///
/// These run against private in-memory SQLite databases; no server is needed.

use taskhub_shared::db::pool::{
    close_pool, create_pool, get_pool_stats, health_check, DatabaseConfig,
};

#[tokio::test]
async fn test_create_in_memory_pool() {
    let result = create_pool(DatabaseConfig::in_memory()).await;
    assert!(result.is_ok(), "Failed to create pool: {:?}", result.err());

    let pool = result.unwrap();

    let stats = get_pool_stats(&pool);
    assert!(stats.total_connections > 0, "Pool should have at least one connection");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_pool_with_invalid_url() {
    let config = DatabaseConfig {
        url: "sqlite://taskhub.db?mode=bogus".to_string(),
        ..Default::default()
    };

    let result = create_pool(config).await;
    assert!(result.is_err(), "Should reject an unknown open mode");
}

#[tokio::test]
async fn test_create_pool_for_missing_file() {
    let path = std::env::temp_dir().join(format!(
        "taskhub-missing-{}-{}.db",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let config = DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        connect_timeout_seconds: 2,
        ..Default::default()
    };

    let result = create_pool(config).await;
    assert!(result.is_err(), "Missing database file should not be created implicitly");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_health_check_success() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let result = health_check(&pool).await;
    assert!(result.is_ok(), "Health check should succeed");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .expect("Failed to read pragma");

    assert_eq!(enabled, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_get_pool_stats_with_active_connection() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let _conn = pool.acquire().await.expect("Failed to acquire connection");

    let stats = get_pool_stats(&pool);
    assert_eq!(stats.total_connections, 1);
    assert_eq!(stats.active_connections, 1);
    assert_eq!(stats.idle_connections, 0);
}

#[tokio::test]
async fn test_pool_transaction() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    sqlx::query("CREATE TABLE scratch (value INTEGER NOT NULL)")
        .execute(&pool)
        .await
        .expect("Failed to create table");

    let mut tx = pool.begin().await.expect("Failed to begin transaction");
    sqlx::query("INSERT INTO scratch (value) VALUES (1)")
        .execute(&mut *tx)
        .await
        .expect("Insert failed");
    tx.commit().await.expect("Failed to commit transaction");

    let mut tx = pool.begin().await.expect("Failed to begin transaction");
    sqlx::query("INSERT INTO scratch (value) VALUES (2)")
        .execute(&mut *tx)
        .await
        .expect("Insert failed");
    tx.rollback().await.expect("Failed to rollback transaction");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scratch")
        .fetch_one(&pool)
        .await
        .expect("Count failed");
    assert_eq!(count, 1, "Only the committed row should remain");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_close_pool() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    close_pool(pool.clone()).await;

    let result: Result<(i64,), _> = sqlx::query_as("SELECT 1").fetch_one(&pool).await;

    assert!(result.is_err(), "Queries should fail after pool is closed");
}
