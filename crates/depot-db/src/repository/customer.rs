//! # Customer Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use depot_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer and returns it with its generated id.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn insert(&self, name: &str, email: &str) -> DbResult<Customer> {
        debug!(email = %email, "Inserting customer");

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email)
            VALUES (?1, ?2)
            RETURNING id, name, email
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Counts customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let alice = db
            .customers()
            .insert("Alice Johnson", "alice@example.com")
            .await
            .unwrap();
        assert!(alice.id > 0);

        let loaded = db.customers().get_by_id(alice.id).await.unwrap();
        assert_eq!(loaded, Some(alice));
        assert!(db.customers().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers().insert("A", "a@example.com").await.unwrap();

        let err = db
            .customers()
            .insert("B", "a@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.customers().count().await.unwrap(), 1);
    }
}
