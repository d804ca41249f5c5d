//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Deletion Guard
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                 delete(customer_id) Decision                     │
//! │                                                                  │
//! │  count vehicles ──► any? ──► DependentsExist("owns N vehicle(s)")│
//! │       │ none                                                     │
//! │       ▼                                                          │
//! │  count service orders ──► any? ──► DependentsExist(...)          │
//! │       │ none                                                     │
//! │       ▼                                                          │
//! │  count sales ──► any? ──► DependentsExist(...)                   │
//! │       │ none                                                     │
//! │       ▼                                                          │
//! │  DELETE ──► 0 rows? ──► NotFound                                 │
//! │                                                                  │
//! │  The counts stay explicit (instead of leaning on the FK          │
//! │  constraints) so the rejection says WHICH dependents block       │
//! │  and HOW MANY.                                                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use motoshop_core::validation::{validate_name, validate_phone};
use motoshop_core::Customer;

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

    /// Registers a new customer.
    ///
    /// ## Arguments
    /// * `name` - Required, non-empty
    /// * `tax_id` - Optional CPF, stored as typed
    /// * `phone` - Optional, 11 digits when present
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The inserted record
    /// * `Err(DbError::Validation)` - Name missing or phone malformed
    pub async fn create(
        &self,
        name: &str,
        tax_id: Option<&str>,
        phone: Option<&str>,
    ) -> DbResult<Customer> {
        validate_name(name)?;
        if let Some(phone) = phone {
            validate_phone(phone)?;
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            tax_id: tax_id.map(str::to_string),
            phone: phone.map(str::to_string),
            created_at: Utc::now(),
        };

        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, tax_id, phone, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, tax_id, phone, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists all customers, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, tax_id, phone, created_at
            FROM customers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Deletes a customer, unless dependent rows exist.
    ///
    /// Checks vehicles, then service orders, then sales; the first
    /// non-empty dependency wins and its count goes into the rejection
    /// reason.
    ///
    /// ## Returns
    /// * `Ok(())` - Customer deleted
    /// * `Err(DbError::DependentsExist)` - Dependents block the deletion
    /// * `Err(DbError::NotFound)` - No such customer
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let vehicles: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE customer_id = ?1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if vehicles > 0 {
            return Err(DbError::DependentsExist {
                entity: "customer".to_string(),
                id: id.to_string(),
                reason: format!("owns {} registered vehicle(s)", vehicles),
            });
        }

        let orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM service_orders WHERE customer_id = ?1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if orders > 0 {
            return Err(DbError::DependentsExist {
                entity: "customer".to_string(),
                id: id.to_string(),
                reason: format!("has {} service order(s)", orders),
            });
        }

        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE customer_id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if sales > 0 {
            return Err(DbError::DependentsExist {
                entity: "customer".to_string(),
                id: id.to_string(),
                reason: format!("has {} registered sale(s)", sales),
            });
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
