//! # Product Repository
//!
//! Database operations for parts inventory, including the stock guard.
//!
//! ## Stock Guard
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  Check-Then-Decrement Pattern                    │
//! │                                                                  │
//! │  check_stock(product, qty)                                       │
//! │       │                                                          │
//! │       ├── quantity_on_hand ≥ qty ──► true  ──► caller may        │
//! │       │                                        decrement_stock   │
//! │       └── otherwise (or unknown) ──► false ──► caller rejects    │
//! │                                                                  │
//! │  decrement_stock(product, qty)                                   │
//! │       └── UPDATE ... SET quantity_on_hand = quantity_on_hand - ? │
//! │                                                                  │
//! │  The check and the decrement are NOT atomic with respect to      │
//! │  other callers. Acceptable for a single-user, single-process     │
//! │  app; the composite flows (add_part, register) re-check inside   │
//! │  their own transaction.                                          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use motoshop_core::validation::{validate_part_code, validate_price_cents};
use motoshop_core::{NewProduct, Product, ValidationError};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// if repo.check_stock(&product.id, 2).await? {
///     repo.decrement_stock(&product.id, 2).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str = "id, code, description, quantity_on_hand, \
     cost_cents, sale_price_cents, reorder_threshold, created_at, updated_at";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Registers a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted record
    /// * `Err(DbError::Validation)` - Bad code, negative price/quantity
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn create(&self, new: &NewProduct) -> DbResult<Product> {
        validate_part_code(&new.code)?;
        validate_price_cents(new.cost_cents)?;
        validate_price_cents(new.sale_price_cents)?;

        if new.description.trim().is_empty() {
            return Err(DbError::Validation(ValidationError::required("description")));
        }
        if new.quantity_on_hand < 0 || new.reorder_threshold < 0 {
            return Err(DbError::Validation(ValidationError::OutOfRange {
                field: "quantity_on_hand".to_string(),
                min: 0,
                max: i64::MAX,
            }));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            code: new.code.trim().to_string(),
            description: new.description.trim().to_string(),
            quantity_on_hand: new.quantity_on_hand,
            cost_cents: new.cost_cents,
            sale_price_cents: new.sale_price_cents,
            reorder_threshold: new.reorder_threshold,
            created_at: now,
            updated_at: now,
        };

        debug!(code = %product.code, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, code, description, quantity_on_hand,
                cost_cents, sale_price_cents, reorder_threshold,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.code)
        .bind(&product.description)
        .bind(product.quantity_on_hand)
        .bind(product.cost_cents)
        .bind(product.sale_price_cents)
        .bind(product.reorder_threshold)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its part code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products, ordered by code.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY code"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Checks whether current stock covers the requested quantity.
    ///
    /// ## Returns
    /// * `Ok(true)` - quantity_on_hand ≥ requested
    /// * `Ok(false)` - short stock, or no such product
    ///
    /// No locking: a caller that intends to decrement must treat this as
    /// advisory (see module docs).
    pub async fn check_stock(&self, product_id: &str, quantity: i64) -> DbResult<bool> {
        let on_hand: Option<i64> =
            sqlx::query_scalar("SELECT quantity_on_hand FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(on_hand.is_some_and(|available| available >= quantity))
    }

    /// Unconditionally subtracts a quantity from stock.
    ///
    /// ## Delta Update
    /// The statement is a relative update (`quantity_on_hand =
    /// quantity_on_hand - ?`), not an absolute write, so the read used
    /// for the stock check never overwrites a fresher value.
    ///
    /// ## Arguments
    /// * `product_id` - Product ID
    /// * `quantity` - Units to remove (callers check stock first)
    pub async fn decrement_stock(&self, product_id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %product_id, quantity = %quantity, "Decrementing stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity_on_hand = quantity_on_hand - ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_id));
        }

        Ok(())
    }

    /// Restock report: products at or under their reorder threshold.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE quantity_on_hand <= reorder_threshold ORDER BY code"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_product(code: &str, quantity: i64, price_cents: i64) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            description: format!("Part {code}"),
            quantity_on_hand: quantity,
            cost_cents: price_cents / 2,
            sale_price_cents: price_cents,
            reorder_threshold: 2,
        }
    }

    #[tokio::test]
    async fn test_stock_guard_example() {
        let db = test_db().await;
        let p = db.products().create(&new_product("BRK-PAD-01", 5, 4990)).await.unwrap();

        assert!(db.products().check_stock(&p.id, 5).await.unwrap());
        assert!(!db.products().check_stock(&p.id, 6).await.unwrap());

        db.products().decrement_stock(&p.id, 5).await.unwrap();

        let p = db.products().get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(p.quantity_on_hand, 0);
        assert!(!db.products().check_stock(&p.id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_stock_unknown_product() {
        let db = test_db().await;
        assert!(!db.products().check_stock("no-such-id", 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_decrement_unknown_product() {
        let db = test_db().await;
        let err = db.products().decrement_stock("no-such-id", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = test_db().await;
        db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();

        let err = db
            .products()
            .create(&new_product("OIL-10W40", 4, 3300))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_by_code() {
        let db = test_db().await;
        db.products().create(&new_product("CHN-520", 3, 18900)).await.unwrap();

        let found = db.products().get_by_code("CHN-520").await.unwrap().unwrap();
        assert_eq!(found.sale_price_cents, 18900);
        assert!(db.products().get_by_code("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_low_stock_report() {
        let db = test_db().await;

        // threshold is 2 in the helper: 1 and 2 are low, 9 is not
        db.products().create(&new_product("A-LOW", 1, 100)).await.unwrap();
        db.products().create(&new_product("B-EDGE", 2, 100)).await.unwrap();
        db.products().create(&new_product("C-OK", 9, 100)).await.unwrap();

        let low = db.products().low_stock().await.unwrap();
        let codes: Vec<_> = low.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["A-LOW", "B-EDGE"]);
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let db = test_db().await;

        assert!(db.products().create(&new_product("", 1, 100)).await.is_err());
        assert!(db.products().create(&new_product("BAD QTY", 1, 100)).await.is_err());

        let mut negative = new_product("NEG-1", 1, 100);
        negative.quantity_on_hand = -5;
        assert!(matches!(
            db.products().create(&negative).await.unwrap_err(),
            DbError::Validation(_)
        ));
    }
}
