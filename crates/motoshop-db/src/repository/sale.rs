//! # Sale Repository
//!
//! Database operations for over-the-counter parts sales.
//!
//! ## All-Or-Nothing Registration
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                   register(customer?, lines)                     │
//! │                                                                  │
//! │  BEGIN                                                           │
//! │    insert sale header                                            │
//! │    for each line:                                                │
//! │       read stock ──► short? ──► ROLLBACK ──► InsufficientStock   │
//! │       insert item                                                │
//! │       decrement stock                                            │
//! │       total += sale price × qty                                  │
//! │  COMMIT ──► SaleReceipt { total }                                │
//! │                                                                  │
//! │  A failed line takes the header, every earlier item, and every   │
//! │  earlier decrement of THIS call down with it. Nothing persists.  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use motoshop_core::validation::validate_quantity;
use motoshop_core::{Money, Sale, SaleItem, SaleLine, ValidationError};

/// Outcome of a successful sale registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub sale_id: String,
    pub total_cents: i64,
    pub item_count: usize,
}

impl SaleReceipt {
    /// Returns the sale total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// One row of the sales report: the sale joined with the customer's name
/// (`None` for walk-ins) and its total at current prices.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleSummary {
    pub id: String,
    pub customer_name: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub total_cents: i64,
}

impl SaleSummary {
    /// Returns the sale total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Registers a sale atomically.
    ///
    /// ## Arguments
    /// * `customer_id` - Buying customer, or `None` for a walk-in sale
    /// * `lines` - Products and quantities; must be non-empty
    ///
    /// ## Returns
    /// * `Ok(SaleReceipt)` - Everything persisted, total computed
    /// * `Err(DbError::InsufficientStock)` - A line was short; nothing
    ///   from this call persists
    /// * `Err(DbError::NotFound)` - A line referenced an unknown product;
    ///   nothing from this call persists
    pub async fn register(
        &self,
        customer_id: Option<&str>,
        lines: &[SaleLine],
    ) -> DbResult<SaleReceipt> {
        if lines.is_empty() {
            return Err(DbError::Validation(ValidationError::required("lines")));
        }
        for line in lines {
            validate_quantity(line.quantity)?;
        }

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.map(str::to_string),
            created_at: Utc::now(),
        };

        debug!(id = %sale.id, walk_in = sale.is_walk_in(), lines = lines.len(), "Registering sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, customer_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_id)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        let mut total = Money::zero();

        for line in lines {
            let row: Option<(i64, i64)> = sqlx::query_as(
                "SELECT quantity_on_hand, sale_price_cents FROM products WHERE id = ?1",
            )
            .bind(&line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let (available, price_cents) = match row {
                None => {
                    tx.rollback().await?;
                    return Err(DbError::not_found("Product", &line.product_id));
                }
                Some(row) => row,
            };

            if available < line.quantity {
                tx.rollback().await?;
                return Err(DbError::InsufficientStock {
                    product_id: line.product_id.clone(),
                    available,
                    requested: line.quantity,
                });
            }

            let item = SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale.id.clone(),
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                created_at: Utc::now(),
            };

            sqlx::query(
                r#"
                INSERT INTO sale_items (id, sale_id, product_id, quantity, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                UPDATE products
                SET quantity_on_hand = quantity_on_hand - ?2,
                    updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&line.product_id)
            .bind(line.quantity)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            total += Money::from_cents(price_cents).multiply_quantity(line.quantity);
        }

        tx.commit().await?;

        info!(sale_id = %sale.id, total = %total, items = lines.len(), "Sale registered");

        Ok(SaleReceipt {
            sale_id: sale.id,
            total_cents: total.cents(),
            item_count: lines.len(),
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Sales report: every sale, newest first, with the customer's name
    /// joined in and the total recomputed at current prices.
    pub async fn list(&self) -> DbResult<Vec<SaleSummary>> {
        let sales = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT
                s.id,
                c.name AS customer_name,
                s.created_at,
                COALESCE((
                    SELECT SUM(p.sale_price_cents * si.quantity)
                    FROM sale_items si
                    JOIN products p ON si.product_id = p.id
                    WHERE si.sale_id = s.id
                ), 0) AS total_cents
            FROM sales s
            LEFT JOIN customers c ON s.customer_id = c.id
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the items of a sale, oldest first.
    pub async fn items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use motoshop_core::NewProduct;

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
            reorder_threshold: 1,
        }
    }

    fn line(product_id: &str, quantity: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    async fn counts(db: &Database) -> (i64, i64) {
        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        (sales, items)
    }

    #[tokio::test]
    async fn test_register_walk_in_sale() {
        let db = test_db().await;
        let oil = db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();
        let plug = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();

        let receipt = db
            .sales()
            .register(None, &[line(&oil.id, 2), line(&plug.id, 1)])
            .await
            .unwrap();

        // 2 × 3500 + 1 × 2500
        assert_eq!(receipt.total_cents, 9500);
        assert_eq!(receipt.total(), Money::from_cents(9500));
        assert_eq!(receipt.item_count, 2);

        let sale = db.sales().get_by_id(&receipt.sale_id).await.unwrap().unwrap();
        assert!(sale.is_walk_in());
        assert_eq!(db.sales().items(&receipt.sale_id).await.unwrap().len(), 2);

        // Stock moved
        let oil = db.products().get_by_id(&oil.id).await.unwrap().unwrap();
        let plug = db.products().get_by_id(&plug.id).await.unwrap().unwrap();
        assert_eq!(oil.quantity_on_hand, 8);
        assert_eq!(plug.quantity_on_hand, 9);
    }

    #[tokio::test]
    async fn test_register_for_customer() {
        let db = test_db().await;
        let customer = db.customers().create("Bruno Reis", None, None).await.unwrap();
        let oil = db.products().create(&new_product("OIL-10W40", 5, 3500)).await.unwrap();

        let receipt = db
            .sales()
            .register(Some(&customer.id), &[line(&oil.id, 1)])
            .await
            .unwrap();

        let sale = db.sales().get_by_id(&receipt.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.customer_id.as_deref(), Some(customer.id.as_str()));
    }

    #[tokio::test]
    async fn test_register_is_all_or_nothing() {
        let db = test_db().await;
        let oil = db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();
        let tire = db.products().create(&new_product("TIRE-R17", 1, 42000)).await.unwrap();

        // First line is fine, second is short: the whole sale must vanish,
        // including the first line's decrement.
        let err = db
            .sales()
            .register(None, &[line(&oil.id, 3), line(&tire.id, 2)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            }
        ));

        assert_eq!(counts(&db).await, (0, 0));

        let oil = db.products().get_by_id(&oil.id).await.unwrap().unwrap();
        let tire = db.products().get_by_id(&tire.id).await.unwrap().unwrap();
        assert_eq!(oil.quantity_on_hand, 10);
        assert_eq!(tire.quantity_on_hand, 1);
    }

    #[tokio::test]
    async fn test_register_unknown_product_rolls_back() {
        let db = test_db().await;
        let oil = db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();

        let err = db
            .sales()
            .register(None, &[line(&oil.id, 1), line("no-such-id", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        assert_eq!(counts(&db).await, (0, 0));
        let oil = db.products().get_by_id(&oil.id).await.unwrap().unwrap();
        assert_eq!(oil.quantity_on_hand, 10);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_sale() {
        let db = test_db().await;

        let err = db.sales().register(None, &[]).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(counts(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_register_rejects_zero_quantity() {
        let db = test_db().await;
        let oil = db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();

        let err = db.sales().register(None, &[line(&oil.id, 0)]).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_reports_totals_and_walk_ins() {
        let db = test_db().await;
        let customer = db.customers().create("Bruno Reis", None, None).await.unwrap();
        let oil = db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();
        let plug = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();

        let named = db
            .sales()
            .register(Some(&customer.id), &[line(&oil.id, 2)])
            .await
            .unwrap();
        let anonymous = db.sales().register(None, &[line(&plug.id, 3)]).await.unwrap();

        let report = db.sales().list().await.unwrap();
        assert_eq!(report.len(), 2);

        let named_row = report.iter().find(|s| s.id == named.sale_id).unwrap();
        assert_eq!(named_row.customer_name.as_deref(), Some("Bruno Reis"));
        assert_eq!(named_row.total_cents, 7000);

        let walk_in_row = report.iter().find(|s| s.id == anonymous.sale_id).unwrap();
        assert!(walk_in_row.customer_name.is_none());
        assert_eq!(walk_in_row.total(), Money::from_cents(7500));
    }

    #[tokio::test]
    async fn test_register_exact_stock_sells_out() {
        let db = test_db().await;
        let tire = db.products().create(&new_product("TIRE-R17", 2, 42000)).await.unwrap();

        let receipt = db.sales().register(None, &[line(&tire.id, 2)]).await.unwrap();
        assert_eq!(receipt.total_cents, 84000);

        let tire = db.products().get_by_id(&tire.id).await.unwrap().unwrap();
        assert_eq!(tire.quantity_on_hand, 0);
        assert!(!db.products().check_stock(&tire.id, 1).await.unwrap());
    }
}
