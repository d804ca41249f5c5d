//! # Service Order Repository
//!
//! Database operations for service orders and their part lines.
//!
//! ## Order Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    Service Order Lifecycle                       │
//! │                                                                  │
//! │  1. CREATE                                                       │
//! │     └── create() → ServiceOrder { status: Open, labor: 0 }       │
//! │                                                                  │
//! │  2. ADD PARTS (only while Open)                                  │
//! │     └── add_part() → stock check → line insert → decrement       │
//! │         (one transaction per part; a rejected part changes       │
//! │          nothing and leaves earlier parts in place)              │
//! │                                                                  │
//! │  3. COMPLETE (terminal)                                          │
//! │     └── complete(labor_fee) → status = Completed                 │
//! │                                                                  │
//! │  total() is computed fresh on every call:                        │
//! │     Σ(current part sale price × quantity) + labor fee            │
//! │  It is never cached, so a later price change shows up in the     │
//! │  next read.                                                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use motoshop_core::validation::{validate_price_cents, validate_quantity};
use motoshop_core::{
    Money, ServiceOrder, ServiceOrderPart, ServiceOrderStatus, ValidationError,
};

/// One row of the order listing screen: the order joined with the
/// customer's name and the vehicle's model.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: String,
    pub customer_name: String,
    pub vehicle_model: String,
    pub description: String,
    pub status: ServiceOrderStatus,
    pub created_at: chrono::DateTime<Utc>,
}

/// Repository for service order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

const ORDER_COLUMNS: &str = "id, customer_id, vehicle_id, description, status, \
     labor_fee_cents, created_at, updated_at";

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Opens a new service order.
    ///
    /// The order starts Open with a zero labor fee; the fee is set when
    /// the work is done, via [`complete`](Self::complete).
    pub async fn create(
        &self,
        customer_id: &str,
        vehicle_id: &str,
        description: &str,
    ) -> DbResult<ServiceOrder> {
        if description.trim().is_empty() {
            return Err(DbError::Validation(ValidationError::required("description")));
        }

        let now = Utc::now();
        let order = ServiceOrder {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            description: description.trim().to_string(),
            status: ServiceOrderStatus::Open,
            labor_fee_cents: 0,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %order.id, "Creating service order");

        sqlx::query(
            r#"
            INSERT INTO service_orders (
                id, customer_id, vehicle_id, description, status,
                labor_fee_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(&order.vehicle_id)
        .bind(&order.description)
        .bind(order.status)
        .bind(order.labor_fee_cents)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets a service order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ServiceOrder>> {
        let order = sqlx::query_as::<_, ServiceOrder>(&format!(
            "SELECT {ORDER_COLUMNS} FROM service_orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Adds a part line to an open order, consuming stock.
    ///
    /// ## What This Does
    /// 1. Rejects if the order is missing or not Open
    /// 2. In one transaction: re-reads stock, inserts the line,
    ///    decrements the product
    ///
    /// A rejected part persists nothing. Parts added by earlier calls
    /// stay on the order - there is no automatic unwinding of an order
    /// that later runs into a short part; the order simply remains Open.
    ///
    /// ## Returns
    /// * `Ok(ServiceOrderPart)` - Line inserted, stock decremented
    /// * `Err(DbError::NotFound)` - Unknown order or product
    /// * `Err(DbError::OrderNotOpen)` - Order already completed
    /// * `Err(DbError::InsufficientStock)` - Not enough on hand
    pub async fn add_part(
        &self,
        order_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> DbResult<ServiceOrderPart> {
        validate_quantity(quantity)?;

        let status: Option<ServiceOrderStatus> =
            sqlx::query_scalar("SELECT status FROM service_orders WHERE id = ?1")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;

        match status {
            None => return Err(DbError::not_found("Service order", order_id)),
            Some(ServiceOrderStatus::Open) => {}
            Some(_) => {
                return Err(DbError::OrderNotOpen {
                    order_id: order_id.to_string(),
                })
            }
        }

        let mut tx = self.pool.begin().await?;

        let on_hand: Option<i64> =
            sqlx::query_scalar("SELECT quantity_on_hand FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let available = match on_hand {
            None => {
                tx.rollback().await?;
                return Err(DbError::not_found("Product", product_id));
            }
            Some(available) => available,
        };

        if available < quantity {
            tx.rollback().await?;
            return Err(DbError::InsufficientStock {
                product_id: product_id.to_string(),
                available,
                requested: quantity,
            });
        }

        let part = ServiceOrderPart {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO service_order_parts (id, order_id, product_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&part.id)
        .bind(&part.order_id)
        .bind(&part.product_id)
        .bind(part.quantity)
        .bind(part.created_at)
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
        .bind(product_id)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(order_id = %order_id, product_id = %product_id, quantity = %quantity, "Part added to order");

        Ok(part)
    }

    /// Lists the part lines of an order, oldest first.
    pub async fn parts(&self, order_id: &str) -> DbResult<Vec<ServiceOrderPart>> {
        let parts = sqlx::query_as::<_, ServiceOrderPart>(
            r#"
            SELECT id, order_id, product_id, quantity, created_at
            FROM service_order_parts
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    /// Completes an open order and records its labor fee.
    ///
    /// Completed is terminal: the UPDATE is guarded by `status = 'open'`,
    /// so completing twice (or completing a missing order) fails instead
    /// of silently rewriting the fee.
    pub async fn complete(&self, order_id: &str, labor_fee_cents: i64) -> DbResult<()> {
        validate_price_cents(labor_fee_cents)?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE service_orders
            SET status = 'completed',
                labor_fee_cents = ?2,
                updated_at = ?3
            WHERE id = ?1 AND status = 'open'
            "#,
        )
        .bind(order_id)
        .bind(labor_fee_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Zero rows: either no such order, or it is no longer open.
            return match self.get_by_id(order_id).await? {
                None => Err(DbError::not_found("Service order", order_id)),
                Some(_) => Err(DbError::OrderNotOpen {
                    order_id: order_id.to_string(),
                }),
            };
        }

        info!(order_id = %order_id, labor_fee_cents = %labor_fee_cents, "Service order completed");

        Ok(())
    }

    /// Computes the order total: Σ(current part sale price × quantity)
    /// plus the stored labor fee.
    ///
    /// Recomputed from the part lines on every call; repeated reads of an
    /// unchanged order return the same amount.
    pub async fn total(&self, order_id: &str) -> DbResult<Money> {
        let labor_fee_cents: Option<i64> =
            sqlx::query_scalar("SELECT labor_fee_cents FROM service_orders WHERE id = ?1")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;

        let labor_fee_cents =
            labor_fee_cents.ok_or_else(|| DbError::not_found("Service order", order_id))?;

        let parts_cents: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(p.sale_price_cents * op.quantity)
            FROM service_order_parts op
            JOIN products p ON op.product_id = p.id
            WHERE op.order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(parts_cents.unwrap_or(0) + labor_fee_cents))
    }

    /// Lists all orders for the overview screen, newest first, with the
    /// customer's name and vehicle's model joined in.
    pub async fn list(&self) -> DbResult<Vec<OrderSummary>> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT
                so.id,
                c.name AS customer_name,
                v.model AS vehicle_model,
                so.description,
                so.status,
                so.created_at
            FROM service_orders so
            JOIN customers c ON so.customer_id = c.id
            JOIN vehicles v ON so.vehicle_id = v.id
            ORDER BY so.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use motoshop_core::{NewProduct, NewVehicle};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Customer + vehicle + open order, ready for parts.
    async fn order_fixture(db: &Database) -> ServiceOrder {
        let customer = db.customers().create("Rita Alves", None, None).await.unwrap();
        let vehicle = db
            .vehicles()
            .create(&NewVehicle {
                customer_id: customer.id.clone(),
                brand: "Honda".to_string(),
                model: "CB 300".to_string(),
                plate: "BRA2E19".to_string(),
                year: None,
                color: None,
            })
            .await
            .unwrap();

        db.orders()
            .create(&customer.id, &vehicle.id, "full revision")
            .await
            .unwrap()
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

    #[tokio::test]
    async fn test_create_starts_open_with_zero_labor() {
        let db = test_db().await;
        let order = order_fixture(&db).await;

        assert_eq!(order.status, ServiceOrderStatus::Open);
        assert_eq!(order.labor_fee_cents, 0);

        let fetched = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert!(fetched.is_open());
    }

    #[tokio::test]
    async fn test_add_part_decrements_stock() {
        let db = test_db().await;
        let order = order_fixture(&db).await;
        let product = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();

        db.orders().add_part(&order.id, &product.id, 4).await.unwrap();

        let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(product.quantity_on_hand, 6);
        assert_eq!(db.orders().parts(&order.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_part_insufficient_stock_changes_nothing() {
        let db = test_db().await;
        let order = order_fixture(&db).await;
        let plug = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();
        let tire = db.products().create(&new_product("TIRE-R17", 1, 42000)).await.unwrap();

        db.orders().add_part(&order.id, &plug.id, 2).await.unwrap();

        let err = db.orders().add_part(&order.id, &tire.id, 2).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            }
        ));

        // The rejected line left no trace; the earlier line stays and the
        // order is still open.
        assert_eq!(db.orders().parts(&order.id).await.unwrap().len(), 1);
        let tire = db.products().get_by_id(&tire.id).await.unwrap().unwrap();
        assert_eq!(tire.quantity_on_hand, 1);
        assert!(db.orders().get_by_id(&order.id).await.unwrap().unwrap().is_open());
    }

    #[tokio::test]
    async fn test_add_part_requires_open_order() {
        let db = test_db().await;
        let order = order_fixture(&db).await;
        let product = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();

        db.orders().complete(&order.id, 5000).await.unwrap();

        let err = db.orders().add_part(&order.id, &product.id, 1).await.unwrap_err();
        assert!(matches!(err, DbError::OrderNotOpen { .. }));
    }

    #[tokio::test]
    async fn test_add_part_unknown_product() {
        let db = test_db().await;
        let order = order_fixture(&db).await;

        let err = db.orders().add_part(&order.id, "no-such-id", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(db.orders().parts(&order.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_is_terminal() {
        let db = test_db().await;
        let order = order_fixture(&db).await;

        db.orders().complete(&order.id, 7500).await.unwrap();

        let fetched = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ServiceOrderStatus::Completed);
        assert_eq!(fetched.labor_fee_cents, 7500);

        let err = db.orders().complete(&order.id, 9999).await.unwrap_err();
        assert!(matches!(err, DbError::OrderNotOpen { .. }));

        // Fee untouched by the rejected second completion
        let fetched = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.labor_fee_cents, 7500);
    }

    #[tokio::test]
    async fn test_complete_missing_order() {
        let db = test_db().await;
        let err = db.orders().complete("no-such-id", 1000).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_total_sums_parts_and_labor() {
        let db = test_db().await;
        let order = order_fixture(&db).await;
        let plug = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();
        let oil = db.products().create(&new_product("OIL-10W40", 10, 3500)).await.unwrap();

        db.orders().add_part(&order.id, &plug.id, 2).await.unwrap(); // 5000
        db.orders().add_part(&order.id, &oil.id, 1).await.unwrap(); // 3500

        // Open order: parts only, labor still zero
        assert_eq!(db.orders().total(&order.id).await.unwrap().cents(), 8500);

        db.orders().complete(&order.id, 4500).await.unwrap();

        let total = db.orders().total(&order.id).await.unwrap();
        assert_eq!(total.cents(), 13000);

        // Idempotent read: same answer every time
        assert_eq!(db.orders().total(&order.id).await.unwrap(), total);
    }

    #[tokio::test]
    async fn test_total_reflects_current_prices() {
        let db = test_db().await;
        let order = order_fixture(&db).await;
        let plug = db.products().create(&new_product("SPK-PLUG", 10, 2500)).await.unwrap();

        db.orders().add_part(&order.id, &plug.id, 2).await.unwrap();
        assert_eq!(db.orders().total(&order.id).await.unwrap().cents(), 5000);

        // Reprice the part: the total is recomputed, not cached
        sqlx::query("UPDATE products SET sale_price_cents = 3000 WHERE id = ?1")
            .bind(&plug.id)
            .execute(db.pool())
            .await
            .unwrap();

        assert_eq!(db.orders().total(&order.id).await.unwrap().cents(), 6000);
    }

    #[tokio::test]
    async fn test_total_missing_order() {
        let db = test_db().await;
        let err = db.orders().total("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_joins_customer_and_vehicle() {
        let db = test_db().await;
        let order = order_fixture(&db).await;

        let summaries = db.orders().list().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, order.id);
        assert_eq!(summaries[0].customer_name, "Rita Alves");
        assert_eq!(summaries[0].vehicle_model, "CB 300");
        assert_eq!(summaries[0].status, ServiceOrderStatus::Open);
    }
}
