//! # Vehicle Repository
//!
//! Database operations for customer vehicles.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use motoshop_core::{NewVehicle, ValidationError, Vehicle};

/// Repository for vehicle database operations.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    /// Creates a new VehicleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VehicleRepository { pool }
    }

    /// Registers a vehicle for a customer.
    ///
    /// Brand, model, and plate are required; year and color are whatever
    /// the counter typed. The owning customer must exist (enforced by the
    /// foreign key).
    pub async fn create(&self, new: &NewVehicle) -> DbResult<Vehicle> {
        for (field, value) in [
            ("brand", &new.brand),
            ("model", &new.model),
            ("plate", &new.plate),
        ] {
            if value.trim().is_empty() {
                return Err(DbError::Validation(ValidationError::required(field)));
            }
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id.clone(),
            brand: new.brand.trim().to_string(),
            model: new.model.trim().to_string(),
            plate: new.plate.trim().to_string(),
            year: new.year.clone(),
            color: new.color.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %vehicle.id, plate = %vehicle.plate, "Inserting vehicle");

        sqlx::query(
            r#"
            INSERT INTO vehicles (id, customer_id, brand, model, plate, year, color, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.customer_id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.plate)
        .bind(&vehicle.year)
        .bind(&vehicle.color)
        .bind(vehicle.created_at)
        .execute(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Gets a vehicle by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, customer_id, brand, model, plate, year, color, created_at
            FROM vehicles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Lists a customer's vehicles.
    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, customer_id, brand, model, plate, year, color, created_at
            FROM vehicles
            WHERE customer_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
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

    fn new_vehicle(customer_id: &str, plate: &str) -> NewVehicle {
        NewVehicle {
            customer_id: customer_id.to_string(),
            brand: "Yamaha".to_string(),
            model: "Factor 150".to_string(),
            plate: plate.to_string(),
            year: Some("2021".to_string()),
            color: Some("red".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_by_customer() {
        let db = test_db().await;

        let customer = db.customers().create("Carlos Dias", None, None).await.unwrap();
        db.vehicles().create(&new_vehicle(&customer.id, "ABC1D23")).await.unwrap();
        db.vehicles().create(&new_vehicle(&customer.id, "XYZ9K88")).await.unwrap();

        let other = db.customers().create("Outro Dono", None, None).await.unwrap();
        db.vehicles().create(&new_vehicle(&other.id, "QQQ0Q00")).await.unwrap();

        let vehicles = db.vehicles().list_by_customer(&customer.id).await.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert!(vehicles.iter().all(|v| v.customer_id == customer.id));
    }

    #[tokio::test]
    async fn test_create_requires_plate() {
        let db = test_db().await;

        let customer = db.customers().create("Carlos Dias", None, None).await.unwrap();
        let err = db
            .vehicles()
            .create(&new_vehicle(&customer.id, "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_unknown_customer_rejected() {
        let db = test_db().await;

        let err = db
            .vehicles()
            .create(&new_vehicle("no-such-customer", "ABC1D23"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
