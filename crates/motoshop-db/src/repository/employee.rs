//! # Employee Repository
//!
//! Database operations for shop employees.
//!
//! The tax id is the business key: UNIQUE in the schema, so a duplicate
//! registration fails at insert and leaves the table unchanged.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use motoshop_core::validation::{validate_name, validate_phone, validate_tax_id};
use motoshop_core::{Employee, EmployeeStatus, NewEmployee, ValidationError};

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

const EMPLOYEE_COLUMNS: &str =
    "id, name, tax_id, phone, role, hired_on, salary_cents, status, created_at";

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Registers a new employee, Active by default.
    ///
    /// ## Returns
    /// * `Ok(Employee)` - Inserted record
    /// * `Err(DbError::UniqueViolation)` - Tax id already registered
    /// * `Err(DbError::Validation)` - Missing name/role, malformed
    ///   tax id or phone, negative salary
    pub async fn create(&self, new: &NewEmployee) -> DbResult<Employee> {
        validate_name(&new.name)?;
        validate_tax_id(&new.tax_id)?;
        if let Some(phone) = new.phone.as_deref() {
            validate_phone(phone)?;
        }
        if new.role.trim().is_empty() {
            return Err(DbError::Validation(ValidationError::required("role")));
        }
        if new.salary_cents < 0 {
            return Err(DbError::Validation(ValidationError::OutOfRange {
                field: "salary_cents".to_string(),
                min: 0,
                max: i64::MAX,
            }));
        }

        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            tax_id: new.tax_id.trim().to_string(),
            phone: new.phone.clone(),
            role: new.role.trim().to_string(),
            hired_on: new.hired_on,
            salary_cents: new.salary_cents,
            status: EmployeeStatus::default(),
            created_at: Utc::now(),
        };

        debug!(id = %employee.id, role = %employee.role, "Inserting employee");

        sqlx::query(
            r#"
            INSERT INTO employees (
                id, name, tax_id, phone, role, hired_on, salary_cents, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.tax_id)
        .bind(&employee.phone)
        .bind(&employee.role)
        .bind(employee.hired_on)
        .bind(employee.salary_cents)
        .bind(employee.status)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Gets an employee by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Lists all employees, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Deletes an employee.
    ///
    /// Unconditional: no table references employees, so there is no
    /// dependency to guard. If orders ever gain an assigned mechanic,
    /// this grows the same count-based guard customers have.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_employee(name: &str, tax_id: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            phone: Some("11988887777".to_string()),
            role: "mechanic".to_string(),
            hired_on: NaiveDate::from_ymd_opt(2024, 3, 11),
            salary_cents: 320000,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;

        let created = db
            .employees()
            .create(&new_employee("Pedro Gomes", "52998224725"))
            .await
            .unwrap();
        assert_eq!(created.status, EmployeeStatus::Active);

        let fetched = db.employees().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.role, "mechanic");
        assert_eq!(fetched.hired_on, NaiveDate::from_ymd_opt(2024, 3, 11));
        assert!(fetched.is_active());
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_leaves_table_unchanged() {
        let db = test_db().await;

        db.employees()
            .create(&new_employee("Pedro Gomes", "52998224725"))
            .await
            .unwrap();

        let err = db
            .employees()
            .create(&new_employee("Outra Pessoa", "52998224725"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let employees = db.employees().list().await.unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, "Pedro Gomes");
    }

    #[tokio::test]
    async fn test_create_validates_tax_id() {
        let db = test_db().await;

        let mut bad = new_employee("Pedro Gomes", "529.982.247-25");
        assert!(matches!(
            db.employees().create(&bad).await.unwrap_err(),
            DbError::Validation(_)
        ));

        bad.tax_id = "52998224725".to_string();
        bad.role = "  ".to_string();
        assert!(matches!(
            db.employees().create(&bad).await.unwrap_err(),
            DbError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let db = test_db().await;

        let employee = db
            .employees()
            .create(&new_employee("Pedro Gomes", "52998224725"))
            .await
            .unwrap();

        db.employees().delete(&employee.id).await.unwrap();
        assert!(db.employees().get_by_id(&employee.id).await.unwrap().is_none());

        let err = db.employees().delete(&employee.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let db = test_db().await;

        db.employees()
            .create(&new_employee("Zilda Nunes", "11111111111"))
            .await
            .unwrap();
        db.employees()
            .create(&new_employee("Abel Costa", "22222222222"))
            .await
            .unwrap();

        let employees = db.employees().list().await.unwrap();
        assert_eq!(employees[0].name, "Abel Costa");
        assert_eq!(employees[1].name, "Zilda Nunes");
    }
}
