//! # Domain Types
//!
//! Core domain types used throughout MotoShop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                             │
//! │                                                                  │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐        │
//! │  │   Customer   │───►│   Vehicle    │    │   Product    │        │
//! │  │ ──────────── │    │ ──────────── │    │ ──────────── │        │
//! │  │ id (UUID)    │    │ id (UUID)    │    │ id (UUID)    │        │
//! │  │ name         │    │ customer_id  │    │ code (biz)   │        │
//! │  │ tax_id       │    │ plate        │    │ quantity     │        │
//! │  └──────┬───────┘    └──────┬───────┘    └──────┬───────┘        │
//! │         │                   │                   │                │
//! │         ▼                   ▼                   ▼                │
//! │  ┌──────────────┐    ┌──────────────────┐  ┌──────────────┐      │
//! │  │ ServiceOrder │───►│ ServiceOrderPart │  │   SaleItem   │      │
//! │  │ Open/Done    │    │ qty ≤ stock      │  │ qty ≤ stock  │      │
//! │  └──────────────┘    └──────────────────┘  └──────▲───────┘      │
//! │                                                   │              │
//! │  ┌──────────────┐    ┌──────────────┐      ┌──────┴───────┐      │
//! │  │   Employee   │    │ walk-in sale │─────►│     Sale     │      │
//! │  │ tax_id UNIQUE│    │ customer=NULL│      └──────────────┘      │
//! │  └──────────────┘    └──────────────┘                            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists: (product code, employee tax id) -
//!   human-readable, potentially mutable

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer of the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name. The only required field on intake.
    pub name: String,

    /// National tax id (CPF). Optional for customers.
    pub tax_id: Option<String>,

    /// Contact phone, 11 digits when present.
    pub phone: Option<String>,

    /// When the customer was registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Vehicle
// =============================================================================

/// A motorcycle owned by a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vehicle {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning customer.
    pub customer_id: String,

    pub brand: String,
    pub model: String,

    /// License plate as typed at intake.
    pub plate: String,

    /// Model year. Free text, often left blank at the counter.
    pub year: Option<String>,

    pub color: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Input record for registering a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    pub customer_id: String,
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub year: Option<String>,
    pub color: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A part in inventory, consumed by service orders and sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Part code - business identifier, unique.
    pub code: String,

    /// Display description shown on order and sale screens.
    pub description: String,

    /// Current stock level. Never negative while every decrement goes
    /// through the stock guard.
    pub quantity_on_hand: i64,

    /// Purchase cost in cents.
    pub cost_cents: i64,

    /// Sale price in cents. Order and sale totals are computed from this.
    pub sale_price_cents: i64,

    /// Stock level at or below which the part shows on the restock report.
    pub reorder_threshold: i64,

    pub created_at: DateTime<Utc>,

    /// Bumped on every stock movement.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Returns the purchase cost as a Money type.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Checks whether the requested quantity is covered by current stock.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.quantity_on_hand >= quantity
    }

    /// Checks whether the part is at or under its reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity_on_hand <= self.reorder_threshold
    }
}

/// Input record for registering a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub description: String,
    pub quantity_on_hand: i64,
    pub cost_cents: i64,
    pub sale_price_cents: i64,
    pub reorder_threshold: i64,
}

// =============================================================================
// Service Order
// =============================================================================

/// The status of a service order.
///
/// Orders are created Open and move to Completed exactly once;
/// Completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderStatus {
    /// Work in progress - parts may still be added.
    Open,
    /// Work done, labor fee recorded. Terminal.
    Completed,
}

/// A repair job for a customer's vehicle.
///
/// The order total is never stored: it is recomputed on demand as the sum
/// of part line totals plus the labor fee, so a price change on a part is
/// always reflected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ServiceOrder {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub customer_id: String,
    pub vehicle_id: String,

    /// What the customer asked for, as typed at intake.
    pub description: String,

    pub status: ServiceOrderStatus,

    /// Labor fee in cents. Zero until the order is completed.
    pub labor_fee_cents: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceOrder {
    /// Returns the labor fee as a Money type.
    #[inline]
    pub fn labor_fee(&self) -> Money {
        Money::from_cents(self.labor_fee_cents)
    }

    /// Checks whether parts may still be added.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == ServiceOrderStatus::Open
    }
}

/// A part line on a service order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ServiceOrderPart {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// An over-the-counter parts sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Buying customer. `None` for walk-in sales.
    pub customer_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Checks whether this sale has no registered customer.
    #[inline]
    pub fn is_walk_in(&self) -> bool {
        self.customer_id.is_none()
    }
}

/// An item line on a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Input line for registering a sale: which part, how many.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
}

// =============================================================================
// Employee
// =============================================================================

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

/// A shop employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    /// National tax id (CPF) - business identifier, unique and required
    /// for employees.
    pub tax_id: String,

    pub phone: Option<String>,

    /// Job role (mechanic, attendant, manager, ...). Free text.
    pub role: String,

    pub hired_on: Option<NaiveDate>,

    /// Monthly salary in cents.
    pub salary_cents: i64,

    pub status: EmployeeStatus,

    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Returns the salary as a Money type.
    #[inline]
    pub fn salary(&self) -> Money {
        Money::from_cents(self.salary_cents)
    }

    /// Checks whether the employee is currently active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Input record for registering an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub role: String,
    pub hired_on: Option<NaiveDate>,
    pub salary_cents: i64,
}
