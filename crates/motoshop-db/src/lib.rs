//! # motoshop-db: Database Layer for MotoShop
//!
//! This crate provides database access for the MotoShop system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      MotoShop Data Flow                          │
//! │                                                                  │
//! │  Shell action (register sale, add part, ...)                     │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                  motoshop-db (THIS CRATE)                  │  │
//! │  │                                                            │  │
//! │  │  ┌─────────────┐   ┌───────────────┐   ┌───────────────┐   │  │
//! │  │  │  Database   │   │ Repositories  │   │  Migrations   │   │  │
//! │  │  │  (pool.rs)  │   │ (customer.rs, │   │  (embedded)   │   │  │
//! │  │  │             │◄──│  product.rs,  │   │ 001_init.sql  │   │  │
//! │  │  │ SqlitePool  │   │  order.rs...) │   │               │   │  │
//! │  │  └─────────────┘   └───────────────┘   └───────────────┘   │  │
//! │  │                                                            │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  SQLite database file (motoshop.db)                              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (one per entity)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use motoshop_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let db = Database::new(DbConfig::new("path/to/motoshop.db")).await?;
//!
//! // Use repositories
//! let order = db.orders().create(&customer.id, &vehicle.id, "chain slack").await?;
//! db.orders().add_part(&order.id, &chain_kit.id, 1).await?;
//! db.orders().complete(&order.id, 4500).await?;
//! let total = db.orders().total(&order.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::employee::EmployeeRepository;
pub use repository::order::{OrderRepository, OrderSummary};
pub use repository::product::ProductRepository;
pub use repository::sale::{SaleReceipt, SaleRepository, SaleSummary};
pub use repository::vehicle::VehicleRepository;
