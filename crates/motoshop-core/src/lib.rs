//! # motoshop-core: Pure Business Logic for MotoShop
//!
//! This crate is the **heart** of MotoShop, a motorcycle repair shop
//! manager. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     MotoShop Architecture                        │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                  Desktop Shell (external)                  │  │
//! │  │   Customer forms ──► Order screen ──► Sale screen          │  │
//! │  └──────────────────────────────┬─────────────────────────────┘  │
//! │                                 │                                │
//! │  ┌──────────────────────────────▼─────────────────────────────┐  │
//! │  │              ★ motoshop-core (THIS CRATE) ★                │  │
//! │  │                                                            │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐             │  │
//! │  │   │   types   │  │   money   │  │ validation │             │  │
//! │  │   │  Product  │  │   Money   │  │   rules    │             │  │
//! │  │   │  Order    │  │  (cents)  │  │   checks   │             │  │
//! │  │   └───────────┘  └───────────┘  └────────────┘             │  │
//! │  │                                                            │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └──────────────────────────────┬─────────────────────────────┘  │
//! │                                 │                                │
//! │  ┌──────────────────────────────▼─────────────────────────────┐  │
//! │  │                motoshop-db (Database Layer)                │  │
//! │  │           SQLite queries, migrations, repositories         │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Vehicle, Product, ServiceOrder, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use motoshop_core::Money` instead of
// `use motoshop_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product on an order part or sale item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-shop in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;
