//! # Repository Module
//!
//! Database repository implementations for MotoShop.
//!
//! ## Repository Pattern
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                  │
//! │                                                                  │
//! │  The Repository pattern abstracts database access behind a       │
//! │  clean API.                                                      │
//! │                                                                  │
//! │  Shell action                                                    │
//! │       │                                                          │
//! │       │  db.orders().add_part(order_id, product_id, 2)           │
//! │       ▼                                                          │
//! │  OrderRepository                                                 │
//! │  ├── create(&self, customer_id, vehicle_id, description)         │
//! │  ├── add_part(&self, order_id, product_id, quantity)             │
//! │  ├── complete(&self, order_id, labor_fee_cents)                  │
//! │  └── total(&self, order_id)                                      │
//! │       │                                                          │
//! │       │  SQL                                                     │
//! │       ▼                                                          │
//! │  SQLite Database                                                 │
//! │                                                                  │
//! │  Benefits:                                                       │
//! │  • Clean separation of concerns                                  │
//! │  • SQL is isolated in one place                                  │
//! │  • Each entity's rules live next to its statements               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD + deletion guard
//! - [`vehicle::VehicleRepository`] - Vehicle CRUD
//! - [`product::ProductRepository`] - Product CRUD + stock guard
//! - [`order::OrderRepository`] - Service order lifecycle
//! - [`sale::SaleRepository`] - All-or-nothing sale registration
//! - [`employee::EmployeeRepository`] - Employee CRUD

pub mod customer;
pub mod employee;
pub mod order;
pub mod product;
pub mod sale;
pub mod vehicle;
