//! Chemotherapy session and medicine reminder tracking service.
//!
//! Clients POST arbitrary JSON records to one of two logs and read each log
//! back in arrival order. Records are kept in memory only and are lost on
//! restart.
//!
//! # Endpoints
//!
//! ```text
//! POST /add_chemo_session       -> 201 {"message": "Chemo session added", "data": <body>}
//! GET  /get_chemo_sessions      -> 200 [<body>, ...]
//! POST /add_medicine_reminder   -> 201 {"message": "Medicine reminder added", "data": <body>}
//! GET  /get_medicine_reminders  -> 200 [<body>, ...]
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Append-only in-memory record logs
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
