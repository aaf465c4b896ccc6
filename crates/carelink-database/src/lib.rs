//! # carelink-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all CareLink entities. Repositories own a cloned
//! `PgPool` handle injected at construction; there is no global
//! connection state.

pub mod connection;
pub mod migration;
pub mod repositories;
