//! # carelink-entity
//!
//! Domain entity models for CareLink. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod conversation;
pub mod matching;
pub mod profile;
pub mod review;
pub mod transaction;
pub mod user;
