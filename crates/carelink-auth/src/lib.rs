//! # carelink-auth
//!
//! Authentication primitives for the CareLink marketplace.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
