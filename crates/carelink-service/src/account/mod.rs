//! Account registration, login, and profile management.

pub mod service;

pub use service::{AccountProfile, AccountService, LoginRequest, LoginResponse, RegisterRequest};
