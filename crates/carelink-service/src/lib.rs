//! # carelink-service
//!
//! Business logic service layer for CareLink. Each service orchestrates
//! repositories, authentication, and the payment gateway to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod directory;
pub mod matching;
pub mod messaging;
pub mod payment;
pub mod review;

pub use account::AccountService;
pub use context::RequestContext;
pub use directory::DirectoryService;
pub use matching::MatchService;
pub use messaging::MessagingService;
pub use payment::PaymentService;
pub use review::ReviewService;
