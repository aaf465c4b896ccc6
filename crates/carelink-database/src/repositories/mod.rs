//! Repository implementations for all CareLink entities.

pub mod availability;
pub mod caregiver_profile;
pub mod conversation;
pub mod family_profile;
pub mod match_request;
pub mod message;
pub mod photo;
pub mod review;
pub mod transaction;
pub mod user;

pub use availability::AvailabilityRepository;
pub use caregiver_profile::CaregiverProfileRepository;
pub use conversation::ConversationRepository;
pub use family_profile::FamilyProfileRepository;
pub use match_request::MatchRequestRepository;
pub use message::MessageRepository;
pub use photo::PhotoRepository;
pub use review::ReviewRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
