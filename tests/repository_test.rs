//! Repository invariant tests against a live PostgreSQL instance.
//!
//! Each test provisions a fresh database and applies `./migrations`.
//! They are ignored by default so the suite passes without Postgres;
//! run them with a reachable server and `DATABASE_URL` set:
//!
//! ```text
//! cargo test --test repository_test -- --ignored
//! ```

use sqlx::PgPool;
use uuid::Uuid;

use carelink_core::error::ErrorKind;
use carelink_core::types::pagination::PageRequest;
use carelink_database::repositories::{
    CaregiverProfileRepository, ConversationRepository, FamilyProfileRepository,
    MatchRequestRepository, MessageRepository, ReviewRepository, UserRepository,
};
use carelink_entity::matching::{CreateMatchRequest, MatchStatus};
use carelink_entity::profile::{CaregiverProfile, FamilyProfile};
use carelink_entity::review::CreateReview;
use carelink_entity::user::{CreateUser, UserRole};

async fn seed_family(pool: &PgPool, name: &str) -> FamilyProfile {
    let users = UserRepository::new(pool.clone());
    let families = FamilyProfileRepository::new(pool.clone());
    let mut tx = users.begin().await.unwrap();
    let user = users
        .create_in_tx(&mut tx, &new_user(name, UserRole::Family))
        .await
        .unwrap();
    let profile = families.create_in_tx(&mut tx, user.id).await.unwrap();
    tx.commit().await.unwrap();
    profile
}

async fn seed_caregiver(pool: &PgPool, name: &str) -> CaregiverProfile {
    let users = UserRepository::new(pool.clone());
    let caregivers = CaregiverProfileRepository::new(pool.clone());
    let mut tx = users.begin().await.unwrap();
    let user = users
        .create_in_tx(&mut tx, &new_user(name, UserRole::Caregiver))
        .await
        .unwrap();
    let profile = caregivers.create_in_tx(&mut tx, user.id).await.unwrap();
    tx.commit().await.unwrap();
    profile
}

fn new_user(name: &str, role: UserRole) -> CreateUser {
    CreateUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$AAAAAAAAAAA".to_string(),
        role,
        first_name: None,
        last_name: None,
    }
}

fn new_request(family: Uuid, caregiver: Uuid) -> CreateMatchRequest {
    CreateMatchRequest {
        family_profile_id: family,
        caregiver_profile_id: caregiver,
        message_to_caregiver: None,
        proposed_start_date: None,
        requested_hours_per_week: None,
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_second_pending_request_for_pair_is_conflict(pool: PgPool) {
    let family = seed_family(&pool, "fam_dup").await;
    let caregiver = seed_caregiver(&pool, "cg_dup").await;
    let matches = MatchRequestRepository::new(pool.clone());

    matches
        .create(&new_request(family.id, caregiver.id))
        .await
        .unwrap();
    let err = matches
        .create(&new_request(family.id, caregiver.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_resolved_request_does_not_block_new_pending(pool: PgPool) {
    let family = seed_family(&pool, "fam_retry").await;
    let caregiver = seed_caregiver(&pool, "cg_retry").await;
    let matches = MatchRequestRepository::new(pool.clone());

    let first = matches
        .create(&new_request(family.id, caregiver.id))
        .await
        .unwrap();
    matches
        .transition_from_pending(first.id, MatchStatus::DeclinedByCaregiver)
        .await
        .unwrap()
        .unwrap();

    // The partial index only guards pending rows, so the family may ask again.
    let second = matches
        .create(&new_request(family.id, caregiver.id))
        .await
        .unwrap();
    assert_ne!(second.id, first.id);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_transition_on_terminal_request_updates_nothing(pool: PgPool) {
    let family = seed_family(&pool, "fam_cas").await;
    let caregiver = seed_caregiver(&pool, "cg_cas").await;
    let matches = MatchRequestRepository::new(pool.clone());

    let request = matches
        .create(&new_request(family.id, caregiver.id))
        .await
        .unwrap();
    let accepted = matches
        .transition_from_pending(request.id, MatchStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.unwrap().status, MatchStatus::Accepted);

    // Losing the compare-and-set yields no row and leaves the winner's
    // status in place.
    let late = matches
        .transition_from_pending(request.id, MatchStatus::DeclinedByCaregiver)
        .await
        .unwrap();
    assert!(late.is_none());
    let current = matches.find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(current.status, MatchStatus::Accepted);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_accepted_requests_listed_by_update_recency(pool: PgPool) {
    let family = seed_family(&pool, "fam_order").await;
    let first_caregiver = seed_caregiver(&pool, "cg_order_a").await;
    let second_caregiver = seed_caregiver(&pool, "cg_order_b").await;
    let matches = MatchRequestRepository::new(pool.clone());

    let older = matches
        .create(&new_request(family.id, first_caregiver.id))
        .await
        .unwrap();
    let newer = matches
        .create(&new_request(family.id, second_caregiver.id))
        .await
        .unwrap();

    // Accept in the opposite order of creation; the listing must follow
    // acceptance time, not creation time.
    matches
        .transition_from_pending(newer.id, MatchStatus::Accepted)
        .await
        .unwrap();
    matches
        .transition_from_pending(older.id, MatchStatus::Accepted)
        .await
        .unwrap();

    let page = matches
        .list_for_family(family.id, Some(MatchStatus::Accepted), &PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_find_or_create_is_order_independent(pool: PgPool) {
    let family = seed_family(&pool, "fam_conv").await;
    let caregiver = seed_caregiver(&pool, "cg_conv").await;
    let conversations = ConversationRepository::new(pool.clone());

    let (created, was_new) = conversations
        .find_or_create(family.user_id, caregiver.user_id)
        .await
        .unwrap();
    assert!(was_new);

    let (found, was_new) = conversations
        .find_or_create(caregiver.user_id, family.user_id)
        .await
        .unwrap();
    assert!(!was_new);
    assert_eq!(found.id, created.id);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_messages_listed_newest_first(pool: PgPool) {
    let family = seed_family(&pool, "fam_msg").await;
    let caregiver = seed_caregiver(&pool, "cg_msg").await;
    let conversations = ConversationRepository::new(pool.clone());
    let messages = MessageRepository::new(pool.clone());

    let (conversation, _) = conversations
        .find_or_create(family.user_id, caregiver.user_id)
        .await
        .unwrap();
    messages
        .create(conversation.id, family.user_id, "first")
        .await
        .unwrap();
    messages
        .create(conversation.id, caregiver.user_id, "second")
        .await
        .unwrap();

    let page = messages
        .list_for_conversation(conversation.id, &PageRequest::default())
        .await
        .unwrap();
    let bodies: Vec<&str> = page.items.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, vec!["second", "first"]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_mark_read_counts_once(pool: PgPool) {
    let family = seed_family(&pool, "fam_read").await;
    let caregiver = seed_caregiver(&pool, "cg_read").await;
    let conversations = ConversationRepository::new(pool.clone());
    let messages = MessageRepository::new(pool.clone());

    let (conversation, _) = conversations
        .find_or_create(family.user_id, caregiver.user_id)
        .await
        .unwrap();
    messages
        .create(conversation.id, caregiver.user_id, "are you free monday?")
        .await
        .unwrap();
    messages
        .create(conversation.id, caregiver.user_id, "or tuesday?")
        .await
        .unwrap();
    // The reader's own message must never count as unread.
    messages
        .create(conversation.id, family.user_id, "monday works")
        .await
        .unwrap();

    let marked = messages
        .mark_read(conversation.id, family.user_id)
        .await
        .unwrap();
    assert_eq!(marked, 2);

    let again = messages
        .mark_read(conversation.id, family.user_id)
        .await
        .unwrap();
    assert_eq!(again, 0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_one_review_per_family_caregiver_pair(pool: PgPool) {
    let family = seed_family(&pool, "fam_rev").await;
    let caregiver = seed_caregiver(&pool, "cg_rev").await;
    let reviews = ReviewRepository::new(pool.clone());

    reviews
        .create(&CreateReview {
            family_profile_id: family.id,
            caregiver_profile_id: caregiver.id,
            rating: 5,
            comment: Some("wonderful with our kids".to_string()),
        })
        .await
        .unwrap();

    let err = reviews
        .create(&CreateReview {
            family_profile_id: family.id,
            caregiver_profile_id: caregiver.id,
            rating: 2,
            comment: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}
