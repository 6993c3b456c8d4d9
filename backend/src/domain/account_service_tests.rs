//! Tests for the account service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository, StoredUser};
use crate::domain::ports::fixtures::fixture_member;
use crate::domain::{ErrorCode, PasswordDigest};

const DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockUserRepository, MockPasswordHasher> {
    AccountService::new(Arc::new(users), Arc::new(hasher))
}

fn stored_member() -> StoredUser {
    StoredUser {
        user: fixture_member().expect("fixture member"),
        password: PasswordDigest::new(DIGEST),
    }
}

fn registration() -> Registration {
    Registration::try_from_parts("bente", "Bente@Example.dk", "hemmeligt", "hemmeligt")
        .expect("valid registration")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("anna", password).expect("credentials shape")
}

#[tokio::test]
async fn authenticate_returns_user_when_password_verifies() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|name| name == "anna")
        .times(1)
        .return_once(|_| Ok(Some(stored_member())));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, digest| password == "password" && digest.as_str() == DIGEST)
        .times(1)
        .return_once(|_, _| Ok(true));

    let user = make_service(users, hasher)
        .authenticate(&credentials("password"))
        .await
        .expect("login succeeds");

    assert_eq!(user.username().as_ref(), "anna");
}

#[rstest]
#[case::unknown_user(None, false)]
#[case::wrong_password(Some(()), false)]
#[tokio::test]
async fn authenticate_failures_share_one_message(
    #[case] existing: Option<()>,
    #[case] verifies: bool,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(move |_| Ok(existing.map(|()| stored_member())));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .times(usize::from(existing.is_some()))
        .returning(move |_, _| Ok(verifies));

    let err = make_service(users, hasher)
        .authenticate(&credentials("forkert"))
        .await
        .expect_err("login must fail");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn authenticate_treats_malformed_digest_as_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(stored_member())));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .return_once(|_, _| Err(PasswordHashError::malformed_digest("bad phc")));

    let err = make_service(users, hasher)
        .authenticate(&credentials("password"))
        .await
        .expect_err("malformed digest");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn authenticate_reports_unreachable_store_as_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));

    let err = make_service(users, MockPasswordHasher::new())
        .authenticate(&credentials("password"))
        .await
        .expect_err("store down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn register_hashes_password_and_stores_regular_user() {
    let mut users = MockUserRepository::new();
    users.expect_username_exists().return_once(|_| Ok(false));
    users.expect_email_exists().return_once(|_| Ok(false));
    users
        .expect_insert()
        .withf(|new_user| {
            new_user.role == Role::User
                && new_user.email.as_ref() == "bente@example.dk"
                && new_user.password.as_str() == DIGEST
        })
        .times(1)
        .returning(|new_user| {
            Ok(User::new(
                new_user.id,
                new_user.username.clone(),
                new_user.email.clone(),
                new_user.role,
                DateTime::<Utc>::UNIX_EPOCH,
            ))
        });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password == "hemmeligt")
        .times(1)
        .return_once(|_| Ok(PasswordDigest::new(DIGEST)));

    let user = make_service(users, hasher)
        .register(&registration())
        .await
        .expect("registration succeeds");

    assert_eq!(user.username().as_ref(), "bente");
    assert_eq!(user.role(), Role::User);
}

#[rstest]
#[case::username(true, false, USERNAME_TAKEN_MESSAGE)]
#[case::email(false, true, EMAIL_TAKEN_MESSAGE)]
#[tokio::test]
async fn register_rejects_taken_identity_before_hashing(
    #[case] username_taken: bool,
    #[case] email_taken: bool,
    #[case] expected: &str,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_username_exists()
        .return_once(move |_| Ok(username_taken));
    users
        .expect_email_exists()
        .returning(move |_| Ok(email_taken));
    users.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let err = make_service(users, hasher)
        .register(&registration())
        .await
        .expect_err("identity taken");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), expected);
}

#[tokio::test]
async fn register_maps_insert_race_to_conflict_message() {
    let mut users = MockUserRepository::new();
    users.expect_username_exists().return_once(|_| Ok(false));
    users.expect_email_exists().return_once(|_| Ok(false));
    users.expect_insert().return_once(|_| {
        Err(UserPersistenceError::conflict(UniqueUserField::Email))
    });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new(DIGEST)));

    let err = make_service(users, hasher)
        .register(&registration())
        .await
        .expect_err("lost the race");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), EMAIL_TAKEN_MESSAGE);
}

#[tokio::test]
async fn create_account_keeps_requested_role() {
    let mut users = MockUserRepository::new();
    users.expect_username_exists().return_once(|_| Ok(false));
    users.expect_email_exists().return_once(|_| Ok(false));
    users
        .expect_insert()
        .withf(|new_user| new_user.role == Role::Admin)
        .returning(|new_user| {
            Ok(User::new(
                new_user.id,
                new_user.username.clone(),
                new_user.email.clone(),
                new_user.role,
                DateTime::<Utc>::UNIX_EPOCH,
            ))
        });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new(DIGEST)));

    let user = make_service(users, hasher)
        .create_account(
            &Username::new("root").expect("username"),
            &EmailAddress::new("root@vidensbank.dk").expect("email"),
            "superhemmeligt",
            Role::Admin,
        )
        .await
        .expect("account created");

    assert!(user.is_admin());
}

#[tokio::test]
async fn fetch_profile_passes_through_missing_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let profile = make_service(users, MockPasswordHasher::new())
        .fetch_profile(&UserId::random())
        .await
        .expect("lookup succeeds");

    assert!(profile.is_none());
}
